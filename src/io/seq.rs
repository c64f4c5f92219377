//! 统一序列加载：自动识别 gzip 压缩与 FASTA/FASTQ 格式，
//! 输出规范化（大写，非法字符映射为 N）后的 DNA5 记录。

use anyhow::{anyhow, bail, Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::io::fasta::FastaReader;
use crate::io::fastq::FastqReader;
use crate::util::dna;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone)]
pub struct SeqRecord {
    pub name: String,
    pub seq: Vec<u8>,
}

/// 打开序列文件；gzip 通过魔数而非扩展名识别。
fn open_source(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)
        .with_context(|| format!("cannot open sequence file '{}'", path.display()))?;
    let mut reader = BufReader::with_capacity(1 << 16, file);
    let head = reader.fill_buf()?;
    if head.len() >= 2 && head[..2] == GZIP_MAGIC {
        Ok(Box::new(BufReader::with_capacity(
            1 << 16,
            MultiGzDecoder::new(reader),
        )))
    } else {
        Ok(Box::new(reader))
    }
}

/// 读取 FASTA 或 FASTQ 文件的全部记录，序列经 normalize_seq 规范化。
/// 空文件返回空向量；首个非空白字节既不是 '>' 也不是 '@' 时报错。
pub fn load_sequences<P: AsRef<Path>>(path: P) -> Result<Vec<SeqRecord>> {
    let path = path.as_ref();
    let mut reader = open_source(path)?;

    let first = {
        let buf = reader.fill_buf()?;
        buf.iter().copied().find(|b| !b.is_ascii_whitespace())
    };

    let mut records = Vec::new();
    match first {
        None => {}
        Some(b'>') => {
            let mut r = FastaReader::new(reader);
            while let Some(rec) = r.next_record()? {
                records.push(SeqRecord {
                    name: rec.name,
                    seq: dna::normalize_seq(&rec.seq),
                });
            }
        }
        Some(b'@') => {
            let mut r = FastqReader::new(reader);
            while let Some(rec) = r.next_record()? {
                records.push(SeqRecord {
                    name: rec.name,
                    seq: dna::normalize_seq(&rec.seq),
                });
            }
        }
        Some(b) => {
            return Err(anyhow!(
                "unrecognized sequence file format in '{}' (starts with 0x{:02x})",
                path.display(),
                b
            ));
        }
    }
    Ok(records)
}

/// 加载参考序列集合：丢弃空记录；集合为空则报错。
pub fn load_reference<P: AsRef<Path>>(path: P) -> Result<Vec<SeqRecord>> {
    let path = path.as_ref();
    let mut records = load_sequences(path)?;
    records.retain(|r| !r.seq.is_empty());
    if records.is_empty() {
        bail!("reference file '{}' contains no sequences", path.display());
    }
    Ok(records)
}

/// 加载查询序列（保留空记录，搜索时跳过）。
/// query_ct > 0 而文件中没有任何记录时报错。
pub fn load_queries<P: AsRef<Path>>(path: P, query_ct: usize) -> Result<Vec<Vec<u8>>> {
    let path = path.as_ref();
    let queries: Vec<Vec<u8>> = load_sequences(path)?
        .into_iter()
        .map(|r| r.seq)
        .collect();
    if queries.is_empty() && query_ct > 0 {
        bail!("query file '{}' contains no sequences", path.display());
    }
    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn write_tmp(content: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn load_plain_fasta() {
        let f = write_tmp(b">chr1\nacgtx\n>empty\n>chr2\nTTTT\n");
        let recs = load_sequences(f.path()).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].seq, b"ACGTN");
        assert!(recs[1].seq.is_empty());
        assert_eq!(recs[2].seq, b"TTTT");
    }

    #[test]
    fn load_plain_fastq() {
        let f = write_tmp(b"@r1\nacgt\n+\nIIII\n");
        let recs = load_sequences(f.path()).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].seq, b"ACGT");
    }

    #[test]
    fn load_gzipped_fasta() {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b">g1\nACGTACGT\n").unwrap();
        let f = write_tmp(&enc.finish().unwrap());
        let recs = load_sequences(f.path()).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "g1");
        assert_eq!(recs[0].seq, b"ACGTACGT");
    }

    #[test]
    fn reference_drops_empty_records() {
        let f = write_tmp(b">a\nACGT\n>empty\n>b\nGG\n");
        let recs = load_reference(f.path()).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].name, "a");
        assert_eq!(recs[1].name, "b");
    }

    #[test]
    fn reference_rejects_empty_file() {
        let f = write_tmp(b"");
        assert!(load_reference(f.path()).is_err());
    }

    #[test]
    fn queries_reject_empty_file_when_count_requested() {
        let f = write_tmp(b"");
        assert!(load_queries(f.path(), 10).is_err());
        assert!(load_queries(f.path(), 0).unwrap().is_empty());
    }

    #[test]
    fn unknown_format_is_an_error() {
        let f = write_tmp(b"#not a sequence file\n");
        assert!(load_sequences(f.path()).is_err());
    }
}
