use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// 拼接参考串末尾的全局哨兵，必须小于所有 DNA5 字符。
pub const SENTINEL: u8 = b'$';
/// contig 之间的分隔字节（查询中保证不出现）。
pub const SEPARATOR: u8 = b'%';

/// 把参考序列集合拼成 SA 路径使用的单一文本：
/// seq_0 % seq_1 % ... % seq_{T-1} $
pub fn concat_reference(seqs: &[Vec<u8>]) -> Vec<u8> {
    let total: usize = seqs.iter().map(|s| s.len()).sum();
    let mut s = Vec::with_capacity(total + seqs.len());
    for (i, seq) in seqs.iter().enumerate() {
        if i > 0 {
            s.push(SEPARATOR);
        }
        s.extend_from_slice(seq);
    }
    s.push(SENTINEL);
    s
}

/// 构建后缀数组（倍增法，每轮 O(n log n) 排序）。
/// 按字节序比较，适用于数值字母表和含 '$'/'%' 的 ASCII 文本。
pub fn build_sa(text: &[u8]) -> Vec<u32> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    let mut sa: Vec<usize> = (0..n).collect();
    let mut rank: Vec<i64> = text.iter().map(|&b| b as i64).collect();
    let mut next_rank: Vec<i64> = vec![0; n];

    let mut k = 1usize;
    while k < n {
        let key = |i: usize| {
            let second = if i + k < n { rank[i + k] } else { -1 };
            (rank[i], second)
        };
        sa.sort_unstable_by_key(|&i| key(i));

        next_rank[sa[0]] = 0;
        for w in 1..n {
            let prev = sa[w - 1];
            let curr = sa[w];
            next_rank[curr] = next_rank[prev] + i64::from(key(curr) != key(prev));
        }
        rank.copy_from_slice(&next_rank);

        if rank[sa[n - 1]] as usize == n - 1 {
            break;
        }
        k <<= 1;
    }

    sa.into_iter().map(|x| x as u32).collect()
}

/// 写出 SA 索引文件（小端）：[u64 n][u32 sa[0..n)]。
pub fn write_sa<P: AsRef<Path>>(path: P, sa: &[u32]) -> Result<()> {
    let path = path.as_ref();
    let f = File::create(path)
        .with_context(|| format!("cannot open output index file '{}'", path.display()))?;
    let mut w = BufWriter::new(f);
    w.write_all(&(sa.len() as u64).to_le_bytes())?;
    for &v in sa {
        w.write_all(&v.to_le_bytes())?;
    }
    w.flush().context("error while writing index file")?;
    Ok(())
}

/// 读取 SA 索引文件，校验 n > 0 并恰好读满 8 + 4n 字节。
pub fn read_sa<P: AsRef<Path>>(path: P) -> Result<Vec<u32>> {
    let path = path.as_ref();
    let f = File::open(path)
        .with_context(|| format!("cannot open index file '{}'", path.display()))?;
    let mut r = BufReader::new(f);

    let mut head = [0u8; 8];
    r.read_exact(&mut head)
        .context("index file truncated (missing header)")?;
    let n = u64::from_le_bytes(head);
    if n == 0 {
        bail!("index file corrupt (n=0)");
    }

    let mut raw = vec![0u8; n as usize * 4];
    r.read_exact(&mut raw)
        .with_context(|| format!("index file truncated (expected {} entries)", n))?;
    Ok(raw
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sa_basic() {
        // 文本：A C G T $  -> 1 2 3 4 0
        let text = [1u8, 2, 3, 4, 0];
        let sa = build_sa(&text);
        // 期望：后缀按字典序：$, A…, C…, G…, T$
        assert_eq!(sa, vec![4, 0, 1, 2, 3]);
    }

    #[test]
    fn sa_on_ascii_text_with_sentinel() {
        let s = concat_reference(&[b"ACGT".to_vec()]);
        assert_eq!(s, b"ACGT$");
        let sa = build_sa(&s);
        assert_eq!(sa, vec![4, 0, 1, 2, 3]);
    }

    #[test]
    fn concat_reference_layout() {
        let s = concat_reference(&[b"AC".to_vec(), b"GT".to_vec()]);
        assert_eq!(s, b"AC%GT$");
    }

    fn assert_sa_invariants(text: &[u8], sa: &[u32]) {
        // 置换性
        let mut seen = vec![false; text.len()];
        for &p in sa {
            assert!(!seen[p as usize]);
            seen[p as usize] = true;
        }
        assert!(seen.iter().all(|&b| b));
        // 字典序
        for w in sa.windows(2) {
            let a = &text[w[0] as usize..];
            let b = &text[w[1] as usize..];
            assert!(a <= b, "suffixes out of order");
        }
    }

    #[test]
    fn sa_permutation_and_order() {
        let s = concat_reference(&[
            b"ACGTACGTNNACGT".to_vec(),
            b"TTTTGGGG".to_vec(),
            b"A".to_vec(),
        ]);
        let sa = build_sa(&s);
        assert_eq!(sa.len(), s.len());
        assert_sa_invariants(&s, &sa);
    }

    #[test]
    fn sa_repetitive_text() {
        let s = concat_reference(&[b"AAAAAAAA".to_vec()]);
        let sa = build_sa(&s);
        assert_sa_invariants(&s, &sa);
        // 最短后缀在前
        assert_eq!(sa[0], 8); // "$"
        assert_eq!(sa[1], 7); // "A$"
    }

    #[test]
    fn sa_file_roundtrip() {
        let s = concat_reference(&[b"ACGTACGT".to_vec()]);
        let sa = build_sa(&s);

        let tmp = tempfile::NamedTempFile::new().unwrap();
        write_sa(tmp.path(), &sa).unwrap();
        let loaded = read_sa(tmp.path()).unwrap();
        assert_eq!(loaded, sa);
    }

    #[test]
    fn read_sa_rejects_zero_length() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&0u64.to_le_bytes()).unwrap();
        tmp.flush().unwrap();
        assert!(read_sa(tmp.path()).is_err());
    }

    #[test]
    fn read_sa_rejects_truncated_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&4u64.to_le_bytes()).unwrap();
        tmp.write_all(&1u32.to_le_bytes()).unwrap(); // only 1 of 4 entries
        tmp.flush().unwrap();
        assert!(read_sa(tmp.path()).is_err());
    }
}
