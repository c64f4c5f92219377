use anyhow::{anyhow, Result};
use std::io::BufRead;

#[derive(Debug, Clone)]
pub struct FastqRecord {
    pub name: String,
    pub seq: Vec<u8>,
}

pub struct FastqReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: String::new(), done: false }
    }

    pub fn next_record(&mut self) -> Result<Option<FastqRecord>> {
        if self.done { return Ok(None); }

        // header line starting with '@'
        self.buf.clear();
        let mut n = self.reader.read_line(&mut self.buf)?;
        if n == 0 { self.done = true; return Ok(None); }
        if !self.buf.starts_with('@') {
            return Err(anyhow!("FASTQ header not starting with '@'"));
        }
        let name = self.buf[1..]
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_string();

        // sequence line
        self.buf.clear();
        n = self.reader.read_line(&mut self.buf)?;
        if n == 0 { return Err(anyhow!("unexpected EOF after header")); }
        let seq = self.buf.trim_end().as_bytes().to_vec();

        // plus line
        self.buf.clear();
        n = self.reader.read_line(&mut self.buf)?;
        if n == 0 || !self.buf.starts_with('+') { return Err(anyhow!("missing '+' line")); }

        // quality line (length must match seq; the scores themselves are unused)
        self.buf.clear();
        n = self.reader.read_line(&mut self.buf)?;
        if n == 0 { return Err(anyhow!("missing quality line")); }
        if self.buf.trim_end().len() != seq.len() {
            return Err(anyhow!("seq/qual length mismatch"));
        }

        Ok(Some(FastqRecord { name, seq }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_simple_fastq() {
        let data = b"@r1 extra\nACGT\n+\nIIII\n@r2\nNN\n+\nII\n";
        let cursor = Cursor::new(&data[..]);
        let mut r = FastqReader::new(cursor);

        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.name, "r1");
        assert_eq!(r1.seq, b"ACGT");

        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.name, "r2");
        assert_eq!(r2.seq, b"NN");

        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn reject_qual_length_mismatch() {
        let data = b"@r1\nACGT\n+\nII\n";
        let cursor = Cursor::new(&data[..]);
        let mut r = FastqReader::new(cursor);
        assert!(r.next_record().is_err());
    }

    #[test]
    fn reject_missing_plus_line() {
        let data = b"@r1\nACGT\nIIII\n";
        let cursor = Cursor::new(&data[..]);
        let mut r = FastqReader::new(cursor);
        assert!(r.next_record().is_err());
    }
}
