//! 朴素多线程子串计数：逐窗口比较，允许重叠；
//! 查询按连续块切分，块粒度由 min_block 控制。

use anyhow::{anyhow, Result};
use rayon::prelude::*;

/// text 中 pat 的出现次数（允许重叠）。
pub fn count_overlaps(text: &[u8], pat: &[u8]) -> u64 {
    if pat.is_empty() || pat.len() > text.len() {
        return 0;
    }
    text.windows(pat.len()).filter(|w| *w == pat).count() as u64
}

/// 把 [0, n) 切成连续块：至少 min(threads, n) 块，且块大小尽量不低于 min_block。
pub fn chunk_ranges(n: usize, threads: usize, min_block: usize) -> Vec<(usize, usize)> {
    if n == 0 {
        return Vec::new();
    }
    let threads = threads.max(1);
    let min_block = min_block.max(1);

    let min_blocks = threads.min(n);
    let by_min_block = (n + min_block - 1) / min_block;
    let blocks = min_blocks.max(by_min_block).min(n);
    let block_size = (n + blocks - 1) / blocks;

    (0..blocks)
        .map(|t| (t * block_size, ((t + 1) * block_size).min(n)))
        .filter(|&(b, e)| b < e)
        .collect()
}

/// 统计查询集合在全部参考序列中的总出现次数。
/// threads = 0 表示使用硬件并行度；线程数不超过查询数。
/// 返回 (总命中数, 实际使用的线程数)。
pub fn count_hits(
    reference: &[Vec<u8>],
    queries: &[Vec<u8>],
    threads: usize,
    min_block: usize,
) -> Result<(u64, usize)> {
    let mut threads = if threads == 0 {
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    } else {
        threads
    };
    threads = threads.min(queries.len()).max(1);

    let ranges = chunk_ranges(queries.len(), threads, min_block);
    let used = threads.min(ranges.len()).max(1);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(used)
        .build()
        .map_err(|e| anyhow!("cannot build thread pool: {}", e))?;

    let hits = pool.install(|| {
        ranges
            .par_iter()
            .map(|&(b, e)| {
                let mut local = 0u64;
                for q in &queries[b..e] {
                    if q.is_empty() {
                        continue;
                    }
                    for chr in reference {
                        local += count_overlaps(chr, q);
                    }
                }
                local
            })
            .sum()
    });

    Ok((hits, used))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_matches_counted() {
        assert_eq!(count_overlaps(b"AAAA", b"AA"), 3);
        assert_eq!(count_overlaps(b"ACGTACGT", b"ACGT"), 2);
        assert_eq!(count_overlaps(b"ACGT", b"ACGTACGT"), 0);
        assert_eq!(count_overlaps(b"ACGT", b""), 0);
    }

    #[test]
    fn chunks_cover_range_exactly_once() {
        for &(n, threads, min_block) in
            &[(10usize, 4usize, 2usize), (100, 8, 256), (7, 16, 1), (1, 1, 1), (1000, 3, 10)]
        {
            let ranges = chunk_ranges(n, threads, min_block);
            let mut next = 0usize;
            for &(b, e) in &ranges {
                assert_eq!(b, next);
                assert!(e > b);
                next = e;
            }
            assert_eq!(next, n);
        }
    }

    #[test]
    fn chunks_respect_min_block_granularity() {
        // 块数下限由线程数决定
        assert_eq!(chunk_ranges(100, 8, 256).len(), 8);
        // min_block 小的时候块数由 min_block 决定
        assert_eq!(chunk_ranges(1000, 2, 10).len(), 100);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(chunk_ranges(0, 4, 16).is_empty());
    }

    #[test]
    fn hits_match_single_threaded_scan() {
        let reference = vec![b"ACGTACGTAAACGT".to_vec(), b"AAAA".to_vec()];
        let queries = vec![b"ACGT".to_vec(), b"AA".to_vec(), Vec::new(), b"G".to_vec()];

        let mut expected = 0u64;
        for q in queries.iter().filter(|q| !q.is_empty()) {
            for chr in &reference {
                expected += count_overlaps(chr, q);
            }
        }

        for threads in [1usize, 2, 8] {
            let (hits, used) = count_hits(&reference, &queries, threads, 1).unwrap();
            assert_eq!(hits, expected);
            assert!(used >= 1 && used <= threads.max(1));
        }
    }

    #[test]
    fn zero_queries_is_not_an_error() {
        let reference = vec![b"ACGT".to_vec()];
        let (hits, used) = count_hits(&reference, &[], 4, 16).unwrap();
        assert_eq!(hits, 0);
        assert_eq!(used, 1);
    }
}
