//! 直接 k 替换搜索：逐条查询调用 FM 索引的近似搜索并累计出现次数。
//! 与鸽笼路径不同，这里不做独立验证；索引层已按 (text_id, position) 去重。

use rayon::prelude::*;

use crate::index::fm::FMIndex;
use crate::util::dna;

/// 查询集合的总命中数（空查询跳过）。
pub fn count_hits(fm: &FMIndex, queries: &[Vec<u8>], k: u32) -> u64 {
    queries
        .par_iter()
        .map(|q| {
            if q.is_empty() {
                return 0;
            }
            fm.search_k_subst(&dna::encode(q), k).len() as u64
        })
        .sum()
}
