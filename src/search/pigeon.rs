//! 鸽笼过滤-验证搜索：把查询切成 k+1 段，任何 ≤k 错配的出现至少
//! 含一段精确匹配；对每段做 FM 精确种子搜索得到候选起点，排序去重后
//! 按 Hamming 距离对参考序列验证。

use rayon::prelude::*;

use crate::index::fm::FMIndex;
use crate::util::dna;

/// 切分点 cut[0..=parts]，cut[i] = i*m/parts；parts = clamp(k+1, 1, m)。
pub fn partition_cuts(m: usize, k: u32) -> Vec<usize> {
    let parts = (k as usize + 1).clamp(1, m);
    (0..=parts).map(|i| i * m / parts).collect()
}

/// Hamming 距离是否 ≤ k；超出预算立即提前返回。
pub fn hamming_within(q: &[u8], window: &[u8], k: u32) -> bool {
    let mut mism = 0u32;
    for (a, b) in q.iter().zip(window) {
        if a != b {
            mism += 1;
            if mism > k {
                return false;
            }
        }
    }
    true
}

/// 单条查询的鸽笼搜索，返回 ≤k 错配的出现次数。
/// texts 为解析后的参考序列（规范化字符形式），与 FM 索引同源。
pub fn search_query(fm: &FMIndex, texts: &[Vec<u8>], q: &[u8], k: u32) -> u64 {
    let m = q.len();
    if m == 0 {
        return 0;
    }

    let cut = partition_cuts(m, k);

    // 种子阶段：每段做精确搜索，候选起点 = 出现位置 - 段内偏移（可为负）
    let mut cand: Vec<(u32, i64)> = Vec::with_capacity(256);
    for w in cut.windows(2) {
        let (qs, qe) = (w[0], w[1]);
        if qe <= qs {
            continue;
        }
        let piece = dna::encode(&q[qs..qe]);
        for occ in fm.search_exact(&piece) {
            cand.push((occ.text_id, occ.position as i64 - qs as i64));
        }
    }
    if cand.is_empty() {
        return 0;
    }

    // 完整匹配通常被多段种子同时发现，必须去重
    cand.sort_unstable();
    cand.dedup();

    // 验证阶段：越界候选丢弃，其余做带提前退出的 Hamming 校验
    let mut hits = 0u64;
    for (text_id, start) in cand {
        let r = &texts[text_id as usize];
        if start < 0 {
            continue;
        }
        let start = start as usize;
        if start + m > r.len() {
            continue;
        }
        if hamming_within(q, &r[start..start + m], k) {
            hits += 1;
        }
    }
    hits
}

/// 查询集合的总命中数。
pub fn count_hits(fm: &FMIndex, texts: &[Vec<u8>], queries: &[Vec<u8>], k: u32) -> u64 {
    queries
        .par_iter()
        .map(|q| search_query(fm, texts, q, k))
        .sum()
}
