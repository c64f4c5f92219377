//! 基于后缀数组的精确定位：两次二分得到模式的 SA 闭区间 [LP, RP]，
//! 区间长度即出现次数。

use rayon::prelude::*;
use std::cmp::Ordering;

/// 三向比较：S[pos..] 的前 |P| 个字符与模式 P。
/// 后缀先结束（且已匹配部分相等）视为小于 P。
pub fn cmp_suffix_pattern(s: &[u8], pos: usize, pat: &[u8]) -> Ordering {
    let suffix = &s[pos..];
    let m = pat.len().min(suffix.len());
    match suffix[..m].cmp(&pat[..m]) {
        Ordering::Equal => {
            if suffix.len() >= pat.len() {
                Ordering::Equal // P 是该后缀的前缀
            } else {
                Ordering::Less // 后缀先结束
            }
        }
        ord => ord,
    }
}

/// 返回闭区间 [LP, RP]；无出现时返回 None。
/// pat 非空，且不含分隔符 '%' 与哨兵 '$'。
pub fn find_interval(s: &[u8], sa: &[u32], pat: &[u8]) -> Option<(usize, usize)> {
    let n = sa.len();

    // LP：第一个不小于 P 的后缀
    let mut l = 0usize;
    let mut r = n;
    while l < r {
        let mid = (l + r) / 2;
        if cmp_suffix_pattern(s, sa[mid] as usize, pat) == Ordering::Less {
            l = mid + 1;
        } else {
            r = mid;
        }
    }
    let lp = l;

    // 第一个大于 P 的后缀（匹配视为 <=）
    let mut l = 0usize;
    let mut r = n;
    while l < r {
        let mid = (l + r) / 2;
        if cmp_suffix_pattern(s, sa[mid] as usize, pat) == Ordering::Greater {
            r = mid;
        } else {
            l = mid + 1;
        }
    }
    let first_gt = l;

    if lp >= first_gt {
        None
    } else {
        Some((lp, first_gt - 1))
    }
}

/// 统计查询集合在拼接串 S 中的总出现次数（空查询跳过）。
pub fn count_hits(s: &[u8], sa: &[u32], queries: &[Vec<u8>]) -> u64 {
    queries
        .par_iter()
        .map(|q| {
            if q.is_empty() {
                return 0;
            }
            match find_interval(s, sa, q) {
                Some((lp, rp)) => (rp - lp + 1) as u64,
                None => 0,
            }
        })
        .sum()
}
