pub mod approx;
pub mod locate;
pub mod naive;
pub mod pigeon;

/// 把查询集合补齐到恰好 target 条：整体翻倍复制直到足够，再截断。
/// target 为 0 时清空（执行零次搜索）。
pub fn duplicate_queries(queries: &mut Vec<Vec<u8>>, target: usize) {
    if target == 0 || queries.is_empty() {
        queries.truncate(target);
        return;
    }
    while queries.len() < target {
        let old = queries.len();
        queries.extend_from_within(..old);
    }
    queries.truncate(target);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qset(items: &[&[u8]]) -> Vec<Vec<u8>> {
        items.iter().map(|s| s.to_vec()).collect()
    }

    #[test]
    fn duplicate_doubles_then_truncates() {
        let mut q = qset(&[b"A", b"C"]);
        duplicate_queries(&mut q, 5);
        assert_eq!(q, qset(&[b"A", b"C", b"A", b"C", b"A"]));
    }

    #[test]
    fn duplicate_exact_length_is_identity() {
        let base = qset(&[b"AC", b"GT", b"NN"]);
        let mut q = base.clone();
        duplicate_queries(&mut q, 3);
        assert_eq!(q, base);
    }

    #[test]
    fn duplicate_truncates_oversized_set() {
        let mut q = qset(&[b"A", b"C", b"G", b"T"]);
        duplicate_queries(&mut q, 2);
        assert_eq!(q, qset(&[b"A", b"C"]));
    }

    #[test]
    fn duplicate_to_zero_clears() {
        let mut q = qset(&[b"A", b"C"]);
        duplicate_queries(&mut q, 0);
        assert!(q.is_empty());
    }

    #[test]
    fn duplicate_is_base_set_repeated() {
        // 翻倍-截断的结果等于基础集合循环重复后的前 target 条
        let base = qset(&[b"AAG", b"C", b"GT"]);
        for target in [1usize, 4, 7, 11, 16] {
            let mut q = base.clone();
            duplicate_queries(&mut q, target);
            assert_eq!(q.len(), target);
            for (i, item) in q.iter().enumerate() {
                assert_eq!(item, &base[i % base.len()], "mismatch at {}", i);
            }
        }
    }
}
