/// 由后缀数组导出 BWT：第 i 行取该后缀起点的前一个字符，
/// 排在首位的后缀回绕到文本末尾。text 与 sa 等长。
pub fn build_bwt(text: &[u8], sa: &[u32]) -> Vec<u8> {
    if text.is_empty() {
        return Vec::new();
    }
    sa.iter()
        .map(|&p| match p as usize {
            0 => text[text.len() - 1],
            i => text[i - 1],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::sa::build_sa;

    #[test]
    fn bwt_basic() {
        // ACGT$ -> 1 2 3 4 0, SA = [4,0,1,2,3]
        let text = [1u8, 2, 3, 4, 0];
        let sa = build_sa(&text);
        let bwt = build_bwt(&text, &sa);
        // BWT[i] = text[SA[i]-1]（SA[i]=0 时回绕到末尾）
        assert_eq!(bwt, vec![4, 0, 1, 2, 3]);
    }

    #[test]
    fn bwt_empty_text() {
        assert!(build_bwt(&[], &[]).is_empty());
    }
}
