//! DNA5 字母表：规范字符形式 {A,C,G,T,N} 与数值编码 {0:$ 1:A 2:C 3:G 4:T 5:N}。
//! 数值映射是索引文件的持久化契约，改动会使已有索引失效。

pub const SIGMA: usize = 6;

/// 256 项字符编码表：大小写折叠，U 并入 T，无法识别的字节一律并入 N。
/// 字节 0 保留给分隔符 / 哨兵。
static CHAR_TO_CODE: [u8; 256] = char_table();

const fn char_table() -> [u8; 256] {
    let mut t = [5u8; 256]; // 默认 N
    t[0] = 0;
    t[b'A' as usize] = 1;
    t[b'a' as usize] = 1;
    t[b'C' as usize] = 2;
    t[b'c' as usize] = 2;
    t[b'G' as usize] = 3;
    t[b'g' as usize] = 3;
    t[b'T' as usize] = 4;
    t[b't' as usize] = 4;
    t[b'U' as usize] = 4;
    t[b'u' as usize] = 4;
    t[b'N' as usize] = 5;
    t[b'n' as usize] = 5;
    t
}

const CODE_TO_CHAR: [u8; SIGMA] = [0, b'A', b'C', b'G', b'T', b'N'];

#[inline]
pub fn to_alphabet(b: u8) -> u8 {
    CHAR_TO_CODE[b as usize]
}

#[inline]
pub fn from_alphabet(a: u8) -> u8 {
    if (a as usize) < SIGMA {
        CODE_TO_CHAR[a as usize]
    } else {
        b'N'
    }
}

/// 字符序列整体编码；调用方保证输入不含 NUL，因此输出不含 0。
pub fn encode(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&b| to_alphabet(b)).collect()
}

#[inline]
fn canonical(b: u8) -> u8 {
    match b.to_ascii_uppercase() {
        up @ (b'A' | b'C' | b'G' | b'T' | b'N') => up,
        b'U' => b'T',
        _ => b'N',
    }
}

/// 规范化为大写 DNA5 字符形式。
pub fn normalize_seq(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&b| canonical(b)).collect()
}
