//! 演示如何在 library 模式下使用 remap-rust 的三条搜索路径。
//!
//! 运行方式：
//! ```bash
//! cargo run --example simple_search
//! ```

use remap_rust::index::{bwt, fm, sa};
use remap_rust::search::{locate, pigeon};
use remap_rust::util::dna;

fn main() {
    // 1. 参考序列
    let reference = b"ACGTACGTAGCTGATCGTAGCTAGCTAGCTGATCGTAGCTAGCTAGCTGAT";
    println!("参考序列: {}", std::str::from_utf8(reference).unwrap());
    println!("参考长度: {} bp", reference.len());

    let norm = dna::normalize_seq(reference);

    // 2. 构建 FM 索引
    let mut text = dna::encode(&norm);
    let len = text.len() as u32;
    let contigs = vec![fm::Contig {
        name: "ref1".to_string(),
        len,
        offset: 0,
    }];
    text.push(0);

    let sa_arr = sa::build_sa(&text);
    let bwt_arr = bwt::build_bwt(&text, &sa_arr);
    let fm_idx = fm::FMIndex::build(text, bwt_arr, sa_arr, contigs, dna::SIGMA as u8, 16);

    println!("FM 索引构建完成：BWT 长度={}, SA 长度={}", fm_idx.bwt.len(), fm_idx.sa.len());

    // 3. 精确匹配搜索
    let pattern = b"GCTGATCGTAG";
    let occs = fm_idx.search_exact(&dna::encode(pattern));
    println!("\n精确匹配 '{}': 找到 {} 处", std::str::from_utf8(pattern).unwrap(), occs.len());
    for occ in &occs {
        println!("  text_id={}, position={}", occ.text_id, occ.position);
    }

    // 4. 允许 1 个替换错误的直接搜索
    let occs = fm_idx.search_k_subst(&dna::encode(pattern), 1);
    println!("\nk=1 近似匹配: 找到 {} 处", occs.len());

    // 5. 鸽笼过滤-验证搜索
    let texts = vec![norm.clone()];
    let query = b"GCTGATCGTAC"; // 末位带一个错配
    let hits = pigeon::search_query(&fm_idx, &texts, query, 1);
    println!("\n鸽笼搜索 '{}' (k=1): {} 处命中", std::str::from_utf8(query).unwrap(), hits);

    // 6. 后缀数组路径
    let s = sa::concat_reference(&[norm]);
    let plain_sa = sa::build_sa(&s);
    if let Some((lp, rp)) = locate::find_interval(&s, &plain_sa, pattern) {
        println!("\nSA 区间 [{} , {}]，出现 {} 次", lp, rp, rp - lp + 1);
    }

    println!("\n完成！");
}
