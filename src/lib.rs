//! # remap-rust
//!
//! 针对 DNA5 字母表 {A,C,G,T,N} 的短序列读段映射工具集。
//!
//! 本 crate 提供三条相互独立的搜索路径和两个索引构建器：
//!
//! - **后缀数组路径**：对拼接参考串（`%` 分隔 contig，`$` 作全局哨兵）构建
//!   32 位后缀数组，用两次二分得到模式的 SA 闭区间，实现精确计数
//! - **FM 索引直接搜索**：基于 BWT 的回溯搜索，允许最多 k 个替换错误
//!   （仅 Hamming，不支持插入/删除）
//! - **鸽笼过滤-验证搜索**：查询切成 k+1 段做精确种子搜索，候选去重后
//!   按 Hamming 距离对参考序列验证
//!
//! ## 快速示例
//!
//! ```rust,no_run
//! use remap_rust::index::{sa, bwt, fm};
//! use remap_rust::util::dna;
//!
//! // 构建 FM 索引
//! let reference = b"ACGTACGTAGCTGATCGTAG";
//! let mut text = dna::encode(&dna::normalize_seq(reference));
//! let len = text.len() as u32;
//! let contigs = vec![fm::Contig { name: "ref".to_string(), len, offset: 0 }];
//! text.push(0);
//!
//! let sa_arr = sa::build_sa(&text);
//! let bwt_arr = bwt::build_bwt(&text, &sa_arr);
//! let fm_idx = fm::FMIndex::build(text, bwt_arr, sa_arr, contigs, dna::SIGMA as u8, 16);
//!
//! // 允许 1 个替换错误的近似搜索
//! let pattern = dna::encode(b"GCTGATC");
//! let occs = fm_idx.search_k_subst(&pattern, 1);
//! println!("Found {} occurrences", occs.len());
//! ```
//!
//! ## 模块说明
//!
//! - [`io`] — FASTA / FASTQ 文件解析（支持 gzip 压缩输入）
//! - [`index`] — 索引构建（后缀数组、BWT、FM 索引及其序列化）
//! - [`search`] — 搜索算法（SA 区间定位、鸽笼过滤-验证、k 替换搜索、朴素计数）
//! - [`util`] — DNA5 编码 / 解码 / 规范化工具函数

pub mod io;
pub mod index;
pub mod search;
pub mod util;
