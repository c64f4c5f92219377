use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter};

const FM_MAGIC: u64 = 0x5245_4D41_5046_4D31; // "REMAPFM1"
const FM_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Contig {
    pub name: String,
    pub len: u32,
    pub offset: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct IndexMeta {
    pub reference_file: Option<String>,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
}

/// 规范化后的出现位置：文本编号 + 文本内起点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Occurrence {
    pub text_id: u32,
    pub position: u64,
}

/// 基于分块采样 Occ 的 FM 索引。
/// 字母表取值 [0, sigma)，0 专用于 contig 分隔符与哨兵；
/// SA 全量保留，区间可以直接映射回文本位置。
#[derive(Debug, Serialize, Deserialize)]
pub struct FMIndex {
    pub magic: u64,
    pub version: u32,
    pub sigma: u8,
    pub block: u32,
    /// 每个字符的区间起点：严格小于该字符的字符总数
    pub c: Vec<u32>,
    /// BWT（长度与 SA 一致）
    pub bwt: Vec<u8>,
    /// 按块采样的出现计数，按 块号 * sigma + 字符 展平存放
    pub occ_samples: Vec<u32>,
    /// 全量 SA
    pub sa: Vec<u32>,
    /// contig 名称 / 长度 / 在拼接文本中的起点
    pub contigs: Vec<Contig>,
    /// 数值化文本（contig 之间以 0 分隔）
    pub text: Vec<u8>,
    /// 构建元信息（来源文件、命令行、时间戳）
    pub meta: Option<IndexMeta>,
}

impl FMIndex {
    pub fn build(text: Vec<u8>, bwt: Vec<u8>, sa: Vec<u32>, contigs: Vec<Contig>, sigma: u8, block: usize) -> Self {
        let sigma_us = sigma as usize;

        // 频次统计，随后做前缀和得到 C 表
        let mut freq = vec![0u32; sigma_us];
        for &ch in &bwt {
            if (ch as usize) < sigma_us {
                freq[ch as usize] += 1;
            }
        }
        let mut c = Vec::with_capacity(sigma_us);
        let mut below = 0u32;
        for &f in &freq {
            c.push(below);
            below += f;
        }

        // 每个块开头记一份累计计数快照，查询时块内顺扫补齐
        let blocks = (bwt.len() + block - 1) / block;
        let mut occ_samples = Vec::with_capacity(blocks * sigma_us);
        let mut running = vec![0u32; sigma_us];
        for chunk in bwt.chunks(block) {
            occ_samples.extend_from_slice(&running);
            for &ch in chunk {
                if (ch as usize) < sigma_us {
                    running[ch as usize] += 1;
                }
            }
        }

        Self {
            magic: FM_MAGIC,
            version: FM_VERSION,
            sigma,
            block: block as u32,
            c,
            bwt,
            occ_samples,
            sa,
            contigs,
            text,
            meta: None,
        }
    }

    pub fn set_meta(&mut self, meta: IndexMeta) {
        self.meta = Some(meta);
    }

    /// BWT 前缀 [0, pos) 中 ch 的计数：所在块的采样快照 + 块内补扫。
    #[inline]
    pub fn occ(&self, ch: u8, pos: usize) -> u32 {
        if pos == 0 {
            return 0;
        }
        let block = self.block as usize;
        let bi = (pos - 1) / block;
        let sampled = self.occ_samples[bi * self.sigma as usize + ch as usize];
        let tail = self.bwt[bi * block..pos].iter().filter(|&&b| b == ch).count();
        sampled + tail as u32
    }

    /// LF 映射：把区间 [l, r) 沿字符 ch 收缩一步。
    #[inline]
    pub fn rank_range(&self, ch: u8, l: usize, r: usize) -> (usize, usize) {
        let base = self.c[ch as usize] as usize;
        (base + self.occ(ch, l) as usize, base + self.occ(ch, r) as usize)
    }

    /// 自右向左的精确区间搜索；pat 为编码后的字母表（不含 0）。
    pub fn backward_search(&self, pat: &[u8]) -> Option<(usize, usize)> {
        let mut range = (0usize, self.bwt.len());
        if range.1 == 0 {
            return None;
        }
        for &a in pat.iter().rev() {
            range = self.rank_range(a, range.0, range.1);
            if range.0 >= range.1 {
                return None;
            }
        }
        Some(range)
    }

    /// 精确搜索：枚举 pat 的全部出现位置（顺序不定，无重复）。
    pub fn search_exact(&self, pat: &[u8]) -> Vec<Occurrence> {
        if pat.is_empty() { return Vec::new(); }
        match self.backward_search(pat) {
            Some((l, r)) => self.decode_interval(l, r, pat.len()),
            None => Vec::new(),
        }
    }

    /// 允许最多 max_subst 个替换错误的近似搜索（Hamming，不支持插入/删除）。
    /// 自右向左回溯：每一步枚举全部非分隔符字符，与模式不同则消耗一个错误预算。
    /// 返回按 (text_id, position) 排序去重后的出现位置。
    pub fn search_k_subst(&self, pat: &[u8], max_subst: u32) -> Vec<Occurrence> {
        if pat.is_empty() || self.bwt.is_empty() { return Vec::new(); }
        let mut intervals = Vec::new();
        self.collect_subst_intervals(pat, pat.len(), 0, self.bwt.len(), max_subst, &mut intervals);

        let mut occs = Vec::new();
        for (l, r) in intervals {
            occs.extend(self.decode_interval(l, r, pat.len()));
        }
        occs.sort_unstable();
        occs.dedup();
        occs
    }

    fn collect_subst_intervals(
        &self,
        pat: &[u8],
        i: usize,
        l: usize,
        r: usize,
        budget: u32,
        out: &mut Vec<(usize, usize)>,
    ) {
        if i == 0 {
            out.push((l, r));
            return;
        }
        let want = pat[i - 1];
        for a in 1..self.sigma {
            let (nl, nr) = self.rank_range(a, l, r);
            if nl >= nr { continue; }
            if a == want {
                self.collect_subst_intervals(pat, i - 1, nl, nr, budget, out);
            } else if budget > 0 {
                self.collect_subst_intervals(pat, i - 1, nl, nr, budget - 1, out);
            }
        }
    }

    /// 把 SA 区间解码为出现位置。长度为 m 的匹配必须完整落在单个 contig 内；
    /// 无法唯一定位的 SA 位置（落在分隔符上或越过 contig 末尾）被跳过。
    pub fn decode_interval(&self, l: usize, r: usize, m: usize) -> Vec<Occurrence> {
        let mut occs = Vec::with_capacity(r.saturating_sub(l));
        for &p in self.sa_interval_positions(l, r) {
            if let Some((ci, off)) = self.map_text_pos(p) {
                if off as usize + m <= self.contigs[ci].len as usize {
                    occs.push(Occurrence { text_id: ci as u32, position: off as u64 });
                }
            }
        }
        occs
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let f = std::fs::File::create(path)?;
        bincode::serialize_into(BufWriter::new(f), self)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let f = std::fs::File::open(path)?;
        let idx: Self = bincode::deserialize_from(BufReader::new(f))?;
        if idx.magic != FM_MAGIC {
            return Err(anyhow!("not an FM index file (magic 0x{:016X})", idx.magic));
        }
        if idx.version != FM_VERSION {
            return Err(anyhow!(
                "FM index version {} not supported (this build reads version {})",
                idx.version,
                FM_VERSION
            ));
        }
        Ok(idx)
    }

    /// SA 区间 [l, r) 对应的文本位置切片。
    pub fn sa_interval_positions(&self, l: usize, r: usize) -> &[u32] {
        &self.sa[l..r]
    }

    /// 全局文本位置 -> (contig 编号, contig 内偏移)；分隔符位置没有对应 contig。
    pub fn map_text_pos(&self, pos: u32) -> Option<(usize, u32)> {
        // contigs 按 offset 升序；取最后一个 offset <= pos 的 contig 再查界
        let i = self.contigs.partition_point(|c| c.offset <= pos);
        if i == 0 {
            return None;
        }
        let c = &self.contigs[i - 1];
        if pos < c.offset + c.len {
            Some((i - 1, pos - c.offset))
        } else {
            None
        }
    }
}
