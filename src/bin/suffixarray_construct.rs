use anyhow::{bail, Result};
use clap::Parser;
use std::time::Instant;

use remap_rust::index::sa;
use remap_rust::io::seq;

#[derive(Parser, Debug)]
#[command(name = "suffixarray_construct", version, about = "Build a suffix array over the concatenated reference and write it as binary")]
struct Args {
    /// Path to the reference FASTA/FASTQ file (.gz ok)
    #[arg(long)]
    reference: String,
    /// Path to write the suffix array index (.bin)
    #[arg(long)]
    index: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let seqs: Vec<Vec<u8>> = seq::load_reference(&args.reference)?
        .into_iter()
        .map(|r| r.seq)
        .collect();

    // contig 之间插 '%' 防止跨 contig 假匹配，末尾加全局哨兵 '$'
    let s = sa::concat_reference(&seqs);

    // SA 以 u32 存储，要求 n < 2^32
    if s.len() > u32::MAX as usize {
        bail!("reference too long for u32 suffix array (n >= 2^32)");
    }

    let t0 = Instant::now();
    let sa_arr = sa::build_sa(&s);
    let build_s = t0.elapsed().as_secs_f64();

    sa::write_sa(&args.index, &sa_arr)?;

    eprintln!("Index Construction time: {} seconds.", build_s);
    Ok(())
}
