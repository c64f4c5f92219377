use anyhow::Result;
use clap::Parser;
use std::time::Instant;

use remap_rust::index::fm::{Contig, FMIndex, IndexMeta};
use remap_rust::index::{bwt, sa};
use remap_rust::io::seq;
use remap_rust::util::dna;

#[derive(Parser, Debug)]
#[command(name = "fmindex_construct", version, about = "Build an FM-index over a DNA5 reference and serialize it")]
struct Args {
    /// Path to the reference FASTA/FASTQ file (.gz ok)
    #[arg(long)]
    reference: String,
    /// Path to write the serialized FM-index (.bin)
    #[arg(long)]
    index: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let records = seq::load_reference(&args.reference)?;

    // 编码为数值字母表，contig 之间以 0 分隔
    let mut text: Vec<u8> = Vec::new();
    let mut contigs: Vec<Contig> = Vec::new();
    for rec in &records {
        let start = text.len() as u32;
        text.extend(dna::encode(&rec.seq));
        contigs.push(Contig {
            name: rec.name.clone(),
            len: text.len() as u32 - start,
            offset: start,
        });
        text.push(0);
    }

    let t0 = Instant::now();
    let sa_arr = sa::build_sa(&text);
    let bwt_arr = bwt::build_bwt(&text, &sa_arr);
    let mut fm = FMIndex::build(text, bwt_arr, sa_arr, contigs, dna::SIGMA as u8, 512);
    let build_s = t0.elapsed().as_secs_f64();

    eprintln!("Index Construction time: {} seconds.", build_s);

    fm.set_meta(IndexMeta {
        reference_file: Some(args.reference.clone()),
        build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
        build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
    });
    fm.save_to_file(&args.index)
        .map_err(|e| anyhow::anyhow!("cannot write index to '{}': {}", args.index, e))?;

    Ok(())
}
