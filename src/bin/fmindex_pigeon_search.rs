use anyhow::Result;
use clap::Parser;
use std::time::Instant;

use remap_rust::index::fm::FMIndex;
use remap_rust::io::seq;
use remap_rust::search::{self, pigeon};

#[derive(Parser, Debug)]
#[command(name = "fmindex_pigeon_search", version, about = "Pigeonhole filter-and-verify search over a serialized FM-index")]
struct Args {
    /// Path to the serialized FM-index (.bin)
    #[arg(long)]
    index: String,
    /// Path to the reference FASTA/FASTQ file (for verification)
    #[arg(long)]
    reference: String,
    /// Path to the query FASTA/FASTQ file (.gz ok)
    #[arg(long)]
    query: String,
    /// Number of queries; if not enough queries, they will be duplicated
    #[arg(long = "query_ct", default_value_t = 100)]
    query_ct: usize,
    /// Maximum allowed Hamming errors (mismatches / substitutions only)
    #[arg(long, default_value_t = 0)]
    errors: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let texts: Vec<Vec<u8>> = seq::load_reference(&args.reference)?
        .into_iter()
        .map(|r| r.seq)
        .collect();

    let mut queries = seq::load_queries(&args.query, args.query_ct)?;
    search::duplicate_queries(&mut queries, args.query_ct);

    let fm = FMIndex::load_from_file(&args.index)
        .map_err(|e| anyhow::anyhow!("error while loading index '{}': {}", args.index, e))?;

    let t0 = Instant::now();
    let hits = pigeon::count_hits(&fm, &texts, &queries, args.errors as u32);
    let search_s = t0.elapsed().as_secs_f64();

    eprintln!("Search time: {} seconds.", search_s);
    eprintln!("queries={} errors={} hits={}", queries.len(), args.errors, hits);
    Ok(())
}
