use anyhow::Result;
use clap::Parser;
use std::time::Instant;

use remap_rust::index::fm::FMIndex;
use remap_rust::io::seq;
use remap_rust::search::{self, approx};

#[derive(Parser, Debug)]
#[command(name = "fmindex_search", version, about = "Approximate search over a serialized FM-index (Hamming errors only)")]
struct Args {
    /// Path to the serialized FM-index (.bin)
    #[arg(long)]
    index: String,
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

    let mut queries = seq::load_queries(&args.query, args.query_ct)?;
    search::duplicate_queries(&mut queries, args.query_ct);

    let fm = FMIndex::load_from_file(&args.index)
        .map_err(|e| anyhow::anyhow!("error while loading index '{}': {}", args.index, e))?;

    let t0 = Instant::now();
    let hits = approx::count_hits(&fm, &queries, args.errors as u32);
    let search_s = t0.elapsed().as_secs_f64();

    eprintln!("Search time: {} seconds.", search_s);
    eprintln!("queries={} errors={} hits={}", queries.len(), args.errors, hits);
    Ok(())
}
