use anyhow::Result;
use clap::Parser;
use std::time::Instant;

use remap_rust::io::seq;
use remap_rust::search::{self, naive};

#[derive(Parser, Debug)]
#[command(name = "naive_search", version, about = "Exact multi-threaded substring counting over the parsed reference")]
struct Args {
    /// Path to the reference FASTA/FASTQ file (.gz ok)
    #[arg(long)]
    reference: String,
    /// Path to the query FASTA/FASTQ file (.gz ok)
    #[arg(long)]
    query: String,
    /// Number of queries; if not enough, queries will be duplicated
    #[arg(long = "query_ct", default_value_t = 100)]
    query_ct: usize,
    /// Allowed substitutions. NOTE: naive_search supports exact match only; errors forced to 0
    #[arg(long, default_value_t = 0)]
    errors: u8,
    /// Number of worker threads (0 = use hardware parallelism)
    #[arg(long, default_value_t = 0)]
    threads: usize,
    /// Minimum number of queries per block (controls granularity)
    #[arg(long = "min_block", default_value_t = 256)]
    min_block: usize,
}

fn main() -> Result<()> {
    let mut args = Args::parse();

    // exact only
    args.errors = 0;

    let reference: Vec<Vec<u8>> = seq::load_reference(&args.reference)?
        .into_iter()
        .map(|r| r.seq)
        .collect();

    let mut queries = seq::load_queries(&args.query, args.query_ct)?;
    search::duplicate_queries(&mut queries, args.query_ct);

    let t0 = Instant::now();
    let (hits, used_threads) = naive::count_hits(&reference, &queries, args.threads, args.min_block)?;
    let search_s = t0.elapsed().as_secs_f64();

    eprintln!("Search time: {} seconds.", search_s);
    eprintln!(
        "queries={} errors={} threads={} hits={}",
        queries.len(),
        args.errors,
        used_threads,
        hits
    );
    Ok(())
}
