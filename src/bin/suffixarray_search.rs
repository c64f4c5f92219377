use anyhow::Result;
use clap::Parser;
use std::time::Instant;

use remap_rust::index::sa;
use remap_rust::io::seq;
use remap_rust::search::{self, locate};

#[derive(Parser, Debug)]
#[command(name = "suffixarray_search", version, about = "Exact search via binary search over a suffix array index")]
struct Args {
    /// Path to the reference FASTA/FASTQ file (.gz ok)
    #[arg(long)]
    reference: String,
    /// Path to the suffix array index (.bin)
    #[arg(long)]
    index: String,
    /// Path to the query FASTA/FASTQ file (.gz ok)
    #[arg(long)]
    query: String,
    /// Number of queries; if not enough queries, they will be duplicated
    #[arg(long = "query_ct", default_value_t = 100)]
    query_ct: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 拼接方式必须与 suffixarray_construct 完全一致
    let seqs: Vec<Vec<u8>> = seq::load_reference(&args.reference)?
        .into_iter()
        .map(|r| r.seq)
        .collect();
    let s = sa::concat_reference(&seqs);

    let sa_arr = sa::read_sa(&args.index)?;

    let mut queries = seq::load_queries(&args.query, args.query_ct)?;
    search::duplicate_queries(&mut queries, args.query_ct);

    let t0 = Instant::now();
    let hits = locate::count_hits(&s, &sa_arr, &queries);
    let search_s = t0.elapsed().as_secs_f64();

    eprintln!("Search time: {} seconds.", search_s);
    eprintln!("queries={} hits={}", queries.len(), hits);
    Ok(())
}
