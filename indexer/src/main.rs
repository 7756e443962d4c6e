use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use webindex_core::Extractor;
use webindex_indexer::{build, run_map, run_reduce};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an inverted index from crawled HTML documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract postings from crawled documents (map stage)
    Map {
        /// Input JSONL file or directory
        #[arg(long)]
        input: PathBuf,
        /// Output posting-stream file
        #[arg(long)]
        output: PathBuf,
    },
    /// Group a posting stream by term (reduce stage)
    Reduce {
        /// Input posting-stream file
        #[arg(long)]
        input: PathBuf,
        /// Output grouped-index file
        #[arg(long)]
        output: PathBuf,
    },
    /// Run both stages and write the index directory
    Build {
        /// Input JSONL file or directory
        #[arg(long)]
        input: PathBuf,
        /// Output index directory
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Map { input, output } => {
            let extractor = Extractor::default();
            let mut out = BufWriter::new(File::create(&output)?);
            let stats = run_map(&extractor, &input, &mut out)?;
            out.flush()?;
            tracing::info!(docs = stats.docs, postings = stats.postings, "map stage complete");
        }
        Commands::Reduce { input, output } => {
            let reader = BufReader::new(File::open(&input)?);
            let mut out = BufWriter::new(File::create(&output)?);
            let terms = run_reduce(reader, &mut out)?;
            out.flush()?;
            tracing::info!(terms, "reduce stage complete");
        }
        Commands::Build { input, output } => {
            build(&input, &output)?;
        }
    }
    Ok(())
}
