//! Local two-stage driver for the indexing pipeline: run the document
//! extractor over a crawl dump (map), then group the posting stream by term
//! (reduce). Scheduling the stages across machines belongs to an external
//! execution engine; this driver runs the same contract in process.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use walkdir::WalkDir;
use webindex_core::{group_by_term, wire, Extractor};

/// One crawled document: the source URL and its raw markup.
#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub url: String,
    pub html: String,
}

/// Run summary written next to the grouped index.
#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: usize,
    pub num_postings: usize,
    pub num_terms: usize,
    pub created_at: String,
    pub version: u32,
}

#[derive(Debug, Default)]
pub struct MapStats {
    pub docs: usize,
    pub postings: usize,
}

/// Collect input files: the path itself, or every `.jsonl` under it.
pub fn collect_input_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("jsonl") {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

/// Map stage: extract postings from every document under `input`, one
/// encoded posting per output line. Documents are independent, so an
/// undecodable record is logged and skipped rather than stopping the run.
pub fn run_map(extractor: &Extractor, input: &Path, out: &mut impl Write) -> Result<MapStats> {
    let mut stats = MapStats::default();
    for file in collect_input_files(input) {
        let f = File::open(&file).with_context(|| format!("open {}", file.display()))?;
        for (lineno, line) in BufReader::new(f).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let doc: InputDoc = match serde_json::from_str(&line) {
                Ok(doc) => doc,
                Err(err) => {
                    tracing::warn!(
                        file = %file.display(),
                        line = lineno + 1,
                        %err,
                        "skipping undecodable document"
                    );
                    continue;
                }
            };
            let postings = extractor.extract(&doc.url, &doc.html);
            stats.docs += 1;
            stats.postings += postings.len();
            for p in &postings {
                writeln!(out, "{}", wire::encode(p))?;
            }
        }
    }
    Ok(stats)
}

/// Reduce stage: group the posting stream by term and write it back out
/// with each term's postings adjacent and terms in sorted order (the shape
/// a sorted shuffle hands a reducer). Returns the number of distinct terms.
pub fn run_reduce(input: impl BufRead, out: &mut impl Write) -> Result<usize> {
    let mut postings = Vec::new();
    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let p = wire::decode(&line).with_context(|| format!("posting line {}", lineno + 1))?;
        postings.push(p);
    }
    let mut groups = group_by_term(postings);
    groups.sort_by(|a, b| a.term.cmp(&b.term));
    let num_terms = groups.len();
    for group in groups {
        for p in group.postings {
            writeln!(out, "{}", wire::encode(&p))?;
        }
    }
    Ok(num_terms)
}

/// Both stages: write `postings.tsv`, `index.tsv`, and `meta.json` into
/// the output directory.
pub fn build(input: &Path, output: &Path) -> Result<MetaFile> {
    fs::create_dir_all(output).with_context(|| format!("create {}", output.display()))?;
    let postings_path = output.join("postings.tsv");
    let index_path = output.join("index.tsv");

    let extractor = Extractor::default();
    let mut map_out = BufWriter::new(File::create(&postings_path)?);
    let stats = run_map(&extractor, input, &mut map_out)?;
    map_out.flush()?;
    tracing::info!(docs = stats.docs, postings = stats.postings, "extraction complete");

    let reader = BufReader::new(File::open(&postings_path)?);
    let mut reduce_out = BufWriter::new(File::create(&index_path)?);
    let num_terms = run_reduce(reader, &mut reduce_out)?;
    reduce_out.flush()?;

    let meta = MetaFile {
        num_docs: stats.docs,
        num_postings: stats.postings,
        num_terms,
        created_at: OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
        version: 1,
    };
    fs::write(output.join("meta.json"), serde_json::to_string_pretty(&meta)?)?;
    tracing::info!(terms = num_terms, output = %output.display(), "index build complete");
    Ok(meta)
}
