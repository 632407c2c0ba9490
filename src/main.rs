use anyhow::{Context, Result};
use boundary_chunker::{
    collect_documents, content_hash, BoundaryClass, Chunker, ChunkerBuilder, ChunkerConfig,
    Document, SeparatorPolicy, SOURCE_KEY, STDIN_PATH,
};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boundary-chunker")]
#[command(about = "Split documents into overlapping, size-bounded chunks")]
#[command(version)]
struct Cli {
    /// Files or directories to chunk; `-` or nothing reads stdin
    inputs: Vec<PathBuf>,

    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target maximum chunk length in characters
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Characters shared between neighboring chunks (0 disables overlap)
    #[arg(long)]
    chunk_overlap: Option<usize>,

    /// Extra characters an overlap may grow to reach a boundary
    #[arg(long)]
    overlap_growth: Option<usize>,

    /// First-pass separator (escapes like \n are decoded)
    #[arg(long)]
    separator: Option<String>,

    /// Fallback separator, finest last; repeat to build the list
    #[arg(long = "fallback-separator")]
    fallback_separators: Vec<String>,

    /// Text placed around injected overlap
    #[arg(long)]
    overlap_separator: Option<String>,

    /// Re-append separators on recursive splits, matching older chunk output
    #[arg(long)]
    reappend_separators: bool,

    /// Treat any Unicode whitespace as an overlap boundary
    #[arg(long)]
    whitespace_boundaries: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Jsonl)]
    format: Format,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One JSON record per line
    Jsonl,
    /// A single JSON array
    Json,
    /// Chunk text separated by form feeds
    Text,
}

/// One emitted chunk
#[derive(Serialize)]
struct ChunkRecord<'a> {
    source: &'a str,
    index: usize,
    chars: usize,
    hash: String,
    text: &'a str,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let chunker = build_chunker(&cli)?;

    let inputs = if cli.inputs.is_empty() {
        vec![PathBuf::from(STDIN_PATH)]
    } else {
        cli.inputs.clone()
    };

    let start = Instant::now();
    let documents = collect_documents(&inputs)?;
    let chunks = chunker.split_documents(&documents);
    info!(
        documents = documents.len(),
        chunks = chunks.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "chunking complete"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_chunks(&mut out, &chunks, cli.format)?;
    out.flush().context("Failed to flush output")?;

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_chunker(cli: &Cli) -> Result<Chunker> {
    let config = match &cli.config {
        Some(path) => ChunkerConfig::load(path)?,
        None => ChunkerConfig::default(),
    };

    let mut builder = ChunkerBuilder::from_config(config);
    if let Some(size) = cli.chunk_size {
        builder = builder.chunk_size(size);
    }
    if let Some(overlap) = cli.chunk_overlap {
        builder = builder.chunk_overlap(overlap);
    }
    if let Some(growth) = cli.overlap_growth {
        builder = builder.overlap_growth(growth);
    }
    if let Some(separator) = &cli.separator {
        builder = builder.primary_separator(unescape(separator));
    }
    if !cli.fallback_separators.is_empty() {
        builder = builder.fallback_separators(cli.fallback_separators.iter().map(|s| unescape(s)));
    }
    if let Some(separator) = &cli.overlap_separator {
        builder = builder.overlap_separator(unescape(separator));
    }
    if cli.reappend_separators {
        builder = builder.separator_policy(SeparatorPolicy::Reappend);
    }
    if cli.whitespace_boundaries {
        builder = builder.boundaries(BoundaryClass::Whitespace);
    }

    builder.build().context("Invalid chunker configuration")
}

fn write_chunks<W: Write>(out: &mut W, chunks: &[Document], format: Format) -> Result<()> {
    let mut records = Vec::with_capacity(chunks.len());
    let mut current_source = None;
    let mut index = 0;

    for chunk in chunks {
        let source = chunk
            .metadata
            .get(SOURCE_KEY)
            .and_then(|v| v.as_str())
            .unwrap_or(STDIN_PATH);
        if current_source != Some(source) {
            current_source = Some(source);
            index = 0;
        }

        records.push(ChunkRecord {
            source,
            index,
            chars: chunk.content.chars().count(),
            hash: content_hash(&chunk.content),
            text: &chunk.content,
        });
        index += 1;
    }

    match format {
        Format::Jsonl => {
            for record in &records {
                serde_json::to_writer(&mut *out, record).context("Failed to write chunk")?;
                writeln!(out)?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &records).context("Failed to write chunks")?;
            writeln!(out)?;
        }
        Format::Text => {
            for (i, record) in records.iter().enumerate() {
                if i > 0 {
                    writeln!(out, "\u{c}")?;
                }
                writeln!(out, "{}", record.text)?;
            }
        }
    }

    Ok(())
}

/// Decode the backslash escapes people type for separators on a shell
fn unescape(raw: &str) -> String {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('r') => decoded.push('\r'),
            Some('t') => decoded.push('\t'),
            Some('\\') => decoded.push('\\'),
            Some(other) => {
                decoded.push('\\');
                decoded.push(other);
            }
            None => decoded.push('\\'),
        }
    }

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("\\n\\n"), "\n\n");
        assert_eq!(unescape("a\\tb"), "a\tb");
        assert_eq!(unescape("\\\\n"), "\\n");
        assert_eq!(unescape("::"), "::");
        assert_eq!(unescape("\\x"), "\\x");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "boundary-chunker",
            "--chunk-size",
            "50",
            "--chunk-overlap",
            "5",
            "--separator",
            "\\n",
            "--reappend-separators",
        ]);
        let chunker = build_chunker(&cli).unwrap();
        let config = chunker.config();
        assert_eq!(config.chunk_size, 50);
        assert_eq!(config.chunk_overlap, 5);
        assert_eq!(config.primary_separator, "\n");
        assert_eq!(config.separator_policy, SeparatorPolicy::Reappend);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let cli = Cli::parse_from(["boundary-chunker", "--chunk-size", "0"]);
        assert!(build_chunker(&cli).is_err());
    }

    #[test]
    fn test_jsonl_records_restart_index_per_source() {
        let chunks = vec![
            Document::new("one").with_metadata(SOURCE_KEY, "a.txt"),
            Document::new("two").with_metadata(SOURCE_KEY, "a.txt"),
            Document::new("three").with_metadata(SOURCE_KEY, "b.txt"),
        ];
        let mut out = Vec::new();
        write_chunks(&mut out, &chunks, Format::Jsonl).unwrap();

        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1]["index"], 1);
        assert_eq!(lines[2]["source"], "b.txt");
        assert_eq!(lines[2]["index"], 0);
        assert_eq!(lines[2]["chars"], 5);
        assert_eq!(lines[2]["hash"], content_hash("three"));
    }
}
