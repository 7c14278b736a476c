//! CLI entry point for kvparse
//!
//! Provides commands for parsing and checking files, an interactive
//! single-line loop, writing the sample fixture and watching a file.

use clap::{Parser, Subcommand};
use colored::*;
use kvparse::{
    core::KvParser,
    loader::{load_file_with, write_sample, FileWatcher},
    report::{describe_line, render_json, TextReport},
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kvparse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and print records, comments, invalid lines and errors
    Parse {
        /// Path to the key/value file
        file: PathBuf,

        /// Print the result as JSON instead of a coloured report
        #[arg(long)]
        json: bool,
    },

    /// Exit with status 1 if the file has any diagnostics
    Check {
        /// Path to the key/value file
        file: PathBuf,
    },

    /// Parse lines typed on stdin, one at a time
    Repl,

    /// Write a sample file exercising every parsing rule
    Sample {
        /// Destination path (overwritten)
        #[arg(default_value = "test_config.kv")]
        file: PathBuf,
    },

    /// Re-parse a file every time it changes
    Watch {
        /// Path to the key/value file
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Log to stderr so reports on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kvparse=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let parser = KvParser::new();

    match cli.command {
        Commands::Parse { file, json } => parse_file(&parser, &expand_path(&file)?, json)?,
        Commands::Check { file } => check_file(&parser, &expand_path(&file)?)?,
        Commands::Repl => repl(&parser)?,
        Commands::Sample { file } => {
            let path = expand_path(&file)?;
            write_sample(&path)?;
            println!("{} Sample written to {}", "✓".green(), path.display());
        }
        Commands::Watch { file } => watch_file(&parser, &expand_path(&file)?)?,
    }

    Ok(())
}

/// Expand a leading tilde in a user-supplied path
fn expand_path(path: &Path) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::tilde(
        path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Parse a file and print the full report
fn parse_file(parser: &KvParser, path: &Path, json: bool) -> anyhow::Result<()> {
    let result = load_file_with(parser, path);

    if json {
        println!("{}", render_json(&result)?);
    } else {
        println!("{} Parsing: {}", "→".cyan(), path.display());
        print!("{}", TextReport::new(&result, parser.syntax()));
    }

    Ok(())
}

/// Print diagnostics only, failing the process if there are any
fn check_file(parser: &KvParser, path: &Path) -> anyhow::Result<()> {
    let result = load_file_with(parser, path);

    if !result.has_errors() {
        println!(
            "{} {} ({} records, {} lines)",
            "✓".green().bold(),
            "No problems found".bold(),
            result.records.len(),
            result.line_count()
        );
        return Ok(());
    }

    println!(
        "{} Found {} problem{} in {}:\n",
        "✗".red().bold(),
        result.errors.len(),
        if result.errors.len() == 1 { "" } else { "s" },
        path.display()
    );
    for error in &result.errors {
        println!("  {}", error);
    }
    std::process::exit(1);
}

/// Interactive loop: every input line is parsed as its own buffer
fn repl(parser: &KvParser) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} ", "line ('quit' to exit) >".bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().eq_ignore_ascii_case("quit") {
            break;
        }

        let result = parser.parse_content(&line);
        println!("{}", describe_line(&result));
    }

    Ok(())
}

/// Print a report now and again after every modification
fn watch_file(parser: &KvParser, path: &Path) -> anyhow::Result<()> {
    let watcher = FileWatcher::new(path)?;

    loop {
        let result = load_file_with(parser, path);
        println!("{} Parsing: {}", "→".cyan(), path.display());
        print!("{}", TextReport::new(&result, parser.syntax()));
        println!("\n{}", "Waiting for changes (Ctrl+C to stop)".dimmed());

        watcher.wait_for_change()?;
    }
}
