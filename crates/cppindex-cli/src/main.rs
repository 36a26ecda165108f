// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Thin pipeline-driver entry point. Owns argument parsing and JSONL
//! serialization only; all extraction logic lives in `cppindex-fs` and
//! `cppindex-engine`. Not an RPC surface.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cppindex_engine::ExtractionConfig;
use cppindex_fs::{StderrReporter, Verbosity};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cppindex", about = "Structural C++ code-indexing core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract entities from a single file and print them as JSONL.
    File {
        path: PathBuf,
        #[arg(long)]
        repo: String,
        #[arg(long = "repo-root")]
        repo_root: Option<PathBuf>,
        #[arg(long = "extract-linkage-declarations")]
        extract_linkage_declarations: bool,
    },
    /// Recursively extract entities under a directory and print them
    /// as JSONL, followed by an `ExtractionStats` summary on stderr.
    Dir {
        root: PathBuf,
        #[arg(long)]
        repo: String,
        #[arg(long = "repo-root")]
        repo_root: Option<PathBuf>,
        #[arg(long = "stop-on-error")]
        stop_on_error: bool,
        #[arg(long = "extract-linkage-declarations")]
        extract_linkage_declarations: bool,
        #[arg(long, value_enum, default_value = "silent")]
        verbosity: VerbosityArg,
    },
}

#[derive(Clone, clap::ValueEnum)]
enum VerbosityArg {
    Silent,
    Summary,
    PerFile,
}

impl From<VerbosityArg> for Verbosity {
    fn from(value: VerbosityArg) -> Self {
        match value {
            VerbosityArg::Silent => Self::Silent,
            VerbosityArg::Summary => Self::Summary,
            VerbosityArg::PerFile => Self::PerFile,
        }
    }
}

fn print_jsonl(entities: &[cppindex_core::ExtractedEntity]) -> Result<()> {
    use std::io::Write as _;
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    for entity in entities {
        serde_json::to_writer(&mut lock, entity).context("serializing entity record")?;
        writeln!(lock).context("writing record separator")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::File {
            path,
            repo,
            repo_root,
            extract_linkage_declarations,
        } => {
            let config = ExtractionConfig {
                extract_linkage_declarations,
            };
            let entities =
                cppindex_fs::extract_file(&path, &repo, repo_root.as_deref(), &config)
                    .with_context(|| format!("extracting {}", path.display()))?;
            print_jsonl(&entities)?;
        }
        Command::Dir {
            root,
            repo,
            repo_root,
            stop_on_error,
            extract_linkage_declarations,
            verbosity,
        } => {
            let config = ExtractionConfig {
                extract_linkage_declarations,
            };
            let reporter = StderrReporter(verbosity.into());
            let (entities, stats) = cppindex_fs::extract_directory(
                &root,
                &repo,
                repo_root.as_deref(),
                !stop_on_error,
                &config,
                &reporter,
            )
            .with_context(|| format!("extracting directory {}", root.display()))?;
            print_jsonl(&entities)?;
            eprintln!(
                "{}",
                serde_json::to_string(&stats).context("serializing extraction stats")?
            );
        }
    }
    Ok(())
}
