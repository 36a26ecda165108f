// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Progress and failure reporting for the directory walker.
//!
//! The granularity knob here mirrors the corpus's own trace-level
//! pattern: a single ordered enum gates how much gets written to
//! `stderr`, rather than a separate logging framework. Stats
//! accumulation happens in the caller after the parallel phase, so
//! reporting here is plain sequential I/O — no shared writer lock is
//! needed.

use cppindex_core::CppIndexError;

/// How much progress output a `Reporter` should produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No per-file output at all.
    #[default]
    Silent,
    /// Report failures only.
    Summary,
    /// Report every file parsed or failed.
    PerFile,
}

/// Callback surface invoked once per discovered file during
/// `extract_directory`.
pub trait Reporter {
    fn on_file_parsed(&self, file_path: &str, entity_count: usize);
    fn on_file_failed(&self, file_path: &str, error: &CppIndexError);
}

/// Default `Reporter` that writes to `stderr`, gated by `Verbosity`.
pub struct StderrReporter(pub Verbosity);

impl Reporter for StderrReporter {
    fn on_file_parsed(&self, file_path: &str, entity_count: usize) {
        if self.0 >= Verbosity::PerFile {
            eprintln!("parsed {file_path}: {entity_count} entities");
        }
    }

    fn on_file_failed(&self, file_path: &str, error: &CppIndexError) {
        if self.0 >= Verbosity::Summary {
            eprintln!("failed {file_path}: {error}");
        }
    }
}
