// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

/// Errors that escape the core's local-recovery policy.
///
/// `PartialParse` and dropped-entity outcomes are intentionally absent —
/// they are implicit, counter-only outcomes (see `ExtractionStats`), never
/// surfaced as `Err`.
#[derive(Error, Debug)]
pub enum CppIndexError {
    #[error("file not found: {0}")]
    FileNotFound(std::path::PathBuf),

    #[error("failed to read {path}: {source}")]
    ReadError {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CppIndexError>;
