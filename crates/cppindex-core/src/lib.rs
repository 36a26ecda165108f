// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Shared data model for the C++ structural code-indexing core.
//!
//! This crate owns the single output record (`ExtractedEntity`), the
//! per-run counters (`ExtractionStats`), and the error taxonomy. It has no
//! parsing or traversal logic of its own — those live in `cppindex-parse`
//! and `cppindex-engine`.

pub mod entity;
pub mod error;
pub mod stats;

pub use entity::{EntityType, ExtractedEntity};
pub use error::{CppIndexError, Result};
pub use stats::ExtractionStats;
