// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};

/// The syntactic kind of an extracted entity, inferred purely from the
/// node kind of the (post-template-unwrap) inner node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityType {
    Class,
    Struct,
    Function,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Struct => "Struct",
            Self::Function => "Function",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single canonical, deterministically-identified code entity.
///
/// See spec.md §3 for the field contract. Records are created once during
/// traversal, never mutated, and own no reference back into the syntax
/// tree or source bytes they were sliced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub global_uri: String,
    pub repo_name: String,
    pub file_path: String,
    pub entity_type: EntityType,
    pub entity_name: String,
    pub docstring: Option<String>,
    pub code_text: String,
    pub start_line: usize,
    pub end_line: usize,
    pub is_templated: bool,
}

impl ExtractedEntity {
    /// Join `(repo, file_path, entity_type, entity_name)` into the Global
    /// URI. Pure string concatenation — no escaping, per spec.md §4.6.
    #[must_use]
    pub fn assemble_uri(
        repo_name: &str,
        file_path: &str,
        entity_type: EntityType,
        entity_name: &str,
    ) -> String {
        format!("{repo_name}::{file_path}::{entity_type}::{entity_name}")
    }
}
