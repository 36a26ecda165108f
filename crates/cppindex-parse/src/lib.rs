// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! C++ parsing layer: a thin, reusable wrapper around `tree-sitter` with
//! the `tree-sitter-cpp` grammar.
//!
//! The wrapper never fails on ill-formed input — tree-sitter always
//! returns a tree, marking unparsable regions with error nodes rather
//! than aborting (spec.md §4.1). Only I/O failures surface as `Err`.

pub mod detection;

pub use detection::{CPP_EXTENSIONS, is_cpp_source};

use cppindex_core::CppIndexError;
use std::path::Path;
use tree_sitter::{Parser, Tree};

/// A reusable C++ parser. Not `Sync` — `tree_sitter::Parser` is not
/// thread-safe, so callers running extraction across files in parallel
/// should construct one `CppParser` per worker (spec.md §4.1, §5).
pub struct CppParser {
    inner: Parser,
}

impl CppParser {
    /// # Panics
    ///
    /// Panics only if the vendored `tree-sitter-cpp` grammar is
    /// incompatible with the linked `tree-sitter` ABI version — a build
    /// configuration error, not a runtime condition callers can recover
    /// from.
    #[must_use]
    pub fn new() -> Self {
        let mut inner = Parser::new();
        inner
            .set_language(&tree_sitter_cpp::LANGUAGE.into())
            .expect("tree-sitter-cpp grammar is incompatible with the linked tree-sitter ABI");
        Self { inner }
    }

    /// Parse raw bytes into a syntax tree. Never fails on ill-formed
    /// input; error regions are marked in the returned tree rather than
    /// raised as an error.
    #[must_use]
    pub fn parse_bytes(&mut self, source: &[u8]) -> Tree {
        self.inner
            .parse(source, None)
            .expect("parse() only returns None when cancelled via a timeout/cancellation flag, neither of which this wrapper sets")
    }

    /// Read `path` in binary mode and parse it. Fails only with
    /// `FileNotFound`/`ReadError`; syntax errors never fail this call.
    pub fn parse_file(&mut self, path: &Path) -> Result<(Tree, Vec<u8>), CppIndexError> {
        let source = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CppIndexError::FileNotFound(path.to_path_buf())
            } else {
                CppIndexError::ReadError {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let tree = self.parse_bytes(&source);
        Ok((tree, source))
    }
}

impl Default for CppParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bytes_never_fails_on_malformed_input() {
        let mut parser = CppParser::new();
        let tree = parser.parse_bytes(b"class { this is not valid c++ at all +++ ");
        // tree-sitter always hands back a root node; malformed regions are
        // marked with error nodes rather than rejected outright.
        assert_eq!(tree.root_node().kind(), "translation_unit");
    }

    #[test]
    fn parse_bytes_on_well_formed_input_has_no_errors() {
        let mut parser = CppParser::new();
        let tree = parser.parse_bytes(b"void foo() {}");
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn parse_file_reports_file_not_found() {
        let mut parser = CppParser::new();
        let err = parser
            .parse_file(Path::new("/does/not/exist/at/all.cpp"))
            .unwrap_err();
        assert!(matches!(err, CppIndexError::FileNotFound(_)));
    }
}
