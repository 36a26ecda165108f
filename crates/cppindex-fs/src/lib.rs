// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory discovery and orchestration (spec.md §4.5): the three
//! surface operations consumed by a pipeline driver —
//! [`extract_file`], [`extract_directory`], and
//! [`extract_to_dict_list`].
//!
//! Parallelism is coarse-grained and lives entirely here: one `rayon`
//! task per discovered file, each with its own `CppParser` (tree-sitter
//! parsers are not `Sync`). Results are sorted by repo-relative path
//! after the parallel phase, so `ExtractionStats` accumulation and
//! ordering are both single-threaded and trivially deterministic.

pub mod discovery;
pub mod reporter;

pub use discovery::{discover_files, relative_slash_path, EXCLUDED_DIRS};
pub use reporter::{Reporter, StderrReporter, Verbosity};

use cppindex_core::{CppIndexError, ExtractedEntity, ExtractionStats};
use cppindex_engine::ExtractionConfig;
use cppindex_parse::CppParser;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Extract every entity in a single file.
///
/// `repo_root` defaults to `path`'s parent directory when unspecified.
/// Fails fast on a non-C++ extension or an empty `repo_name`; parse
/// (syntax) errors are tolerated and simply reduce the entities found,
/// they never turn this into an `Err`.
pub fn extract_file(
    path: &Path,
    repo_name: &str,
    repo_root: Option<&Path>,
    config: &ExtractionConfig,
) -> Result<Vec<ExtractedEntity>, CppIndexError> {
    if repo_name.is_empty() {
        return Err(CppIndexError::InvalidInput(
            "repo_name must not be empty".to_string(),
        ));
    }
    if !cppindex_parse::is_cpp_source(path) {
        return Err(CppIndexError::InvalidInput(format!(
            "not a recognized C++ source/header extension: {}",
            path.display()
        )));
    }
    let default_root = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let root = repo_root.unwrap_or(&default_root);
    let file_path = relative_slash_path(root, path);

    let mut parser = CppParser::new();
    let (tree, source) = parser.parse_file(path)?;
    let mut stats = ExtractionStats::new();
    Ok(cppindex_engine::extract_entities(
        &tree, &source, repo_name, &file_path, config, &mut stats,
    ))
}

/// Recursively extract every entity under `root`.
///
/// Files are discovered with the fixed extension/exclusion rules of
/// [`discover_files`], extracted in parallel (one `rayon` task and one
/// `CppParser` per file), then merged back in repo-relative-path
/// order so runs over an unchanged tree are byte-identical. When a
/// file fails to read, it is counted in `files_failed` and, if
/// `continue_on_error` is `false`, the whole call fails.
pub fn extract_directory(
    root: &Path,
    repo_name: &str,
    repo_root: Option<&Path>,
    continue_on_error: bool,
    config: &ExtractionConfig,
    reporter: &dyn Reporter,
) -> anyhow::Result<(Vec<ExtractedEntity>, ExtractionStats)> {
    if repo_name.is_empty() {
        return Err(CppIndexError::InvalidInput("repo_name must not be empty".to_string()).into());
    }
    let repo_root = repo_root
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    let paths = discover_files(root)?;

    let mut per_file: Vec<(
        String,
        Result<(Vec<ExtractedEntity>, ExtractionStats), CppIndexError>,
    )> = paths
        .into_par_iter()
        .map_init(CppParser::new, |parser, path: PathBuf| {
            let rel = relative_slash_path(&repo_root, &path);
            let outcome = parser.parse_file(&path).map(|(tree, source)| {
                let mut file_stats = ExtractionStats::new();
                let entities = cppindex_engine::extract_entities(
                    &tree, &source, repo_name, &rel, config, &mut file_stats,
                );
                (entities, file_stats)
            });
            (rel, outcome)
        })
        .collect();
    per_file.sort_by(|a, b| a.0.cmp(&b.0));

    let mut stats = ExtractionStats::new();
    let mut entities = Vec::new();
    for (rel, outcome) in per_file {
        match outcome {
            Ok((file_entities, file_stats)) => {
                stats.files_processed += 1;
                stats.entities_extracted += file_stats.entities_extracted;
                stats.parse_errors += file_stats.parse_errors;
                reporter.on_file_parsed(&rel, file_entities.len());
                entities.extend(file_entities);
            }
            Err(err) => {
                stats.files_failed += 1;
                reporter.on_file_failed(&rel, &err);
                if !continue_on_error {
                    return Err(err.into());
                }
            }
        }
    }
    Ok((entities, stats))
}

/// Convert entities to a uniform key/value form for downstream
/// consumers that want records without the `ExtractedEntity` type
/// itself (e.g. a JSONL sink). Field names match spec.md §3 verbatim,
/// since `ExtractedEntity`'s `Serialize` derive already uses them.
pub fn extract_to_dict_list(
    entities: &[ExtractedEntity],
) -> Result<Vec<serde_json::Value>, CppIndexError> {
    entities
        .iter()
        .map(|entity| serde_json::to_value(entity).map_err(CppIndexError::from))
        .collect()
}
