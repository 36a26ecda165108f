// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! C++ file discovery (spec.md §4.5): a fixed extension allowlist and
//! a fixed directory exclusion set, not `.gitignore`-driven.

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Directory names never descended into.
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "build",
    "cmake-build-debug",
    "cmake-build-release",
    "node_modules",
    ".vscode",
    ".idea",
    "__pycache__",
];

fn is_excluded_dir_name(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|s| EXCLUDED_DIRS.contains(&s))
}

/// Recursively discover C++ source/header files under `root`, skipping
/// excluded directory names entirely (they are never descended into,
/// not merely filtered after the fact). Does not honor `.gitignore` —
/// the exclusion set is a fixed list, not a VCS concern.
pub fn discover_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.filter_entry(|entry| match entry.file_type() {
        Some(ft) if ft.is_dir() => !is_excluded_dir_name(entry.file_name()),
        _ => true,
    });

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if is_file && cppindex_parse::is_cpp_source(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(files)
}

/// `path` relative to `repo_root`, with components joined by `/`
/// regardless of host path-separator conventions (spec.md §3:
/// `file_path` uses forward slashes).
#[must_use]
pub fn relative_slash_path(repo_root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(repo_root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn discovers_only_cpp_extensions_and_skips_excluded_dirs() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.cpp"), "").unwrap();
        fs::write(root.join("b.rs"), "").unwrap();
        fs::create_dir(root.join("build")).unwrap();
        fs::write(root.join("build").join("c.cpp"), "").unwrap();
        fs::create_dir(root.join("src")).unwrap();
        fs::write(root.join("src").join("d.hpp"), "").unwrap();

        let mut found = discover_files(root)
            .unwrap()
            .into_iter()
            .map(|p| relative_slash_path(root, &p))
            .collect::<Vec<_>>();
        found.sort();
        assert_eq!(found, vec!["a.cpp".to_string(), "src/d.hpp".to_string()]);
    }

    #[test]
    fn relative_path_uses_forward_slashes() {
        let root = Path::new("/repo");
        let path = Path::new("/repo/src/nested/file.cpp");
        assert_eq!(relative_slash_path(root, path), "src/nested/file.cpp");
    }
}
