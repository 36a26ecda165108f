// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Extension-based C++ source detection, shared by `cppindex-parse` (to
//! reject non-C++ input early) and `cppindex-fs` (to decide which files
//! to discover).

use std::path::Path;

/// Extensions recognized as C++ source or header files (spec.md §4.5).
pub const CPP_EXTENSIONS: &[&str] = &["cpp", "cc", "cxx", "h", "hpp", "hxx"];

/// True iff `path`'s extension is one of `CPP_EXTENSIONS` (case-sensitive,
/// matching the literal set in spec.md).
#[must_use]
pub fn is_cpp_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CPP_EXTENSIONS.contains(&ext))
}
