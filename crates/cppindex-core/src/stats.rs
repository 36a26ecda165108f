// SPDX-FileCopyrightText: 2025 Knitli Inc. <knitli@knit.li>
// SPDX-FileContributor: Adam Poulemanos <adam@knit.li>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};

/// Per-run counters. Monotonic; never reset mid-run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub entities_extracted: usize,
    pub parse_errors: usize,
}

impl ExtractionStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files_processed: 0,
            files_failed: 0,
            entities_extracted: 0,
            parse_errors: 0,
        }
    }

    /// Fold another run's counters into this one.
    pub fn merge(&mut self, other: &Self) {
        self.files_processed += other.files_processed;
        self.files_failed += other.files_failed;
        self.entities_extracted += other.entities_extracted;
        self.parse_errors += other.parse_errors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_additive() {
        let mut total = ExtractionStats::new();
        total.merge(&ExtractionStats {
            files_processed: 1,
            files_failed: 0,
            entities_extracted: 3,
            parse_errors: 0,
        });
        total.merge(&ExtractionStats {
            files_processed: 1,
            files_failed: 1,
            entities_extracted: 2,
            parse_errors: 1,
        });
        assert_eq!(
            total,
            ExtractionStats {
                files_processed: 2,
                files_failed: 1,
                entities_extracted: 5,
                parse_errors: 1,
            }
        );
    }
}
