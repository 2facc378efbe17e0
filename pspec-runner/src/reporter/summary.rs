// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::helpers::Styles;
use owo_colors::OwoColorize;
use pspec_metadata::OutcomeKind;
use std::io::{self, Write};

/// Counts of reported tests, by outcome.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// The number of tests that passed.
    pub passed: usize,

    /// The number of tests that failed.
    pub failed: usize,

    /// The number of tests that were skipped.
    pub skipped: usize,

    /// The number of tests with any other outcome.
    pub other: usize,
}

impl RunStats {
    /// Returns the total number of tests reported.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.other
    }

    /// Returns true if any test failed.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub(super) fn record(&mut self, outcome: &OutcomeKind) {
        match outcome {
            OutcomeKind::Passed => self.passed += 1,
            OutcomeKind::Failed => self.failed += 1,
            OutcomeKind::Skipped => self.skipped += 1,
            OutcomeKind::Other(_) => self.other += 1,
        }
    }
}

/// Writes `2 passed, 1 failed`, omitting zero counts.
pub(super) fn write_summary(
    stats: &RunStats,
    styles: &Styles,
    writer: &mut dyn Write,
) -> io::Result<()> {
    if stats.total() == 0 {
        return writeln!(writer, "no tests reported");
    }

    let parts = [
        (stats.passed, "passed", styles.pass),
        (stats.failed, "failed", styles.fail),
        (stats.skipped, "skipped", styles.skip),
        (stats.other, "other", styles.other),
    ];

    let mut first = true;
    for (count, label, style) in parts {
        if count == 0 {
            continue;
        }
        if !first {
            write!(writer, ", ")?;
        }
        write!(writer, "{} {}", count.style(styles.count), label.style(style))?;
        first = false;
    }
    writeln!(writer)
}
