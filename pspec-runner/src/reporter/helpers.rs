// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use owo_colors::Style;
use pspec_metadata::OutcomeKind;

#[derive(Debug, Default, Clone)]
pub(super) struct Styles {
    pub(super) header: Style,
    pub(super) count: Style,
    pub(super) pass: Style,
    pub(super) fail: Style,
    pub(super) skip: Style,
    pub(super) other: Style,
}

impl Styles {
    pub(super) fn colorize(&mut self) {
        self.header = Style::new().bold();
        self.count = Style::new().bold();
        self.pass = Style::new().green().bold();
        self.fail = Style::new().red().bold();
        self.skip = Style::new().yellow().bold();
        self.other = Style::new().magenta().bold();
    }

    pub(super) fn outcome(&self, outcome: &OutcomeKind) -> Style {
        match outcome {
            OutcomeKind::Passed => self.pass,
            OutcomeKind::Failed => self.fail,
            OutcomeKind::Skipped => self.skip,
            OutcomeKind::Other(_) => self.other,
        }
    }
}

/// Returns the indentation for `depth` levels of `width` spaces each.
pub(super) fn indent(depth: usize, width: usize) -> String {
    " ".repeat(depth * width)
}
