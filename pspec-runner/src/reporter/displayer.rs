// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The spec-style displayer.
//!
//! In compact mode, tests are grouped by module onto a single line:
//!
//! ```text
//! test_mod.py ✓✓✗
//! ```
//!
//! In expanded mode, each scope gets a header, and each test gets its own line:
//!
//! ```text
//! test_mod.py
//!   Foo bar
//!     ✓ does a thing
//!     ✗ does another thing
//! ```

use super::{
    events::ResultEvent,
    helpers::{Styles, indent},
};
use crate::{
    config::{GlyphMode, ReportConfig},
    description::{first_line, module_display_name, scope_header},
    errors::WriteEventError,
    identifier::Segment,
};
use owo_colors::OwoColorize;
use std::io::{self, Write};

pub(super) struct SpecDisplayer {
    mode: GlyphMode,
    config: ReportConfig,
    state: DisplayState,
}

enum DisplayState {
    Compact {
        // None if no line is open. An open line for tests without a module
        // holds Some(None).
        open_module: Option<Option<String>>,
    },
    Expanded {
        // None until the first test is displayed.
        current_scope: Option<Vec<String>>,
    },
}

impl SpecDisplayer {
    pub(super) fn new(mode: GlyphMode, config: ReportConfig) -> Self {
        let state = match mode {
            GlyphMode::Compact => DisplayState::Compact { open_module: None },
            GlyphMode::Expanded => DisplayState::Expanded {
                current_scope: None,
            },
        };
        Self {
            mode,
            config,
            state,
        }
    }

    pub(super) fn write_test(
        &mut self,
        event: &ResultEvent,
        styles: &Styles,
        writer: &mut dyn Write,
    ) -> Result<(), WriteEventError> {
        // Resolve the description before writing anything, so that a failure
        // doesn't leave a partial header behind.
        let description = event
            .description
            .resolve(event.identifier.leaf().name(), &self.config.strip_prefixes)
            .map_err(|err| WriteEventError::Description {
                test: event.identifier.to_string(),
                err,
            })?;

        let glyph = self.config.symbols.symbol(&event.outcome, self.mode);
        let glyph_style = styles.outcome(&event.outcome);

        match &mut self.state {
            DisplayState::Compact { open_module } => {
                let module = event
                    .identifier
                    .module()
                    .map(|module| module_display_name(module.name(), &self.config.module_suffix));

                let same_line = matches!(
                    open_module,
                    Some(open) if open.as_deref() == module.as_deref()
                );
                if !same_line {
                    if open_module.is_some() {
                        writeln!(writer).map_err(WriteEventError::Io)?;
                    }
                    if let Some(module) = &module {
                        write!(writer, "{} ", module.style(styles.header))
                            .map_err(WriteEventError::Io)?;
                    }
                    *open_module = Some(module.map(|module| module.into_owned()));
                }

                write!(writer, "{}", glyph.style(glyph_style)).map_err(WriteEventError::Io)
            }
            DisplayState::Expanded { current_scope } => {
                let headers = scope_headers(event.identifier.scope(), &self.config.module_suffix);
                let width = self.config.indent_width;

                if current_scope.as_ref() != Some(&headers) {
                    let first_changed = match current_scope {
                        Some(previous) => {
                            writeln!(writer).map_err(WriteEventError::Io)?;
                            previous
                                .iter()
                                .zip(&headers)
                                .take_while(|(a, b)| a == b)
                                .count()
                        }
                        None => 0,
                    };

                    for (depth, header) in headers.iter().enumerate().skip(first_changed) {
                        writeln!(
                            writer,
                            "{}{}",
                            indent(depth, width),
                            header.style(styles.header)
                        )
                        .map_err(WriteEventError::Io)?;
                    }
                }

                writeln!(
                    writer,
                    "{}{} {}",
                    indent(headers.len(), width),
                    glyph.style(glyph_style),
                    description,
                )
                .map_err(WriteEventError::Io)?;

                *current_scope = Some(headers);
                Ok(())
            }
        }
    }

    pub(super) fn finish(&mut self, writer: &mut dyn Write) -> io::Result<()> {
        if let DisplayState::Compact { open_module } = &mut self.state {
            if open_module.take().is_some() {
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}

fn scope_headers(scope: &[Segment], module_suffix: &str) -> Vec<String> {
    scope
        .iter()
        .enumerate()
        .map(|(depth, segment)| {
            if let Some(description) = segment.description().and_then(first_line) {
                description.to_owned()
            } else if depth == 0 {
                module_display_name(segment.name(), module_suffix).into_owned()
            } else {
                scope_header(segment.name())
            }
        })
        .collect()
}
