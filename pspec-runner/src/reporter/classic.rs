// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The host's default progress output, used when pspec rendering is off.

use super::{events::ResultEvent, helpers::Styles};
use crate::{
    description::module_display_name,
    errors::WriteEventError,
    identifier::{SEGMENT_SEPARATOR, TestIdentifier},
};
use owo_colors::OwoColorize;
use pspec_metadata::OutcomeKind;
use std::{
    borrow::Cow,
    io::{self, Write},
};

pub(super) struct ClassicDisplayer {
    verbose: bool,
    module_suffix: String,
    open_module: Option<Option<String>>,
}

impl ClassicDisplayer {
    pub(super) fn new(verbose: bool, module_suffix: String) -> Self {
        Self {
            verbose,
            module_suffix,
            open_module: None,
        }
    }

    pub(super) fn write_test(
        &mut self,
        event: &ResultEvent,
        styles: &Styles,
        writer: &mut dyn Write,
    ) -> Result<(), WriteEventError> {
        let style = styles.outcome(&event.outcome);

        if self.verbose {
            let status = event.outcome.as_str().to_uppercase();
            return writeln!(
                writer,
                "{} {}",
                self.nodeid(&event.identifier),
                status.style(style)
            )
            .map_err(WriteEventError::Io);
        }

        let module = event
            .identifier
            .module()
            .map(|module| module_display_name(module.name(), &self.module_suffix).into_owned());
        if self.open_module.as_ref() != Some(&module) {
            if self.open_module.is_some() {
                writeln!(writer).map_err(WriteEventError::Io)?;
            }
            if let Some(module) = &module {
                write!(writer, "{module} ").map_err(WriteEventError::Io)?;
            }
            self.open_module = Some(module);
        }

        write!(writer, "{}", progress_char(&event.outcome).style(style))
            .map_err(WriteEventError::Io)
    }

    pub(super) fn finish(&mut self, writer: &mut dyn Write) -> io::Result<()> {
        if self.open_module.take().is_some() {
            writeln!(writer)?;
        }
        Ok(())
    }

    fn nodeid(&self, identifier: &TestIdentifier) -> String {
        let has_module = identifier.module().is_some();
        identifier
            .segments()
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                if index == 0 && has_module {
                    module_display_name(segment.name(), &self.module_suffix)
                } else {
                    Cow::Borrowed(segment.name())
                }
            })
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR)
    }
}

fn progress_char(outcome: &OutcomeKind) -> &'static str {
    match outcome {
        OutcomeKind::Passed => ".",
        OutcomeKind::Failed => "F",
        OutcomeKind::Skipped => "s",
        OutcomeKind::Other(other) => match other.as_str() {
            "xfailed" => "x",
            "xpassed" => "X",
            "error" => "E",
            _ => "?",
        },
    }
}
