// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading events from a host's JSON lines stream.

use crate::{
    errors::EventReadError,
    identifier::TestIdentifier,
    reporter::{ReporterEvent, ResultEvent},
};
use pspec_metadata::{LibtestLine, ResultLine};
use std::{fmt, io::BufRead};
use tracing::debug;

/// The dialect of an event stream.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// pspec's native format, with one tagged object per line.
    #[default]
    Pspec,

    /// The JSON output of libtest's `--format json`.
    Libtest,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pspec => write!(f, "pspec"),
            Self::Libtest => write!(f, "libtest"),
        }
    }
}

/// Reads [`ReporterEvent`]s from a JSON lines stream.
///
/// Blank lines, and lines that don't correspond to a reporter event, are
/// skipped.
#[derive(Debug)]
pub struct EventReader<R> {
    reader: R,
    format: InputFormat,
    line_number: usize,
    buf: String,
}

impl<R: BufRead> EventReader<R> {
    /// Creates a new reader for the given dialect.
    pub fn new(reader: R, format: InputFormat) -> Self {
        Self {
            reader,
            format,
            line_number: 0,
            buf: String::new(),
        }
    }

    fn read_event(&mut self) -> Result<Option<ReporterEvent>, EventReadError> {
        loop {
            self.buf.clear();
            let bytes_read =
                self.reader
                    .read_line(&mut self.buf)
                    .map_err(|err| EventReadError::Io {
                        line_number: self.line_number + 1,
                        err,
                    })?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }

            let event = match self.format {
                InputFormat::Pspec => self.parse_pspec(line)?,
                InputFormat::Libtest => self.parse_libtest(line)?,
            };
            if let Some(event) = event {
                return Ok(Some(event));
            }
        }
    }

    fn parse_pspec(&self, line: &str) -> Result<Option<ReporterEvent>, EventReadError> {
        let line_number = self.line_number;
        let parsed: ResultLine = serde_json::from_str(line)
            .map_err(|err| EventReadError::Parse { line_number, err })?;

        match parsed {
            ResultLine::RunStarted => Ok(Some(ReporterEvent::RunStarted)),
            ResultLine::RunFinished => Ok(Some(ReporterEvent::RunFinished)),
            ResultLine::Result(summary) => {
                let event = ResultEvent::from_summary(summary)
                    .map_err(|err| EventReadError::Identifier { line_number, err })?;
                Ok(Some(ReporterEvent::TestFinished(event)))
            }
            ResultLine::Unknown => {
                debug!("input: skipping unknown event type at line {line_number}");
                Ok(None)
            }
        }
    }

    fn parse_libtest(&self, line: &str) -> Result<Option<ReporterEvent>, EventReadError> {
        let line_number = self.line_number;
        let parsed: LibtestLine = serde_json::from_str(line)
            .map_err(|err| EventReadError::Parse { line_number, err })?;

        match parsed {
            LibtestLine::Suite { event } => {
                debug!("input: skipping libtest suite `{event}` event at line {line_number}");
                Ok(None)
            }
            LibtestLine::Test { event, name, .. } => match event.outcome() {
                Some(outcome) => {
                    let identifier = TestIdentifier::parse_rust_path(&name)
                        .map_err(|err| EventReadError::Identifier { line_number, err })?;
                    Ok(Some(ReporterEvent::TestFinished(ResultEvent::new(
                        identifier, outcome,
                    ))))
                }
                None => Ok(None),
            },
            LibtestLine::Other => {
                debug!("input: skipping libtest line at line {line_number}");
                Ok(None)
            }
        }
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<ReporterEvent, EventReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_event().transpose()
    }
}
