// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints out test results.
//!
//! The main structure in this module is [`Reporter`].

use super::{
    classic::ClassicDisplayer,
    displayer::SpecDisplayer,
    events::{ReporterEvent, ResultEvent},
    helpers::Styles,
    summary::{RunStats, write_summary},
};
use crate::{
    config::{GlyphMode, ReportConfig},
    errors::WriteEventError,
};
use std::io::{self, BufWriter, Write};
use tracing::debug;

/// Output destination for the reporter.
///
/// This is usually a terminal, but can be an in-memory buffer for tests.
pub enum ReporterOutput<'a> {
    /// Produce output on standard output.
    Terminal,

    /// Write output to a buffer.
    Buffer(&'a mut Vec<u8>),
}

/// Reporter builder.
#[derive(Debug, Default)]
pub struct ReporterBuilder {
    pspec: bool,
    verbose: bool,
    should_colorize: bool,
}

impl ReporterBuilder {
    /// Enables spec-style output.
    ///
    /// Without this, the host's classic progress output is produced.
    pub fn set_pspec(&mut self, pspec: bool) -> &mut Self {
        self.pspec = pspec;
        self
    }

    /// Sets verbose output, which selects expanded mode.
    pub fn set_verbose(&mut self, verbose: bool) -> &mut Self {
        self.verbose = verbose;
        self
    }

    /// Set to true if the reporter should colorize output.
    pub fn set_colorize(&mut self, should_colorize: bool) -> &mut Self {
        self.should_colorize = should_colorize;
        self
    }

    /// Creates a new reporter.
    pub fn build<'a>(&self, config: &ReportConfig, output: ReporterOutput<'a>) -> Reporter<'a> {
        let mut styles = Styles::default();
        if self.should_colorize {
            styles.colorize();
        }

        let displayer = if self.pspec {
            let mode = if self.verbose {
                GlyphMode::Expanded
            } else {
                GlyphMode::Compact
            };
            Displayer::Spec(SpecDisplayer::new(mode, config.clone()))
        } else {
            Displayer::Classic(ClassicDisplayer::new(
                self.verbose,
                config.module_suffix.clone(),
            ))
        };

        Reporter {
            displayer,
            styles,
            output,
            stats: RunStats::default(),
        }
    }
}

enum Displayer {
    Spec(SpecDisplayer),
    Classic(ClassicDisplayer),
}

impl Displayer {
    fn write_test(
        &mut self,
        event: &ResultEvent,
        styles: &Styles,
        writer: &mut dyn Write,
    ) -> Result<(), WriteEventError> {
        match self {
            Self::Spec(displayer) => displayer.write_test(event, styles, writer),
            Self::Classic(displayer) => displayer.write_test(event, styles, writer),
        }
    }

    fn finish(&mut self, writer: &mut dyn Write) -> io::Result<()> {
        match self {
            Self::Spec(displayer) => displayer.finish(writer),
            Self::Classic(displayer) => displayer.finish(writer),
        }
    }
}

/// Renders reporter events for a single run.
pub struct Reporter<'a> {
    displayer: Displayer,
    styles: Styles,
    output: ReporterOutput<'a>,
    stats: RunStats,
}

impl Reporter<'_> {
    /// Reports an event.
    ///
    /// Output is flushed after each event. If an error is returned, everything
    /// reported before it has already been written.
    pub fn report_event(&mut self, event: &ReporterEvent) -> Result<(), WriteEventError> {
        match event {
            ReporterEvent::RunStarted => {
                debug!("reporter: run started");
                Ok(())
            }
            ReporterEvent::TestFinished(event) => {
                let Self {
                    displayer,
                    styles,
                    output,
                    ..
                } = &mut *self;
                with_writer(output, |writer| displayer.write_test(event, styles, writer))?;
                self.stats.record(&event.outcome);
                Ok(())
            }
            ReporterEvent::RunFinished => {
                debug!("reporter: run finished");
                Ok(())
            }
        }
    }

    /// Returns the counts of tests reported so far.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Terminates any open line and writes the run summary.
    pub fn finish(&mut self) -> Result<RunStats, WriteEventError> {
        let Self {
            displayer,
            styles,
            output,
            stats,
        } = &mut *self;
        with_writer(output, |writer| {
            displayer.finish(writer)?;
            writeln!(writer)?;
            write_summary(stats, styles, writer)
        })
        .map_err(WriteEventError::Io)?;
        Ok(*stats)
    }
}

fn with_writer<T, E: From<io::Error>>(
    output: &mut ReporterOutput<'_>,
    f: impl FnOnce(&mut dyn Write) -> Result<T, E>,
) -> Result<T, E> {
    match output {
        ReporterOutput::Terminal => write_and_flush(&mut BufWriter::new(io::stdout().lock()), f),
        ReporterOutput::Buffer(buf) => f(*buf),
    }
}

// Whatever was written before an error is still flushed. An error from `f`
// takes precedence over a flush error.
fn write_and_flush<W: Write, T, E: From<io::Error>>(
    writer: &mut W,
    f: impl FnOnce(&mut dyn Write) -> Result<T, E>,
) -> Result<T, E> {
    let ret = f(&mut *writer);
    let flushed = writer.flush();
    let value = ret?;
    flushed?;
    Ok(value)
}
