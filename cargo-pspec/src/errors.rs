// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use camino::Utf8PathBuf;
use owo_colors::OwoColorize;
use pspec_metadata::PspecExitCode;
use pspec_runner::errors::{ConfigParseError, EventReadError, WriteEventError};
use std::error::Error;
use thiserror::Error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// The #[error()] strings are placeholders. Errors are printed with
// display_to_stderr, which colorizes them.

/// An error that cargo-pspec knows how to report.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("could not determine current directory")]
    GetCurrentDirFailed { err: std::io::Error },
    #[error("current directory is not valid UTF-8")]
    CurrentDirInvalidUtf8 { path: std::path::PathBuf },
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("failed to open input")]
    InputOpenFailed {
        path: Utf8PathBuf,
        err: std::io::Error,
    },
    #[error("event read error")]
    EventReadError {
        #[from]
        err: EventReadError,
    },
    #[error("write event error")]
    WriteEventError {
        #[from]
        err: WriteEventError,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::GetCurrentDirFailed { .. }
            | Self::CurrentDirInvalidUtf8 { .. }
            | Self::ConfigParseError { .. }
            | Self::InputOpenFailed { .. }
            | Self::EventReadError {
                err: EventReadError::Io { .. },
            } => PspecExitCode::USAGE_ERROR,
            Self::EventReadError { .. } => PspecExitCode::INTERNAL_ERROR,
            Self::WriteEventError {
                err: WriteEventError::Io(_),
            } => PspecExitCode::WRITE_OUTPUT_ERROR,
            Self::WriteEventError { .. } => PspecExitCode::INTERNAL_ERROR,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::GetCurrentDirFailed { err } => {
                tracing::error!("could not determine current directory");
                Some(err as &dyn Error)
            }
            Self::CurrentDirInvalidUtf8 { path } => {
                tracing::error!(
                    "current directory `{}` is not valid UTF-8",
                    path.display().style(styles.bold)
                );
                None
            }
            Self::ConfigParseError { err } => {
                tracing::error!(
                    "failed to load pspec config at `{}`",
                    err.config_file().style(styles.bold)
                );
                Some(err.kind() as &dyn Error)
            }
            Self::InputOpenFailed { path, err } => {
                tracing::error!("failed to open input `{}`", path.style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::EventReadError { err } => {
                tracing::error!("{err}");
                err.source()
            }
            Self::WriteEventError { err } => match err {
                WriteEventError::Description { test, err } => {
                    tracing::error!(
                        "failed to resolve description for `{}`",
                        test.style(styles.bold)
                    );
                    Some(err as &dyn Error)
                }
                other => {
                    tracing::error!("{other}");
                    other.source()
                }
            },
        };

        while let Some(err) = next_error {
            tracing::error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
