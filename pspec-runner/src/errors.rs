// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by pspec.

use camino::Utf8PathBuf;
use std::{fmt, io};
use thiserror::Error;

/// An error that occurred while loading the pspec config file.
#[derive(Debug, Error)]
#[error("failed to load pspec config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8PathBuf {
        &self.config_file
    }

    /// Returns the kind of error that occurred.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of error that occurred while loading the pspec config file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// The config file was explicitly requested but doesn't exist.
    #[error("config file not found")]
    NotFound,

    /// The config file could not be read.
    #[error("error reading config file")]
    Read(#[source] io::Error),

    /// The config file is not valid TOML, or has a value of the wrong type.
    #[error("error parsing config file")]
    Parse(#[source] toml::de::Error),
}

/// An error that occurred while resolving the description of a test.
///
/// These errors are caused by the test itself, and are fatal to the run.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DescriptionError {
    /// The description template referenced a parameter the test wasn't invoked
    /// with.
    #[error("description template `{template}` references undefined parameter `{key}`")]
    MissingParameter {
        /// The template that failed to substitute.
        template: String,

        /// The name of the missing parameter.
        key: String,
    },

    /// The description template couldn't be parsed.
    #[error("description template `{template}` is malformed at byte {position}: {reason}")]
    MalformedTemplate {
        /// The template that failed to parse.
        template: String,

        /// The byte offset at which the problem was detected.
        position: usize,

        /// A description of the problem.
        reason: &'static str,
    },
}

/// An error that occurred while building a test identifier.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdentifierError {
    /// The identifier had no segments.
    #[error("test identifier is empty")]
    Empty,

    /// One of the segments was empty.
    #[error("test identifier `{identifier}` has an empty segment at index {index}")]
    EmptySegment {
        /// The identifier, joined with `::`.
        identifier: String,

        /// The index of the empty segment.
        index: usize,
    },

    /// A result event had neither a node id nor a structured identifier.
    #[error("result event has neither `nodeid` nor `identifier`")]
    Missing,

    /// A result event had both a node id and a structured identifier.
    #[error("result event has both `nodeid` and `identifier`")]
    Ambiguous,
}

/// An error that occurred while reading an event stream.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EventReadError {
    /// Reading from the underlying stream failed.
    #[error("error reading events at line {line_number}")]
    Io {
        /// The 1-based line number at which the error occurred.
        line_number: usize,

        /// The underlying error.
        #[source]
        err: io::Error,
    },

    /// A line was not valid JSON for the selected dialect.
    #[error("error parsing event at line {line_number}")]
    Parse {
        /// The 1-based line number of the bad line.
        line_number: usize,

        /// The underlying error.
        #[source]
        err: serde_json::Error,
    },

    /// A result event had an invalid identifier.
    #[error("invalid test identifier at line {line_number}")]
    Identifier {
        /// The 1-based line number of the bad line.
        line_number: usize,

        /// The underlying error.
        #[source]
        err: IdentifierError,
    },
}

/// An error that occurs while reporting an event.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteEventError {
    /// An error occurred while writing the event to the provided output.
    #[error("error writing to output")]
    Io(#[from] io::Error),

    /// The description of a test couldn't be resolved.
    #[error("error resolving description for `{test}`")]
    Description {
        /// The test whose description failed, as a node id.
        test: String,

        /// The underlying error.
        #[source]
        err: DescriptionError,
    },
}

/// Displays an error and its source chain on one line, separated by `: `.
#[derive(Debug)]
pub struct DisplayErrorChain<E>(E);

impl<E: std::error::Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain`.
    pub fn new(error: E) -> Self {
        Self(error)
    }
}

impl<E: std::error::Error> fmt::Display for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut next = self.0.source();
        while let Some(err) = next {
            write!(f, ": {err}")?;
            next = err.source();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_error_chain() {
        let err = WriteEventError::Description {
            test: "test_mod.py::test_a".to_owned(),
            err: DescriptionError::MissingParameter {
                template: "adds {x}".to_owned(),
                key: "x".to_owned(),
            },
        };
        assert_eq!(
            DisplayErrorChain::new(&err).to_string(),
            "error resolving description for `test_mod.py::test_a`: \
             description template `adds {x}` references undefined parameter `x`",
        );
    }
}
