// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured test identifiers.
//!
//! A [`TestIdentifier`] is an ordered, non-empty list of [`Segment`]s: zero or
//! more scope segments (module, classes, nested modules) followed by the leaf
//! test name.

use crate::errors::IdentifierError;
use pspec_metadata::SegmentSummary;
use std::fmt;

/// The separator between segments in host node ids and Rust test paths.
pub const SEGMENT_SEPARATOR: &str = "::";

/// One segment of a [`TestIdentifier`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    name: String,
    description: Option<String>,
}

impl Segment {
    /// Creates a new segment without a description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Attaches the description declared on this segment's container.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the raw name of this segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description declared on this segment, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl From<SegmentSummary> for Segment {
    fn from(summary: SegmentSummary) -> Self {
        match summary {
            SegmentSummary::Name(name) => Self::new(name),
            SegmentSummary::Described { name, description } => Self { name, description },
        }
    }
}

/// The structured path to a single test.
///
/// Invariant: there is always at least one segment, and no segment name is
/// empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestIdentifier {
    segments: Vec<Segment>,
}

impl TestIdentifier {
    /// Creates a new identifier from a list of segments.
    pub fn new(segments: Vec<Segment>) -> Result<Self, IdentifierError> {
        if segments.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if let Some(index) = segments.iter().position(|s| s.name.is_empty()) {
            return Err(IdentifierError::EmptySegment {
                identifier: join_names(&segments),
                index,
            });
        }
        Ok(Self { segments })
    }

    /// Parses a host node id such as `tests/test_mod.py::TestFoo::test_bar[1-2]`.
    ///
    /// The parameter id in brackets stays attached to the leaf, even if it
    /// contains `::`.
    pub fn parse_nodeid(nodeid: &str) -> Result<Self, IdentifierError> {
        let (path, params) = match nodeid.find('[') {
            Some(index) => nodeid.split_at(index),
            None => (nodeid, ""),
        };

        let mut segments: Vec<_> = path.split(SEGMENT_SEPARATOR).map(Segment::new).collect();
        if let Some(leaf) = segments.last_mut() {
            leaf.name.push_str(params);
        }
        Self::new(segments)
    }

    /// Parses a libtest test path such as `module::tests::test_foo`.
    pub fn parse_rust_path(name: &str) -> Result<Self, IdentifierError> {
        Self::new(name.split(SEGMENT_SEPARATOR).map(Segment::new).collect())
    }

    /// Returns all segments, including the leaf.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the scope segments: everything but the leaf.
    pub fn scope(&self) -> &[Segment] {
        &self.segments[..self.segments.len() - 1]
    }

    /// Returns the leaf segment.
    pub fn leaf(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    /// Returns the module segment, which is the first scope segment.
    ///
    /// Identifiers with a single segment have no module.
    pub fn module(&self) -> Option<&Segment> {
        self.scope().first()
    }
}

impl fmt::Display for TestIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_names(&self.segments))
    }
}

fn join_names(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
}
