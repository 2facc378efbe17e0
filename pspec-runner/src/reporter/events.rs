// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    description::DescriptionSource,
    errors::IdentifierError,
    identifier::{Segment, TestIdentifier},
};
use pspec_metadata::{OutcomeKind, ResultEventSummary};

/// An event consumed by a [`Reporter`](super::Reporter).
#[derive(Clone, Debug, PartialEq)]
pub enum ReporterEvent {
    /// The host started a test run.
    RunStarted,

    /// A test finished.
    TestFinished(ResultEvent),

    /// The host finished the test run.
    RunFinished,
}

/// A single finished test.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultEvent {
    /// The structured path to the test.
    pub identifier: TestIdentifier,

    /// The outcome of the test.
    pub outcome: OutcomeKind,

    /// Where the test's description comes from.
    pub description: DescriptionSource,
}

impl ResultEvent {
    /// Creates a new result event with no declared description.
    pub fn new(identifier: TestIdentifier, outcome: OutcomeKind) -> Self {
        Self {
            identifier,
            outcome,
            description: DescriptionSource::None,
        }
    }

    /// Sets the source of this test's description.
    pub fn with_description(mut self, description: DescriptionSource) -> Self {
        self.description = description;
        self
    }

    /// Converts the serialized form of an event.
    ///
    /// A description template takes precedence over a declared description.
    pub fn from_summary(summary: ResultEventSummary) -> Result<Self, IdentifierError> {
        let identifier = match (summary.nodeid, summary.identifier) {
            (Some(nodeid), None) => TestIdentifier::parse_nodeid(&nodeid)?,
            (None, Some(segments)) => {
                TestIdentifier::new(segments.into_iter().map(Segment::from).collect())?
            }
            (None, None) => return Err(IdentifierError::Missing),
            (Some(_), Some(_)) => return Err(IdentifierError::Ambiguous),
        };

        let description = match (summary.description_template, summary.description) {
            (Some(template), _) => DescriptionSource::Template {
                template,
                parameters: summary.parameters,
            },
            (None, Some(description)) => DescriptionSource::Declared(description),
            (None, None) => DescriptionSource::None,
        };

        Ok(Self::new(identifier, summary.outcome).with_description(description))
    }
}
