// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// A single line of the native pspec event stream.
///
/// Lines are tagged by their `type` field:
///
/// ```json
/// {"type": "run-started"}
/// {"type": "result", "nodeid": "test_mod.py::TestFoo::test_bar", "outcome": "passed"}
/// {"type": "run-finished"}
/// ```
///
/// Lines with an unrecognized `type` deserialize to [`ResultLine::Unknown`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ResultLine {
    /// The host started a test run.
    RunStarted,

    /// A test finished.
    Result(ResultEventSummary),

    /// The host finished the test run.
    RunFinished,

    /// An event type this version doesn't know about.
    #[serde(other)]
    Unknown,
}

/// The serialized form of a finished test, as reported by the host.
///
/// Exactly one of `nodeid` and `identifier` is expected to be present.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ResultEventSummary {
    /// The host's node id, for example `tests/test_mod.py::TestFoo::test_bar`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodeid: Option<String>,

    /// The structured path to the test: scope segments followed by the leaf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<SegmentSummary>>,

    /// The outcome of the test.
    pub outcome: OutcomeKind,

    /// The declared description of the test, for example its docstring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// A description template with `{name}` placeholders, not yet substituted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_template: Option<String>,

    /// The parameters the test was invoked with, used to substitute
    /// `description_template`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, serde_json::Value>,
}

/// One segment of a structured test identifier.
///
/// A segment is either a plain string, or an object carrying the container's
/// own description:
///
/// ```json
/// ["test_mod", {"name": "TestFoo", "description": "A foo"}, "test_bar"]
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SegmentSummary {
    /// A bare segment name.
    Name(String),

    /// A segment with an optional description.
    Described {
        /// The name of the segment.
        name: String,

        /// The description declared on the container, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl SegmentSummary {
    /// Returns the name of this segment.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Described { name, .. } => name,
        }
    }

    /// Returns the description of this segment, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Described { description, .. } => description.as_deref(),
        }
    }
}

/// The terminal status of a single test.
///
/// Outcomes other than `passed`, `failed` and `skipped` are preserved as
/// [`OutcomeKind::Other`] rather than rejected.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum OutcomeKind {
    /// The test passed.
    Passed,

    /// The test failed.
    Failed,

    /// The test was skipped.
    Skipped,

    /// An outcome kind this crate doesn't know about, such as `xfailed`.
    Other(String),
}

impl OutcomeKind {
    /// Returns the string form of this outcome.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Other(other) => other,
        }
    }

    /// Returns true if this is one of the three known outcome kinds.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for OutcomeKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "passed" => Self::Passed,
            "failed" => Self::Failed,
            "skipped" => Self::Skipped,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for OutcomeKind {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

impl From<OutcomeKind> for String {
    fn from(outcome: OutcomeKind) -> Self {
        match outcome {
            OutcomeKind::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "proptest1")]
mod proptest_impls {
    use super::*;
    use proptest::prelude::*;

    impl Arbitrary for OutcomeKind {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            prop_oneof![
                Just(OutcomeKind::Passed),
                Just(OutcomeKind::Failed),
                Just(OutcomeKind::Skipped),
                "[a-z]{1,10}".prop_map(OutcomeKind::from),
            ]
            .boxed()
        }
    }
}
