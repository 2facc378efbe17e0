// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The libtest JSON dialect.
//!
//! libtest prints these lines with `--format json`, which has required
//! `-Z unstable-options` since Rust 1.70. Only the fields pspec needs are
//! modeled; everything else is ignored.
//!
//! * `{ "type": "suite", "event": "started", "test_count": <u32> }`
//! * `{ "type": "test", "event": "started", "name": "<name>" }`
//! * `{ "type": "test", "name": "<name>", "event": "ok", "exec_time": <f32> }`
//! * `{ "type": "test", "name": "<name>", "event": "failed", "stdout": "<output>" }`
//! * `{ "type": "test", "name": "<name>", "event": "ignored", "message": "<reason>" }`
//! * `{ "type": "suite", "event": "ok" | "failed", "passed": <u32>, ... }`

use crate::OutcomeKind;
use serde::{Deserialize, Serialize};

/// A single line of libtest's JSON output.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LibtestLine {
    /// A suite-level event. These don't correspond to any test.
    Suite {
        /// The suite event, e.g. `started`, `ok` or `failed`.
        event: String,
    },

    /// A test-level event.
    Test {
        /// What happened to the test.
        event: LibtestTestEvent,

        /// The full path of the test, e.g. `module::tests::test_foo`.
        name: String,

        /// An optional message, e.g. the reason a test was ignored.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Benchmark results, and any other line kinds.
    #[serde(other)]
    Other,
}

/// A test-level libtest event.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LibtestTestEvent {
    /// The test started running.
    Started,

    /// The test passed.
    Ok,

    /// The test failed.
    Failed,

    /// The test was ignored.
    Ignored,

    /// The test is taking longer than expected.
    Timeout,

    /// Any other event.
    #[serde(other)]
    Other,
}

impl LibtestTestEvent {
    /// Returns the outcome for this event, or `None` if the event doesn't
    /// finish a test.
    pub fn outcome(self) -> Option<OutcomeKind> {
        match self {
            Self::Ok => Some(OutcomeKind::Passed),
            Self::Failed => Some(OutcomeKind::Failed),
            Self::Ignored => Some(OutcomeKind::Skipped),
            Self::Started | Self::Timeout | Self::Other => None,
        }
    }
}
