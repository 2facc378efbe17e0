// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `cargo pspec`.
///
/// These follow the exit codes of the host test framework, so that wrapping a
/// test run in `cargo pspec` doesn't change how CI interprets its status.
///
/// Unknown/unexpected failures (panics) will always result in exit code 1.
pub enum PspecExitCode {}

impl PspecExitCode {
    /// All reported tests passed or were skipped.
    pub const OK: i32 = 0;

    /// One or more tests failed.
    pub const TESTS_FAILED: i32 = 1;

    /// An internal error happened while rendering the report.
    ///
    /// This includes description templates that reference undefined parameters,
    /// and event lines that could not be parsed.
    pub const INTERNAL_ERROR: i32 = 3;

    /// A user issue happened while setting up a `cargo pspec` invocation, for
    /// example an invalid config file or an unreadable input.
    pub const USAGE_ERROR: i32 = 4;

    /// The event stream finished without reporting any tests.
    pub const NO_TESTS_COLLECTED: i32 = 5;

    /// Writing data to stdout or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
