// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Spec-style test reports.
//!
//! `cargo pspec` reads the results of a test run as a stream of JSON events,
//! and renders them as an indented, annotated listing grouped by module and
//! class.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter, StderrStyles};
