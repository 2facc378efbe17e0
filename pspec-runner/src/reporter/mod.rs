// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render the results of a test run as a spec-style report.
//!
//! The main type here is [`Reporter`], which is constructed via a
//! [`ReporterBuilder`].

mod classic;
mod displayer;
mod events;
mod helpers;
mod imp;
mod summary;

pub use events::*;
pub use imp::*;
pub use summary::RunStats;
