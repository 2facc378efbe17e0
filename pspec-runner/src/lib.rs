// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for [cargo pspec](https://crates.io/crates/cargo-pspec).
//!
//! The basic flow is:
//!
//! 1. Load a [`PspecConfig`](config::PspecConfig) from a config file, and
//!    resolve it into a [`ReportConfig`](config::ReportConfig).
//! 2. Read [`ReporterEvent`](reporter::ReporterEvent)s from the host's event
//!    stream with an [`EventReader`](input::EventReader).
//! 3. Feed each event to a [`Reporter`](reporter::Reporter), which renders
//!    the spec-style report.

pub mod config;
pub mod description;
pub mod errors;
pub mod identifier;
pub mod input;
pub mod reporter;
