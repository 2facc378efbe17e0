// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Structured access to the event streams consumed by `cargo pspec`.
//!
//! `cargo pspec` reads one JSON object per line. This crate contains the serde
//! definitions for both supported dialects, and the exit codes documented for
//! the binary.

mod events;
mod exit_codes;
mod libtest;

pub use events::*;
pub use exit_codes::*;
pub use libtest::*;
