// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for pspec reports.
//!
//! ## Config file location
//!
//! Unless a path is passed in with `--config-file` or `PSPEC_CONFIG_FILE`, the
//! first of these that exists in the working directory is used:
//!
//! - `pspec.toml`
//! - `.config/pspec.toml`
//!
//! Passing in `none` skips loading a config file.
//!
//! ## Configuration hierarchy
//!
//! Settings are resolved in the following order (highest priority first):
//!
//! 1. CLI arguments (e.g. `--plaintext`)
//! 2. Environment variables (e.g. `PSPEC_VERBOSE`)
//! 3. The `[pspec]` table of the config file
//! 4. Built-in defaults, embedded in the binary

mod imp;
mod symbols;

pub use imp::*;
pub use symbols::*;
