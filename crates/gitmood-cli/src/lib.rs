// Copyright (c) 2026 - present gitmood contributors
// SPDX-License-Identifier: MIT

//! gitmood-cli library
//!
//! This module exports the configuration and report building used by the
//! `gitmood` binary, for use in integration tests.

pub mod config;
pub mod report;
