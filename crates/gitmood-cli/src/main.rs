// Copyright (c) 2026 - present gitmood contributors
// SPDX-License-Identifier: MIT

//! gitmood: extract structured commit history from a git repository
//!
//! Prints the latest commits of a working tree as JSON, or as the text block
//! consumed by the sentiment engine.

use anyhow::Context;
use clap::Parser;
use gitmood_cli::config::Config;
use gitmood_cli::report::{build_report, render};
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    debug!(?config, "Starting gitmood");

    config.validate().context("Invalid configuration")?;

    let report = build_report(&config)?;
    let output = render(&report, config.format)?;
    println!("{output}");

    Ok(())
}
