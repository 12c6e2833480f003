#![doc = include_str!("../README.md")]

use crate::args::Args;
use clap::Parser;
use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;
use std::process::ExitCode;
use tracing::{debug, trace, warn};
use wlisp_cli_common::init_logging;
use wlispc::{WlispC, SOURCE_EXTENSION};

mod args;
mod input;

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();
    let ansi = args.color().apply();
    init_logging(args.logging().log_level_filter(), ansi)?;
    trace!("starting wlispc with args: {args:?}");
    debug!("wlispc version: {}", env!("CARGO_PKG_VERSION"));

    let to_compile = match input::sources(&args.input) {
        Ok(sources) => sources,
        Err(e) => {
            report_error(e);
            return Ok(ExitCode::FAILURE);
        }
    };
    if to_compile.is_empty() {
        warn!("no .{SOURCE_EXTENSION} files found in {:?}", args.input);
        return Ok(ExitCode::SUCCESS);
    }
    debug!("paths to compile: {to_compile:#?}");

    let mut builder = WlispC::builder()
        .source_root(&args.input)
        .failure_policy(args.failure_policy());
    if let Some(jobs) = args.jobs {
        builder = builder.jobs(jobs.get());
    }
    if let Some(output_directory) = &args.output_directory {
        builder = builder.output_directory(output_directory);
    }
    let wlispc = builder.build()?;

    let report = wlispc.compile_all(to_compile).await;
    for compiled in report.compiled() {
        println!("{}", compiled.source().display());
    }
    for failure in report.failures() {
        report_error(failure);
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Prints a diagnostic to stderr
fn report_error(error: impl Display) {
    eprintln!(
        "{}",
        error.if_supports_color(Stream::Stderr, |text| text.bright_red())
    );
}
