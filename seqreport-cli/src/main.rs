// Copyright (c) The seqreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line entry point: load a sequencer run, render it to Markdown,
//! and write the result into the site model.

use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::{eyre::WrapErr, Result};
use seqreport_core::report::{ReportPaths, SequencerReport};
use tracing_subscriber::filter::LevelFilter;

mod render;

/// Render a device certification report from sequencer run output.
#[derive(Debug, Parser)]
#[command(name = "seqreport", version)]
struct App {
    /// Path to the site model directory
    site_model: Utf8PathBuf,

    /// Device identifier within the site model
    device_id: String,

    /// Directory of reference sequences, one `<test>/sequence.md` per test
    #[arg(long, value_name = "DIR")]
    reference_root: Utf8PathBuf,

    /// Root of per-device recorded sequencer output trees
    /// [default: <SITE_MODEL>/out/devices]
    #[arg(long, value_name = "DIR")]
    results_root: Option<Utf8PathBuf>,

    /// Write the rendered report here instead of the default location
    #[arg(long, value_name = "PATH")]
    output: Option<Utf8PathBuf>,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let app = App::parse();

    let level = if app.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let results_root = app
        .results_root
        .unwrap_or_else(|| app.site_model.join("out").join("devices"));
    let paths = ReportPaths::new(
        app.site_model,
        results_root,
        app.reference_root,
        app.device_id,
    );

    let report = SequencerReport::load(&paths)?;
    let rendered = render::render_markdown(&report);

    let output = app.output.unwrap_or_else(|| paths.output_file());
    if let Some(parent) = output.parent() {
        fs_err::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create report directory `{parent}`"))?;
    }
    fs_err::write(&output, rendered)
        .wrap_err_with(|| format!("failed to write report to `{output}`"))?;
    println!("wrote {output}");

    Ok(())
}
