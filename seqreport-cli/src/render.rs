// Copyright (c) The seqreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Markdown rendering of a loaded sequencer report.

use chrono::{DateTime, Utc};
use seqreport_core::{
    helpers::{md_table_divider, pretty_map},
    outcome::Outcome,
    records::FeatureStage,
    report::SequencerReport,
};

/// Renders the whole report as a Markdown document.
pub fn render_markdown(report: &SequencerReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# Sequencer report for {}", report.device_id));
    lines.push(String::new());
    lines.push(format!("- Start: {}", timestamp(report.start_time)));
    lines.push(format!("- Updated: {}", timestamp(report.end_time)));
    lines.push(format!("- Status: {}", report.status_message));

    let hardware = &report.device.system.hardware;
    lines.push(format!(
        "- Hardware: {} {}",
        hardware.make.as_deref().unwrap_or("unknown"),
        hardware.model.as_deref().unwrap_or("unknown"),
    ));
    lines.push(format!(
        "- Software: {}",
        pretty_map(&report.device.system.software)
    ));
    if let Some(gateway_id) = report
        .device
        .gateway
        .as_ref()
        .and_then(|gateway| gateway.gateway_id.as_deref())
    {
        lines.push(format!("- Gateway: {gateway_id}"));
    }

    render_feature_scorecard(report, &mut lines);
    render_schema_tables(report, &mut lines);
    render_test_table(report, &mut lines);
    render_sequences(report, &mut lines);

    let mut document = lines.join("\n");
    document.push('\n');
    document
}

fn render_feature_scorecard(report: &SequencerReport, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push("## Feature scorecard".to_owned());
    lines.push(String::new());

    let mut header = vec!["Feature".to_owned()];
    header.extend(report.observed_stages.iter().map(ToString::to_string));
    header.push("Overall".to_owned());
    lines.push(table_row(&header));
    lines.push(md_table_divider(header.len()));

    for (feature, stages) in &report.features {
        let mut cells = vec![feature.clone()];
        cells.extend(report.observed_stages.iter().map(|stage| {
            stages.get(stage).map_or_else(
                || Outcome::Indeterminate.glyph().to_owned(),
                feature_stage_cell,
            )
        }));
        let overall = report
            .overall_features
            .get(feature)
            .copied()
            .unwrap_or(Outcome::Indeterminate);
        cells.push(overall.glyph().to_owned());
        lines.push(table_row(&cells));
    }
}

fn table_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// One scorecard cell: glyph plus earned/possible points, or the
/// indeterminate glyph when the feature was not exercised at this stage.
fn feature_stage_cell(bucket: &FeatureStage) -> String {
    if bucket.has() {
        format!(
            "{} {}/{}",
            Outcome::from(bucket.passed()).glyph(),
            bucket.scored,
            bucket.total
        )
    } else {
        Outcome::Indeterminate.glyph().to_owned()
    }
}

fn render_schema_tables(report: &SequencerReport, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push("## Schema validation".to_owned());
    lines.push(String::new());
    lines.push("| Schema | Result |".to_owned());
    lines.push(md_table_divider(2));
    for (schema, outcome) in &report.overall_schemas {
        lines.push(format!("| {schema} | {} |", outcome.glyph()));
    }

    lines.push(String::new());
    lines.push("| Stage | Result |".to_owned());
    lines.push(md_table_divider(2));
    for (stage, outcome) in &report.schema_stages {
        lines.push(format!("| {stage} | {} |", outcome.glyph()));
    }
}

fn render_test_table(report: &SequencerReport, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push("## Test results".to_owned());
    lines.push(String::new());
    lines.push("| Test | Feature | Stage | Score | Result | Message |".to_owned());
    lines.push(md_table_divider(6));
    for test in report.tests.values() {
        lines.push(format!(
            "| {} | {} | {} | {}/{} | {} | {} |",
            test.name,
            test.bucket,
            test.stage,
            test.score,
            test.total,
            test.passed().glyph(),
            test.message,
        ));
    }
}

fn render_sequences(report: &SequencerReport, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push("## Sequences".to_owned());
    for (name, rendered) in &report.sequences {
        lines.push(String::new());
        lines.push(format!("### {name}"));
        lines.push(String::new());
        if let Some(test) = report.tests.get(name) {
            if !test.description.is_empty() {
                lines.push(test.description.clone());
                lines.push(String::new());
            }
        }
        lines.push("```".to_owned());
        lines.push(rendered.trim_end().to_owned());
        lines.push("```".to_owned());
    }
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "unknown".to_owned(), |ts| ts.to_rfc3339())
}
