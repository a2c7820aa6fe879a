// Copyright (c) The seqreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end report construction against an on-disk fixture tree.

use camino::Utf8Path;
use camino_tempfile::{tempdir, Utf8TempDir};
use indoc::indoc;
use seqreport_core::{
    errors::ReportError,
    outcome::Outcome,
    records::Stage,
    report::{ReportPaths, SequencerReport},
};

const DEVICE_ID: &str = "AHU-1";

const RESULTS_JSON: &str = indoc! {r#"
    {
      "start_time": "2025-11-03T10:00:00Z",
      "status": { "timestamp": "2025-11-03T10:20:00Z", "message": "sequencer complete" },
      "features": {
        "system": {
          "sequences": {
            "system_last_update": {
              "summary": "Config last_update is reflected in state",
              "result": "fail",
              "stage": "stable",
              "status": { "message": "timeout waiting for state\nupdate not received" },
              "scoring": { "value": 0, "total": 5 }
            }
          }
        },
        "pointset": {
          "sequences": {
            "pointset_publish": {
              "summary": "Device publishes pointset events",
              "result": "pass",
              "stage": "beta",
              "scoring": { "value": 5, "total": 5 }
            }
          }
        }
      },
      "schemas": {
        "state": {
          "sequences": {
            "pointset_publish": { "stage": "beta", "result": "pass" }
          }
        }
      }
    }
"#};

const METADATA_JSON: &str = indoc! {r#"
    {
      "system": {
        "hardware": { "make": "ACME", "model": "AHU-1000" },
        "software": { "firmware": "v1.2" }
      },
      "gateway": { "gateway_id": "GAT-99" }
    }
"#};

fn write_sequence(root: &Utf8Path, test: &str, contents: &str) {
    let dir = root.join(test);
    std::fs::create_dir_all(&dir).expect("create sequence dir");
    std::fs::write(dir.join("sequence.md"), contents).expect("write sequence");
}

/// Builds the full fixture tree: site model, recorded logs, references.
fn fixture() -> (Utf8TempDir, ReportPaths) {
    let dir = tempdir().expect("tempdir");
    let site_model = dir.path().join("site");
    let results_root = site_model.join("out").join("devices");
    let reference_root = dir.path().join("sequences");

    let out = site_model.join("out");
    std::fs::create_dir_all(&out).expect("create out dir");
    std::fs::write(out.join(format!("sequencer_{DEVICE_ID}.json")), RESULTS_JSON)
        .expect("write results");

    let device_dir = site_model.join("devices").join(DEVICE_ID);
    std::fs::create_dir_all(&device_dir).expect("create device dir");
    std::fs::write(device_dir.join("metadata.json"), METADATA_JSON).expect("write metadata");

    let tests_root = results_root.join(DEVICE_ID).join("tests");
    write_sequence(
        &tests_root,
        "pointset_publish",
        "1. Subscribe to events\n1. Publish pointset event\n",
    );
    write_sequence(
        &tests_root,
        "system_last_update",
        "1. Update config\n1. Wait for state update\n1. Test failed: timeout\n",
    );
    write_sequence(
        &reference_root,
        "pointset_publish",
        "1. Subscribe to events\n1. Publish pointset event\n",
    );
    write_sequence(
        &reference_root,
        "system_last_update",
        "1. Update config\n1. Wait for state update\n1. Verify last_update matches\n",
    );

    let paths = ReportPaths::new(site_model, results_root, reference_root, DEVICE_ID);
    (dir, paths)
}

#[test]
fn loads_complete_report() {
    let (_dir, paths) = fixture();
    let report = SequencerReport::load(&paths).expect("report loads");

    assert_eq!(report.device_id, DEVICE_ID);
    assert_eq!(report.status_message, "sequencer complete");
    assert!(report.start_time.is_some());
    assert!(report.end_time.is_some());

    // Ordering contract: tests by (feature, name), features by name.
    let test_names: Vec<&str> = report.tests.keys().map(String::as_str).collect();
    assert_eq!(test_names, vec!["pointset_publish", "system_last_update"]);
    let feature_names: Vec<&str> = report.features.keys().map(String::as_str).collect();
    assert_eq!(feature_names, vec!["pointset", "system"]);

    // Every sequence key has a test record.
    for name in report.sequences.keys() {
        assert!(report.tests.contains_key(name), "orphan sequence `{name}`");
    }

    // Multi-line status message collapsed for single-line display.
    assert_eq!(
        report.tests["system_last_update"].message,
        "timeout waiting for state; update not received"
    );

    assert_eq!(report.overall_features["pointset"], Outcome::Pass);
    assert_eq!(report.overall_features["system"], Outcome::Fail);
    assert_eq!(report.observed_stages, vec![Stage::Stable, Stage::Beta]);

    assert_eq!(report.schema_results.len(), 1);
    assert_eq!(report.schema_results[0].schema, "state");
    assert_eq!(report.schema_results[0].test, "pointset_publish");
    assert_eq!(report.schema_results[0].passed(), Outcome::Pass);
    assert_eq!(report.overall_schemas["state"], Outcome::Pass);
    assert_eq!(report.overall_schemas["event_system"], Outcome::Indeterminate);

    assert_eq!(report.device.system.hardware.make.as_deref(), Some("ACME"));
    assert_eq!(
        report.device.gateway.as_ref().and_then(|g| g.gateway_id.as_deref()),
        Some("GAT-99")
    );
}

#[test]
fn failed_test_sequence_is_annotated() {
    let (_dir, paths) = fixture();
    let report = SequencerReport::load(&paths).expect("report loads");

    // The harness failure marker is dropped, so the recorded log has two
    // real steps and the second is the failure point.
    let rendered = &report.sequences["system_last_update"];
    assert!(rendered.contains("✓ 1. Update config"));
    assert!(rendered.contains("✕ 2. Wait for state update ✕"));
    assert!(rendered.contains("3. Verify last_update matches"));
    assert!(!rendered.contains("Test failed"));

    // A passing test renders with no failure block.
    let rendered = &report.sequences["pointset_publish"];
    assert!(rendered.contains("✓ 1. Subscribe to events"));
    assert!(rendered.contains("✓ 2. Publish pointset event"));
    assert!(!rendered.contains('✕'));
}

#[test]
fn missing_reference_degrades_to_placeholder() {
    let (dir, paths) = fixture();
    let reference_dir = dir.path().join("sequences").join("system_last_update");
    std::fs::remove_dir_all(reference_dir).expect("remove reference");

    // An unparsable recorded log degrades to an empty sequence, putting the
    // failure point at the first reference step, which here is the synthetic
    // missing-reference placeholder.
    let log = dir
        .path()
        .join("site/out/devices")
        .join(DEVICE_ID)
        .join("tests/system_last_update/sequence.md");
    std::fs::write(log, "free-form notes, no numbered steps\n").expect("rewrite log");

    let report = SequencerReport::load(&paths).expect("report still loads");
    let rendered = &report.sequences["system_last_update"];
    assert!(
        rendered.contains("✕ 1. Missing input file ✕"),
        "got:\n{rendered}"
    );
}

#[test]
fn missing_actual_log_is_fatal_and_names_the_path() {
    let (dir, paths) = fixture();
    let log = dir
        .path()
        .join("site/out/devices")
        .join(DEVICE_ID)
        .join("tests/pointset_publish/sequence.md");
    std::fs::remove_file(&log).expect("remove recorded log");

    let error = SequencerReport::load(&paths).expect_err("report must fail");
    match &error {
        ReportError::ActualSequenceRead { path, .. } => assert_eq!(path, &log),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(error.to_string().contains(log.as_str()));
}

#[test]
fn missing_results_file_is_fatal() {
    let (dir, paths) = fixture();
    std::fs::remove_file(paths.results_file()).expect("remove results");
    drop(dir);

    let error = SequencerReport::load(&paths).expect_err("report must fail");
    assert!(matches!(error, ReportError::ResultsRead { .. }));
}

#[test]
fn missing_metadata_is_fatal() {
    let (_dir, paths) = fixture();
    std::fs::remove_file(paths.metadata_file()).expect("remove metadata");

    let error = SequencerReport::load(&paths).expect_err("report must fail");
    assert!(matches!(error, ReportError::MetadataRead { .. }));
}
