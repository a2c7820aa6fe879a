// Copyright (c) The seqreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The aggregate report object and its construction from a run's files.

use crate::{
    aggregate::{aggregate_features, aggregate_schemas},
    align::SequenceAligner,
    errors::ReportError,
    outcome::Outcome,
    records::{FeatureStage, SchemaResult, Stage, TestResult},
    results::{DeviceMetadata, RawResults},
};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::debug;

/// File locations for one device's run, derived from the fixed site-model
/// layout.
#[derive(Clone, Debug)]
pub struct ReportPaths {
    site_model: Utf8PathBuf,
    results_root: Utf8PathBuf,
    reference_root: Utf8PathBuf,
    device_id: String,
}

impl ReportPaths {
    /// Creates the path layout for `device_id`.
    pub fn new(
        site_model: Utf8PathBuf,
        results_root: Utf8PathBuf,
        reference_root: Utf8PathBuf,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            site_model,
            results_root,
            reference_root,
            device_id: device_id.into(),
        }
    }

    /// The device this layout is for.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// `<site_model>/out/sequencer_<device_id>.json`.
    pub fn results_file(&self) -> Utf8PathBuf {
        self.site_model
            .join("out")
            .join(format!("sequencer_{}.json", self.device_id))
    }

    /// `<site_model>/devices/<device_id>/metadata.json`.
    pub fn metadata_file(&self) -> Utf8PathBuf {
        self.site_model
            .join("devices")
            .join(&self.device_id)
            .join("metadata.json")
    }

    /// `<results_root>/<device_id>/tests`, holding one
    /// `<test>/sequence.md` per executed test.
    pub fn actual_sequences_dir(&self) -> Utf8PathBuf {
        self.results_root.join(&self.device_id).join("tests")
    }

    /// The directory of reference sequences, one `<test>/sequence.md` each.
    pub fn reference_root(&self) -> &Utf8Path {
        &self.reference_root
    }

    /// `<site_model>/out/devices/<device_id>/results.md`, where the rendered
    /// report belongs.
    pub fn output_file(&self) -> Utf8PathBuf {
        self.site_model
            .join("out")
            .join("devices")
            .join(&self.device_id)
            .join("results.md")
    }
}

/// The fully loaded, render-ready report for one device's run.
///
/// Built once by [`SequencerReport::load`] and read-only afterwards. Every
/// key in `sequences` also exists in `tests`, and `observed_stages` holds
/// exactly the stages at which some feature was exercised.
#[derive(Clone, Debug)]
pub struct SequencerReport {
    /// The device this run certified.
    pub device_id: String,
    /// When the run started.
    pub start_time: Option<DateTime<Utc>>,
    /// When the run status was last updated.
    pub end_time: Option<DateTime<Utc>>,
    /// Final run status message.
    pub status_message: String,
    /// Test name to result, ordered by `(feature, test name)`.
    pub tests: IndexMap<String, TestResult>,
    /// Feature to per-stage scoring buckets, ordered by feature name.
    pub features: IndexMap<String, IndexMap<Stage, FeatureStage>>,
    /// Overall pass/fail per feature, from pass-determining stages only.
    pub overall_features: IndexMap<String, Outcome>,
    /// All schema-validation records, ordered by `(schema, test name)`.
    pub schema_results: Vec<SchemaResult>,
    /// Overall outcome per schema, baseline schemas always present.
    pub overall_schemas: IndexMap<String, Outcome>,
    /// Overall schema-validation outcome per stage.
    pub schema_stages: IndexMap<Stage, Outcome>,
    /// Device identity.
    pub device: DeviceMetadata,
    /// Stages at which at least one feature was exercised, in fixed order.
    pub observed_stages: Vec<Stage>,
    /// Test name to rendered sequence comparison, in `tests` order.
    pub sequences: IndexMap<String, String>,
}

impl SequencerReport {
    /// Loads and assembles the report for one device.
    ///
    /// Construction order is fixed: results file, score aggregation, device
    /// metadata, then one sequence alignment per test. Any missing or
    /// malformed required file aborts the whole construction.
    pub fn load(paths: &ReportPaths) -> Result<Self, ReportError> {
        let results_file = paths.results_file();
        debug!("loading sequencer results from `{results_file}`");
        let raw = RawResults::from_file(&results_file)?;

        let feature_scores = aggregate_features(&raw.features);
        let schema_scores = aggregate_schemas(&raw.schemas);

        let device = DeviceMetadata::from_file(&paths.metadata_file())?;

        let aligner = SequenceAligner::new(
            paths.reference_root().to_owned(),
            paths.actual_sequences_dir(),
        );
        let mut sequences = IndexMap::new();
        for (name, test) in &feature_scores.tests {
            let comparison = aligner.align(test)?;
            sequences.insert(name.clone(), comparison.render());
        }

        Ok(SequencerReport {
            device_id: paths.device_id().to_owned(),
            start_time: raw.start_time,
            end_time: raw.status.timestamp,
            status_message: raw.status.message.unwrap_or_default(),
            tests: feature_scores.tests,
            features: feature_scores.features,
            overall_features: feature_scores.overall,
            schema_results: schema_scores.results,
            overall_schemas: schema_scores.by_schema,
            schema_stages: schema_scores.by_stage,
            device,
            observed_stages: feature_scores.observed_stages,
            sequences,
        })
    }
}
