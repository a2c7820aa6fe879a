// Copyright (c) The seqreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Folding of raw results into feature-by-stage and schema-by-stage views.
//!
//! Both views derive from the single raw results file; the orderings they
//! expose (tests by `(feature, name)`, features by name, stages in fixed
//! order) are a rendering contract, not incidental.

use crate::{
    outcome::Outcome,
    records::{FeatureStage, SchemaResult, Stage, TestResult},
    results::{RawFeature, RawSchema},
};
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::warn;

/// Schema names always present in the by-schema rollup, even with zero
/// recorded validations, so the report shows "not applicable" rather than
/// silently omitting the row.
pub const BASELINE_SCHEMAS: [&str; 3] = ["state", "event_pointset", "event_system"];

/// The feature-keyed scoring view of one run.
#[derive(Clone, Debug, Default)]
pub struct FeatureScores {
    /// Test name to result, ordered by `(feature, test name)`.
    pub tests: IndexMap<String, TestResult>,

    /// Feature to per-stage accumulators, ordered by feature name. Every
    /// known stage has a bucket even when unexercised.
    pub features: IndexMap<String, IndexMap<Stage, FeatureStage>>,

    /// Overall pass/fail per feature, computed only from the
    /// pass-determining stages that were exercised.
    pub overall: IndexMap<String, Outcome>,

    /// Stages at which at least one feature was exercised, in fixed order.
    pub observed_stages: Vec<Stage>,
}

/// Folds the `features` section of the raw results into scoring buckets.
pub fn aggregate_features(raw: &IndexMap<String, RawFeature>) -> FeatureScores {
    let mut tests: Vec<TestResult> = raw
        .iter()
        .flat_map(|(feature, entry)| {
            entry
                .sequences
                .iter()
                .map(|(name, sequence)| TestResult::new(feature, name, sequence))
        })
        .collect();
    tests.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let mut features: IndexMap<String, IndexMap<Stage, FeatureStage>> = raw
        .keys()
        .sorted()
        .map(|feature| {
            let stages = Stage::ALL
                .into_iter()
                .map(|stage| (stage, FeatureStage::new(stage)))
                .collect();
            (feature.clone(), stages)
        })
        .collect();

    for test in &tests {
        let Some(stage) = Stage::parse(&test.stage) else {
            warn!(
                "test `{}` declares unknown stage `{}`, not folded into any bucket",
                test.name, test.stage
            );
            continue;
        };
        if let Some(bucket) = features
            .get_mut(&test.bucket)
            .and_then(|stages| stages.get_mut(&stage))
        {
            bucket.add(&test.name, test.score, test.total);
        }
    }

    let overall = features
        .iter()
        .map(|(feature, stages)| {
            let outcome = Outcome::all_or_none(
                Stage::PASS_DETERMINING
                    .into_iter()
                    .filter_map(|stage| stages.get(&stage))
                    .filter(|bucket| bucket.has())
                    .map(|bucket| Outcome::from(bucket.passed())),
            );
            (feature.clone(), outcome)
        })
        .collect();

    let observed_stages = Stage::ALL
        .into_iter()
        .filter(|stage| {
            features
                .values()
                .any(|stages| stages.get(stage).is_some_and(FeatureStage::has))
        })
        .collect();

    let tests = tests
        .into_iter()
        .map(|test| (test.name.clone(), test))
        .collect();

    FeatureScores {
        tests,
        features,
        overall,
        observed_stages,
    }
}

/// The schema-keyed scoring view of one run.
#[derive(Clone, Debug, Default)]
pub struct SchemaScores {
    /// All validation records, ordered by `(schema, test name)`.
    pub results: Vec<SchemaResult>,

    /// Overall outcome per schema. Baseline schemas come first, then any
    /// extra schemas found in the data.
    pub by_schema: IndexMap<String, Outcome>,

    /// Overall outcome per stage, across all schemas.
    pub by_stage: IndexMap<Stage, Outcome>,
}

/// Folds the `schemas` section of the raw results into rollups.
pub fn aggregate_schemas(raw: &IndexMap<String, RawSchema>) -> SchemaScores {
    let mut results: Vec<SchemaResult> = raw
        .iter()
        .flat_map(|(schema, entry)| {
            entry.sequences.iter().map(|(test, sequence)| SchemaResult {
                schema: schema.clone(),
                stage: sequence.stage.clone().unwrap_or_default(),
                test: test.clone(),
                result: sequence.result.clone(),
            })
        })
        .collect();
    results.sort_by(|a, b| (&a.schema, &a.test).cmp(&(&b.schema, &b.test)));

    let mut schema_names: Vec<String> =
        BASELINE_SCHEMAS.iter().map(|name| (*name).to_owned()).collect();
    for result in &results {
        if !schema_names.contains(&result.schema) {
            schema_names.push(result.schema.clone());
        }
    }

    let by_schema = schema_names
        .into_iter()
        .map(|schema| {
            let outcome = Outcome::all_or_none(
                results
                    .iter()
                    .filter(|result| result.schema == schema)
                    .map(SchemaResult::passed),
            );
            (schema, outcome)
        })
        .collect();

    let by_stage = Stage::ALL
        .into_iter()
        .map(|stage| {
            let outcome = Outcome::all_or_none(
                results
                    .iter()
                    .filter(|result| Stage::parse(&result.stage) == Some(stage))
                    .map(SchemaResult::passed),
            );
            (stage, outcome)
        })
        .collect();

    SchemaScores {
        results,
        by_schema,
        by_stage,
    }
}
