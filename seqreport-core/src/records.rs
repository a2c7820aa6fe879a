// Copyright (c) The seqreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory records: one test's outcome, one schema-validation outcome, and
//! one feature-by-stage scoring bucket.

use crate::{outcome::Outcome, results::RawSequence};
use std::fmt;

/// A certification maturity level, in decreasing maturity order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Stage {
    /// Fully certified behavior.
    Stable,
    /// Behavior on track for certification.
    Beta,
    /// Early-access behavior.
    Preview,
    /// Experimental behavior.
    Alpha,
}

impl Stage {
    /// All known stages, in display order.
    pub const ALL: [Stage; 4] = [Stage::Stable, Stage::Beta, Stage::Preview, Stage::Alpha];

    /// The stages whose results determine a feature's overall pass/fail.
    /// The remaining stages are informational only.
    pub const PASS_DETERMINING: [Stage; 2] = [Stage::Stable, Stage::Beta];

    /// Parses a raw stage label. Unknown labels map to `None`.
    pub fn parse(label: &str) -> Option<Stage> {
        match label {
            "stable" => Some(Stage::Stable),
            "beta" => Some(Stage::Beta),
            "preview" => Some(Stage::Preview),
            "alpha" => Some(Stage::Alpha),
            _ => None,
        }
    }

    /// Returns the lowercase label for this stage.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Stable => "stable",
            Stage::Beta => "beta",
            Stage::Preview => "preview",
            Stage::Alpha => "alpha",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One executed test, as read from the results file.
///
/// Constructed once per test name found in the raw results and immutable
/// afterwards. Display ordering is by `(bucket, name)`.
#[derive(Clone, Debug)]
pub struct TestResult {
    /// The feature this test belongs to.
    pub bucket: String,
    /// Unique test identifier.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Raw result string (`"pass"`, `"fail"`, or other).
    pub result: Option<String>,
    /// Raw stage label the test declares itself at.
    pub stage: String,
    /// Status message, newlines collapsed for single-line display.
    pub message: String,
    /// Points earned.
    pub score: i64,
    /// Points possible.
    pub total: i64,
}

impl TestResult {
    /// Builds a test record from one raw sequence entry.
    pub fn new(bucket: &str, name: &str, raw: &RawSequence) -> Self {
        let message = raw
            .status
            .message
            .as_deref()
            .unwrap_or_default()
            .replace('\n', "; ");
        Self {
            bucket: bucket.to_owned(),
            name: name.to_owned(),
            description: raw.summary.clone().unwrap_or_default(),
            result: raw.result.clone(),
            stage: raw.stage.clone().unwrap_or_default(),
            message,
            score: raw.scoring.value,
            total: raw.scoring.total,
        }
    }

    /// The tri-state outcome of this test.
    ///
    /// Indeterminate covers tests that errored before scoring.
    pub fn passed(&self) -> Outcome {
        Outcome::from_result(self.result.as_deref())
    }

    /// Ordering key for stable display.
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.bucket, &self.name)
    }
}

/// Score accumulator for one (feature, stage) pair.
///
/// `total == 0` means the feature was not exercised at this stage, which is
/// distinct from both passing and failing.
#[derive(Clone, Debug)]
pub struct FeatureStage {
    /// The stage this bucket covers.
    pub stage: Stage,
    /// Sum of earned test scores.
    pub scored: i64,
    /// Sum of possible test scores.
    pub total: i64,
    /// Names of the tests folded into this bucket, for traceability.
    pub tests: Vec<String>,
}

impl FeatureStage {
    /// Creates an empty bucket for `stage`.
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            scored: 0,
            total: 0,
            tests: Vec::new(),
        }
    }

    /// Folds one test's score into this bucket.
    pub fn add(&mut self, test_name: &str, score: i64, total: i64) {
        self.scored += score;
        self.total += total;
        self.tests.push(test_name.to_owned());
    }

    /// Returns true if the feature was exercised at this stage at all.
    pub fn has(&self) -> bool {
        self.total > 0
    }

    /// Full marks only: partial credit is a fail for aggregation purposes,
    /// and an unexercised stage never counts as passed.
    pub fn passed(&self) -> bool {
        self.total > 0 && self.scored == self.total
    }
}

/// One schema-validation outcome for one test.
#[derive(Clone, Debug)]
pub struct SchemaResult {
    /// Schema name.
    pub schema: String,
    /// Raw stage label of the validated test.
    pub stage: String,
    /// Name of the validated test.
    pub test: String,
    /// Raw result string.
    pub result: Option<String>,
}

impl SchemaResult {
    /// The tri-state outcome of this validation.
    pub fn passed(&self) -> Outcome {
        Outcome::from_result(self.result.as_deref())
    }
}
