// Copyright (c) The seqreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The three-valued outcome of a test, a schema validation, or a rollup.

use std::fmt;

/// Result of a test, schema validation, or aggregated rollup.
///
/// An explicit three-variant enum rather than `Option<bool>`: "this was never
/// exercised" must stay distinguishable from "this failed" all the way to the
/// rendered scorecard.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Outcome {
    /// The subject passed.
    Pass,
    /// The subject failed.
    Fail,
    /// No verdict: the subject errored before scoring or was never exercised.
    Indeterminate,
}

impl Outcome {
    /// Maps a raw result string from the sequencer output to an outcome.
    ///
    /// Anything other than the literal `"pass"` or `"fail"` (including a
    /// missing result) is indeterminate.
    pub fn from_result(result: Option<&str>) -> Self {
        match result {
            Some("pass") => Outcome::Pass,
            Some("fail") => Outcome::Fail,
            _ => Outcome::Indeterminate,
        }
    }

    /// Combines outcomes with all-must-pass semantics.
    ///
    /// An empty input is indeterminate, never a pass: a feature with no
    /// exercised stages has no verdict. Within a non-empty input, an
    /// indeterminate element counts as a non-pass.
    pub fn all_or_none(outcomes: impl IntoIterator<Item = Outcome>) -> Outcome {
        let mut seen = false;
        let mut all_pass = true;
        for outcome in outcomes {
            seen = true;
            if outcome != Outcome::Pass {
                all_pass = false;
            }
        }
        if !seen {
            Outcome::Indeterminate
        } else if all_pass {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }

    /// Returns the display glyph for this outcome.
    pub fn glyph(self) -> &'static str {
        match self {
            Outcome::Pass => "✓",
            Outcome::Fail => "✕",
            Outcome::Indeterminate => "·",
        }
    }

    /// Returns true if this outcome is a pass.
    pub fn is_pass(self) -> bool {
        self == Outcome::Pass
    }
}

impl From<bool> for Outcome {
    fn from(passed: bool) -> Self {
        if passed { Outcome::Pass } else { Outcome::Fail }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}
