// Copyright (c) The seqreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alignment of a test's recorded step log against its reference sequence.
//!
//! The aligner splits the run into completed, failing, and not-reached steps,
//! then renders an annotated step listing that is the sole artifact consumed
//! by the report renderer.

use crate::{
    errors::ReportError,
    outcome::Outcome,
    records::TestResult,
    sequence::{Step, StepSequence},
};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::warn;

/// File name of a step log within a per-test directory.
const SEQUENCE_FILE: &str = "sequence.md";

/// Placeholder step text substituted for an absent reference log.
const MISSING_REFERENCE: &str = "Missing input file";

/// Loads and aligns recorded step logs against reference sequences.
#[derive(Clone, Debug)]
pub struct SequenceAligner {
    reference_root: Utf8PathBuf,
    actual_root: Utf8PathBuf,
}

impl SequenceAligner {
    /// Creates an aligner reading references from
    /// `<reference_root>/<test>/sequence.md` and recorded logs from
    /// `<actual_root>/<test>/sequence.md`.
    pub fn new(reference_root: Utf8PathBuf, actual_root: Utf8PathBuf) -> Self {
        Self {
            reference_root,
            actual_root,
        }
    }

    /// Aligns one test's recorded log against its reference sequence.
    ///
    /// A missing reference log degrades to a one-step placeholder. A missing
    /// recorded log is fatal: the run being reported on did not complete.
    pub fn align(&self, test: &TestResult) -> Result<SequenceComparison, ReportError> {
        let actual_path = sequence_path(&self.actual_root, &test.name);
        let actual_text =
            std::fs::read_to_string(&actual_path).map_err(|error| {
                ReportError::ActualSequenceRead {
                    path: actual_path.clone(),
                    error,
                }
            })?;
        let actual = StepSequence::parse(&actual_text);

        let reference_path = sequence_path(&self.reference_root, &test.name);
        let reference = match std::fs::read_to_string(&reference_path) {
            Ok(text) => StepSequence::parse(&text),
            Err(error) => {
                warn!("substituting placeholder for unreadable reference `{reference_path}`: {error}");
                StepSequence::synthetic(MISSING_REFERENCE)
            }
        };

        Ok(SequenceComparison::classify(
            test.passed(),
            &actual,
            &reference,
        ))
    }
}

fn sequence_path(root: &Utf8Path, test_name: &str) -> Utf8PathBuf {
    root.join(test_name).join(SEQUENCE_FILE)
}

/// A recorded run split against its reference sequence.
#[derive(Clone, Debug)]
pub struct SequenceComparison {
    /// Steps the device completed, taken verbatim from the recorded log.
    completed: Vec<Step>,
    /// The reference step at the failure point, if the reference reaches
    /// that far.
    failing: Option<Step>,
    /// Reference steps that were never executed.
    not_done: Vec<Step>,
}

impl SequenceComparison {
    /// Classifies actual steps against the reference.
    ///
    /// The failing-step index is the length of the recorded sequence for a
    /// passing test (nothing failed), zero when nothing was recorded, and
    /// otherwise the last recorded step is taken as the failure point. The
    /// completed slice renders from the recorded log since its wording may
    /// legitimately drift from the reference; failing and not-done steps
    /// render from the reference, since they carry no recorded text.
    pub fn classify(
        outcome: Outcome,
        actual: &StepSequence,
        reference: &StepSequence,
    ) -> SequenceComparison {
        let failing_index = if actual.is_empty() {
            0
        } else if outcome == Outcome::Pass {
            actual.len()
        } else {
            actual.len() - 1
        };

        let completed = actual.steps()[..failing_index].to_vec();
        let failing = reference.get(failing_index).cloned();
        let not_done = reference
            .steps()
            .get(failing_index + 1..)
            .unwrap_or_default()
            .to_vec();

        SequenceComparison {
            completed,
            failing,
            not_done,
        }
    }

    /// Steps the device completed.
    pub fn completed(&self) -> &[Step] {
        &self.completed
    }

    /// The reference step at the failure point, if any.
    pub fn failing(&self) -> Option<&Step> {
        self.failing.as_ref()
    }

    /// Reference steps that were never reached.
    pub fn not_done(&self) -> &[Step] {
        &self.not_done
    }

    /// Renders the annotated step listing.
    ///
    /// Completed steps are renumbered from 1 and carry a pass glyph. The
    /// failing step is wrapped in a horizontal-rule block with a fail glyph
    /// on both ends of every line, padded to the widest line in the step.
    /// Not-done steps continue the numbering with no glyph.
    pub fn render(&self) -> String {
        let pass = Outcome::Pass.glyph();
        let fail = Outcome::Fail.glyph();
        let mut lines: Vec<String> = Vec::new();
        let mut number = 0;

        for step in &self.completed {
            number += 1;
            for (index, line) in step.lines().iter().enumerate() {
                if index == 0 {
                    lines.push(format!("{pass} {}", renumber(line, number)));
                } else {
                    lines.push(line.clone());
                }
            }
        }

        if let Some(step) = &self.failing {
            number += 1;
            let step_lines: Vec<String> = step
                .lines()
                .iter()
                .enumerate()
                .map(|(index, line)| {
                    if index == 0 {
                        renumber(line, number)
                    } else {
                        line.clone()
                    }
                })
                .collect();
            let width = step_lines
                .iter()
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0);
            let rule = "-".repeat(width + 4);

            lines.push(rule.clone());
            for line in &step_lines {
                let padding = " ".repeat(width - line.chars().count());
                lines.push(format!("{fail} {line}{padding} {fail}"));
            }
            lines.push(rule);
        }

        for step in &self.not_done {
            number += 1;
            for (index, line) in step.lines().iter().enumerate() {
                if index == 0 {
                    lines.push(renumber(line, number));
                } else {
                    lines.push(line.clone());
                }
            }
        }

        let mut rendered = lines.join("\n");
        rendered.push('\n');
        rendered
    }
}

/// Replaces the literal `1.` step marker with the step's display number.
fn renumber(line: &str, number: usize) -> String {
    match line.strip_prefix("1.") {
        Some(rest) => format!("{number}.{rest}"),
        None => line.to_owned(),
    }
}
