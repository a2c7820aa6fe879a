// Copyright (c) The seqreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of step-log text into an ordered sequence of numbered steps.

use tracing::debug;

/// Literal prefix that opens every step in a raw log. Renumbering happens on
/// render, so the on-disk marker is always `1.` regardless of position.
const STEP_START: &str = "1. ";

/// Marker the harness injects as a trailing pseudo-step when a test fails.
const FAILURE_MARKER: &str = "1. Test failed";

/// One numbered step: the opening marker line plus any continuation lines.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Step {
    lines: Vec<String>,
}

impl Step {
    /// Creates a step from its lines. The first line carries the step marker.
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// All lines of this step, in original order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The marker line that opens this step.
    pub fn first_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }
}

/// An ordered list of steps parsed from a raw step log.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StepSequence {
    steps: Vec<Step>,
}

impl StepSequence {
    /// Parses raw step-log text into a sequence.
    ///
    /// Everything before the first `1. ` line is preamble and discarded. If
    /// no step marker exists at all, the result is an empty sequence: callers
    /// treat "no steps" as a legitimate degraded state, not an error. A
    /// trailing harness-injected `1. Test failed` pseudo-step is dropped so
    /// it never counts as an executed step.
    pub fn parse(text: &str) -> StepSequence {
        let lines: Vec<&str> = text.lines().collect();
        let Some(anchor) = lines.iter().position(|line| line.starts_with(STEP_START)) else {
            debug!("no step marker found in log text, treating as empty sequence");
            return StepSequence::default();
        };

        // Scan in reverse, buffering continuation lines until the marker line
        // that opens their step is reached. This groups steps without any
        // forward lookahead for where a step ends.
        let mut steps = Vec::new();
        let mut buffer: Vec<&str> = Vec::new();
        for line in lines[anchor..].iter().rev() {
            buffer.push(line);
            if line.starts_with(STEP_START) {
                buffer.reverse();
                steps.push(Step::new(buffer.iter().map(|s| (*s).to_owned()).collect()));
                buffer.clear();
            }
        }
        steps.reverse();

        if steps
            .last()
            .is_some_and(|step| step.first_line().starts_with(FAILURE_MARKER))
        {
            steps.pop();
        }

        StepSequence { steps }
    }

    /// A synthetic single-step sequence carrying `message`, used when a
    /// reference log is missing.
    pub fn synthetic(message: &str) -> StepSequence {
        StepSequence {
            steps: vec![Step::new(vec![format!("1. {message}")])],
        }
    }

    /// The parsed steps, in original order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the sequence contains no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }
}
