// Copyright (c) The seqreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for seqreport: turning the raw JSON output of a
//! device-certification sequencer run into a render-ready report object.
//!
//! The entry point is [`report::SequencerReport::load`], which reads the run
//! results, folds them into per-feature and per-schema scorecards, and aligns
//! every test's recorded step log against its reference sequence. Rendering
//! the resulting object to Markdown is the CLI's job, not this crate's.

pub mod aggregate;
pub mod align;
pub mod errors;
pub mod helpers;
pub mod outcome;
pub mod records;
pub mod report;
pub mod results;
pub mod sequence;
