// Copyright (c) The seqreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while building a sequencer report.
//!
//! Only fatal conditions appear here. Tolerable degradations (a missing
//! reference sequence, unparsable step text) are absorbed at the component
//! boundary and never surface as errors.

use camino::Utf8PathBuf;
use thiserror::Error;

/// A fatal error encountered while constructing a
/// [`SequencerReport`](crate::report::SequencerReport).
///
/// Every variant names the file that caused it; the caller is expected to
/// halt with a non-zero exit and surface that path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// The sequencer results file could not be read.
    #[error("failed to read sequencer results at `{path}`")]
    ResultsRead {
        /// Path to the results file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The sequencer results file is not valid JSON of the expected shape.
    #[error("failed to parse sequencer results at `{path}`")]
    ResultsParse {
        /// Path to the results file.
        path: Utf8PathBuf,
        /// The underlying deserialization error.
        #[source]
        error: serde_json::Error,
    },

    /// The device metadata file could not be read.
    #[error("failed to read device metadata at `{path}`")]
    MetadataRead {
        /// Path to the metadata file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The device metadata file is not valid JSON of the expected shape.
    #[error("failed to parse device metadata at `{path}`")]
    MetadataParse {
        /// Path to the metadata file.
        path: Utf8PathBuf,
        /// The underlying deserialization error.
        #[source]
        error: serde_json::Error,
    },

    /// The recorded step log for a test named in the results file is absent.
    ///
    /// The actual run is the thing being reported on; without its log the
    /// report cannot proceed.
    #[error("failed to read recorded sequence at `{path}`")]
    ActualSequenceRead {
        /// Path to the missing or unreadable sequence log.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: std::io::Error,
    },
}
