// Copyright (c) The seqreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serde models for the raw sequencer results file and device metadata.
//!
//! These mirror only the fields the report reads; everything else in the
//! files is ignored. Leaf fields are optional-tolerant since a run that died
//! early may have written a partial results file.

use crate::errors::ReportError;
use camino::Utf8Path;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;

/// Top level of `out/sequencer_<device_id>.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct RawResults {
    /// When the run started.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    /// Last reported run status.
    #[serde(default)]
    pub status: RawStatus,

    /// Per-feature test sequences.
    #[serde(default)]
    pub features: IndexMap<String, RawFeature>,

    /// Per-schema validation sequences.
    #[serde(default)]
    pub schemas: IndexMap<String, RawSchema>,
}

impl RawResults {
    /// Reads and parses a sequencer results file.
    ///
    /// A missing or malformed results file is fatal: it is the subject of the
    /// report.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ReportError> {
        let contents =
            std::fs::read_to_string(path).map_err(|error| ReportError::ResultsRead {
                path: path.to_owned(),
                error,
            })?;
        serde_json::from_str(&contents).map_err(|error| ReportError::ResultsParse {
            path: path.to_owned(),
            error,
        })
    }
}

/// A status block: timestamp plus free-text message.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawStatus {
    /// When this status was recorded.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Free-text status message, possibly multi-line.
    #[serde(default)]
    pub message: Option<String>,
}

/// One feature's section of the results file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawFeature {
    /// Test name to recorded sequence outcome.
    #[serde(default)]
    pub sequences: IndexMap<String, RawSequence>,
}

/// One test's recorded outcome.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSequence {
    /// Human-readable description of the test.
    #[serde(default)]
    pub summary: Option<String>,

    /// Raw result string (`"pass"`, `"fail"`, or other).
    #[serde(default)]
    pub result: Option<String>,

    /// Certification stage the test declares itself at.
    #[serde(default)]
    pub stage: Option<String>,

    /// Last status reported by the test.
    #[serde(default)]
    pub status: RawStatus,

    /// Points earned and available.
    #[serde(default)]
    pub scoring: RawScoring,
}

/// Points earned vs. points possible for one test.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct RawScoring {
    /// Points earned.
    #[serde(default)]
    pub value: i64,

    /// Points possible.
    #[serde(default)]
    pub total: i64,
}

/// One schema's section of the results file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSchema {
    /// Test name to validation outcome against this schema.
    #[serde(default)]
    pub sequences: IndexMap<String, RawSchemaSequence>,
}

/// One schema-validation outcome for one test.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSchemaSequence {
    /// Certification stage of the validated test.
    #[serde(default)]
    pub stage: Option<String>,

    /// Raw result string (`"pass"`, `"fail"`, or other).
    #[serde(default)]
    pub result: Option<String>,
}

/// Device identity from `devices/<device_id>/metadata.json`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DeviceMetadata {
    /// Hardware and software identity.
    #[serde(default)]
    pub system: SystemMetadata,

    /// Gateway binding, if the device is proxied.
    #[serde(default)]
    pub gateway: Option<GatewayMetadata>,
}

impl DeviceMetadata {
    /// Reads and parses a device metadata file.
    ///
    /// Failure is fatal: a report cannot be produced for a device whose
    /// identity cannot be established.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ReportError> {
        let contents =
            std::fs::read_to_string(path).map_err(|error| ReportError::MetadataRead {
                path: path.to_owned(),
                error,
            })?;
        serde_json::from_str(&contents).map_err(|error| ReportError::MetadataParse {
            path: path.to_owned(),
            error,
        })
    }
}

/// The `system` block of device metadata.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SystemMetadata {
    /// Hardware make and model.
    #[serde(default)]
    pub hardware: HardwareMetadata,

    /// Software component to version, e.g. `firmware: v1.2`.
    #[serde(default)]
    pub software: IndexMap<String, String>,
}

/// Hardware identity.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct HardwareMetadata {
    /// Manufacturer name.
    #[serde(default)]
    pub make: Option<String>,

    /// Model identifier.
    #[serde(default)]
    pub model: Option<String>,
}

/// Gateway binding for proxied devices.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GatewayMetadata {
    /// Identifier of the gateway this device is proxied through.
    #[serde(default)]
    pub gateway_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parses_minimal_results() {
        let raw: RawResults = serde_json::from_str(indoc! {r#"
            {
              "start_time": "2025-11-03T10:00:00Z",
              "status": { "timestamp": "2025-11-03T10:05:00Z", "message": "done" },
              "features": {
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
                    "pointset_publish": { "stage": "beta", "result": "fail" }
                  }
                }
              }
            }
        "#})
        .expect("results parse");

        assert!(raw.start_time.is_some());
        assert_eq!(raw.status.message.as_deref(), Some("done"));
        let seq = &raw.features["pointset"].sequences["pointset_publish"];
        assert_eq!(seq.scoring.value, 5);
        assert_eq!(raw.schemas["state"].sequences["pointset_publish"].result.as_deref(), Some("fail"));
    }

    #[test]
    fn tolerates_partial_results() {
        // A run that died before writing scoring or status leaves holes.
        let raw: RawResults = serde_json::from_str(
            r#"{ "features": { "system": { "sequences": { "broken": {} } } } }"#,
        )
        .expect("partial results parse");

        assert!(raw.start_time.is_none());
        let seq = &raw.features["system"].sequences["broken"];
        assert!(seq.result.is_none());
        assert_eq!(seq.scoring.total, 0);
    }

    #[test]
    fn parses_metadata_without_gateway() {
        let metadata: DeviceMetadata = serde_json::from_str(indoc! {r#"
            {
              "system": {
                "hardware": { "make": "ACME", "model": "AHU-1" },
                "software": { "firmware": "v1.2" }
              }
            }
        "#})
        .expect("metadata parse");

        assert_eq!(metadata.system.hardware.make.as_deref(), Some("ACME"));
        assert!(metadata.gateway.is_none());
    }
}
