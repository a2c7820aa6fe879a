// Copyright (c) The seqreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Small formatting helpers used by report renderers.

use indexmap::IndexMap;
use itertools::Itertools;

/// Formats a mapping as comma-separated `key: value` pairs, in map order.
pub fn pretty_map(map: &IndexMap<String, String>) -> String {
    map.iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .join(", ")
}

/// Returns a Markdown table divider row for `columns` columns.
pub fn md_table_divider(columns: usize) -> String {
    let mut row = String::from("|");
    for _ in 0..columns {
        row.push_str("---|");
    }
    row
}
