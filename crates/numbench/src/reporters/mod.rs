// Numbench - Numerical micro-benchmark harness
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Benchmark reporters for various output formats.
//!
//! Every reporter is a pure function of [`BenchData`]: rendering the same
//! data twice gives identical output, whether the data comes from a fresh
//! run or a reloaded snapshot.
//!
//! # Modules
//!
//! - `console`: Console output formatting
//! - `json`: Snapshot persistence
//! - `markdown`: Markdown export
//! - `html`: HTML export

pub mod console;
pub mod html;
pub mod json;
pub mod markdown;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::config::{BenchConfig, ExportFormat};
use crate::error::{BenchError, Result};
use crate::report::{BenchData, GroupResult, MeasurementRecord};

// Re-export commonly used functions
pub use console::{print_report, print_summary};
pub use html::{export_html, render_html};
pub use json::{load_snapshot, save_snapshot};
pub use markdown::{export_markdown, render_markdown};

/// Placeholder for values that are absent.
pub const NOT_APPLICABLE: &str = "N/A";

/// Formats seconds with millisecond precision.
pub fn fmt_seconds(seconds: Option<f64>) -> String {
    seconds
        .map(|s| format!("{:.3}", s))
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

/// Formats a speedup factor.
pub fn fmt_speedup(speedup: Option<f64>) -> String {
    speedup
        .map(|s| format!("{:.2}x", s))
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

/// Formats a rank.
pub fn fmt_rank(rank: Option<usize>) -> String {
    rank.map(|r| r.to_string())
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

/// Formats a JSON value for display; strings are shown without quotes.
pub(crate) fn fmt_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Records in display order: ranked first by rank, then the rest in
/// discovery order.
pub(crate) fn display_order(group: &GroupResult) -> Vec<&MeasurementRecord> {
    let mut records: Vec<_> = group.records.iter().collect();
    records.sort_by_key(|r| r.rank.unwrap_or(usize::MAX));
    records
}

/// Writes every configured report format for `data`.
///
/// Returns the files written.
pub fn export_all(data: &BenchData, config: &BenchConfig) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for format in &config.export_formats {
        match format {
            ExportFormat::Html => {
                let path = config.html_path();
                ensure_parent(&path)?;
                info!("Writing report to: {}", path.display());
                export_html(data, &config.links, &path)
                    .map_err(|e| BenchError::io_error(&path, e))?;
                written.push(path);
            }
            ExportFormat::Markdown => {
                let path = config.markdown_path();
                ensure_parent(&path)?;
                info!("Writing report to: {}", path.display());
                export_markdown(data, &config.links, &path)
                    .map_err(|e| BenchError::io_error(&path, e))?;
                written.push(path);
            }
            ExportFormat::Console => print_report(data),
        }
    }

    Ok(written)
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| BenchError::io_error(parent, e))
        }
        _ => Ok(()),
    }
}
