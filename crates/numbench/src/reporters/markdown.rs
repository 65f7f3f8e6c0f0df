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

//! Markdown export for benchmark results.

use crate::core::config::{ReportLinks, SNAPSHOT_FILE};
use crate::error::ErrorInfo;
use crate::report::BenchData;
use crate::reporters::{display_order, fmt_rank, fmt_seconds, fmt_speedup, fmt_value};
use std::fs;
use std::io;
use std::path::Path;

/// Escapes characters that would break a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn push_errors(md: &mut String, title: &str, errors: &[ErrorInfo]) {
    if errors.is_empty() {
        return;
    }
    md.push_str(&format!("\n#### {}\n\n", title));
    for error in errors {
        md.push_str(&format!(
            "- **{}** ({}): {}\n",
            error.name, error.error_type, error.message
        ));
        if !error.trace.is_empty() && error.trace != error.message {
            md.push_str("\n  ```text\n");
            for line in error.trace.lines() {
                md.push_str(&format!("  {}\n", line));
            }
            md.push_str("  ```\n");
        }
    }
}

/// Renders benchmark results as a Markdown document.
pub fn render_markdown(data: &BenchData, links: &ReportLinks) -> String {
    let mut md = String::new();

    md.push_str("# Numerical Benchmark Results\n\n");

    let mut nav = Vec::new();
    if let Some(repository) = &links.repository {
        nav.push(format!("[Repository]({})", repository));
    }
    nav.push(format!("[JSON data]({})", SNAPSHOT_FILE));
    if let Some(about) = &links.about {
        nav.push(format!("[About]({})", about));
    }
    md.push_str(&nav.join(" | "));
    md.push_str("\n\n");

    for group in &data.benchmark_results {
        md.push_str(&format!(
            "## {} ([source code]({}))\n\n",
            group.group_name, group.source_url
        ));
        if let Some(description) = &group.description {
            md.push_str(&format!("{}\n\n", description));
        }
        if !group.fixture.is_empty() {
            let params: Vec<String> = group
                .fixture
                .iter()
                .map(|(k, v)| format!("`{}={}`", k, fmt_value(v)))
                .collect();
            md.push_str(&format!("**Fixture:** {}\n\n", params.join(", ")));
        }

        if group.records.is_empty() {
            md.push_str("_No benchmark was measured in this group._\n\n");
            continue;
        }

        md.push_str("| Rank | Function name | Backend | Cold time (s) | Warm time (s) | Std-dev (s) | Speedup |\n");
        md.push_str("|-----:|---------------|---------|--------------:|--------------:|------------:|--------:|\n");
        for record in display_order(group) {
            md.push_str(&format!(
                "| {} | [{}]({}) | {} | {} | {} | {} | {} |\n",
                fmt_rank(record.rank),
                cell(&record.name),
                record.source_url,
                cell(&record.backend),
                fmt_seconds(record.cold_time),
                fmt_seconds(record.warm_time),
                fmt_seconds(record.std_dev()),
                fmt_speedup(record.speedup)
            ));
        }
        md.push('\n');
    }

    md.push_str("## Runtime Environment\n\n");
    if data.benchmark_environment.is_empty() {
        md.push_str("_No environment information was recorded._\n\n");
    } else {
        md.push_str("| Key | Value |\n|-----|-------|\n");
        for (key, value) in &data.benchmark_environment {
            md.push_str(&format!("| {} | {} |\n", cell(key), cell(&fmt_value(value))));
        }
        md.push('\n');
    }

    md.push_str("## Errors\n");
    let mut any = false;
    for group in data.benchmark_results.iter().filter(|g| g.has_errors()) {
        any = true;
        md.push_str(&format!("\n### {}\n", group.group_name));
        push_errors(&mut md, "Benchmark loading errors", &group.import_errors);
        push_errors(&mut md, "Benchmark execution errors", &group.runtime_errors);
    }
    if !any {
        md.push_str("\nNo errors.\n");
    }

    md
}

/// Exports benchmark results as Markdown.
///
/// # Arguments
///
/// * `data` - The benchmark data to render
/// * `links` - Navigation links
/// * `path` - Output file path
pub fn export_markdown(data: &BenchData, links: &ReportLinks, path: &Path) -> io::Result<()> {
    fs::write(path, render_markdown(data, links))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::measurement::CapturedPanic;
    use crate::error::ErrorKind;
    use crate::report::{GroupResult, MeasurementRecord};
    use tempfile::NamedTempFile;

    fn sample() -> BenchData {
        let mut group = GroupResult::new("julia", "suites/julia");
        group.records.push(MeasurementRecord {
            cold_time: Some(0.5),
            warm_time: Some(0.5),
            all_warm_times: vec![0.5],
            rank: Some(1),
            speedup: Some(1.0),
            ..MeasurementRecord::new("julia|loops", "suites/julia/julia_naive.rs", "plain")
        });
        group.runtime_errors.push(ErrorInfo::from_panic(
            "julia_escape",
            ErrorKind::Runtime,
            &CapturedPanic {
                message: "overflow".to_string(),
                location: Some("src/julia.rs:10:5".to_string()),
                backtrace: None,
            },
        ));
        let mut data = BenchData::default();
        data.benchmark_results.push(group);
        data
    }

    #[test]
    fn test_render_markdown() {
        let md = render_markdown(&sample(), &ReportLinks::default());

        assert!(md.contains("# Numerical Benchmark Results"));
        assert!(md.contains("## julia ([source code](suites/julia))"));
        assert!(md.contains("| 1 | [julia\\|loops](suites/julia/julia_naive.rs) | plain | 0.500 | 0.500 | 0.000 | 1.00x |"));
        assert!(md.contains("#### Benchmark execution errors"));
        assert!(md.contains("- **julia_escape** (Panic): overflow"));
        assert!(md.contains("panicked at src/julia.rs:10:5"));
        assert!(md.contains("_No environment information was recorded._"));
    }

    #[test]
    fn test_export_markdown() {
        let temp = NamedTempFile::new().unwrap();
        export_markdown(&BenchData::default(), &ReportLinks::default(), temp.path()).unwrap();

        let content = fs::read_to_string(temp.path()).unwrap();
        assert!(content.contains("# Numerical Benchmark Results"));
        assert!(content.contains("No errors."));
    }
}
