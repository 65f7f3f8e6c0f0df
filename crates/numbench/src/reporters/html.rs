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

//! HTML export for benchmark results.

use crate::core::config::{ReportLinks, SNAPSHOT_FILE};
use crate::error::ErrorInfo;
use crate::report::{BenchData, GroupResult};
use crate::reporters::{display_order, fmt_rank, fmt_seconds, fmt_speedup, fmt_value};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

const TITLE: &str = "Numerical Benchmark Results";

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the report page.
///
/// The output depends only on `data` and `links`.
pub fn render_html(data: &BenchData, links: &ReportLinks) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(html, "<title>{}</title>", TITLE);
    html.push_str("<style>\n");
    html.push_str(include_str!("styles.css"));
    html.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");

    render_nav(&mut html, links);
    let _ = writeln!(html, "<h1>{}</h1>", TITLE);

    for group in &data.benchmark_results {
        render_group(&mut html, group);
    }

    render_environment(&mut html, data);
    render_errors(&mut html, data);

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_nav(html: &mut String, links: &ReportLinks) {
    html.push_str("<ul class=\"nav\">\n");
    if let Some(repository) = &links.repository {
        let _ = writeln!(
            html,
            "  <li><a href=\"{}\">Repository</a></li>",
            escape_html(repository)
        );
    }
    let _ = writeln!(html, "  <li><a href=\"{}\">JSON data</a></li>", SNAPSHOT_FILE);
    if let Some(about) = &links.about {
        let _ = writeln!(html, "  <li><a href=\"{}\">About</a></li>", escape_html(about));
    }
    html.push_str("</ul>\n");
}

fn headerlink(html: &mut String, anchor: &str) {
    let _ = write!(
        html,
        " <a class=\"headerlink\" title=\"Permalink to this headline\" href=\"#{}\">&para;</a>",
        anchor
    );
}

fn render_group(html: &mut String, group: &GroupResult) {
    let name = escape_html(&group.group_name);
    let anchor = format!("results-{}", name);

    let _ = writeln!(html, "\n<section id=\"{}\">", anchor);
    let _ = write!(
        html,
        "<h2>{} (<a href=\"{}\" title=\"Source code for {}\">source code</a>)",
        name,
        escape_html(&group.source_url),
        name
    );
    headerlink(html, &anchor);
    html.push_str("</h2>\n");

    if let Some(description) = &group.description {
        let _ = writeln!(html, "<p class=\"description\">{}</p>", escape_html(description));
    }

    if !group.fixture.is_empty() {
        let params: Vec<String> = group
            .fixture
            .iter()
            .map(|(k, v)| format!("{}={}", escape_html(k), escape_html(&fmt_value(v))))
            .collect();
        let _ = writeln!(html, "<p class=\"fixture\">Fixture: {}</p>", params.join(", "));
    }

    if group.records.is_empty() {
        html.push_str("<p class=\"empty\">No benchmark was measured in this group.</p>\n");
        html.push_str("</section>\n");
        return;
    }

    html.push_str("<table class=\"results\">\n<thead>\n<tr>");
    for header in [
        "Rank",
        "Function name",
        "Backend",
        "Cold time (s)",
        "Warm time (s)",
        "Std-dev (s)",
        "Speedup",
    ] {
        let _ = write!(html, "<th>{}</th>", header);
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for record in display_order(group) {
        let rank_class = if record.rank == Some(1) { " class=\"best\"" } else { "" };
        let _ = writeln!(
            html,
            "<tr{}><td>{}</td><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            rank_class,
            fmt_rank(record.rank),
            escape_html(&record.source_url),
            escape_html(&record.name),
            escape_html(&record.backend),
            fmt_seconds(record.cold_time),
            fmt_seconds(record.warm_time),
            fmt_seconds(record.std_dev()),
            fmt_speedup(record.speedup),
        );
    }
    html.push_str("</tbody>\n</table>\n</section>\n");
}

fn render_environment(html: &mut String, data: &BenchData) {
    html.push_str("\n<h2>Runtime Environment</h2>\n");
    if data.benchmark_environment.is_empty() {
        html.push_str("<p>No environment information was recorded.</p>\n");
        return;
    }

    html.push_str("<table class=\"environment\">\n<tbody>\n");
    for (key, value) in &data.benchmark_environment {
        let _ = writeln!(
            html,
            "<tr><th>{}</th><td>{}</td></tr>",
            escape_html(key),
            escape_html(&fmt_value(value))
        );
    }
    html.push_str("</tbody>\n</table>\n");
}

fn render_error_list(html: &mut String, id: &str, title: &str, errors: &[ErrorInfo]) {
    let _ = write!(html, "<div id=\"{}\">\n<h4>{}", id, title);
    headerlink(html, id);
    html.push_str("</h4>\n<dl>\n");
    for error in errors {
        let _ = writeln!(
            html,
            "  <dt>{}: {}</dt>\n  <dd><p>{}</p><pre>{}</pre></dd>",
            escape_html(&error.name),
            escape_html(&error.error_type),
            escape_html(&error.message),
            escape_html(&error.trace)
        );
    }
    html.push_str("</dl>\n</div>\n");
}

fn render_errors(html: &mut String, data: &BenchData) {
    html.push_str("\n<h2>Errors</h2>\n");

    let failing: Vec<&GroupResult> = data
        .benchmark_results
        .iter()
        .filter(|g| g.has_errors())
        .collect();
    if failing.is_empty() {
        html.push_str("<p>No errors.</p>\n");
        return;
    }

    for group in failing {
        let name = escape_html(&group.group_name);
        let anchor = format!("errors-{}", name);
        let _ = write!(html, "<section id=\"{}\">\n<h3>{}", anchor, name);
        headerlink(html, &anchor);
        html.push_str("</h3>\n");

        if !group.import_errors.is_empty() {
            render_error_list(
                html,
                &format!("import-errors-{}", name),
                "Benchmark loading errors",
                &group.import_errors,
            );
        }
        if !group.runtime_errors.is_empty() {
            render_error_list(
                html,
                &format!("runtime-errors-{}", name),
                "Benchmark execution errors",
                &group.runtime_errors,
            );
        }
        html.push_str("</section>\n");
    }
}

/// Exports benchmark results as HTML.
///
/// # Arguments
///
/// * `data` - The benchmark data to render
/// * `links` - Navigation links
/// * `path` - Output file path
pub fn export_html(data: &BenchData, links: &ReportLinks, path: &Path) -> io::Result<()> {
    fs::write(path, render_html(data, links))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::report::MeasurementRecord;
    use tempfile::NamedTempFile;

    fn sample() -> BenchData {
        let mut group = GroupResult::new("pairwise", "suites/pairwise");
        group.records.push(MeasurementRecord {
            cold_time: Some(1.5),
            warm_time: Some(0.25),
            all_warm_times: vec![0.25, 0.35],
            rank: Some(1),
            speedup: Some(4.0),
            ..MeasurementRecord::new(
                "pairwise<simd>",
                "suites/pairwise/pairwise_simd.rs",
                "vectorized",
            )
        });
        group.records.push(MeasurementRecord::new(
            "pairwise_loops",
            "suites/pairwise/pairwise_naive.rs",
            "plain",
        ));
        group.import_errors.push(ErrorInfo::import(
            "pairwise_opencl",
            &LoadError::missing_dependency("OpenCL"),
        ));

        let mut data = BenchData::default();
        data.benchmark_environment
            .insert("os".to_string(), serde_json::json!("linux"));
        data.benchmark_results.push(group);
        data
    }

    #[test]
    fn test_render_contains_sections() {
        let links = ReportLinks {
            repository: Some("https://example.org/numbench".to_string()),
            about: None,
        };
        let html = render_html(&sample(), &links);

        assert!(html.contains("<h1>Numerical Benchmark Results</h1>"));
        assert!(html.contains("href=\"https://example.org/numbench\""));
        assert!(html.contains("href=\"benchmark_results.json\""));
        assert!(!html.contains(">About<"));
        assert!(html.contains("id=\"results-pairwise\""));
        assert!(html.contains("href=\"suites/pairwise\""));
        assert!(html.contains("<h2>Runtime Environment</h2>"));
        assert!(html.contains("Benchmark loading errors"));
        assert!(html.contains("pairwise_opencl: MissingDependency"));
        assert!(!html.contains("Benchmark execution errors"));
    }

    #[test]
    fn test_missing_values_render_as_not_applicable() {
        let html = render_html(&sample(), &ReportLinks::default());
        assert!(html.contains("<td>N/A</td><td><a href=\"suites/pairwise/pairwise_naive.rs\">"));
        assert!(html.contains("<td>4.00x</td>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render_html(&sample(), &ReportLinks::default());
        assert!(html.contains("pairwise&lt;simd&gt;"));
        assert!(!html.contains("pairwise<simd>"));
        assert_eq!(escape_html("a & \"b\" 'c'"), "a &amp; &quot;b&quot; &#39;c&#39;");
    }

    #[test]
    fn test_render_is_deterministic() {
        let data = sample();
        assert_eq!(
            render_html(&data, &ReportLinks::default()),
            render_html(&data, &ReportLinks::default())
        );
    }

    #[test]
    fn test_export_html() {
        let temp = NamedTempFile::new().unwrap();
        export_html(&BenchData::default(), &ReportLinks::default(), temp.path()).unwrap();

        let content = fs::read_to_string(temp.path()).unwrap();
        assert!(content.contains("<p>No errors.</p>"));
        assert!(content.contains("No environment information"));
    }
}
