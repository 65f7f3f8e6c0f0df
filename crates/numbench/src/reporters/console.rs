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

//! Console reporter for benchmark results.
//!
//! Formats and prints benchmark results to the console.

use crate::harness::aggregator::summarize;
use crate::report::{BenchData, GroupResult};
use crate::reporters::{display_order, fmt_rank, fmt_seconds, fmt_speedup};

/// Renders the per-group result tables as plain text.
pub fn render_text(data: &BenchData) -> String {
    let mut out = String::new();

    for group in &data.benchmark_results {
        out.push_str(&render_group(group));
    }
    out
}

fn render_group(group: &GroupResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "=".repeat(80)));
    out.push_str(&format!("GROUP: {}\n", group.group_name));
    out.push_str(&format!("{}\n", "=".repeat(80)));

    if group.records.is_empty() {
        out.push_str("No benchmark was measured.\n");
    } else {
        out.push_str(&format!(
            "{:>4}  {:<32} {:<10} {:>10} {:>10} {:>10}\n",
            "Rank", "Name", "Backend", "Cold (s)", "Warm (s)", "Speedup"
        ));
        out.push_str(&format!("{}\n", "-".repeat(80)));
        for record in display_order(group) {
            out.push_str(&format!(
                "{:>4}  {:<32} {:<10} {:>10} {:>10} {:>10}\n",
                fmt_rank(record.rank),
                record.name,
                record.backend,
                fmt_seconds(record.cold_time),
                fmt_seconds(record.warm_time),
                fmt_speedup(record.speedup)
            ));
        }
    }

    for error in &group.import_errors {
        out.push_str(&format!(
            "  [load error] {}: {}: {}\n",
            error.name, error.error_type, error.message
        ));
    }
    for error in &group.runtime_errors {
        out.push_str(&format!(
            "  [runtime error] {}: {}: {}\n",
            error.name, error.error_type, error.message
        ));
    }
    out
}

/// Prints the full benchmark results to the console.
pub fn print_report(data: &BenchData) {
    print!("{}", render_text(data));
    print_summary(data);
}

/// Prints a one-line summary per group.
pub fn print_summary(data: &BenchData) {
    println!("\n{}", "=".repeat(60));
    println!("SUMMARY");
    println!("{}", "=".repeat(60));
    println!(
        "Groups: {}, measured: {}, errors: {}",
        data.benchmark_results.len(),
        data.measured_count(),
        data.error_count()
    );

    for group in &data.benchmark_results {
        let summary = summarize(group);
        let spread = summary
            .spread
            .map(|s| format!("{:.1}x spread", s))
            .unwrap_or_else(|| "no spread".to_string());
        println!(
            "  {}: {} measured, {} failed to load, {} failed at runtime, fastest: {}, {}, {:.3}s total",
            summary.group_name,
            summary.measured,
            summary.import_failures,
            summary.runtime_failures,
            summary.fastest.as_deref().unwrap_or("N/A"),
            spread,
            summary.total_time
        );
    }
    println!("{}\n", "=".repeat(60));
}
