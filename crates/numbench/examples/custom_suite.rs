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

//! Registering a suite of your own.
//!
//! This example demonstrates:
//! - A fixture factory driven by the seeded generator
//! - Several backends of the same kernel, one of them unavailable
//! - Running the suite and exporting every report format
//!
//! Run with:
//! ```bash
//! cargo run --package numbench --example custom_suite
//! ```

use numbench::reporters::export_all;
use numbench::{
    bench_entry, load_or_run, BenchConfig, BenchmarkEntry, BenchmarkGroup, BenchmarkModule,
    ExportFormat, Fixture, LoadError, Registry,
};
use rand::Rng;
use rayon::prelude::*;

const ROWS: usize = 200;
const COLS: usize = 3;

type Points = (Vec<f64>,);

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Nested loops with explicit indexing.
fn pairwise_loops(fixture: &Fixture<Points>) -> Vec<f64> {
    let data = &fixture.args.0;
    let mut out = vec![0.0; ROWS * ROWS];
    for i in 0..ROWS {
        for j in 0..ROWS {
            let mut d = 0.0;
            for k in 0..COLS {
                let diff = data[i * COLS + k] - data[j * COLS + k];
                d += diff * diff;
            }
            out[i * ROWS + j] = d.sqrt();
        }
    }
    out
}

/// Iterator chains over row slices.
fn pairwise_chunks(fixture: &Fixture<Points>) -> Vec<f64> {
    let rows: Vec<&[f64]> = fixture.args.0.chunks(COLS).collect();
    rows.iter()
        .flat_map(|a| rows.iter().map(move |b| distance(a, b)))
        .collect()
}

/// One rayon task per output row.
fn pairwise_par_rows(fixture: &Fixture<Points>) -> Vec<f64> {
    let rows: Vec<&[f64]> = fixture.args.0.chunks(COLS).collect();
    rows.par_iter()
        .flat_map_iter(|a| rows.iter().map(move |b| distance(a, b)))
        .collect()
}

fn registry() -> Registry {
    Registry::new().group(
        BenchmarkGroup::with_factory("pairwise", |rng| {
            let data: Vec<f64> = (0..ROWS * COLS).map(|_| rng.gen::<f64>()).collect();
            Fixture::new((data,))
                .with_kwarg("rows", ROWS as u64)
                .with_kwarg("cols", COLS as u64)
        })
        .describe("Euclidean distance between each pair of rows")
        .module(BenchmarkModule::new("pairwise_naive", || {
            Ok(vec![bench_entry!(pairwise_loops)])
        }))
        .module(BenchmarkModule::new("pairwise_iter", || {
            Ok(vec![bench_entry!(pairwise_chunks)])
        }))
        .module(BenchmarkModule::new("pairwise_rayon", || {
            Ok(vec![BenchmarkEntry::infallible("pairwise_par_rows", pairwise_par_rows)])
        }))
        .module(BenchmarkModule::new("pairwise_opencl", || {
            Err(LoadError::missing_dependency("OpenCL ICD loader"))
        })),
    )
}

fn main() {
    println!("=== Custom Suite Example ===\n");

    let config = BenchConfig::default()
        .with_runs(3)
        .with_seed(7)
        .with_force(true)
        .with_output_dir("target/demo/custom_suite")
        .with_export_formats(vec![
            ExportFormat::Html,
            ExportFormat::Markdown,
            ExportFormat::Console,
        ]);

    let data = load_or_run(&registry(), &config).expect("Failed to run the suite");
    let written = export_all(&data, &config).expect("Failed to export reports");

    println!("\nReports written:");
    for path in written {
        println!("  {}", path.display());
    }
    println!("  {}", config.snapshot_path().display());
}
