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

//! Numbench: numerical micro-benchmark harness
//!
//! Compares alternative implementations of the same numeric kernel (plain
//! loops, vectorized code, rayon, JIT or GPU backends) on a shared fixture.
//!
//! ## Features
//!
//! - **Explicit registry**: groups, modules and entries are registered in
//!   code; modules whose backend is unavailable are recorded, not fatal
//! - **Seeded fixtures**: one fixture per group, built from a caller-chosen
//!   seed and shared by every implementation
//! - **Cold/warm timing**: first-call cost reported separately from the best
//!   steady-state sample, with a configurable warm-up policy
//! - **Ranking and speedups** within each group
//! - **Snapshots and reports**: JSON snapshot, HTML, Markdown and console
//!
//! ## Usage
//!
//! ```no_run
//! use numbench::{load_or_run, reporters, BenchConfig, BenchmarkEntry, BenchmarkGroup,
//!     BenchmarkModule, Fixture, Registry};
//!
//! let registry = Registry::new().group(
//!     BenchmarkGroup::with_factory("dot", |_| Fixture::new((vec![1.0f64; 1024],)))
//!         .module(BenchmarkModule::new("dot_naive", || {
//!             Ok(vec![BenchmarkEntry::infallible("dot_loop", |f: &Fixture<(Vec<f64>,)>| {
//!                 f.args.0.iter().map(|x| x * x).sum::<f64>()
//!             })])
//!         })),
//! );
//!
//! let config = BenchConfig::default();
//! let data = load_or_run(&registry, &config).unwrap();
//! reporters::export_all(&data, &config).unwrap();
//! ```

pub mod calibration;
pub mod core;
pub mod environment;
pub mod error;
pub mod harness;
pub mod report;
pub mod reporters;

// Re-export key types for convenience
pub use crate::core::{
    BackendKind, BenchConfig, BenchmarkEntry, BenchmarkGroup, BenchmarkModule, ExportFormat,
    Fixture, Group, Kwargs, Registry, ReportLinks, SpeedupBaseline, WarmupStrategy,
};
pub use error::{BenchError, BoxError, ErrorInfo, ErrorKind, LoadError, Result};
pub use harness::{load_or_run, run_benchmarks, BenchmarkRunner};
pub use report::{BenchData, GroupResult, MeasurementRecord};
