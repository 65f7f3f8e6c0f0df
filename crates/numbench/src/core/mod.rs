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

//! Core benchmark infrastructure.
//!
//! Provides configuration, timing primitives, fixtures and the typed
//! registry of benchmark groups, modules and entries.
//!
//! # Modules
//!
//! - `config`: Run settings, filters and output locations
//! - `entry`: Benchmark entries, backend kinds and modules
//! - `fixture`: Seeded shared inputs
//! - `group`: Groups and their type-erased loaded form
//! - `measurement`: Single-call timing with error and panic capture
//! - `registry`: Explicit registration and naming checks

pub mod config;
pub mod entry;
pub mod fixture;
pub mod group;
pub mod measurement;
pub mod registry;

pub use config::{
    BenchConfig, ExportFormat, ReportLinks, SpeedupBaseline, TimerSettings, WarmupStrategy,
    DEFAULT_OUTPUT_DIR, DEFAULT_RUNS, DEFAULT_SLOW_THRESHOLD, SNAPSHOT_FILE,
};
pub use entry::{BackendKind, BenchmarkEntry, BenchmarkModule, Loader};
pub use fixture::{build_fixture, seeded_rng, Fixture, FixtureFactory, Kwargs};
pub use group::{BenchmarkGroup, BoundGroup, EntryInfo, Group, LoadedGroup, ModuleInfo};
pub use measurement::{
    catch_failure, compute_statistics, time_call, CallOutcome, CapturedPanic, Failure,
    Statistics,
};
pub use registry::Registry;
