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

//! Benchmark harness.
//!
//! Turns a registry into results: discovery loads the selected modules, the
//! timer samples each entry, the runner drives groups in order and the
//! aggregator ranks what was measured.
//!
//! # Modules
//!
//! - `discovery`: Filtering and module loading
//! - `timer`: Cold/warm sampling policy
//! - `runner`: Group execution and snapshot reuse
//! - `aggregator`: Ranking, speedups and summaries

pub mod aggregator;
pub mod discovery;
pub mod runner;
pub mod timer;

pub use aggregator::{rank_records, summarize, GroupSummary};
pub use discovery::{check_selection, discover};
pub use runner::{load_or_run, run_benchmarks, select_cached, BenchmarkRunner};
pub use timer::{measure, Timing};
