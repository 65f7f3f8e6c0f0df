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

//! Result data model.
//!
//! [`BenchData`] is the root aggregate of a run. It is what the runner
//! produces, what the snapshot stores field for field, and the only input of
//! every reporter.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::core::fixture::Kwargs;
use crate::core::measurement::{compute_statistics, Statistics};
use crate::error::ErrorInfo;

/// Timing and ranking of one benchmark entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Entry name.
    pub name: String,
    /// Source location of the entry.
    pub source_url: String,
    /// Backend kind the entry was timed as.
    pub backend: String,
    /// Module the entry was loaded from.
    #[serde(default)]
    pub module: String,
    /// First call, in seconds.
    pub cold_time: Option<f64>,
    /// Best warm sample, in seconds.
    pub warm_time: Option<f64>,
    /// Every warm sample, in call order.
    #[serde(default)]
    pub all_warm_times: Vec<f64>,
    /// The entry was called once; its only sample is the cold time.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cold_only: bool,
    /// 1-based rank within the group.
    pub rank: Option<usize>,
    /// Speedup against the group baseline.
    pub speedup: Option<f64>,
}

impl MeasurementRecord {
    /// Creates an unranked record.
    pub fn new(
        name: impl Into<String>,
        source_url: impl Into<String>,
        backend: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_url: source_url.into(),
            backend: backend.into(),
            module: String::new(),
            cold_time: None,
            warm_time: None,
            all_warm_times: Vec::new(),
            cold_only: false,
            rank: None,
            speedup: None,
        }
    }

    /// Statistics over the warm samples.
    pub fn statistics(&self) -> Option<Statistics> {
        compute_statistics(&self.all_warm_times)
    }

    /// Standard deviation of the warm samples.
    pub fn std_dev(&self) -> Option<f64> {
        self.statistics().map(|s| s.std_dev)
    }
}

/// Everything recorded for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupResult {
    /// Group name.
    pub group_name: String,
    /// Link to the group's source.
    pub source_url: String,
    /// Group description, if registered with one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keyword parameters of the fixture the group ran with.
    #[serde(default)]
    pub fixture: Kwargs,
    /// Measured entries, in discovery order.
    pub records: Vec<MeasurementRecord>,
    /// Entries that failed while being timed.
    pub runtime_errors: Vec<ErrorInfo>,
    /// Modules that failed to load.
    pub import_errors: Vec<ErrorInfo>,
}

impl GroupResult {
    /// Creates an empty result for a group.
    pub fn new(group_name: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            source_url: source_url.into(),
            description: None,
            fixture: Kwargs::new(),
            records: Vec::new(),
            runtime_errors: Vec::new(),
            import_errors: Vec::new(),
        }
    }

    /// Records sorted by rank; unranked records are left out.
    pub fn ranked(&self) -> Vec<&MeasurementRecord> {
        let mut ranked: Vec<_> = self.records.iter().filter(|r| r.rank.is_some()).collect();
        ranked.sort_by_key(|r| r.rank);
        ranked
    }

    /// Returns true if any module or entry failed.
    pub fn has_errors(&self) -> bool {
        !self.runtime_errors.is_empty() || !self.import_errors.is_empty()
    }
}

/// Root aggregate of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchData {
    /// Per-group results, in registration order.
    pub benchmark_results: Vec<GroupResult>,
    /// Run metadata (versions, platform, settings).
    pub benchmark_environment: BTreeMap<String, Value>,
}

impl BenchData {
    /// Creates an empty aggregate with the given environment.
    pub fn new(benchmark_environment: BTreeMap<String, Value>) -> Self {
        Self {
            benchmark_results: Vec::new(),
            benchmark_environment,
        }
    }

    /// Looks up a group by name.
    pub fn group(&self, name: &str) -> Option<&GroupResult> {
        self.benchmark_results.iter().find(|g| g.group_name == name)
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Total number of measured entries.
    pub fn measured_count(&self) -> usize {
        self.benchmark_results
            .iter()
            .map(|g| g.records.len())
            .sum()
    }

    /// Total number of recorded failures, both kinds.
    pub fn error_count(&self) -> usize {
        self.benchmark_results
            .iter()
            .map(|g| g.runtime_errors.len() + g.import_errors.len())
            .sum()
    }
}
