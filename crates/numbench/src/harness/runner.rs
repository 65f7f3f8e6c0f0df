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

//! Benchmark runner for executing and collecting results.
//!
//! Runs one benchmark at a time, groups in registration order. Each group's
//! fixture is built once, only if the group has something to run.

use tracing::{debug, info, warn};

use crate::core::config::BenchConfig;
use crate::core::group::{backend_suffix, LoadedGroup};
use crate::core::registry::Registry;
use crate::environment;
use crate::error::{BenchError, ErrorInfo, ErrorKind, Result};
use crate::harness::aggregator::rank_records;
use crate::harness::discovery::{check_selection, discover};
use crate::harness::timer::measure;
use crate::report::{BenchData, GroupResult, MeasurementRecord};
use crate::reporters::json::{load_snapshot, save_snapshot};

/// Runner for executing a registry under one configuration.
pub struct BenchmarkRunner<'r> {
    registry: &'r Registry,
    config: BenchConfig,
}

impl<'r> BenchmarkRunner<'r> {
    /// Creates a new benchmark runner.
    pub fn new(registry: &'r Registry, config: BenchConfig) -> Self {
        Self { registry, config }
    }

    /// Returns the runner's configuration.
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Discovers and runs every selected group.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, on a malformed registry, and on the
    /// first runtime failure when fail-fast is enabled.
    pub fn run(&self) -> Result<BenchData> {
        self.config.validate()?;
        let groups = discover(self.registry, &self.config)?;

        let mut data = BenchData::new(environment::capture(&self.config));
        for group in &groups {
            data.benchmark_results.push(self.run_group(group)?);
        }
        Ok(data)
    }

    /// Times every entry of a discovered group and ranks the results.
    pub fn run_group(&self, group: &LoadedGroup<'_>) -> Result<GroupResult> {
        info!("Running benchmark group {}", group.name);

        let mut result = GroupResult::new(&group.name, &group.source_url);
        result.description = group.description.clone();
        result.import_errors = group.import_errors.clone();

        if group.entries.is_empty() {
            debug!("Group {} has no loadable benchmarks", group.name);
            return Ok(result);
        }

        let bound = group.bind(self.config.seed);
        result.fixture = bound.kwargs().clone();
        let settings = self.config.timer_settings();

        for (index, entry) in group.entries.iter().enumerate() {
            info!("Benchmarking {}", entry.name);

            match measure(entry.backend, &settings, || bound.call(index)) {
                Ok(timing) => {
                    let warm = timing.warm();
                    info!(
                        "{}: cold: {:.3}s, warm: {:.3}s",
                        entry.name, timing.cold, warm
                    );
                    result.records.push(MeasurementRecord {
                        module: entry.module.clone(),
                        cold_time: Some(timing.cold),
                        warm_time: Some(warm),
                        all_warm_times: timing.samples,
                        cold_only: !timing.sampled,
                        ..MeasurementRecord::new(
                            &entry.name,
                            &entry.source_location,
                            entry.backend.as_str(),
                        )
                    });
                }
                Err(failure) => {
                    let error = ErrorInfo::from_failure(&entry.name, ErrorKind::Runtime, &failure)
                        .in_module(&entry.module);
                    if self.config.fail_fast {
                        return Err(BenchError::Runtime(error));
                    }
                    warn!("Could not run {}: {}", entry.name, failure.message());
                    debug!("{}", error.trace);
                    result.runtime_errors.push(error);
                }
            }
        }

        rank_records(&mut result.records, self.config.speedup_baseline);
        Ok(result)
    }
}

/// Runs a registry and returns the collected data.
pub fn run_benchmarks(registry: &Registry, config: &BenchConfig) -> Result<BenchData> {
    BenchmarkRunner::new(registry, config.clone()).run()
}

/// Loads the snapshot if one exists, otherwise runs and saves one.
///
/// The configuration and the registry are checked either way. A loaded
/// snapshot is narrowed to the group and backend filters with
/// [`select_cached`]. With `config.force` set the snapshot is ignored and
/// overwritten.
pub fn load_or_run(registry: &Registry, config: &BenchConfig) -> Result<BenchData> {
    config.validate()?;
    check_selection(registry, config)?;

    let path = config.snapshot_path();
    if path.exists() && !config.force {
        info!("Loading bench data from: {}", path.display());
        return Ok(select_cached(load_snapshot(&path)?, config));
    }

    let data = run_benchmarks(registry, config)?;
    info!("Writing bench data to: {}", path.display());
    save_snapshot(&data, &path)?;
    Ok(data)
}

/// Keeps the parts of a loaded snapshot that pass the filters of `config`.
///
/// Groups are dropped by name. With a backend filter, records and errors
/// are kept by the backend suffix of their module and the remaining records
/// are ranked again.
pub fn select_cached(mut data: BenchData, config: &BenchConfig) -> BenchData {
    data.benchmark_results.retain(|group| config.selects_group(&group.group_name));
    if config.backends.is_empty() {
        return data;
    }

    for group in &mut data.benchmark_results {
        let name = group.group_name.clone();
        let keep = |module: &str| config.selects_backend(backend_suffix(&name, module));

        group.records.retain(|r| keep(&r.module));
        group
            .runtime_errors
            .retain(|e| e.module.as_deref().is_some_and(keep));
        group
            .import_errors
            .retain(|e| keep(e.module.as_deref().unwrap_or(&e.name)));
        rank_records(&mut group.records, config.speedup_baseline);
    }
    debug!("Narrowed snapshot to backends {:?}", config.backends);
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{SpeedupBaseline, WarmupStrategy};
    use crate::core::entry::{BenchmarkEntry, BenchmarkModule};
    use crate::core::fixture::Fixture;
    use crate::core::group::BenchmarkGroup;

    fn registry() -> Registry {
        Registry::new().group(
            BenchmarkGroup::with_factory("sum", |_| {
                Fixture::new((vec![1.0f64; 64],)).with_kwarg("n", 64)
            })
            .module(BenchmarkModule::new("sum_naive", || {
                Ok(vec![
                    BenchmarkEntry::infallible("fold", |f: &Fixture<(Vec<f64>,)>| {
                        f.args.0.iter().fold(0.0, |a, b| a + b)
                    }),
                    BenchmarkEntry::new("broken", |_: &Fixture<(Vec<f64>,)>| {
                        Err::<f64, _>("not converged")
                    }),
                ])
            })),
        )
    }

    #[test]
    fn test_runner_records_success_and_failure() {
        let registry = registry();
        let config = BenchConfig::default().with_runs(2);
        let data = BenchmarkRunner::new(&registry, config).run().unwrap();

        let group = data.group("sum").unwrap();
        assert_eq!(group.records.len(), 1);
        assert_eq!(group.records[0].name, "fold");
        assert_eq!(group.records[0].rank, Some(1));
        assert_eq!(group.runtime_errors.len(), 1);
        assert_eq!(group.runtime_errors[0].name, "broken");
        assert_eq!(group.runtime_errors[0].message, "not converged");
        assert_eq!(group.fixture["n"], 64);
        assert!(data.benchmark_environment.contains_key("timestamp"));
    }

    #[test]
    fn test_fail_fast_aborts() {
        let registry = registry();
        let config = BenchConfig::default().with_runs(1).with_fail_fast(true);
        let err = BenchmarkRunner::new(&registry, config).run().unwrap_err();

        match err {
            BenchError::Runtime(info) => assert_eq!(info.name, "broken"),
            other => panic!("Expected runtime error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_running() {
        let registry = registry();
        let config = BenchConfig::default().with_warmup(WarmupStrategy::TimingRatio(1.0));
        assert!(run_benchmarks(&registry, &config).unwrap_err().is_configuration());
    }

    #[test]
    fn test_load_or_run_reuses_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry();
        let config = BenchConfig::default().with_runs(1).with_output_dir(dir.path());

        let first = load_or_run(&registry, &config).unwrap();
        assert!(config.snapshot_path().exists());

        let second = load_or_run(&Registry::new(), &config).unwrap();
        assert_eq!(first, second);

        let forced = load_or_run(&Registry::new(), &config.clone().with_force(true)).unwrap();
        assert!(forced.benchmark_results.is_empty());
    }

    #[test]
    fn test_records_and_errors_carry_their_module() {
        let registry = registry();
        let data = run_benchmarks(&registry, &BenchConfig::default().with_runs(1)).unwrap();
        let group = data.group("sum").unwrap();

        assert_eq!(group.records[0].module, "sum_naive");
        assert_eq!(group.runtime_errors[0].module.as_deref(), Some("sum_naive"));
    }

    #[test]
    fn test_select_cached_narrows_by_backend() {
        let mut group = GroupResult::new("sum", "suites/sum");
        for (name, module, warm) in [
            ("fold", "sum_naive", 0.4),
            ("par", "sum_rayon", 0.1),
            ("simd", "sum_simd", 0.2),
        ] {
            group.records.push(MeasurementRecord {
                module: module.to_string(),
                warm_time: Some(warm),
                ..MeasurementRecord::new(name, "src", "native")
            });
        }
        rank_records(&mut group.records, SpeedupBaseline::Slowest);
        let mut data = BenchData::default();
        data.benchmark_results.push(group);

        let config = BenchConfig::default()
            .with_backend("naive")
            .with_backend("simd");
        let narrowed = select_cached(data, &config);
        let records = &narrowed.benchmark_results[0].records;

        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["fold", "simd"]);
        assert_eq!(records[1].rank, Some(1));
        assert_eq!(records[0].rank, Some(2));
        assert_eq!(records[0].speedup, Some(1.0));
    }
}
