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

//! Built-in calibration suite.
//!
//! A small group of workloads with known behavior, used to check timer
//! resolution and harness overhead on a new machine: a fixed sleep, an
//! empty call, a sequential reduction and a rayon reduction over the same
//! seeded noise.

use rand::Rng;
use rayon::prelude::*;
use std::thread;
use std::time::Duration;

use crate::core::entry::{BackendKind, BenchmarkEntry, BenchmarkModule};
use crate::core::fixture::Fixture;
use crate::core::group::BenchmarkGroup;
use crate::core::registry::Registry;

/// Name of the calibration group.
pub const GROUP_NAME: &str = "calibration";

/// Number of samples in the calibration fixture.
pub const NOISE_LEN: usize = 1 << 16;

/// Duration of the sleep workload.
pub const SLEEP: Duration = Duration::from_millis(2);

/// Fixture arguments: uniform noise in `[-1, 1)`.
pub type Noise = (Vec<f64>,);

fn sleep(_: &Fixture<Noise>) {
    thread::sleep(SLEEP);
}

fn noop(fixture: &Fixture<Noise>) -> usize {
    fixture.args.0.len()
}

fn sequential_sum(fixture: &Fixture<Noise>) -> f64 {
    fixture.args.0.iter().sum()
}

fn sum_of_squares(fixture: &Fixture<Noise>) -> f64 {
    fixture.args.0.iter().map(|x| x * x).sum()
}

fn parallel_sum(fixture: &Fixture<Noise>) -> f64 {
    fixture.args.0.par_iter().sum()
}

/// Builds the calibration group.
pub fn group() -> BenchmarkGroup<Noise> {
    BenchmarkGroup::with_factory(GROUP_NAME, |rng| {
        let noise: Vec<f64> = (0..NOISE_LEN).map(|_| rng.gen_range(-1.0..1.0)).collect();
        Fixture::new((noise,))
            .with_kwarg("n", NOISE_LEN as u64)
            .with_kwarg("sleep_ms", SLEEP.as_millis() as u64)
    })
    .describe("Timer resolution and harness overhead checks")
    .module(
        BenchmarkModule::new("calibration_rayon", || {
            Ok(vec![crate::bench_entry!(parallel_sum)])
        })
        .with_source("crates/numbench/src/calibration.rs"),
    )
    .module(
        BenchmarkModule::new("calibration_sleep", || {
            Ok(vec![crate::bench_entry!(sleep), crate::bench_entry!(noop)])
        })
        .with_backend(BackendKind::Plain)
        .with_source("crates/numbench/src/calibration.rs"),
    )
    .module(
        BenchmarkModule::new("calibration_spin", || {
            Ok(vec![
                crate::bench_entry!(sequential_sum),
                BenchmarkEntry::infallible("sum_of_squares", sum_of_squares)
                    .with_backend(BackendKind::Vectorized),
            ])
        })
        .with_backend(BackendKind::Native)
        .with_source("crates/numbench/src/calibration.rs"),
    )
}

/// Registry containing only the calibration group.
pub fn registry() -> Registry {
    Registry::new().group(group())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BenchConfig;
    use crate::harness::runner::run_benchmarks;

    #[test]
    fn test_registry_is_valid() {
        assert!(registry().validate().is_ok());
    }

    #[test]
    fn test_calibration_run() {
        let config = BenchConfig::default().with_runs(2).with_seed(3);
        let data = run_benchmarks(&registry(), &config).unwrap();

        let group = data.group(GROUP_NAME).unwrap();
        let names: Vec<_> = group.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["parallel_sum", "sleep", "noop", "sequential_sum", "sum_of_squares"]
        );
        assert!(group.runtime_errors.is_empty());
        assert!(group.import_errors.is_empty());

        let sleep = group.records.iter().find(|r| r.name == "sleep").unwrap();
        assert!(sleep.cold_time.unwrap() >= SLEEP.as_secs_f64());
        assert_eq!(sleep.backend, "plain");
        assert_eq!(sleep.all_warm_times.len(), 1);

        let squares = group.records.iter().find(|r| r.name == "sum_of_squares").unwrap();
        assert_eq!(squares.backend, "vectorized");

        let mut ranks: Vec<_> = group.records.iter().filter_map(|r| r.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert_eq!(group.fixture["n"], NOISE_LEN as u64);
    }
}
