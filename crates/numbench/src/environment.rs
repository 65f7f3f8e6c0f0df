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

//! Runtime environment capture.
//!
//! Records what a run was executed on and with which settings, so a report
//! rendered later from the snapshot still says where its numbers came from.

use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::core::config::BenchConfig;

/// Harness version recorded in every snapshot.
pub const HARNESS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Captures host information and run settings.
pub fn capture(config: &BenchConfig) -> BTreeMap<String, Value> {
    let parallelism = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    let mut env = BTreeMap::new();
    env.insert("harness".to_string(), json!("numbench"));
    env.insert("harness_version".to_string(), json!(HARNESS_VERSION));
    env.insert("os".to_string(), json!(std::env::consts::OS));
    env.insert("os_family".to_string(), json!(std::env::consts::FAMILY));
    env.insert("arch".to_string(), json!(std::env::consts::ARCH));
    env.insert("available_parallelism".to_string(), json!(parallelism));
    env.insert("rayon_threads".to_string(), json!(rayon::current_num_threads()));
    env.insert(
        "timestamp".to_string(),
        json!(chrono::Utc::now().to_rfc3339()),
    );
    env.insert("seed".to_string(), json!(config.seed));
    env.insert("n_runs".to_string(), json!(config.n_runs));
    env.insert("warmup".to_string(), json!(config.warmup.to_string()));
    env.insert(
        "speedup_baseline".to_string(),
        json!(config.speedup_baseline.to_string()),
    );
    env.insert(
        "slow_threshold_secs".to_string(),
        json!(config.slow_threshold.as_secs_f64()),
    );
    env.insert("fail_fast".to_string(), json!(config.fail_fast));
    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WarmupStrategy;

    #[test]
    fn test_capture_records_settings() {
        let config = BenchConfig::default()
            .with_seed(42)
            .with_runs(3)
            .with_warmup(WarmupStrategy::TimingRatio(1.5));
        let env = capture(&config);

        assert_eq!(env["seed"], json!(42));
        assert_eq!(env["n_runs"], json!(3));
        assert_eq!(env["warmup"], json!("ratio:1.5"));
        assert_eq!(env["speedup_baseline"], json!("slowest"));
        assert_eq!(env["os"], json!(std::env::consts::OS));
        assert!(env["available_parallelism"].as_u64().unwrap() >= 1);
        assert!(chrono::DateTime::parse_from_rfc3339(env["timestamp"].as_str().unwrap()).is_ok());
    }
}
