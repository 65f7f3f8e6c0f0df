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

//! Benchmark discovery.
//!
//! Walks the registry in registration order, applies the group and backend
//! filters and loads each selected module. A module that fails to load is
//! recorded on its group; a malformed registry aborts discovery.

use tracing::{debug, info};

use crate::core::config::BenchConfig;
use crate::core::group::{Group, LoadedGroup};
use crate::core::registry::Registry;
use crate::error::{BenchError, Result};

/// Checks the registry and the group filter without loading any module.
///
/// # Errors
///
/// Returns [`BenchError::Configuration`] for a malformed registry and for
/// group filters that match no registered group.
pub fn check_selection(registry: &Registry, config: &BenchConfig) -> Result<()> {
    registry.validate()?;

    for name in &config.groups {
        if registry.get(name).is_none() {
            return Err(BenchError::configuration(name, "unknown benchmark group"));
        }
    }
    Ok(())
}

/// Discovers the groups selected by `config`.
///
/// # Errors
///
/// Returns [`BenchError::Configuration`] for naming violations, entries
/// without a name, and group filters that match no registered group.
pub fn discover<'r>(
    registry: &'r Registry,
    config: &BenchConfig,
) -> Result<Vec<LoadedGroup<'r>>> {
    check_selection(registry, config)?;

    let accept = |backend: &str| config.selects_backend(backend);
    let mut discovered = Vec::new();

    for group in registry.groups() {
        if !config.selects_group(group.name()) {
            debug!("Skipping group {}", group.name());
            continue;
        }

        let loaded = group.load(&config.group_source_url(group.name()), &accept)?;
        info!(
            "Discovered {} benchmarks in group {} ({} modules failed to load)",
            loaded.entries.len(),
            loaded.name,
            loaded.import_errors.len()
        );
        discovered.push(loaded);
    }

    Ok(discovered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::{BenchmarkEntry, BenchmarkModule};
    use crate::core::fixture::Fixture;
    use crate::core::group::BenchmarkGroup;
    use crate::error::LoadError;

    fn registry() -> Registry {
        let ok = |name: &'static str| {
            BenchmarkModule::new(name, move || {
                Ok(vec![BenchmarkEntry::infallible(name, |_: &Fixture<()>| ())])
            })
        };
        Registry::new()
            .group(
                BenchmarkGroup::new("gemm")
                    .module(ok("gemm_rayon"))
                    .module(ok("gemm_naive")),
            )
            .group(BenchmarkGroup::new("julia").module(BenchmarkModule::new(
                "julia_cuda",
                || Err(LoadError::missing_dependency("cuda")),
            )))
    }

    #[test]
    fn test_discovers_in_registration_order() {
        let registry = registry();
        let groups = discover(&registry, &BenchConfig::default()).unwrap();

        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["gemm", "julia"]);

        let entries: Vec<_> = groups[0].entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(entries, vec!["gemm_naive", "gemm_rayon"]);
        assert_eq!(groups[0].source_url, "suites/gemm");

        assert!(groups[1].entries.is_empty());
        assert_eq!(groups[1].import_errors.len(), 1);
    }

    #[test]
    fn test_group_and_backend_filters() {
        let registry = registry();
        let config = BenchConfig::default().with_group("gemm").with_backend("naive");
        let groups = discover(&registry, &config).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].entries.len(), 1);
        assert_eq!(groups[0].entries[0].module, "gemm_naive");
    }

    #[test]
    fn test_unknown_backend_selects_nothing() {
        let registry = registry();
        let config = BenchConfig::default().with_backend("fortran");
        let groups = discover(&registry, &config).unwrap();

        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.entries.is_empty()));
        assert!(groups.iter().all(|g| g.import_errors.is_empty()));
    }

    #[test]
    fn test_unknown_group_is_configuration_error() {
        let registry = registry();
        let config = BenchConfig::default().with_group("growcut");
        let err = discover(&registry, &config).unwrap_err();
        assert!(err.is_configuration());
    }
}
