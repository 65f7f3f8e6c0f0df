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

//! List command - show groups and modules without loading them

use colored::Colorize;
use numbench::harness::check_selection;
use numbench::{BenchConfig, BenchError, Group, Registry};
use serde_json::{json, Value};

use crate::error::CliError;

/// A module as shown by `numbench list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedModule {
    /// Module name.
    pub name: String,
    /// Backend suffix.
    pub backend: String,
    /// Backend kind.
    pub kind: String,
}

/// A group as shown by `numbench list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedGroup {
    /// Group name.
    pub name: String,
    /// Group description.
    pub description: Option<String>,
    /// Whether the group builds a fixture.
    pub has_fixture: bool,
    /// Modules passing the backend filter.
    pub modules: Vec<ListedModule>,
}

impl ListedGroup {
    fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "has_fixture": self.has_fixture,
            "modules": self.modules.iter().map(|m| json!({
                "name": m.name,
                "backend": m.backend,
                "kind": m.kind,
            })).collect::<Vec<_>>(),
        })
    }
}

/// Collects the groups and modules selected by `config`.
///
/// Module loaders are not run, so unavailable backends are listed too.
///
/// # Errors
///
/// Returns `Err` if the registry is malformed or a group filter names an
/// unknown group.
pub fn render_listing(
    registry: &Registry,
    config: &BenchConfig,
) -> Result<Vec<ListedGroup>, BenchError> {
    check_selection(registry, config)?;

    Ok(registry
        .groups()
        .filter(|group| config.selects_group(group.name()))
        .map(|group| ListedGroup {
            name: group.name().to_string(),
            description: group.description().map(str::to_string),
            has_fixture: group.has_fixture_factory(),
            modules: group
                .modules()
                .into_iter()
                .filter(|m| config.selects_backend(&m.backend))
                .map(|m| ListedModule {
                    name: m.name,
                    backend: m.backend,
                    kind: m.kind.to_string(),
                })
                .collect(),
        })
        .collect())
}

/// Prints the listing to stdout, as text or JSON.
pub fn list(registry: &Registry, config: &BenchConfig, json: bool) -> Result<(), CliError> {
    let groups = render_listing(registry, config)?;

    if json {
        let value = Value::Array(groups.iter().map(ListedGroup::to_json).collect());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for group in &groups {
        match &group.description {
            Some(description) => println!("{} - {}", group.name.bold(), description),
            None => println!("{}", group.name.bold()),
        }
        if group.modules.is_empty() {
            println!("  {}", "(no modules)".dimmed());
        }
        for module in &group.modules {
            println!("  {:<32} {}", module.name, module.kind.cyan());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_calibration() {
        let registry = numbench::calibration::registry();
        let groups = render_listing(&registry, &BenchConfig::default()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "calibration");
        assert!(groups[0].has_fixture);
        let names: Vec<_> = groups[0].modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["calibration_rayon", "calibration_sleep", "calibration_spin"]
        );
        assert_eq!(groups[0].modules[0].kind, "parallel");
    }

    #[test]
    fn test_listing_backend_filter() {
        let registry = numbench::calibration::registry();
        let config = BenchConfig::default().with_backend("sleep");
        let groups = render_listing(&registry, &config).unwrap();

        assert_eq!(groups[0].modules.len(), 1);
        assert_eq!(groups[0].modules[0].backend, "sleep");
        assert_eq!(groups[0].modules[0].kind, "plain");
    }

    #[test]
    fn test_listing_unknown_group() {
        let registry = numbench::calibration::registry();
        let config = BenchConfig::default().with_group("gemm");
        assert!(render_listing(&registry, &config).unwrap_err().is_configuration());
    }

    #[test]
    fn test_listing_json_shape() {
        let group = ListedGroup {
            name: "gemm".to_string(),
            description: None,
            has_fixture: false,
            modules: vec![ListedModule {
                name: "gemm_naive".to_string(),
                backend: "naive".to_string(),
                kind: "plain".to_string(),
            }],
        };
        let value = group.to_json();
        assert_eq!(value["name"], "gemm");
        assert_eq!(value["description"], Value::Null);
        assert_eq!(value["modules"][0]["kind"], "plain");
    }
}
