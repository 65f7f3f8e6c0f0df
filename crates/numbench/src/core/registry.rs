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

//! Benchmark registry.
//!
//! Groups are registered explicitly at startup instead of being discovered
//! from the file system. The registry checks naming rules once, before any
//! module is loaded, so authoring mistakes fail fast.

use std::collections::HashSet;

use crate::core::group::Group;
use crate::error::{BenchError, Result};

/// Ordered collection of benchmark groups.
///
/// # Example
///
/// ```no_run
/// use numbench::{BenchmarkEntry, BenchmarkGroup, BenchmarkModule, Fixture, Registry};
///
/// let registry = Registry::new().group(
///     BenchmarkGroup::new("noop").module(BenchmarkModule::new("noop_naive", || {
///         Ok(vec![BenchmarkEntry::infallible("nothing", |_: &Fixture<()>| ())])
///     })),
/// );
/// registry.validate().unwrap();
/// ```
#[derive(Default)]
pub struct Registry {
    groups: Vec<Box<dyn Group>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a group.
    pub fn group(mut self, group: impl Group + 'static) -> Self {
        self.groups.push(Box::new(group));
        self
    }

    /// Registers an already boxed group.
    pub fn push(&mut self, group: Box<dyn Group>) {
        self.groups.push(group);
    }

    /// Groups in registration order.
    pub fn groups(&self) -> impl Iterator<Item = &dyn Group> {
        self.groups.iter().map(|g| g.as_ref())
    }

    /// Looks up a group by name.
    pub fn get(&self, name: &str) -> Option<&dyn Group> {
        self.groups().find(|g| g.name() == name)
    }

    /// Number of registered groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no group is registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Checks group and module naming rules.
    pub fn validate(&self) -> Result<()> {
        let mut group_names = HashSet::new();

        for group in self.groups() {
            let name = group.name();
            if !is_identifier(name) {
                return Err(BenchError::configuration(
                    name,
                    "group name must be a non-empty identifier",
                ));
            }
            if !group_names.insert(name) {
                return Err(BenchError::configuration(name, "duplicate group name"));
            }

            let prefix = format!("{}_", name);
            let mut module_names = HashSet::new();
            for module in group.modules() {
                let valid = module
                    .name
                    .strip_prefix(&prefix)
                    .is_some_and(|backend| !backend.is_empty());
                if !valid {
                    return Err(BenchError::configuration(
                        &module.name,
                        format!("module name must follow '{}<backend>'", prefix),
                    ));
                }
                if !module_names.insert(module.name.clone()) {
                    return Err(BenchError::configuration(
                        &module.name,
                        format!("duplicate module name in group '{}'", name),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.groups().map(|g| g.name()))
            .finish()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
