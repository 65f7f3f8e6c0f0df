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

//! Benchmark groups.
//!
//! A [`BenchmarkGroup`] ties a fixture factory to the modules implementing
//! one kernel. Groups are generic over their fixture's argument type, so the
//! registry stores them behind the object-safe [`Group`] trait. Loading a
//! group yields a [`LoadedGroup`]: the entries that loaded, the modules that
//! did not, and a handle that builds the fixture and times entries.

use tracing::{debug, error};

use crate::core::entry::{BackendKind, BenchmarkEntry, BenchmarkModule};
use crate::core::fixture::{build_fixture, Fixture, FixtureFactory, Kwargs};
use crate::core::measurement::{catch_failure, CallOutcome, Failure};
use crate::error::{BenchError, ErrorInfo, ErrorKind, Result};
use rand::rngs::StdRng;

/// Static description of a module, available without loading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Full module name, `<group>_<backend>`.
    pub name: String,
    /// Backend suffix of the name.
    pub backend: String,
    /// Backend kind, explicit or inferred from the suffix.
    pub kind: BackendKind,
    /// Source location shown in reports.
    pub source: Option<String>,
}

/// Description of an entry that loaded successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Entry name.
    pub name: String,
    /// Module the entry came from.
    pub module: String,
    /// Effective backend kind.
    pub backend: BackendKind,
    /// Source location shown in reports.
    pub source_location: String,
}

/// Object-safe view of a group, independent of its fixture type.
pub trait Group {
    /// Group name.
    fn name(&self) -> &str;

    /// Optional one-line description of the kernel.
    fn description(&self) -> Option<&str>;

    /// Whether the group was registered with a fixture factory.
    fn has_fixture_factory(&self) -> bool;

    /// Modules in discovery order (sorted by name).
    fn modules(&self) -> Vec<ModuleInfo>;

    /// Loads every module whose backend passes `accept`.
    ///
    /// Load failures are recorded in the result; only malformed entries
    /// produce an error.
    fn load<'a>(
        &'a self,
        source_url: &str,
        accept: &dyn Fn(&str) -> bool,
    ) -> Result<LoadedGroup<'a>>;
}

/// A group after discovery.
pub struct LoadedGroup<'a> {
    /// Group name.
    pub name: String,
    /// Group description.
    pub description: Option<String>,
    /// Link to the group's source.
    pub source_url: String,
    /// Entries in discovery order.
    pub entries: Vec<EntryInfo>,
    /// Modules that failed to load.
    pub import_errors: Vec<ErrorInfo>,
    prepared: Box<dyn PreparedGroup + 'a>,
}

impl<'a> LoadedGroup<'a> {
    /// Builds the group fixture once and returns a handle for timing entries.
    pub fn bind(&self, seed: u64) -> Box<dyn BoundGroup + '_> {
        self.prepared.bind(seed)
    }
}

impl std::fmt::Debug for LoadedGroup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedGroup")
            .field("name", &self.name)
            .field("source_url", &self.source_url)
            .field("entries", &self.entries)
            .field("import_errors", &self.import_errors)
            .finish()
    }
}

/// Loaded entries waiting for a fixture.
pub trait PreparedGroup {
    /// Invokes the fixture factory with a generator seeded from `seed`.
    fn bind(&self, seed: u64) -> Box<dyn BoundGroup + '_>;
}

/// Loaded entries together with their fixture.
pub trait BoundGroup {
    /// Times one call of the entry at `index`.
    fn call(&self, index: usize) -> CallOutcome;

    /// Keyword parameters of the fixture.
    fn kwargs(&self) -> &Kwargs;

    /// Seed the fixture was built from.
    fn seed(&self) -> Option<u64>;
}

struct Prepared<'a, A> {
    factory: &'a FixtureFactory<A>,
    entries: Vec<BenchmarkEntry<A>>,
}

impl<'a, A: Clone + 'static> PreparedGroup for Prepared<'a, A> {
    fn bind(&self, seed: u64) -> Box<dyn BoundGroup + '_> {
        Box::new(Bound {
            fixture: build_fixture(self.factory, seed),
            entries: &self.entries,
        })
    }
}

struct Bound<'b, A> {
    fixture: Fixture<A>,
    entries: &'b [BenchmarkEntry<A>],
}

impl<A: Clone> BoundGroup for Bound<'_, A> {
    fn call(&self, index: usize) -> CallOutcome {
        match self.entries.get(index) {
            Some(entry) => entry.call(&self.fixture),
            None => CallOutcome {
                elapsed: std::time::Duration::ZERO,
                result: Err(Failure::Error(
                    format!("no benchmark entry at index {}", index).into(),
                )),
            },
        }
    }

    fn kwargs(&self) -> &Kwargs {
        &self.fixture.kwargs
    }

    fn seed(&self) -> Option<u64> {
        self.fixture.seed()
    }
}

/// Module name minus the `<group>_` prefix.
///
/// ```
/// use numbench::core::group::backend_suffix;
///
/// assert_eq!(backend_suffix("gemm", "gemm_opencl"), "opencl");
/// assert_eq!(backend_suffix("gemm", "other"), "other");
/// ```
pub fn backend_suffix<'m>(group: &str, module_name: &'m str) -> &'m str {
    module_name
        .strip_prefix(group)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(module_name)
}

/// One numeric kernel and its alternative implementations.
///
/// # Example
///
/// ```no_run
/// use numbench::{BenchmarkEntry, BenchmarkGroup, BenchmarkModule, Fixture};
/// use rand::Rng;
///
/// let group = BenchmarkGroup::with_factory("pairwise", |rng| {
///     let data: Vec<f64> = (0..300 * 150).map(|_| rng.gen::<f64>()).collect();
///     Fixture::new((data,)).with_kwarg("rows", 300).with_kwarg("cols", 150)
/// })
/// .describe("Euclidean distance between each pair of rows")
/// .module(BenchmarkModule::new("pairwise_naive", || {
///     Ok(vec![BenchmarkEntry::infallible("pairwise_nested_loops", |f: &Fixture<(Vec<f64>,)>| {
///         f.args.0.len()
///     })])
/// }));
/// ```
pub struct BenchmarkGroup<A> {
    name: String,
    description: Option<String>,
    factory: FixtureFactory<A>,
    explicit_factory: bool,
    modules: Vec<BenchmarkModule<A>>,
}

impl BenchmarkGroup<()> {
    /// Creates a group without a fixture factory; benchmarks receive an
    /// empty fixture.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            factory: Box::new(|_| Fixture::empty()),
            explicit_factory: false,
            modules: Vec::new(),
        }
    }
}

impl<A: Clone + 'static> BenchmarkGroup<A> {
    /// Creates a group whose fixture is built by `factory`.
    pub fn with_factory<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&mut StdRng) -> Fixture<A> + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            factory: Box::new(factory),
            explicit_factory: true,
            modules: Vec::new(),
        }
    }

    /// Sets the group description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a module.
    pub fn module(mut self, module: BenchmarkModule<A>) -> Self {
        self.modules.push(module);
        self
    }

    fn sorted_modules(&self) -> Vec<&BenchmarkModule<A>> {
        let mut modules: Vec<_> = self.modules.iter().collect();
        modules.sort_by(|a, b| a.name().cmp(b.name()));
        modules
    }

    fn module_info(&self, module: &BenchmarkModule<A>) -> ModuleInfo {
        let backend = backend_suffix(&self.name, module.name()).to_string();
        ModuleInfo {
            name: module.name().to_string(),
            kind: module
                .backend()
                .unwrap_or_else(|| BackendKind::infer(&backend)),
            backend,
            source: module.source().map(str::to_string),
        }
    }
}

impl<A: Clone + 'static> Group for BenchmarkGroup<A> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn has_fixture_factory(&self) -> bool {
        self.explicit_factory
    }

    fn modules(&self) -> Vec<ModuleInfo> {
        self.sorted_modules()
            .into_iter()
            .map(|m| self.module_info(m))
            .collect()
    }

    fn load<'a>(
        &'a self,
        source_url: &str,
        accept: &dyn Fn(&str) -> bool,
    ) -> Result<LoadedGroup<'a>> {
        let mut infos = Vec::new();
        let mut entries = Vec::new();
        let mut import_errors = Vec::new();

        for module in self.sorted_modules() {
            let info = self.module_info(module);
            if !accept(&info.backend) {
                debug!("Skipping {} (backend filter)", info.name);
                continue;
            }

            let loaded = match catch_failure(|| module.load()) {
                Ok(Ok(loaded)) => loaded,
                Ok(Err(load_error)) => {
                    error!("Failed to load {}: {}", info.name, load_error);
                    import_errors.push(ErrorInfo::import(&info.name, &load_error));
                    continue;
                }
                Err(panic) => {
                    error!("Failed to load {}: {}", info.name, panic.message);
                    import_errors.push(
                        ErrorInfo::from_panic(&info.name, ErrorKind::Import, &panic)
                            .in_module(&info.name),
                    );
                    continue;
                }
            };

            let module_source = info
                .source
                .clone()
                .unwrap_or_else(|| format!("{}/{}.rs", source_url, info.name));

            for entry in loaded {
                if entry.name().trim().is_empty() {
                    return Err(BenchError::configuration(
                        &info.name,
                        "benchmark entry has an empty name",
                    ));
                }
                infos.push(EntryInfo {
                    name: entry.name().to_string(),
                    module: info.name.clone(),
                    backend: entry.backend().unwrap_or(info.kind),
                    source_location: entry
                        .source()
                        .map(str::to_string)
                        .unwrap_or_else(|| module_source.clone()),
                });
                entries.push(entry);
            }
        }

        Ok(LoadedGroup {
            name: self.name.clone(),
            description: self.description.clone(),
            source_url: source_url.to_string(),
            entries: infos,
            import_errors,
            prepared: Box::new(Prepared {
                factory: &self.factory,
                entries,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use std::cell::Cell;
    use std::rc::Rc;

    fn accept_all(_: &str) -> bool {
        true
    }

    fn sample_group() -> BenchmarkGroup<(u32,)> {
        BenchmarkGroup::with_factory("square", |_| Fixture::new((5,)).with_kwarg("n", 5))
            .module(BenchmarkModule::new("square_rayon", || {
                Ok(vec![BenchmarkEntry::infallible("par", |f: &Fixture<(u32,)>| {
                    f.args.0 * f.args.0
                })])
            }))
            .module(BenchmarkModule::new("square_naive", || {
                Ok(vec![
                    BenchmarkEntry::infallible("mul", |f: &Fixture<(u32,)>| f.args.0 * f.args.0),
                    BenchmarkEntry::infallible("pow", |f: &Fixture<(u32,)>| f.args.0.pow(2)),
                ])
            }))
            .module(BenchmarkModule::new("square_opencl", || {
                Err(LoadError::missing_dependency("opencl"))
            }))
    }

    #[test]
    fn test_modules_sorted_with_inferred_kind() {
        let modules = sample_group().modules();
        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["square_naive", "square_opencl", "square_rayon"]);
        assert_eq!(modules[0].backend, "naive");
        assert_eq!(modules[0].kind, BackendKind::Plain);
        assert_eq!(modules[1].kind, BackendKind::Gpu);
        assert_eq!(modules[2].kind, BackendKind::Parallel);
    }

    #[test]
    fn test_load_records_import_errors() {
        let group = sample_group();
        let loaded = group.load("suites/square", &accept_all).unwrap();

        let names: Vec<_> = loaded.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["mul", "pow", "par"]);
        assert_eq!(loaded.import_errors.len(), 1);
        assert_eq!(loaded.import_errors[0].name, "square_opencl");
        assert_eq!(
            loaded.entries[0].source_location,
            "suites/square/square_naive.rs"
        );
    }

    #[test]
    fn test_load_applies_backend_filter() {
        let group = sample_group();
        let loaded = group.load("src", &|backend: &str| backend == "rayon").unwrap();

        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries[0].backend, BackendKind::Parallel);
        assert!(loaded.import_errors.is_empty());
    }

    #[test]
    fn test_loader_panic_is_an_import_error() {
        let group: BenchmarkGroup<()> =
            BenchmarkGroup::new("boom").module(BenchmarkModule::new("boom_jit", || {
                panic!("jit backend crashed")
            }));
        let loaded = group.load("src", &accept_all).unwrap();

        assert!(loaded.entries.is_empty());
        assert_eq!(loaded.import_errors[0].error_type, "Panic");
        assert_eq!(loaded.import_errors[0].kind, ErrorKind::Import);
    }

    #[test]
    fn test_empty_entry_name_is_configuration_error() {
        let group: BenchmarkGroup<()> =
            BenchmarkGroup::new("bad").module(BenchmarkModule::new("bad_naive", || {
                Ok(vec![BenchmarkEntry::infallible("  ", |_: &Fixture<()>| ())])
            }));

        let err = group.load("src", &accept_all).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_bind_builds_fixture_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let group = BenchmarkGroup::with_factory("count", move |_| {
            counter.set(counter.get() + 1);
            Fixture::new((1u8,))
        })
        .module(BenchmarkModule::new("count_naive", || {
            Ok(vec![
                BenchmarkEntry::infallible("a", |f: &Fixture<(u8,)>| f.args.0),
                BenchmarkEntry::infallible("b", |f: &Fixture<(u8,)>| f.args.0),
            ])
        }));

        let loaded = group.load("src", &accept_all).unwrap();
        let bound = loaded.bind(7);
        for index in 0..loaded.entries.len() {
            assert!(bound.call(index).result.is_ok());
        }
        assert!(bound.call(99).result.is_err());
        assert_eq!(calls.get(), 1);
        assert_eq!(bound.seed(), Some(7));
    }

    #[test]
    fn test_group_without_factory() {
        let group = BenchmarkGroup::new("plain");
        assert!(!group.has_fixture_factory());
        assert!(sample_group().has_fixture_factory());
    }
}
