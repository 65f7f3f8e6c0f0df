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

//! Benchmark entries and the modules that provide them.
//!
//! A *module* is one backend's implementation of a group's kernel, named
//! `<group>_<backend>` (e.g. `pairwise_rayon`). It owns a loader that either
//! returns the module's entries or explains why the backend is unavailable.
//! An *entry* is a single named callable to be timed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hint::black_box;

use crate::core::fixture::Fixture;
use crate::core::measurement::{time_call, CallOutcome};
use crate::error::{BoxError, LoadError};

/// Implementation strategy of a benchmark.
///
/// Drives the default warm-up policy: [`BackendKind::Plain`] code has no
/// one-time compilation cost, so it is timed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Straightforward reference code without a backend wrapper.
    Plain,
    /// Whole-array or SIMD formulation.
    Vectorized,
    /// Multi-threaded CPU implementation.
    Parallel,
    /// Code compiled at runtime before its first call.
    Jit,
    /// Work submitted to a GPU or other accelerator.
    Gpu,
    /// Expression graph compiled by a symbolic tensor library.
    Symbolic,
    /// Ahead-of-time compiled native code.
    Native,
    /// Anything else.
    Other,
}

impl BackendKind {
    /// Returns the backend kind as a string.
    pub fn as_str(&self) -> &str {
        match self {
            BackendKind::Plain => "plain",
            BackendKind::Vectorized => "vectorized",
            BackendKind::Parallel => "parallel",
            BackendKind::Jit => "jit",
            BackendKind::Gpu => "gpu",
            BackendKind::Symbolic => "symbolic",
            BackendKind::Native => "native",
            BackendKind::Other => "other",
        }
    }

    /// Infers the backend kind from a module's backend suffix.
    pub fn infer(suffix: &str) -> Self {
        let lower = suffix.to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| lower.contains(k));

        if has(&["naive", "plain", "python", "reference", "loops"]) {
            BackendKind::Plain
        } else if has(&["opencl", "cuda", "wgpu", "gpu", "vulkan", "metal"]) {
            BackendKind::Gpu
        } else if has(&["jit", "numba", "cranelift", "llvm", "parakeet"]) {
            BackendKind::Jit
        } else if has(&["theano", "symbolic", "graph", "tensor"]) {
            BackendKind::Symbolic
        } else if has(&["rayon", "parallel", "threads", "omp"]) {
            BackendKind::Parallel
        } else if has(&["numpy", "ndarray", "simd", "vector", "iter"]) {
            BackendKind::Vectorized
        } else if has(&["native", "pythran", "cython", "aot"]) {
            BackendKind::Native
        } else {
            BackendKind::Other
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type SharedFn<A> = Box<dyn Fn(&Fixture<A>) -> Result<(), BoxError>>;
type MutatingFn<A> = Box<dyn Fn(&mut Fixture<A>) -> Result<(), BoxError>>;

enum Invocation<A> {
    Shared(SharedFn<A>),
    Mutating(MutatingFn<A>),
}

/// A single named benchmark callable.
pub struct BenchmarkEntry<A> {
    name: String,
    backend: Option<BackendKind>,
    source: Option<String>,
    invocation: Invocation<A>,
}

impl<A: 'static> BenchmarkEntry<A> {
    /// Creates an entry from a fallible callable.
    ///
    /// The callable's output is passed through [`black_box`] so the
    /// optimizer cannot discard the work.
    pub fn new<F, T, E>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Fixture<A>) -> Result<T, E> + 'static,
        E: Into<BoxError>,
    {
        Self::from_invocation(
            name,
            Invocation::Shared(Box::new(move |fixture| {
                black_box(f(fixture).map_err(Into::<BoxError>::into)?);
                Ok(())
            })),
        )
    }

    /// Creates an entry from a callable that cannot fail.
    pub fn infallible<F, T>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Fixture<A>) -> T + 'static,
    {
        Self::from_invocation(
            name,
            Invocation::Shared(Box::new(move |fixture| {
                black_box(f(fixture));
                Ok(())
            })),
        )
    }

    /// Creates an entry whose callable writes to its input.
    ///
    /// Each timed call receives a fresh clone of the group fixture, so
    /// sibling benchmarks and later samples always see the original data.
    /// Cloning happens outside the timed region.
    pub fn mutating<F, T, E>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Fixture<A>) -> Result<T, E> + 'static,
        E: Into<BoxError>,
    {
        Self::from_invocation(
            name,
            Invocation::Mutating(Box::new(move |fixture| {
                black_box(f(fixture).map_err(Into::<BoxError>::into)?);
                Ok(())
            })),
        )
    }

    fn from_invocation(name: impl Into<String>, invocation: Invocation<A>) -> Self {
        Self {
            name: name.into(),
            backend: None,
            source: None,
            invocation,
        }
    }
}

impl<A> BenchmarkEntry<A> {
    /// Overrides the backend kind inherited from the module.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Sets the source location shown in reports.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the entry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the backend kind set on the entry, if any.
    pub fn backend(&self) -> Option<BackendKind> {
        self.backend
    }

    /// Returns the source location set on the entry, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns whether the callable needs a private copy of the fixture.
    pub fn mutates_input(&self) -> bool {
        matches!(self.invocation, Invocation::Mutating(_))
    }
}

impl<A: Clone> BenchmarkEntry<A> {
    /// Times one call against the shared fixture.
    pub fn call(&self, fixture: &Fixture<A>) -> CallOutcome {
        match &self.invocation {
            Invocation::Shared(f) => time_call(|| f(fixture)),
            Invocation::Mutating(f) => {
                let mut private = fixture.clone();
                time_call(|| f(&mut private))
            }
        }
    }
}

impl<A> fmt::Debug for BenchmarkEntry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkEntry")
            .field("name", &self.name)
            .field("backend", &self.backend)
            .field("source", &self.source)
            .field("mutates_input", &self.mutates_input())
            .finish()
    }
}

/// Loader returning a module's entries, or why its backend is unavailable.
pub type Loader<A> = Box<dyn Fn() -> Result<Vec<BenchmarkEntry<A>>, LoadError>>;

/// One backend's set of benchmarks for a group.
pub struct BenchmarkModule<A> {
    name: String,
    backend: Option<BackendKind>,
    source: Option<String>,
    loader: Loader<A>,
}

impl<A: 'static> BenchmarkModule<A> {
    /// Creates a module from a loader.
    ///
    /// The name must follow the `<group>_<backend>` convention; this is
    /// checked when the registry is discovered.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use numbench::{BenchmarkEntry, BenchmarkModule, LoadError};
    ///
    /// let module: BenchmarkModule<()> = BenchmarkModule::new("gemm_opencl", || {
    ///     Err(LoadError::missing_dependency("OpenCL ICD loader"))
    /// });
    /// ```
    pub fn new<F>(name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<Vec<BenchmarkEntry<A>>, LoadError> + 'static,
    {
        Self {
            name: name.into(),
            backend: None,
            source: None,
            loader: Box::new(loader),
        }
    }
}

impl<A> BenchmarkModule<A> {
    /// Sets the backend kind instead of inferring it from the name.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Sets the source location shown in reports.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the explicit backend kind, if any.
    pub fn backend(&self) -> Option<BackendKind> {
        self.backend
    }

    /// Returns the explicit source location, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Runs the loader.
    pub fn load(&self) -> Result<Vec<BenchmarkEntry<A>>, LoadError> {
        (self.loader)()
    }
}

impl<A> fmt::Debug for BenchmarkModule<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkModule")
            .field("name", &self.name)
            .field("backend", &self.backend)
            .field("source", &self.source)
            .finish()
    }
}

/// Last path segment of a stringified function path.
#[doc(hidden)]
pub fn callable_name(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path).trim()
}

/// Builds an entry from a function, naming it after the function.
///
/// `bench_entry!(path::to::kernel)` wraps an infallible `fn(&Fixture<A>) -> T`;
/// `bench_entry!(fallible path::to::kernel)` wraps a function returning
/// `Result<T, E>`.
///
/// ```no_run
/// use numbench::{bench_entry, BenchmarkEntry, Fixture};
///
/// fn sum_rows(fixture: &Fixture<(Vec<f64>,)>) -> f64 {
///     fixture.args.0.iter().sum()
/// }
///
/// let entry: BenchmarkEntry<(Vec<f64>,)> = bench_entry!(sum_rows);
/// assert_eq!(entry.name(), "sum_rows");
/// ```
#[macro_export]
macro_rules! bench_entry {
    (fallible $($path:ident)::+) => {
        $crate::core::entry::BenchmarkEntry::new(
            $crate::core::entry::callable_name(stringify!($($path)::+)),
            $($path)::+,
        )
    };
    ($($path:ident)::+) => {
        $crate::core::entry::BenchmarkEntry::infallible(
            $crate::core::entry::callable_name(stringify!($($path)::+)),
            $($path)::+,
        )
    };
}
