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

//! Shared benchmark inputs.
//!
//! Every group builds one [`Fixture`] per run and hands the same value to
//! every benchmark in the group. Benchmarks receive it by shared reference;
//! a benchmark that needs to write to its input must be registered with
//! [`BenchmarkEntry::mutating`](crate::core::entry::BenchmarkEntry::mutating),
//! which gives it a private clone before each timed call.
//!
//! Randomness is explicit: factories receive a [`StdRng`] seeded by the
//! runner from the configured seed, never a global generator.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::collections::BTreeMap;

/// Keyword parameters of a fixture, kept sorted for stable reports.
pub type Kwargs = BTreeMap<String, Value>;

/// Factory building a group's fixture from a seeded generator.
pub type FixtureFactory<A> = Box<dyn Fn(&mut StdRng) -> Fixture<A>>;

/// Positional arguments plus keyword parameters shared by a group.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture<A> {
    /// Positional arguments, usually a tuple of arrays and scalars.
    pub args: A,
    /// Named parameters (shapes, scalars, dtype names).
    pub kwargs: Kwargs,
    seed: Option<u64>,
}

impl Fixture<()> {
    /// The fixture used by groups without a factory.
    pub fn empty() -> Self {
        Self::new(())
    }
}

impl<A> Fixture<A> {
    /// Creates a fixture with positional arguments and no keyword parameters.
    pub fn new(args: A) -> Self {
        Self {
            args,
            kwargs: Kwargs::new(),
            seed: None,
        }
    }

    /// Adds a keyword parameter.
    pub fn with_kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    /// Gets a keyword parameter.
    pub fn kwarg(&self, key: &str) -> Option<&Value> {
        self.kwargs.get(key)
    }

    /// Gets a numeric keyword parameter as `f64`.
    pub fn kwarg_f64(&self, key: &str) -> Option<f64> {
        self.kwarg(key).and_then(Value::as_f64)
    }

    /// Gets an integer keyword parameter as `u64`.
    pub fn kwarg_u64(&self, key: &str) -> Option<u64> {
        self.kwarg(key).and_then(Value::as_u64)
    }

    /// Seed the fixture was generated from, if the runner built it.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub(crate) fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Creates the generator handed to fixture factories.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Builds a group fixture the way the runner does.
pub fn build_fixture<A>(factory: &FixtureFactory<A>, seed: u64) -> Fixture<A> {
    let mut rng = seeded_rng(seed);
    factory(&mut rng).seeded(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn normal_matrix(rows: usize, cols: usize) -> FixtureFactory<(Vec<f64>,)> {
        Box::new(move |rng: &mut StdRng| {
            let data = (0..rows * cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
            Fixture::new((data,))
                .with_kwarg("rows", rows as u64)
                .with_kwarg("cols", cols as u64)
        })
    }

    #[test]
    fn test_empty_fixture() {
        let fixture = Fixture::empty();
        assert!(fixture.kwargs.is_empty());
        assert_eq!(fixture.seed(), None);
    }

    #[test]
    fn test_kwargs() {
        let fixture = Fixture::new((5,))
            .with_kwarg("alpha", 1.5)
            .with_kwarg("dtype", "f64")
            .with_kwarg("n", 512u64);

        assert_eq!(fixture.args, (5,));
        assert_eq!(fixture.kwarg_f64("alpha"), Some(1.5));
        assert_eq!(fixture.kwarg_u64("n"), Some(512));
        assert_eq!(fixture.kwarg("dtype").and_then(Value::as_str), Some("f64"));
        assert!(fixture.kwarg("beta").is_none());
    }

    #[test]
    fn test_same_seed_same_fixture() {
        let factory = normal_matrix(4, 3);
        let a = build_fixture(&factory, 42);
        let b = build_fixture(&factory, 42);
        let c = build_fixture(&factory, 43);

        assert_eq!(a, b);
        assert_ne!(a.args, c.args);
        assert_eq!(a.seed(), Some(42));
        assert_eq!(a.args.0.len(), 12);
    }
}
