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

//! Cold/warm sampling policy.
//!
//! The first call of an entry is its cold time. Whether more calls follow
//! depends on the [`WarmupStrategy`], the configured number of runs and the
//! slow threshold. The warm time is the minimum sample.

use std::time::Duration;

use tracing::trace;

use crate::core::config::{TimerSettings, WarmupStrategy};
use crate::core::entry::BackendKind;
use crate::core::measurement::{CallOutcome, Failure};

/// Samples collected for one entry, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    /// First call.
    pub cold: f64,
    /// Warm samples in call order; `[cold]` when no warm sampling happened.
    pub samples: Vec<f64>,
    /// Whether any call after the cold one was made.
    pub sampled: bool,
}

impl Timing {
    /// Minimum sample.
    pub fn warm(&self) -> f64 {
        self.samples.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

fn seconds(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64()
}

/// Times an entry according to `settings`.
///
/// `call` performs one timed invocation. The first failing call ends
/// measurement; no retries are attempted.
pub fn measure<F>(
    backend: BackendKind,
    settings: &TimerSettings,
    mut call: F,
) -> Result<Timing, Failure>
where
    F: FnMut() -> CallOutcome,
{
    let cold_outcome = call();
    cold_outcome.result?;
    let cold = seconds(cold_outcome.elapsed);

    let threshold = seconds(settings.slow_threshold);
    if settings.n_runs <= 1 || !settings.warmup.samples(backend) || cold > threshold {
        return Ok(Timing {
            cold,
            samples: vec![cold],
            sampled: false,
        });
    }

    let mut samples = Vec::with_capacity(settings.n_runs - 1);

    for run in 1..settings.n_runs {
        let outcome = call();
        outcome.result?;
        let sample = seconds(outcome.elapsed);
        samples.push(sample);
        trace!("run {}: {:.6}s", run, sample);

        if let WarmupStrategy::TimingRatio(ratio) = settings.warmup {
            if samples.len() == 1 && sample > 0.0 && cold / sample < ratio {
                break;
            }
        }
        if sample > threshold {
            break;
        }
    }

    Ok(Timing {
        cold,
        samples,
        sampled: true,
    })
}
