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

//! Timing primitives.
//!
//! [`time_call`] runs a single invocation of user code under a wall-clock
//! timer, converting returned errors and panics into a [`Failure`] instead of
//! letting them escape. Sampling policy (cold vs. warm runs) lives in
//! [`crate::harness::timer`]; this module only knows how to time one call.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::time::{Duration, Instant};

use crate::error::BoxError;

/// Why a timed call did not complete successfully.
#[derive(Debug)]
pub enum Failure {
    /// The callable returned an error.
    Error(BoxError),
    /// The callable panicked.
    Panic(CapturedPanic),
}

impl Failure {
    /// Short description used in log lines.
    pub fn message(&self) -> String {
        match self {
            Failure::Error(error) => error.to_string(),
            Failure::Panic(panic) => panic.message.clone(),
        }
    }
}

/// A panic payload together with where it was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPanic {
    /// Panic message, or a placeholder for non-string payloads.
    pub message: String,
    /// `file:line:column` of the panic, when the hook saw it.
    pub location: Option<String>,
    /// Rendered backtrace, when `RUST_BACKTRACE` enabled capture.
    pub backtrace: Option<String>,
}

impl CapturedPanic {
    /// Renders location and backtrace as a single trace string.
    pub fn trace(&self) -> String {
        let mut trace = match &self.location {
            Some(location) => format!("panicked at {}: {}", location, self.message),
            None => format!("panicked: {}", self.message),
        };
        if let Some(backtrace) = &self.backtrace {
            trace.push('\n');
            trace.push_str(backtrace);
        }
        trace
    }
}

/// Result of timing one call.
#[derive(Debug)]
pub struct CallOutcome {
    /// Wall-clock time spent inside the callable.
    pub elapsed: Duration,
    /// Whether the callable succeeded.
    pub result: Result<(), Failure>,
}

struct PanicSite {
    location: Option<String>,
    backtrace: Option<String>,
}

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
    static LAST_PANIC: RefCell<Option<PanicSite>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

/// Installs a process-wide panic hook that records panic sites on threads
/// currently executing benchmark code, and defers to the previous hook
/// everywhere else.
fn install_panic_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CAPTURING.with(Cell::get) {
                let backtrace = Backtrace::capture();
                let site = PanicSite {
                    location: info
                        .location()
                        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column())),
                    backtrace: (backtrace.status() == BacktraceStatus::Captured)
                        .then(|| backtrace.to_string()),
                };
                LAST_PANIC.with(|slot| *slot.borrow_mut() = Some(site));
            } else {
                previous(info);
            }
        }));
    });
}

/// Marks the current thread as running user code until dropped.
struct CaptureGuard;

impl CaptureGuard {
    fn arm() -> Self {
        install_panic_hook();
        LAST_PANIC.with(|slot| slot.borrow_mut().take());
        CAPTURING.with(|flag| flag.set(true));
        CaptureGuard
    }

    fn into_panic(self, payload: Box<dyn Any + Send>) -> CapturedPanic {
        let site = LAST_PANIC.with(|slot| slot.borrow_mut().take());
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        CapturedPanic {
            message,
            location: site.as_ref().and_then(|s| s.location.clone()),
            backtrace: site.and_then(|s| s.backtrace),
        }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        CAPTURING.with(|flag| flag.set(false));
    }
}

/// Runs `f` once, catching panics, without timing it.
///
/// Used for module loaders, which must not abort discovery when they panic.
pub fn catch_failure<T, F>(f: F) -> Result<T, CapturedPanic>
where
    F: FnOnce() -> T,
{
    let guard = CaptureGuard::arm();
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => Err(guard.into_panic(payload)),
    }
}

/// Times a single invocation of `f`.
///
/// # Example
///
/// ```no_run
/// use numbench::core::measurement::time_call;
///
/// let outcome = time_call(|| {
///     std::thread::sleep(std::time::Duration::from_millis(1));
///     Ok(())
/// });
/// assert!(outcome.result.is_ok());
/// ```
pub fn time_call<F>(f: F) -> CallOutcome
where
    F: FnOnce() -> Result<(), BoxError>,
{
    let guard = CaptureGuard::arm();
    let start = Instant::now();
    let caught = panic::catch_unwind(AssertUnwindSafe(f));
    let elapsed = start.elapsed();

    let result = match caught {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => Err(Failure::Error(error)),
        Err(payload) => Err(Failure::Panic(guard.into_panic(payload))),
    };

    CallOutcome { elapsed, result }
}

/// Summary statistics over a set of samples, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Mean sample.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Minimum sample.
    pub min: f64,
    /// Maximum sample.
    pub max: f64,
    /// Median sample.
    pub median: f64,
    /// Number of samples.
    pub count: usize,
}

/// Computes statistics from a slice of samples.
///
/// Returns `None` for an empty slice.
pub fn compute_statistics(samples: &[f64]) -> Option<Statistics> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let variance = sorted
        .iter()
        .map(|s| {
            let diff = s - mean;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    Some(Statistics {
        mean,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[count - 1],
        median: sorted[count / 2],
        count,
    })
}
