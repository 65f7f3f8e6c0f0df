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

//! Error types for the benchmark harness.
//!
//! Three kinds of failure can happen while running a suite, and they are
//! handled differently:
//!
//! - **Load failures**: a benchmark module could not be loaded (missing
//!   optional dependency, unsupported CPU feature, device not present).
//!   Recorded per module as an [`ErrorInfo`] with [`ErrorKind::Import`].
//! - **Configuration errors**: the registry itself is malformed (duplicate
//!   group names, badly named modules, unnamed entries). These are bugs in
//!   the benchmark definitions and abort the run via
//!   [`BenchError::Configuration`].
//! - **Runtime failures**: a benchmark returned an error or panicked while
//!   being timed. Recorded per entry as an [`ErrorInfo`] with
//!   [`ErrorKind::Runtime`], or raised as [`BenchError::Runtime`] in
//!   fail-fast mode.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::measurement::{CapturedPanic, Failure};

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Boxed error returned by fallible benchmark callables.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a harness operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BenchError {
    /// Invalid configuration parameter
    #[error("Invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The benchmark registry is malformed.
    #[error("Configuration error in '{location}': {reason}")]
    Configuration {
        /// Group, module or entry the problem was found in
        location: String,
        /// What is wrong with it
        reason: String,
    },

    /// A benchmark failed while fail-fast mode was active.
    #[error("Benchmark '{}' failed with {}: {}", .0.name, .0.error_type, .0.message)]
    Runtime(ErrorInfo),

    /// I/O error
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// File the operation touched
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A snapshot could not be encoded or decoded.
    #[error("Snapshot error for '{path}': {message}")]
    Snapshot {
        /// Snapshot file path
        path: PathBuf,
        /// The error message
        message: String,
    },
}

impl BenchError {
    /// Create an invalid-parameter error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a registry configuration error.
    pub fn configuration(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Returns true for errors caused by a malformed registry or config.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            BenchError::Configuration { .. } | BenchError::InvalidConfig { .. }
        )
    }
}

/// Error returned by a module loader when its backend is unavailable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct LoadError {
    /// Short error type, e.g. `MissingDependency`
    pub kind: String,
    /// Human-readable explanation
    pub message: String,
}

impl LoadError {
    /// Creates a load error with a custom kind.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// An optional library or toolchain the backend needs is missing.
    pub fn missing_dependency(dependency: impl Into<String>) -> Self {
        Self::new(
            "MissingDependency",
            format!("required dependency '{}' is not available", dependency.into()),
        )
    }

    /// The backend cannot run on this machine (CPU feature, OS, device).
    pub fn unsupported_platform(reason: impl Into<String>) -> Self {
        Self::new("UnsupportedPlatform", reason)
    }
}

/// Which stage of a run an [`ErrorInfo`] was produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Module failed to load during discovery.
    Import,
    /// Benchmark failed while being measured.
    Runtime,
}

impl ErrorKind {
    /// Returns the kind as a string.
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::Import => "import",
            ErrorKind::Runtime => "runtime",
        }
    }
}

/// A recorded, non-fatal failure of a module or benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Module name (import errors) or benchmark name (runtime errors).
    pub name: String,
    /// Stage the failure happened in.
    pub kind: ErrorKind,
    /// Short error type, e.g. `MissingDependency`, `Panic`, `RuntimeError`.
    pub error_type: String,
    /// Error message.
    #[serde(rename = "error")]
    pub message: String,
    /// Source chain, panic location or backtrace.
    #[serde(rename = "traceback", default)]
    pub trace: String,
    /// Module the failure belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl ErrorInfo {
    /// Records a module that failed to load.
    pub fn import(name: impl Into<String>, error: &LoadError) -> Self {
        let name = name.into();
        Self {
            module: Some(name.clone()),
            name,
            kind: ErrorKind::Import,
            error_type: error.kind.clone(),
            message: error.message.clone(),
            trace: error.to_string(),
        }
    }

    /// Records a failure caught while executing user code.
    pub fn from_failure(name: impl Into<String>, kind: ErrorKind, failure: &Failure) -> Self {
        match failure {
            Failure::Error(error) => Self {
                name: name.into(),
                kind,
                error_type: error_type_of(error.as_ref()),
                message: error.to_string(),
                trace: source_chain(error.as_ref()),
                module: None,
            },
            Failure::Panic(panic) => Self::from_panic(name, kind, panic),
        }
    }

    /// Records a panic caught while executing user code.
    pub fn from_panic(name: impl Into<String>, kind: ErrorKind, panic: &CapturedPanic) -> Self {
        Self {
            name: name.into(),
            kind,
            error_type: "Panic".to_string(),
            message: panic.message.clone(),
            trace: panic.trace(),
            module: None,
        }
    }

    /// Tags the failure with the module it belongs to.
    pub fn in_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

/// Best-effort short type name for a boxed error.
fn error_type_of(error: &(dyn std::error::Error + Send + Sync + 'static)) -> String {
    if let Some(load) = error.downcast_ref::<LoadError>() {
        load.kind.clone()
    } else if error.downcast_ref::<std::io::Error>().is_some() {
        "IoError".to_string()
    } else if error.downcast_ref::<std::num::ParseFloatError>().is_some()
        || error.downcast_ref::<std::num::ParseIntError>().is_some()
    {
        "ParseError".to_string()
    } else {
        "RuntimeError".to_string()
    }
}

/// Renders an error and its `source()` chain, one cause per line.
fn source_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut trace = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        trace.push_str("\ncaused by: ");
        trace.push_str(&cause.to_string());
        current = cause.source();
    }
    trace
}
