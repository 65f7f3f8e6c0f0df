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

//! Snapshot persistence and report rendering from saved data.

use std::cell::Cell;
use std::fs;
use std::rc::Rc;

use numbench::reporters::{
    export_all, load_snapshot, render_html, render_markdown, save_snapshot,
};
use numbench::{
    load_or_run, run_benchmarks, BenchConfig, BenchData, BenchmarkEntry, BenchmarkGroup,
    BenchmarkModule, ExportFormat, Fixture, GroupResult, LoadError, MeasurementRecord, Registry,
    ReportLinks,
};

fn counting_registry(runs: Rc<Cell<usize>>) -> Registry {
    Registry::new().group(
        BenchmarkGroup::with_factory("dot", |_| {
            Fixture::new((vec![0.5f64; 256],)).with_kwarg("n", 256)
        })
        .describe("Dot product of a vector with itself")
        .module(BenchmarkModule::new("dot_naive", move || {
            let runs = Rc::clone(&runs);
            Ok(vec![BenchmarkEntry::infallible(
                "dot_loop",
                move |f: &Fixture<(Vec<f64>,)>| {
                    runs.set(runs.get() + 1);
                    f.args.0.iter().map(|x| x * x).sum::<f64>()
                },
            )])
        }))
        .module(BenchmarkModule::new("dot_cuda", || {
            Err(LoadError::unsupported_platform("no CUDA device"))
        })),
    )
}

#[test]
fn test_run_snapshot_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("benchmark_results.json");
    let registry = counting_registry(Rc::new(Cell::new(0)));

    let data = run_benchmarks(&registry, &BenchConfig::default().with_runs(2)).unwrap();
    save_snapshot(&data, &path).unwrap();
    let loaded = load_snapshot(&path).unwrap();

    assert_eq!(loaded, data);
    let group = loaded.group("dot").unwrap();
    assert_eq!(group.description.as_deref(), Some("Dot product of a vector with itself"));
    assert_eq!(group.import_errors[0].error_type, "UnsupportedPlatform");
}

#[test]
fn test_snapshot_uses_stable_field_names() {
    let registry = counting_registry(Rc::new(Cell::new(0)));
    let data = run_benchmarks(&registry, &BenchConfig::default().with_runs(1)).unwrap();
    let json = data.to_json().unwrap();

    for key in [
        "\"benchmark_results\"",
        "\"benchmark_environment\"",
        "\"group_name\"",
        "\"source_url\"",
        "\"cold_time\"",
        "\"warm_time\"",
        "\"all_warm_times\"",
        "\"rank\"",
        "\"speedup\"",
        "\"runtime_errors\"",
        "\"import_errors\"",
        "\"traceback\"",
    ] {
        assert!(json.contains(key), "missing {} in snapshot", key);
    }
}

#[test]
fn test_load_or_run_skips_execution_when_snapshot_exists() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Rc::new(Cell::new(0));
    let registry = counting_registry(Rc::clone(&calls));
    let config = BenchConfig::default().with_runs(1).with_output_dir(dir.path());

    let first = load_or_run(&registry, &config).unwrap();
    let after_first = calls.get();
    assert!(after_first > 0);

    let second = load_or_run(&registry, &config).unwrap();
    assert_eq!(calls.get(), after_first);
    assert_eq!(second, first);

    load_or_run(&registry, &config.clone().with_force(true)).unwrap();
    assert!(calls.get() > after_first);
}

#[test]
fn test_cached_snapshot_still_checks_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Rc::new(Cell::new(0));
    let registry = counting_registry(Rc::clone(&calls));
    let config = BenchConfig::default().with_runs(1).with_output_dir(dir.path());
    load_or_run(&registry, &config).unwrap();
    let after_first = calls.get();

    let err = load_or_run(&registry, &config.clone().with_group("dto")).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("unknown benchmark group"));

    let err = load_or_run(&registry, &config.clone().with_runs(0)).unwrap_err();
    assert!(err.is_configuration());

    let malformed = counting_registry(Rc::clone(&calls))
        .group(BenchmarkGroup::<()>::new("dot"));
    assert!(load_or_run(&malformed, &config).unwrap_err().is_configuration());

    assert_eq!(calls.get(), after_first);
}

#[test]
fn test_cached_snapshot_honours_backend_filter() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Rc::new(Cell::new(0));
    let registry = counting_registry(Rc::clone(&calls));
    let config = BenchConfig::default().with_runs(1).with_output_dir(dir.path());
    load_or_run(&registry, &config).unwrap();
    let after_first = calls.get();

    let naive = load_or_run(&registry, &config.clone().with_backend("naive")).unwrap();
    let group = naive.group("dot").unwrap();
    assert_eq!(group.records.len(), 1);
    assert_eq!(group.records[0].rank, Some(1));
    assert!(group.import_errors.is_empty());

    let cuda = load_or_run(&registry, &config.clone().with_backend("cuda")).unwrap();
    let group = cuda.group("dot").unwrap();
    assert!(group.records.is_empty());
    assert_eq!(group.import_errors.len(), 1);
    assert_eq!(group.import_errors[0].name, "dot_cuda");

    assert_eq!(calls.get(), after_first);
}

#[test]
fn test_rendering_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("benchmark_results.json");
    let registry = counting_registry(Rc::new(Cell::new(0)));
    let data = run_benchmarks(&registry, &BenchConfig::default().with_runs(1)).unwrap();
    save_snapshot(&data, &path).unwrap();
    let links = ReportLinks {
        repository: Some("https://example.org/numbench".to_string()),
        about: None,
    };

    let html = render_html(&data, &links);
    assert_eq!(html, render_html(&data, &links));
    assert_eq!(html, render_html(&load_snapshot(&path).unwrap(), &links));

    let md = render_markdown(&data, &links);
    assert_eq!(md, render_markdown(&load_snapshot(&path).unwrap(), &links));
    assert!(md.contains("[Repository](https://example.org/numbench)"));
}

#[test]
fn test_missing_values_render_as_not_applicable() {
    let mut group = GroupResult::new("gemm", "suites/gemm");
    group.records.push(MeasurementRecord {
        cold_time: Some(0.5),
        warm_time: Some(0.0),
        all_warm_times: vec![0.0],
        rank: Some(1),
        speedup: None,
        ..MeasurementRecord::new("gemm_zero", "suites/gemm/gemm_naive.rs", "plain")
    });
    let mut data = BenchData::default();
    data.benchmark_results.push(group);

    let html = render_html(&data, &ReportLinks::default());
    assert!(html.contains("N/A"));
    assert!(html.contains("gemm_zero"));

    let md = render_markdown(&data, &ReportLinks::default());
    assert!(md.contains("| 1 | [gemm_zero](suites/gemm/gemm_naive.rs) | plain | 0.500 | 0.000 | 0.000 | N/A |"));
}

#[test]
fn test_export_all_writes_configured_formats() {
    let dir = tempfile::tempdir().unwrap();
    let registry = counting_registry(Rc::new(Cell::new(0)));
    let config = BenchConfig::default()
        .with_runs(1)
        .with_output_dir(dir.path().join("out"))
        .with_export_formats(vec![ExportFormat::Html, ExportFormat::Markdown]);

    let data = load_or_run(&registry, &config).unwrap();
    let written = export_all(&data, &config).unwrap();

    assert_eq!(written, vec![config.html_path(), config.markdown_path()]);
    let html = fs::read_to_string(config.html_path()).unwrap();
    assert!(html.contains("dot_loop"));
    assert!(html.contains("dot_cuda"));
    assert!(html.contains("Runtime Environment"));
    assert!(config.snapshot_path().exists());
}
