//! Functional coverage collection and export tests.

use std::fs;
use std::path::PathBuf;

use alu_testbench::common::{HarnessError, Transaction};
use alu_testbench::config::Config;
use alu_testbench::coverage::Coverage;
use alu_testbench::sim::Environment;
use alu_testbench::soc::{AluModel, SignalBus};
use serde_json::Value;

/// Returns a scratch path unique to this test binary and `name`.
fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("alu_testbench_{}_{}.json", std::process::id(), name))
}

/// Tests that exported JSON carries every cover point and the cross.
#[test]
fn test_export_json_layout() {
    let coverage = Coverage::new();
    coverage.sample(&Transaction::new(5, 3, 0));
    coverage.sample(&Transaction::new(5, 3, 0));
    coverage.sample(&Transaction::new(15, 0, 3));

    let path = scratch_path("layout");
    let report = coverage.export(&path).unwrap();
    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(report.samples, 3);
    assert_eq!(json["samples"], 3);

    let points = json["points"].as_array().unwrap();
    let names: Vec<&str> = points.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["top.a", "top.b", "top.op"]);
    assert_eq!(points[0]["size"], 16);
    assert_eq!(points[0]["covered"], 2);
    assert_eq!(points[2]["size"], 4);
    assert_eq!(points[0]["bins"][5]["hits"], 2);

    let cross = &json["cross"];
    assert_eq!(cross["name"], "top.all_cases");
    assert_eq!(cross["size"], 1024);
    assert_eq!(cross["covered"], 2);
    let bins = cross["bins"].as_array().unwrap();
    assert_eq!(bins.len(), 2);
    assert_eq!(bins[0]["a"], 5);
    assert_eq!(bins[0]["b"], 3);
    assert_eq!(bins[0]["op"], 0);
    assert_eq!(bins[0]["hits"], 2);
}

/// Tests that an unwritable destination is reported with its path.
#[test]
fn test_export_to_missing_directory() {
    let coverage = Coverage::new();
    let path = std::env::temp_dir()
        .join("alu_testbench_no_such_dir")
        .join("cov.json");

    match coverage.export(&path) {
        Err(HarnessError::CoverageExport { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("unexpected result: {:?}", other.map(|r| r.samples)),
    }
}

/// Tests that a run exports coverage of everything it generated.
#[tokio::test(start_paused = true)]
async fn test_run_exports_coverage() {
    let path = scratch_path("run");
    let mut config = Config::default();
    config.general.seed = Some(7);
    config.general.iterations = 300;
    config.general.run_budget = 500_000;
    config.coverage.export_path = Some(path.to_string_lossy().into_owned());

    let env = Environment::new(config, SignalBus::new(AluModel::new())).unwrap();
    let report = env.run().await.unwrap();
    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(report.coverage.samples, 300);
    assert_eq!(json["samples"], 300);
    assert_eq!(json["points"][2]["covered"], 4);
    assert_eq!(
        json["cross"]["covered"].as_u64().unwrap() as usize,
        report.coverage.cross.covered
    );
}
