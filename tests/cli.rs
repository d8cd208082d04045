// Binary-level tests for the compile entry point and step executors
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn mlpipe(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_mlpipe"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to spawn mlpipe binary")
}

#[test]
fn compile_writes_pipeline_json() {
    let tmp = tempdir().expect("tempdir");

    let out = mlpipe(tmp.path(), &["--compile"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Wrote pipeline.json"));

    let content = std::fs::read_to_string(tmp.path().join("pipeline.json")).unwrap();
    let graph: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(graph["pipelineInfo"]["name"], "minimal-kfp-pipeline");
    assert_eq!(graph["root"]["dag"]["tasks"].as_object().unwrap().len(), 3);
}

#[test]
fn recompile_overwrites_file() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("pipeline.json");
    std::fs::write(&path, "x".repeat(100_000)).unwrap();

    assert!(mlpipe(tmp.path(), &["--compile"]).status.success());
    let first = std::fs::read_to_string(&path).unwrap();
    assert!(mlpipe(tmp.path(), &["--compile"]).status.success());
    let second = std::fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
    assert!(serde_json::from_str::<serde_json::Value>(&second).is_ok());
}

#[test]
fn no_flag_writes_nothing() {
    let tmp = tempdir().expect("tempdir");

    let out = mlpipe(tmp.path(), &[]);
    assert!(out.status.success());
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn package_path_override() {
    let tmp = tempdir().expect("tempdir");

    let out = mlpipe(tmp.path(), &["--compile", "--package-path", "out/graph.json"]);
    assert!(out.status.success());
    assert!(tmp.path().join("out/graph.json").exists());
    assert!(!tmp.path().join("pipeline.json").exists());
}

#[test]
fn steps_run_in_order() {
    let tmp = tempdir().expect("tempdir");

    assert!(mlpipe(tmp.path(), &["prep", "--data-out", "data"]).status.success());
    assert!(tmp.path().join("data/X.csv").exists());
    assert!(tmp.path().join("data/y.csv").exists());

    let out = mlpipe(
        tmp.path(),
        &["train", "--data-in", "data", "--model-out", "model", "--n-estimators", "10"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(tmp.path().join("model/rf.json").exists());

    let out = mlpipe(
        tmp.path(),
        &["evaluate", "--model-in", "model", "--data-in", "data", "--metrics-out", "metrics"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let metrics = std::fs::read_to_string(tmp.path().join("metrics/metrics.json")).unwrap();
    let metrics: serde_json::Value = serde_json::from_str(&metrics).unwrap();
    let f1 = metrics["metrics"]["f1"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&f1));
}

#[test]
fn train_without_dataset_exits_nonzero() {
    let tmp = tempdir().expect("tempdir");

    let out = mlpipe(tmp.path(), &["train", "--data-in", "missing", "--model-out", "model"]);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    assert!(!tmp.path().join("model").exists());
}

#[test]
fn usage_errors_exit_one() {
    let tmp = tempdir().expect("tempdir");

    let out = mlpipe(
        tmp.path(),
        &["train", "--data-in", "d", "--model-out", "m", "--n-estimators", "-3"],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(!out.stderr.is_empty());

    assert_eq!(mlpipe(tmp.path(), &["--no-such-flag"]).status.code(), Some(1));
    assert_eq!(mlpipe(tmp.path(), &["--help"]).status.code(), Some(0));
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}
