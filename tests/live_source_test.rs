//! Integration tests for the process-backed report source
//!
//! Scripts are run through `sh`, standing in for the Python interpreter.

#![cfg(unix)]

mod common;

use std::time::{Duration, Instant};

use asgard_trends::bridge::TrendBridge;
use asgard_trends::models::Prediction;
use asgard_trends::source::{AnalysisError, LiveAnalysisSource, TrendSource};
use tempfile::TempDir;

use common::{echo_script, sh_source, write_script, SAMPLE_OUTPUT};

#[tokio::test]
async fn test_successful_run_is_parsed() {
    let dir = TempDir::new().unwrap();
    let script = echo_script(dir.path(), SAMPLE_OUTPUT);

    let report = sh_source(&script).produce().await.unwrap();

    assert!(report.success);
    assert_eq!(report.raw_output, SAMPLE_OUTPUT);
    assert!(report.note.is_none());
    assert_eq!(report.results.model_info.slope, Some(1.97));
    assert_eq!(report.results.summary.training_sample_count, Some(40));
    assert_eq!(report.results.predictions[0], Prediction::new(51, 111.87));
}

#[tokio::test]
async fn test_stderr_does_not_fail_a_zero_exit() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        dir.path(),
        "warn.sh",
        "echo 'DeprecationWarning: numpy' >&2\necho 'Coeficiente (pendiente): 0.25'\n",
    );

    let report = sh_source(&script).produce().await.unwrap();
    assert_eq!(report.results.model_info.slope, Some(0.25));
}

#[tokio::test]
async fn test_unmatched_output_still_succeeds() {
    let dir = TempDir::new().unwrap();
    let script = write_script(dir.path(), "noise.sh", "echo 'nothing useful here'\n");

    let report = sh_source(&script).produce().await.unwrap();

    assert!(report.success);
    assert!(report.results.predictions.is_empty());
    assert_eq!(report.results.summary.data_point_count, None);
}

#[tokio::test]
async fn test_nonzero_exit_carries_stderr() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        dir.path(),
        "fail.sh",
        "echo 'Coeficiente (pendiente): 2.15'\necho 'ModuleNotFoundError: sklearn' >&2\nexit 3\n",
    );

    let err = sh_source(&script).produce().await.unwrap_err();

    match err {
        AnalysisError::Failed { status, stderr } => {
            assert_eq!(status, Some(3));
            assert!(stderr.contains("ModuleNotFoundError: sklearn"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_interpreter_is_launch_error() {
    let dir = TempDir::new().unwrap();
    let script = echo_script(dir.path(), SAMPLE_OUTPUT);
    let source = LiveAnalysisSource::new("/nonexistent/bin/asgard-python", &script);

    let err = source.produce().await.unwrap_err();
    assert!(matches!(err, AnalysisError::Launch { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_missing_script_is_reported() {
    let dir = TempDir::new().unwrap();
    let source = sh_source(&dir.path().join("predictive_trends.py"));

    let err = source.produce().await.unwrap_err();
    assert!(matches!(err, AnalysisError::ScriptNotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_deadline_kills_process() {
    let dir = TempDir::new().unwrap();
    let script = write_script(dir.path(), "slow.sh", "exec sleep 30\n");
    let source = sh_source(&script).with_timeout(Duration::from_millis(200));

    let started = Instant::now();
    let err = source.produce().await.unwrap_err();

    assert!(matches!(err, AnalysisError::Timeout { .. }), "got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_output_bound_is_enforced() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        dir.path(),
        "flood.sh",
        "i=0\nwhile [ $i -lt 2000 ]; do echo 'Tiempo 1: Tendencia predicha = 1.0'; i=$((i+1)); done\n",
    );
    let source = sh_source(&script).with_max_output_bytes(1024);

    let err = source.produce().await.unwrap_err();
    assert!(
        matches!(
            err,
            AnalysisError::OutputTooLarge {
                stream: "stdout",
                limit: 1024
            }
        ),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_identical_output_gives_identical_json() {
    let dir = TempDir::new().unwrap();
    let script = echo_script(dir.path(), SAMPLE_OUTPUT);
    let source = sh_source(&script);

    let first = serde_json::to_string(&source.produce().await.unwrap()).unwrap();
    let second = serde_json::to_string(&source.produce().await.unwrap()).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_requests_spawn_independent_processes() {
    let dir = TempDir::new().unwrap();
    let script = echo_script(dir.path(), SAMPLE_OUTPUT);
    let bridge = TrendBridge::new(std::sync::Arc::new(sh_source(&script)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let bridge = bridge.clone();
            tokio::spawn(async move { bridge.get_trend_report().await })
        })
        .collect();

    for handle in handles {
        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.results.predictions.len(), 3);
    }
}
