// Unit tests for error handling
use mlpipe::error::{MlpipeError, PipelineError};
use std::io;

#[test]
fn test_error_from_io() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: MlpipeError = io_err.into();

    assert!(matches!(err, MlpipeError::Io(_)));
    assert!(err.to_string().contains("I/O error"));
}

#[test]
fn test_error_parse() {
    let err = MlpipeError::parse("invalid number");
    assert!(matches!(err, MlpipeError::Parse(_)));
    assert_eq!(err.to_string(), "Parse error: invalid number");
}

#[test]
fn test_error_missing_input() {
    let err = MlpipeError::missing_input("work_dir");
    assert_eq!(err.to_string(), "Missing required input: work_dir");
}

#[test]
fn test_error_from_pipeline() {
    let err: MlpipeError = PipelineError::config("bad wiring").into();
    assert_eq!(
        err.to_string(),
        "Pipeline error: Pipeline configuration error: bad wiring"
    );
}

#[test]
fn test_node_error_keeps_source() {
    let err = PipelineError::node("train", MlpipeError::model("empty"));
    assert_eq!(err.to_string(), "Node 'train' failed: Model error: empty");
    assert!(std::error::Error::source(&err).is_some());
}
