//! Error types for SEG-Y/CSV conversion.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeismoError {
    #[error("cannot open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("cannot create {}: {source}", path.display())]
    Create { path: PathBuf, source: io::Error },

    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed CSV {}:{line}: {message}", path.display())]
    MalformedCsv {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("too many SEG-Y files: {requested} requested, {available} components available")]
    TooManySegyFiles { requested: usize, available: usize },

    #[error("too many CSV files: {requested} requested, data for {available}")]
    TooManyCsvFiles { requested: usize, available: usize },

    #[error("invalid number of dimensions: {0} (expected 2 or 3)")]
    InvalidDims(u8),

    #[error("state vector has {actual} values, expected {expected}")]
    StateLength { expected: usize, actual: usize },

    #[error("state is {actual}-D, expected {expected}-D")]
    DimsMismatch { expected: usize, actual: usize },

    #[error("component {component} is not defined for {dims}-D data")]
    ComponentUnavailable { component: String, dims: usize },

    #[error("time axis is not strictly increasing at sample {index}")]
    NonIncreasingTime { index: usize },

    #[error("at least 2 samples are required to resample, got {0}")]
    TooFewSamples(usize),

    #[error("invalid sampling interval: {0}")]
    InvalidInterval(f64),

    #[error("trace {trace} has {actual} samples, expected {expected}")]
    TraceLength {
        trace: usize,
        expected: usize,
        actual: usize,
    },

    #[error("header field {field} cannot hold {value}")]
    FieldOverflow { field: &'static str, value: f64 },

    #[error("inconsistent data across files: {0}")]
    Inconsistent(String),
}

pub type Result<T> = std::result::Result<T, SeismoError>;
