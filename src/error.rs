//src/error.rs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by a [`PropertyProvider`](crate::properties::PropertyProvider).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    #[error("sequence has no standard amino acid residues")]
    EmptySequence,

    #[error("{descriptor} evaluated to a non-finite value ({value})")]
    NonFinite { descriptor: &'static str, value: f64 },
}

/// Errors of the extraction pipeline.
///
/// Only `Configuration` and `OutputSink` abort a run; the others are
/// reported and the offending file or record is skipped.
#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("cannot write output file {}: {source}", path.display())]
    OutputSink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("record '{identifier}' skipped: {source}")]
    RecordProcessing {
        identifier: String,
        #[source]
        source: PropertyError,
    },
}

impl FeatureError {
    /// True for the kinds that end the run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FeatureError::Configuration(_) | FeatureError::OutputSink { .. }
        )
    }
}

pub type FeatureResult<T> = Result<T, FeatureError>;
