//! Error taxonomy, matching the kinds and policy in the design's error
//! handling section: config I/O failures are distinct from config content
//! failures because the CLI maps them to different exit codes.

use thiserror::Error;
use std::path::PathBuf;

/// Failures raised while loading and validating a SUT configuration
/// document. `source` is the file name (or `-` for stdin), carried on every
/// content error per the documented "attach file name" behavior.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}': malformed JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{path}': {message}")]
    Content { path: PathBuf, message: String },
}

impl ConfigError {
    pub fn content(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Content {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Failures that can prevent a `Scheduler` from starting or keep running.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("action module '{module}' could not be loaded: {message}")]
    ActionModuleLoad { module: String, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type SchedulerResult<T> = Result<T, SchedulerError>;
