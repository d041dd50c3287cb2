use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} is not installed")]
    NotInstalled(String),

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{program} did not answer within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("unexpected {program} output: {detail}")]
    Parse { program: String, detail: String },

    #[error("no WiFi backend available")]
    NoBackend,

    #[error("no wireless station device found")]
    NoDevice,

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    pub(crate) fn parse(program: &str, detail: impl Into<String>) -> Self {
        Self::Parse {
            program: program.to_string(),
            detail: detail.into(),
        }
    }
}
