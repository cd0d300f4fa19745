use std::path::PathBuf;

use thiserror::Error;

use crate::failure::FailureReason;

/// A subprocess could not be run to completion.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Tool(#[from] ToolError),
    /// yt-dlp exited non-zero or printed nothing for a search.
    #[error("no stream found for '{query}'")]
    NotFound { query: String, stderr: String },
    /// The flat listing of a playlist failed.
    #[error("could not list entries of {target}: {reason}")]
    Listing {
        target: String,
        reason: FailureReason,
        stderr: String,
    },
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Tool(#[from] ToolError),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid loop count '{raw}': expected -1 (infinite) or a non-negative integer")]
pub struct LoopArgError {
    pub raw: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
