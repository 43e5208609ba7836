//! Error handling module for AudioCut

use thiserror::Error;

use crate::domain::errors::TimelineError;

/// Main error type for AudioCut operations
#[derive(Error, Debug)]
pub enum AudioCutError {
    /// Trim validation or compilation failed
    #[error(transparent)]
    Timeline(#[from] TimelineError),

    /// Trims file could not be read or parsed
    #[error("Failed to read trims from {path}: {message}")]
    TrimsFile { path: String, message: String },

    /// Configuration file or value was rejected
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// No audio file matched the video's name
    #[error("Cannot find an .aac or .ac3 file matching video: {video}")]
    AudioNotFound { video: String },

    /// Command line could not be tokenized
    #[error("Cannot tokenize command: {command}")]
    InvalidCommand { command: String },

    /// mkvmerge could not be started
    #[error("Failed to launch {tool}: {message}")]
    RemuxLaunch { tool: String, message: String },

    /// mkvmerge exited with an error status
    #[error("mkvmerge failed with exit code {code:?}: {command}")]
    RemuxFailed { code: Option<i32>, command: String },

    /// Output file write error
    #[error("Failed to write output file {path}: {message}")]
    OutputError { path: String, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for AudioCut operations
pub type AudioCutResult<T> = std::result::Result<T, AudioCutError>;
