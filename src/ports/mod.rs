// Ports - Interface definitions for external collaborators

use async_trait::async_trait;

use crate::error::AudioCutResult;

/// Outcome of a remux invocation that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemuxStatus {
    /// Exit code 0
    Success,
    /// Exit code 1; output was written but mkvmerge complained
    Warnings,
}

/// Port for the external remux tool
#[async_trait]
pub trait RemuxPort: Send + Sync {
    /// JSON identification of a source file, used to sniff track metadata
    async fn identify(&self, file_path: &str) -> AudioCutResult<String>;

    /// Run one fully filled command line
    ///
    /// Exit codes of 2 and above, or death by signal, are errors.
    async fn run(&self, command_line: &str) -> AudioCutResult<RemuxStatus>;
}
