//! mkvmerge execution adapter
//!
//! Spawns mkvmerge through tokio and maps its exit codes onto [`RemuxStatus`].
//! Identification uses the JSON format, which carries track properties such
//! as `aac_is_sbr`.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{AudioCutError, AudioCutResult};
use crate::ports::{RemuxPort, RemuxStatus};

/// mkvmerge-backed remux adapter
pub struct MkvmergeAdapter {
    tool_path: String,
}

impl MkvmergeAdapter {
    pub fn new(tool_path: impl Into<String>) -> Self {
        Self {
            tool_path: tool_path.into(),
        }
    }

    pub fn tool_path(&self) -> &str {
        &self.tool_path
    }

    fn launch_error(&self, e: std::io::Error) -> AudioCutError {
        AudioCutError::RemuxLaunch {
            tool: self.tool_path.clone(),
            message: e.to_string(),
        }
    }
}

/// Map an mkvmerge exit code: 0 success, 1 warnings, anything else failure
pub fn classify_exit(code: Option<i32>, command_line: &str) -> AudioCutResult<RemuxStatus> {
    match code {
        Some(0) => Ok(RemuxStatus::Success),
        Some(1) => Ok(RemuxStatus::Warnings),
        code => Err(AudioCutError::RemuxFailed {
            code,
            command: command_line.to_string(),
        }),
    }
}

/// Split a filled command line with POSIX shell word rules
pub fn tokenize(command_line: &str) -> AudioCutResult<Vec<String>> {
    match shlex::split(command_line) {
        Some(args) if !args.is_empty() => Ok(args),
        _ => Err(AudioCutError::InvalidCommand {
            command: command_line.to_string(),
        }),
    }
}

#[async_trait]
impl RemuxPort for MkvmergeAdapter {
    async fn identify(&self, file_path: &str) -> AudioCutResult<String> {
        debug!("Identifying {}", file_path);
        let output = Command::new(&self.tool_path)
            .args(["--identification-format", "json", "--identify"])
            .arg(file_path)
            .output()
            .await
            .map_err(|e| self.launch_error(e))?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn run(&self, command_line: &str) -> AudioCutResult<RemuxStatus> {
        let args = tokenize(command_line)?;
        info!("Running: {}", command_line);
        let status = Command::new(&args[0])
            .args(&args[1..])
            .status()
            .await
            .map_err(|e| self.launch_error(e))?;
        classify_exit(status.code(), command_line)
    }
}
