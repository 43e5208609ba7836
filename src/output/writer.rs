//! Artifact file writer

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::{AudioCutError, AudioCutResult};
use crate::output::OverwritePolicy;

/// Writes text artifacts atomically next to their final location
pub struct ArtifactWriter {
    overwrite: OverwritePolicy,
}

impl ArtifactWriter {
    pub fn new(overwrite: OverwritePolicy) -> Self {
        Self { overwrite }
    }

    /// Write `contents` to `path` through a temporary file in the same directory
    pub fn write_text(&self, path: &Path, contents: &str) -> AudioCutResult<()> {
        let output_error = |message: String| AudioCutError::OutputError {
            path: path.display().to_string(),
            message,
        };

        if path.exists() {
            match self.overwrite {
                OverwritePolicy::Never => {
                    return Err(output_error(
                        "file exists and overwrite is disabled".to_string(),
                    ));
                }
                OverwritePolicy::Always => warn!("Overwriting {}", path.display()),
            }
        }

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)
            .map_err(|e| output_error(format!("failed to create directory: {}", e)))?;

        let mut temp = NamedTempFile::new_in(parent)
            .map_err(|e| output_error(format!("failed to create temporary file: {}", e)))?;
        temp.write_all(contents.as_bytes())
            .map_err(|e| output_error(format!("failed to write data: {}", e)))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| output_error(format!("failed to sync file to disk: {}", e)))?;
        temp.persist(path)
            .map_err(|e| output_error(format!("failed to rename temporary file: {}", e)))?;

        info!("Wrote {} ({} bytes)", path.display(), contents.len());
        Ok(())
    }
}
