//! Command-line argument definitions

use std::path::{Path, PathBuf};

use clap::{ArgGroup, Args};
use serde_json::Value;

use crate::domain::model::FrameRate;
use crate::error::{AudioCutError, AudioCutResult};

/// Trim list input shared by every command
#[derive(Args, Debug, Clone)]
pub struct TimelineArgs {
    /// Trims file: a JSON or YAML list of [start, end] or [start, end, name]
    #[arg(short, long)]
    pub trims: PathBuf,

    /// Frame count of the source video, resolves open-ended trims
    #[arg(short, long)]
    pub frames: Option<u64>,

    /// Source frame rate as NUM/DEN or an integer
    #[arg(long, default_value = "24000/1001")]
    pub fps: FrameRate,
}

impl TimelineArgs {
    /// Read the trims file; `.yaml`/`.yml` parse as YAML, anything else as JSON
    pub fn read_trims(&self) -> AudioCutResult<Value> {
        read_trims_file(&self.trims)
    }
}

/// Parse a trims file into an untyped value for validation
pub fn read_trims_file(path: &Path) -> AudioCutResult<Value> {
    let trims_error = |message: String| AudioCutError::TrimsFile {
        path: path.display().to_string(),
        message,
    };

    let content = std::fs::read_to_string(path).map_err(|e| trims_error(e.to_string()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| trims_error(e.to_string()))
    } else {
        serde_json::from_str(&content).map_err(|e| trims_error(e.to_string()))
    }
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub timeline: TimelineArgs,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the chapters command
#[derive(Args, Debug)]
pub struct ChaptersArgs {
    #[command(flatten)]
    pub timeline: TimelineArgs,

    /// Frame rate after decimation; defaults to the source rate
    #[arg(long)]
    pub new_fps: Option<FrameRate>,

    /// Measured frame count of each segment, overriding the trim lengths
    #[arg(long, value_delimiter = ',')]
    pub segment_frames: Option<Vec<u64>>,

    /// Chapter names, replacing the names carried by the trims
    #[arg(long, value_delimiter = ',')]
    pub names: Option<Vec<String>>,

    /// Write the qpfile here instead of stdout
    #[arg(long)]
    pub qpfile: Option<PathBuf>,

    /// Write the OGM chapters here instead of stdout
    #[arg(long)]
    pub chapters: Option<PathBuf>,
}

/// Arguments for the cut command
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["audio", "video"])))]
pub struct CutArgs {
    #[command(flatten)]
    pub timeline: TimelineArgs,

    /// Audio file to cut
    #[arg(short, long)]
    pub audio: Option<PathBuf>,

    /// Video whose sibling .aac/.ac3 file is cut
    #[arg(long)]
    pub video: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "audiocut.mka")]
    pub output: PathBuf,

    /// Prefix of the temporary files for out-of-order trims
    #[arg(long)]
    pub temp_prefix: Option<String>,

    /// Print the filled commands without running them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub timeline: TimelineArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
