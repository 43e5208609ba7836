//! qpfile/chapter serialization, frame checks and artifact writing

use serde::{Deserialize, Serialize};

pub mod chapters;
pub mod verifier;
pub mod writer;

pub use chapters::serialize;

/// Text of the two derived artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterArtifacts {
    /// `<frame> K` lines, one per cut after the first segment
    pub qpfile: String,
    /// OGM `CHAPTERNN=` / `CHAPTERNNNAME=` pairs
    pub chapters: String,
    /// Frame index where each segment after the first begins
    pub cut_starts: Vec<u64>,
}

/// What to do when an artifact already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Replace existing files
    #[default]
    Always,
    /// Refuse to replace existing files
    Never,
}

impl OverwritePolicy {
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_lowercase().as_str() {
            "always" | "yes" => Some(OverwritePolicy::Always),
            "never" | "no" => Some(OverwritePolicy::Never),
            _ => None,
        }
    }
}
