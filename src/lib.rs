//! AudioCut Library
//!
//! Validates frame-based trim lists, compiles them into mkvmerge audio cut
//! commands and serializes the matching qpfile and OGM chapters.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod output;
pub mod planner;
pub mod ports;
pub mod streams;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::TimelineError;
pub use domain::model::{ChapterNames, FrameRate, RawTrim, Timeline, Trim};
pub use domain::rules::{TimelineOrderer, TimelineValidator};
pub use error::{AudioCutError, AudioCutResult};
pub use output::ChapterArtifacts;
pub use planner::{CommandCompiler, CommandPlan, CutStrategy, PlaceholderValues};
