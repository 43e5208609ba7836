//! Source audio track handling

pub mod audio_mapper;

pub use audio_mapper::{AudioTrackMapper, SourceTrackOptions};
