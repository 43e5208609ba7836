// Audio locator adapter - Finds demuxed audio next to a source video

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{AudioCutError, AudioCutResult};

const AUDIO_EXTENSIONS: [&str; 2] = ["aac", "ac3"];

/// Locates the audio file demuxed alongside a video
pub struct AudioLocator;

impl AudioLocator {
    /// Largest `.aac`/`.ac3` sibling whose name starts with the video's stem
    pub fn find_for_video(video: &Path) -> AudioCutResult<PathBuf> {
        let not_found = || AudioCutError::AudioNotFound {
            video: video.display().to_string(),
        };
        let stem = video
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(not_found)?;
        let dir = match video.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut candidates: Vec<(u64, PathBuf)> = WalkDir::new(dir)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| Self::is_candidate(entry.path(), &stem))
            .filter_map(|entry| {
                let size = entry.metadata().ok()?.len();
                Some((size, entry.into_path()))
            })
            .collect();
        debug!(count = candidates.len(), "Found audio candidates for {}", video.display());

        // Largest first; ties keep a stable, name-sorted order
        candidates.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        let (_, audio) = candidates.into_iter().next().ok_or_else(not_found)?;
        info!("Using audio file: {}", audio.display());
        Ok(audio)
    }

    fn is_candidate(path: &Path, stem: &str) -> bool {
        let name_matches = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with(stem));
        let extension_matches = path.extension().is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|wanted| ext.eq_ignore_ascii_case(wanted))
        });
        name_matches && extension_matches
    }
}
