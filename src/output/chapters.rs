//! qpfile and OGM chapter serialization

use num_rational::Ratio;
use tracing::debug;

use crate::domain::errors::TimelineError;
use crate::domain::model::{ChapterNames, FrameRate};
use crate::output::ChapterArtifacts;
use crate::utils::time::{frame_to_timecode, rescale_factor, TimecodePrecision};

/// Frame indices where each segment after the first begins, at `new_fps`
///
/// Each boundary is the floor of its own scaled prefix sum; truncated values
/// are never accumulated.
pub fn cut_start_frames(
    segment_frame_counts: &[u64],
    old_fps: FrameRate,
    new_fps: FrameRate,
) -> Vec<u64> {
    let scalar = rescale_factor(old_fps, new_fps);
    let boundaries = segment_frame_counts.len().saturating_sub(1);

    segment_frame_counts
        .iter()
        .take(boundaries)
        .scan(0u64, |prefix, &count| {
            *prefix += count;
            Some(*prefix)
        })
        .map(|prefix| (Ratio::from_integer(prefix) * scalar).to_integer())
        .collect()
}

/// Build the qpfile and chapter text for the given segments
pub fn serialize(
    segment_frame_counts: &[u64],
    old_fps: FrameRate,
    new_fps: FrameRate,
    names: &ChapterNames,
) -> Result<ChapterArtifacts, TimelineError> {
    if segment_frame_counts.is_empty() {
        return Err(TimelineError::EmptyTimeline);
    }

    let cut_starts = cut_start_frames(segment_frame_counts, old_fps, new_fps);
    debug!(
        segments = segment_frame_counts.len(),
        scalar = %rescale_factor(old_fps, new_fps),
        ?cut_starts,
        "Computed chapter boundaries"
    );

    let qpfile = cut_starts
        .iter()
        .map(|frame| format!("{} K\n", frame))
        .collect::<String>();

    let chapters = std::iter::once(0)
        .chain(cut_starts.iter().copied())
        .enumerate()
        .map(|(index, frame)| {
            let number = index + 1;
            format!(
                "CHAPTER{number:02}={timecode}\nCHAPTER{number:02}NAME={name}\n",
                number = number,
                timecode = frame_to_timecode(frame, new_fps, TimecodePrecision::Millisecond),
                name = names.display_name(number),
            )
        })
        .collect::<String>();

    Ok(ChapterArtifacts {
        qpfile,
        chapters,
        cut_starts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_segments_fail() {
        let fps = FrameRate::ntsc_film();
        let err = serialize(&[], fps, fps, &ChapterNames::default()).unwrap_err();
        assert_eq!(err, TimelineError::EmptyTimeline);
    }

    #[test]
    fn test_single_segment_has_no_cuts() {
        let fps = FrameRate::ntsc_film();
        let artifacts = serialize(&[500], fps, fps, &ChapterNames::default()).unwrap();
        assert_eq!(artifacts.qpfile, "");
        assert_eq!(artifacts.chapters, "CHAPTER01=00:00:00.000\nCHAPTER01NAME=Chapter 01\n");
    }

    #[test]
    fn test_unchanged_framerate() {
        let fps = FrameRate::ntsc_video();
        let artifacts = serialize(&[100, 200, 300], fps, fps, &ChapterNames::default()).unwrap();
        assert_eq!(artifacts.qpfile, "100 K\n300 K\n");
        assert_eq!(
            artifacts.chapters,
            "CHAPTER01=00:00:00.000\nCHAPTER01NAME=Chapter 01\n\
             CHAPTER02=00:00:03.337\nCHAPTER02NAME=Chapter 02\n\
             CHAPTER03=00:00:10.010\nCHAPTER03NAME=Chapter 03\n"
        );
    }

    #[test]
    fn test_rescaled_boundaries_truncate_each_prefix() {
        // 4/5 scalar: 80.8 -> 80, 243.2 -> 243 (not 80 + 162)
        let cuts = cut_start_frames(
            &[101, 203, 50],
            FrameRate::ntsc_video(),
            FrameRate::ntsc_film(),
        );
        assert_eq!(cuts, vec![80, 243]);
    }

    #[test]
    fn test_rescaled_chapter_timecodes_use_new_rate() {
        let names = ChapterNames::from_names(["Intro", "Part A", "Part B"]);
        let artifacts = serialize(
            &[101, 203, 50],
            FrameRate::ntsc_video(),
            FrameRate::ntsc_film(),
            &names,
        )
        .unwrap();
        assert_eq!(artifacts.qpfile, "80 K\n243 K\n");
        assert_eq!(
            artifacts.chapters,
            "CHAPTER01=00:00:00.000\nCHAPTER01NAME=Intro\n\
             CHAPTER02=00:00:03.337\nCHAPTER02NAME=Part A\n\
             CHAPTER03=00:00:10.135\nCHAPTER03NAME=Part B\n"
        );
    }

    #[test]
    fn test_short_names_list_falls_back() {
        let fps = FrameRate::new(25, 1).unwrap();
        let names = ChapterNames::new(vec![Some("Cold Open".to_string())]);
        let artifacts = serialize(&[25, 25, 25], fps, fps, &names).unwrap();
        assert!(artifacts.chapters.contains("CHAPTER01NAME=Cold Open\n"));
        assert!(artifacts.chapters.contains("CHAPTER02NAME=Chapter 02\n"));
        assert!(artifacts.chapters.contains("CHAPTER03NAME=Chapter 03\n"));
    }

    #[test]
    fn test_empty_names_list_uses_defaults() {
        let fps = FrameRate::new(25, 1).unwrap();
        let artifacts = serialize(&[10, 10, 10], fps, fps, &ChapterNames::default()).unwrap();
        let names: Vec<&str> = artifacts
            .chapters
            .lines()
            .filter_map(|line| line.split_once("NAME=").map(|(_, name)| name))
            .collect();
        assert_eq!(names, vec!["Chapter 01", "Chapter 02", "Chapter 03"]);
    }

    #[test]
    fn test_qpfile_and_chapters_agree() {
        let scenarios = [
            (FrameRate::ntsc_video(), FrameRate::ntsc_video()),
            (FrameRate::ntsc_video(), FrameRate::ntsc_film()),
            (FrameRate::new(25, 1).unwrap(), FrameRate::new(50, 1).unwrap()),
        ];
        let segments = [1234, 777, 4321, 19, 600];

        for (old_fps, new_fps) in scenarios {
            let artifacts =
                serialize(&segments, old_fps, new_fps, &ChapterNames::default()).unwrap();
            let qp_frames: Vec<u64> = artifacts
                .qpfile
                .lines()
                .map(|line| line.trim_end_matches(" K").parse().unwrap())
                .collect();
            let chapter_timecodes: Vec<&str> = artifacts
                .chapters
                .lines()
                .filter(|line| !line.contains("NAME="))
                .map(|line| line.split_once('=').unwrap().1)
                .collect();

            assert_eq!(qp_frames.len() + 1, chapter_timecodes.len());
            for (frame, timecode) in qp_frames.iter().zip(&chapter_timecodes[1..]) {
                assert_eq!(
                    frame_to_timecode(*frame, new_fps, TimecodePrecision::Millisecond),
                    *timecode
                );
            }
        }
    }
}
