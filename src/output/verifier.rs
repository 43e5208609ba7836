//! Frame check listing for trim boundaries
//!
//! For every trim this lists the frames around its first and last frame so
//! an operator can eyeball them in a viewer and catch mistyped frame numbers.

use serde::Serialize;
use tracing::info;

use crate::domain::model::Timeline;

/// Which edge of a trim a check covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimEdge {
    Start,
    End,
}

/// Frames to inspect around one trim edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameCheck {
    /// Index of the trim in caller order
    pub trim_index: usize,
    pub edge: TrimEdge,
    /// `<name> Start`, or `Cut <i> Start` when the trim is unnamed
    pub label: String,
    /// The edge frame flanked by its neighbours, where they exist
    pub frames: Vec<u64>,
}

/// Builds frame checks for a validated timeline
pub struct FrameCheckVerifier {
    /// Frame count of the source, used to clip the last neighbour
    frame_count: Option<u64>,
}

impl FrameCheckVerifier {
    pub fn new(frame_count: Option<u64>) -> Self {
        Self { frame_count }
    }

    /// Two checks per trim, start then end, in caller order
    pub fn checks(&self, timeline: &Timeline) -> Vec<FrameCheck> {
        let checks: Vec<FrameCheck> = timeline
            .trims()
            .iter()
            .enumerate()
            .flat_map(|(index, trim)| {
                let base = match timeline.names().get(index) {
                    Some(name) => name.to_string(),
                    None => format!("Cut {}", index),
                };
                [
                    FrameCheck {
                        trim_index: index,
                        edge: TrimEdge::Start,
                        label: format!("{} Start", base),
                        frames: self.neighbourhood(trim.start),
                    },
                    FrameCheck {
                        trim_index: index,
                        edge: TrimEdge::End,
                        label: format!("{} End", base),
                        frames: self.neighbourhood(trim.end),
                    },
                ]
            })
            .collect();

        info!(checks = checks.len(), "Built frame checks");
        checks
    }

    fn neighbourhood(&self, frame: u64) -> Vec<u64> {
        let next = frame + 1;
        let has_next = self.frame_count.map_or(true, |count| next < count);
        frame
            .checked_sub(1)
            .into_iter()
            .chain(std::iter::once(frame))
            .chain(has_next.then_some(next))
            .collect()
    }
}

/// Human-readable listing, one check per line
pub fn render_checks(checks: &[FrameCheck]) -> String {
    checks
        .iter()
        .map(|check| {
            let frames = check
                .frames
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(" | ");
            format!("{}: [{}]\n", check.label, frames)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ChapterNames, Trim};

    fn timeline() -> Timeline {
        Timeline::new(
            vec![Trim::new(0, 10).unwrap(), Trim::new(50, 99).unwrap()],
            ChapterNames::new(vec![None, Some("Credits".to_string())]),
        )
    }

    #[test]
    fn test_first_frame_has_no_previous() {
        let checks = FrameCheckVerifier::new(Some(100)).checks(&timeline());
        assert_eq!(checks[0].label, "Cut 0 Start");
        assert_eq!(checks[0].frames, vec![0, 1]);
        assert_eq!(checks[1].label, "Cut 0 End");
        assert_eq!(checks[1].frames, vec![9, 10, 11]);
    }

    #[test]
    fn test_last_frame_has_no_next() {
        let checks = FrameCheckVerifier::new(Some(100)).checks(&timeline());
        assert_eq!(checks[2].label, "Credits Start");
        assert_eq!(checks[2].frames, vec![49, 50, 51]);
        assert_eq!(checks[3].label, "Credits End");
        assert_eq!(checks[3].edge, TrimEdge::End);
        assert_eq!(checks[3].frames, vec![98, 99]);
    }

    #[test]
    fn test_unknown_frame_count_keeps_next() {
        let checks = FrameCheckVerifier::new(None).checks(&timeline());
        assert_eq!(checks[3].frames, vec![98, 99, 100]);
    }

    #[test]
    fn test_render() {
        let checks = FrameCheckVerifier::new(Some(100)).checks(&timeline());
        let text = render_checks(&checks[..2]);
        assert_eq!(text, "Cut 0 Start: [0 | 1]\nCut 0 End: [9 | 10 | 11]\n");
    }
}
