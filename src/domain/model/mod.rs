// Domain models - Core types and data structures

use std::fmt;
use std::str::FromStr;

use num_rational::Ratio;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{TimelineError, TrimViolation};
use crate::domain::rules::TimelineOrderer;

/// Raw trim as supplied by the caller, before sentinel resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTrim {
    pub start: i64,
    /// Inclusive end frame; zero or below means "to the end of the video"
    pub end: i64,
    pub name: Option<String>,
}

impl RawTrim {
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            name: None,
        }
    }

    pub fn named(start: i64, end: i64, name: impl Into<String>) -> Self {
        Self {
            start,
            end,
            name: Some(name.into()),
        }
    }

    /// Whether the end frame is the open-ended sentinel
    pub fn is_open_ended(&self) -> bool {
        self.end <= 0
    }
}

/// Validated, inclusive frame range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trim {
    pub start: u64,
    pub end: u64,
}

impl Trim {
    /// Create a trim, rejecting an end before the start
    pub fn new(start: u64, end: u64) -> Result<Self, TimelineError> {
        if end < start {
            return Err(TimelineError::InvalidTrim {
                index: 0,
                value: format!("({}, {})", start, end),
                reason: TrimViolation::EndBeforeStart,
            });
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered, both ends included
    pub fn frame_count(&self) -> u64 {
        self.end - self.start + 1
    }

    /// First frame after the trim, the exclusive end used by split ranges
    pub fn exclusive_end(&self) -> u64 {
        self.end + 1
    }

    pub fn contains(&self, frame: u64) -> bool {
        frame >= self.start && frame <= self.end
    }
}

impl fmt::Display for Trim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// Rational frames-per-second value
///
/// Both terms fit in `u32`, which keeps `frame * den * 10^9` inside `u128`
/// for every `u64` frame index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FrameRate {
    num: u64,
    den: u64,
}

impl FrameRate {
    /// Largest accepted numerator or denominator
    pub const MAX_TERM: u64 = u32::MAX as u64;

    /// Create a framerate; both terms must be in `1..=MAX_TERM`
    pub fn new(num: u64, den: u64) -> Result<Self, TimelineError> {
        let in_range = |term: u64| (1..=Self::MAX_TERM).contains(&term);
        if !in_range(num) || !in_range(den) {
            return Err(TimelineError::InvalidFrameRate {
                value: format!("{}/{}", num, den),
            });
        }
        Ok(Self { num, den })
    }

    pub fn num(&self) -> u64 {
        self.num
    }

    pub fn den(&self) -> u64 {
        self.den
    }

    /// Frames per second as an exact ratio
    pub fn as_ratio(&self) -> Ratio<u64> {
        Ratio::new(self.num, self.den)
    }

    /// Seconds per frame as an exact ratio
    pub fn frame_duration(&self) -> Ratio<u64> {
        Ratio::new(self.den, self.num)
    }

    /// NTSC film rate, 23.976 fps
    pub fn ntsc_film() -> Self {
        Self {
            num: 24000,
            den: 1001,
        }
    }

    /// NTSC video rate, 29.97 fps
    pub fn ntsc_video() -> Self {
        Self {
            num: 30000,
            den: 1001,
        }
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for FrameRate {
    type Err = TimelineError;

    /// Parse `NUM/DEN` or a bare integer rate
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimelineError::InvalidFrameRate {
            value: s.to_string(),
        };
        let trimmed = s.trim();
        let (num, den) = match trimmed.split_once('/') {
            Some((num, den)) => (num.trim(), den.trim()),
            None => (trimmed, "1"),
        };
        let num = num.parse::<u64>().map_err(|_| invalid())?;
        let den = den.parse::<u64>().map_err(|_| invalid())?;
        Self::new(num, den).map_err(|_| invalid())
    }
}

/// Chapter names, one slot per segment; `None` renders the default name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterNames(Vec<Option<String>>);

impl ChapterNames {
    pub fn new(names: Vec<Option<String>>) -> Self {
        Self(names)
    }

    /// Build from plain strings, every slot named
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(|n| Some(n.into())).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Caller-supplied name at `index`, ignoring missing and empty slots
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0
            .get(index)
            .and_then(|slot| slot.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// Name for 1-based chapter `number`, falling back to `Chapter NN`
    pub fn display_name(&self, number: usize) -> String {
        match number.checked_sub(1).and_then(|index| self.get(index)) {
            Some(name) => name.to_string(),
            None => format!("Chapter {:02}", number),
        }
    }

    pub fn as_slice(&self) -> &[Option<String>] {
        &self.0
    }
}

/// Validated trim list with its names and cached orderedness
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    trims: Vec<Trim>,
    names: ChapterNames,
    ordered: bool,
}

impl Timeline {
    /// Build a timeline; orderedness is computed here and nowhere else
    pub fn new(trims: Vec<Trim>, names: ChapterNames) -> Self {
        let ordered = TimelineOrderer::is_ordered(&trims);
        Self {
            trims,
            names,
            ordered,
        }
    }

    pub fn trims(&self) -> &[Trim] {
        &self.trims
    }

    pub fn names(&self) -> &ChapterNames {
        &self.names
    }

    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    pub fn is_empty(&self) -> bool {
        self.trims.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trims.len()
    }

    /// Adjacent trims coalesced; only defined for ordered timelines
    pub fn merged_cuts(&self) -> Option<Vec<Trim>> {
        self.ordered
            .then(|| TimelineOrderer::merge_adjacent(&self.trims))
    }

    /// Replace the whole name list; no per-slot overlay with the old one
    pub fn with_chapter_names(mut self, names: ChapterNames) -> Self {
        self.names = names;
        self
    }

    /// Frame count of each segment as cut from the source
    pub fn segment_frame_counts(&self) -> Vec<u64> {
        self.trims.iter().map(Trim::frame_count).collect()
    }

    /// Total frames kept from the source
    pub fn total_frames(&self) -> u64 {
        self.trims.iter().map(Trim::frame_count).sum()
    }
}
