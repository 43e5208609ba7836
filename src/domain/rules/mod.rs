// Domain rules - Trim validation, ordering and merging

use serde_json::Value;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Validation of raw trim input
pub struct TimelineValidator;

impl TimelineValidator {
    /// Parse untyped input (a list of 2- or 3-element lists) into raw trims
    pub fn parse_value(input: &Value) -> Result<Vec<RawTrim>, TimelineError> {
        let items = input.as_array().ok_or_else(|| TimelineError::MalformedInput {
            detail: "expected a list of trims".to_string(),
        })?;

        // Shape first, so a malformed list never reports a per-trim error
        if let Some(index) = items.iter().position(|item| !item.is_array()) {
            return Err(TimelineError::MalformedInput {
                detail: format!("trim #{} is not a list", index),
            });
        }

        items
            .iter()
            .enumerate()
            .map(|(index, item)| Self::parse_trim(index, item))
            .collect()
    }

    fn parse_trim(index: usize, item: &Value) -> Result<RawTrim, TimelineError> {
        let invalid = |reason| TimelineError::InvalidTrim {
            index,
            value: item.to_string(),
            reason,
        };
        let members = item.as_array().map(Vec::as_slice).unwrap_or_default();
        if members.len() < 2 {
            return Err(invalid(TrimViolation::MissingBounds));
        }

        let start = members[0]
            .as_i64()
            .ok_or_else(|| invalid(TrimViolation::NonIntegerBounds))?;
        let end = members[1]
            .as_i64()
            .ok_or_else(|| invalid(TrimViolation::NonIntegerBounds))?;

        let name = match members.get(2) {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.clone()),
            Some(_) => return Err(invalid(TrimViolation::NonStringName)),
        };

        Ok(RawTrim { start, end, name })
    }

    /// Resolve sentinels and check every trim; names are split off in order
    pub fn normalize(
        trims: &[RawTrim],
        source_frame_count: Option<u64>,
    ) -> Result<(Vec<Trim>, ChapterNames), TimelineError> {
        let mut normalized = Vec::with_capacity(trims.len());
        let mut names = Vec::with_capacity(trims.len());

        for (index, raw) in trims.iter().enumerate() {
            let invalid = |reason| TimelineError::InvalidTrim {
                index,
                value: format!("({}, {})", raw.start, raw.end),
                reason,
            };

            if raw.start < 0 {
                return Err(invalid(TrimViolation::NegativeStart));
            }

            let end = if raw.is_open_ended() {
                let frame_count =
                    source_frame_count.ok_or(TimelineError::UnresolvedSentinel { index })?;
                let last_frame = frame_count as i64 - 1;
                debug!(index, last_frame, "Resolved open-ended trim");
                last_frame
            } else {
                raw.end
            };

            if end < raw.start {
                return Err(invalid(TrimViolation::EndBeforeStart));
            }

            normalized.push(Trim {
                start: raw.start as u64,
                end: end as u64,
            });
            names.push(raw.name.clone());
        }

        Ok((normalized, ChapterNames::new(names)))
    }

    /// Validate raw trims into a timeline
    pub fn build(
        trims: &[RawTrim],
        source_frame_count: Option<u64>,
    ) -> Result<Timeline, TimelineError> {
        let (trims, names) = Self::normalize(trims, source_frame_count)?;
        let timeline = Timeline::new(trims, names);
        debug!(
            trims = timeline.len(),
            ordered = timeline.is_ordered(),
            "Timeline validated"
        );
        Ok(timeline)
    }

    /// Validate untyped input into a timeline
    pub fn build_from_value(
        input: &Value,
        source_frame_count: Option<u64>,
    ) -> Result<Timeline, TimelineError> {
        let raw = Self::parse_value(input)?;
        Self::build(&raw, source_frame_count)
    }
}

/// Ordering analysis over validated trims
pub struct TimelineOrderer;

impl TimelineOrderer {
    /// True when no trim starts before the previous trim's end
    pub fn is_ordered(trims: &[Trim]) -> bool {
        trims
            .windows(2)
            .all(|pair| pair[0].end <= pair[1].start)
    }

    /// Coalesce runs of trims where one ends the frame before the next starts
    pub fn merge_adjacent(trims: &[Trim]) -> Vec<Trim> {
        let mut merged: Vec<Trim> = Vec::with_capacity(trims.len());
        for trim in trims {
            match merged.last_mut() {
                Some(current) if current.end + 1 == trim.start => current.end = trim.end,
                _ => merged.push(*trim),
            }
        }
        merged
    }
}
