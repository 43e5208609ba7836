// Domain errors - Error types for timeline validation and compilation

use thiserror::Error;

/// Why a single trim was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimViolation {
    /// Fewer than two members
    MissingBounds,
    /// Start or end is not an integer
    NonIntegerBounds,
    /// Start frame is below zero
    NegativeStart,
    /// End frame precedes start frame
    EndBeforeStart,
    /// Third member is neither a string nor null
    NonStringName,
}

impl std::fmt::Display for TrimViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TrimViolation::MissingBounds => "trim needs a start and an end frame",
            TrimViolation::NonIntegerBounds => "start and end must both be integers",
            TrimViolation::NegativeStart => "start frame cannot be negative",
            TrimViolation::EndBeforeStart => "end frame is before start frame",
            TrimViolation::NonStringName => "chapter name must be a string",
        };
        f.write_str(text)
    }
}

/// Errors raised while validating or compiling a trim timeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// Input is not a list of lists
    #[error("Malformed trim input: {detail}")]
    MalformedInput { detail: String },

    /// A trim broke one of the validation rules
    #[error("Invalid trim #{index} ({value}): {reason}")]
    InvalidTrim {
        index: usize,
        value: String,
        reason: TrimViolation,
    },

    /// Nothing to compile or serialize
    #[error("Timeline is empty")]
    EmptyTimeline,

    /// Open-ended trim with no known frame count to resolve it against
    #[error("Trim #{index} runs to the end of the video, but the frame count is unknown")]
    UnresolvedSentinel { index: usize },

    /// Framerate text could not be parsed or had a zero term
    #[error("Invalid framerate: {value}. Expected NUM/DEN or an integer, both positive")]
    InvalidFrameRate { value: String },
}

impl TimelineError {
    /// Index of the offending trim, when the error concerns one
    pub fn trim_index(&self) -> Option<usize> {
        match self {
            TimelineError::InvalidTrim { index, .. }
            | TimelineError::UnresolvedSentinel { index } => Some(*index),
            _ => None,
        }
    }
}
