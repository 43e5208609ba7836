//! Remux command planning
//!
//! A [`CommandPlan`] is mkvmerge command text with three placeholders left
//! open: [`INPUT_PLACEHOLDER`], [`OUTPUT_PLACEHOLDER`] and
//! [`SYNC_PLACEHOLDER`]. They are filled by [`PlaceholderValues`] right
//! before execution.

use serde::Serialize;

use crate::domain::model::Timeline;

pub mod strategy;

pub use strategy::CommandCompiler;

/// Replaced by the source audio path
pub const INPUT_PLACEHOLDER: &str = "{input}";
/// Replaced by the final output path
pub const OUTPUT_PLACEHOLDER: &str = "{output}";
/// Replaced by per-source track options such as `--sync`, or nothing
pub const SYNC_PLACEHOLDER: &str = "{sync-args}";

/// How the trims are turned into mkvmerge invocations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CutStrategy {
    /// One `--split parts:` call that extracts and joins in a single pass
    Ordered,
    /// One extraction per trim, then an appending concatenation
    Unordered,
}

impl CutStrategy {
    /// Pick the strategy from the timeline's cached orderedness
    pub fn for_timeline(timeline: &Timeline) -> Self {
        if timeline.is_ordered() {
            CutStrategy::Ordered
        } else {
            CutStrategy::Unordered
        }
    }
}

/// Compiled command text, placeholders unfilled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum CommandPlan {
    /// Single split-parts invocation
    Split { command: String },
    /// Extraction per trim into numbered temporary files, then a concatenation
    ExtractAndAppend {
        extractions: Vec<String>,
        concatenation: String,
        temp_files: Vec<String>,
    },
}

impl CommandPlan {
    pub fn strategy(&self) -> CutStrategy {
        match self {
            CommandPlan::Split { .. } => CutStrategy::Ordered,
            CommandPlan::ExtractAndAppend { .. } => CutStrategy::Unordered,
        }
    }

    /// Invocations in execution order
    pub fn commands(&self) -> Vec<&str> {
        match self {
            CommandPlan::Split { command } => vec![command.as_str()],
            CommandPlan::ExtractAndAppend {
                extractions,
                concatenation,
                ..
            } => extractions
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(concatenation.as_str()))
                .collect(),
        }
    }

    /// All invocations, one per line
    pub fn text(&self) -> String {
        self.commands().join("\n")
    }

    /// Intermediate files the plan creates
    pub fn temp_files(&self) -> &[String] {
        match self {
            CommandPlan::Split { .. } => &[],
            CommandPlan::ExtractAndAppend { temp_files, .. } => temp_files,
        }
    }

    /// Fill the placeholders of every invocation
    pub fn render(&self, values: &PlaceholderValues) -> Vec<String> {
        self.commands()
            .into_iter()
            .map(|command| values.fill(command))
            .collect()
    }
}

/// Values substituted into a plan at execution time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderValues {
    pub input: String,
    pub output: String,
    /// Leading-space separated track options, empty for none
    pub sync_args: String,
}

impl PlaceholderValues {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            sync_args: String::new(),
        }
    }

    pub fn with_sync_args(mut self, sync_args: impl Into<String>) -> Self {
        self.sync_args = sync_args.into();
        self
    }

    /// Substitute into one command; paths sit inside double quotes
    pub fn fill(&self, command: &str) -> String {
        command
            .replace(INPUT_PLACEHOLDER, &escape_double_quoted(&self.input))
            .replace(OUTPUT_PLACEHOLDER, &escape_double_quoted(&self.output))
            .replace(SYNC_PLACEHOLDER, &self.sync_args)
    }
}

/// Escape text for a POSIX double-quoted word
pub(crate) fn escape_double_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
