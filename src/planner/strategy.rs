//! Command compilation for both cut strategies

use tracing::{debug, info};

use crate::domain::errors::TimelineError;
use crate::domain::model::{FrameRate, Timeline, Trim};
use crate::domain::rules::TimelineOrderer;
use crate::planner::{
    escape_double_quoted, CommandPlan, CutStrategy, INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER,
    SYNC_PLACEHOLDER,
};
use crate::utils::time::{frame_to_timecode, TimecodePrecision};

/// Compiles a validated timeline into mkvmerge command text
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    tool_path: String,
    fps: FrameRate,
    temp_prefix: String,
}

impl CommandCompiler {
    /// Create a compiler for a source running at `fps`
    pub fn new(tool_path: impl Into<String>, fps: FrameRate) -> Self {
        Self {
            tool_path: tool_path.into(),
            fps,
            temp_prefix: "tmp".to_string(),
        }
    }

    /// Prefix of the numbered temporary files used by the unordered strategy
    pub fn with_temp_prefix(mut self, temp_prefix: impl Into<String>) -> Self {
        self.temp_prefix = temp_prefix.into();
        self
    }

    /// Compile the timeline with the strategy its orderedness calls for
    pub fn compile(&self, timeline: &Timeline) -> Result<CommandPlan, TimelineError> {
        if timeline.is_empty() {
            return Err(TimelineError::EmptyTimeline);
        }

        let strategy = CutStrategy::for_timeline(timeline);
        info!(
            trims = timeline.len(),
            ?strategy,
            fps = %self.fps,
            "Compiling remux commands"
        );

        match strategy {
            CutStrategy::Ordered => {
                let merged = TimelineOrderer::merge_adjacent(timeline.trims());
                debug!(
                    before = timeline.len(),
                    after = merged.len(),
                    "Merged adjacent trims"
                );
                self.compile_ordered(&merged)
            }
            CutStrategy::Unordered => self.compile_unordered(timeline.trims()),
        }
    }

    /// One split-parts invocation; each range is joined to the previous one
    pub fn compile_ordered(&self, merged: &[Trim]) -> Result<CommandPlan, TimelineError> {
        if merged.is_empty() {
            return Err(TimelineError::EmptyTimeline);
        }

        let parts = merged
            .iter()
            .map(|trim| self.split_range(trim))
            .collect::<Vec<_>>()
            .join(",+");

        let command = format!(
            "\"{tool}\" --split parts:{parts} -o \"{output}\"{sync} \"{input}\"",
            tool = escape_double_quoted(&self.tool_path),
            parts = parts,
            output = OUTPUT_PLACEHOLDER,
            sync = SYNC_PLACEHOLDER,
            input = INPUT_PLACEHOLDER,
        );
        Ok(CommandPlan::Split { command })
    }

    /// One extraction per trim in caller order, then a concatenation
    pub fn compile_unordered(&self, trims: &[Trim]) -> Result<CommandPlan, TimelineError> {
        if trims.is_empty() {
            return Err(TimelineError::EmptyTimeline);
        }

        let tool = escape_double_quoted(&self.tool_path);
        let temp_files: Vec<String> = (1..=trims.len())
            .map(|number| format!("{}-{:03}.mka", self.temp_prefix, number))
            .collect();

        let extractions = trims
            .iter()
            .zip(&temp_files)
            .map(|(trim, temp_file)| {
                format!(
                    "\"{tool}\" --split parts:{range} -o \"{temp}\"{sync} \"{input}\"",
                    tool = tool,
                    range = self.split_range(trim),
                    temp = escape_double_quoted(temp_file),
                    sync = SYNC_PLACEHOLDER,
                    input = INPUT_PLACEHOLDER,
                )
            })
            .collect();

        let sources = temp_files
            .iter()
            .map(|temp_file| format!("\"(\" \"{}\" \")\"", escape_double_quoted(temp_file)))
            .collect::<Vec<_>>()
            .join(" + ");

        let mut concatenation = format!(
            "\"{tool}\" -o \"{output}\" {sources}",
            tool = tool,
            output = OUTPUT_PLACEHOLDER,
            sources = sources,
        );
        // File k, track 0 goes after file k-1, track 0
        let linkage = (1..temp_files.len())
            .map(|k| format!("{}:0:{}:0", k, k - 1))
            .collect::<Vec<_>>()
            .join(",");
        if !linkage.is_empty() {
            concatenation.push_str(" --append-to ");
            concatenation.push_str(&linkage);
        }

        Ok(CommandPlan::ExtractAndAppend {
            extractions,
            concatenation,
            temp_files,
        })
    }

    /// `start-end` where end is the first frame after the inclusive trim end
    fn split_range(&self, trim: &Trim) -> String {
        format!(
            "{}-{}",
            frame_to_timecode(trim.start, self.fps, TimecodePrecision::Nanosecond),
            frame_to_timecode(trim.exclusive_end(), self.fps, TimecodePrecision::Nanosecond)
        )
    }
}
