//! Command implementations

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::{AppContainer, AudioSource, CutRequest};
use crate::cli::args::{ChaptersArgs, CheckArgs, CutArgs, PlanArgs, TimelineArgs};
use crate::domain::model::{ChapterNames, Timeline};
use crate::domain::rules::TimelineValidator;
use crate::output::verifier::{render_checks, FrameCheckVerifier};
use crate::output::writer::ArtifactWriter;
use crate::output::{self, OverwritePolicy};

/// Read and validate the trims named on the command line
fn load_timeline(args: &TimelineArgs) -> Result<Timeline> {
    let value = args.read_trims()?;
    let timeline = TimelineValidator::build_from_value(&value, args.frames)
        .with_context(|| format!("Invalid trims in {}", args.trims.display()))?;
    info!(
        "Loaded {} trim(s) from {} ({})",
        timeline.len(),
        args.trims.display(),
        if timeline.is_ordered() { "ordered" } else { "unordered" }
    );
    Ok(timeline)
}

/// Execute the plan command
pub fn plan(args: PlanArgs, container: &dyn AppContainer) -> Result<()> {
    let timeline = load_timeline(&args.timeline)?;
    let plan = container
        .command_compiler(args.timeline.fps)
        .compile(&timeline)
        .context("Failed to compile trims")?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&plan).context("Failed to serialize plan to JSON")?;
        println!("{}", json);
    } else {
        println!("{}", plan.text());
    }
    Ok(())
}

/// Execute the chapters command
pub fn chapters(args: ChaptersArgs, overwrite: OverwritePolicy) -> Result<()> {
    let mut timeline = load_timeline(&args.timeline)?;
    if let Some(names) = args.names {
        timeline = timeline.with_chapter_names(ChapterNames::from_names(names));
    }

    let counts = match args.segment_frames {
        Some(counts) => {
            if counts.len() != timeline.len() {
                warn!(
                    "{} segment frame count(s) given for {} trim(s)",
                    counts.len(),
                    timeline.len()
                );
            }
            counts
        }
        None => timeline.segment_frame_counts(),
    };

    let old_fps = args.timeline.fps;
    let new_fps = args.new_fps.unwrap_or(old_fps);
    let artifacts = output::serialize(&counts, old_fps, new_fps, timeline.names())
        .context("Failed to build chapters")?;

    let writer = ArtifactWriter::new(overwrite);
    emit(&writer, args.qpfile.as_deref(), &artifacts.qpfile, "qpfile")?;
    emit(&writer, args.chapters.as_deref(), &artifacts.chapters, "chapters")?;
    Ok(())
}

/// Write to `path` when given, else print
fn emit(writer: &ArtifactWriter, path: Option<&Path>, contents: &str, what: &str) -> Result<()> {
    match path {
        Some(path) => writer
            .write_text(path, contents)
            .with_context(|| format!("Failed to write {}", what)),
        None => {
            print!("{}", contents);
            Ok(())
        }
    }
}

/// Execute the cut command
pub async fn cut(args: CutArgs, container: &dyn AppContainer) -> Result<()> {
    let timeline = load_timeline(&args.timeline)?;
    let plan = container
        .command_compiler(args.timeline.fps)
        .compile(&timeline)
        .context("Failed to compile trims")?;

    let source = match (args.audio, args.video) {
        (Some(audio), _) => AudioSource::File(audio),
        (None, Some(video)) => AudioSource::MatchVideo(video),
        (None, None) => anyhow::bail!("Either --audio or --video is required"),
    };

    let report = container
        .cut_interactor()
        .execute(CutRequest {
            plan,
            source,
            output: args.output,
            dry_run: args.dry_run,
        })
        .await
        .context("Failed to cut audio")?;

    if report.executed {
        info!(
            "Cut {} with {} command(s), {} warning(s)",
            report.audio.display(),
            report.commands.len(),
            report.warnings
        );
    } else {
        for command in &report.commands {
            println!("{}", command);
        }
    }
    Ok(())
}

/// Execute the check command
pub fn check(args: CheckArgs) -> Result<()> {
    let timeline = load_timeline(&args.timeline)?;
    let checks = FrameCheckVerifier::new(args.timeline.frames).checks(&timeline);

    if args.json {
        let json = serde_json::to_string_pretty(&checks)
            .context("Failed to serialize frame checks to JSON")?;
        println!("{}", json);
    } else {
        print!("{}", render_checks(&checks));
    }
    Ok(())
}
