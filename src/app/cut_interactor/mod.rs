// Cut interactor - Runs a compiled plan against a source audio file

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::adapters::AudioLocator;
use crate::error::AudioCutResult;
use crate::planner::{CommandPlan, PlaceholderValues};
use crate::ports::{RemuxPort, RemuxStatus};
use crate::streams::AudioTrackMapper;

/// Where the audio to cut comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    /// An explicit audio file
    File(PathBuf),
    /// The largest `.aac`/`.ac3` file named after this video
    MatchVideo(PathBuf),
}

/// Cut request
#[derive(Debug, Clone)]
pub struct CutRequest {
    pub plan: CommandPlan,
    pub source: AudioSource,
    pub output: PathBuf,
    /// Resolve and fill the commands without running them
    pub dry_run: bool,
}

/// Cut result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutReport {
    pub audio: PathBuf,
    /// Filled command lines, in execution order
    pub commands: Vec<String>,
    /// Invocations that exited with warnings
    pub warnings: usize,
    pub executed: bool,
}

/// Interactor for the audio cutting use case
pub struct CutInteractor {
    remux_port: Arc<dyn RemuxPort>,
    track_mapper: AudioTrackMapper,
}

impl CutInteractor {
    pub fn new(remux_port: Arc<dyn RemuxPort>, track_mapper: AudioTrackMapper) -> Self {
        Self {
            remux_port,
            track_mapper,
        }
    }

    /// Locate the audio, fill the plan and run each command in order
    pub async fn execute(&self, request: CutRequest) -> AudioCutResult<CutReport> {
        let audio = match &request.source {
            AudioSource::File(path) => path.clone(),
            AudioSource::MatchVideo(video) => AudioLocator::find_for_video(video)?,
        };
        let audio_text = audio.display().to_string();

        let identify_output = if request.dry_run {
            None
        } else {
            Some(self.remux_port.identify(&audio_text).await?)
        };
        let track_options = self.track_mapper.map(&audio, identify_output.as_deref());

        let values = PlaceholderValues::new(&audio_text, request.output.display().to_string())
            .with_sync_args(track_options.render());
        let commands = request.plan.render(&values);

        if request.dry_run {
            info!("Dry run, {} command(s) not executed", commands.len());
            return Ok(CutReport {
                audio,
                commands,
                warnings: 0,
                executed: false,
            });
        }

        // Temporary files go whether or not the sequence completed
        let outcome = self.run_commands(&commands).await;
        self.remove_temp_files(request.plan.temp_files()).await;
        let warnings = outcome?;
        info!("Cut audio written to {}", request.output.display());

        Ok(CutReport {
            audio,
            commands,
            warnings,
            executed: true,
        })
    }

    /// Run in order, stopping at the first failure; returns the warning count
    async fn run_commands(&self, commands: &[String]) -> AudioCutResult<usize> {
        let mut warnings = 0;
        for command in commands {
            if self.remux_port.run(command).await? == RemuxStatus::Warnings {
                warn!("mkvmerge exited with warnings: {}", command);
                warnings += 1;
            }
        }
        Ok(warnings)
    }

    async fn remove_temp_files(&self, temp_files: &[String]) {
        for temp_file in temp_files {
            if let Err(e) = tokio::fs::remove_file(Path::new(temp_file)).await {
                warn!("Could not remove temporary file {}: {}", temp_file, e);
            }
        }
    }
}
