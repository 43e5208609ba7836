use std::sync::Arc;

use crate::adapters::{AppConfig, MkvmergeAdapter};
use crate::app::cut_interactor::CutInteractor;
use crate::domain::model::FrameRate;
use crate::error::AudioCutResult;
use crate::planner::CommandCompiler;
use crate::ports::RemuxPort;
use crate::streams::AudioTrackMapper;

pub trait AppContainer: Send + Sync {
    fn cut_interactor(&self) -> Arc<CutInteractor>;
    fn command_compiler(&self, fps: FrameRate) -> CommandCompiler;
}

pub struct DefaultAppContainer {
    config: AppConfig,
    cut_interactor: Arc<CutInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: AppConfig) -> AudioCutResult<Self> {
        let remux_port = Arc::new(MkvmergeAdapter::new(config.mkvmerge_path.clone()));
        Self::with_remux_port(config, remux_port)
    }

    /// Wire the interactors around a caller-supplied remux port
    pub fn with_remux_port(
        config: AppConfig,
        remux_port: Arc<dyn RemuxPort>,
    ) -> AudioCutResult<Self> {
        let cut_interactor = Arc::new(CutInteractor::new(
            remux_port,
            AudioTrackMapper::new()?,
        ));

        Ok(Self {
            config,
            cut_interactor,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl AppContainer for DefaultAppContainer {
    fn cut_interactor(&self) -> Arc<CutInteractor> {
        Arc::clone(&self.cut_interactor)
    }

    fn command_compiler(&self, fps: FrameRate) -> CommandCompiler {
        CommandCompiler::new(self.config.mkvmerge_path.clone(), fps)
            .with_temp_prefix(self.config.temp_prefix.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ChapterNames, Timeline, Trim};
    use crate::planner::CommandPlan;

    #[test]
    fn test_compiler_uses_configured_tool_and_prefix() {
        let config = AppConfig {
            mkvmerge_path: "/opt/mkvmerge".to_string(),
            temp_prefix: "scratch".to_string(),
            ..AppConfig::default()
        };
        let container = DefaultAppContainer::new(config).unwrap();
        let timeline = Timeline::new(
            vec![Trim::new(20, 30).unwrap(), Trim::new(0, 10).unwrap()],
            ChapterNames::default(),
        );
        let plan = container
            .command_compiler(FrameRate::new(25, 1).unwrap())
            .compile(&timeline)
            .unwrap();

        match plan {
            CommandPlan::ExtractAndAppend { temp_files, extractions, .. } => {
                assert_eq!(temp_files, vec!["scratch-001.mka", "scratch-002.mka"]);
                assert!(extractions[0].starts_with("\"/opt/mkvmerge\""));
            }
            other => panic!("expected extract and append, got {:?}", other),
        }
    }
}
