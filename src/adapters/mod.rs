// Adapters - External system implementations

pub mod audio_locator;
pub mod exec_mkvmerge;
pub mod toml_config;

// Re-export adapters
pub use audio_locator::AudioLocator;
pub use exec_mkvmerge::MkvmergeAdapter;
pub use toml_config::{AppConfig, TomlConfigAdapter};
