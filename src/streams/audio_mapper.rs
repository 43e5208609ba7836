//! Audio track option mapping from mkvmerge JSON identification output

use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{AudioCutError, AudioCutResult};

/// Track options that apply to the source audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTrackOptions {
    /// Track id of the first audio track, `0` when identify found none
    pub track_id: String,
    /// `--aac-is-sbr` value, only set for AAC sources
    pub aac_sbr: Option<bool>,
    /// Delay in milliseconds parsed from the file name
    pub delay_ms: Option<i64>,
}

impl SourceTrackOptions {
    /// Render as the `{sync-args}` fill; empty when there is nothing to add
    pub fn render(&self) -> String {
        let mut args = String::new();
        if let Some(delay) = self.delay_ms {
            args.push_str(&format!(" --sync {}:{}", self.track_id, delay));
        }
        if let Some(sbr) = self.aac_sbr {
            args.push_str(&format!(
                " --aac-is-sbr {}:{}",
                self.track_id,
                if sbr { 1 } else { 0 }
            ));
        }
        args
    }
}

/// Subset of `mkvmerge --identification-format json --identify`
#[derive(Debug, Default, Deserialize)]
struct Identification {
    #[serde(default)]
    tracks: Vec<IdentifiedTrack>,
}

#[derive(Debug, Deserialize)]
struct IdentifiedTrack {
    id: u64,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
}

impl IdentifiedTrack {
    /// mkvmerge reports `"true"`, `"false"` or `"unknown"`; a JSON bool is accepted too
    fn is_sbr(&self) -> bool {
        match self.properties.get("aac_is_sbr") {
            Some(serde_json::Value::String(flag)) => flag == "true",
            Some(serde_json::Value::Bool(flag)) => *flag,
            _ => false,
        }
    }
}

/// Extracts track options from identification output and the file name
pub struct AudioTrackMapper {
    delay_pattern: Regex,
}

impl AudioTrackMapper {
    pub fn new() -> AudioCutResult<Self> {
        let delay_pattern = Regex::new(r"(?i)DELAY (-?\d+)").map_err(|e| AudioCutError::Config {
            message: format!("bad delay pattern: {}", e),
        })?;
        Ok(Self { delay_pattern })
    }

    /// Options for `audio`, given mkvmerge's JSON identification of it
    pub fn map(&self, audio: &Path, identify_output: Option<&str>) -> SourceTrackOptions {
        let audio_track = identify_output
            .and_then(|output| match serde_json::from_str::<Identification>(output) {
                Ok(identification) => Some(identification),
                Err(e) => {
                    warn!("Unreadable identification for {}: {}", audio.display(), e);
                    None
                }
            })
            .and_then(|identification| {
                identification
                    .tracks
                    .into_iter()
                    .find(|track| track.kind == "audio")
            });

        let track_id = audio_track
            .as_ref()
            .map_or_else(|| "0".to_string(), |track| track.id.to_string());
        let flagged_sbr = audio_track.as_ref().is_some_and(IdentifiedTrack::is_sbr);

        let is_aac = audio
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("aac"));
        let aac_sbr = if flagged_sbr {
            Some(true)
        } else if is_aac {
            Some(false)
        } else {
            None
        };

        let delay_ms = audio
            .file_name()
            .map(|name| name.to_string_lossy())
            .and_then(|name| {
                self.delay_pattern
                    .captures(&name)
                    .and_then(|c| c.get(1))
                    .and_then(|m| m.as_str().parse::<i64>().ok())
            });

        let options = SourceTrackOptions {
            track_id,
            aac_sbr,
            delay_ms,
        };
        debug!(?options, audio = %audio.display(), "Mapped source track options");
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> AudioTrackMapper {
        AudioTrackMapper::new().unwrap()
    }

    /// Trimmed-down `--identification-format json --identify` output
    fn identification(codec: &str, id: u64, sbr: Option<&str>) -> String {
        let properties = match sbr {
            Some(flag) => format!(
                r#"{{"aac_is_sbr": "{}", "audio_channels": 2, "audio_sampling_frequency": 48000, "number": 1}}"#,
                flag
            ),
            None => r#"{"audio_channels": 6, "audio_sampling_frequency": 48000, "number": 1}"#
                .to_string(),
        };
        format!(
            r#"{{
  "container": {{"properties": {{}}, "recognized": true, "supported": true, "type": "{codec}"}},
  "errors": [],
  "file_name": "source.{ext}",
  "identification_format_version": 14,
  "tracks": [
    {{"codec": "{codec}", "id": {id}, "properties": {properties}, "type": "audio"}}
  ],
  "warnings": []
}}"#,
            codec = codec,
            ext = codec.to_lowercase(),
            id = id,
            properties = properties,
        )
    }

    #[test]
    fn test_sbr_aac_with_delay() {
        let identify = identification("AAC", 0, Some("true"));
        let options = mapper().map(Path::new("/src/ep01 T80 DELAY -24ms.aac"), Some(&identify));
        assert_eq!(
            options,
            SourceTrackOptions {
                track_id: "0".to_string(),
                aac_sbr: Some(true),
                delay_ms: Some(-24),
            }
        );
        assert_eq!(options.render(), " --sync 0:-24 --aac-is-sbr 0:1");
    }

    #[test]
    fn test_lc_aac_marks_not_sbr() {
        let identify = identification("AAC", 0, Some("false"));
        let options = mapper().map(Path::new("ep01.aac"), Some(&identify));
        assert_eq!(options.aac_sbr, Some(false));
        assert_eq!(options.render(), " --aac-is-sbr 0:0");
    }

    #[test]
    fn test_unknown_sbr_on_aac_falls_back_to_lc() {
        let identify = identification("AAC", 0, Some("unknown"));
        let options = mapper().map(Path::new("ep01.aac"), Some(&identify));
        assert_eq!(options.aac_sbr, Some(false));
    }

    #[test]
    fn test_ac3_has_no_sbr_option() {
        let identify = identification("AC-3", 2, None);
        let options = mapper().map(Path::new("ep01 delay 100ms.ac3"), Some(&identify));
        assert_eq!(options.track_id, "2");
        assert_eq!(options.aac_sbr, None);
        assert_eq!(options.render(), " --sync 2:100");
    }

    #[test]
    fn test_first_audio_track_wins() {
        let identify = r#"{"tracks": [
            {"codec": "AVC/H.264/MPEG-4p10", "id": 0, "properties": {}, "type": "video"},
            {"codec": "AAC", "id": 1, "properties": {"aac_is_sbr": "true"}, "type": "audio"},
            {"codec": "AC-3", "id": 2, "properties": {}, "type": "audio"}
        ]}"#;
        let options = mapper().map(Path::new("mux.mka"), Some(identify));
        assert_eq!(options.track_id, "1");
        assert_eq!(options.aac_sbr, Some(true));
        assert_eq!(options.render(), " --aac-is-sbr 1:1");
    }

    #[test]
    fn test_unreadable_identification_uses_defaults() {
        let options = mapper().map(Path::new("ep01.aac"), Some("Track ID 0: audio (AAC)\n"));
        assert_eq!(options.track_id, "0");
        assert_eq!(options.aac_sbr, Some(false));
    }

    #[test]
    fn test_no_identify_output_defaults_track_zero() {
        let options = mapper().map(Path::new("audio.ac3"), None);
        assert_eq!(options.track_id, "0");
        assert_eq!(options.render(), "");
    }
}
