// Detection protocol constants
// Wire-level names shared by the client and its configuration.

use crate::models::Mode;
use serde::{Deserialize, Serialize};

/// Multipart field name the detection service reads the upload from.
pub const DETECT_FIELD_NAME: &str = "file";

/// The one detection path the service currently wires. Text and audio
/// submissions go through it as well until the service grows mode-specific
/// endpoints; see `EndpointTable`.
pub const DEFAULT_DETECT_PATH: &str = "/check-image-huggingface/";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

fn default_detect_path() -> String {
    DEFAULT_DETECT_PATH.to_string()
}

/// Per-mode detection paths. Kept in configuration so pointing a mode at a
/// dedicated endpoint is a config edit, not a code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointTable {
    #[serde(default = "default_detect_path")]
    pub image: String,
    #[serde(default = "default_detect_path")]
    pub text: String,
    #[serde(default = "default_detect_path")]
    pub audio: String,
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self {
            image: default_detect_path(),
            text: default_detect_path(),
            audio: default_detect_path(),
        }
    }
}

impl EndpointTable {
    pub fn path_for(&self, mode: Mode) -> &str {
        match mode {
            Mode::Image => &self.image,
            Mode::Text => &self.text,
            Mode::Audio => &self.audio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_uses_single_path() {
        let table = EndpointTable::default();
        for mode in Mode::ALL {
            assert_eq!(table.path_for(mode), DEFAULT_DETECT_PATH);
        }
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let table: EndpointTable = serde_json::from_str(r#"{"text": "/check-text/"}"#).unwrap();
        assert_eq!(table.path_for(Mode::Text), "/check-text/");
        assert_eq!(table.path_for(Mode::Image), DEFAULT_DETECT_PATH);
    }
}
