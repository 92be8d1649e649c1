// EchoMark Data Models
// Shared types for the mode selection, upload, and detection flow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Content mode selected by the user. Determines which media types a
/// candidate file may carry and which detection endpoint a dispatch hits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Image,
    Text,
    Audio,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Image, Mode::Text, Mode::Audio];

    /// Parse a mode name coming from the presentation layer. Unknown names
    /// yield `None` so callers reject instead of silently defaulting.
    pub fn parse(val: &str) -> Option<Self> {
        match val.trim().to_lowercase().as_str() {
            "image" => Some(Self::Image),
            "text" => Some(Self::Text),
            "audio" => Some(Self::Audio),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file as handed over by the platform file picker: raw bytes plus the
/// declared media type and display name. Not yet validated against any mode.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// A candidate that passed validation for the mode current at staging time.
/// Owned exclusively by `ModeState`; lives until the next mode change or an
/// explicit clear.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
    pub staged_at: DateTime<Utc>,
}

impl StagedFile {
    pub fn from_candidate(candidate: FileCandidate) -> Self {
        Self {
            file_name: candidate.file_name,
            media_type: candidate.media_type,
            bytes: candidate.bytes,
            staged_at: Utc::now(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Ephemeral payload built from the staged file at dispatch time. The id is
/// fresh per dispatch and threads through the request logs.
#[derive(Debug, Clone)]
pub struct DetectionRequest {
    pub id: Uuid,
    pub mode: Mode,
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl DetectionRequest {
    pub fn from_staged(mode: Mode, staged: &StagedFile) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            file_name: staged.file_name.clone(),
            media_type: staged.media_type.clone(),
            bytes: staged.bytes.clone(),
        }
    }
}

/// Successful classification as returned by the detection service. The
/// payload is the response body verbatim; its schema belongs to the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub request_id: Uuid,
    pub mode: Mode,
    pub payload: serde_json::Value,
    pub latency_ms: i64,
}

/// Outcome of the most recent dispatch. Replaced on the next dispatch and
/// dropped on mode change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DetectionOutcome {
    Completed { report: DetectionReport },
    Failed { error: String },
}
