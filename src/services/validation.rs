// File validation
// Accepted media types per content mode. Pure policy, no side effects.

use crate::models::Mode;
use thiserror::Error;

const IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg"];
const TEXT_TYPES: &[&str] = &["text/plain"];
const AUDIO_TYPES: &[&str] = &["audio/mpeg", "audio/wav"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid file type \"{media_type}\" for {mode} mode")]
    InvalidType { mode: Mode, media_type: String },
    #[error("no file staged for detection")]
    NoFileStaged,
    #[error("a detection request is already in flight")]
    RequestInFlight,
}

/// Media types accepted for a mode. Every mode has a non-empty set and no
/// type belongs to two modes.
pub fn accepted_types(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Image => IMAGE_TYPES,
        Mode::Text => TEXT_TYPES,
        Mode::Audio => AUDIO_TYPES,
    }
}

pub fn is_acceptable(mode: Mode, media_type: &str) -> bool {
    accepted_types(mode).iter().any(|t| *t == media_type)
}

/// String-keyed variant for callers holding an unparsed mode name. An
/// unknown mode accepts nothing.
pub fn is_acceptable_for(mode: &str, media_type: &str) -> bool {
    match Mode::parse(mode) {
        Some(mode) => is_acceptable(mode, media_type),
        None => false,
    }
}

/// Comma-separated accept list for the platform file picker.
pub fn accept_attribute(mode: Mode) -> String {
    accepted_types(mode).join(", ")
}

/// Map a file extension to the media type a picker-less caller (the CLI)
/// should declare. Extensions outside the accepted tables map to `None`.
pub fn media_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension.trim_start_matches('.').to_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "txt" => Some("text/plain"),
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        _ => None,
    }
}
