// Mode state
// Single source of truth for the current content mode, the staged file, and
// the request-in-flight flag that serializes detection dispatches.

use crate::models::{FileCandidate, Mode, StagedFile};
use crate::services::validation::{is_acceptable, ValidationError};

#[derive(Debug, Clone)]
pub struct ModeState {
    mode: Mode,
    staged: Option<StagedFile>,
    request_in_flight: bool,
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new(Mode::Image)
    }
}

impl ModeState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            staged: None,
            request_in_flight: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn staged_file(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    pub fn request_in_flight(&self) -> bool {
        self.request_in_flight
    }

    /// Switch the current mode. Always clears the staged file, including when
    /// the same mode is re-selected: a file validated under the old selection
    /// must never survive into a new one unchecked.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.staged = None;
    }

    /// Stage a candidate if its declared media type is accepted for the
    /// current mode. Rejection leaves any previously staged file untouched.
    pub fn stage_file(&mut self, candidate: FileCandidate) -> Result<(), ValidationError> {
        if !is_acceptable(self.mode, &candidate.media_type) {
            return Err(ValidationError::InvalidType {
                mode: self.mode,
                media_type: candidate.media_type,
            });
        }
        self.staged = Some(StagedFile::from_candidate(candidate));
        Ok(())
    }

    pub fn clear_staged_file(&mut self) {
        self.staged = None;
    }

    /// Mark a detection dispatch as started. A second dispatch while one is
    /// pending is rejected rather than queued.
    pub fn begin_request(&mut self) -> Result<(), ValidationError> {
        if self.request_in_flight {
            return Err(ValidationError::RequestInFlight);
        }
        self.request_in_flight = true;
        Ok(())
    }

    pub fn finish_request(&mut self) {
        self.request_in_flight = false;
    }
}
