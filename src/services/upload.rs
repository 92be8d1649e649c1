// Upload orchestration
// Reacts to user actions (mode selection, file choice, detect), keeps
// validation ahead of any network traffic, and surfaces one outcome per
// dispatch.

use crate::models::{DetectionOutcome, DetectionReport, DetectionRequest, FileCandidate, Mode};
use crate::services::config_store::AppConfig;
use crate::services::detection::{DetectionClient, DetectionError};
use crate::services::mode_state::ModeState;
use crate::services::validation::ValidationError;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Detection(#[from] DetectionError),
}

pub struct UploadController {
    state: ModeState,
    client: DetectionClient,
    last_outcome: Option<DetectionOutcome>,
}

impl UploadController {
    pub fn new(config: &AppConfig) -> Result<Self, DetectionError> {
        Ok(Self {
            state: ModeState::default(),
            client: DetectionClient::new(config)?,
            last_outcome: None,
        })
    }

    pub fn state(&self) -> &ModeState {
        &self.state
    }

    pub fn client(&self) -> &DetectionClient {
        &self.client
    }

    /// Outcome of the most recent dispatch, until the next dispatch or a
    /// mode change replaces it.
    pub fn last_outcome(&self) -> Option<&DetectionOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn on_mode_selected(&mut self, mode: Mode) {
        self.state.set_mode(mode);
        self.last_outcome = None;
        info!(mode = %mode, "mode.selected");
    }

    /// Stage a candidate file. A rejected candidate leaves the previously
    /// staged file (if any) in place; the returned error names both the
    /// rejected type and the mode that rejected it.
    pub fn on_file_chosen(&mut self, candidate: FileCandidate) -> Result<(), ValidationError> {
        let file_name = candidate.file_name.clone();
        match self.state.stage_file(candidate) {
            Ok(()) => {
                info!(file = %file_name, mode = %self.state.mode(), "file.staged");
                Ok(())
            }
            Err(err) => {
                warn!(file = %file_name, error = %err, "file.rejected");
                Err(err)
            }
        }
    }

    /// Dispatch the staged file to the detection service. Validation errors
    /// (nothing staged, request already pending) never reach the network;
    /// transport failures leave the staged file in place so the user can
    /// retry without re-uploading.
    pub async fn on_detect_requested(&mut self) -> Result<DetectionReport, UploadError> {
        let staged = self
            .state
            .staged_file()
            .ok_or(ValidationError::NoFileStaged)?;
        let request = DetectionRequest::from_staged(self.state.mode(), staged);

        self.state.begin_request()?;
        let result = self.client.submit(request).await;
        self.state.finish_request();

        match result {
            Ok(report) => {
                self.last_outcome = Some(DetectionOutcome::Completed {
                    report: report.clone(),
                });
                Ok(report)
            }
            Err(err) => {
                self.last_outcome = Some(DetectionOutcome::Failed {
                    error: err.to_string(),
                });
                Err(err.into())
            }
        }
    }
}
