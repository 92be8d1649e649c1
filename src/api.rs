// Presentation-facing API surface
// Adapts the typed core into the string-in/string-out shape a UI shell
// consumes: mode names in, display-ready messages out. Error policy stays in
// the services; this layer only renders it.

use crate::models::{DetectionOutcome, DetectionReport, FileCandidate, Mode};
use crate::services::config_store::{AppConfig, ConfigStore};
use crate::services::upload::UploadController;
use crate::services::validation;

pub struct UploadSession {
    controller: UploadController,
}

impl UploadSession {
    /// Session backed by the persisted configuration, or defaults when no
    /// config file exists yet.
    pub fn new() -> Result<Self, String> {
        let config = load_config()?;
        Self::with_config(&config)
    }

    pub fn with_config(config: &AppConfig) -> Result<Self, String> {
        let controller = UploadController::new(config)
            .map_err(|e| format!("Failed to build detection client: {}", e))?;
        Ok(Self { controller })
    }

    pub fn current_mode(&self) -> &'static str {
        self.controller.state().mode().as_str()
    }

    /// Media types the file picker should offer in the current mode.
    pub fn accepted_types(&self) -> Vec<String> {
        validation::accepted_types(self.controller.state().mode())
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    /// Comma-separated accept list for an HTML-style picker.
    pub fn accept_attribute(&self) -> String {
        validation::accept_attribute(self.controller.state().mode())
    }

    pub fn staged_file_name(&self) -> Option<String> {
        self.controller
            .state()
            .staged_file()
            .map(|f| f.file_name.clone())
    }

    pub fn select_mode(&mut self, mode: &str) -> Result<(), String> {
        let mode = Mode::parse(mode).ok_or_else(|| format!("Unknown mode: {}", mode))?;
        self.controller.on_mode_selected(mode);
        Ok(())
    }

    pub fn choose_file(
        &mut self,
        file_name: String,
        media_type: String,
        bytes: Vec<u8>,
    ) -> Result<(), String> {
        self.controller
            .on_file_chosen(FileCandidate {
                file_name,
                media_type,
                bytes,
            })
            .map_err(|e| e.to_string())
    }

    pub async fn detect(&mut self) -> Result<DetectionReport, String> {
        self.controller
            .on_detect_requested()
            .await
            .map_err(|e| e.to_string())
    }

    pub fn last_outcome(&self) -> Option<DetectionOutcome> {
        self.controller.last_outcome().cloned()
    }

    pub async fn test_connection(&self) -> Result<(), String> {
        self.controller
            .client()
            .ping()
            .await
            .map_err(|e| e.to_string())
    }
}

/// Load the persisted configuration, or defaults when none exists.
pub fn load_config() -> Result<AppConfig, String> {
    match ConfigStore::default_config_dir() {
        Some(dir) => ConfigStore::new(dir).load(),
        None => Ok(AppConfig::default()),
    }
}

pub fn save_config(config: &AppConfig) -> Result<(), String> {
    let dir = ConfigStore::default_config_dir()
        .ok_or_else(|| "No config directory available".to_string())?;
    ConfigStore::new(dir).save(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::detection::testutil;

    fn session(base_url: &str) -> UploadSession {
        let mut config = AppConfig::default();
        config.base_url = base_url.to_string();
        config.request_timeout_ms = 5_000;
        UploadSession::with_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_mode_name_is_rejected() {
        let server = testutil::spawn(vec![(200, "{}")]).await;
        let mut session = session(&server.url);
        let err = session.select_mode("video").unwrap_err();
        assert!(err.contains("video"));
        assert_eq!(session.current_mode(), "image");
    }

    #[tokio::test]
    async fn test_rejection_message_names_type_and_mode() {
        let server = testutil::spawn(vec![(200, "{}")]).await;
        let mut session = session(&server.url);
        session.select_mode("text").unwrap();

        let err = session
            .choose_file("a.png".into(), "image/png".into(), vec![1, 2, 3])
            .unwrap_err();
        assert!(err.contains("image/png"));
        assert!(err.contains("text"));
        assert!(session.staged_file_name().is_none());
    }

    #[tokio::test]
    async fn test_accepted_types_follow_mode() {
        let server = testutil::spawn(vec![(200, "{}")]).await;
        let mut session = session(&server.url);
        assert_eq!(session.accepted_types(), vec!["image/png", "image/jpeg"]);

        session.select_mode("audio").unwrap();
        assert_eq!(session.accept_attribute(), "audio/mpeg, audio/wav");
    }

    #[tokio::test]
    async fn test_detect_through_facade() {
        let server = testutil::spawn(vec![(200, r#"{"label": "ai-generated"}"#)]).await;
        let mut session = session(&server.url);
        session
            .choose_file("a.png".into(), "image/png".into(), b"png-bytes".to_vec())
            .unwrap();

        let report = session.detect().await.unwrap();
        assert_eq!(report.payload["label"], "ai-generated");
        assert_eq!(session.staged_file_name().as_deref(), Some("a.png"));
    }
}
