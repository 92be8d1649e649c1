// EchoMark Core Services
// Mode/file state, validation policy, upload orchestration, detection
// client, and configuration storage.

pub mod config_store;
pub mod detection;
pub mod mode_state;
pub mod upload;
pub mod validation;

pub use config_store::{AppConfig, ConfigStore, ProxyConfig};
pub use detection::{
    DetectionClient, DetectionError, EndpointTable, DEFAULT_BASE_URL, DEFAULT_DETECT_PATH,
    DETECT_FIELD_NAME,
};
pub use mode_state::ModeState;
pub use upload::{UploadController, UploadError};
pub use validation::{
    accept_attribute, accepted_types, is_acceptable, is_acceptable_for, media_type_for_extension,
    ValidationError,
};
