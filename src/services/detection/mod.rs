// Detection service client
// - endpoints: wire constants and the per-mode endpoint table
// - client: multipart submission and response/error translation

pub mod client;
pub mod endpoints;

#[cfg(test)]
pub(crate) mod testutil;

pub use client::{DetectionClient, DetectionError};
pub use endpoints::{EndpointTable, DEFAULT_BASE_URL, DEFAULT_DETECT_PATH, DETECT_FIELD_NAME};
