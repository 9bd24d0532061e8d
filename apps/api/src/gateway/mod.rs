//! External Service Gateway: the boundary around every cloud capability the API uses.
//!
//! Two interchangeable implementations of [`Gateway`]:
//! - [`LiveGateway`]: calls the real services and absorbs any fault into the fallback value.
//! - [`FallbackGateway`]: answers every operation with a fixed value, no network.
//!
//! The choice is made once in [`build_gateway`] at startup and never revisited.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::models::records::DiagnosisLabel;

pub mod aws;
pub mod fallback;
pub mod live;

#[cfg(test)]
pub mod testing;

pub use fallback::FallbackGateway;
pub use live::LiveGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayMode {
    Live,
    Fallback,
}

/// Fault raised by a live backend. Never crosses the `Gateway` boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("classification error: {0}")]
    Classification(String),

    #[error("transcription error: {0}")]
    Transcription(String),

    #[error("advice error: {0}")]
    Advice(String),

    #[error("alert error: {0}")]
    Alert(String),

    #[error("{0} backend is not configured")]
    Unavailable(&'static str),
}

/// One operation per external capability. Every operation is total: callers never
/// see an error, only a live answer or the documented fallback.
#[async_trait]
pub trait Gateway: Send + Sync {
    fn mode(&self) -> GatewayMode;

    /// Stores `blob` under `object_key` and returns a retrievable URL.
    async fn upload(&self, blob: Bytes, object_key: &str) -> String;

    /// Labels for an image previously uploaded at `object_key`. Not enforced.
    async fn classify(&self, object_key: &str) -> Vec<DiagnosisLabel>;

    /// Fire-and-forget. Returns `job_id` whether or not the job was accepted.
    async fn start_transcription(&self, job_id: &str, media_url: &str) -> String;

    /// Placeholder: returns the canned transcript and ignores `job_id`. There is no
    /// polling, so it is not tied to the job started by `start_transcription`.
    async fn fetch_transcription_result(&self, job_id: &str) -> String;

    async fn generate_advice(&self, query_text: &str) -> String;

    async fn send_alert(&self, destination: &str, message: &str) -> bool;
}

/// Picks the gateway implementation for the lifetime of the process.
pub async fn build_gateway(config: &Config) -> Arc<dyn Gateway> {
    if !config.has_live_credentials() {
        info!("No live cloud credentials configured, gateway running in fallback mode");
        return Arc::new(FallbackGateway);
    }

    let clients = aws::AwsClients::from_config(config).await;

    let advice = match config.anthropic_api_key.clone() {
        Some(key) => match LlmClient::new(key) {
            Ok(llm) => Some(Arc::new(llm) as Arc<dyn live::AdviceModel>),
            Err(e) => {
                warn!("Failed to build LLM client, advice will use the fallback: {e}");
                None
            }
        },
        None => {
            warn!("ANTHROPIC_API_KEY not set, advice will use the fallback");
            None
        }
    };

    info!(
        "Gateway running in live mode (region: {}, bucket: {})",
        config.aws_region, config.s3_bucket
    );

    Arc::new(LiveGateway {
        storage: Arc::new(clients.object_store()),
        classifier: Arc::new(clients.classifier()),
        transcriber: Arc::new(clients.transcriber()),
        advice,
        alerts: Arc::new(clients.alert_sender()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sentinel_credentials_select_fallback() {
        let gateway = build_gateway(&Config::for_tests()).await;
        assert_eq!(gateway.mode(), GatewayMode::Fallback);
    }
}
