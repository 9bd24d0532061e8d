use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use crate::gateway::{Gateway, GatewayMode};
use crate::models::records::DiagnosisLabel;

pub const FALLBACK_URL_BASE: &str = "https://mock-s3-bucket.com";
pub const FALLBACK_LABEL: &str = "Cardamom Blight";
pub const FALLBACK_CONFIDENCE: f64 = 98.5;
/// "My cardamom leaves are turning yellow, what to do?"
pub const CANNED_TRANSCRIPT: &str = "मेरो अलैंचीका पातहरू पहेँलो हुँदैछन्, के गर्ने?";
/// Yellowing points to nitrogen deficiency or a viral disease; recommends organic manure.
pub const FALLBACK_ADVICE: &str = "अलैंचीमा पात पहेँलो हुनु नाइट्रोजनको कमी वा भाइरल रोगको लक्षण हुन सक्छ। कृपया प्राङ्गारिक मल प्रयोग गर्नुहोस्।";

pub fn fallback_url(object_key: &str) -> String {
    format!("{FALLBACK_URL_BASE}/{object_key}")
}

/// The fallback diagnosis. Not subject to the live confidence threshold.
pub fn fallback_diagnosis() -> Vec<DiagnosisLabel> {
    vec![DiagnosisLabel::new(FALLBACK_LABEL, FALLBACK_CONFIDENCE)]
}

/// Answers every operation with its fixed value. Used when no live credentials exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGateway;

#[async_trait]
impl Gateway for FallbackGateway {
    fn mode(&self) -> GatewayMode {
        GatewayMode::Fallback
    }

    async fn upload(&self, _blob: Bytes, object_key: &str) -> String {
        fallback_url(object_key)
    }

    async fn classify(&self, _object_key: &str) -> Vec<DiagnosisLabel> {
        fallback_diagnosis()
    }

    async fn start_transcription(&self, job_id: &str, _media_url: &str) -> String {
        job_id.to_string()
    }

    async fn fetch_transcription_result(&self, _job_id: &str) -> String {
        CANNED_TRANSCRIPT.to_string()
    }

    async fn generate_advice(&self, _query_text: &str) -> String {
        FALLBACK_ADVICE.to_string()
    }

    async fn send_alert(&self, destination: &str, message: &str) -> bool {
        info!("Fallback SMS to {destination}: {message}");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_url_built_from_object_key() {
        let url = FallbackGateway
            .upload(Bytes::from_static(b"jpeg"), "crops/abc.jpg")
            .await;
        assert_eq!(url, "https://mock-s3-bucket.com/crops/abc.jpg");
    }

    #[tokio::test]
    async fn test_classify_returns_single_fixed_label() {
        let labels = FallbackGateway.classify("crops/abc.jpg").await;
        assert_eq!(labels, vec![DiagnosisLabel::new("Cardamom Blight", 98.5)]);
    }

    #[tokio::test]
    async fn test_transcription_echoes_job_and_returns_canned_text() {
        let gateway = FallbackGateway;
        assert_eq!(
            gateway.start_transcription("transcribe-1", "url").await,
            "transcribe-1"
        );
        assert_eq!(
            gateway.fetch_transcription_result("anything").await,
            CANNED_TRANSCRIPT
        );
    }

    #[tokio::test]
    async fn test_advice_ignores_query_and_alert_succeeds() {
        let gateway = FallbackGateway;
        assert_eq!(gateway.generate_advice("one").await, FALLBACK_ADVICE);
        assert_eq!(gateway.generate_advice("two").await, FALLBACK_ADVICE);
        assert!(gateway.send_alert("+9770000000000", "hi").await);
    }
}
