//! Live gateway: composes one backend per capability and converts every backend
//! fault into the matching fallback value, logging it for operators.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, error, warn};

use crate::gateway::fallback::{
    fallback_diagnosis, fallback_url, CANNED_TRANSCRIPT, FALLBACK_ADVICE,
};
use crate::gateway::{Gateway, GatewayError, GatewayMode};
use crate::models::records::DiagnosisLabel;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns the public URL of the stored object.
    async fn put(&self, object_key: &str, blob: Bytes) -> Result<String, GatewayError>;
}

#[async_trait]
pub trait LabelClassifier: Send + Sync {
    async fn detect_labels(&self, object_key: &str) -> Result<Vec<DiagnosisLabel>, GatewayError>;
}

#[async_trait]
pub trait TranscriptionService: Send + Sync {
    async fn start_job(&self, job_id: &str, media_url: &str) -> Result<(), GatewayError>;
}

#[async_trait]
pub trait AdviceModel: Send + Sync {
    async fn advise(&self, query_text: &str) -> Result<String, GatewayError>;
}

#[async_trait]
pub trait AlertSender: Send + Sync {
    async fn publish(&self, destination: &str, message: &str) -> Result<(), GatewayError>;
}

pub struct LiveGateway {
    pub storage: Arc<dyn ObjectStore>,
    pub classifier: Arc<dyn LabelClassifier>,
    pub transcriber: Arc<dyn TranscriptionService>,
    /// `None` when no text-generation credentials are configured.
    pub advice: Option<Arc<dyn AdviceModel>>,
    pub alerts: Arc<dyn AlertSender>,
}

#[async_trait]
impl Gateway for LiveGateway {
    fn mode(&self) -> GatewayMode {
        GatewayMode::Live
    }

    async fn upload(&self, blob: Bytes, object_key: &str) -> String {
        match self.storage.put(object_key, blob).await {
            Ok(url) => url,
            Err(e) => {
                error!("Upload of {object_key} failed, using fallback URL: {e}");
                fallback_url(object_key)
            }
        }
    }

    async fn classify(&self, object_key: &str) -> Vec<DiagnosisLabel> {
        match self.classifier.detect_labels(object_key).await {
            Ok(labels) => labels,
            Err(e) => {
                error!("Classification of {object_key} failed, using fallback diagnosis: {e}");
                fallback_diagnosis()
            }
        }
    }

    async fn start_transcription(&self, job_id: &str, media_url: &str) -> String {
        if let Err(e) = self.transcriber.start_job(job_id, media_url).await {
            error!("Transcription job {job_id} could not be started: {e}");
        }
        job_id.to_string()
    }

    async fn fetch_transcription_result(&self, job_id: &str) -> String {
        // TODO: poll the transcription job once a completion callback exists
        debug!("Returning canned transcript for job {job_id}");
        CANNED_TRANSCRIPT.to_string()
    }

    async fn generate_advice(&self, query_text: &str) -> String {
        let Some(model) = &self.advice else {
            warn!("{}, using fallback advice", GatewayError::Unavailable("advice"));
            return FALLBACK_ADVICE.to_string();
        };
        match model.advise(query_text).await {
            Ok(text) => text,
            Err(e) => {
                error!("Advice generation failed, using fallback advice: {e}");
                FALLBACK_ADVICE.to_string()
            }
        }
    }

    async fn send_alert(&self, destination: &str, message: &str) -> bool {
        match self.alerts.publish(destination, message).await {
            Ok(()) => true,
            Err(e) => {
                error!("Alert to {destination} failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{FailingBackend, HealthyBackend};

    fn failing_gateway() -> LiveGateway {
        let backend = Arc::new(FailingBackend);
        LiveGateway {
            storage: backend.clone(),
            classifier: backend.clone(),
            transcriber: backend.clone(),
            advice: Some(backend.clone()),
            alerts: backend,
        }
    }

    fn healthy_gateway() -> LiveGateway {
        let backend = Arc::new(HealthyBackend::default());
        LiveGateway {
            storage: backend.clone(),
            classifier: backend.clone(),
            transcriber: backend.clone(),
            advice: Some(backend.clone()),
            alerts: backend,
        }
    }

    #[tokio::test]
    async fn test_faulting_backends_yield_fallback_values() {
        let gateway = failing_gateway();

        assert_eq!(
            gateway.upload(Bytes::from_static(b"x"), "crops/a.jpg").await,
            "https://mock-s3-bucket.com/crops/a.jpg"
        );
        assert_eq!(gateway.classify("crops/a.jpg").await, fallback_diagnosis());
        assert_eq!(gateway.start_transcription("job-1", "url").await, "job-1");
        assert_eq!(gateway.fetch_transcription_result("job-1").await, CANNED_TRANSCRIPT);
        assert_eq!(gateway.generate_advice("why?").await, FALLBACK_ADVICE);
    }

    #[tokio::test]
    async fn test_failed_alert_reports_false() {
        assert!(!failing_gateway().send_alert("+977", "msg").await);
    }

    #[tokio::test]
    async fn test_missing_advice_backend_uses_fallback() {
        let gateway = LiveGateway {
            advice: None,
            ..failing_gateway()
        };
        assert_eq!(gateway.generate_advice("why?").await, FALLBACK_ADVICE);
    }

    #[tokio::test]
    async fn test_healthy_backends_pass_through() {
        let gateway = healthy_gateway();

        assert_eq!(
            gateway.upload(Bytes::from_static(b"x"), "voice/a.mp3").await,
            "https://test-bucket.s3.amazonaws.com/voice/a.mp3"
        );
        assert_eq!(
            gateway.classify("crops/a.jpg").await,
            vec![DiagnosisLabel::new("Healthy", 88.0)]
        );
        assert_eq!(gateway.generate_advice("why?").await, "advice for: why?");
        assert!(gateway.send_alert("+977", "msg").await);
        assert_eq!(gateway.mode(), GatewayMode::Live);
    }

    #[tokio::test]
    async fn test_transcript_is_canned_even_when_live() {
        let backend = Arc::new(HealthyBackend::default());
        let gateway = LiveGateway {
            transcriber: backend.clone(),
            ..healthy_gateway()
        };

        assert_eq!(gateway.start_transcription("job-9", "url").await, "job-9");
        assert_eq!(*backend.started_jobs.lock().unwrap(), vec!["job-9".to_string()]);
        assert_eq!(gateway.fetch_transcription_result("job-9").await, CANNED_TRANSCRIPT);
    }
}
