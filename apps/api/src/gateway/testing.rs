//! Test doubles for the gateway and its live backends.

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::gateway::fallback::{fallback_url, CANNED_TRANSCRIPT};
use crate::gateway::live::{
    AdviceModel, AlertSender, LabelClassifier, ObjectStore, TranscriptionService,
};
use crate::gateway::{Gateway, GatewayError, GatewayMode};
use crate::models::records::DiagnosisLabel;

/// Every backend call fails.
pub struct FailingBackend;

#[async_trait]
impl ObjectStore for FailingBackend {
    async fn put(&self, _object_key: &str, _blob: Bytes) -> Result<String, GatewayError> {
        Err(GatewayError::Storage("connection refused".to_string()))
    }
}

#[async_trait]
impl LabelClassifier for FailingBackend {
    async fn detect_labels(&self, _object_key: &str) -> Result<Vec<DiagnosisLabel>, GatewayError> {
        Err(GatewayError::Classification("model not running".to_string()))
    }
}

#[async_trait]
impl TranscriptionService for FailingBackend {
    async fn start_job(&self, _job_id: &str, _media_url: &str) -> Result<(), GatewayError> {
        Err(GatewayError::Transcription("throttled".to_string()))
    }
}

#[async_trait]
impl AdviceModel for FailingBackend {
    async fn advise(&self, _query_text: &str) -> Result<String, GatewayError> {
        Err(GatewayError::Advice("status 500".to_string()))
    }
}

#[async_trait]
impl AlertSender for FailingBackend {
    async fn publish(&self, _destination: &str, _message: &str) -> Result<(), GatewayError> {
        Err(GatewayError::Alert("invalid number".to_string()))
    }
}

/// Every backend call succeeds with a recognizable value.
#[derive(Default)]
pub struct HealthyBackend {
    pub started_jobs: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectStore for HealthyBackend {
    async fn put(&self, object_key: &str, _blob: Bytes) -> Result<String, GatewayError> {
        Ok(format!("https://test-bucket.s3.amazonaws.com/{object_key}"))
    }
}

#[async_trait]
impl LabelClassifier for HealthyBackend {
    async fn detect_labels(&self, _object_key: &str) -> Result<Vec<DiagnosisLabel>, GatewayError> {
        Ok(vec![DiagnosisLabel::new("Healthy", 88.0)])
    }
}

#[async_trait]
impl TranscriptionService for HealthyBackend {
    async fn start_job(&self, job_id: &str, _media_url: &str) -> Result<(), GatewayError> {
        self.started_jobs.lock().unwrap().push(job_id.to_string());
        Ok(())
    }
}

#[async_trait]
impl AdviceModel for HealthyBackend {
    async fn advise(&self, query_text: &str) -> Result<String, GatewayError> {
        Ok(format!("advice for: {query_text}"))
    }
}

#[async_trait]
impl AlertSender for HealthyBackend {
    async fn publish(&self, _destination: &str, _message: &str) -> Result<(), GatewayError> {
        Ok(())
    }
}

/// Gateway with a scripted diagnosis that records every call orchestrators make.
pub struct ScriptedGateway {
    pub diagnosis: Vec<DiagnosisLabel>,
    pub alerts: Mutex<Vec<(String, String)>>,
    pub uploads: Mutex<Vec<String>>,
    pub transcription_jobs: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn with_diagnosis(diagnosis: Vec<DiagnosisLabel>) -> Self {
        Self {
            diagnosis,
            alerts: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            transcription_jobs: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    fn mode(&self) -> GatewayMode {
        GatewayMode::Fallback
    }

    async fn upload(&self, _blob: Bytes, object_key: &str) -> String {
        self.uploads.lock().unwrap().push(object_key.to_string());
        fallback_url(object_key)
    }

    async fn classify(&self, _object_key: &str) -> Vec<DiagnosisLabel> {
        self.diagnosis.clone()
    }

    async fn start_transcription(&self, job_id: &str, _media_url: &str) -> String {
        self.transcription_jobs.lock().unwrap().push(job_id.to_string());
        job_id.to_string()
    }

    async fn fetch_transcription_result(&self, _job_id: &str) -> String {
        CANNED_TRANSCRIPT.to_string()
    }

    async fn generate_advice(&self, query_text: &str) -> String {
        format!("advice for: {query_text}")
    }

    async fn send_alert(&self, destination: &str, message: &str) -> bool {
        self.alerts
            .lock()
            .unwrap()
            .push((destination.to_string(), message.to_string()));
        true
    }
}
