use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ANONYMOUS_USER: &str = "anonymous";

/// One label/confidence pair returned by the image classifier.
/// Serialized with the classifier's own field names, which is what the mobile client reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisLabel {
    #[serde(rename = "Name")]
    pub label: String,
    /// Percentage in [0, 100].
    #[serde(rename = "Confidence")]
    pub confidence: f64,
}

impl DiagnosisLabel {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// A persisted disease-detection result. Create-once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropHealthCheck {
    pub id: i64,
    pub image_url: String,
    pub diagnosis: Option<Vec<DiagnosisLabel>>,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

#[derive(Debug, Clone)]
pub struct NewCropHealthCheck {
    pub image_url: String,
    pub diagnosis: Option<Vec<DiagnosisLabel>>,
    pub user_id: String,
}

/// A persisted voice question and the advice given for it. Create-once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceQuery {
    pub id: i64,
    pub audio_url: String,
    pub transcribed_text: Option<String>,
    pub ai_response: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVoiceQuery {
    pub audio_url: String,
    pub transcribed_text: Option<String>,
    pub ai_response: Option<String>,
}
