use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::gateway::Gateway;
use crate::models::records::{DiagnosisLabel, NewCropHealthCheck, ANONYMOUS_USER};
use crate::store::RecordStore;

pub const SEVERE_LABEL: &str = "Severe Blight";
/// Strictly greater than this confidence triggers an alert.
pub const ALERT_CONFIDENCE_THRESHOLD: f64 = 80.0;

/// Where and what to send when a severe diagnosis comes back.
#[derive(Debug, Clone)]
pub struct AlertSettings {
    pub destination: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DetectionResponse {
    pub id: i64,
    pub image_url: String,
    pub diagnosis: Vec<DiagnosisLabel>,
    pub alert_sent: bool,
}

/// True iff some label is exactly "Severe Blight" with confidence above 80.
pub fn requires_alert(diagnosis: &[DiagnosisLabel]) -> bool {
    diagnosis
        .iter()
        .any(|d| d.label == SEVERE_LABEL && d.confidence > ALERT_CONFIDENCE_THRESHOLD)
}

pub struct DiseaseDetector {
    gateway: Arc<dyn Gateway>,
    store: Arc<dyn RecordStore>,
    alert: AlertSettings,
}

impl DiseaseDetector {
    pub fn new(gateway: Arc<dyn Gateway>, store: Arc<dyn RecordStore>, alert: AlertSettings) -> Self {
        Self {
            gateway,
            store,
            alert,
        }
    }

    /// Runs one detection. `alert_sent` in the response reports the alert predicate;
    /// a failed SMS delivery is logged but does not change it.
    pub async fn detect(&self, image: Option<Bytes>) -> Result<DetectionResponse, AppError> {
        let image = image.ok_or_else(|| AppError::Validation("No image provided".to_string()))?;

        let object_key = format!("crops/{}.jpg", Uuid::new_v4());
        let image_url = self.gateway.upload(image, &object_key).await;
        let diagnosis = self.gateway.classify(&object_key).await;

        let check = self
            .store
            .insert_crop_health_check(NewCropHealthCheck {
                image_url: image_url.clone(),
                diagnosis: Some(diagnosis.clone()),
                user_id: ANONYMOUS_USER.to_string(),
            })
            .await
            .map_err(AppError::Internal)?;

        let alert_sent = requires_alert(&diagnosis);
        if alert_sent {
            let delivered = self
                .gateway
                .send_alert(&self.alert.destination, &self.alert.message)
                .await;
            if !delivered {
                warn!("Severe blight alert for check {} was not delivered", check.id);
            }
        }

        info!(
            "Crop health check {} stored with {} label(s), alert: {alert_sent}",
            check.id,
            diagnosis.len()
        );

        Ok(DetectionResponse {
            id: check.id,
            image_url,
            diagnosis,
            alert_sent,
        })
    }
}
