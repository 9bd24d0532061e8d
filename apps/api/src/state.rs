use std::sync::Arc;

use crate::config::Config;
use crate::detection::detector::{AlertSettings, DiseaseDetector};
use crate::gateway::Gateway;
use crate::store::RecordStore;
use crate::voice::advisor::VoiceAdvisor;

/// Shared application state injected into all route handlers via Axum extractors.
/// The gateway is chosen once at startup and handed to each orchestrator here.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
    pub store: Arc<dyn RecordStore>,
    pub detector: Arc<DiseaseDetector>,
    pub advisor: Arc<VoiceAdvisor>,
}

impl AppState {
    pub fn new(config: &Config, gateway: Arc<dyn Gateway>, store: Arc<dyn RecordStore>) -> Self {
        let alert = AlertSettings {
            destination: config.alert_phone_number.clone(),
            message: config.alert_message.clone(),
        };
        Self {
            detector: Arc::new(DiseaseDetector::new(gateway.clone(), store.clone(), alert)),
            advisor: Arc::new(VoiceAdvisor::new(gateway.clone(), store.clone())),
            gateway,
            store,
        }
    }
}
