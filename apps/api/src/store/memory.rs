use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;

use crate::models::records::{CropHealthCheck, NewCropHealthCheck, NewVoiceQuery, VoiceQuery};
use crate::store::RecordStore;

/// Process-local store used when no database is configured, and in tests.
/// Ids start at 1 and grow by one per insert, per table.
#[derive(Default)]
pub struct InMemoryRecordStore {
    crop_checks: Mutex<Vec<CropHealthCheck>>,
    voice_queries: Mutex<Vec<VoiceQuery>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("record store lock poisoned")
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert_crop_health_check(&self, new: NewCropHealthCheck) -> Result<CropHealthCheck> {
        let mut rows = self.crop_checks.lock().map_err(poisoned)?;
        let record = CropHealthCheck {
            id: rows.len() as i64 + 1,
            image_url: new.image_url,
            diagnosis: new.diagnosis,
            created_at: Utc::now(),
            user_id: new.user_id,
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn insert_voice_query(&self, new: NewVoiceQuery) -> Result<VoiceQuery> {
        let mut rows = self.voice_queries.lock().map_err(poisoned)?;
        let record = VoiceQuery {
            id: rows.len() as i64 + 1,
            audio_url: new.audio_url,
            transcribed_text: new.transcribed_text,
            ai_response: new.ai_response,
            created_at: Utc::now(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn list_crop_health_checks(&self) -> Result<Vec<CropHealthCheck>> {
        let rows = self.crop_checks.lock().map_err(poisoned)?;
        Ok(rows.iter().rev().cloned().collect())
    }

    async fn list_voice_queries(&self) -> Result<Vec<VoiceQuery>> {
        let rows = self.voice_queries.lock().map_err(poisoned)?;
        Ok(rows.iter().rev().cloned().collect())
    }
}
