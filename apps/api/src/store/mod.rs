//! Persistence for the two append-only record types.
//!
//! `AppState` holds an `Arc<dyn RecordStore>`: Postgres when `DATABASE_URL` is set,
//! otherwise the in-memory store.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::records::{CropHealthCheck, NewCropHealthCheck, NewVoiceQuery, VoiceQuery};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRecordStore;
pub use postgres::PgRecordStore;

/// Create-once/read-many storage. There is deliberately no update or delete.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_crop_health_check(&self, new: NewCropHealthCheck) -> Result<CropHealthCheck>;

    async fn insert_voice_query(&self, new: NewVoiceQuery) -> Result<VoiceQuery>;

    /// Newest first.
    async fn list_crop_health_checks(&self) -> Result<Vec<CropHealthCheck>>;

    /// Newest first.
    async fn list_voice_queries(&self) -> Result<Vec<VoiceQuery>>;
}
