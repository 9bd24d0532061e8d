use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;

use crate::models::records::{
    CropHealthCheck, DiagnosisLabel, NewCropHealthCheck, NewVoiceQuery, VoiceQuery,
};
use crate::store::RecordStore;

#[derive(Debug, FromRow)]
struct CropHealthCheckRow {
    id: i64,
    image_url: String,
    diagnosis: Option<Json<Vec<DiagnosisLabel>>>,
    created_at: DateTime<Utc>,
    user_id: String,
}

impl From<CropHealthCheckRow> for CropHealthCheck {
    fn from(row: CropHealthCheckRow) -> Self {
        CropHealthCheck {
            id: row.id,
            image_url: row.image_url,
            diagnosis: row.diagnosis.map(|Json(labels)| labels),
            created_at: row.created_at,
            user_id: row.user_id,
        }
    }
}

#[derive(Debug, FromRow)]
struct VoiceQueryRow {
    id: i64,
    audio_url: String,
    transcribed_text: Option<String>,
    ai_response: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<VoiceQueryRow> for VoiceQuery {
    fn from(row: VoiceQueryRow) -> Self {
        VoiceQuery {
            id: row.id,
            audio_url: row.audio_url,
            transcribed_text: row.transcribed_text,
            ai_response: row.ai_response,
            created_at: row.created_at,
        }
    }
}

/// Postgres-backed store. Inserts only; `created_at` and `id` come from the database.
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert_crop_health_check(&self, new: NewCropHealthCheck) -> Result<CropHealthCheck> {
        let row = sqlx::query_as::<_, CropHealthCheckRow>(
            r#"
            INSERT INTO crop_health_checks (image_url, diagnosis, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, image_url, diagnosis, created_at, user_id
            "#,
        )
        .bind(&new.image_url)
        .bind(new.diagnosis.map(Json))
        .bind(&new.user_id)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted crop health check {}", row.id);
        Ok(row.into())
    }

    async fn insert_voice_query(&self, new: NewVoiceQuery) -> Result<VoiceQuery> {
        let row = sqlx::query_as::<_, VoiceQueryRow>(
            r#"
            INSERT INTO voice_queries (audio_url, transcribed_text, ai_response)
            VALUES ($1, $2, $3)
            RETURNING id, audio_url, transcribed_text, ai_response, created_at
            "#,
        )
        .bind(&new.audio_url)
        .bind(&new.transcribed_text)
        .bind(&new.ai_response)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted voice query {}", row.id);
        Ok(row.into())
    }

    async fn list_crop_health_checks(&self) -> Result<Vec<CropHealthCheck>> {
        let rows = sqlx::query_as::<_, CropHealthCheckRow>(
            "SELECT id, image_url, diagnosis, created_at, user_id FROM crop_health_checks ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_voice_queries(&self) -> Result<Vec<VoiceQuery>> {
        let rows = sqlx::query_as::<_, VoiceQueryRow>(
            "SELECT id, audio_url, transcribed_text, ai_response, created_at FROM voice_queries ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
