use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::gateway::Gateway;
use crate::models::records::NewVoiceQuery;
use crate::store::RecordStore;

#[derive(Debug, Serialize)]
pub struct VoiceQueryResponse {
    pub query_text: String,
    pub response: String,
    pub audio_url: String,
}

pub struct VoiceAdvisor {
    gateway: Arc<dyn Gateway>,
    store: Arc<dyn RecordStore>,
}

impl VoiceAdvisor {
    pub fn new(gateway: Arc<dyn Gateway>, store: Arc<dyn RecordStore>) -> Self {
        Self { gateway, store }
    }

    /// Answers one recorded question.
    ///
    /// Transcription is started and its result fetched immediately. The fetched text is the
    /// gateway's canned transcript, not the output of the job just started.
    pub async fn ask(&self, audio: Option<Bytes>) -> Result<VoiceQueryResponse, AppError> {
        let audio = audio.ok_or_else(|| AppError::Validation("No audio provided".to_string()))?;

        let object_key = format!("voice/{}.mp3", Uuid::new_v4());
        let audio_url = self.gateway.upload(audio, &object_key).await;

        let job_id = format!("transcribe-{}", Uuid::new_v4());
        self.gateway.start_transcription(&job_id, &audio_url).await;
        let query_text = self.gateway.fetch_transcription_result(&job_id).await;

        let response = self.gateway.generate_advice(&query_text).await;

        let query = self
            .store
            .insert_voice_query(NewVoiceQuery {
                audio_url: audio_url.clone(),
                transcribed_text: Some(query_text.clone()),
                ai_response: Some(response.clone()),
            })
            .await
            .map_err(AppError::Internal)?;

        info!("Voice query {} answered (transcription job {job_id})", query.id);

        Ok(VoiceQueryResponse {
            query_text,
            response,
            audio_url,
        })
    }
}
