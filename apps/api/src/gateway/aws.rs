//! AWS-backed implementations of the live gateway backends.

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_rekognition::types::{Image, S3Object};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_transcribe::types::{LanguageCode, Media, MediaFormat};
use bytes::Bytes;
use tracing::info;

use crate::config::Config;
use crate::gateway::live::{AlertSender, LabelClassifier, ObjectStore, TranscriptionService};
use crate::gateway::GatewayError;
use crate::models::records::DiagnosisLabel;

/// Labels below this confidence are dropped by the classifier itself.
pub const MIN_CONFIDENCE: f32 = 70.0;
const TRANSCRIPTION_LANGUAGE: &str = "ne-NP";

/// Shared SDK configuration plus the settings each backend needs.
pub struct AwsClients {
    sdk_config: aws_config::SdkConfig,
    bucket: String,
    s3_endpoint: Option<String>,
    project_version_arn: String,
}

impl AwsClients {
    pub async fn from_config(config: &Config) -> Self {
        let credentials = Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            "krishimitra-static",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        Self {
            sdk_config,
            bucket: config.s3_bucket.clone(),
            s3_endpoint: config.s3_endpoint.clone(),
            project_version_arn: config.rekognition_project_version_arn.clone(),
        }
    }

    /// The endpoint override only applies to S3, so MinIO can stand in for storage alone.
    pub fn object_store(&self) -> S3ObjectStore {
        let mut builder = aws_sdk_s3::config::Builder::from(&self.sdk_config);
        if let Some(endpoint) = &self.s3_endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        S3ObjectStore {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            bucket: self.bucket.clone(),
        }
    }

    pub fn classifier(&self) -> RekognitionClassifier {
        RekognitionClassifier {
            client: aws_sdk_rekognition::Client::new(&self.sdk_config),
            bucket: self.bucket.clone(),
            project_version_arn: self.project_version_arn.clone(),
        }
    }

    pub fn transcriber(&self) -> TranscribeService {
        TranscribeService {
            client: aws_sdk_transcribe::Client::new(&self.sdk_config),
        }
    }

    pub fn alert_sender(&self) -> SnsAlertSender {
        SnsAlertSender {
            client: aws_sdk_sns::Client::new(&self.sdk_config),
        }
    }
}

pub fn public_object_url(bucket: &str, object_key: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{object_key}")
}

pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, object_key: &str, blob: Bytes) -> Result<String, GatewayError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(object_key)
            .body(ByteStream::from(blob))
            .send()
            .await
            .map_err(|e| GatewayError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded s3://{}/{}", self.bucket, object_key);
        Ok(public_object_url(&self.bucket, object_key))
    }
}

/// Custom-label detection against the trained cardamom disease model.
pub struct RekognitionClassifier {
    client: aws_sdk_rekognition::Client,
    bucket: String,
    project_version_arn: String,
}

#[async_trait]
impl LabelClassifier for RekognitionClassifier {
    async fn detect_labels(&self, object_key: &str) -> Result<Vec<DiagnosisLabel>, GatewayError> {
        let image = Image::builder()
            .s3_object(
                S3Object::builder()
                    .bucket(&self.bucket)
                    .name(object_key)
                    .build(),
            )
            .build();

        let output = self
            .client
            .detect_custom_labels()
            .project_version_arn(&self.project_version_arn)
            .image(image)
            .min_confidence(MIN_CONFIDENCE)
            .send()
            .await
            .map_err(|e| GatewayError::Classification(e.to_string()))?;

        Ok(output
            .custom_labels()
            .iter()
            .filter_map(|label| {
                Some(DiagnosisLabel::new(
                    label.name()?,
                    f64::from(label.confidence()?),
                ))
            })
            .collect())
    }
}

pub struct TranscribeService {
    client: aws_sdk_transcribe::Client,
}

#[async_trait]
impl TranscriptionService for TranscribeService {
    async fn start_job(&self, job_id: &str, media_url: &str) -> Result<(), GatewayError> {
        self.client
            .start_transcription_job()
            .transcription_job_name(job_id)
            .media(Media::builder().media_file_uri(media_url).build())
            .media_format(MediaFormat::Mp3)
            .language_code(LanguageCode::from(TRANSCRIPTION_LANGUAGE))
            .send()
            .await
            .map_err(|e| GatewayError::Transcription(e.to_string()))?;

        info!("Started transcription job {job_id}");
        Ok(())
    }
}

pub struct SnsAlertSender {
    client: aws_sdk_sns::Client,
}

#[async_trait]
impl AlertSender for SnsAlertSender {
    async fn publish(&self, destination: &str, message: &str) -> Result<(), GatewayError> {
        self.client
            .publish()
            .phone_number(destination)
            .message(message)
            .send()
            .await
            .map_err(|e| GatewayError::Alert(e.to_string()))?;

        info!("SMS alert published to {destination}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_object_url_is_virtual_hosted_style() {
        assert_eq!(
            public_object_url("crops-bucket", "crops/1.jpg"),
            "https://crops-bucket.s3.amazonaws.com/crops/1.jpg"
        );
    }
}
