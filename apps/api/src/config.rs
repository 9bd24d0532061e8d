use anyhow::{Context, Result};

/// Placeholder access key that forces the gateway into fallback mode.
pub const SENTINEL_ACCESS_KEY: &str = "mock_key";

const DEFAULT_PROJECT_VERSION_ARN: &str =
    "arn:aws:rekognition:us-east-1:123456789012:project/cardamom-disease/version/1";
const DEFAULT_ALERT_PHONE_NUMBER: &str = "+9779800000000";
const DEFAULT_ALERT_MESSAGE: &str = "Alert: Severe blight detected in your crop.";

/// Application configuration loaded from environment variables.
/// Every field has a development default, so an empty environment boots in fallback mode
/// with an in-memory record store.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub aws_region: String,
    pub s3_bucket: String,
    /// S3-compatible endpoint override (MinIO in local setups).
    pub s3_endpoint: Option<String>,
    pub rekognition_project_version_arn: String,
    pub anthropic_api_key: Option<String>,
    pub alert_phone_number: String,
    pub alert_message: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            aws_access_key_id: env_or("AWS_ACCESS_KEY_ID", SENTINEL_ACCESS_KEY),
            aws_secret_access_key: env_or("AWS_SECRET_ACCESS_KEY", ""),
            aws_region: env_or("AWS_REGION", "us-east-1"),
            s3_bucket: env_or("S3_BUCKET", "krishimitra-uploads"),
            s3_endpoint: optional_env("S3_ENDPOINT"),
            rekognition_project_version_arn: env_or(
                "REKOGNITION_PROJECT_VERSION_ARN",
                DEFAULT_PROJECT_VERSION_ARN,
            ),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            alert_phone_number: env_or("ALERT_PHONE_NUMBER", DEFAULT_ALERT_PHONE_NUMBER),
            alert_message: env_or("ALERT_MESSAGE", DEFAULT_ALERT_MESSAGE),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// True when the cloud credentials look usable. A blank key or the sentinel
    /// placeholder means the gateway runs in fallback mode for the whole process lifetime.
    pub fn has_live_credentials(&self) -> bool {
        let key = self.aws_access_key_id.trim();
        !key.is_empty() && key != SENTINEL_ACCESS_KEY
    }
}

#[cfg(test)]
impl Config {
    /// Fallback-mode configuration for tests, independent of the process environment.
    pub fn for_tests() -> Self {
        Config {
            database_url: None,
            aws_access_key_id: SENTINEL_ACCESS_KEY.to_string(),
            aws_secret_access_key: String::new(),
            aws_region: "us-east-1".to_string(),
            s3_bucket: "test-bucket".to_string(),
            s3_endpoint: None,
            rekognition_project_version_arn: DEFAULT_PROJECT_VERSION_ARN.to_string(),
            anthropic_api_key: None,
            alert_phone_number: DEFAULT_ALERT_PHONE_NUMBER.to_string(),
            alert_message: DEFAULT_ALERT_MESSAGE.to_string(),
            port: 8000,
            rust_log: "info".to_string(),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
