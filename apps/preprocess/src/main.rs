//! Media preprocessing stub.
//!
//! Describes the normalization the classifier and transcriber expect (224x224 images,
//! 44.1kHz MP3 audio) without transforming anything. Runs as its own process.

mod errors;
mod handlers;

use anyhow::{Context, Result};
use axum::{routing::post, Router};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn build_router() -> Router {
    Router::new()
        .route("/preprocess/image", post(handlers::preprocess_image))
        .route("/preprocess/audio", post(handlers::preprocess_audio))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "5001".to_string())
        .parse::<u16>()
        .context("PORT must be a valid port number")?;

    let app = build_router().layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Preprocessing stub listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
