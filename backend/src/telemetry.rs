//! Logging and metrics setup
//!
//! Counter names live here so handlers and services record them uniformly.

use crate::config::AppConfig;
use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use nutrimood_shared::Mood;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const PREDICTIONS_TOTAL: &str = "nutrimood_predictions_total";
pub const VALIDATION_FAILURES_TOTAL: &str = "nutrimood_validation_failures_total";
pub const PERSISTENCE_FAILURES_TOTAL: &str = "nutrimood_persistence_failures_total";

/// Initialize tracing/logging
///
/// `RUST_LOG` overrides the default filter. Production logs are JSON.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "nutrimood_backend=info,tower_http=info".into()
        } else {
            "nutrimood_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Install the global Prometheus recorder
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    metrics::describe_counter!(PREDICTIONS_TOTAL, "Predictions served, by mood");
    metrics::describe_counter!(VALIDATION_FAILURES_TOTAL, "Prediction requests rejected by validation");
    metrics::describe_counter!(PERSISTENCE_FAILURES_TOTAL, "Best-effort assessment writes that failed, by stage");

    Ok(handle)
}

pub fn prediction_made(mood: Mood) {
    metrics::counter!(PREDICTIONS_TOTAL, "mood" => mood.as_str()).increment(1);
}

pub fn validation_failed() {
    metrics::counter!(VALIDATION_FAILURES_TOTAL).increment(1);
}

pub fn persistence_failed(stage: &'static str) {
    metrics::counter!(PERSISTENCE_FAILURES_TOTAL, "stage" => stage).increment(1);
}
