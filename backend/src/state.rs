//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Collaborators (assessment store, identity verification) are injected
//! here at construction; handlers never reach for globals.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::AssessmentStore;
use metrics_exporter_prometheus::PrometheusHandle;
use nutrimood_shared::MoodEngine;
use std::sync::Arc;

/// Shared application state
///
/// All fields are `Arc`s or cheap handles, so cloning per request is O(1).
#[derive(Clone)]
pub struct AppState {
    /// Where assessments are persisted
    pub store: Arc<dyn AssessmentStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Mood and recommendation engine
    pub engine: Arc<MoodEngine>,
    /// Prometheus render handle, when the recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state
    ///
    /// Builds the engine and derives JWT keys; call once at startup.
    pub fn new(store: Arc<dyn AssessmentStore>, config: AppConfig) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry_secs);
        let engine = MoodEngine::new(config.engine);

        Self {
            store,
            config: Arc::new(config),
            jwt,
            engine: Arc::new(engine),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Replace the engine, e.g. to serve a custom catalog
    pub fn with_engine(mut self, engine: MoodEngine) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    #[inline]
    pub fn store(&self) -> &dyn AssessmentStore {
        self.store.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn engine(&self) -> &MoodEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryAssessmentStore;
    use nutrimood_shared::{ConfidenceMode, EngineConfig};

    #[test]
    fn test_state_clone_shares_engine() {
        let state = AppState::new(Arc::new(InMemoryAssessmentStore::new()), AppConfig::default());
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.engine, &cloned.engine));
        assert!(cloned.metrics.is_none());
    }

    #[test]
    fn test_engine_follows_config() {
        let mut config = AppConfig::default();
        config.engine = EngineConfig {
            confidence_mode: ConfidenceMode::RuleMargin,
            ..EngineConfig::default()
        };
        let state = AppState::new(Arc::new(InMemoryAssessmentStore::new()), config);
        assert_eq!(state.engine().config().confidence_mode, ConfidenceMode::RuleMargin);
    }
}
