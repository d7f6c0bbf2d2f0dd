//! Bounded wrappers around the detection and translation backends. Each backend call gets its own
//! timeout, and a timeout is reported separately from the backend's own failures.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::detection::{DetectionError, Detector};
use super::translation::{TranslationBackend, TranslationError};

#[derive(Debug, thiserror::Error)]
pub(crate) enum GatewayError {
    #[error(transparent)]
    Detection(#[from] DetectionError),
    #[error(transparent)]
    Translation(#[from] TranslationError),
    #[error("{operation} timed out after {limit:?}")]
    Timeout {
        operation: &'static str,
        limit: Duration,
    },
}

/// A translation along with the language it was translated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TranslationResult {
    pub translated_text: String,
    /// Language table code of the source text.
    pub source_code: String,
}

async fn bounded<T, E>(
    operation: &'static str,
    limit: Duration,
    call: impl Future<Output = Result<T, E>>,
) -> Result<T, GatewayError>
where
    GatewayError: From<E>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(res) => res.map_err(GatewayError::from),
        Err(_) => Err(GatewayError::Timeout { operation, limit }),
    }
}

#[derive(Clone)]
pub(crate) struct DetectionGateway {
    detector: Arc<dyn Detector>,
    limit: Duration,
}

impl DetectionGateway {
    pub(crate) fn new(detector: Arc<dyn Detector>, limit: Duration) -> Self {
        Self { detector, limit }
    }

    /// Detects the language of `text`, returning its code.
    pub(crate) async fn detect(&self, text: &str) -> Result<String, GatewayError> {
        let code = bounded("detection", self.limit, self.detector.detect(text)).await?;
        debug!("detected {}", code);
        Ok(code)
    }
}

#[derive(Clone)]
pub(crate) struct TranslationGateway {
    detection: DetectionGateway,
    backend: Arc<dyn TranslationBackend>,
    limit: Duration,
}

impl TranslationGateway {
    pub(crate) fn new(
        detection: DetectionGateway,
        backend: Arc<dyn TranslationBackend>,
        limit: Duration,
    ) -> Self {
        Self {
            detection,
            backend,
            limit,
        }
    }

    /// Detects the source language, then translates `text` into `target`.
    pub(crate) async fn translate(
        &self,
        text: &str,
        target: &str,
    ) -> Result<TranslationResult, GatewayError> {
        let source = self.detection.detect(text).await?;
        self.translate_from(text, source, target).await
    }

    /// Translates `text` from an already-detected `source` into `target`.
    pub(crate) async fn translate_from(
        &self,
        text: &str,
        source: String,
        target: &str,
    ) -> Result<TranslationResult, GatewayError> {
        let translated_text = bounded(
            "translation",
            self.limit,
            self.backend.translate(text, &source, target),
        )
        .await?;

        Ok(TranslationResult {
            translated_text,
            source_code: source,
        })
    }
}
