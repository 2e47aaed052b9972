use async_trait::async_trait;

use super::errors::ReceiptError;
use super::model::{ExtractionRequest, RawExtractionResult};
use super::progress::ProgressStage;

/// Service port for the multimodal inference call.
///
/// Implementations issue exactly one request per call, never retry, and
/// never keep the image after returning.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<RawExtractionResult, ReceiptError>;
}

/// Fire-and-forget progress side channel for UI consumption.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, stage: ProgressStage);
}
