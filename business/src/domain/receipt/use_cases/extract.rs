use async_trait::async_trait;

use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::model::{ExtractionOutcome, RawImage};

pub struct ExtractReceiptParams {
    pub image: RawImage,
}

#[async_trait]
pub trait ExtractReceiptUseCase: Send + Sync {
    async fn execute(&self, params: ExtractReceiptParams)
    -> Result<ExtractionOutcome, ReceiptError>;
}
