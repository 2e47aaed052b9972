use std::sync::Arc;

use async_trait::async_trait;

use crate::application::receipt::progress_tracker::ProgressTracker;
use crate::domain::logger::Logger;
use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::model::{ExtractionOutcome, ExtractionRequest, RawImage};
use crate::domain::receipt::normalizer::Normalizer;
use crate::domain::receipt::parser::ResponseParser;
use crate::domain::receipt::progress::ProgressStage;
use crate::domain::receipt::prompt::PromptBuilder;
use crate::domain::receipt::services::{ExtractionService, ProgressReporter};
use crate::domain::receipt::use_cases::extract::{ExtractReceiptParams, ExtractReceiptUseCase};

pub struct ExtractReceiptUseCaseImpl {
    pub extractor: Arc<dyn ExtractionService>,
    pub progress: Arc<dyn ProgressReporter>,
    pub normalizer: Normalizer,
    pub logger: Arc<dyn Logger>,
}

impl ExtractReceiptUseCaseImpl {
    async fn run(
        &self,
        image: &RawImage,
        tracker: &mut ProgressTracker,
    ) -> Result<ExtractionOutcome, ReceiptError> {
        let prompt = PromptBuilder::build();
        tracker.advance(ProgressStage::RequestConstructed);

        let request = ExtractionRequest::new(prompt, image);
        tracker.advance(ProgressStage::ImageEncoded);

        let raw = self.extractor.extract(&request).await?;
        drop(request);
        tracker.advance(ProgressStage::ResponseReceived);
        self.logger
            .debug(&format!("Raw extraction response: {}", raw.text()));

        let parsed = ResponseParser::parse(&raw)?;
        tracker.advance(ProgressStage::ResponseParsed);

        let outcome = self.normalizer.normalize(&parsed)?;
        tracker.advance(ProgressStage::Complete);

        Ok(outcome)
    }
}

#[async_trait]
impl ExtractReceiptUseCase for ExtractReceiptUseCaseImpl {
    async fn execute(
        &self,
        params: ExtractReceiptParams,
    ) -> Result<ExtractionOutcome, ReceiptError> {
        self.logger.info(&format!(
            "Extracting receipt from {} image ({}, {} bytes)",
            params.image.origin(),
            params.image.mime_type(),
            params.image.len()
        ));

        let mut tracker = ProgressTracker::start(self.progress.clone());
        let result = self.run(&params.image, &mut tracker).await;
        tracker.reset();

        match &result {
            Ok(ExtractionOutcome::Extracted(receipt)) => self.logger.info(&format!(
                "Receipt extracted: {} items, tax {:.2}, tip {:.2}",
                receipt.items.len(),
                receipt.tax,
                receipt.tip
            )),
            Ok(ExtractionOutcome::Empty(_)) => self
                .logger
                .warn("Receipt extracted with no items; awaiting caller decision"),
            Err(err) => self.logger.error(&format!(
                "Receipt extraction failed ({}): {}",
                err,
                err.detail()
            )),
        }

        result
    }
}
