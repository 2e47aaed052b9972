use std::sync::Arc;

use logger::{TracingLogger, TracingProgressReporter};
use vision::client::InferenceClient;
use vision::gemini::GeminiReceiptExtractor;
use vision::openai::OpenAIReceiptExtractor;

use business::application::receipt::extract::ExtractReceiptUseCaseImpl;
use business::domain::receipt::normalizer::Normalizer;
use business::domain::receipt::services::ExtractionService;

use crate::config::inference_config::{InferenceConfig, InferenceProvider};

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub receipt_api: crate::api::receipt::routes::ReceiptApi,
}

impl DependencyContainer {
    pub fn new(config: InferenceConfig) -> Self {
        let logger = Arc::new(TracingLogger);

        let client = InferenceClient::new(
            config.api_key,
            config.base_url,
            config.model,
            config.timeout,
        );
        let credential_configured = client.has_api_key();
        if !credential_configured {
            tracing::warn!(
                provider = %config.provider,
                "No inference credential configured; receipt extraction requests will fail"
            );
        }

        let extractor: Arc<dyn ExtractionService> = match config.provider {
            InferenceProvider::Gemini => Arc::new(GeminiReceiptExtractor::new(client)),
            InferenceProvider::OpenAI => Arc::new(OpenAIReceiptExtractor::new(client)),
        };

        let extract_use_case = Arc::new(ExtractReceiptUseCaseImpl {
            extractor,
            progress: Arc::new(TracingProgressReporter),
            normalizer: Normalizer::new(config.strictness),
            logger,
        });

        Self {
            health_api: crate::api::health::routes::Api::new(
                config.provider.to_string(),
                credential_configured,
            ),
            receipt_api: crate::api::receipt::routes::ReceiptApi::new(extract_use_case),
        }
    }
}
