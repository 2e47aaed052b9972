use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use business::domain::receipt::errors::ReceiptError;
use business::domain::receipt::model::{ExtractionRequest, RawExtractionResult};
use business::domain::receipt::services::ExtractionService;

use crate::client::InferenceClient;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Receipt extraction through the Gemini `generateContent` endpoint.
pub struct GeminiReceiptExtractor {
    client: InferenceClient,
}

impl GeminiReceiptExtractor {
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.client.base_url, self.client.model
        )
    }

    fn build_body(request: &ExtractionRequest) -> serde_json::Value {
        json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [
                        {"text": request.prompt},
                        {
                            "inline_data": {
                                "mime_type": request.mime_type,
                                "data": request.image_base64,
                            }
                        },
                    ],
                }
            ],
            "generationConfig": {
                "temperature": 0.1,
            },
        })
    }

    /// Concatenated text parts of the first candidate.
    fn response_text(data: serde_json::Value) -> Result<String, ReceiptError> {
        let response: GenerateContentResponse = serde_json::from_value(data)
            .map_err(|e| ReceiptError::service(format!("unexpected Gemini response: {e}")))?;

        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ReceiptError::service(format!(
                "Gemini blocked the request: {reason}"
            )));
        }

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ReceiptError::service("Gemini response contained no text"));
        }
        Ok(text)
    }
}

#[async_trait]
impl ExtractionService for GeminiReceiptExtractor {
    async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<RawExtractionResult, ReceiptError> {
        let api_key = self.client.api_key()?;

        debug!(model = %self.client.model, mime_type = %request.mime_type, "calling Gemini");

        let http_request = self
            .client
            .client
            .post(self.generate_content_url())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", api_key)
            .json(&Self::build_body(request));

        let data = self.client.send_json(http_request).await?;

        Self::response_text(data).map(RawExtractionResult::new)
    }
}
