use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use business::domain::receipt::errors::ReceiptError;
use business::domain::receipt::model::{ExtractionRequest, RawExtractionResult};
use business::domain::receipt::services::ExtractionService;

use crate::client::InferenceClient;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Receipt extraction through the OpenAI Responses API.
pub struct OpenAIReceiptExtractor {
    client: InferenceClient,
}

impl OpenAIReceiptExtractor {
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.client.base_url)
    }

    fn build_body(model: &str, request: &ExtractionRequest) -> serde_json::Value {
        json!({
            "model": model,
            "input": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "input_text",
                            "text": request.prompt,
                        },
                        {
                            "type": "input_image",
                            "image_url": request.image_data_url(),
                            "detail": "high",
                        },
                    ],
                },
            ],
            "temperature": 0.1,
        })
    }

    fn response_text(data: &serde_json::Value) -> Option<&str> {
        data["output"]
            .as_array()
            .and_then(|outputs| outputs.iter().find(|o| o["type"] == "message"))
            .and_then(|msg| msg["content"].as_array())
            .and_then(|contents| contents.iter().find(|c| c["type"] == "output_text"))
            .and_then(|c| c["text"].as_str())
            .filter(|text| !text.trim().is_empty())
    }
}

#[async_trait]
impl ExtractionService for OpenAIReceiptExtractor {
    async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<RawExtractionResult, ReceiptError> {
        let api_key = self.client.api_key()?;

        debug!(model = %self.client.model, mime_type = %request.mime_type, "calling OpenAI");

        let http_request = self
            .client
            .client
            .post(self.responses_url())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&Self::build_body(&self.client.model, request));

        let data = self.client.send_json(http_request).await?;

        Self::response_text(&data)
            .map(RawExtractionResult::new)
            .ok_or_else(|| ReceiptError::service("OpenAI response contained no text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DEFAULT_TIMEOUT;
    use httpmock::prelude::*;

    fn request() -> ExtractionRequest {
        ExtractionRequest {
            prompt: "Extract the receipt".to_string(),
            mime_type: "image/jpeg".to_string(),
            image_base64: "/9j/4A==".to_string(),
        }
    }

    #[test]
    fn should_send_image_as_data_url() {
        let body = OpenAIReceiptExtractor::build_body(DEFAULT_MODEL, &request());

        let content = &body["input"][0]["content"];
        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(content[0]["text"], "Extract the receipt");
        assert_eq!(content[1]["image_url"], "data:image/jpeg;base64,/9j/4A==");
    }

    #[test]
    fn should_read_first_output_text_of_message() {
        let data = json!({
            "output": [
                {"type": "reasoning", "content": []},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "{\"items\":[]}"}
                ]}
            ]
        });

        assert_eq!(
            OpenAIReceiptExtractor::response_text(&data),
            Some("{\"items\":[]}")
        );
    }

    #[test]
    fn should_find_no_text_in_blank_output() {
        let data = json!({
            "output": [{"type": "message", "content": [{"type": "output_text", "text": "  "}]}]
        });

        assert_eq!(OpenAIReceiptExtractor::response_text(&data), None);
    }

    #[tokio::test]
    async fn should_authorize_with_bearer_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/responses")
                    .header("Authorization", "Bearer test-key");
                then.status(200).json_body(json!({
                    "output": [{"type": "message", "content": [
                        {"type": "output_text", "text": "{\"items\":[]}"}
                    ]}]
                }));
            })
            .await;

        let extractor = OpenAIReceiptExtractor::new(InferenceClient::new(
            Some("test-key".to_string()),
            server.base_url(),
            DEFAULT_MODEL,
            DEFAULT_TIMEOUT,
        ));

        let result = extractor.extract(&request()).await;

        mock.assert_async().await;
        assert_eq!(result.unwrap().text(), "{\"items\":[]}");
    }

    #[tokio::test]
    async fn should_return_service_error_when_output_has_no_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/responses");
                then.status(200).json_body(json!({"output": []}));
            })
            .await;

        let extractor = OpenAIReceiptExtractor::new(InferenceClient::new(
            Some("test-key".to_string()),
            server.base_url(),
            DEFAULT_MODEL,
            DEFAULT_TIMEOUT,
        ));

        let result = extractor.extract(&request()).await;

        assert!(matches!(result, Err(ReceiptError::Service(_))));
    }
}
