use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::ImageOrigin;

/// Encoded receipt photo held in memory for a single extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct RawImage {
    origin: ImageOrigin,
    mime_type: String,
    bytes: Vec<u8>,
}

impl RawImage {
    /// Constructor for bytes already checked by the image source.
    pub(crate) fn new(origin: ImageOrigin, mime_type: String, bytes: Vec<u8>) -> Self {
        Self {
            origin,
            mime_type,
            bytes,
        }
    }

    pub fn origin(&self) -> ImageOrigin {
        self.origin
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Previewable `data:` URI of the image.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

/// Prompt and transport-encoded image bundled for one inference call.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub prompt: String,
    pub mime_type: String,
    pub image_base64: String,
}

impl ExtractionRequest {
    pub fn new(prompt: impl Into<String>, image: &RawImage) -> Self {
        Self {
            prompt: prompt.into(),
            mime_type: image.mime_type().to_string(),
            image_base64: STANDARD.encode(image.bytes()),
        }
    }

    /// Inline image as a `data:` URL, for providers that take URLs.
    pub fn image_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.image_base64)
    }
}

/// Untrusted text returned by the inference service.
#[derive(Debug, Clone, PartialEq)]
pub struct RawExtractionResult(String);

impl RawExtractionResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

/// Decoded response before validation. Any shape is accepted here.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReceipt(serde_json::Value);

impl ParsedReceipt {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }

    /// The `items` container, when present and a sequence.
    pub fn items(&self) -> Option<&Vec<serde_json::Value>> {
        self.0.get("items").and_then(|items| items.as_array())
    }

    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }
}

/// A validated receipt line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

/// Validated extraction output handed to the bill-splitting consumer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedReceipt {
    pub items: Vec<ReceiptItem>,
    pub tax: f64,
    pub tip: f64,
}

/// Result of a successful run.
///
/// `Empty` means the service answered with an empty item list; the caller
/// decides whether to continue with manual entry or retry.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Extracted(NormalizedReceipt),
    Empty(NormalizedReceipt),
}

impl ExtractionOutcome {
    pub fn receipt(&self) -> &NormalizedReceipt {
        match self {
            ExtractionOutcome::Extracted(receipt) | ExtractionOutcome::Empty(receipt) => receipt,
        }
    }

    pub fn into_receipt(self) -> NormalizedReceipt {
        match self {
            ExtractionOutcome::Extracted(receipt) | ExtractionOutcome::Empty(receipt) => receipt,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ExtractionOutcome::Empty(_))
    }
}
