use poem_openapi::types::multipart::Upload;
use poem_openapi::{Enum, Multipart, Object};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use business::domain::receipt::model::{ExtractionOutcome, ReceiptItem};
use business::domain::receipt::value_objects::ImageOrigin;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Enum)]
pub enum ImageOriginDto {
    #[oai(rename = "camera")]
    Camera,
    #[oai(rename = "file")]
    File,
}

impl From<ImageOriginDto> for ImageOrigin {
    fn from(dto: ImageOriginDto) -> Self {
        match dto {
            ImageOriginDto::Camera => ImageOrigin::Camera,
            ImageOriginDto::File => ImageOrigin::File,
        }
    }
}

/// Request to extract a receipt from an encoded image.
#[derive(Debug, Clone, Object)]
pub struct ExtractReceiptRequest {
    /// Receipt image as a data URI or bare base64
    pub image_base64: String,
    /// MIME type of the image, when `image_base64` is not a data URI
    pub mime_type: Option<String>,
    /// Where the image came from (default: file)
    pub origin: Option<ImageOriginDto>,
}

/// Multipart upload of a receipt photo.
#[derive(Debug, Multipart)]
pub struct ExtractReceiptUpload {
    /// Receipt image file
    pub file: Option<Upload>,
    /// "camera" or "file" (default: file)
    pub origin: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Enum)]
pub enum ExtractionStatusDto {
    /// At least one item was found
    #[oai(rename = "extracted")]
    Extracted,
    /// The receipt was read but no items were found; the client may continue
    /// with manual entry or retry with another photo
    #[oai(rename = "empty")]
    Empty,
}

/// A single validated receipt line.
#[derive(Debug, Clone, Object)]
pub struct ReceiptItemResponse {
    /// Identifier generated for this extraction
    pub id: Uuid,
    /// Item name
    pub name: String,
    /// Item price, never negative
    pub price: f64,
}

impl From<ReceiptItem> for ReceiptItemResponse {
    fn from(item: ReceiptItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
        }
    }
}

/// Receipt extraction result.
#[derive(Debug, Clone, Object)]
pub struct ReceiptExtractionResponse {
    pub status: ExtractionStatusDto,
    /// Extracted line items, in receipt order
    pub items: Vec<ReceiptItemResponse>,
    /// Tax amount, 0 when not found
    pub tax: f64,
    /// Tip amount, 0 when not found
    pub tip: f64,
}

impl From<ExtractionOutcome> for ReceiptExtractionResponse {
    fn from(outcome: ExtractionOutcome) -> Self {
        let status = if outcome.is_empty() {
            ExtractionStatusDto::Empty
        } else {
            ExtractionStatusDto::Extracted
        };
        let receipt = outcome.into_receipt();

        Self {
            status,
            items: receipt.items.into_iter().map(Into::into).collect(),
            tax: receipt.tax,
            tip: receipt.tip,
        }
    }
}
