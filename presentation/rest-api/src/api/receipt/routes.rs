use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::receipt::errors::ReceiptError;
use business::domain::receipt::image_source::{ImageSource, SelectedFile};
use business::domain::receipt::model::RawImage;
use business::domain::receipt::use_cases::extract::{ExtractReceiptParams, ExtractReceiptUseCase};
use business::domain::receipt::value_objects::ImageOrigin;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::receipt::dto::{
    ExtractReceiptRequest, ExtractReceiptUpload, ReceiptExtractionResponse,
};
use crate::api::tags::ApiTags;

pub struct ReceiptApi {
    extract_use_case: Arc<dyn ExtractReceiptUseCase>,
}

impl ReceiptApi {
    pub fn new(extract_use_case: Arc<dyn ExtractReceiptUseCase>) -> Self {
        Self { extract_use_case }
    }

    async fn extract(&self, image: Result<RawImage, ReceiptError>) -> ExtractReceiptResponse {
        let image = match image {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!("Rejected receipt image: {}", err.detail());
                return err.into();
            }
        };

        match self
            .extract_use_case
            .execute(ExtractReceiptParams { image })
            .await
        {
            Ok(outcome) => ExtractReceiptResponse::Ok(Json(outcome.into())),
            Err(err) => err.into(),
        }
    }
}

/// Receipt extraction API
///
/// Endpoints that turn a receipt photo into line items, tax and tip.
#[OpenApi]
impl ReceiptApi {
    /// Extract a receipt from an encoded image
    ///
    /// Accepts a data URI or bare base64 image and returns the normalized
    /// receipt. A `status` of "empty" means no items were found.
    #[oai(path = "/receipts/extract", method = "post", tag = "ApiTags::Receipts")]
    async fn extract_receipt(&self, body: Json<ExtractReceiptRequest>) -> ExtractReceiptResponse {
        let origin = body.0.origin.map(Into::into).unwrap_or(ImageOrigin::File);
        let image =
            ImageSource::from_base64(origin, &body.0.image_base64, body.0.mime_type.as_deref());

        self.extract(image).await
    }

    /// Extract a receipt from an uploaded photo
    ///
    /// Multipart variant for camera captures and file pickers.
    #[oai(
        path = "/receipts/extract/upload",
        method = "post",
        tag = "ApiTags::Receipts"
    )]
    async fn extract_receipt_upload(&self, upload: ExtractReceiptUpload) -> ExtractReceiptResponse {
        let origin = match upload.origin.as_deref().map(str::trim).filter(|o| !o.is_empty()) {
            Some(raw) => match raw.parse::<ImageOrigin>() {
                Ok(origin) => origin,
                Err(e) => return self.extract(Err(ReceiptError::input(e))).await,
            },
            None => ImageOrigin::File,
        };

        let file = match upload.file {
            Some(upload) => {
                let file_name = upload.file_name().map(str::to_string);
                let content_type = upload.content_type().map(str::to_string);
                match upload.into_vec().await {
                    Ok(bytes) => Some(SelectedFile {
                        file_name,
                        content_type,
                        bytes,
                    }),
                    Err(e) => {
                        let err = ReceiptError::input(format!("upload could not be read: {e}"));
                        return self.extract(Err(err)).await;
                    }
                }
            }
            None => None,
        };

        self.extract(ImageSource::acquire(origin, file)).await
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ExtractReceiptResponse {
    #[oai(status = 200)]
    Ok(Json<ReceiptExtractionResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
}

impl From<ReceiptError> for ExtractReceiptResponse {
    fn from(err: ReceiptError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => ExtractReceiptResponse::BadRequest(json),
            502 => ExtractReceiptResponse::BadGateway(json),
            _ => ExtractReceiptResponse::UnprocessableEntity(json),
        }
    }
}
