use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::ReceiptError;
use super::model::RawImage;
use super::value_objects::ImageOrigin;

const FALLBACK_MIME_TYPE: &str = "image/jpeg";

static DATA_URL_PREFIX: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(?i:data):([A-Za-z0-9.+-]+/[A-Za-z0-9.+-]+)(;[^,]*)?;base64,").ok());

/// A file chosen by the user from a camera capture or a file picker.
#[derive(Debug, Clone, Default)]
pub struct SelectedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Turns user-supplied files into in-memory images ready for extraction.
pub struct ImageSource;

impl ImageSource {
    /// Accepts a selected file, rejecting missing, empty, or non-image input.
    ///
    /// The declared content type wins; without one, the type is guessed
    /// from the file name.
    pub fn acquire(
        origin: ImageOrigin,
        file: Option<SelectedFile>,
    ) -> Result<RawImage, ReceiptError> {
        let file = file.ok_or_else(|| ReceiptError::input("no file supplied"))?;

        let mime_type = file
            .content_type
            .as_deref()
            .map(normalize_mime)
            .filter(|m| !m.is_empty() && m != "application/octet-stream")
            .or_else(|| {
                file.file_name
                    .as_deref()
                    .and_then(|name| mime_guess::from_path(name).first())
                    .map(|m| m.essence_str().to_string())
            })
            .ok_or_else(|| ReceiptError::input("file type could not be determined"))?;

        Self::build(origin, mime_type, file.bytes)
    }

    /// Accepts a `data:` URI or a bare base64 payload.
    ///
    /// Without a type in the URI or `declared_mime`, the type is sniffed from
    /// the leading bytes and falls back to JPEG.
    pub fn from_base64(
        origin: ImageOrigin,
        encoded: &str,
        declared_mime: Option<&str>,
    ) -> Result<RawImage, ReceiptError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(ReceiptError::input("no file supplied"));
        }

        let (url_mime, payload) = match DATA_URL_PREFIX.as_ref().and_then(|re| re.captures(encoded)) {
            Some(caps) => {
                let prefix_len = caps.get(0).map(|m| m.end()).unwrap_or(0);
                (
                    caps.get(1).map(|m| normalize_mime(m.as_str())),
                    &encoded[prefix_len..],
                )
            }
            None => (None, encoded),
        };

        let clean: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(clean.as_bytes())
            .map_err(|e| ReceiptError::input(format!("invalid base64 payload: {e}")))?;

        let mime_type = url_mime
            .or_else(|| declared_mime.map(normalize_mime).filter(|m| !m.is_empty()))
            .or_else(|| sniff_mime(&bytes).map(str::to_string))
            .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string());

        Self::build(origin, mime_type, bytes)
    }

    fn build(
        origin: ImageOrigin,
        mime_type: String,
        bytes: Vec<u8>,
    ) -> Result<RawImage, ReceiptError> {
        if !mime_type.starts_with("image/") {
            return Err(ReceiptError::input(format!(
                "declared type {mime_type} is not an image"
            )));
        }
        if bytes.is_empty() {
            return Err(ReceiptError::input("file is empty"));
        }
        Ok(RawImage::new(origin, mime_type, bytes))
    }
}

fn normalize_mime(raw: &str) -> String {
    raw.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}
