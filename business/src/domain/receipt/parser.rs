use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::ReceiptError;
use super::model::{ParsedReceipt, RawExtractionResult};

static OPENING_FENCE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^```[\w-]*[ \t]*\r?\n?").ok());
static CLOSING_FENCE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\r?\n?```\s*$").ok());

/// Decodes model output into a generic value.
pub struct ResponseParser;

impl ResponseParser {
    /// Decodes the text as is, then retries with code fences removed.
    pub fn parse(raw: &RawExtractionResult) -> Result<ParsedReceipt, ReceiptError> {
        let text = raw.text().trim();

        let direct_error = match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => return Ok(ParsedReceipt::new(value)),
            Err(e) => e,
        };

        let unfenced = strip_code_fences(text);
        if unfenced == text {
            return Err(ReceiptError::parse(format!(
                "response is not valid JSON: {direct_error}"
            )));
        }

        serde_json::from_str::<serde_json::Value>(unfenced)
            .map(ParsedReceipt::new)
            .map_err(|e| ReceiptError::parse(format!("fenced response is not valid JSON: {e}")))
    }
}

fn strip_code_fences(text: &str) -> &str {
    let mut start = 0;
    let mut end = text.len();

    if let Some(m) = OPENING_FENCE.as_ref().and_then(|re| re.find(text)) {
        start = m.end();
    }
    if let Some(m) = CLOSING_FENCE.as_ref().and_then(|re| re.find(&text[start..])) {
        end = start + m.start();
    }

    text[start..end].trim()
}
