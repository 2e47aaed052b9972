/// Failures of a receipt extraction run.
/// Display strings are code-style identifiers for i18n compatibility;
/// use `user_message` for text shown to people.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    #[error("receipt.input_invalid")]
    Input(String),
    #[error("receipt.service_failed")]
    Service(String),
    #[error("receipt.parse_failed")]
    Parse(String),
    #[error("receipt.schema_invalid")]
    Schema(String),
}

impl ReceiptError {
    pub fn input(detail: impl Into<String>) -> Self {
        ReceiptError::Input(detail.into())
    }
    pub fn service(detail: impl Into<String>) -> Self {
        ReceiptError::Service(detail.into())
    }
    pub fn parse(detail: impl Into<String>) -> Self {
        ReceiptError::Parse(detail.into())
    }
    pub fn schema(detail: impl Into<String>) -> Self {
        ReceiptError::Schema(detail.into())
    }

    /// Internal detail, meant for logs only.
    pub fn detail(&self) -> &str {
        match self {
            ReceiptError::Input(d)
            | ReceiptError::Service(d)
            | ReceiptError::Parse(d)
            | ReceiptError::Schema(d) => d,
        }
    }

    /// Human-readable message that never exposes internal state.
    pub fn user_message(&self) -> &'static str {
        match self {
            ReceiptError::Input(_) => "Please choose an image of your receipt to continue.",
            ReceiptError::Service(_) => {
                "Receipt processing failed because the recognition service could not be reached. Please try again."
            }
            ReceiptError::Parse(_) | ReceiptError::Schema(_) => {
                "Failed to read receipt data. Please try again with a clearer photo."
            }
        }
    }
}
