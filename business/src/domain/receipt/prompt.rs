/// Version of the JSON shape described by [`EXTRACTION_PROMPT`].
/// Bump together with the normalizer whenever the shape changes.
pub const SCHEMA_VERSION: u32 = 1;

const EXTRACTION_PROMPT: &str = r#"Analyze this receipt image and extract the following information in JSON format:

{
  "items": [
    {"name": "Item Name", "price": 12.99},
    {"name": "Another Item", "price": 8.50}
  ],
  "tax": 2.15,
  "tip": 3.00,
  "total": 26.64
}

Rules:
- Extract ALL purchasable food/drink items with their exact prices
- Include the tax amount (look for "tax", "GST", "HST", "VAT", "sales tax")
- Include the tip/gratuity if present (look for "tip", "gratuity", "service charge")
- Prices, tax, tip and total must be numbers, not strings
- Item names must be clean (no prices, quantities, or currency symbols)
- If no tax or tip is found, set it to 0
- Return ONLY the JSON object, no other text and no markdown"#;

/// Builds the instruction text sent alongside the receipt image.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build() -> &'static str {
        EXTRACTION_PROMPT
    }
}
