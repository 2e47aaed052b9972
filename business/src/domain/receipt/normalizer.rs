use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use super::errors::ReceiptError;
use super::model::{ExtractionOutcome, NormalizedReceipt, ParsedReceipt, ReceiptItem};
use super::value_objects::Strictness;

pub const UNNAMED_ITEM: &str = "Unnamed item";

static LEADING_DECIMAL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").ok());

/// Validates a decoded response and coerces it into a [`NormalizedReceipt`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    strictness: Strictness,
}

impl Normalizer {
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }

    /// Fails only when `items` is missing or not a sequence. In lenient mode
    /// every later defect is replaced by a default.
    pub fn normalize(&self, parsed: &ParsedReceipt) -> Result<ExtractionOutcome, ReceiptError> {
        let entries = parsed
            .items()
            .ok_or_else(|| ReceiptError::schema("missing items"))?;

        let items = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| -> Result<ReceiptItem, ReceiptError> {
                Ok(ReceiptItem {
                    id: Uuid::new_v4(),
                    name: item_name(entry),
                    price: self.amount(&format!("items[{index}].price"), entry.get("price"))?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let receipt = NormalizedReceipt {
            items,
            tax: self.amount("tax", parsed.field("tax"))?,
            tip: self.amount("tip", parsed.field("tip"))?,
        };

        if receipt.items.is_empty() {
            Ok(ExtractionOutcome::Empty(receipt))
        } else {
            Ok(ExtractionOutcome::Extracted(receipt))
        }
    }

    fn amount(&self, field: &str, value: Option<&Value>) -> Result<f64, ReceiptError> {
        let parsed = match value {
            None | Some(Value::Null) => return Ok(0.0),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => match self.strictness {
                Strictness::Lenient => leading_decimal(s),
                Strictness::Strict => s.trim().parse::<f64>().ok(),
            },
            Some(_) => None,
        };

        match parsed.filter(|amount| amount.is_finite() && *amount >= 0.0) {
            // -0 reads as 0
            Some(amount) => Ok(amount + 0.0),
            None if self.strictness == Strictness::Lenient => Ok(0.0),
            None => Err(ReceiptError::schema(format!(
                "{field} is not a non-negative number"
            ))),
        }
    }
}

fn item_name(entry: &Value) -> String {
    match entry.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => name.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => UNNAMED_ITEM.to_string(),
    }
}

/// Reads the longest decimal prefix, so `"4.50 EUR"` is `4.5`.
fn leading_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    LEADING_DECIMAL
        .as_ref()
        .and_then(|re| re.find(trimmed))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn lenient(value: Value) -> Result<ExtractionOutcome, ReceiptError> {
        Normalizer::default().normalize(&ParsedReceipt::new(value))
    }

    fn strict(value: Value) -> Result<ExtractionOutcome, ReceiptError> {
        Normalizer::new(Strictness::Strict).normalize(&ParsedReceipt::new(value))
    }

    #[test]
    fn should_fail_with_schema_error_when_items_missing() {
        let result = lenient(json!({"tax": 1.0, "tip": 0}));

        assert!(matches!(result, Err(ReceiptError::Schema(ref d)) if d == "missing items"));
    }

    #[test]
    fn should_fail_with_schema_error_when_items_not_a_sequence() {
        assert!(matches!(
            lenient(json!({"items": {"name": "Coffee"}})),
            Err(ReceiptError::Schema(_))
        ));
        assert!(matches!(lenient(json!([1, 2])), Err(ReceiptError::Schema(_))));
        assert!(matches!(lenient(json!(null)), Err(ReceiptError::Schema(_))));
    }

    #[test]
    fn should_read_negative_zero_as_positive_zero() {
        let receipt = lenient(json!({
            "items": [{"name": "Water", "price": "-0"}],
            "tax": -0.0,
            "tip": "-0.00"
        }))
        .unwrap()
        .into_receipt();

        assert!(receipt.items[0].price.is_sign_positive());
        assert!(receipt.tax.is_sign_positive());
        assert!(receipt.tip.is_sign_positive());
    }

    #[test]
    fn should_signal_empty_extraction_when_items_empty() {
        let outcome = lenient(json!({"items": [], "tax": 0, "tip": 0, "total": 0})).unwrap();

        assert_eq!(
            outcome,
            ExtractionOutcome::Empty(NormalizedReceipt {
                items: vec![],
                tax: 0.0,
                tip: 0.0,
            })
        );
    }

    #[test]
    fn should_normalize_single_coffee_receipt() {
        let outcome = lenient(json!({
            "items": [{"name": "Coffee", "price": "4.50"}],
            "tax": 0.36,
            "tip": 0,
            "total": 4.86
        }))
        .unwrap();

        let ExtractionOutcome::Extracted(receipt) = outcome else {
            panic!("expected extracted outcome");
        };
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].name, "Coffee");
        assert_eq!(receipt.items[0].price, 4.5);
        assert_eq!(receipt.tax, 0.36);
        assert_eq!(receipt.tip, 0.0);
    }

    #[test]
    fn should_coerce_tax_values_with_zero_default() {
        let cases = [
            (json!({"items": [], "tax": "3.50"}), 3.5),
            (json!({"items": [], "tax": 3.5}), 3.5),
            (json!({"items": [], "tax": null}), 0.0),
            (json!({"items": []}), 0.0),
            (json!({"items": [], "tax": "abc"}), 0.0),
        ];

        for (input, expected) in cases {
            let tax = lenient(input.clone()).unwrap().receipt().tax;
            assert_eq!(tax, expected, "input {input}");
        }
    }

    #[test]
    fn should_read_leading_number_of_decorated_strings() {
        let receipt = lenient(json!({
            "items": [
                {"name": "Tea", "price": " 4.50 EUR"},
                {"name": "Cake", "price": "$3.00"},
                {"name": "Water", "price": ".5"}
            ]
        }))
        .unwrap()
        .into_receipt();

        let prices: Vec<f64> = receipt.items.iter().map(|i| i.price).collect();
        assert_eq!(prices, vec![4.5, 0.0, 0.5]);
    }

    #[test]
    fn should_neutralize_negative_and_non_numeric_prices() {
        let receipt = lenient(json!({
            "items": [
                {"name": "Discount", "price": -2.0},
                {"name": "Bag", "price": true},
                {"name": "Soup", "price": [1]},
                {"name": "Bread"}
            ],
            "tip": "-1"
        }))
        .unwrap()
        .into_receipt();

        assert!(receipt.items.iter().all(|item| item.price == 0.0));
        assert_eq!(receipt.tip, 0.0);
    }

    #[test]
    fn should_use_placeholder_when_name_absent_or_blank() {
        let receipt = lenient(json!({
            "items": [
                {"price": 1},
                {"name": "   ", "price": 1},
                {"name": null, "price": 1},
                "just a string",
                {"name": "  Fries ", "price": 1},
                {"name": 7, "price": 1}
            ]
        }))
        .unwrap()
        .into_receipt();

        let names: Vec<&str> = receipt.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec![UNNAMED_ITEM, UNNAMED_ITEM, UNNAMED_ITEM, UNNAMED_ITEM, "Fries", "7"]
        );
    }

    #[test]
    fn should_assign_fresh_ids_ignoring_source_ids() {
        let receipt = lenient(json!({
            "items": [
                {"id": "same", "name": "A", "price": 1},
                {"id": "same", "name": "B", "price": 2},
                {"name": "C", "price": 3}
            ]
        }))
        .unwrap()
        .into_receipt();

        let ids: HashSet<Uuid> = receipt.items.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn should_reject_present_malformed_amounts_when_strict() {
        let result = strict(json!({
            "items": [{"name": "Tea", "price": "4.50 EUR"}]
        }));

        assert!(matches!(result, Err(ReceiptError::Schema(ref d)) if d.contains("items[0].price")));
        assert!(matches!(
            strict(json!({"items": [], "tax": -1})),
            Err(ReceiptError::Schema(ref d)) if d.contains("tax")
        ));
    }

    #[test]
    fn should_default_missing_amounts_when_strict() {
        let receipt = strict(json!({
            "items": [{"name": "Tea", "price": "2.25"}, {"name": "Milk"}],
            "tip": null
        }))
        .unwrap()
        .into_receipt();

        assert_eq!(receipt.items[0].price, 2.25);
        assert_eq!(receipt.items[1].price, 0.0);
        assert_eq!(receipt.tax, 0.0);
        assert_eq!(receipt.tip, 0.0);
    }

    fn arbitrary_amount() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<f64>().prop_map(|f| serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null)),
            any::<i64>().prop_map(|i| json!(i)),
            ".*".prop_map(Value::String),
            "[-+ ]?[0-9]{0,4}(\\.[0-9]{0,3})?[a-z$ ]{0,3}".prop_map(Value::String),
            any::<bool>().prop_map(Value::Bool),
            Just(Value::Null),
        ]
    }

    fn arbitrary_entry() -> impl Strategy<Value = Value> {
        (
            proptest::option::of(".*"),
            proptest::option::of(arbitrary_amount()),
            any::<bool>(),
        )
            .prop_map(|(name, price, with_id)| {
                let mut entry = serde_json::Map::new();
                if let Some(name) = name {
                    entry.insert("name".to_string(), Value::String(name));
                }
                if let Some(price) = price {
                    entry.insert("price".to_string(), price);
                }
                if with_id {
                    entry.insert("id".to_string(), json!("duplicate"));
                }
                Value::Object(entry)
            })
    }

    proptest! {
        #[test]
        fn should_never_fail_and_keep_amounts_non_negative(
            entries in proptest::collection::vec(arbitrary_entry(), 1..20),
            tax in arbitrary_amount(),
            tip in arbitrary_amount(),
        ) {
            let count = entries.len();
            let outcome = lenient(json!({"items": entries, "tax": tax, "tip": tip}));

            prop_assert!(outcome.is_ok());
            let receipt = outcome.unwrap().into_receipt();
            prop_assert_eq!(receipt.items.len(), count);
            prop_assert!(receipt.tax.is_finite() && receipt.tax >= 0.0);
            prop_assert!(receipt.tip.is_finite() && receipt.tip >= 0.0);
            for item in &receipt.items {
                prop_assert!(item.price.is_finite() && item.price >= 0.0);
                prop_assert!(!item.name.trim().is_empty());
            }
            let ids: HashSet<Uuid> = receipt.items.iter().map(|i| i.id).collect();
            prop_assert_eq!(ids.len(), count);
        }
    }
}
