//! Product Record
//!
//! The typed shape of one inventory item and the boundary that turns raw
//! store documents into it.
//!
//! Required fields (`id`, `provider`) are checked once here. Numeric fields
//! are coerced permissively: a value that cannot be read as a number counts
//! as zero and is logged, so a single malformed row never aborts a summary.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use super::error::RecordError;
use super::money::Money;

/// One inventory item (a "product").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,

    /// Units on hand for this entry
    pub quantity: u64,

    pub purchase_value: Money,

    pub sale_value: Money,

    /// Stored at creation as `sale_value - purchase_value`; never recomputed
    pub profit_value: Money,

    pub sold: bool,

    /// Seller the item is assigned to; `None` means unassigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,

    /// Supplying provider
    pub provider: String,

    /// Purchase (restock) the item arrived with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ProductRecord {
    /// Create a record on the write path, deriving profit from sale and purchase.
    pub fn new(
        id: impl Into<String>,
        provider: impl Into<String>,
        quantity: u64,
        purchase_value: Money,
        sale_value: Money,
    ) -> Self {
        Self {
            id: id.into(),
            quantity,
            purchase_value,
            sale_value,
            profit_value: sale_value - purchase_value,
            sold: false,
            seller: None,
            provider: provider.into(),
            purchase: None,
            description: None,
            size: None,
            code: None,
        }
    }

    pub fn with_seller(mut self, seller: impl Into<String>) -> Self {
        self.seller = Some(seller.into());
        self
    }

    pub fn with_purchase(mut self, purchase: impl Into<String>) -> Self {
        self.purchase = Some(purchase.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn mark_sold(mut self) -> Self {
        self.sold = true;
        self
    }

    /// Override the stored profit (documents edited after creation may disagree).
    pub fn with_profit(mut self, profit_value: Money) -> Self {
        self.profit_value = profit_value;
        self
    }

    /// True when the stored profit no longer equals `sale - purchase`.
    pub fn has_profit_drift(&self) -> bool {
        self.profit_value != self.sale_value - self.purchase_value
    }

    /// Searchable text fields, in match order.
    pub fn text_fields(&self) -> impl Iterator<Item = &str> {
        [&self.description, &self.size, &self.code]
            .into_iter()
            .filter_map(|field| field.as_deref())
    }

    // =========================================================================
    // Document boundary
    // =========================================================================

    /// Build a record from a raw store document.
    ///
    /// Accepts camelCase and snake_case field names. References may be a
    /// plain id string or an object carrying an `id` field.
    ///
    /// # Errors
    /// - `RecordError::NotAnObject` if the document is not a JSON object
    /// - `RecordError::MissingField` if `id` or `provider` is absent or empty
    pub fn from_document(document: &Value) -> Result<Self, RecordError> {
        let fields = document.as_object().ok_or(RecordError::NotAnObject)?;

        let id = field(fields, &["id", "_id"])
            .and_then(reference)
            .ok_or(RecordError::MissingField("id"))?;

        let provider = field(fields, &["provider", "providerId", "provider_id"])
            .and_then(reference)
            .ok_or_else(|| RecordError::MissingProvider(id.clone()))?;

        let quantity = coerce_quantity(&id, field(fields, &["quantity"]));
        let purchase_value = coerce_money(&id, "purchaseValue", field(fields, &["purchaseValue", "purchase_value"]));
        let sale_value = coerce_money(&id, "saleValue", field(fields, &["saleValue", "sale_value"]));
        let profit_value = coerce_money(&id, "profitValue", field(fields, &["profitValue", "profit_value"]));

        Ok(Self {
            quantity,
            purchase_value,
            sale_value,
            profit_value,
            sold: coerce_bool(field(fields, &["sold"])),
            seller: field(fields, &["seller", "sellerId", "seller_id"]).and_then(reference),
            provider,
            purchase: field(fields, &["purchase", "purchaseId", "purchase_id"]).and_then(reference),
            description: field(fields, &["description"]).and_then(text),
            size: field(fields, &["size"]).and_then(text),
            code: field(fields, &["code"]).and_then(text),
            id,
        })
    }
}

/// First present, non-null value among the candidate keys.
fn field<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

/// Reference id from a string, number or `{ "id": ... }` object.
fn reference(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("id").and_then(reference),
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Read a decimal from a JSON number or numeric string.
///
/// Strings may carry a `R$` prefix and use a comma as the decimal separator
/// ("12,50"). When both separators appear, the last one is the decimal
/// point and the other groups thousands ("1.234,56", "1,234.56").
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let repr = n.to_string();
            Decimal::from_str(&repr)
                .or_else(|_| Decimal::from_scientific(&repr))
                .ok()
        }
        Value::String(s) => {
            let trimmed = s.trim().trim_start_matches("R$").trim();
            if trimmed.is_empty() {
                return None;
            }
            let normalized = match (trimmed.rfind(','), trimmed.rfind('.')) {
                (Some(comma), Some(dot)) if comma > dot => trimmed.replace('.', "").replacen(',', ".", 1),
                (Some(_), Some(_)) => trimmed.replace(',', ""),
                (Some(_), None) => trimmed.replacen(',', ".", 1),
                _ => trimmed.to_string(),
            };
            Decimal::from_str(&normalized)
                .or_else(|_| Decimal::from_scientific(&normalized))
                .ok()
        }
        _ => None,
    }
}

fn coerce_money(id: &str, name: &'static str, value: Option<&Value>) -> Money {
    match value.map(parse_decimal) {
        Some(Some(decimal)) => Money::new(decimal),
        Some(None) => {
            tracing::warn!(record_id = %id, field = name, value = ?value, "Non-numeric money value counted as zero");
            Money::ZERO
        }
        None => {
            tracing::warn!(record_id = %id, field = name, "Missing money value counted as zero");
            Money::ZERO
        }
    }
}

fn coerce_quantity(id: &str, value: Option<&Value>) -> u64 {
    let parsed = value
        .and_then(parse_decimal)
        .filter(|d| d.fract().is_zero() && !d.is_sign_negative())
        .and_then(|d| d.to_u64());

    match parsed {
        Some(quantity) => quantity,
        None => {
            tracing::warn!(record_id = %id, field = "quantity", value = ?value, "Invalid quantity counted as zero");
            0
        }
    }
}

fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}
