//! # Cart Normalization
//!
//! Turns the untrusted product list posted by a client into provider-ready
//! line items. Validation is fail-fast: the first bad entry rejects the
//! whole cart and no line items are produced.

use crate::currency::Currency;
use crate::error::{CheckoutError, CheckoutResult, EntryField};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message returned when the product list is missing, not a list, or empty
pub const NO_PRODUCTS_MESSAGE: &str = "No products provided.";

/// Quantity used when an entry does not specify one
pub const DEFAULT_QUANTITY: u32 = 1;

/// One raw item from the client-supplied product list.
///
/// Every field is kept as raw JSON so that prices and quantities sent as
/// strings (`"9.99"`) are accepted and invalid values, `null` included, can
/// be echoed back verbatim in error messages.
#[derive(Debug, Clone, Default)]
pub struct CartEntry {
    pub name: Option<Value>,
    pub title: Option<Value>,
    pub price: Option<Value>,
    pub quantity: Option<Value>,
}

impl CartEntry {
    /// Read an entry from an arbitrary JSON value.
    ///
    /// Only object keys are consulted. Anything that is not an object yields
    /// an entry with every field absent, which then fails price validation.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                name: map.get("name").cloned(),
                title: map.get("title").cloned(),
                price: map.get("price").cloned(),
                quantity: map.get("quantity").cloned(),
            },
            _ => Self::default(),
        }
    }

    /// Display name candidates in precedence order: `name`, then `title`
    pub fn name_candidates(&self) -> [Option<&Value>; 2] {
        [self.name.as_ref(), self.title.as_ref()]
    }

    /// Validate this entry and convert it into a line item.
    ///
    /// `position` is 1-based and only used for the placeholder name.
    pub fn to_line_item(&self, position: usize, currency: Currency) -> CheckoutResult<LineItem> {
        let name = resolve_display_name(self.name_candidates(), position);

        let unit_amount = self
            .price
            .as_ref()
            .and_then(parse_numeric)
            .filter(|p| p.is_finite() && *p > 0.0)
            .and_then(|p| currency.to_minor_units(p))
            .ok_or_else(|| invalid_entry(&name, EntryField::Price, self.price.as_ref()))?;

        let quantity = resolve_quantity(self.quantity.as_ref())
            .and_then(whole_quantity)
            .ok_or_else(|| invalid_entry(&name, EntryField::Quantity, self.quantity.as_ref()))?;

        Ok(LineItem {
            currency,
            unit_amount,
            name,
            quantity,
        })
    }
}

/// A validated, provider-ready line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub currency: Currency,
    pub name: String,
    /// Unit price in minor currency units (cents for USD)
    pub unit_amount: i64,
    pub quantity: u32,
}

impl LineItem {
    /// Line total in minor units
    pub fn total(&self) -> i64 {
        self.unit_amount.saturating_mul(i64::from(self.quantity))
    }
}

/// Normalize a raw product list into line items of the same length and order.
///
/// Fails with [`CheckoutError::MalformedRequest`] when the list is absent,
/// not an array, or empty, and with [`CheckoutError::InvalidEntry`] on the
/// first entry whose price or quantity is invalid.
pub fn normalize_cart(products: Option<&Value>, currency: Currency) -> CheckoutResult<Vec<LineItem>> {
    let entries = match products {
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        _ => {
            return Err(CheckoutError::MalformedRequest(
                NO_PRODUCTS_MESSAGE.to_string(),
            ))
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(i, raw)| CartEntry::from_value(raw).to_line_item(i + 1, currency))
        .collect()
}

/// Total of all line items in minor units
pub fn cart_total(items: &[LineItem]) -> i64 {
    items
        .iter()
        .fold(0i64, |acc, item| acc.saturating_add(item.total()))
}

/// Resolve a display name from ordered candidates.
///
/// The first candidate that is a non-empty string wins; otherwise the
/// placeholder `Item {position}` is used, so the result is never empty.
pub fn resolve_display_name<'a, I>(candidates: I, position: usize) -> String
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str().filter(|s| !s.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Item {}", position))
}

/// Resolve the raw quantity, falling back to [`DEFAULT_QUANTITY`] when absent
/// or `null`.
///
/// Returns `None` when a value is present but not numeric.
pub fn resolve_quantity(raw: Option<&Value>) -> Option<f64> {
    match raw {
        None | Some(Value::Null) => Some(f64::from(DEFAULT_QUANTITY)),
        Some(value) => parse_numeric(value),
    }
}

/// Parse a JSON number or numeric string
pub fn parse_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn whole_quantity(q: f64) -> Option<u32> {
    if q.is_finite() && q >= 1.0 && q.fract() == 0.0 && q <= f64::from(u32::MAX) {
        Some(q as u32)
    } else {
        None
    }
}

fn invalid_entry(name: &str, field: EntryField, raw: Option<&Value>) -> CheckoutError {
    let value = match raw {
        None => "missing".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    CheckoutError::InvalidEntry {
        item: name.to_string(),
        field,
        value,
    }
}
