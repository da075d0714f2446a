//! # Request Types
//!
//! The inbound pricing request and the quote returned for it.

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::num::IntErrorKind;
use uuid::Uuid;

/// Key holding the pallet count
pub const NUM_PALLETS: &str = "num_pallets";

/// Key holding the pallet specification label
pub const PALLET_SPEC: &str = "pallet_spec";

/// A pricing request as submitted by the client.
///
/// Fields are kept as raw JSON so that categorical values the rate table does
/// not recognize can fall through to their zero-cost default instead of
/// failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricingRequest {
    fields: Map<String, Value>,
}

impl PricingRequest {
    /// Wrap a JSON value; returns `None` unless it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Raw field value (`null` is treated as absent)
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Field value if it is a string
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// True when the field holds exactly the given token
    pub fn flag_is(&self, key: &str, token: &str) -> bool {
        self.text(key) == Some(token)
    }

    /// The pallet count, coerced to an integer.
    ///
    /// Accepts JSON integers, floats (truncated toward zero) and strings
    /// holding a base-10 integer. Negative counts are rejected; integers
    /// beyond `i64` are an `UnexpectedError`, not a type error.
    pub fn num_pallets(&self) -> PricingResult<i64> {
        let value = self.get(NUM_PALLETS).ok_or_else(|| self.missing(NUM_PALLETS))?;

        let count = match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i
                } else if let Some(f) = n.as_f64().filter(|f| f.is_finite()) {
                    let truncated = f.trunc();
                    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
                        return Err(self.unexpected(format!("num_pallets {} is out of range", n)));
                    }
                    truncated as i64
                } else {
                    return Err(self.unexpected(format!("num_pallets {} is out of range", n)));
                }
            }
            Value::String(s) => s.trim().parse::<i64>().map_err(|e| match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    self.unexpected(format!("num_pallets '{}' is out of range", s))
                }
                _ => self.invalid(NUM_PALLETS, format!("'{}' is not an integer ({})", s, e)),
            })?,
            other => {
                return Err(self.invalid(
                    NUM_PALLETS,
                    format!("expected an integer, got {}", json_type_name(other)),
                ))
            }
        };

        if count < 0 {
            return Err(self.invalid(NUM_PALLETS, format!("must not be negative, got {}", count)));
        }

        Ok(count)
    }

    /// Pass-through metadata echoed back in the quote
    pub fn echoed(&self) -> EchoedFields {
        let field = |key: &str| self.fields.get(key).cloned().unwrap_or(Value::Null);
        EchoedFields {
            am_pm: field("am_pm"),
            do_number: field("do_number"),
            delivery_date: field("delivery_date"),
            bu: field("bu"),
            customer_name: field("customer_name"),
        }
    }

    /// The request rendered as compact JSON, used in error messages
    pub fn describe(&self) -> String {
        serde_json::to_string(&self.fields).unwrap_or_else(|_| format!("{:?}", self.fields))
    }

    pub(crate) fn missing(&self, field: &str) -> PricingError {
        PricingError::MissingField {
            field: field.to_string(),
            input: self.describe(),
        }
    }

    pub(crate) fn invalid(&self, field: &str, message: impl Into<String>) -> PricingError {
        PricingError::InvalidType {
            field: field.to_string(),
            message: message.into(),
            input: self.describe(),
        }
    }

    pub(crate) fn unexpected(&self, message: impl Into<String>) -> PricingError {
        PricingError::UnexpectedError {
            message: message.into(),
            input: self.describe(),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Request fields echoed verbatim in the response, unvalidated.
///
/// Absent fields are echoed as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EchoedFields {
    pub am_pm: Value,
    pub do_number: Value,
    pub delivery_date: Value,
    pub bu: Value,
    pub customer_name: Value,
}

/// A computed price for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Total cost, two decimal places
    pub total_cost: Money,

    /// Freshly generated request identifier
    pub identifier: String,

    /// Pass-through metadata
    #[serde(flatten)]
    pub echoed: EchoedFields,
}

impl Quote {
    /// Create a quote with a newly generated identifier
    pub fn new(total_cost: Money, echoed: EchoedFields) -> Self {
        Self {
            total_cost,
            identifier: Uuid::new_v4().to_string(),
            echoed,
        }
    }
}
