//! Parsing of Kubernetes resource quantities ("4Gi", "500M", "1.5e3").
//!
//! The API server stores quantities as opaque strings, so the webhooks need
//! their own reading of the value to tell an unset size from a real one and
//! to compare sizes across updates.

use std::cmp::Ordering;
use std::sync::LazyLock;

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use thiserror::Error;

/// Errors produced while parsing a quantity string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The quantity string was empty
    #[error("quantity is empty")]
    Empty,

    /// The numeric part could not be read
    #[error("invalid number in quantity '{0}'")]
    InvalidNumber(String),

    /// The unit suffix is not one Kubernetes understands
    #[error("invalid suffix '{suffix}' in quantity '{input}'")]
    InvalidSuffix { input: String, suffix: String },
}

/// A quantity reduced to its value in base units (bytes for storage).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedQuantity {
    value: f64,
}

impl ParsedQuantity {
    /// Value in base units
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.value < 0.0
    }
}

impl PartialOrd for ParsedQuantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

// Pattern: <sign?><digits>[.<digits>]<suffix?>
static QUANTITY_RE: LazyLock<Option<regex::Regex>> = LazyLock::new(|| {
    regex::Regex::new(r"^([+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+))([A-Za-z][A-Za-z0-9+-]*)?$").ok()
});

/// Parse a Kubernetes quantity string
pub fn parse_quantity(input: &str) -> Result<ParsedQuantity, QuantityError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(QuantityError::Empty);
    }

    let captures = QUANTITY_RE
        .as_ref()
        .and_then(|re| re.captures(trimmed))
        .ok_or_else(|| QuantityError::InvalidNumber(input.to_string()))?;

    let number = captures
        .get(1)
        .map(|m| m.as_str())
        .ok_or_else(|| QuantityError::InvalidNumber(input.to_string()))?;
    let suffix = captures.get(2).map(|m| m.as_str()).unwrap_or("");

    let amount: f64 = number
        .parse()
        .map_err(|_| QuantityError::InvalidNumber(input.to_string()))?;
    let multiplier = suffix_multiplier(suffix).ok_or_else(|| QuantityError::InvalidSuffix {
        input: input.to_string(),
        suffix: suffix.to_string(),
    })?;

    // All-zero digits are zero whatever the suffix ("0e400" included)
    if !number.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        return Ok(ParsedQuantity { value: 0.0 });
    }

    // A non-zero amount must stay finite and non-zero once scaled
    let value = amount * multiplier;
    if !value.is_finite() || value == 0.0 {
        return Err(QuantityError::InvalidNumber(input.to_string()));
    }

    Ok(ParsedQuantity { value })
}

/// Multiplier for a binary (Ki..Ei), decimal (n..E) or exponent (e3, E-2) suffix
fn suffix_multiplier(suffix: &str) -> Option<f64> {
    let multiplier = match suffix {
        "" => 1.0,
        "Ki" => 1024f64,
        "Mi" => 1024f64.powi(2),
        "Gi" => 1024f64.powi(3),
        "Ti" => 1024f64.powi(4),
        "Pi" => 1024f64.powi(5),
        "Ei" => 1024f64.powi(6),
        "n" => 1e-9,
        "u" => 1e-6,
        "m" => 1e-3,
        "k" => 1e3,
        "M" => 1e6,
        "G" => 1e9,
        "T" => 1e12,
        "P" => 1e15,
        "E" => 1e18,
        _ => {
            let exponent = suffix
                .strip_prefix('e')
                .or_else(|| suffix.strip_prefix('E'))?;
            let exponent: i32 = exponent.parse().ok()?;
            10f64.powi(exponent)
        }
    };
    Some(multiplier)
}

/// Whether a quantity counts as unset.
///
/// An empty string or a value equal to zero ("0", "0Gi") is unset. A string
/// that does not parse is NOT unset: it is left in place for validation to
/// reject with a reason.
pub fn quantity_is_zero(quantity: &Quantity) -> bool {
    if quantity.0.trim().is_empty() {
        return true;
    }
    parse_quantity(&quantity.0).is_ok_and(|q| q.is_zero())
}
