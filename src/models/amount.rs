//! Lenient monetary field handling.
//!
//! Claim submissions come from multipart form uploads, so a monetary field
//! may arrive as a JSON number, a numeric string, or free text typed into
//! the wrong box. The raw shape is preserved as submitted and interpreted
//! on demand, so documents can still render the literal value a coordinator
//! entered even when it does not parse.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary value as submitted by a coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// A proper numeric value
    Number(f64),
    /// Anything that arrived as text, numeric or not
    Text(String),
}

impl Amount {
    /// Interprets the field as a finite numeric value.
    ///
    /// Text is trimmed and parsed; non-finite numbers and unparsable text
    /// yield `None`.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// True when the field does not carry a usable numeric value.
    #[must_use]
    pub fn is_unparsable(&self) -> bool {
        self.value().is_none()
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for Amount {
    /// Numbers render with two decimals; text renders literally.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n:.2}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Interprets an optional amount field the way the review workflow does:
/// a missing field stays missing (so fallback chains can continue), while a
/// present-but-unusable field (unparsable text, non-finite, negative) is
/// coerced to zero.
#[must_use]
pub fn sanitized(field: Option<&Amount>) -> Option<f64> {
    field.map(|amount| match amount.value() {
        Some(v) if v >= 0.0 => v,
        _ => 0.0,
    })
}
