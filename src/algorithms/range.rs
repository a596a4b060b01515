/// Property range predicates over relationships
///
/// Integer ranges are closed (`min <= v <= max`); timestamp ranges are open
/// (`min < v < max`). Timestamps are RFC 3339 strings and compare as instants,
/// whatever their offset.

use crate::types::Edge;
use chrono::{DateTime, FixedOffset};
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::trace;

/// Why a property could not be checked against a range
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("Property '{0}' is missing")]
    Missing(String),

    #[error("Property '{property}' is not {expected}: {found}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        found: String,
    },
}

/// Bounds of a property range
#[derive(Debug, Clone, PartialEq)]
pub enum RangeBounds {
    /// Inclusive on both ends
    Integer { min: i64, max: i64 },
    /// Exclusive on both ends
    Timestamp {
        min: DateTime<FixedOffset>,
        max: DateTime<FixedOffset>,
    },
}

/// Admits relationships whose `property` lies within `bounds`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRange {
    property: String,
    bounds: RangeBounds,
}

impl PropertyRange {
    pub fn integer(property: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            property: property.into(),
            bounds: RangeBounds::Integer { min, max },
        }
    }

    pub fn timestamp(
        property: impl Into<String>,
        min: DateTime<FixedOffset>,
        max: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            property: property.into(),
            bounds: RangeBounds::Timestamp { min, max },
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn bounds(&self) -> &RangeBounds {
        &self.bounds
    }

    /// Check `edge` against the range
    ///
    /// # Returns
    /// * `Ok(true)` / `Ok(false)` - The property is present, well-typed, and in/out of range
    /// * `Err(PropertyError)` - The property is missing or has the wrong type
    pub fn check(&self, edge: &Edge) -> Result<bool, PropertyError> {
        let value = edge
            .get_property(&self.property)
            .ok_or_else(|| PropertyError::Missing(self.property.clone()))?;

        match &self.bounds {
            RangeBounds::Integer { min, max } => {
                let v = value.as_i64().ok_or_else(|| self.mismatch("an integer", value))?;
                Ok(*min <= v && v <= *max)
            }
            RangeBounds::Timestamp { min, max } => {
                let v = value
                    .as_str()
                    .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                    .ok_or_else(|| self.mismatch("a timestamp", value))?;
                Ok(*min < v && v < *max)
            }
        }
    }

    /// Whether `edge` may be traversed; unreadable properties exclude it
    pub fn admits(&self, edge: &Edge) -> bool {
        match self.check(edge) {
            Ok(admitted) => admitted,
            Err(err) => {
                trace!(edge = %edge.id, error = %err, "relationship excluded");
                false
            }
        }
    }

    fn mismatch(&self, expected: &'static str, found: &JsonValue) -> PropertyError {
        PropertyError::TypeMismatch {
            property: self.property.clone(),
            expected,
            found: found.to_string(),
        }
    }
}
