//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// A store document that cannot become a `ProductRecord`.
///
/// Only structural problems are errors. Bad numbers never are: they are
/// coerced to zero at the boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Product document is not an object")]
    NotAnObject,

    #[error("Product document is missing required field: {0}")]
    MissingField(&'static str),

    #[error("Product {0} has no provider")]
    MissingProvider(String),
}

/// Filter arguments that contradict each other
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Seller id and unassigned seller cannot be combined")]
    ConflictingSeller,
}

impl RecordError {
    /// Identifier of the offending record, when one could be read
    pub fn record_id(&self) -> Option<&str> {
        match self {
            Self::MissingProvider(id) => Some(id.as_str()),
            Self::NotAnObject | Self::MissingField(_) => None,
        }
    }
}
