pub mod config;
pub mod drag;
pub mod field;
pub mod generator;
pub mod session;
pub mod store;

pub use config::{ConfigError, FormConfig};
pub use drag::{DragReorderProtocol, DragState, DragSummary};
pub use field::{Draft, FieldDefinition, FieldType};
pub use generator::{CodeGenerator, generate};
pub use session::{FormEvent, FormSession, Outcome};
pub use store::{FieldList, FieldListStore, SubscriptionId};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Label field required. Please enter label.")]
    EmptyLabel,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("Index {index} out of range for {len} entries")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("No fields selected. Please add at least one field.")]
    EmptyFieldList,
}

/// Everything a session dispatch can fail with. All variants are recoverable:
/// the store is left untouched and the caller decides how to surface them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

impl FormError {
    /// Message meant for the notification layer.
    pub fn notification(&self) -> String {
        match self {
            FormError::Index(_) => "That item no longer exists. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<(), IndexError> {
    if index < len {
        Ok(())
    } else {
        Err(IndexError::OutOfRange { index, len })
    }
}
