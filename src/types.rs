use serde_json::Value;
use thiserror::Error;

/// String-keyed map used by the document storage service.
///
/// Absent fields are omitted when writing. When reading, a missing key and an
/// explicit `null` are treated the same way.
pub type ValueMap = serde_json::Map<String, Value>;

/// Errors surfaced by the model and configuration layer.
///
/// Map conversions and schema generation never return these; they degrade
/// instead (see [`crate::model`] and [`crate::schema`]).
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RecipeError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RecipeError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Reasons a descriptor walk can abort.
///
/// These stay inside the schema layer: the recipe entry point catches them
/// and substitutes the static fallback schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field '{field}' on {type_name} has an unsupported kind ({kind})")]
    UnsupportedKind {
        type_name: &'static str,
        field: &'static str,
        kind: &'static str,
    },

    #[error("{type_name} declares a field with an empty name")]
    EmptyFieldName { type_name: &'static str },

    #[error("{type_name} declares field '{field}' more than once")]
    DuplicateField {
        type_name: &'static str,
        field: &'static str,
    },

    #[error("{type_name} refers back to itself; recursive shapes cannot be expressed")]
    Cycle { type_name: &'static str },
}
