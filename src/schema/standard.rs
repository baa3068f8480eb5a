//! Standard JSON Schema (draft-07) for the model types, produced by
//! [`schemars`]. The frontend validates stored documents against these; the
//! AI service uses the structured-output schema from [`super::recipe`].

use schemars::r#gen::SchemaSettings;
use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde_json::Value;

use crate::types::RecipeError;

/// Draft-07 schema for `T` with every subschema inlined (no `$ref`s).
pub fn inline_root_schema<T: JsonSchema>() -> RootSchema {
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;
    settings.into_generator().into_root_schema_for::<T>()
}

/// [`inline_root_schema`] as a JSON value.
pub fn inline_schema_value<T: JsonSchema>() -> Result<Value, RecipeError> {
    Ok(serde_json::to_value(inline_root_schema::<T>())?)
}
