use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::kind::SchemaType;
use crate::types::RecipeError;

/// One finished node of a structured-output schema.
///
/// Produced by [`SchemaBuilder::build`](super::SchemaBuilder::build) and
/// immutable afterwards. Properties keep their insertion order, which prompt
/// shaping on the consumer side relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub(crate) kind: SchemaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) items: Option<Box<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) properties: Option<IndexMap<String, Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) required: Option<Vec<String>>,
}

impl Schema {
    pub fn kind(&self) -> SchemaType {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn items(&self) -> Option<&Schema> {
        self.items.as_deref()
    }

    pub fn properties(&self) -> Option<&IndexMap<String, Schema>> {
        self.properties.as_ref()
    }

    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties.as_ref()?.get(name)
    }

    /// Property names in declaration order.
    pub fn property_names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .flat_map(|props| props.keys().map(String::as_str))
            .collect()
    }

    pub fn required(&self) -> &[String] {
        self.required.as_deref().unwrap_or_default()
    }

    /// Follows a dotted path of property names, e.g. `"nutritionalInfo.perServing.calories"`.
    pub fn at_path(&self, path: &str) -> Option<&Schema> {
        path.split('.').try_fold(self, |node, name| node.property(name))
    }

    /// True if `name` is a property anywhere in this tree, including array items.
    pub fn mentions_property(&self, name: &str) -> bool {
        let nested = self
            .properties
            .iter()
            .flat_map(|props| props.iter())
            .any(|(key, child)| key == name || child.mentions_property(name));
        nested || self.items().is_some_and(|items| items.mentions_property(name))
    }

    /// Converts to a JSON value ready to be sent as a response schema.
    pub fn to_value(&self) -> Result<Value, RecipeError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, RecipeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "Schema{}", json),
            Err(_) => write!(f, "Schema({})", self.kind),
        }
    }
}
