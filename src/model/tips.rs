use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builder::ModelBuilder;
use crate::schema::descriptor::{FieldDescriptor, FieldKind, TypeDescriptor};
use crate::traits::{DescribeSchema, MapConvertible};
use crate::types::ValueMap;

/// Cooking tips attached to a recipe.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeTips {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitutions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make_ahead: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reheating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<String>>,
}

pub static RECIPE_TIPS_TYPE: TypeDescriptor = TypeDescriptor {
    type_name: concat!(module_path!(), "::RecipeTips"),
    fields: &[
        FieldDescriptor::new("substitutions", FieldKind::STRING_LIST)
            .describe("Ingredient substitutions"),
        FieldDescriptor::new("makeAhead", FieldKind::Text).describe("Make-ahead instructions"),
        FieldDescriptor::new("storage", FieldKind::Text).describe("How to store leftovers"),
        FieldDescriptor::new("reheating", FieldKind::Text).describe("How to reheat"),
        FieldDescriptor::new("variations", FieldKind::STRING_LIST).describe("Recipe variations"),
    ],
};

impl RecipeTips {
    pub fn builder() -> RecipeTipsBuilder {
        RecipeTipsBuilder::default()
    }
}

/// Only the two list fields travel through the map form. The storage
/// documents never carried the free-text notes.
impl MapConvertible for RecipeTips {
    fn from_map(map: Option<&ValueMap>) -> Option<Self> {
        let map = map?;
        Some(read_map_fields!(map, RecipeTips {
            substitutions: "substitutions",
            variations: "variations",
        }))
    }

    fn to_map(&self) -> ValueMap {
        let mut map = ValueMap::new();
        write_map_fields!(map, self => {
            substitutions: "substitutions",
            variations: "variations",
        });
        map
    }
}

impl_nested_map_value!(RecipeTips);

impl DescribeSchema for RecipeTips {
    fn type_descriptor() -> &'static TypeDescriptor {
        &RECIPE_TIPS_TYPE
    }
}

#[derive(Debug, Default)]
pub struct RecipeTipsBuilder {
    inner: RecipeTips,
}

impl RecipeTipsBuilder {
    builder_setters! {
        inner;
        list substitutions,
        value make_ahead: String,
        value storage: String,
        value reheating: String,
        list variations,
    }
}

impl ModelBuilder<RecipeTips> for RecipeTipsBuilder {
    fn build(self) -> RecipeTips {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> RecipeTips {
        RecipeTips::builder()
            .substitutions(["Use butter instead of oil", "Greek yogurt for sour cream"])
            .make_ahead("Prep vegetables the night before")
            .storage("Refrigerate for up to 3 days")
            .reheating("Microwave for 2 minutes")
            .variations(vec!["Add chili flakes".to_string()])
            .build()
    }

    #[test]
    fn test_json_round_trip_keeps_every_field() {
        let tips = sample();
        let json = serde_json::to_value(&tips).unwrap();
        assert_eq!(json["makeAhead"], "Prep vegetables the night before");
        let back: RecipeTips = serde_json::from_value(json).unwrap();
        assert_eq!(back, tips);
    }

    #[test]
    fn test_map_form_keeps_only_lists() {
        let m = sample().to_map();
        assert_eq!(m.len(), 2);
        assert_eq!(
            m["substitutions"],
            json!(["Use butter instead of oil", "Greek yogurt for sour cream"])
        );

        let back = RecipeTips::from_map(Some(&m)).unwrap();
        assert_eq!(back.substitutions, sample().substitutions);
        assert_eq!(back.variations, sample().variations);
        assert_eq!(back.make_ahead, None);
        assert_eq!(back.storage, None);
    }

    #[test]
    fn test_from_map_ignores_malformed_lists() {
        let m = json!({ "substitutions": "just one", "variations": ["a", 2] })
            .as_object()
            .cloned()
            .unwrap();
        assert_eq!(RecipeTips::from_map(Some(&m)), Some(RecipeTips::default()));
        assert_eq!(RecipeTips::from_map(None), None);
    }

    #[test]
    fn test_descriptor_matches_serialized_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        let mut declared: Vec<&str> = RECIPE_TIPS_TYPE.fields.iter().map(|f| f.name).collect();
        keys.sort_unstable();
        declared.sort_unstable();
        assert_eq!(keys, declared);
    }
}
