use std::str::FromStr;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::nutrition::{NUTRITIONAL_INFO_TYPE, NutritionalInfo};
use super::tips::{RECIPE_TIPS_TYPE, RecipeTips};
use crate::builder::{ModelBuilder, Validate};
use crate::inputs::{IntoServings, lenient_servings, read_field};
use crate::schema::descriptor::{FieldDescriptor, FieldKind, TypeDescriptor};
use crate::traits::{DescribeSchema, MapConvertible};
use crate::types::{RecipeError, ValueMap};

/// The canonical recipe shared by the frontend, the AI service and storage.
///
/// Time is carried twice: as whole minutes for arithmetic and as the human
/// readable strings the AI writes ("1 hour 15 minutes"). The two forms are
/// set independently and never derived from one another.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time_minutes: Option<u32>,

    /// Accepts whole numbers and numeric strings; anything else reads as absent.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::inputs::deserialize_lenient_servings"
    )]
    #[schemars(with = "Option<u32>")]
    pub servings: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<RecipeTips>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Free-form metadata from the image generation step (prompt, model, seed).
    /// Never part of the structured-output schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_generation: Option<ValueMap>,
    /// Provenance: `"ai-generated"`, `"user"`, an import URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<Vec<String>>,
    pub is_public: bool,
}

pub static RECIPE_TYPE: TypeDescriptor = TypeDescriptor {
    type_name: concat!(module_path!(), "::Recipe"),
    fields: &[
        FieldDescriptor::new("id", FieldKind::Text),
        FieldDescriptor::new("userId", FieldKind::Text),
        FieldDescriptor::new("recipeName", FieldKind::Text)
            .required()
            .describe("Name of the recipe"),
        FieldDescriptor::new("description", FieldKind::Text).describe("Short summary of the dish"),
        FieldDescriptor::new("ingredients", FieldKind::STRING_LIST)
            .required()
            .describe("Ingredients with quantities, one per entry"),
        FieldDescriptor::new("instructions", FieldKind::STRING_LIST)
            .required()
            .describe("Preparation steps in order"),
        FieldDescriptor::new("prepTime", FieldKind::Text).describe("Human readable preparation time"),
        FieldDescriptor::new("cookTime", FieldKind::Text).describe("Human readable cooking time"),
        FieldDescriptor::new("totalTime", FieldKind::Text).describe("Human readable total time"),
        FieldDescriptor::new("prepTimeMinutes", FieldKind::INT).describe("Preparation time in minutes"),
        FieldDescriptor::new("cookTimeMinutes", FieldKind::INT).describe("Cooking time in minutes"),
        FieldDescriptor::new("totalTimeMinutes", FieldKind::INT).describe("Total time in minutes"),
        FieldDescriptor::new("estimatedTimeMinutes", FieldKind::INT)
            .describe("Estimated time in minutes"),
        FieldDescriptor::new("servings", FieldKind::INT)
            .required()
            .describe("Number of servings"),
        FieldDescriptor::new("nutritionalInfo", FieldKind::Object(&NUTRITIONAL_INFO_TYPE))
            .describe("Estimated nutrition per serving and in total"),
        FieldDescriptor::new("tips", FieldKind::Object(&RECIPE_TIPS_TYPE)).describe("Cooking tips"),
        FieldDescriptor::new("imageUrl", FieldKind::Text),
        FieldDescriptor::new("imageGeneration", FieldKind::Map(None)).exclude_from_schema(),
        FieldDescriptor::new("source", FieldKind::Text),
        FieldDescriptor::new("createdAt", FieldKind::Timestamp),
        FieldDescriptor::new("updatedAt", FieldKind::Timestamp),
        FieldDescriptor::new("tags", FieldKind::STRING_LIST).describe("Free-form tags"),
        FieldDescriptor::new("dietaryRestrictions", FieldKind::STRING_LIST)
            .describe("Diets the recipe satisfies, e.g. vegetarian"),
        FieldDescriptor::new("isPublic", FieldKind::Boolean),
    ],
};

impl Recipe {
    pub fn builder() -> RecipeBuilder {
        RecipeBuilder::default()
    }

    /// Reopens this recipe in a builder, keeping every field.
    pub fn to_builder(&self) -> RecipeBuilder {
        RecipeBuilder { inner: self.clone() }
    }

    /// `totalTimeMinutes` when set, otherwise prep plus cook when both are known.
    pub fn calculated_total_time_minutes(&self) -> Option<u32> {
        if let Some(total) = self.total_time_minutes {
            return Some(total);
        }
        match (self.prep_time_minutes, self.cook_time_minutes) {
            (Some(prep), Some(cook)) => prep.checked_add(cook),
            _ => None,
        }
    }

    pub fn servings_as_int(&self) -> Option<u32> {
        self.servings
    }

    /// Parses a servings count from a number or a numeric string.
    pub fn parse_servings(value: impl IntoServings) -> Result<u32, RecipeError> {
        value.into_servings()
    }

    pub fn to_json(&self) -> Result<String, RecipeError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromStr for Recipe {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

impl MapConvertible for Recipe {
    fn from_map(map: Option<&ValueMap>) -> Option<Self> {
        let map = map?;
        let mut recipe = read_map_fields!(map, Recipe {
            id: "id",
            user_id: "userId",
            recipe_name: "recipeName",
            description: "description",
            ingredients: "ingredients",
            instructions: "instructions",
            prep_time: "prepTime",
            cook_time: "cookTime",
            total_time: "totalTime",
            prep_time_minutes: "prepTimeMinutes",
            cook_time_minutes: "cookTimeMinutes",
            total_time_minutes: "totalTimeMinutes",
            estimated_time_minutes: "estimatedTimeMinutes",
            nutritional_info: "nutritionalInfo",
            tips: "tips",
            image_url: "imageUrl",
            image_generation: "imageGeneration",
            source: "source",
            created_at: "createdAt",
            updated_at: "updatedAt",
            tags: "tags",
            dietary_restrictions: "dietaryRestrictions",
        });

        recipe.servings = map.get("servings").and_then(lenient_servings);
        recipe.is_public = read_field(map, "isPublic").unwrap_or(false);

        Some(recipe)
    }

    fn to_map(&self) -> ValueMap {
        let mut map = ValueMap::new();
        write_map_fields!(map, self => {
            id: "id",
            user_id: "userId",
            recipe_name: "recipeName",
            description: "description",
            ingredients: "ingredients",
            instructions: "instructions",
            prep_time: "prepTime",
            cook_time: "cookTime",
            total_time: "totalTime",
            prep_time_minutes: "prepTimeMinutes",
            cook_time_minutes: "cookTimeMinutes",
            total_time_minutes: "totalTimeMinutes",
            estimated_time_minutes: "estimatedTimeMinutes",
            servings: "servings",
            nutritional_info: "nutritionalInfo",
            tips: "tips",
            image_url: "imageUrl",
            image_generation: "imageGeneration",
            source: "source",
            created_at: "createdAt",
            updated_at: "updatedAt",
            tags: "tags",
            dietary_restrictions: "dietaryRestrictions",
        });
        map.insert("isPublic".to_string(), serde_json::Value::Bool(self.is_public));
        map
    }
}

impl Validate for Recipe {
    fn validate(&self) -> Result<(), RecipeError> {
        if self.recipe_name.as_deref().is_none_or(|name| name.trim().is_empty()) {
            return Err(RecipeError::MissingField("recipeName".to_string()));
        }
        if self.ingredients.as_ref().is_none_or(Vec::is_empty) {
            return Err(RecipeError::MissingField("ingredients".to_string()));
        }
        if self.instructions.as_ref().is_none_or(Vec::is_empty) {
            return Err(RecipeError::MissingField("instructions".to_string()));
        }
        match self.servings {
            None => return Err(RecipeError::MissingField("servings".to_string())),
            Some(0) => return Err(RecipeError::invalid("servings", "must be at least 1")),
            Some(_) => {}
        }
        if let Some(info) = &self.nutritional_info {
            info.validate()?;
        }
        Ok(())
    }
}

impl DescribeSchema for Recipe {
    fn type_descriptor() -> &'static TypeDescriptor {
        &RECIPE_TYPE
    }
}

#[derive(Debug, Default)]
pub struct RecipeBuilder {
    inner: Recipe,
}

impl RecipeBuilder {
    builder_setters! {
        inner;
        value id: String,
        value user_id: String,
        value recipe_name: String,
        value description: String,
        list ingredients,
        list instructions,
        value prep_time: String,
        value cook_time: String,
        value total_time: String,
        value prep_time_minutes: u32,
        value cook_time_minutes: u32,
        value total_time_minutes: u32,
        value estimated_time_minutes: u32,
        value servings: u32,
        value nutritional_info: NutritionalInfo,
        value tips: RecipeTips,
        value image_url: String,
        value image_generation: ValueMap,
        value source: String,
        value created_at: DateTime<Utc>,
        value updated_at: DateTime<Utc>,
        list tags,
        list dietary_restrictions,
    }

    pub fn is_public(mut self, is_public: bool) -> Self {
        self.inner.is_public = is_public;
        self
    }
}

impl ModelBuilder<Recipe> for RecipeBuilder {
    fn build(self) -> Recipe {
        self.inner
    }
}
