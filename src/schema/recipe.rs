//! The recipe schema sent to the AI service with every generation request.

use once_cell::sync::Lazy;
use schemars::schema::RootSchema;

use super::builder::SchemaBuilder;
use super::descriptor::TypeDescriptor;
use super::generator::SchemaGenerator;
use super::kind::SchemaType;
use super::node::Schema;
use super::standard::inline_root_schema;
use crate::model::Recipe;
use crate::traits::DescribeSchema;

static DEFAULT_GENERATOR: Lazy<SchemaGenerator> = Lazy::new(SchemaGenerator::default);

/// Top-level fields the model must always return.
pub const REQUIRED_FIELDS: [&str; 4] = ["recipeName", "ingredients", "instructions", "servings"];

const NUTRIENTS: [&str; 6] = ["calories", "protein", "carbohydrates", "fat", "fiber", "sodium"];

/// Entry point for the structured-output schema of [`Recipe`].
///
/// Generation never fails: if the descriptor walk aborts, the hand-written
/// [`fallback`](RecipeSchema::fallback) is returned instead.
pub struct RecipeSchema;

impl RecipeSchema {
    /// Schema from the process-wide generator (default config, shared cache).
    pub fn get() -> Schema {
        Self::generate_with(&DEFAULT_GENERATOR)
    }

    pub fn generate_with(generator: &SchemaGenerator) -> Schema {
        Self::generate_from(generator, Recipe::type_descriptor())
    }

    /// Walks `root` as if it were the recipe type.
    ///
    /// The top-level required list is always [`REQUIRED_FIELDS`], whatever the
    /// walk or the fallback produced.
    pub fn generate_from(generator: &SchemaGenerator, root: &'static TypeDescriptor) -> Schema {
        let schema = generator.generate_or_else(root, Self::fallback);
        SchemaBuilder::from(schema).required(REQUIRED_FIELDS).build()
    }

    /// The static schema used when the walk fails.
    pub fn fallback() -> Schema {
        let string = || SchemaBuilder::string().build();
        let integer = || SchemaBuilder::integer().build();
        let string_list = || SchemaBuilder::array().items(SchemaBuilder::string()).build();

        let nutrients = || {
            NUTRIENTS
                .iter()
                .fold(SchemaBuilder::object(), |node, name| node.property(*name, SchemaBuilder::number()))
        };
        let nutritional_info = SchemaBuilder::object()
            .property("perServing", nutrients())
            .property("total", nutrients());

        let tips = SchemaBuilder::object()
            .property("substitutions", string_list())
            .property("makeAhead", string())
            .property("storage", string())
            .property("reheating", string())
            .property("variations", string_list());

        SchemaBuilder::object()
            .property("id", string())
            .property("userId", string())
            .property("recipeName", string())
            .property("description", string())
            .property("ingredients", string_list())
            .property("instructions", string_list())
            .property("prepTime", string())
            .property("cookTime", string())
            .property("totalTime", string())
            .property("prepTimeMinutes", integer())
            .property("cookTimeMinutes", integer())
            .property("totalTimeMinutes", integer())
            .property("estimatedTimeMinutes", integer())
            .property("servings", integer())
            .property("nutritionalInfo", nutritional_info)
            .property("tips", tips)
            .property("imageUrl", string())
            .property("source", string())
            .property("tags", string_list())
            .property("dietaryRestrictions", string_list())
            .required(REQUIRED_FIELDS)
            .build()
    }

    /// Standard draft-07 JSON Schema of [`Recipe`] for frontend validation.
    pub fn json_schema() -> RootSchema {
        inline_root_schema::<Recipe>()
    }

    /// Kind of a top-level property in the default schema, if present.
    pub fn property_kind(name: &str) -> Option<SchemaType> {
        Self::get().property(name).map(Schema::kind)
    }
}
