//! Generates schema files for the services that consume the recipe model.
//!
//! Writes the structured-output schema sent to the AI service and the
//! standard JSON Schema of each model type to the `schemas/` directory.
//!
//! Run with: `cargo run --example dump_schema`
//! Set `RECIPE_SCHEMA_INCLUDE_DESCRIPTIONS=1` to emit field descriptions.

use std::fs;

use recipe_shared::model::{NutritionValues, NutritionalInfo, RecipeTips};
use recipe_shared::schema::inline_root_schema;
use recipe_shared::{RecipeSchema, SchemaConfig, SchemaGenerator};

fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let config = SchemaConfig::from_env().expect("Invalid RECIPE_SCHEMA_* environment");

    // Create schemas directory
    fs::create_dir_all("schemas").expect("Failed to create schemas directory");

    println!("Generating schemas...");

    // Structured-output schema for the AI service
    let generator = SchemaGenerator::new(config);
    let recipe_schema = RecipeSchema::generate_with(&generator);
    write_json("recipe_gemini", &recipe_schema);

    // Standard JSON Schema for frontend validation
    write_json("recipe", &RecipeSchema::json_schema());
    write_json("nutritional_info", &inline_root_schema::<NutritionalInfo>());
    write_json("nutrition_values", &inline_root_schema::<NutritionValues>());
    write_json("recipe_tips", &inline_root_schema::<RecipeTips>());

    let stats = generator.cache().stats();
    println!("\n✓ All schemas generated successfully!");
    println!("  Output directory: schemas/");
    println!("  Cached nested types: {}", stats.entries);
}

fn write_json<T: serde::Serialize>(name: &str, value: &T) {
    let json = serde_json::to_string_pretty(value).expect("Failed to serialize schema");
    let path = format!("schemas/{}.json", name);
    fs::write(&path, json).expect("Failed to write schema file");
    println!("  ✓ {}", path);
}
