//! Prelude module for recipe-shared
//!
//! This module re-exports commonly used structs, traits, and types to allow
//! for easier usage of the library.
//!
//! # Usage
//!
//! ```rust
//! use recipe_shared::prelude::*;
//!
//! let recipe = Recipe::builder().recipe_name("Soup").servings(4u32).build();
//! assert_eq!(recipe.to_map()["servings"], 4);
//! ```

// Core exports
pub use crate::builder::{ModelBuilder, Validate};
pub use crate::config::SchemaConfig;
pub use crate::traits::{DescribeSchema, MapConvertible};
pub use crate::types::{RecipeError, SchemaError, ValueMap};

// Model types
pub use crate::model::{
    NutritionValues, NutritionValuesBuilder, NutritionalInfo, NutritionalInfoBuilder, Recipe,
    RecipeBuilder, RecipeTips, RecipeTipsBuilder,
};

// Schema generation
pub use crate::inputs::IntoServings;
pub use crate::schema::{
    CacheStats, RecipeSchema, Schema, SchemaBuilder, SchemaCache, SchemaGenerator, SchemaType,
};
