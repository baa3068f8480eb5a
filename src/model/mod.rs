//! The recipe data model shared across services.

pub mod nutrition;
pub mod recipe;
pub mod tips;

pub use nutrition::{NutritionValues, NutritionValuesBuilder, NutritionalInfo, NutritionalInfoBuilder};
pub use recipe::{Recipe, RecipeBuilder};
pub use tips::{RecipeTips, RecipeTipsBuilder};
