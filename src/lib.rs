#[macro_use]
mod macros;

pub mod builder;
pub mod config;
pub mod inputs;
pub mod model;
pub mod prelude;
pub mod schema;
pub mod traits;
pub mod types;

pub use builder::{ModelBuilder, Validate};
pub use config::SchemaConfig;
pub use model::{NutritionValues, NutritionalInfo, Recipe, RecipeTips};
pub use schema::{RecipeSchema, Schema, SchemaBuilder, SchemaGenerator, SchemaType};
pub use traits::{DescribeSchema, MapConvertible};
pub use types::{RecipeError, SchemaError, ValueMap};
