//! Structured-output schema generation.
//!
//! [`SchemaBuilder`] assembles [`Schema`] nodes, [`SchemaGenerator`] walks the
//! static descriptor tables of the model types into them, and
//! [`RecipeSchema`] is the entry point the AI service calls.

pub mod builder;
pub mod cache;
pub mod descriptor;
pub mod generator;
pub mod kind;
pub mod node;
pub mod recipe;
pub mod standard;

pub use builder::SchemaBuilder;
pub use cache::{CacheStats, SchemaCache};
pub use descriptor::{FieldDescriptor, FieldKind, NumericKind, TypeDescriptor};
pub use generator::SchemaGenerator;
pub use kind::SchemaType;
pub use node::Schema;
pub use recipe::{REQUIRED_FIELDS, RecipeSchema};
pub use standard::{inline_root_schema, inline_schema_value};
