use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::builder::SchemaBuilder;
use super::cache::SchemaCache;
use super::descriptor::{FieldDescriptor, FieldKind, TypeDescriptor};
use super::node::Schema;
use crate::config::SchemaConfig;
use crate::traits::DescribeSchema;
use crate::types::SchemaError;

/// Walks descriptor tables into structured-output schemas.
///
/// Cloning a generator shares its cache. Nested object schemas are memoized
/// by type name, so a cache must only be shared between generators with the
/// same [`SchemaConfig`]; cloning guarantees that.
#[derive(Debug, Clone)]
pub struct SchemaGenerator {
    config: Arc<SchemaConfig>,
    cache: Arc<SchemaCache>,
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self::new(SchemaConfig::default())
    }
}

impl SchemaGenerator {
    pub fn new(config: SchemaConfig) -> Self {
        Self {
            config: Arc::new(config),
            cache: Arc::new(SchemaCache::new()),
        }
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    pub fn cache(&self) -> &SchemaCache {
        &self.cache
    }

    /// Schema for a type implementing [`DescribeSchema`].
    pub fn schema_for<T: DescribeSchema>(&self) -> Result<Schema, SchemaError> {
        self.try_generate(T::type_descriptor())
    }

    /// Walks `root` into an object schema.
    ///
    /// Any problem anywhere in the tree aborts the whole walk. The root itself
    /// is never cached; nested types are.
    pub fn try_generate(&self, root: &'static TypeDescriptor) -> Result<Schema, SchemaError> {
        let mut path = Vec::new();
        self.walk_object(root, &mut path).map(SchemaBuilder::build)
    }

    /// Like [`try_generate`](Self::try_generate), substituting `fallback()` on failure.
    pub fn generate_or_else<F>(&self, root: &'static TypeDescriptor, fallback: F) -> Schema
    where
        F: FnOnce() -> Schema,
    {
        match self.try_generate(root) {
            Ok(schema) => schema,
            Err(e) => {
                warn!(type_name = root.type_name, error = %e, "schema walk failed; using fallback schema");
                fallback()
            }
        }
    }

    fn walk_object(
        &self,
        ty: &'static TypeDescriptor,
        path: &mut Vec<&'static str>,
    ) -> Result<SchemaBuilder, SchemaError> {
        if path.contains(&ty.type_name) {
            return Err(SchemaError::Cycle { type_name: ty.type_name });
        }
        path.push(ty.type_name);

        let mut seen = HashSet::new();
        let mut node = SchemaBuilder::object();
        let mut required = Vec::new();

        for field in ty.fields {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName { type_name: ty.type_name });
            }
            if !seen.insert(field.name) {
                return Err(SchemaError::DuplicateField {
                    type_name: ty.type_name,
                    field: field.name,
                });
            }
            if field.exclude_from_schema {
                trace!(type_name = ty.type_name, field = field.name, "field excluded from schema");
                continue;
            }

            let mut child = self.translate(ty, field, &field.kind, path)?;
            if self.config.include_descriptions {
                if let Some(text) = field.description {
                    child = child.description(text);
                }
            }
            node = node.property(field.name, child);

            if field.required {
                required.push(field.name);
            }
        }

        if !required.is_empty() {
            node = node.required(required);
        }

        path.pop();
        Ok(node)
    }

    fn translate(
        &self,
        owner: &'static TypeDescriptor,
        field: &FieldDescriptor,
        kind: &FieldKind,
        path: &mut Vec<&'static str>,
    ) -> Result<SchemaBuilder, SchemaError> {
        let node = match kind {
            FieldKind::Text | FieldKind::Timestamp => SchemaBuilder::string(),
            FieldKind::Boolean => SchemaBuilder::boolean(),
            FieldKind::Numeric(n) if n.is_integral() => SchemaBuilder::integer(),
            FieldKind::Numeric(_) => SchemaBuilder::number(),
            FieldKind::List(element) => {
                let items = match element {
                    Some(element) => self.translate(owner, field, element, path)?,
                    None => SchemaBuilder::string(),
                };
                SchemaBuilder::array().items(items)
            }
            FieldKind::Map(value) => {
                // Empty objects are rejected by the consumer, so maps always
                // carry one synthetic property.
                let placeholder = match value {
                    Some(value @ FieldKind::Object(_)) => self.translate(owner, field, value, path)?,
                    _ => SchemaBuilder::string(),
                };
                SchemaBuilder::object().property(self.config.placeholder_property.as_str(), placeholder)
            }
            FieldKind::Object(nested) => SchemaBuilder::from(self.nested(nested, path)?),
            FieldKind::Unsupported(name) => {
                return Err(SchemaError::UnsupportedKind {
                    type_name: owner.type_name,
                    field: field.name,
                    kind: *name,
                });
            }
        };
        Ok(node)
    }

    fn nested(
        &self,
        ty: &'static TypeDescriptor,
        path: &mut Vec<&'static str>,
    ) -> Result<Schema, SchemaError> {
        if self.config.use_cache {
            if let Some(hit) = self.cache.get(ty.type_name) {
                trace!(type_name = ty.type_name, "schema cache hit");
                return Ok(hit);
            }
        }

        let schema = self.walk_object(ty, path)?.build();
        if self.config.use_cache {
            debug!(type_name = ty.type_name, "caching nested schema");
            self.cache.insert(ty.type_name, schema.clone());
        }
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaType;
    use crate::schema::descriptor::NumericKind;
    use serde_json::json;

    static LEAF: TypeDescriptor = TypeDescriptor {
        type_name: "tests::Leaf",
        fields: &[
            FieldDescriptor::new("weight", FieldKind::DOUBLE).describe("grams"),
            FieldDescriptor::new("count", FieldKind::Numeric(NumericKind::Long)),
        ],
    };

    static LEAF_KIND: FieldKind = FieldKind::Object(&LEAF);

    static BRANCH: TypeDescriptor = TypeDescriptor {
        type_name: "tests::Branch",
        fields: &[
            FieldDescriptor::new("name", FieldKind::Text).required(),
            FieldDescriptor::new("first", FieldKind::Object(&LEAF)),
            FieldDescriptor::new("second", FieldKind::Object(&LEAF)),
            FieldDescriptor::new("leaves", FieldKind::List(Some(&LEAF_KIND))),
            FieldDescriptor::new("untyped", FieldKind::List(None)),
            FieldDescriptor::new("labels", FieldKind::Map(Some(&FieldKind::Text))),
            FieldDescriptor::new("byName", FieldKind::Map(Some(&LEAF_KIND))),
            FieldDescriptor::new("secret", FieldKind::Map(None)).exclude_from_schema(),
            FieldDescriptor::new("active", FieldKind::Boolean).required(),
        ],
    };

    static OPAQUE: TypeDescriptor = TypeDescriptor {
        type_name: "tests::Opaque",
        fields: &[
            FieldDescriptor::new("ok", FieldKind::Text),
            FieldDescriptor::new("blob", FieldKind::Unsupported("byte-buffer")),
        ],
    };

    static HAS_OPAQUE_CHILD: TypeDescriptor = TypeDescriptor {
        type_name: "tests::HasOpaqueChild",
        fields: &[FieldDescriptor::new("child", FieldKind::Object(&OPAQUE))],
    };

    static DUPLICATE: TypeDescriptor = TypeDescriptor {
        type_name: "tests::Duplicate",
        fields: &[
            FieldDescriptor::new("a", FieldKind::Text),
            FieldDescriptor::new("a", FieldKind::Boolean),
        ],
    };

    static SELF_REF: TypeDescriptor = TypeDescriptor {
        type_name: "tests::SelfRef",
        fields: &[FieldDescriptor::new("next", FieldKind::Object(&SELF_REF))],
    };

    #[test]
    fn test_walks_kinds_in_declaration_order() {
        let schema = SchemaGenerator::default().try_generate(&BRANCH).unwrap();

        assert_eq!(
            schema.property_names(),
            vec!["name", "first", "second", "leaves", "untyped", "labels", "byName", "active"]
        );
        assert_eq!(schema.required(), ["name", "active"]);
        assert_eq!(schema.at_path("first.weight").unwrap().kind(), SchemaType::Number);
        assert_eq!(schema.at_path("first.count").unwrap().kind(), SchemaType::Integer);
        assert_eq!(schema.property("active").unwrap().kind(), SchemaType::Boolean);

        let leaves = schema.property("leaves").unwrap();
        assert_eq!(leaves.kind(), SchemaType::Array);
        assert_eq!(leaves.items().unwrap().kind(), SchemaType::Object);
    }

    #[test]
    fn test_unknown_list_element_defaults_to_string() {
        let schema = SchemaGenerator::default().try_generate(&BRANCH).unwrap();
        assert_eq!(
            schema.property("untyped").unwrap().to_value().unwrap(),
            json!({ "type": "array", "items": { "type": "string" } })
        );
    }

    #[test]
    fn test_maps_get_placeholder_property() {
        let schema = SchemaGenerator::default().try_generate(&BRANCH).unwrap();
        assert_eq!(
            schema.property("labels").unwrap().to_value().unwrap(),
            json!({ "type": "object", "properties": { "value": { "type": "string" } } })
        );
        assert_eq!(
            schema.at_path("byName.value.weight").unwrap().kind(),
            SchemaType::Number
        );
    }

    #[test]
    fn test_excluded_field_never_emitted() {
        let schema = SchemaGenerator::default().try_generate(&BRANCH).unwrap();
        assert!(!schema.mentions_property("secret"));
    }

    #[test]
    fn test_nested_types_are_memoized() {
        let generator = SchemaGenerator::default();
        let schema = generator.try_generate(&BRANCH).unwrap();

        // Walked once for "first"; every later Leaf reference is a hit.
        let stats = generator.cache().stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 3);
        assert!(generator.cache().contains("tests::Leaf"));
        assert_eq!(schema.property("first"), schema.property("second"));

        let again = generator.try_generate(&BRANCH).unwrap();
        assert_eq!(schema, again);
        assert_eq!(generator.cache().stats().hits, 7);
    }

    #[test]
    fn test_cache_can_be_disabled() {
        let generator = SchemaGenerator::new(SchemaConfig::default().with_cache(false));
        let cached = SchemaGenerator::default().try_generate(&BRANCH).unwrap();
        let uncached = generator.try_generate(&BRANCH).unwrap();
        assert!(generator.cache().is_empty());
        assert_eq!(cached, uncached);
    }

    #[test]
    fn test_descriptions_follow_config() {
        let plain = SchemaGenerator::default().try_generate(&BRANCH).unwrap();
        assert_eq!(plain.at_path("first.weight").unwrap().description(), None);

        let described = SchemaGenerator::new(SchemaConfig::default().with_descriptions(true))
            .try_generate(&BRANCH)
            .unwrap();
        assert_eq!(described.at_path("first.weight").unwrap().description(), Some("grams"));
    }

    #[test]
    fn test_unsupported_kind_fails_whole_walk() {
        let generator = SchemaGenerator::default();
        let err = generator.try_generate(&HAS_OPAQUE_CHILD).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnsupportedKind {
                type_name: "tests::Opaque",
                field: "blob",
                kind: "byte-buffer",
            }
        );
        // A failed nested walk leaves nothing behind.
        assert!(!generator.cache().contains("tests::Opaque"));
    }

    #[test]
    fn test_duplicate_and_cycle_are_errors() {
        let generator = SchemaGenerator::default();
        assert!(matches!(
            generator.try_generate(&DUPLICATE),
            Err(SchemaError::DuplicateField { field: "a", .. })
        ));
        assert!(matches!(
            generator.try_generate(&SELF_REF),
            Err(SchemaError::Cycle { type_name: "tests::SelfRef" })
        ));
    }

    #[test]
    fn test_generate_or_else_uses_fallback() {
        let fallback = || SchemaBuilder::object().property("fallback", SchemaBuilder::string()).build();
        let schema = SchemaGenerator::default().generate_or_else(&SELF_REF, fallback);
        assert_eq!(schema.property_names(), vec!["fallback"]);
    }
}
