use indexmap::IndexMap;

use super::kind::SchemaType;
use super::node::Schema;

/// Fluent accumulator for one schema node.
///
/// Each builder owns its state and is consumed by [`build`](Self::build), so
/// two partially built nodes can never share a property map. Children passed to
/// [`items`](Self::items) or [`property`](Self::property) are frozen on entry.
///
/// ```
/// use recipe_shared::schema::SchemaBuilder;
///
/// let tips = SchemaBuilder::object()
///     .property("substitutions", SchemaBuilder::array().items(SchemaBuilder::string()))
///     .property("storage", SchemaBuilder::string())
///     .required(["storage"])
///     .build();
///
/// assert_eq!(tips.property_names(), vec!["substitutions", "storage"]);
/// ```
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    kind: SchemaType,
    description: Option<String>,
    items: Option<Schema>,
    properties: IndexMap<String, Schema>,
    required: Option<Vec<String>>,
}

impl SchemaBuilder {
    pub fn primitive(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            items: None,
            properties: IndexMap::new(),
            required: None,
        }
    }

    pub fn string() -> Self {
        Self::primitive(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::primitive(SchemaType::Number)
    }

    pub fn integer() -> Self {
        Self::primitive(SchemaType::Integer)
    }

    pub fn boolean() -> Self {
        Self::primitive(SchemaType::Boolean)
    }

    pub fn array() -> Self {
        Self::primitive(SchemaType::Array)
    }

    pub fn object() -> Self {
        Self::primitive(SchemaType::Object)
    }

    pub fn kind(&self) -> SchemaType {
        self.kind
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Sets the single element schema of an array node, replacing any previous one.
    pub fn items(mut self, child: impl Into<Schema>) -> Self {
        self.items = Some(child.into());
        self
    }

    /// Appends a property. Re-adding a name replaces its schema but keeps its position.
    pub fn property(mut self, name: impl Into<String>, child: impl Into<Schema>) -> Self {
        self.properties.insert(name.into(), child.into());
        self
    }

    /// Stores the required list exactly as given, independent of property order.
    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            kind: self.kind,
            description: self.description,
            items: self.items.map(Box::new),
            properties: (!self.properties.is_empty()).then_some(self.properties),
            required: self.required,
        }
    }

    /// A primitive node with a description, built in one call.
    pub fn simple_property(kind: SchemaType, description: impl Into<String>) -> Schema {
        Self::primitive(kind).description(description).build()
    }
}

impl From<SchemaBuilder> for Schema {
    fn from(builder: SchemaBuilder) -> Self {
        builder.build()
    }
}

/// Reopens a finished node as a new, independent builder.
impl From<Schema> for SchemaBuilder {
    fn from(schema: Schema) -> Self {
        Self {
            kind: schema.kind,
            description: schema.description,
            items: schema.items.map(|items| *items),
            properties: schema.properties.unwrap_or_default(),
            required: schema.required,
        }
    }
}
