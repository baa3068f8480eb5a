//! Static field-descriptor tables.
//!
//! Each model type declares one [`TypeDescriptor`] listing its fields in
//! declaration order. The schema generator walks these tables instead of
//! inspecting values at runtime, so the description of a type is fixed at
//! compile time and shared by every caller.

/// Numeric field widths. Integral kinds map to `integer`, the rest to `number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl NumericKind {
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            NumericKind::Byte | NumericKind::Short | NumericKind::Int | NumericKind::Long
        )
    }
}

/// The declared value kind of one field.
#[derive(Clone, Copy)]
pub enum FieldKind {
    Text,
    Boolean,
    Numeric(NumericKind),
    /// RFC 3339 instant; described as a string.
    Timestamp,
    /// Homogeneous ordered collection. `None` when the element kind is unknown.
    List(Option<&'static FieldKind>),
    /// String-keyed map. `None` when the value kind is unknown.
    Map(Option<&'static FieldKind>),
    /// Nested structured type.
    Object(&'static TypeDescriptor),
    /// A kind the structured-output format has no representation for.
    Unsupported(&'static str),
}

impl FieldKind {
    pub const STRING_LIST: FieldKind = FieldKind::List(Some(&FieldKind::Text));
    pub const INT: FieldKind = FieldKind::Numeric(NumericKind::Int);
    pub const DOUBLE: FieldKind = FieldKind::Numeric(NumericKind::Double);

    pub fn is_structured(&self) -> bool {
        matches!(self, FieldKind::Object(_))
    }

    /// Short label used in errors and logs.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Boolean => "boolean",
            FieldKind::Numeric(n) if n.is_integral() => "integral",
            FieldKind::Numeric(_) => "floating",
            FieldKind::Timestamp => "timestamp",
            FieldKind::List(_) => "list",
            FieldKind::Map(_) => "map",
            FieldKind::Object(_) => "object",
            FieldKind::Unsupported(name) => *name,
        }
    }
}

// Nested descriptors are printed by name only; a full dump would recurse
// through every reachable type.
impl std::fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Numeric(n) => f.debug_tuple("Numeric").field(n).finish(),
            FieldKind::List(elem) => f.debug_tuple("List").field(elem).finish(),
            FieldKind::Map(value) => f.debug_tuple("Map").field(value).finish(),
            FieldKind::Object(ty) => f.debug_tuple("Object").field(&ty.type_name).finish(),
            FieldKind::Unsupported(name) => f.debug_tuple("Unsupported").field(name).finish(),
            other => f.write_str(other.label()),
        }
    }
}

/// One row of a type's descriptor table.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Serialized (camelCase) field name.
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Skip this field entirely when generating schemas.
    pub exclude_from_schema: bool,
    pub description: Option<&'static str>,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            exclude_from_schema: false,
            description: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn exclude_from_schema(mut self) -> Self {
        self.exclude_from_schema = true;
        self
    }

    pub const fn describe(mut self, text: &'static str) -> Self {
        self.description = Some(text);
        self
    }
}

/// The descriptor table of one structured type.
#[derive(Debug)]
pub struct TypeDescriptor {
    /// Fully qualified type name; used as the memoization key.
    pub type_name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl TypeDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of fields marked required, in declaration order.
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields.iter().filter(|f| f.required).map(|f| f.name).collect()
    }

    /// The last path segment of [`type_name`](Self::type_name).
    pub fn short_name(&self) -> &'static str {
        self.type_name.rsplit("::").next().unwrap_or(self.type_name)
    }
}
