use crate::schema::descriptor::TypeDescriptor;
use crate::types::ValueMap;

/// Conversion to and from the storage service's untyped map format.
///
/// Implementations never fail: wrong-typed entries become absent fields.
pub trait MapConvertible: Sized {
    /// Builds the value from a map. `None` in, `None` out.
    fn from_map(map: Option<&ValueMap>) -> Option<Self>;

    /// Converts to a map, omitting absent fields.
    fn to_map(&self) -> ValueMap;
}

/// Types that publish a static field-descriptor table for schema generation.
pub trait DescribeSchema {
    fn type_descriptor() -> &'static TypeDescriptor;
}
