//! Declarative macros for the boilerplate shared by the model types.
//!
//! Every DTO is a bag of optional fields that must be settable from a
//! builder and copyable to and from a [`ValueMap`](crate::types::ValueMap).
//! These macros generate that field-by-field code from a single list so the
//! key names cannot drift between the read and write sides.

/// Generates builder setters that write into `self.$target`.
///
/// * `value name: Type` produces `fn name(self, impl Into<Type>)` storing `Some(..)`.
/// * `list name` produces `fn name(self, impl IntoIterator<Item = impl Into<String>>)`.
///
/// ```rust,ignore
/// impl RecipeTipsBuilder {
///     builder_setters! {
///         inner;
///         list substitutions,
///         value make_ahead: String,
///     }
/// }
/// ```
macro_rules! builder_setters {
    ($target:ident; $($kind:ident $field:ident $(: $ty:ty)?),* $(,)?) => {
        $( builder_setters!(@setter $target $kind $field $(: $ty)?); )*
    };
    (@setter $target:ident value $field:ident : $ty:ty) => {
        pub fn $field(mut self, value: impl Into<$ty>) -> Self {
            self.$target.$field = Some(value.into());
            self
        }
    };
    (@setter $target:ident list $field:ident) => {
        pub fn $field<I, S>(mut self, values: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.$target.$field = Some(values.into_iter().map(Into::into).collect());
            self
        }
    };
}

/// Builds `$ty` by reading each listed optional field from a map with
/// [`read_field`](crate::inputs::read_field). Unlisted fields take their default.
macro_rules! read_map_fields {
    ($map:expr, $ty:ident { $($field:ident : $key:literal),* $(,)? }) => {
        $ty {
            $( $field: $crate::inputs::read_field($map, $key), )*
            ..Default::default()
        }
    };
}

/// Writes each listed optional field of `$source` into `$map`, skipping `None`.
macro_rules! write_map_fields {
    ($map:expr, $source:expr => { $($field:ident : $key:literal),* $(,)? }) => {
        $(
            if let Some(value) = &$source.$field {
                $map.insert(
                    $key.to_string(),
                    $crate::inputs::ToMapValue::to_map_value(value),
                );
            }
        )*
    };
}

/// Lets a nested model type be read from and written to a parent map entry
/// through its [`MapConvertible`](crate::traits::MapConvertible) impl.
macro_rules! impl_nested_map_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::inputs::FromMapValue for $ty {
                fn from_map_value(value: &serde_json::Value) -> Option<Self> {
                    let nested = value.as_object()?;
                    <$ty as $crate::traits::MapConvertible>::from_map(Some(nested))
                }
            }

            impl $crate::inputs::ToMapValue for $ty {
                fn to_map_value(&self) -> serde_json::Value {
                    serde_json::Value::Object(<$ty as $crate::traits::MapConvertible>::to_map(self))
                }
            }
        )*
    };
}
