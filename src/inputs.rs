use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::types::{RecipeError, ValueMap};

/// Lenient extraction of a typed value from an untyped map entry.
///
/// Returns `None` when the value has the wrong shape; callers treat that as an
/// absent field rather than an error.
pub trait FromMapValue: Sized {
    fn from_map_value(value: &Value) -> Option<Self>;
}

/// Conversion of a typed field into its map representation.
pub trait ToMapValue {
    fn to_map_value(&self) -> Value;
}

/// Reads `key` from `map`, logging (at debug level) values that have the wrong shape.
pub fn read_field<T: FromMapValue>(map: &ValueMap, key: &str) -> Option<T> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => {
            let parsed = T::from_map_value(value);
            if parsed.is_none() {
                debug!(key, value = %value, "ignoring map value with unexpected type");
            }
            parsed
        }
    }
}

impl FromMapValue for f64 {
    fn from_map_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromMapValue for u32 {
    fn from_map_value(value: &Value) -> Option<Self> {
        if let Some(n) = value.as_u64() {
            return u32::try_from(n).ok();
        }
        // Some clients write whole numbers as floats (4.0).
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
            .map(|f| f as u32)
    }
}

impl FromMapValue for bool {
    fn from_map_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromMapValue for String {
    fn from_map_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromMapValue for Vec<String> {
    fn from_map_value(value: &Value) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(|item| item.as_str().map(str::to_owned))
            .collect()
    }
}

impl FromMapValue for ValueMap {
    fn from_map_value(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl FromMapValue for DateTime<Utc> {
    fn from_map_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            // Epoch milliseconds, as written by older storage documents.
            Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
            _ => None,
        }
    }
}

impl ToMapValue for f64 {
    fn to_map_value(&self) -> Value {
        Value::from(*self)
    }
}

impl ToMapValue for u32 {
    fn to_map_value(&self) -> Value {
        Value::from(*self)
    }
}

impl ToMapValue for bool {
    fn to_map_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToMapValue for String {
    fn to_map_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToMapValue for Vec<String> {
    fn to_map_value(&self) -> Value {
        Value::Array(self.iter().cloned().map(Value::String).collect())
    }
}

impl ToMapValue for ValueMap {
    fn to_map_value(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl ToMapValue for DateTime<Utc> {
    fn to_map_value(&self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

/// Trait for converting the various shapes a servings count arrives in.
///
/// The frontend sometimes sends servings as a string (`"4"`), the AI service
/// as a number. Both are accepted; anything else is rejected.
pub trait IntoServings {
    fn into_servings(self) -> Result<u32, RecipeError>;
}

macro_rules! impl_into_servings_int {
    ($($t:ty),*) => {
        $(
            impl IntoServings for $t {
                fn into_servings(self) -> Result<u32, RecipeError> {
                    u32::try_from(self).map_err(|_| {
                        RecipeError::invalid("servings", format!("{} is out of range", self))
                    })
                }
            }
        )*
    };
}

impl_into_servings_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl IntoServings for &str {
    fn into_servings(self) -> Result<u32, RecipeError> {
        self.trim()
            .parse::<u32>()
            .map_err(|e| RecipeError::invalid("servings", format!("'{}' is not a count: {}", self, e)))
    }
}

impl IntoServings for String {
    fn into_servings(self) -> Result<u32, RecipeError> {
        self.as_str().into_servings()
    }
}

impl IntoServings for &Value {
    fn into_servings(self) -> Result<u32, RecipeError> {
        match self {
            Value::String(s) => s.as_str().into_servings(),
            Value::Number(_) => u32::from_map_value(self)
                .ok_or_else(|| RecipeError::invalid("servings", format!("{} is not a whole count", self))),
            other => Err(RecipeError::invalid("servings", format!("unexpected value {}", other))),
        }
    }
}

/// Reads a servings count the way both storage and JSON clients send it.
///
/// `null` and unparseable values become `None` (logged at debug level).
pub fn lenient_servings(value: &Value) -> Option<u32> {
    if value.is_null() {
        return None;
    }
    match value.into_servings() {
        Ok(servings) => Some(servings),
        Err(e) => {
            debug!(error = %e, "ignoring unparseable servings");
            None
        }
    }
}

/// Serde adapter for [`lenient_servings`].
pub fn deserialize_lenient_servings<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(lenient_servings))
}
