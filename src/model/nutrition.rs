use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builder::{ModelBuilder, Validate};
use crate::schema::descriptor::{FieldDescriptor, FieldKind, TypeDescriptor};
use crate::traits::{DescribeSchema, MapConvertible};
use crate::types::{RecipeError, ValueMap};

/// Nutritional values for a recipe or a single serving.
///
/// Every field is optional; the AI service fills in what it can estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionValues {
    /// Energy in kcal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Grams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    /// Grams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,
    /// Grams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    /// Grams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    /// Milligrams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
}

pub static NUTRITION_VALUES_TYPE: TypeDescriptor = TypeDescriptor {
    type_name: concat!(module_path!(), "::NutritionValues"),
    fields: &[
        FieldDescriptor::new("calories", FieldKind::DOUBLE).describe("Energy in kilocalories"),
        FieldDescriptor::new("protein", FieldKind::DOUBLE).describe("Protein in grams"),
        FieldDescriptor::new("carbohydrates", FieldKind::DOUBLE).describe("Carbohydrates in grams"),
        FieldDescriptor::new("fat", FieldKind::DOUBLE).describe("Fat in grams"),
        FieldDescriptor::new("fiber", FieldKind::DOUBLE).describe("Dietary fiber in grams"),
        FieldDescriptor::new("sodium", FieldKind::DOUBLE).describe("Sodium in milligrams"),
    ],
};

impl NutritionValues {
    pub fn builder() -> NutritionValuesBuilder {
        NutritionValuesBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn values(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbohydrates", self.carbohydrates),
            ("fat", self.fat),
            ("fiber", self.fiber),
            ("sodium", self.sodium),
        ]
    }
}

impl MapConvertible for NutritionValues {
    fn from_map(map: Option<&ValueMap>) -> Option<Self> {
        let map = map?;
        Some(read_map_fields!(map, NutritionValues {
            calories: "calories",
            protein: "protein",
            carbohydrates: "carbohydrates",
            fat: "fat",
            fiber: "fiber",
            sodium: "sodium",
        }))
    }

    fn to_map(&self) -> ValueMap {
        let mut map = ValueMap::new();
        write_map_fields!(map, self => {
            calories: "calories",
            protein: "protein",
            carbohydrates: "carbohydrates",
            fat: "fat",
            fiber: "fiber",
            sodium: "sodium",
        });
        map
    }
}

impl Validate for NutritionValues {
    fn validate(&self) -> Result<(), RecipeError> {
        for (name, value) in self.values() {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(RecipeError::invalid(name, format!("{} must be a non-negative number", v)));
                }
            }
        }
        Ok(())
    }
}

impl DescribeSchema for NutritionValues {
    fn type_descriptor() -> &'static TypeDescriptor {
        &NUTRITION_VALUES_TYPE
    }
}

#[derive(Debug, Default)]
pub struct NutritionValuesBuilder {
    inner: NutritionValues,
}

impl NutritionValuesBuilder {
    builder_setters! {
        inner;
        value calories: f64,
        value protein: f64,
        value carbohydrates: f64,
        value fat: f64,
        value fiber: f64,
        value sodium: f64,
    }
}

impl ModelBuilder<NutritionValues> for NutritionValuesBuilder {
    fn build(self) -> NutritionValues {
        self.inner
    }
}

/// Nutritional information for a recipe: per-serving and whole-recipe totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_serving: Option<NutritionValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<NutritionValues>,
}

pub static NUTRITIONAL_INFO_TYPE: TypeDescriptor = TypeDescriptor {
    type_name: concat!(module_path!(), "::NutritionalInfo"),
    fields: &[
        FieldDescriptor::new("perServing", FieldKind::Object(&NUTRITION_VALUES_TYPE))
            .describe("Values for one serving"),
        FieldDescriptor::new("total", FieldKind::Object(&NUTRITION_VALUES_TYPE))
            .describe("Values for the whole recipe"),
    ],
};

impl NutritionalInfo {
    pub fn builder() -> NutritionalInfoBuilder {
        NutritionalInfoBuilder::default()
    }
}

impl_nested_map_value!(NutritionValues, NutritionalInfo);

impl MapConvertible for NutritionalInfo {
    fn from_map(map: Option<&ValueMap>) -> Option<Self> {
        let map = map?;
        Some(read_map_fields!(map, NutritionalInfo {
            per_serving: "perServing",
            total: "total",
        }))
    }

    fn to_map(&self) -> ValueMap {
        let mut map = ValueMap::new();
        write_map_fields!(map, self => {
            per_serving: "perServing",
            total: "total",
        });
        map
    }
}

impl Validate for NutritionalInfo {
    fn validate(&self) -> Result<(), RecipeError> {
        if let Some(values) = &self.per_serving {
            values.validate()?;
        }
        if let Some(values) = &self.total {
            values.validate()?;
        }
        Ok(())
    }
}

impl DescribeSchema for NutritionalInfo {
    fn type_descriptor() -> &'static TypeDescriptor {
        &NUTRITIONAL_INFO_TYPE
    }
}

#[derive(Debug, Default)]
pub struct NutritionalInfoBuilder {
    inner: NutritionalInfo,
}

impl NutritionalInfoBuilder {
    builder_setters! {
        inner;
        value per_serving: NutritionValues,
        value total: NutritionValues,
    }
}

impl ModelBuilder<NutritionalInfo> for NutritionalInfoBuilder {
    fn build(self) -> NutritionalInfo {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn map(value: Value) -> ValueMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_json_serialization() {
        let values = NutritionValues::builder()
            .calories(350.0)
            .protein(25.0)
            .carbohydrates(40.0)
            .fat(12.0)
            .fiber(5.0)
            .sodium(800.0)
            .build();

        let json = serde_json::to_string(&values).unwrap();
        let back: NutritionValues = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
        assert_eq!(back.sodium, Some(800.0));
    }

    #[test]
    fn test_from_map() {
        let m = map(json!({
            "calories": 400,
            "protein": 30.5,
            "carbohydrates": 45.0,
            "fat": 15.0,
            "fiber": 6.0,
            "sodium": 900.0
        }));
        let values = NutritionValues::from_map(Some(&m)).unwrap();
        assert_eq!(values.calories, Some(400.0));
        assert_eq!(values.protein, Some(30.5));
        assert_eq!(values.sodium, Some(900.0));
    }

    #[test]
    fn test_to_map_omits_absent_fields() {
        let values = NutritionValues::builder().calories(200.0).protein(10).build();
        let m = values.to_map();
        assert_eq!(m.get("calories"), Some(&json!(200.0)));
        assert_eq!(m.get("protein"), Some(&json!(10.0)));
        assert!(m.get("carbohydrates").is_none());
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_from_map_non_number_is_absent() {
        let m = map(json!({ "calories": "not-a-number", "fat": true, "fiber": 3 }));
        let values = NutritionValues::from_map(Some(&m)).unwrap();
        assert_eq!(values.calories, None);
        assert_eq!(values.fat, None);
        assert_eq!(values.fiber, Some(3.0));
    }

    #[test]
    fn test_from_map_null_input() {
        assert_eq!(NutritionValues::from_map(None), None);
        assert_eq!(NutritionalInfo::from_map(None), None);
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        assert!(NutritionValues::builder().fat(-1.0).build().validate().is_err());
        assert!(NutritionValues::builder().fat(f64::NAN).build().validate().is_err());
        assert!(NutritionValues::builder().fat(0.0).try_build().is_ok());
    }

    #[test]
    fn test_nutritional_info_map_round_trip() {
        let info = NutritionalInfo::builder()
            .per_serving(NutritionValues::builder().calories(250).build())
            .total(NutritionValues::builder().calories(1000).sodium(1200.5).build())
            .build();

        let m = info.to_map();
        assert_eq!(m["perServing"], json!({ "calories": 250.0 }));
        assert_eq!(NutritionalInfo::from_map(Some(&m)), Some(info));
    }

    #[test]
    fn test_nutritional_info_tolerates_wrong_shapes() {
        let m = map(json!({ "perServing": "lots", "total": null }));
        let info = NutritionalInfo::from_map(Some(&m)).unwrap();
        assert_eq!(info, NutritionalInfo::default());
        assert!(info.to_map().is_empty());
    }

    #[test]
    fn test_descriptor_matches_serialized_fields() {
        let full = NutritionValues::builder()
            .calories(1).protein(1).carbohydrates(1).fat(1).fiber(1).sodium(1)
            .build();
        let json = serde_json::to_value(full).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        let mut declared: Vec<&str> = NUTRITION_VALUES_TYPE.fields.iter().map(|f| f.name).collect();
        keys.sort_unstable();
        declared.sort_unstable();
        assert_eq!(keys, declared);
    }
}
