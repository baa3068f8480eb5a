use recipe_shared::prelude::*;
use recipe_shared::schema::{FieldDescriptor, FieldKind, REQUIRED_FIELDS, TypeDescriptor};

static BROKEN_RECIPE: TypeDescriptor = TypeDescriptor {
    type_name: "integration::BrokenRecipe",
    fields: &[
        FieldDescriptor::new("recipeName", FieldKind::Text).required(),
        FieldDescriptor::new("imageGeneration", FieldKind::Map(None)).exclude_from_schema(),
        FieldDescriptor::new("attachment", FieldKind::Unsupported("binary")),
    ],
};

#[test]
fn test_required_properties_and_kinds() {
    let schema = RecipeSchema::get();

    for name in ["nutritionalInfo", "servings", "prepTimeMinutes", "tags"] {
        assert!(schema.property(name).is_some(), "missing property {}", name);
    }
    assert_eq!(schema.property("servings").unwrap().kind(), SchemaType::Integer);
    assert_eq!(schema.property("prepTimeMinutes").unwrap().kind(), SchemaType::Integer);
    assert_eq!(
        schema.at_path("nutritionalInfo.perServing.calories").unwrap().kind(),
        SchemaType::Number
    );
    assert_eq!(schema.property("tags").unwrap().items().unwrap().kind(), SchemaType::String);
    assert_eq!(schema.required(), REQUIRED_FIELDS);
}

#[test]
fn test_serialized_shape() {
    let value = RecipeSchema::get().to_value().unwrap();
    assert_eq!(value["type"], "object");
    assert_eq!(value["properties"]["ingredients"]["type"], "array");
    assert_eq!(value["properties"]["ingredients"]["items"]["type"], "string");
    assert_eq!(value["properties"]["tips"]["properties"]["makeAhead"]["type"], "string");
    assert_eq!(
        value["required"],
        serde_json::json!(["recipeName", "ingredients", "instructions", "servings"])
    );

    let keys: Vec<&String> = value["properties"].as_object().unwrap().keys().collect();
    assert!(keys.iter().all(|k| k.as_str() != "imageGeneration"));
}

#[test]
fn test_image_generation_never_in_schema() {
    let dynamic = RecipeSchema::get();
    assert!(!dynamic.mentions_property("imageGeneration"));
    assert!(!dynamic.to_value().unwrap().to_string().contains("imageGeneration"));

    let fallback = RecipeSchema::fallback();
    assert!(!fallback.mentions_property("imageGeneration"));

    let recovered = RecipeSchema::generate_from(&SchemaGenerator::default(), &BROKEN_RECIPE);
    assert!(!recovered.mentions_property("imageGeneration"));
}

#[test]
fn test_broken_descriptor_falls_back() {
    let generator = SchemaGenerator::default();
    assert!(matches!(
        generator.try_generate(&BROKEN_RECIPE),
        Err(SchemaError::UnsupportedKind { field: "attachment", .. })
    ));

    let schema = RecipeSchema::generate_from(&generator, &BROKEN_RECIPE);
    assert_eq!(schema, RecipeSchema::fallback());
    assert!(schema.property("attachment").is_none());
    assert_eq!(schema.required(), REQUIRED_FIELDS);
}

#[test]
fn test_fallback_property_list() {
    let fallback = RecipeSchema::fallback();
    assert_eq!(
        fallback.property_names(),
        vec![
            "id",
            "userId",
            "recipeName",
            "description",
            "ingredients",
            "instructions",
            "prepTime",
            "cookTime",
            "totalTime",
            "prepTimeMinutes",
            "cookTimeMinutes",
            "totalTimeMinutes",
            "estimatedTimeMinutes",
            "servings",
            "nutritionalInfo",
            "tips",
            "imageUrl",
            "source",
            "tags",
            "dietaryRestrictions",
        ]
    );
    assert_eq!(
        fallback.property("tips").unwrap().property_names(),
        vec!["substitutions", "makeAhead", "storage", "reheating", "variations"]
    );
    for part in ["perServing", "total"] {
        let values = fallback.at_path(&format!("nutritionalInfo.{}", part)).unwrap();
        assert_eq!(
            values.property_names(),
            vec!["calories", "protein", "carbohydrates", "fat", "fiber", "sodium"]
        );
        assert!(values.properties().unwrap().values().all(|v| v.kind() == SchemaType::Number));
    }
}

#[test]
fn test_consecutive_generations_are_identical() {
    let generator = SchemaGenerator::default();
    let first = RecipeSchema::generate_with(&generator);
    let second = RecipeSchema::generate_with(&generator);
    assert_eq!(first, second);
    assert_eq!(first.to_value().unwrap(), second.to_value().unwrap());

    let stats = generator.cache().stats();
    assert!(stats.hits > 0);
    assert_eq!(stats.entries, 3);

    let uncached = SchemaGenerator::new(SchemaConfig::default().with_cache(false));
    assert_eq!(RecipeSchema::generate_with(&uncached), first);
    assert!(uncached.cache().is_empty());
}

#[test]
fn test_concurrent_callers_share_cache() {
    let generator = SchemaGenerator::default();
    let expected = RecipeSchema::generate_with(&SchemaGenerator::default());

    let results: Vec<Schema> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| RecipeSchema::generate_with(&generator)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.iter().all(|schema| *schema == expected));
    assert_eq!(generator.cache().len(), 3);
}

#[test]
fn test_placeholder_name_from_config() {
    let config = SchemaConfig::builder().placeholder_property("entry").build().unwrap();
    let generator = SchemaGenerator::new(config);
    static WITH_MAP: TypeDescriptor = TypeDescriptor {
        type_name: "integration::WithMap",
        fields: &[FieldDescriptor::new("labels", FieldKind::Map(None))],
    };
    let schema = generator.try_generate(&WITH_MAP).unwrap();
    let labels = schema.property("labels").unwrap();
    assert_eq!(labels.kind(), SchemaType::Object);
    assert_eq!(labels.property_names(), vec!["entry"]);
}

#[test]
fn test_json_value_keeps_property_order() {
    let schema = RecipeSchema::get();
    let value = schema.to_value().unwrap();

    let keys: Vec<&str> = value["properties"].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, schema.property_names());
    assert_eq!(&keys[..3], ["id", "userId", "recipeName"]);

    let nutrients: Vec<&str> = value["properties"]["nutritionalInfo"]["properties"]["perServing"]["properties"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(nutrients, ["calories", "protein", "carbohydrates", "fat", "fiber", "sodium"]);

    let fallback = RecipeSchema::fallback();
    let fallback_value = fallback.to_value().unwrap();
    let fallback_keys: Vec<&str> =
        fallback_value["properties"].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(fallback_keys, fallback.property_names());
}
