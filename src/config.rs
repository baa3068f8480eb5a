use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

use crate::types::RecipeError;

pub const ENV_INCLUDE_DESCRIPTIONS: &str = "RECIPE_SCHEMA_INCLUDE_DESCRIPTIONS";
pub const ENV_USE_CACHE: &str = "RECIPE_SCHEMA_USE_CACHE";
pub const ENV_PLACEHOLDER: &str = "RECIPE_SCHEMA_PLACEHOLDER";

/// Default name of the synthetic property given to map-typed fields.
pub const DEFAULT_PLACEHOLDER_PROPERTY: &str = "value";

/// Settings for schema generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaConfig {
    /// Emit the per-field descriptions from the descriptor tables.
    pub include_descriptions: bool,
    /// Memoize nested object schemas across calls.
    pub use_cache: bool,
    /// Property name used to keep map-typed objects non-empty.
    pub placeholder_property: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        SchemaConfig {
            include_descriptions: false,
            use_cache: true,
            placeholder_property: DEFAULT_PLACEHOLDER_PROPERTY.to_string(),
        }
    }
}

impl std::str::FromStr for SchemaConfig {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: SchemaConfig = serde_json::from_str(s)
            .map_err(|e| RecipeError::Configuration(format!("Failed to parse config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

impl SchemaConfig {
    pub fn builder() -> SchemaConfigBuilder {
        SchemaConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.placeholder_property.trim().is_empty() {
            return Err(RecipeError::Configuration(
                "Placeholder property name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads configuration from `RECIPE_SCHEMA_*` environment variables.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, RecipeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RecipeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SchemaConfig::default();

        if let Some(raw) = lookup(ENV_INCLUDE_DESCRIPTIONS) {
            config.include_descriptions = parse_flag(ENV_INCLUDE_DESCRIPTIONS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_USE_CACHE) {
            config.use_cache = parse_flag(ENV_USE_CACHE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PLACEHOLDER) {
            config.placeholder_property = raw;
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a JSON file.
    pub fn try_from_json(path: &str) -> Result<Self, RecipeError> {
        let content = fs::read_to_string(path)
            .map_err(|e| RecipeError::Configuration(format!("Failed to read config file: {}", e)))?;
        content.parse()
    }

    pub fn with_descriptions(mut self, include: bool) -> Self {
        self.include_descriptions = include;
        self
    }

    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, RecipeError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(RecipeError::Configuration(format!(
            "{} must be a boolean flag, got '{}'",
            key, other
        ))),
    }
}

// ========== SchemaConfigBuilder ==========

#[derive(Default)]
pub struct SchemaConfigBuilder {
    include_descriptions: Option<bool>,
    use_cache: Option<bool>,
    placeholder_property: Option<String>,
}

impl SchemaConfigBuilder {
    pub fn include_descriptions(mut self, include: bool) -> Self {
        self.include_descriptions = Some(include);
        self
    }

    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = Some(use_cache);
        self
    }

    pub fn placeholder_property(mut self, name: impl Into<String>) -> Self {
        self.placeholder_property = Some(name.into());
        self
    }

    pub fn build(self) -> Result<SchemaConfig, RecipeError> {
        let defaults = SchemaConfig::default();
        let config = SchemaConfig {
            include_descriptions: self.include_descriptions.unwrap_or(defaults.include_descriptions),
            use_cache: self.use_cache.unwrap_or(defaults.use_cache),
            placeholder_property: self.placeholder_property.unwrap_or(defaults.placeholder_property),
        };
        config.validate()?;
        Ok(config)
    }
}
