use crate::types::RecipeError;

/// Checks a value for logical consistency.
///
/// Validation is opt-in: builders, deserialization and map conversion never
/// call it on their own.
pub trait Validate {
    fn validate(&self) -> Result<(), RecipeError>;
}

/// Trait for the fluent builders of the model types.
///
/// This creates a unified interface for object creation across the crate.
pub trait ModelBuilder<T> {
    /// Builds the value without any checks.
    fn build(self) -> T;

    /// Builds the value and runs its [`Validate`] impl.
    fn try_build(self) -> Result<T, RecipeError>
    where
        Self: Sized,
        T: Validate,
    {
        let value = self.build();
        value.validate()?;
        Ok(value)
    }
}
