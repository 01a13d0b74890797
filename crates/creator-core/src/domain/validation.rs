use crate::domain::{error::DomainError, patch::FilePatch, recipe::ProjectRecipe};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_recipe(recipe: &ProjectRecipe) -> Result<(), DomainError> {
        recipe.validate()
    }

    pub fn validate_patch(patch: &FilePatch) -> Result<(), DomainError> {
        if patch.edits().iter().any(|e| e.anchor() == Some("")) {
            return Err(DomainError::EmptyAnchor {
                file: patch.path().to_string(),
            });
        }
        Ok(())
    }
}
