//! Built-in project recipes.

pub mod django;

pub use django::{RecipeSettings, SUPPORTED_DJANGO, django_recipe};
