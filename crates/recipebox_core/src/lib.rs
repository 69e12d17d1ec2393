//! Persisted recipe model: schema, validated record, CRUD lifecycle and
//! seeding for the `recipes` table.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, LogSettings, LoggingError};
pub use model::recipe::{
    RecipeId, RecipeRecord, RecipeUpdate, RecipeValidationError, RecipeView, RecordState,
};
pub use repo::recipe_repo::{
    RecipeListQuery, RecipeRepository, RepoError, RepoResult, SqliteRecipeRepository,
};
pub use seed::{init_recipes, SeedReport};
pub use service::recipe_service::{NewRecipeRequest, RecipeService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
