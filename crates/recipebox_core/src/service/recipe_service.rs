//! Recipe use-case service.
//!
//! # Responsibility
//! - Provide id-based CRUD entry points for application layers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass record validation or lifecycle rules.
//! - Service layer remains storage-agnostic.

use crate::model::recipe::{RecipeId, RecipeRecord, RecipeUpdate};
use crate::repo::recipe_repo::{RecipeListQuery, RecipeRepository, RepoError, RepoResult};

/// Use-case service wrapper for recipe CRUD operations.
pub struct RecipeService<R: RecipeRepository> {
    repo: R,
}

/// Request model for adding a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipeRequest {
    pub name: String,
    pub link: String,
    pub category: String,
    pub calories: i64,
}

impl<R: RecipeRepository> RecipeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Adds a recipe and returns the persisted record.
    ///
    /// Returns `Ok(None)` when storage rejects the row as a duplicate or
    /// constraint conflict; callers typically answer that with a conflict
    /// response.
    pub fn add_recipe(&self, request: &NewRecipeRequest) -> RepoResult<Option<RecipeRecord>> {
        let mut record = RecipeRecord::new(
            request.name.as_str(),
            request.link.as_str(),
            request.category.as_str(),
            request.calories,
        )?;
        Ok(record.create(&self.repo)?.cloned())
    }

    /// Gets one recipe by id.
    pub fn get_recipe(&self, id: RecipeId) -> RepoResult<Option<RecipeRecord>> {
        self.repo.get_recipe(id)
    }

    /// Lists recipes using filter and pagination options.
    pub fn list_recipes(&self, query: &RecipeListQuery) -> RepoResult<Vec<RecipeRecord>> {
        self.repo.list_recipes(query)
    }

    /// Lists every recipe in one category, in id order.
    pub fn list_by_category(&self, category: &str) -> RepoResult<Vec<RecipeRecord>> {
        self.repo.list_recipes(&RecipeListQuery {
            category: Some(category.to_string()),
            ..RecipeListQuery::default()
        })
    }

    /// Applies a partial text update to the recipe with `id`.
    pub fn update_recipe(&self, id: RecipeId, changes: &RecipeUpdate) -> RepoResult<RecipeRecord> {
        let mut record = self.repo.get_recipe(id)?.ok_or(RepoError::NotFound(id))?;
        record.update(&self.repo, changes)?;
        Ok(record)
    }

    /// Deletes the recipe with `id`.
    ///
    /// Returns `NotFound` when no such recipe exists.
    pub fn delete_recipe(&self, id: RecipeId) -> RepoResult<()> {
        let mut record = self.repo.get_recipe(id)?.ok_or(RepoError::NotFound(id))?;
        record.delete(&self.repo)
    }
}
