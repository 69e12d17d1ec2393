//! Record-level CRUD lifecycle for recipes.
//!
//! # Responsibility
//! - Drive a `RecipeRecord` through `Transient -> Persistent -> Removed`.
//! - Recover integrity violations on create as an absent result.
//!
//! # Invariants
//! - A failed create leaves the record transient and unchanged.
//! - `update` writes only the fields named in `RecipeUpdate`; after it
//!   succeeds the record mirrors the stored row.
//! - A record leaves `Persistent` only when its row is actually deleted.

use crate::model::recipe::{RecipeId, RecipeRecord, RecipeUpdate, RecordState};
use crate::repo::recipe_repo::{RecipeRepository, RepoError, RepoResult};
use log::{info, warn};

impl RecipeRecord {
    /// Persists this record as a new row.
    ///
    /// Returns `Ok(Some(self))` with the assigned id on success and `Ok(None)`
    /// when storage rejects the row with an integrity violation (for example
    /// a duplicate explicit id). Every other failure is returned as `Err`.
    ///
    /// # Errors
    /// - `AlreadyPersisted` when called on a persistent record.
    /// - `Removed` when called on a deleted record.
    /// - `Validation` when a field invariant does not hold.
    pub fn create<R: RecipeRepository + ?Sized>(
        &mut self,
        repo: &R,
    ) -> RepoResult<Option<&Self>> {
        let id = self.id().unwrap_or_default();
        match self.state() {
            RecordState::Transient => {}
            RecordState::Persistent => return Err(RepoError::AlreadyPersisted(id)),
            RecordState::Removed => return Err(RepoError::Removed(id)),
        }

        match repo.create_recipe(self) {
            Ok(id) => {
                self.mark_persisted(id);
                info!("event=recipe_create module=repo status=ok id={id}");
                Ok(Some(&*self))
            }
            Err(RepoError::IntegrityViolation(message)) => {
                warn!(
                    "event=recipe_create module=repo status=conflict requested_id={} error={}",
                    self.id().map_or_else(|| "none".to_string(), |id| id.to_string()),
                    message
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Overwrites the supplied text fields of `changes` and commits
    /// immediately, then reloads this record from storage.
    ///
    /// Omitted and blank fields keep their stored value. Calories and any
    /// unsaved setter edits are never written here; the reload discards them.
    /// An update that changes nothing still round-trips to storage so a
    /// vanished row is reported as `NotFound`.
    pub fn update<R: RecipeRepository + ?Sized>(
        &mut self,
        repo: &R,
        changes: &RecipeUpdate,
    ) -> RepoResult<&Self> {
        let id = self.persistent_id()?;

        repo.update_recipe(id, changes)?;
        *self = repo.get_recipe(id)?.ok_or(RepoError::NotFound(id))?;

        info!(
            "event=recipe_update module=repo status=ok id={} fields={}",
            id,
            changes.supplied_fields().join(",")
        );
        Ok(&*self)
    }

    /// Removes the backing row and commits.
    ///
    /// On success the record becomes `Removed`. On failure it keeps its
    /// current state, so the caller can retry.
    ///
    /// # Errors
    /// - `NotPersisted` for a transient record.
    /// - `NotFound` when the row is already gone, including a second delete.
    pub fn delete<R: RecipeRepository + ?Sized>(&mut self, repo: &R) -> RepoResult<()> {
        let id = match (self.state(), self.id()) {
            (RecordState::Removed, Some(id)) => return Err(RepoError::NotFound(id)),
            _ => self.persistent_id()?,
        };

        repo.delete_recipe(id)?;
        self.mark_removed();
        info!("event=recipe_delete module=repo status=ok id={id}");
        Ok(())
    }

    fn persistent_id(&self) -> RepoResult<RecipeId> {
        match (self.state(), self.id()) {
            (RecordState::Persistent, Some(id)) => Ok(id),
            (RecordState::Removed, Some(id)) => Err(RepoError::Removed(id)),
            _ => Err(RepoError::NotPersisted),
        }
    }
}
