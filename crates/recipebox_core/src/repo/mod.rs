//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for recipes.
//! - Isolate SQLite query details from record lifecycle and services.
//!
//! # Invariants
//! - Repository writes must enforce `RecipeRecord::validate()` before SQL.
//! - Integrity violations surface as `RepoError::IntegrityViolation` so the
//!   create path can recover from them.

pub mod lifecycle;
pub mod recipe_repo;
