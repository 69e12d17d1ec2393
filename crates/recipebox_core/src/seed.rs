//! Fixed test/demo dataset for the recipe store.
//!
//! # Responsibility
//! - Reset storage and populate the twelve built-in recipes.
//! - Tolerate per-record conflicts instead of failing the whole batch.
//!
//! # Invariants
//! - Records are created in table order; ids follow that order on a fresh
//!   schema.
//! - Seeding is not atomic as a batch.

use crate::db::reset_schema;
use crate::model::recipe::{RecipeId, RecipeRecord};
use crate::repo::recipe_repo::{RecipeRepository, RepoResult, SqliteRecipeRepository};
use log::{info, warn};
use rusqlite::Connection;

pub const SEED_LINK: &str = "https://californiaavocado.com/recipes";

pub const BREAKFAST: &str = "Breakfast";
pub const LUNCH: &str = "Lunch";
pub const DINNER: &str = "Dinner";
pub const DESSERT: &str = "Dessert";

/// `(name, category, calories)` for every seeded recipe.
pub const SEED_RECIPES: [(&str, &str, i64); 12] = [
    ("Avocado Toast", BREAKFAST, 100),
    ("Scrambled Eggs", BREAKFAST, 100),
    ("Pancake", BREAKFAST, 100),
    ("Mac and Cheese", LUNCH, 2000),
    ("Panini Sandwich", LUNCH, 2000),
    ("Salad", LUNCH, 2000),
    ("Minestrone Soup", DINNER, 3000),
    ("Lasagna", DINNER, 3000),
    ("Pasta", DINNER, 3000),
    ("Brownies", DESSERT, 400),
    ("Chocolate Chip Cookies", DESSERT, 400),
    ("Custard Pudding", DESSERT, 400),
];

/// Outcome of one seeding pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Ids assigned to created records, in creation order.
    pub created: Vec<RecipeId>,
    /// Names of records rejected by an integrity violation.
    pub conflicts: Vec<String>,
}

/// Builds the transient seed records.
pub fn seed_records() -> RepoResult<Vec<RecipeRecord>> {
    SEED_RECIPES
        .iter()
        .map(|&(name, category, calories)| {
            RecipeRecord::new(name, SEED_LINK, category, calories).map_err(Into::into)
        })
        .collect()
}

/// Drops and recreates the schema, then creates the built-in recipes.
pub fn init_recipes(conn: &mut Connection) -> RepoResult<SeedReport> {
    reset_schema(conn)?;
    let repo = SqliteRecipeRepository::try_new(conn)?;
    populate(&repo, seed_records()?)
}

/// Creates each record in order, skipping those rejected as conflicts.
///
/// Non-integrity failures abort the pass; records created before the failure
/// stay committed.
pub fn populate<R: RecipeRepository + ?Sized>(
    repo: &R,
    records: Vec<RecipeRecord>,
) -> RepoResult<SeedReport> {
    let mut report = SeedReport::default();

    for mut record in records {
        match record.create(repo)? {
            Some(created) => report.created.extend(created.id()),
            None => {
                warn!(
                    "event=seed_recipes module=seed status=conflict name={}",
                    record.name()
                );
                report.conflicts.push(record.name().to_string());
            }
        }
    }

    info!(
        "event=seed_recipes module=seed status=ok created={} conflicts={}",
        report.created.len(),
        report.conflicts.len()
    );
    Ok(report)
}
