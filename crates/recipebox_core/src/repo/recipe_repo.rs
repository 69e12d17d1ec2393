//! Recipe repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `recipes` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Each write runs in its own transaction; a failed write rolls back only
//!   itself.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::recipe::{RecipeId, RecipeRecord, RecipeUpdate, RecipeValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RECIPE_SELECT_SQL: &str = "SELECT
    id,
    name,
    link,
    category,
    calories
FROM recipes";

const RECIPES_TABLE: &str = "recipes";
const REQUIRED_RECIPE_COLUMNS: &[&str] = &["id", "name", "link", "category", "calories"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for recipe persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecipeValidationError),
    Db(DbError),
    NotFound(RecipeId),
    /// Operation needs a backing row but the record was never created.
    NotPersisted,
    AlreadyPersisted(RecipeId),
    /// The record was already deleted through this handle.
    Removed(RecipeId),
    /// Uniqueness or constraint rejection from storage.
    IntegrityViolation(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "recipe not found: {id}"),
            Self::NotPersisted => write!(f, "recipe has not been created yet"),
            Self::AlreadyPersisted(id) => write!(f, "recipe {id} is already persisted"),
            Self::Removed(id) => write!(f, "recipe {id} was deleted"),
            Self::IntegrityViolation(message) => write!(f, "integrity violation: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted recipe data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RecipeValidationError> for RepoError {
    fn from(value: RecipeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeListQuery {
    /// Exact category match.
    pub category: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for recipe CRUD operations.
pub trait RecipeRepository {
    /// Inserts the record as a new row and returns the assigned id.
    fn create_recipe(&self, record: &RecipeRecord) -> RepoResult<RecipeId>;
    fn get_recipe(&self, id: RecipeId) -> RepoResult<Option<RecipeRecord>>;
    /// Lists recipes ordered by ascending id.
    fn list_recipes(&self, query: &RecipeListQuery) -> RepoResult<Vec<RecipeRecord>>;
    fn count_recipes(&self) -> RepoResult<u64>;
    /// Overwrites only the text columns supplied in `changes`.
    ///
    /// Calories are never written by this call.
    fn update_recipe(&self, id: RecipeId, changes: &RecipeUpdate) -> RepoResult<()>;
    fn delete_recipe(&self, id: RecipeId) -> RepoResult<()>;
}

/// SQLite-backed recipe repository.
pub struct SqliteRecipeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecipeRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not match what this repository queries.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl RecipeRepository for SqliteRecipeRepository<'_> {
    fn create_recipe(&self, record: &RecipeRecord) -> RepoResult<RecipeId> {
        record.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO recipes (
                id,
                name,
                link,
                category,
                calories
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                record.id(),
                record.name(),
                record.link(),
                record.category(),
                record.calories(),
            ],
        )
        .map_err(map_write_error)?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    fn get_recipe(&self, id: RecipeId) -> RepoResult<Option<RecipeRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECIPE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_recipe_row(row)?));
        }

        Ok(None)
    }

    fn list_recipes(&self, query: &RecipeListQuery) -> RepoResult<Vec<RecipeRecord>> {
        let mut sql = format!("{RECIPE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = &query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.clone()));
        }

        sql.push_str(" ORDER BY id ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut recipes = Vec::new();

        while let Some(row) = rows.next()? {
            recipes.push(parse_recipe_row(row)?);
        }

        Ok(recipes)
    }

    fn count_recipes(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM recipes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative recipe count `{count}`")))
    }

    fn update_recipe(&self, id: RecipeId, changes: &RecipeUpdate) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx
            .execute(
                "UPDATE recipes
                 SET
                    name = COALESCE(?1, name),
                    link = COALESCE(?2, link),
                    category = COALESCE(?3, category)
                 WHERE id = ?4;",
                params![
                    changes.supplied_name(),
                    changes.supplied_link(),
                    changes.supplied_category(),
                    id,
                ],
            )
            .map_err(map_write_error)?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;

        Ok(())
    }

    fn delete_recipe(&self, id: RecipeId) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx
            .execute("DELETE FROM recipes WHERE id = ?1;", [id])
            .map_err(map_write_error)?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;

        Ok(())
    }
}

/// Returns whether a SQLite error is a constraint (uniqueness/NOT NULL/CHECK)
/// rejection.
pub fn is_integrity_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}

fn map_write_error(err: rusqlite::Error) -> RepoError {
    if is_integrity_violation(&err) {
        return RepoError::IntegrityViolation(err.to_string());
    }
    err.into()
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version = current_user_version(conn)?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [RECIPES_TABLE],
        |row| row.get(0),
    )?;
    if table_exists != 1 {
        return Err(RepoError::MissingRequiredTable(RECIPES_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([RECIPES_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    for &column in REQUIRED_RECIPE_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: RECIPES_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn parse_recipe_row(row: &Row<'_>) -> RepoResult<RecipeRecord> {
    let id: RecipeId = row.get("id")?;
    let record = RecipeRecord::from_storage(
        id,
        row.get("name")?,
        row.get("link")?,
        row.get("category")?,
        row.get("calories")?,
    )
    .map_err(|err| RepoError::InvalidData(format!("recipes.id={id}: {err}")))?;
    Ok(record)
}
