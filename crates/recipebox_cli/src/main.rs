//! Seeding entry point for the recipe store.
//!
//! # Responsibility
//! - Open (or create) a recipe database, reset it and load the seed data.
//! - Print every stored recipe as one JSON object per line.
//!
//! Usage: `recipebox_cli [DB_PATH]`
//!
//! Environment:
//! - `RECIPEBOX_LOG_DIR`: absolute directory for rolling logs (logging is
//!   off when unset).
//! - `RECIPEBOX_LOG_LEVEL`: `trace|debug|info|warn|error`.

use recipebox_core::db::open_db;
use recipebox_core::{
    core_version, init_logging, init_recipes, LogSettings, RecipeListQuery, RecipeRepository,
    SqliteRecipeRepository,
};
use std::error::Error;
use std::process::ExitCode;

const DEFAULT_DB_PATH: &str = "recipebox.sqlite3";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("recipebox_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Some(settings) = LogSettings::from_env()? {
        init_logging(&settings)?;
    }

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

    let mut conn = open_db(&db_path)?;
    let report = init_recipes(&mut conn)?;
    for name in &report.conflicts {
        eprintln!("recipe exists or conflicts, skipped: {name}");
    }

    let repo = SqliteRecipeRepository::try_new(&conn)?;
    for recipe in repo.list_recipes(&RecipeListQuery::default())? {
        println!("{recipe}");
    }

    eprintln!(
        "recipebox_core version={} db={} seeded={}",
        core_version(),
        db_path,
        report.created.len()
    );
    Ok(())
}
