//! Domain model for persisted recipes.
//!
//! # Responsibility
//! - Define the canonical recipe record and its read/update shapes.
//! - Enforce field validation on construction and assignment.
//!
//! # Invariants
//! - A record carries an `id` only when storage assigned it, or when the
//!   caller requested one explicitly via `RecipeRecord::with_id`.
//! - Text fields are never blank and calories are never negative.

pub mod recipe;
