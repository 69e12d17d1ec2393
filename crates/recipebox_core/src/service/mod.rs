//! Use-case services for application layers (routes, CLI).
//!
//! # Responsibility
//! - Orchestrate record lifecycle calls into use-case level APIs.
//! - Keep callers decoupled from storage details.

pub mod recipe_service;
