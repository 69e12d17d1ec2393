//! Recipe domain model.
//!
//! # Responsibility
//! - Define the in-memory shape of one `recipes` row.
//! - Provide validated setters instead of raw field writes.
//! - Produce the ordered read view used for API/JSON output.
//!
//! # Invariants
//! - `name`, `link` and `category` are non-blank.
//! - `calories >= 0`.
//! - `id`, once assigned by storage, is never changed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Primary key of a `recipes` row.
pub type RecipeId = i64;

/// Field-level validation failure for recipe records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    EmptyName,
    EmptyLink,
    EmptyCategory,
    NegativeCalories(i64),
    NonPositiveId(i64),
}

impl Display for RecipeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "recipe name must not be empty"),
            Self::EmptyLink => write!(f, "recipe link must not be empty"),
            Self::EmptyCategory => write!(f, "recipe category must not be empty"),
            Self::NegativeCalories(value) => {
                write!(f, "recipe calories must be >= 0, got {value}")
            }
            Self::NonPositiveId(value) => write!(f, "recipe id must be > 0, got {value}"),
        }
    }
}

impl Error for RecipeValidationError {}

/// Where a record is in its storage lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// No backing row yet.
    Transient,
    /// Backed by a row with the record's `id`.
    Persistent,
    /// The backing row was deleted through this record.
    Removed,
}

/// In-memory representation of one recipe row.
///
/// A record starts transient. It becomes persistent after a successful
/// `create`, and the storage-assigned `id` is kept from then on.
/// Setters only edit memory; `update` persists explicit field changes and
/// then reloads the record from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecipeView", into = "RecipeView")]
pub struct RecipeRecord {
    id: Option<RecipeId>,
    name: String,
    link: String,
    category: String,
    calories: i64,
    state: RecordState,
}

impl RecipeRecord {
    /// Creates a transient record; storage assigns the id on create.
    pub fn new(
        name: impl Into<String>,
        link: impl Into<String>,
        category: impl Into<String>,
        calories: i64,
    ) -> Result<Self, RecipeValidationError> {
        let record = Self {
            id: None,
            name: name.into(),
            link: link.into(),
            category: category.into(),
            calories,
            state: RecordState::Transient,
        };
        record.validate()?;
        Ok(record)
    }

    /// Creates a transient record that asks storage for a specific id.
    ///
    /// Creating it fails with an integrity violation when the id is taken.
    pub fn with_id(
        id: RecipeId,
        name: impl Into<String>,
        link: impl Into<String>,
        category: impl Into<String>,
        calories: i64,
    ) -> Result<Self, RecipeValidationError> {
        let mut record = Self::new(name, link, category, calories)?;
        record.id = Some(id);
        record.validate()?;
        Ok(record)
    }

    /// Rebuilds a persistent record from a stored row.
    pub(crate) fn from_storage(
        id: RecipeId,
        name: String,
        link: String,
        category: String,
        calories: i64,
    ) -> Result<Self, RecipeValidationError> {
        let record = Self {
            id: Some(id),
            name,
            link,
            category,
            calories,
            state: RecordState::Persistent,
        };
        record.validate()?;
        Ok(record)
    }

    /// Checks every field invariant.
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        if let Some(id) = self.id {
            if id <= 0 {
                return Err(RecipeValidationError::NonPositiveId(id));
            }
        }
        check_text(&self.name, RecipeValidationError::EmptyName)?;
        check_text(&self.link, RecipeValidationError::EmptyLink)?;
        check_text(&self.category, RecipeValidationError::EmptyCategory)?;
        if self.calories < 0 {
            return Err(RecipeValidationError::NegativeCalories(self.calories));
        }
        Ok(())
    }

    pub fn id(&self) -> Option<RecipeId> {
        self.id
    }

    /// Returns whether `id` identifies this record.
    pub fn is_id(&self, id: RecipeId) -> bool {
        self.id == Some(id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn calories(&self) -> i64 {
        self.calories
    }

    /// Returns whether this record has a backing row.
    pub fn is_persisted(&self) -> bool {
        self.state == RecordState::Persistent
    }

    pub fn state(&self) -> RecordState {
        self.state
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), RecipeValidationError> {
        let name = name.into();
        check_text(&name, RecipeValidationError::EmptyName)?;
        self.name = name;
        Ok(())
    }

    pub fn set_link(&mut self, link: impl Into<String>) -> Result<(), RecipeValidationError> {
        let link = link.into();
        check_text(&link, RecipeValidationError::EmptyLink)?;
        self.link = link;
        Ok(())
    }

    pub fn set_category(
        &mut self,
        category: impl Into<String>,
    ) -> Result<(), RecipeValidationError> {
        let category = category.into();
        check_text(&category, RecipeValidationError::EmptyCategory)?;
        self.category = category;
        Ok(())
    }

    pub fn set_calories(&mut self, calories: i64) -> Result<(), RecipeValidationError> {
        if calories < 0 {
            return Err(RecipeValidationError::NegativeCalories(calories));
        }
        self.calories = calories;
        Ok(())
    }

    /// Returns the ordered field view used for display and API responses.
    pub fn read(&self) -> RecipeView {
        RecipeView {
            id: self.id,
            name: self.name.clone(),
            link: self.link.clone(),
            category: self.category.clone(),
            calories: self.calories,
        }
    }

    pub(crate) fn mark_persisted(&mut self, id: RecipeId) {
        self.id = Some(id);
        self.state = RecordState::Persistent;
    }

    pub(crate) fn mark_removed(&mut self) {
        self.state = RecordState::Removed;
    }
}

impl Display for RecipeRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(&self.read()).map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

/// Ordered field mapping of a recipe: `id, name, link, category, calories`.
///
/// Field declaration order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeView {
    pub id: Option<RecipeId>,
    pub name: String,
    pub link: String,
    pub category: String,
    pub calories: i64,
}

impl TryFrom<RecipeView> for RecipeRecord {
    type Error = RecipeValidationError;

    fn try_from(value: RecipeView) -> Result<Self, Self::Error> {
        let record = Self {
            id: value.id,
            name: value.name,
            link: value.link,
            category: value.category,
            calories: value.calories,
            state: RecordState::Transient,
        };
        record.validate()?;
        Ok(record)
    }
}

impl From<RecipeRecord> for RecipeView {
    fn from(value: RecipeRecord) -> Self {
        Self {
            id: value.id,
            name: value.name,
            link: value.link,
            category: value.category,
            calories: value.calories,
        }
    }
}

/// Partial replacement of a recipe's text fields.
///
/// `None`, empty and whitespace-only values leave the field unchanged.
/// Calories are not part of this update shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub link: Option<String>,
    pub category: Option<String>,
}

impl RecipeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns whether applying this update cannot change any field.
    pub fn is_empty(&self) -> bool {
        self.supplied_fields().is_empty()
    }

    pub fn supplied_name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    pub fn supplied_link(&self) -> Option<&str> {
        non_blank(&self.link)
    }

    pub fn supplied_category(&self) -> Option<&str> {
        non_blank(&self.category)
    }

    /// Names of the columns this update overwrites.
    pub fn supplied_fields(&self) -> Vec<&'static str> {
        [
            ("name", self.supplied_name()),
            ("link", self.supplied_link()),
            ("category", self.supplied_category()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|_| field))
        .collect()
    }
}

fn check_text(value: &str, err: RecipeValidationError) -> Result<(), RecipeValidationError> {
    if value.trim().is_empty() {
        return Err(err);
    }
    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{RecipeRecord, RecipeUpdate, RecipeValidationError};

    fn sample() -> RecipeRecord {
        RecipeRecord::new("Pancake", "https://example.com/pancake", "Breakfast", 100)
            .expect("sample record should be valid")
    }

    #[test]
    fn blank_update_values_count_as_not_supplied() {
        let changes = RecipeUpdate::new().name("  ").link("").category("Brunch");

        assert_eq!(changes.supplied_fields(), vec!["category"]);
        assert_eq!(changes.supplied_name(), None);
        assert_eq!(changes.supplied_link(), None);
        assert_eq!(changes.supplied_category(), Some("Brunch"));
    }

    #[test]
    fn setters_reject_invalid_values_and_keep_previous() {
        let mut record = sample();

        assert_eq!(record.set_name(" "), Err(RecipeValidationError::EmptyName));
        assert_eq!(
            record.set_calories(-5),
            Err(RecipeValidationError::NegativeCalories(-5))
        );
        assert_eq!(record.name(), "Pancake");
        assert_eq!(record.calories(), 100);
    }

    #[test]
    fn empty_update_detects_blank_only_input() {
        assert!(RecipeUpdate::new().is_empty());
        assert!(RecipeUpdate::new().name("").link("   ").is_empty());
        assert!(!RecipeUpdate::new().link("x").is_empty());
    }
}
