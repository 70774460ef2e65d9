//! Menu aggregate and its genre/category association sets.
//!
//! A menu owns two many-to-many association sets. Writes resolve requested
//! identifiers against the reference tables and keep only the ones that
//! exist, so the sets held here always name reference rows that existed when
//! the association was written.

use std::collections::BTreeSet;

use crate::domain::{CategoryId, GenreId, MenuId};

/// Maximum menu name length, matching the `menu_name` column.
pub const MENU_NAME_MAX: usize = 50;

/// Validation errors for menu input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuValidationError {
    /// Name was blank once trimmed.
    #[error("menu name must not be empty")]
    EmptyName,
    /// Name exceeded [`MENU_NAME_MAX`] characters.
    #[error("menu name must be at most {max} characters")]
    NameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
}

/// Validated menu display name.
///
/// ## Invariants
/// - Trimmed, non-empty, at most [`MENU_NAME_MAX`] characters.
///
/// # Examples
/// ```
/// use menu_backend::domain::MenuName;
///
/// let name = MenuName::new("  Ramen ").unwrap();
/// assert_eq!(name.as_ref(), "Ramen");
/// assert!(MenuName::new(" ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuName(String);

impl MenuName {
    /// Validate and normalise a menu name.
    ///
    /// # Errors
    /// Returns [`MenuValidationError`] when the name is blank or too long.
    pub fn new(name: impl AsRef<str>) -> Result<Self, MenuValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MenuValidationError::EmptyName);
        }
        if trimmed.chars().count() > MENU_NAME_MAX {
            return Err(MenuValidationError::NameTooLong { max: MENU_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for MenuName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for MenuName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted menu together with its association sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    /// Menu identifier.
    pub id: MenuId,
    /// Display name as stored.
    pub name: String,
    /// Genres currently associated with the menu.
    pub genre_ids: BTreeSet<GenreId>,
    /// Categories currently associated with the menu.
    pub category_ids: BTreeSet<CategoryId>,
}

impl Menu {
    /// A menu with no associations.
    #[must_use]
    pub fn new(id: MenuId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            genre_ids: BTreeSet::new(),
            category_ids: BTreeSet::new(),
        }
    }

    /// Replace the genre set.
    #[must_use]
    pub fn with_genres(mut self, genre_ids: impl IntoIterator<Item = GenreId>) -> Self {
        self.genre_ids = genre_ids.into_iter().collect();
        self
    }

    /// Replace the category set.
    #[must_use]
    pub fn with_categories(mut self, category_ids: impl IntoIterator<Item = CategoryId>) -> Self {
        self.category_ids = category_ids.into_iter().collect();
        self
    }
}

/// Requested state for a create or full update.
///
/// Requested identifiers may name rows that do not exist; the engine drops
/// those rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDraft {
    /// Validated name.
    pub name: MenuName,
    /// Requested genre identifiers, possibly with duplicates or unknowns.
    pub genre_ids: Vec<GenreId>,
    /// Requested category identifiers, possibly with duplicates or unknowns.
    pub category_ids: Vec<CategoryId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", MenuValidationError::EmptyName)]
    #[case("   ", MenuValidationError::EmptyName)]
    #[case(&"x".repeat(MENU_NAME_MAX + 1), MenuValidationError::NameTooLong { max: MENU_NAME_MAX })]
    fn rejects_invalid_names(#[case] input: &str, #[case] expected: MenuValidationError) {
        assert_eq!(MenuName::new(input), Err(expected));
    }

    #[rstest]
    fn accepts_names_at_the_limit() {
        let name = "é".repeat(MENU_NAME_MAX);
        let parsed = MenuName::new(&name).expect("multibyte name at limit");
        assert_eq!(parsed.as_ref(), name);
    }

    #[rstest]
    fn builders_deduplicate_association_sets() {
        let menu = Menu::new(MenuId::new(1), "Curry")
            .with_genres([GenreId::new(2), GenreId::new(1), GenreId::new(2)])
            .with_categories([CategoryId::new(5)]);

        assert_eq!(
            menu.genre_ids.into_iter().collect::<Vec<_>>(),
            vec![GenreId::new(1), GenreId::new(2)]
        );
        assert_eq!(menu.category_ids.len(), 1);
    }
}
