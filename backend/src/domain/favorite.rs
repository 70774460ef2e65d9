//! Favourite menus saved by users.

use chrono::{DateTime, Utc};

use crate::domain::{FavoriteId, Menu, MenuId, UserId};

/// A favourite row. At most one exists per `(user_id, menu_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub menu_id: MenuId,
    pub created_at: DateTime<Utc>,
}

/// A favourite joined with the menu it points at, association sets included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteWithMenu {
    pub favorite: Favorite,
    pub menu: Menu,
}

/// Whether a user has favourited a particular menu.
///
/// `favorite_id` is present exactly when `is_favorite` is true; use
/// [`FavoriteStatus::from_favorite`] to keep the pair consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteStatus {
    pub is_favorite: bool,
    pub favorite_id: Option<FavoriteId>,
}

impl FavoriteStatus {
    /// Build a status from an optional favourite identifier.
    ///
    /// # Examples
    /// ```
    /// use menu_backend::domain::{FavoriteId, FavoriteStatus};
    ///
    /// let status = FavoriteStatus::from_favorite(Some(FavoriteId::new(3)));
    /// assert!(status.is_favorite);
    /// assert!(!FavoriteStatus::from_favorite(None).is_favorite);
    /// ```
    #[must_use]
    pub fn from_favorite(favorite_id: Option<FavoriteId>) -> Self {
        Self {
            is_favorite: favorite_id.is_some(),
            favorite_id,
        }
    }
}
