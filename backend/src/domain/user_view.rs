//! Outward representation of a stored user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sanitize::escape_markup;
use super::user::{StoredUser, UserId};

/// Sanitised, field-filtered view of a [`StoredUser`].
///
/// Free-text fields are markup-escaped. The password hash is never part of
/// this type, and `nickname` is omitted from JSON when the user has none.
///
/// # Examples
/// ```
/// use thingful::domain::{StoredUser, UserView};
///
/// fn render(user: &StoredUser) -> serde_json::Value {
///     serde_json::to_value(UserView::from(user)).unwrap_or_default()
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    /// Storage-assigned identifier.
    pub id: UserId,
    /// Escaped display name.
    pub full_name: String,
    /// Escaped username.
    pub user_name: String,
    /// Escaped nickname, absent when the user has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Insertion timestamp, RFC 3339 on the wire.
    pub date_created: DateTime<Utc>,
}

impl From<&StoredUser> for UserView {
    fn from(user: &StoredUser) -> Self {
        Self {
            id: user.id(),
            full_name: escape_markup(user.full_name()).into_owned(),
            user_name: escape_markup(user.user_name().as_str()).into_owned(),
            nickname: user
                .nick_name()
                .filter(|nick| !nick.is_empty())
                .map(|nick| escape_markup(nick).into_owned()),
            date_created: user.date_created(),
        }
    }
}
