use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - an article written by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub user_id: i64,
}

/// Partial update of a post.
///
/// `link` is nullable, so it carries three states: `None` keeps the stored link,
/// `Some(None)` clears it and `Some(Some(_))` replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub link: Option<Option<String>>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    pub user_id: Option<i64>,
}
