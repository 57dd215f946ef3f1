use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity - a user's reply to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub body: String,
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub body: String,
    pub user_id: i64,
    pub post_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentChanges {
    pub body: Option<String>,
    pub user_id: Option<i64>,
    pub post_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentFilter {
    pub user_id: Option<i64>,
    pub post_id: Option<i64>,
}
