//! Data Transfer Objects - request/response types for the API.
//!
//! Field names are camelCase on the wire; request shapes also accept the
//! snake_case spelling. Unknown fields are ignored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use forum_core::domain::{
    Comment, CommentChanges, CommentFilter, NewComment, NewPost, NewUser, Post, PostChanges,
    PostFilter, Role, User, UserChanges, UserFilter,
};

use crate::validation::{Checker, Validate, ValidationErrors};

const NAME_MAX: usize = 120;
const TITLE_MAX: usize = 200;
const LINK_MAX: usize = 512;

fn default_active() -> bool {
    true
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(alias = "first_name")]
    pub first_name: String,
    #[serde(alias = "last_name")]
    pub last_name: String,
    #[serde(alias = "birth_date")]
    pub birth_date: NaiveDate,
    pub email: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub role: String,
}

impl Validate for CreateUserRequest {
    type Output = NewUser;

    fn validate(self) -> Result<NewUser, ValidationErrors> {
        let mut check = Checker::new();
        check.length("firstName", &self.first_name, 1, Some(NAME_MAX));
        check.length("lastName", &self.last_name, 1, Some(NAME_MAX));
        check.email("email", &self.email);
        let role = check.role("role", &self.role);

        check.finish(|| NewUser {
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            email: self.email,
            active: self.active,
            role: role.unwrap_or(Role::User),
        })
    }
}

/// Request to update a user. Only the keys present are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(alias = "first_name")]
    pub first_name: Option<String>,
    #[serde(alias = "last_name")]
    pub last_name: Option<String>,
    #[serde(alias = "birth_date")]
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub active: Option<bool>,
    pub role: Option<String>,
}

impl Validate for UpdateUserRequest {
    type Output = UserChanges;

    fn validate(self) -> Result<UserChanges, ValidationErrors> {
        let mut check = Checker::new();
        if let Some(first_name) = &self.first_name {
            check.length("firstName", first_name, 1, Some(NAME_MAX));
        }
        if let Some(last_name) = &self.last_name {
            check.length("lastName", last_name, 1, Some(NAME_MAX));
        }
        if let Some(email) = &self.email {
            check.email("email", email);
        }
        let role = self.role.as_deref().and_then(|r| check.role("role", r));

        check.finish(|| UserChanges {
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            email: self.email,
            active: self.active,
            role,
        })
    }
}

/// Response containing a stored user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub active: bool,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            birth_date: user.birth_date,
            email: user.email,
            active: user.active,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Query string of `GET /users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub birth_from: Option<NaiveDate>,
    pub birth_to: Option<NaiveDate>,
    pub role: Option<String>,
    pub active: Option<bool>,
}

impl Validate for UserListQuery {
    type Output = UserFilter;

    fn validate(self) -> Result<UserFilter, ValidationErrors> {
        let mut check = Checker::new();
        let role = self.role.as_deref().and_then(|r| check.role("role", r));

        check.finish(|| UserFilter {
            name: non_blank(self.name),
            surname: non_blank(self.surname),
            birth_from: self.birth_from,
            birth_to: self.birth_to,
            role,
            active: self.active,
        })
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(alias = "user_id")]
    pub user_id: i64,
}

impl Validate for CreatePostRequest {
    type Output = NewPost;

    fn validate(self) -> Result<NewPost, ValidationErrors> {
        let mut check = Checker::new();
        check.length("title", &self.title, 1, Some(TITLE_MAX));
        check.length("body", &self.body, 1, None);
        if let Some(link) = &self.link {
            check.length("link", link, 0, Some(LINK_MAX));
        }

        check.finish(|| NewPost {
            title: self.title,
            body: self.body,
            link: self.link,
            user_id: self.user_id,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    /// `null` clears the link; leaving the key out keeps it.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<Option<String>>,
    #[serde(alias = "user_id")]
    pub user_id: Option<i64>,
}

impl Validate for UpdatePostRequest {
    type Output = PostChanges;

    fn validate(self) -> Result<PostChanges, ValidationErrors> {
        let mut check = Checker::new();
        if let Some(title) = &self.title {
            check.length("title", title, 1, Some(TITLE_MAX));
        }
        if let Some(body) = &self.body {
            check.length("body", body, 1, None);
        }
        if let Some(Some(link)) = &self.link {
            check.length("link", link, 0, Some(LINK_MAX));
        }

        check.finish(|| PostChanges {
            title: self.title,
            body: self.body,
            link: self.link,
            user_id: self.user_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            link: post.link,
            user_id: post.user_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Query string of `GET /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub title: Option<String>,
    pub user_id: Option<i64>,
}

impl From<PostListQuery> for PostFilter {
    fn from(query: PostListQuery) -> Self {
        Self {
            title: non_blank(query.title),
            user_id: query.user_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub body: String,
    #[serde(alias = "user_id")]
    pub user_id: i64,
    #[serde(alias = "post_id")]
    pub post_id: i64,
}

impl Validate for CreateCommentRequest {
    type Output = NewComment;

    fn validate(self) -> Result<NewComment, ValidationErrors> {
        let mut check = Checker::new();
        check.length("body", &self.body, 1, None);

        check.finish(|| NewComment {
            body: self.body,
            user_id: self.user_id,
            post_id: self.post_id,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub body: Option<String>,
    #[serde(alias = "user_id")]
    pub user_id: Option<i64>,
    #[serde(alias = "post_id")]
    pub post_id: Option<i64>,
}

impl Validate for UpdateCommentRequest {
    type Output = CommentChanges;

    fn validate(self) -> Result<CommentChanges, ValidationErrors> {
        let mut check = Checker::new();
        if let Some(body) = &self.body {
            check.length("body", body, 1, None);
        }

        check.finish(|| CommentChanges {
            body: self.body,
            user_id: self.user_id,
            post_id: self.post_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub body: String,
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            body: comment.body,
            user_id: comment.user_id,
            post_id: comment.post_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Query string of `GET /comments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListQuery {
    pub user_id: Option<i64>,
    pub post_id: Option<i64>,
}

impl From<CommentListQuery> for CommentFilter {
    fn from(query: CommentListQuery) -> Self {
        Self {
            user_id: query.user_id,
            post_id: query.post_id,
        }
    }
}

/// Query string of `GET /posts/{id}/comments`; the post comes from the path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentsQuery {
    pub user_id: Option<i64>,
}

impl PostCommentsQuery {
    pub fn for_post(self, post_id: i64) -> CommentFilter {
        CommentFilter {
            user_id: self.user_id,
            post_id: Some(post_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ada() -> serde_json::Value {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "birthDate": "1815-12-10",
            "email": "ada@example.com",
            "role": "admin"
        })
    }

    #[test]
    fn create_user_defaults_active_and_parses_role() {
        let req: CreateUserRequest = serde_json::from_value(ada()).unwrap();
        let user = req.validate().unwrap();

        assert!(user.active);
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.birth_date, NaiveDate::from_ymd_opt(1815, 12, 10).unwrap());
    }

    #[test]
    fn create_user_accepts_snake_case_and_ignores_unknown_fields() {
        let req: CreateUserRequest = serde_json::from_value(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "birth_date": "1815-12-10",
            "email": "ada@example.com",
            "role": "user",
            "id": 99,
            "createdAt": "2000-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(req.validate().unwrap().first_name, "Ada");
    }

    #[test]
    fn create_user_missing_field_fails_to_parse() {
        let mut body = ada();
        body.as_object_mut().unwrap().remove("email");

        assert!(serde_json::from_value::<CreateUserRequest>(body).is_err());
    }

    #[test]
    fn create_user_reports_each_bad_field() {
        let mut body = ada();
        body["firstName"] = json!("");
        body["lastName"] = json!("x".repeat(121));
        body["email"] = json!("not-an-email");
        body["role"] = json!("superuser");
        let req: CreateUserRequest = serde_json::from_value(body).unwrap();

        let errors = req.validate().unwrap_err().into_inner();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["firstName", "lastName", "email", "role"]);
    }

    #[test]
    fn update_user_only_carries_present_keys() {
        let req: UpdateUserRequest = serde_json::from_value(json!({"active": false})).unwrap();
        let changes = req.validate().unwrap();

        assert_eq!(
            changes,
            UserChanges {
                active: Some(false),
                ..Default::default()
            }
        );
    }

    #[test]
    fn update_user_validates_present_keys() {
        let req: UpdateUserRequest =
            serde_json::from_value(json!({"firstName": "", "role": "admin"})).unwrap();

        let errors = req.validate().unwrap_err().into_inner();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "firstName");
    }

    #[test]
    fn update_post_distinguishes_null_link_from_absent_link() {
        let absent: UpdatePostRequest = serde_json::from_value(json!({"title": "t"})).unwrap();
        assert_eq!(absent.validate().unwrap().link, None);

        let cleared: UpdatePostRequest = serde_json::from_value(json!({"link": null})).unwrap();
        assert_eq!(cleared.validate().unwrap().link, Some(None));

        let set: UpdatePostRequest =
            serde_json::from_value(json!({"link": "https://example.com"})).unwrap();
        assert_eq!(
            set.validate().unwrap().link,
            Some(Some("https://example.com".to_string()))
        );
    }

    #[test]
    fn post_bounds() {
        let req: CreatePostRequest = serde_json::from_value(json!({
            "title": "x".repeat(201),
            "body": "",
            "link": "x".repeat(513),
            "userId": 1
        }))
        .unwrap();

        let errors = req.validate().unwrap_err().into_inner();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["title", "body", "link"]);
    }

    #[test]
    fn empty_comment_body_is_rejected() {
        let req: CreateCommentRequest =
            serde_json::from_value(json!({"body": "", "userId": 1, "postId": 2})).unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn user_list_query_drops_blank_names_and_checks_role() {
        let query = UserListQuery {
            name: Some(String::new()),
            surname: Some("love".to_string()),
            role: Some("admin".to_string()),
            ..Default::default()
        };
        let filter = query.validate().unwrap();
        assert_eq!(filter.name, None);
        assert_eq!(filter.surname.as_deref(), Some("love"));
        assert_eq!(filter.role, Some(Role::Admin));

        let bad = UserListQuery {
            role: Some("root".to_string()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn user_response_is_camel_case() {
        let now = Utc::now();
        let response = UserResponse::from(User {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            email: "ada@example.com".to_string(),
            active: true,
            role: Role::Admin,
            created_at: now,
            updated_at: now,
        });

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["birthDate"], "1815-12-10");
        assert_eq!(value["role"], "admin");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}
