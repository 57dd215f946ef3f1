use async_trait::async_trait;

use crate::domain::{
    Comment, CommentChanges, CommentFilter, NewComment, NewPost, NewUser, Post, PostChanges,
    PostFilter, User, UserChanges, UserFilter,
};
use crate::error::RepoError;

/// Operations every entity repository supports, keyed by integer id.
#[async_trait]
pub trait BaseRepository<T>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Dependent rows go with it.
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User> {
    /// Insert a user. Fails with [`RepoError::UniqueViolation`] if the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Apply the supplied fields to an existing user.
    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, RepoError>;

    /// Users matching every criterion of `filter`, ascending by id.
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post> {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, RepoError>;

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment> {
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;

    async fn update(&self, id: i64, changes: CommentChanges) -> Result<Comment, RepoError>;

    async fn list(&self, filter: &CommentFilter) -> Result<Vec<Comment>, RepoError>;
}
