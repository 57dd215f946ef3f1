//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;

pub use comment::{Comment, CommentChanges, CommentFilter, NewComment};
pub use post::{NewPost, Post, PostChanges, PostFilter};
pub use user::{NewUser, Role, UnknownRole, User, UserChanges, UserFilter};
