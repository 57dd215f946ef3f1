//! Ports - trait definitions for external dependencies.
//! Storage adapters implement these; handlers only talk to the traits.

mod repository;

pub use repository::{BaseRepository, CommentRepository, PostRepository, UserRepository};
