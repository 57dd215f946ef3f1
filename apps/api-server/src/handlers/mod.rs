//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;
mod users;


use actix_web::web;

use forum_core::DomainError;
use forum_core::domain::{Comment, Post, User};
use forum_core::ports::BaseRepository;
use forum_infra::UnitOfWork;

use crate::middleware::error::{AppResult, json_config, path_config, query_config};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/users")
                .route("", web::post().to(users::create_user))
                .route("", web::get().to(users::list_users))
                .route("/{id}", web::get().to(users::get_user))
                .route("/{id}", web::put().to(users::update_user))
                .route("/{id}", web::delete().to(users::delete_user)),
        )
        .service(
            web::scope("/posts")
                .route("", web::post().to(posts::create_post))
                .route("", web::get().to(posts::list_posts))
                .route("/{id}", web::get().to(posts::get_post))
                .route("/{id}", web::put().to(posts::update_post))
                .route("/{id}", web::delete().to(posts::delete_post))
                .route("/{id}/comments", web::get().to(comments::list_post_comments)),
        )
        .service(
            web::scope("/comments")
                .route("", web::post().to(comments::create_comment))
                .route("", web::get().to(comments::list_comments))
                .route("/{id}", web::get().to(comments::get_comment))
                .route("/{id}", web::put().to(comments::update_comment))
                .route("/{id}", web::delete().to(comments::delete_comment)),
        );
}

// Existence checks, run inside the caller's unit of work before any write.

async fn require_user(uow: &UnitOfWork, id: i64) -> AppResult<User> {
    uow.users()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::user_not_found(id).into())
}

async fn require_post(uow: &UnitOfWork, id: i64) -> AppResult<Post> {
    uow.posts()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::post_not_found(id).into())
}

async fn require_comment(uow: &UnitOfWork, id: i64) -> AppResult<Comment> {
    uow.comments()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::comment_not_found(id).into())
}
