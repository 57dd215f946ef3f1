//! Post handlers.

use actix_web::{HttpResponse, web};

use forum_core::domain::PostFilter;
use forum_core::ports::{BaseRepository, PostRepository};
use forum_shared::Validate;
use forum_shared::dto::{CreatePostRequest, PostListQuery, PostResponse, UpdatePostRequest};

use super::{require_post, require_user};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let new_post = body.into_inner().validate()?;

    let uow = state.begin().await?;
    require_user(&uow, new_post.user_id).await?;
    let post = uow.posts().create(new_post).await?;
    uow.commit().await?;

    tracing::info!(post_id = post.id, user_id = post.user_id, "Post created");
    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// GET /posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let filter = PostFilter::from(query.into_inner());

    let uow = state.begin().await?;
    let posts = uow.posts().list(&filter).await?;
    uow.commit().await?;

    let body: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let uow = state.begin().await?;
    let post = require_post(&uow, id).await?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let changes = body.into_inner().validate()?;

    let uow = state.begin().await?;
    require_post(&uow, id).await?;
    if let Some(user_id) = changes.user_id {
        require_user(&uow, user_id).await?;
    }
    let post = uow.posts().update(id, changes).await?;
    uow.commit().await?;

    tracing::info!(post_id = post.id, "Post updated");
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let uow = state.begin().await?;
    require_post(&uow, id).await?;
    uow.posts().delete(id).await?;
    uow.commit().await?;

    tracing::info!(post_id = id, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}
