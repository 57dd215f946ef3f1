//! Comment handlers.

use actix_web::{HttpResponse, web};

use forum_core::domain::CommentFilter;
use forum_core::ports::{BaseRepository, CommentRepository};
use forum_shared::Validate;
use forum_shared::dto::{
    CommentListQuery, CommentResponse, CreateCommentRequest, PostCommentsQuery,
    UpdateCommentRequest,
};

use super::{require_comment, require_post, require_user};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /comments
pub async fn create_comment(
    state: web::Data<AppState>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let new_comment = body.into_inner().validate()?;

    let uow = state.begin().await?;
    require_user(&uow, new_comment.user_id).await?;
    require_post(&uow, new_comment.post_id).await?;
    let comment = uow.comments().create(new_comment).await?;
    uow.commit().await?;

    tracing::info!(
        comment_id = comment.id,
        post_id = comment.post_id,
        "Comment created"
    );
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

/// GET /comments
pub async fn list_comments(
    state: web::Data<AppState>,
    query: web::Query<CommentListQuery>,
) -> AppResult<HttpResponse> {
    let filter = CommentFilter::from(query.into_inner());

    let uow = state.begin().await?;
    let comments = uow.comments().list(&filter).await?;
    uow.commit().await?;

    let body: Vec<CommentResponse> = comments.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}/comments
pub async fn list_post_comments(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<PostCommentsQuery>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let uow = state.begin().await?;
    require_post(&uow, post_id).await?;
    let comments = uow
        .comments()
        .list(&query.into_inner().for_post(post_id))
        .await?;
    uow.commit().await?;

    let body: Vec<CommentResponse> = comments.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /comments/{id}
pub async fn get_comment(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let uow = state.begin().await?;
    let comment = require_comment(&uow, id).await?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

/// PUT /comments/{id}
pub async fn update_comment(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let changes = body.into_inner().validate()?;

    let uow = state.begin().await?;
    require_comment(&uow, id).await?;
    if let Some(user_id) = changes.user_id {
        require_user(&uow, user_id).await?;
    }
    if let Some(post_id) = changes.post_id {
        require_post(&uow, post_id).await?;
    }
    let comment = uow.comments().update(id, changes).await?;
    uow.commit().await?;

    tracing::info!(comment_id = comment.id, "Comment updated");
    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

/// DELETE /comments/{id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let uow = state.begin().await?;
    require_comment(&uow, id).await?;
    uow.comments().delete(id).await?;
    uow.commit().await?;

    tracing::info!(comment_id = id, "Comment deleted");
    Ok(HttpResponse::NoContent().finish())
}
