//! User handlers.

use actix_web::{HttpResponse, web};

use forum_core::DomainError;
use forum_core::domain::User;
use forum_core::error::RepoError;
use forum_core::ports::{BaseRepository, UserRepository};
use forum_infra::UnitOfWork;
use forum_shared::Validate;
use forum_shared::dto::{CreateUserRequest, UpdateUserRequest, UserListQuery, UserResponse};

use super::require_user;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Commit a user write, or roll it back and report the email as taken.
async fn commit_user_write(uow: UnitOfWork, written: Result<User, RepoError>) -> AppResult<User> {
    match written {
        Ok(user) => {
            uow.commit().await?;
            Ok(user)
        }
        Err(RepoError::UniqueViolation(_)) => {
            uow.rollback().await?;
            Err(DomainError::email_in_use().into())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /users
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let new_user = body.into_inner().validate()?;

    let uow = state.begin().await?;
    let written = uow.users().create(new_user).await;
    let user = commit_user_write(uow, written).await?;

    tracing::info!(user_id = user.id, "User created");
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// GET /users
pub async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<UserListQuery>,
) -> AppResult<HttpResponse> {
    let filter = query.into_inner().validate()?;

    let uow = state.begin().await?;
    let users = uow.users().list(&filter).await?;
    uow.commit().await?;

    let body: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /users/{id}
pub async fn get_user(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let uow = state.begin().await?;
    let user = require_user(&uow, id).await?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// PUT /users/{id}
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let changes = body.into_inner().validate()?;

    let uow = state.begin().await?;
    require_user(&uow, id).await?;
    let written = uow.users().update(id, changes).await;
    let user = commit_user_write(uow, written).await?;

    tracing::info!(user_id = user.id, "User updated");
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// DELETE /users/{id}
///
/// The user's posts and comments, and comments on those posts, go with it.
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let uow = state.begin().await?;
    require_user(&uow, id).await?;
    uow.users().delete(id).await?;
    uow.commit().await?;

    tracing::info!(user_id = id, "User deleted");
    Ok(HttpResponse::NoContent().finish())
}
