//! Entity-specific repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use forum_core::domain::{
    Comment, CommentChanges, CommentFilter, NewComment, NewPost, NewUser, Post, PostChanges,
    PostFilter, User, UserChanges, UserFilter,
};
use forum_core::error::RepoError;
use forum_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity, UserRole};
use super::sea_base::{SeaBaseRepository, map_db_err};

pub type SeaUserRepository<'c> = SeaBaseRepository<'c, UserEntity>;

pub type SeaPostRepository<'c> = SeaBaseRepository<'c, PostEntity>;

pub type SeaCommentRepository<'c> = SeaBaseRepository<'c, CommentEntity>;

/// `LOWER(column) LIKE '%needle%'`, portable across Postgres, MySQL and SQLite.
fn contains_ignore_case<C>(column: C, needle: &str) -> SimpleExpr
where
    C: ColumnTrait,
{
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", needle.to_lowercase()))
}

#[async_trait]
impl<'c> UserRepository for SeaUserRepository<'c> {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(new_user)
            .insert(self.conn)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(user_id = model.id, "User inserted");
        Ok(model.into())
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, RepoError> {
        let mut active = UserEntity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?
            .into_active_model();

        active.apply(changes);
        let model = active.update(self.conn).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, RepoError> {
        let mut query = UserEntity::find();

        if let Some(name) = &filter.name {
            query = query.filter(contains_ignore_case(user::Column::FirstName, name));
        }
        if let Some(surname) = &filter.surname {
            query = query.filter(contains_ignore_case(user::Column::LastName, surname));
        }
        if let Some(from) = filter.birth_from {
            query = query.filter(user::Column::BirthDate.gte(from));
        }
        if let Some(to) = filter.birth_to {
            query = query.filter(user::Column::BirthDate.lte(to));
        }
        if let Some(role) = filter.role {
            query = query.filter(user::Column::Role.eq(UserRole::from(role)));
        }
        if let Some(active) = filter.active {
            query = query.filter(user::Column::Active.eq(active));
        }

        let rows = query
            .order_by_asc(user::Column::Id)
            .all(self.conn)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl<'c> PostRepository for SeaPostRepository<'c> {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new_post)
            .insert(self.conn)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, user_id = model.user_id, "Post inserted");
        Ok(model.into())
    }

    async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, RepoError> {
        let mut active = PostEntity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?
            .into_active_model();

        active.apply(changes);
        let model = active.update(self.conn).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find();

        if let Some(title) = &filter.title {
            query = query.filter(contains_ignore_case(post::Column::Title, title));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(post::Column::UserId.eq(user_id));
        }

        let rows = query
            .order_by_asc(post::Column::Id)
            .all(self.conn)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl<'c> CommentRepository for SeaCommentRepository<'c> {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel::from(new_comment)
            .insert(self.conn)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(
            comment_id = model.id,
            post_id = model.post_id,
            "Comment inserted"
        );
        Ok(model.into())
    }

    async fn update(&self, id: i64, changes: CommentChanges) -> Result<Comment, RepoError> {
        let mut active = CommentEntity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?
            .into_active_model();

        active.apply(changes);
        let model = active.update(self.conn).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn list(&self, filter: &CommentFilter) -> Result<Vec<Comment>, RepoError> {
        let mut query = CommentEntity::find();

        if let Some(user_id) = filter.user_id {
            query = query.filter(comment::Column::UserId.eq(user_id));
        }
        if let Some(post_id) = filter.post_id {
            query = query.filter(comment::Column::PostId.eq(post_id));
        }

        let rows = query
            .order_by_asc(comment::Column::Id)
            .all(self.conn)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
