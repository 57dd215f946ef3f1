//! Comment entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use forum_core::domain::{CommentChanges, NewComment};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = Utc::now().into();
        if insert {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

impl ActiveModel {
    pub(crate) fn apply(&mut self, changes: CommentChanges) {
        if let Some(body) = changes.body {
            self.body = Set(body);
        }
        if let Some(user_id) = changes.user_id {
            self.user_id = Set(user_id);
        }
        if let Some(post_id) = changes.post_id {
            self.post_id = Set(post_id);
        }
    }
}

impl From<Model> for forum_core::domain::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            body: model.body,
            user_id: model.user_id,
            post_id: model.post_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<NewComment> for ActiveModel {
    fn from(comment: NewComment) -> Self {
        Self {
            id: NotSet,
            body: Set(comment.body),
            user_id: Set(comment.user_id),
            post_id: Set(comment.post_id),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}
