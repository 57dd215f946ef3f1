//! Post entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use forum_core::domain::{NewPost, PostChanges};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    #[sea_orm(column_type = "String(StringLen::N(512))", nullable)]
    pub link: Option<String>,
    pub user_id: i64,
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
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
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
    pub(crate) fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = Set(title);
        }
        if let Some(body) = changes.body {
            self.body = Set(body);
        }
        if let Some(link) = changes.link {
            self.link = Set(link);
        }
        if let Some(user_id) = changes.user_id {
            self.user_id = Set(user_id);
        }
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for forum_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            body: model.body,
            link: model.link,
            user_id: model.user_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        Self {
            id: NotSet,
            title: Set(post.title),
            body: Set(post.body),
            link: Set(post.link),
            user_id: Set(post.user_id),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}
