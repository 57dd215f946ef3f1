//! User entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use forum_core::domain::{NewUser, Role, UserChanges};

/// Stored form of [`Role`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum UserRole {
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => UserRole::User,
            Role::Admin => UserRole::Admin,
        }
    }
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::User => Role::User,
            UserRole::Admin => Role::Admin,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "String(StringLen::N(120))")]
    pub first_name: String,
    #[sea_orm(column_type = "String(StringLen::N(120))")]
    pub last_name: String,
    pub birth_date: Date,
    #[sea_orm(column_type = "String(StringLen::N(255))", unique)]
    pub email: String,
    pub active: bool,
    pub role: UserRole,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
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
    /// Mark every supplied field as changed; absent fields keep their stored value.
    pub(crate) fn apply(&mut self, changes: UserChanges) {
        if let Some(first_name) = changes.first_name {
            self.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = Set(last_name);
        }
        if let Some(birth_date) = changes.birth_date {
            self.birth_date = Set(birth_date);
        }
        if let Some(email) = changes.email {
            self.email = Set(email);
        }
        if let Some(active) = changes.active {
            self.active = Set(active);
        }
        if let Some(role) = changes.role {
            self.role = Set(role.into());
        }
    }
}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for forum_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            birth_date: model.birth_date,
            email: model.email,
            active: model.active,
            role: model.role.into(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Id and timestamps stay unset; storage and the save hook fill them in.
impl From<NewUser> for ActiveModel {
    fn from(user: NewUser) -> Self {
        Self {
            id: NotSet,
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            birth_date: Set(user.birth_date),
            email: Set(user.email),
            active: Set(user.active),
            role: Set(user.role.into()),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}
