//! Table bootstrap derived from the entity definitions.

use sea_orm::{ConnectionTrait, DbConn, DbErr, Schema};

use super::entity::{comment, post, user};

/// Create the `users`, `posts` and `comments` tables if they are missing.
///
/// Tables are created parent-first so every foreign key (and its
/// `ON DELETE CASCADE` rule) can reference an existing table.
pub async fn ensure_schema(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let statements = [
        schema.create_table_from_entity(user::Entity),
        schema.create_table_from_entity(post::Entity),
        schema.create_table_from_entity(comment::Entity),
    ];

    for mut statement in statements {
        statement.if_not_exists();
        db.execute(backend.build(&statement)).await?;
    }

    tracing::info!("Database schema ready");
    Ok(())
}
