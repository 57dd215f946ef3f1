use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, DbErr, EntityTrait, PrimaryKeyTrait, SqlErr};

use forum_core::error::RepoError;
use forum_core::ports::BaseRepository;

/// Generic repository bound to one unit of work.
///
/// Every statement runs on the borrowed transaction, so nothing is visible to
/// other requests until the owning [`UnitOfWork`](super::UnitOfWork) commits.
pub struct SeaBaseRepository<'c, E>
where
    E: EntityTrait,
{
    pub(crate) conn: &'c DatabaseTransaction,
    _entity: PhantomData<E>,
}

impl<'c, E> SeaBaseRepository<'c, E>
where
    E: EntityTrait,
{
    pub fn new(conn: &'c DatabaseTransaction) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<'c, E, T> BaseRepository<T> for SeaBaseRepository<'c, E>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i64>,
    T: From<E::Model> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(self.conn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// Classify a storage error. Unique-index rejections stay distinguishable from
/// every other failure.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => return RepoError::UniqueViolation(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return RepoError::Constraint(msg),
        _ => {}
    }

    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        other => RepoError::Query(other.to_string()),
    }
}
