use sea_orm::{DatabaseTransaction, DbConn, TransactionTrait};

use forum_core::error::RepoError;
use forum_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::sea_base::map_db_err;
use super::sea_repo::{SeaCommentRepository, SeaPostRepository, SeaUserRepository};

/// One request's worth of storage work, backed by a single transaction.
///
/// Finish with [`commit`](Self::commit) or [`rollback`](Self::rollback).
/// Dropping it without either rolls the transaction back.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    /// Take a connection from the pool and open a transaction on it.
    pub async fn begin(db: &DbConn) -> Result<Self, RepoError> {
        let txn = db.begin().await.map_err(map_db_err)?;
        Ok(Self { txn })
    }

    pub fn users(&self) -> impl UserRepository + '_ {
        SeaUserRepository::new(&self.txn)
    }

    pub fn posts(&self) -> impl PostRepository + '_ {
        SeaPostRepository::new(&self.txn)
    }

    pub fn comments(&self) -> impl CommentRepository + '_ {
        SeaCommentRepository::new(&self.txn)
    }

    pub async fn commit(self) -> Result<(), RepoError> {
        self.txn.commit().await.map_err(map_db_err)
    }

    pub async fn rollback(self) -> Result<(), RepoError> {
        tracing::debug!("Rolling back unit of work");
        self.txn.rollback().await.map_err(map_db_err)
    }
}
