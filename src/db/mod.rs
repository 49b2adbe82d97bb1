use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewPlayer, Player, PlayerChanges};

pub mod memory;
pub mod postgres;

pub use memory::MemoryPlayerStore;
pub use postgres::PgPlayerStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("username is already taken")]
    DuplicateUsername,
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateUsername
            }
            _ => StoreError::Database(err),
        }
    }
}

/// Storage client for player records.
///
/// Every write is atomic: it either lands completely or not at all.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Inserts a player and returns it with its generated id.
    async fn create(&self, player: NewPlayer) -> Result<Player, StoreError>;

    async fn list(&self) -> Result<Vec<Player>, StoreError>;

    async fn get(&self, id: i32) -> Result<Option<Player>, StoreError>;

    /// Applies the present fields of `changes`. Returns `None` if no player
    /// has this id.
    async fn update(&self, id: i32, changes: PlayerChanges) -> Result<Option<Player>, StoreError>;

    /// Returns `false` if no player has this id.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}
