use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{PlayerStore, StoreError};
use crate::config::{DB_ACQUIRE_TIMEOUT, DB_MAX_CONNECTIONS};
use crate::models::{NewPlayer, Player, PlayerChanges};

const CREATE_PLAYERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS players (
        id SERIAL PRIMARY KEY,
        username VARCHAR(80) NOT NULL UNIQUE,
        rank VARCHAR(50) NOT NULL,
        kd_ratio DOUBLE PRECISION NOT NULL
    )"#;

/// PostgreSQL-backed store. Each write runs in its own transaction, which
/// rolls back if dropped before `commit`.
#[derive(Clone)]
pub struct PgPlayerStore {
    pool: PgPool,
}

impl PgPlayerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(DB_MAX_CONNECTIONS)
            .acquire_timeout(DB_ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Creates the `players` table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_PLAYERS_TABLE)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl PlayerStore for PgPlayerStore {
    async fn create(&self, player: NewPlayer) -> Result<Player, StoreError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Player>(
            r#"INSERT INTO players (username, rank, kd_ratio)
               VALUES ($1, $2, $3)
               RETURNING id, username, rank, kd_ratio"#
        )
        .bind(&player.username)
        .bind(&player.rank)
        .bind(player.kd_ratio)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<Player>, StoreError> {
        let players = sqlx::query_as::<_, Player>(
            r#"SELECT id, username, rank, kd_ratio FROM players ORDER BY id"#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    async fn get(&self, id: i32) -> Result<Option<Player>, StoreError> {
        let player = sqlx::query_as::<_, Player>(
            r#"SELECT id, username, rank, kd_ratio FROM players WHERE id = $1"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    async fn update(&self, id: i32, changes: PlayerChanges) -> Result<Option<Player>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Player>(
            r#"UPDATE players
               SET rank = COALESCE($2, rank),
                   kd_ratio = COALESCE($3, kd_ratio)
               WHERE id = $1
               RETURNING id, username, rank, kd_ratio"#
        )
        .bind(id)
        .bind(changes.rank)
        .bind(changes.kd_ratio)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(r#"DELETE FROM players WHERE id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
