use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{PlayerStore, StoreError};
use crate::models::{NewPlayer, Player, PlayerChanges};

/// In-process store with the same semantics as the PostgreSQL one:
/// unique usernames, ids handed out once and never reused.
#[derive(Default)]
pub struct MemoryPlayerStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i32,
    players: BTreeMap<i32, Player>,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerStore for MemoryPlayerStore {
    async fn create(&self, player: NewPlayer) -> Result<Player, StoreError> {
        let mut inner = self.inner.lock().await;

        if inner.players.values().any(|p| p.username == player.username) {
            return Err(StoreError::DuplicateUsername);
        }

        inner.last_id += 1;
        let created = Player {
            id: inner.last_id,
            username: player.username,
            rank: player.rank,
            kd_ratio: player.kd_ratio,
        };
        inner.players.insert(created.id, created.clone());

        Ok(created)
    }

    async fn list(&self) -> Result<Vec<Player>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.players.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Player>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.players.get(&id).cloned())
    }

    async fn update(&self, id: i32, changes: PlayerChanges) -> Result<Option<Player>, StoreError> {
        let mut inner = self.inner.lock().await;

        let Some(player) = inner.players.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(rank) = changes.rank {
            player.rank = rank;
        }
        if let Some(kd_ratio) = changes.kd_ratio {
            player.kd_ratio = kd_ratio;
        }

        Ok(Some(player.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        Ok(inner.players.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_player(username: &str) -> NewPlayer {
        NewPlayer {
            username: username.to_string(),
            rank: "Gold".to_string(),
            kd_ratio: 1.0,
        }
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = MemoryPlayerStore::new();
        let first = store.create(new_player("a")).await.unwrap();
        assert!(store.delete(first.id).await.unwrap());

        let second = store.create(new_player("a")).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryPlayerStore::new();
        store.create(new_player("TenZ")).await.unwrap();

        let result = store.create(new_player("TenZ")).await;
        assert!(matches!(result, Err(StoreError::DuplicateUsername)));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let store = MemoryPlayerStore::new();
        let player = store.create(new_player("a")).await.unwrap();

        let changes = PlayerChanges {
            rank: Some("Diamond".to_string()),
            kd_ratio: None,
        };
        let updated = store.update(player.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.rank, "Diamond");
        assert_eq!(updated.kd_ratio, 1.0);
        assert_eq!(store.get(player.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn missing_ids() {
        let store = MemoryPlayerStore::new();
        assert_eq!(store.get(7).await.unwrap(), None);
        assert_eq!(store.update(7, PlayerChanges::default()).await.unwrap(), None);
        assert!(!store.delete(7).await.unwrap());
    }
}
