//! In-memory profile store.
//!
//! Stands in for the account database during development and in tests.
//! Members are kept in creation order so the visible set is stable
//! across reads.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use member_map_location_models::UserLocation;

use crate::{DirectoryError, Member, ProfileStore};

/// Thread-safe in-memory member registry.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    members: Arc<RwLock<Vec<Member>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member with no location yet; returns the generated id.
    pub async fn add_member(&self, display_name: &str) -> String {
        let id = Uuid::new_v4().to_string();
        self.members.write().await.push(Member {
            id: id.clone(),
            display_name: display_name.to_string(),
            location: None,
            updated_at: Utc::now(),
        });
        id
    }

    /// Number of registered members.
    pub async fn member_count(&self) -> usize {
        self.members.read().await.len()
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn visible_members(&self) -> Vec<Member> {
        self.members.read().await.clone()
    }

    async fn member(&self, id: &str) -> Option<Member> {
        self.members
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    async fn save_location(
        &self,
        id: &str,
        location: UserLocation,
    ) -> Result<(), DirectoryError> {
        let mut members = self.members.write().await;
        let member = members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DirectoryError::MemberNotFound { id: id.to_string() })?;

        member.location = Some(location);
        member.updated_at = Utc::now();
        Ok(())
    }
}
