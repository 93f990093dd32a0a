use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Profile, User, UserRef};
use crate::database::store::ProfileStore;

/// In-process store used when no database is configured, and by tests
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    // Keyed by owning user id, which keeps profiles 1:1 with users
    profiles: RwLock<HashMap<Uuid, Profile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn user_exists(&self, user_id: Uuid) -> bool {
        self.users.read().await.contains_key(&user_id)
    }

    async fn populate(&self, profile: Profile) -> Profile {
        let summary = self.users.read().await.get(&profile.owner()).map(User::summary);
        profile.populate(summary)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn find_populated(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError> {
        let found = self.profiles.read().await.get(&user_id).cloned();
        match found {
            Some(profile) => Ok(Some(self.populate(profile).await)),
            None => Ok(None),
        }
    }

    async fn list_populated(&self) -> Result<Vec<Profile>, DatabaseError> {
        let mut profiles: Vec<Profile> = self.profiles.read().await.values().cloned().collect();
        profiles.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

        let users = self.users.read().await;
        Ok(profiles
            .into_iter()
            .map(|p| {
                let summary = users.get(&p.owner()).map(User::summary);
                p.populate(summary)
            })
            .collect())
    }

    async fn save_profile(&self, profile: &Profile) -> Result<Profile, DatabaseError> {
        let mut stored = profile.clone();
        stored.user = UserRef::Id(profile.owner());
        self.profiles.write().await.insert(stored.owner(), stored.clone());
        Ok(stored)
    }

    async fn delete_profile(&self, user_id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.profiles.write().await.remove(&user_id).is_some())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.users.write().await.remove(&user_id).is_some())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
