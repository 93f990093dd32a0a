use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::api::requests::{EducationRequest, ExperienceRequest, ProfileRequest};
use crate::database::models::Profile;
use crate::database::store::ProfileStore;
use crate::error::{ApiError, ApiResult};

pub const NO_PROFILE: &str = "There is no profile for this user";
pub const PROFILE_NOT_FOUND: &str = "Profile not found";

/// Profile operations on top of a [`ProfileStore`]
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    /// The caller's own profile, owner joined in
    pub async fn get_own(&self, user_id: Uuid) -> ApiResult<Profile> {
        self.store
            .find_populated(user_id)
            .await?
            .ok_or_else(|| ApiError::bad_request(NO_PROFILE))
    }

    /// Create the caller's profile, or merge the supplied fields into it
    pub async fn upsert(&self, user_id: Uuid, request: ProfileRequest) -> ApiResult<Profile> {
        let patch = request.into_patch()?;

        let profile = match self.store.find_profile(user_id).await? {
            Some(mut existing) => {
                existing.apply(patch);
                existing
            }
            None => {
                info!("Creating profile for user {}", user_id);
                Profile::create(user_id, patch)
            }
        };

        Ok(self.store.save_profile(&profile).await?)
    }

    pub async fn list(&self) -> ApiResult<Vec<Profile>> {
        Ok(self.store.list_populated().await?)
    }

    /// Public lookup; `raw_id` comes straight from the path
    pub async fn get_by_user(&self, raw_id: &str) -> ApiResult<Profile> {
        let user_id = Uuid::parse_str(raw_id).map_err(|e| {
            warn!("Malformed user id '{}': {}", raw_id, e);
            ApiError::bad_request(PROFILE_NOT_FOUND)
        })?;

        self.store
            .find_populated(user_id)
            .await?
            .ok_or_else(|| ApiError::bad_request(NO_PROFILE))
    }

    /// Remove the profile, then the owning user. Two separate store calls.
    pub async fn delete(&self, user_id: Uuid) -> ApiResult<()> {
        let had_profile = self.store.delete_profile(user_id).await?;
        let had_user = self.store.delete_user(user_id).await?;
        info!(
            "Deleted user {} (profile: {}, user record: {})",
            user_id, had_profile, had_user
        );
        Ok(())
    }

    pub async fn add_experience(&self, user_id: Uuid, request: ExperienceRequest) -> ApiResult<Profile> {
        let entry = request.into_entry()?;
        let mut profile = self.owned_profile(user_id).await?;
        profile.add_experience(entry);
        Ok(self.store.save_profile(&profile).await?)
    }

    /// An id that matches nothing (or does not parse) leaves the list untouched
    pub async fn remove_experience(&self, user_id: Uuid, raw_id: &str) -> ApiResult<Profile> {
        let mut profile = self.owned_profile(user_id).await?;
        let removed = Uuid::parse_str(raw_id)
            .map(|id| profile.remove_experience(id))
            .unwrap_or(false);
        if !removed {
            return Ok(profile);
        }
        Ok(self.store.save_profile(&profile).await?)
    }

    pub async fn add_education(&self, user_id: Uuid, request: EducationRequest) -> ApiResult<Profile> {
        let entry = request.into_entry()?;
        let mut profile = self.owned_profile(user_id).await?;
        profile.add_education(entry);
        Ok(self.store.save_profile(&profile).await?)
    }

    pub async fn remove_education(&self, user_id: Uuid, raw_id: &str) -> ApiResult<Profile> {
        let mut profile = self.owned_profile(user_id).await?;
        let removed = Uuid::parse_str(raw_id)
            .map(|id| profile.remove_education(id))
            .unwrap_or(false);
        if !removed {
            return Ok(profile);
        }
        Ok(self.store.save_profile(&profile).await?)
    }

    async fn owned_profile(&self, user_id: Uuid) -> ApiResult<Profile> {
        self.store
            .find_profile(user_id)
            .await?
            .ok_or_else(|| ApiError::bad_request(NO_PROFILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;

    fn service() -> ProfileService {
        ProfileService::new(Arc::new(MemoryStore::new()))
    }

    fn basic_request() -> ProfileRequest {
        ProfileRequest {
            status: Some("Developer".into()),
            skills: Some("rust, sql".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn upsert_creates_then_updates_in_place() {
        let svc = service();
        let user = Uuid::new_v4();

        let created = svc
            .upsert(user, ProfileRequest { company: Some("Acme".into()), ..basic_request() })
            .await
            .unwrap();
        let updated = svc
            .upsert(user, ProfileRequest { status: Some("Lead".into()), ..basic_request() })
            .await
            .unwrap();

        assert_eq!(created.id, updated.id);
        assert_eq!(updated.status, "Lead");
        assert_eq!(updated.company.as_deref(), Some("Acme"));
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_by_user_distinguishes_malformed_and_missing() {
        let svc = service();
        match svc.get_by_user("not-a-uuid").await {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, PROFILE_NOT_FOUND),
            other => panic!("unexpected {:?}", other),
        }
        match svc.get_by_user(&Uuid::new_v4().to_string()).await {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, NO_PROFILE),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn adding_experience_without_profile_is_rejected() {
        let svc = service();
        let request = ExperienceRequest {
            title: Some("Engineer".into()),
            company: Some("Acme".into()),
            from: Some("2020-01-01".into()),
            ..Default::default()
        };
        assert!(matches!(
            svc.add_experience(Uuid::new_v4(), request).await,
            Err(ApiError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn removing_malformed_education_id_is_silent() {
        let svc = service();
        let user = Uuid::new_v4();
        svc.upsert(user, basic_request()).await.unwrap();
        let profile = svc.remove_education(user, "nope").await.unwrap();
        assert!(profile.education.is_empty());
    }
}
