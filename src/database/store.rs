use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Profile;

/// Persistence seam for profiles and the user records they belong to.
///
/// Every method is a single store call. Callers that need more than one
/// (deleting a profile together with its user) issue them in sequence with
/// no transaction around them.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Profile owned by `user_id`, with `user` left as a bare id
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError>;

    /// Profile owned by `user_id` with the owner's name and avatar joined in
    async fn find_populated(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError>;

    /// All profiles, owners joined in
    async fn list_populated(&self) -> Result<Vec<Profile>, DatabaseError>;

    /// Insert or fully replace the profile keyed by its owner
    async fn save_profile(&self, profile: &Profile) -> Result<Profile, DatabaseError>;

    /// Returns whether a profile existed
    async fn delete_profile(&self, user_id: Uuid) -> Result<bool, DatabaseError>;

    /// Returns whether a user existed
    async fn delete_user(&self, user_id: Uuid) -> Result<bool, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}
