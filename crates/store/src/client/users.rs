//! Identity profile operations.
//!
//! Profile documents are keyed by the auth service's user id, so creation
//! is a merge-patch under a known id rather than a store-assigned one.

use serde_json::json;
use tracing::instrument;

use monngon_core::{AccountStatus, UserId, UserRole};

use crate::collections;
use crate::documents::{NewProfile, Profile, ProfilePatch};
use crate::error::StoreError;
use crate::query::{Direction, Op, Query};

use super::{StoreClient, validated};

impl StoreClient {
    /// Fetch a profile by user id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or the document fails
    /// validation.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_profile(&self, id: &UserId) -> Result<Option<Profile>, StoreError> {
        let Some(doc) = self.get_doc::<Profile>(collections::USERS, id.as_str()).await? else {
            return Ok(None);
        };
        let mut profile = doc.data;
        profile.id = UserId::new(doc.id);
        validated(collections::USERS, profile.id.as_str(), &profile)?;
        Ok(Some(profile))
    }

    /// Write the registration profile under the auth user id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, profile), fields(user_id = %id))]
    pub async fn create_profile(
        &self,
        id: &UserId,
        profile: &NewProfile,
    ) -> Result<(), StoreError> {
        self.patch_doc(collections::USERS, id.as_str(), profile).await
    }

    /// Apply owner-editable profile fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, patch), fields(user_id = %id))]
    pub async fn update_profile(
        &self,
        id: &UserId,
        patch: &ProfilePatch,
    ) -> Result<(), StoreError> {
        self.patch_doc(collections::USERS, id.as_str(), patch).await
    }

    /// Find a profile by email (admin tooling).
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or the document fails
    /// validation.
    #[instrument(skip(self))]
    pub async fn find_profile_by_email(&self, email: &str) -> Result<Option<Profile>, StoreError> {
        let query = Query::new().filter("email", Op::Eq, email).limit(1);
        let docs = self.query_docs::<Profile>(collections::USERS, &query).await?;

        match docs.into_iter().next() {
            Some(doc) => {
                let mut profile = doc.data;
                profile.id = UserId::new(doc.id);
                validated(collections::USERS, profile.id.as_str(), &profile)?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    /// List every profile (admin console).
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or a document fails
    /// validation.
    #[instrument(skip(self))]
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let query = Query::new().order_by("created_at", Direction::Desc);
        let docs = self.query_docs::<Profile>(collections::USERS, &query).await?;

        let mut profiles = Vec::with_capacity(docs.len());
        for doc in docs {
            let mut profile = doc.data;
            profile.id = UserId::new(doc.id);
            validated(collections::USERS, profile.id.as_str(), &profile)?;
            profiles.push(profile);
        }
        Ok(profiles)
    }

    /// Block or unblock an account (admin action).
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(user_id = %id, ?status))]
    pub async fn set_account_status(
        &self,
        id: &UserId,
        status: AccountStatus,
    ) -> Result<(), StoreError> {
        self.patch_doc(collections::USERS, id.as_str(), &json!({ "status": status }))
            .await
    }

    /// Change an account's role (CLI tooling).
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self), fields(user_id = %id, %role))]
    pub async fn set_role(&self, id: &UserId, role: UserRole) -> Result<(), StoreError> {
        self.patch_doc(collections::USERS, id.as_str(), &json!({ "role": role }))
            .await
    }
}
