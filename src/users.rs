use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::newtypes::{GroupId, UserId};
use crate::{Error, Page};

#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<EmailAddress>,
    #[serde(default)]
    pub groups: Vec<GroupId>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub auth_type: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub is_invitation_pending: bool,
    #[serde(default)]
    pub is_email_verified: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub active_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub disabled_at: Option<DateTime<Utc>>,
}

/// List entries from `/api/users`. Unlike single fetches, list entries
/// carry group id/name pairs instead of bare group ids.
#[derive(Clone, Debug, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<EmailAddress>,
    #[serde(default)]
    pub groups: Vec<GroupRef>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub auth_type: Option<String>,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub is_invitation_pending: bool,
    #[serde(default)]
    pub is_email_verified: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub active_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub disabled_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GroupRef {
    pub id: GroupId,
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: EmailAddress,
}

#[derive(Clone, Debug, Serialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: EmailAddress,
    pub group_ids: Vec<GroupId>,
}

impl Client {
    /// Returns one page of users.
    pub async fn list_users(&self) -> Result<Page<UserSummary>, Error> {
        self.get_json("/api/users", &[]).await
    }

    /// Searches users by name and email.
    pub async fn search_users(&self, term: &str) -> Result<Page<UserSummary>, Error> {
        self.get_json("/api/users", &[("q", term)]).await
    }

    pub async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.get_json(&format!("/api/users/{id}"), &[]).await
    }

    /// Resolves a user by exact email match, using the search endpoint to
    /// find the candidate and a single fetch to return the full record.
    pub async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, Error> {
        let page = self.search_users(email.as_str()).await?;
        for candidate in page.results {
            if candidate.email.as_ref() == Some(email) {
                return self.get_user(candidate.id).await;
            }
        }
        Err(Error::UserNotFound(email.to_string()))
    }

    /// Invites a new user. The server sends the invitation email itself
    /// unless mail is disabled server-side.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, Error> {
        self.post_json("/api/users", request).await
    }

    pub async fn update_user(
        &self,
        id: UserId,
        request: &UpdateUserRequest,
    ) -> Result<User, Error> {
        self.post_json(&format!("/api/users/{id}"), request).await
    }

    /// Disables a user. Disabled users keep their queries and dashboards
    /// but can no longer log in.
    pub async fn disable_user(&self, id: UserId) -> Result<(), Error> {
        self.post_empty(&format!("/api/users/{id}/disable")).await
    }
}
