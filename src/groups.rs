use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::client::Client;
use crate::newtypes::{DataSourceId, GroupId, UserId};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GroupId>,
    pub name: String,
    /// "builtin" for the default and admin groups, "regular" otherwise.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

#[derive(Serialize)]
struct GroupMemberPayload {
    user_id: UserId,
}

#[derive(Serialize)]
struct GroupDataSourcePayload {
    data_source_id: DataSourceId,
}

impl Client {
    pub async fn list_groups(&self) -> Result<Vec<Group>, Error> {
        self.get_json("/api/groups", &[]).await
    }

    pub async fn get_group(&self, id: GroupId) -> Result<Group, Error> {
        self.get_json(&format!("/api/groups/{id}"), &[]).await
    }

    pub async fn create_group(&self, request: &CreateGroupRequest) -> Result<Group, Error> {
        self.post_json("/api/groups", request).await
    }

    pub async fn update_group(&self, id: GroupId, group: &Group) -> Result<Group, Error> {
        self.post_json(&format!("/api/groups/{id}"), group).await
    }

    pub async fn delete_group(&self, id: GroupId) -> Result<(), Error> {
        self.delete(&format!("/api/groups/{id}")).await
    }

    pub async fn add_group_member(&self, group_id: GroupId, user_id: UserId) -> Result<(), Error> {
        self.post_raw(
            &format!("/api/groups/{group_id}/members"),
            &GroupMemberPayload { user_id },
        )
        .await?;
        Ok(())
    }

    pub async fn remove_group_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<(), Error> {
        self.delete(&format!("/api/groups/{group_id}/members/{user_id}"))
            .await
    }

    /// Grants the group access to a data source.
    pub async fn add_group_data_source(
        &self,
        group_id: GroupId,
        data_source_id: DataSourceId,
    ) -> Result<(), Error> {
        self.post_raw(
            &format!("/api/groups/{group_id}/data_sources"),
            &GroupDataSourcePayload { data_source_id },
        )
        .await?;
        Ok(())
    }

    pub async fn remove_group_data_source(
        &self,
        group_id: GroupId,
        data_source_id: DataSourceId,
    ) -> Result<(), Error> {
        self.delete(&format!(
            "/api/groups/{group_id}/data_sources/{data_source_id}"
        ))
        .await
    }
}
