use serde::Serialize;

use crate::client::services::api_client::{ApiClient, ApiError};
use crate::common::models::Group;

#[derive(Debug, Serialize)]
struct CreateGroupRequest<'a> {
    name: &'a str,
    info: &'a str,
}

#[derive(Debug, Serialize)]
struct InviteRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct ExcludeRequest {
    user_id: i64,
}

#[derive(Debug, Default)]
pub struct GroupService;

impl GroupService {
    /// All groups the current user belongs to, in any role.
    pub async fn my_groups(api: &ApiClient) -> Result<Vec<Group>, ApiError> {
        api.get_json("/my-groups/").await
    }

    pub async fn create_group(api: &ApiClient, name: &str, info: &str) -> Result<Group, ApiError> {
        api.post_json("/create-group/", &CreateGroupRequest { name, info })
            .await
    }

    pub async fn delete_group(api: &ApiClient, group_id: i64) -> Result<(), ApiError> {
        api.delete_unit(&format!("/groups/{}/", group_id)).await
    }

    /// Invites a user by email; the invitee receives a pending invite
    /// notification.
    pub async fn invite(api: &ApiClient, group_id: i64, email: &str) -> Result<(), ApiError> {
        api.post_json_unit(
            &format!("/groups/{}/invite/", group_id),
            &InviteRequest { email },
        )
        .await
    }

    /// Removes a non-admin member. The excluded user learns about it from
    /// an `exclude` notification, not from a live removal.
    pub async fn exclude_member(
        api: &ApiClient,
        group_id: i64,
        user_id: i64,
    ) -> Result<(), ApiError> {
        api.post_json_unit(
            &format!("/groups/{}/exclude/", group_id),
            &ExcludeRequest { user_id },
        )
        .await
    }

    pub async fn leave_group(api: &ApiClient, group_id: i64) -> Result<(), ApiError> {
        api.post_unit(&format!("/groups/{}/leave/", group_id)).await
    }
}
