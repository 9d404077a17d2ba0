use crate::client::services::api_client::{ApiClient, ApiError};
use crate::common::models::{InviteAction, Notification};

#[derive(Debug, Default)]
pub struct NotificationService;

impl NotificationService {
    /// The full notification list; pages derive their badge count from it.
    pub async fn fetch_all(api: &ApiClient) -> Result<Vec<Notification>, ApiError> {
        api.get_json("/notifications/").await
    }

    /// Marks every non-invite notification viewed on the backend.
    pub async fn mark_viewed(api: &ApiClient) -> Result<(), ApiError> {
        api.post_unit("/notifications/mark_viewed/").await
    }

    /// Dismisses a single notification (used for deadline reminders).
    pub async fn delete(api: &ApiClient, notif_id: i64) -> Result<(), ApiError> {
        api.delete_unit(&format!("/notifications/{}/delete/", notif_id))
            .await
    }

    /// Resolves an invitation. The backend rejects repeated resolutions;
    /// the client additionally guards with the invite state machine.
    pub async fn invitation_action(
        api: &ApiClient,
        invite_id: i64,
        action: InviteAction,
    ) -> Result<(), ApiError> {
        api.post_unit(&format!(
            "/invitations/{}/{}/",
            invite_id,
            action.path_segment()
        ))
        .await
    }
}
