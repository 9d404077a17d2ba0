//! Service-level tests against a mock TaskTalk backend.

use std::io::Write;
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tasktalk::client::config::ClientConfig;
use tasktalk::client::services::api_client::{ApiClient, ApiError};
use tasktalk::client::services::auth_service::AuthService;
use tasktalk::client::services::group_service::GroupService;
use tasktalk::client::services::notification_service::NotificationService;
use tasktalk::client::services::post_service::{PostDraft, PostEdit, PostService};
use tasktalk::client::services::session::{SessionEvent, SessionStore};
use tasktalk::common::models::{
    pending_count, pending_or_exclude_count, InviteAction, Notification, PendingFile, Role,
};

fn client_for(server: &MockServer) -> (Arc<ApiClient>, Arc<SessionStore>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig {
        api_url: server.uri(),
        data_dir: dir.path().to_path_buf(),
    };
    let session = Arc::new(SessionStore::new(config.data_dir.clone()));
    let api = Arc::new(ApiClient::new(&config, session.clone()));
    (api, session, dir)
}

fn user_json() -> serde_json::Value {
    json!({
        "id": 3,
        "email": "student@example.com",
        "fullName": "Petrov P. P.",
        "role": "student",
        "about": "",
        "groups": [
            {"id": 1, "name": "Algebra", "role": "student"}
        ]
    })
}

#[tokio::test]
async fn login_stores_the_session_and_later_requests_carry_the_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"token": "secret-token", "user": user_json()})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/my-groups/"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (api, session, _dir) = client_for(&server);
    let user = AuthService::login(&api, "student@example.com", "pass")
        .await
        .unwrap();
    assert_eq!(user.id, 3);
    assert_eq!(user.role, Role::Student);
    assert_eq!(session.token().as_deref(), Some("secret-token"));
    assert_eq!(session.user().unwrap().id, 3);

    // The bearer-token matcher above rejects the request otherwise.
    let groups = GroupService::my_groups(&api).await.unwrap();
    assert!(groups.is_empty());
}

#[tokio::test]
async fn login_failure_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"non_field_errors": ["Invalid credentials"]})),
        )
        .mount(&server)
        .await;

    let (api, session, _dir) = client_for(&server);
    let err = AuthService::login(&api, "a@b.com", "wrong").await.unwrap_err();
    match &err {
        ApiError::Status { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("Invalid credentials"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    // Nothing was stored.
    assert!(session.token().is_none());
}

#[tokio::test]
async fn notification_counts_follow_the_page_variants() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notifications/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1, "notif_type": "invite", "status": "pending",
                "group_name": "Algebra", "from_user_name": "Ivanov I.",
                "created_at": "2024-05-01T10:00:00Z", "message": ""
            },
            {
                "id": 2, "notif_type": "invite", "status": "accepted",
                "group_name": "Physics", "from_user_name": "Ivanov I.",
                "created_at": "2024-05-01T10:00:00Z", "message": ""
            },
            {
                "id": 3, "notif_type": "exclude", "status": "viewed",
                "group_name": "History", "from_user_name": "Ivanov I.",
                "created_at": "2024-05-02T10:00:00Z", "message": ""
            }
        ])))
        .mount(&server)
        .await;

    let (api, _session, _dir) = client_for(&server);
    let notifications: Vec<Notification> = NotificationService::fetch_all(&api).await.unwrap();
    assert_eq!(notifications.len(), 3);
    assert_eq!(pending_count(&notifications), 1);
    assert_eq!(pending_or_exclude_count(&notifications), 2);
}

#[tokio::test]
async fn invitation_actions_hit_the_action_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invitations/42/accept/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "accepted"})))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _session, _dir) = client_for(&server);
    NotificationService::invitation_action(&api, 42, InviteAction::Accept)
        .await
        .unwrap();
}

#[tokio::test]
async fn mark_viewed_and_dismiss_use_their_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notifications/mark_viewed/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updated": 2})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/notifications/7/delete/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _session, _dir) = client_for(&server);
    NotificationService::mark_viewed(&api).await.unwrap();
    NotificationService::delete(&api, 7).await.unwrap();
}

#[tokio::test]
async fn create_post_without_files_is_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/groups/1/posts/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 10, "title": "Homework", "content": "Read chapter 4",
            "deadline": "2099-06-01", "author": 9,
            "created_at": "2024-05-01T10:00:00Z", "files": [], "comments": []
        })))
        .mount(&server)
        .await;

    let (api, _session, _dir) = client_for(&server);
    let draft = PostDraft {
        title: "Homework".into(),
        content: "Read chapter 4".into(),
        deadline: Some("2099-06-01".into()),
        files: vec![],
    };
    let post = PostService::create_post(&api, 1, &draft).await.unwrap();
    assert_eq!(post.id, 10);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"));
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["deadline"], "2099-06-01");
}

#[tokio::test]
async fn create_post_with_files_switches_to_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/groups/1/posts/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 11, "title": "With file", "content": "See attachment",
            "author": 9, "created_at": "2024-05-01T10:00:00Z",
            "files": [], "comments": []
        })))
        .mount(&server)
        .await;

    let mut attachment = tempfile::NamedTempFile::new().unwrap();
    writeln!(attachment, "attachment payload").unwrap();
    let pending = PendingFile::from_path(attachment.path().to_str().unwrap()).unwrap();

    let (api, _session, _dir) = client_for(&server);
    let draft = PostDraft {
        title: "With file".into(),
        content: "See attachment".into(),
        deadline: None,
        files: vec![pending],
    };
    PostService::create_post(&api, 1, &draft).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn update_post_carries_file_deletions() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/groups/1/posts/10/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 10, "title": "Edited", "content": "New text",
            "author": 9, "created_at": "2024-05-01T10:00:00Z",
            "files": [], "comments": []
        })))
        .mount(&server)
        .await;

    let (api, _session, _dir) = client_for(&server);
    let edit = PostEdit {
        title: "Edited".into(),
        content: "New text".into(),
        deadline: None,
        file_ids_to_delete: vec![4, 5],
        files: vec![],
    };
    let post = PostService::update_post(&api, 1, 10, &edit).await.unwrap();
    assert_eq!(post.title, "Edited");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(body.contains("file_ids_to_delete"));
    assert!(body.contains("[4,5]"));
}

#[tokio::test]
async fn group_membership_operations_use_their_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/groups/5/invite/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sent": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/groups/5/exclude/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"excluded": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/groups/5/leave/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"left": true})))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _session, _dir) = client_for(&server);
    GroupService::invite(&api, 5, "new@member.com").await.unwrap();
    GroupService::exclude_member(&api, 5, 3).await.unwrap();
    GroupService::leave_group(&api, 5).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let invite_body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(invite_body["email"], "new@member.com");
    let exclude_body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(exclude_body["user_id"], 3);
}

#[tokio::test]
async fn profile_fetch_parses_role_and_groups() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/3/profile/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(&server)
        .await;

    let (api, _session, _dir) = client_for(&server);
    let profile = AuthService::fetch_profile(&api, 3).await.unwrap();
    assert_eq!(profile.role, Role::Student);
    assert_eq!(profile.groups.len(), 1);
    assert_eq!(profile.groups[0].role, Some(Role::Student));
}

#[tokio::test]
async fn store_broadcasts_count_changes_made_after_a_fetch() {
    let server = MockServer::start().await;
    let (_api, session, _dir) = client_for(&server);
    let mut events = session.event_channel();

    session.set_notif_count(5);
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::NotifCountChanged(5)
    );

    // Opening the notifications view zeroes the cache and re-broadcasts.
    session.set_notif_count(0);
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::NotifCountChanged(0)
    );
}
