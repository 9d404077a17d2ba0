use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::client::services::api_client::{ApiClient, ApiError};
use crate::common::models::{Comment, PendingFile, Post};

/// A new post as composed in the create-post form.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    /// `YYYY-MM-DD`, already validated against today.
    pub deadline: Option<String>,
    pub files: Vec<PendingFile>,
}

/// An edit of an existing post. Always sent as multipart: the edit may
/// carry new attachments and ids of stored files to drop.
#[derive(Debug, Clone, Default)]
pub struct PostEdit {
    pub title: String,
    pub content: String,
    pub deadline: Option<String>,
    pub file_ids_to_delete: Vec<i64>,
    pub files: Vec<PendingFile>,
}

#[derive(Debug, Serialize)]
struct CreatePostRequest<'a> {
    title: &'a str,
    content: &'a str,
    deadline: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<i64>,
}

async fn attach_files(mut form: Form, files: &[PendingFile]) -> Result<Form, ApiError> {
    for file in files {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| ApiError::Attachment(format!("{}: {}", file.path.display(), e)))?;
        form = form.part("files", Part::bytes(bytes).file_name(file.name.clone()));
    }
    Ok(form)
}

#[derive(Debug, Default)]
pub struct PostService;

impl PostService {
    pub async fn group_posts(api: &ApiClient, group_id: i64) -> Result<Vec<Post>, ApiError> {
        api.get_json(&format!("/groups/{}/posts/", group_id)).await
    }

    /// Creates a post; plain JSON unless attachments are queued, in which
    /// case the request goes out as a multipart form.
    pub async fn create_post(
        api: &ApiClient,
        group_id: i64,
        draft: &PostDraft,
    ) -> Result<Post, ApiError> {
        let path = format!("/groups/{}/posts/", group_id);
        if draft.files.is_empty() {
            return api
                .post_json(
                    &path,
                    &CreatePostRequest {
                        title: &draft.title,
                        content: &draft.content,
                        deadline: draft.deadline.as_deref(),
                    },
                )
                .await;
        }

        let mut form = Form::new()
            .text("title", draft.title.clone())
            .text("content", draft.content.clone());
        if let Some(deadline) = &draft.deadline {
            form = form.text("deadline", deadline.clone());
        }
        let form = attach_files(form, &draft.files).await?;
        api.post_multipart(&path, form).await
    }

    pub async fn fetch_post(api: &ApiClient, group_id: i64, post_id: i64) -> Result<Post, ApiError> {
        api.get_json(&format!("/groups/{}/posts/{}/", group_id, post_id))
            .await
    }

    pub async fn update_post(
        api: &ApiClient,
        group_id: i64,
        post_id: i64,
        edit: &PostEdit,
    ) -> Result<Post, ApiError> {
        let mut form = Form::new()
            .text("title", edit.title.clone())
            .text("content", edit.content.clone())
            // An empty value clears a previously set deadline.
            .text("deadline", edit.deadline.clone().unwrap_or_default());
        if !edit.file_ids_to_delete.is_empty() {
            let ids = serde_json::to_string(&edit.file_ids_to_delete)
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            form = form.text("file_ids_to_delete", ids);
        }
        let form = attach_files(form, &edit.files).await?;
        api.patch_multipart(&format!("/groups/{}/posts/{}/", group_id, post_id), form)
            .await
    }

    pub async fn delete_post(api: &ApiClient, group_id: i64, post_id: i64) -> Result<(), ApiError> {
        api.delete_unit(&format!("/groups/{}/posts/{}/", group_id, post_id))
            .await
    }

    pub async fn add_comment(
        api: &ApiClient,
        group_id: i64,
        post_id: i64,
        text: &str,
        parent: Option<i64>,
    ) -> Result<Comment, ApiError> {
        api.post_json(
            &format!("/groups/{}/posts/{}/comments/", group_id, post_id),
            &CommentRequest { text, parent },
        )
        .await
    }

    pub async fn delete_comment(
        api: &ApiClient,
        group_id: i64,
        post_id: i64,
        comment_id: i64,
    ) -> Result<(), ApiError> {
        api.delete_unit(&format!(
            "/groups/{}/posts/{}/comments/{}/",
            group_id, post_id, comment_id
        ))
        .await
    }
}
