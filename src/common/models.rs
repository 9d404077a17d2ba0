// Domain models for the TaskTalk REST API. The backend owns these entities;
// the client holds transient denormalized copies parsed from JSON.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Platform-wide user role. The backend serializes roles as lowercase
/// strings; gating points match on this enum exhaustively so an unhandled
/// role cannot slip through as a silent fallback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        }
    }

    /// Sort rank for group cards: admin groups first, then teacher, then student.
    pub fn rank(&self) -> u8 {
        match self {
            Role::Admin => 0,
            Role::Teacher => 1,
            Role::Student => 2,
        }
    }
}

/// A group as seen from a user profile, with the role the profile owner
/// holds in it. The backend sends `role: null` for stale memberships.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// The authenticated user, as returned by login/registration and the
/// profile endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub groups: Vec<UserGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupMember {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub info: String,
    #[serde(rename = "adminId")]
    pub admin_id: i64,
    #[serde(default)]
    pub members: Vec<GroupMember>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Group {
    /// Role of `user_id` relative to this group. Exactly one admin exists
    /// per group, identified by `admin_id`; everyone else is a teacher or a
    /// student member.
    pub fn role_of(&self, user_id: i64) -> Role {
        if self.admin_id == user_id {
            return Role::Admin;
        }
        if self
            .members
            .iter()
            .any(|m| m.id == user_id && m.role == Role::Teacher)
        {
            Role::Teacher
        } else {
            Role::Student
        }
    }

    /// Posts newest first. `created_at` is an ISO timestamp, so the string
    /// order is the chronological order.
    pub fn sorted_posts(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostFile {
    pub id: i64,
    /// Backend-relative or absolute URL of the stored file.
    pub file: String,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

impl PostFile {
    /// Display name: the last path segment of the stored URL.
    pub fn file_name(&self) -> &str {
        self.file
            .rsplit('/')
            .find(|s| !s.is_empty())
            .unwrap_or("file")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub created_at: String,
    pub author: i64,
    pub author_name: String,
    /// Display label for the author's role; empty for students.
    #[serde(default)]
    pub author_role: Option<String>,
    /// Another comment of the same post. The referenced comment may have
    /// been deleted, so lookups must tolerate a dangling id.
    #[serde(default)]
    pub parent: Option<i64>,
}

impl Comment {
    /// First 40 characters of the text, ellipsized. Used when a reply shows
    /// an excerpt of its parent.
    pub fn excerpt(&self) -> String {
        let mut out: String = self.text.chars().take(40).collect();
        if self.text.chars().count() > 40 {
            out.push('…');
        }
        out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// `YYYY-MM-DD`; compared lexicographically (fixed-width ISO form).
    #[serde(default)]
    pub deadline: Option<String>,
    pub author: i64,
    #[serde(default)]
    pub author_name: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub files: Vec<PostFile>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotifType {
    Invite,
    Exclude,
    Reminder,
}

/// Notification status. Invitations move `Pending -> Accepted | Declined`;
/// the backend marks everything else `Viewed` once the notifications page
/// has been opened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotifStatus {
    Pending,
    Accepted,
    Declined,
    Viewed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteAction {
    Accept,
    Decline,
}

impl InviteAction {
    pub fn path_segment(&self) -> &'static str {
        match self {
            InviteAction::Accept => "accept",
            InviteAction::Decline => "decline",
        }
    }
}

impl NotifStatus {
    /// Invitation state machine: `Pending` moves to the terminal state
    /// matching the action; terminal states absorb every further action.
    pub fn apply(self, action: InviteAction) -> NotifStatus {
        match self {
            NotifStatus::Pending => match action {
                InviteAction::Accept => NotifStatus::Accepted,
                InviteAction::Decline => NotifStatus::Declined,
            },
            terminal => terminal,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, NotifStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: i64,
    pub notif_type: NotifType,
    #[serde(default)]
    pub from_user_name: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub post_title: Option<String>,
    /// Reminder fields, `YYYY-MM-DD`.
    #[serde(default)]
    pub deadline_date: Option<String>,
    #[serde(default)]
    pub current_date: Option<String>,
    pub status: NotifStatus,
    pub created_at: String,
    #[serde(default)]
    pub message: String,
}

impl Notification {
    /// A reminder is overdue when its deadline is strictly before the
    /// backend-reported current date (ISO string comparison).
    pub fn is_overdue(&self) -> bool {
        match (&self.deadline_date, &self.current_date) {
            (Some(deadline), Some(current)) => deadline < current,
            _ => false,
        }
    }
}

/// Badge count shown on most pages: unresolved notifications only.
pub fn pending_count(notifications: &[Notification]) -> u32 {
    notifications
        .iter()
        .filter(|n| n.status.is_pending())
        .count() as u32
}

/// Post-page variant of the badge count: exclusions stay counted even once
/// their status has been resolved.
pub fn pending_or_exclude_count(notifications: &[Notification]) -> u32 {
    notifications
        .iter()
        .filter(|n| n.status.is_pending() || n.notif_type == NotifType::Exclude)
        .count() as u32
}

/// An attachment queued for upload, identified by (name, size) for
/// client-side deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl PendingFile {
    pub fn from_path(raw: &str) -> Result<Self, String> {
        let path = PathBuf::from(raw.trim());
        let meta = std::fs::metadata(&path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        if !meta.is_file() {
            return Err(format!("{} is not a file", path.display()));
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment")
            .to_string();
        Ok(Self {
            path,
            name,
            size: meta.len(),
        })
    }
}

/// Adds `file` to the pending list unless an attachment with the same name
/// and size is already queued. Returns whether the file was added.
pub fn push_attachment(files: &mut Vec<PendingFile>, file: PendingFile) -> bool {
    if files
        .iter()
        .any(|f| f.name == file.name && f.size == file.size)
    {
        return false;
    }
    files.push(file);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn member(id: i64, role: Role) -> GroupMember {
        GroupMember {
            id,
            name: format!("User {}", id),
            role,
        }
    }

    fn group_with(admin_id: i64, members: Vec<GroupMember>) -> Group {
        Group {
            id: 1,
            name: "Algebra".into(),
            info: String::new(),
            admin_id,
            members,
            posts: vec![],
            created_at: None,
        }
    }

    fn invite(id: i64, status: NotifStatus) -> Notification {
        Notification {
            id,
            notif_type: NotifType::Invite,
            from_user_name: None,
            group_name: None,
            post_title: None,
            deadline_date: None,
            current_date: None,
            status,
            created_at: "2024-01-01T00:00:00Z".into(),
            message: String::new(),
        }
    }

    #[test]
    fn role_derivation_prefers_admin_over_membership() {
        let group = group_with(7, vec![member(7, Role::Admin), member(3, Role::Teacher)]);
        assert_eq!(group.role_of(7), Role::Admin);
        assert_eq!(group.role_of(3), Role::Teacher);
        // Anyone else falls back to student.
        assert_eq!(group.role_of(42), Role::Student);
    }

    #[test]
    fn invite_transitions_are_monotonic() {
        assert_eq!(
            NotifStatus::Pending.apply(InviteAction::Accept),
            NotifStatus::Accepted
        );
        assert_eq!(
            NotifStatus::Pending.apply(InviteAction::Decline),
            NotifStatus::Declined
        );
        // Terminal states absorb further actions in either direction.
        assert_eq!(
            NotifStatus::Accepted.apply(InviteAction::Decline),
            NotifStatus::Accepted
        );
        assert_eq!(
            NotifStatus::Declined.apply(InviteAction::Accept),
            NotifStatus::Declined
        );
    }

    #[test]
    fn badge_counts_follow_the_page_predicates() {
        let mut excluded = invite(3, NotifStatus::Viewed);
        excluded.notif_type = NotifType::Exclude;
        let notifications = vec![
            invite(1, NotifStatus::Pending),
            invite(2, NotifStatus::Accepted),
            excluded,
        ];
        assert_eq!(pending_count(&notifications), 1);
        assert_eq!(pending_or_exclude_count(&notifications), 2);
    }

    #[test]
    fn attachments_dedup_on_name_and_size() {
        let mut files = Vec::new();
        let a = PendingFile {
            path: "/tmp/report.pdf".into(),
            name: "report.pdf".into(),
            size: 1024,
        };
        let mut same = a.clone();
        same.path = "/home/user/report.pdf".into();
        let mut other = a.clone();
        other.size = 2048;

        assert!(push_attachment(&mut files, a));
        assert!(!push_attachment(&mut files, same));
        assert!(push_attachment(&mut files, other));
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn post_file_display_name_is_last_segment() {
        let f = PostFile {
            id: 1,
            file: "/media/uploads/homework.docx".into(),
            uploaded_at: None,
        };
        assert_eq!(f.file_name(), "homework.docx");
    }

    #[test]
    fn comment_excerpt_ellipsizes_at_40_chars() {
        let short = Comment {
            id: 1,
            text: "ok".into(),
            created_at: String::new(),
            author: 1,
            author_name: "A".into(),
            author_role: None,
            parent: None,
        };
        assert_eq!(short.excerpt(), "ok");

        let mut long = short.clone();
        long.text = "x".repeat(41);
        assert_eq!(long.excerpt().chars().count(), 41);
        assert!(long.excerpt().ends_with('…'));

        // Multi-byte text must not split a character.
        let mut cyrillic = short.clone();
        cyrillic.text = "показатель ".repeat(8);
        assert_eq!(cyrillic.excerpt().chars().count(), 41);
    }

    #[test]
    fn posts_sort_newest_first() {
        let mut group = group_with(1, vec![]);
        let post = |id: i64, ts: &str| Post {
            id,
            title: format!("post {}", id),
            content: String::new(),
            deadline: None,
            author: 1,
            author_name: None,
            created_at: ts.into(),
            updated_at: None,
            files: vec![],
            comments: vec![],
        };
        group.posts = vec![
            post(1, "2024-03-01T10:00:00Z"),
            post(2, "2024-05-01T10:00:00Z"),
            post(3, "2024-04-01T10:00:00Z"),
        ];
        let ids: Vec<i64> = group.sorted_posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn reminder_overdue_uses_string_date_order() {
        let mut n = invite(1, NotifStatus::Pending);
        n.notif_type = NotifType::Reminder;
        n.deadline_date = Some("2024-05-01".into());
        n.current_date = Some("2024-05-02".into());
        assert!(n.is_overdue());
        n.current_date = Some("2024-05-01".into());
        assert!(!n.is_overdue());
        n.current_date = None;
        assert!(!n.is_overdue());
    }

    #[test]
    fn group_json_round_trip_matches_backend_shape() {
        let json = r#"{
            "id": 5,
            "name": "Physics",
            "info": "Weekly tasks",
            "admin": "Ivanov I.",
            "adminId": 7,
            "teachers": [],
            "students": [],
            "members": [
                {"id": 7, "name": "Ivanov I.", "role": "admin"},
                {"id": 3, "name": "Petrov P.", "role": "teacher"}
            ],
            "posts": [],
            "created_at": "2024-01-10T12:00:00Z"
        }"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.admin_id, 7);
        assert_eq!(group.members.len(), 2);
        assert_eq!(group.role_of(3), Role::Teacher);
    }
}
