use iced_aw::date_picker::Date;

use crate::client::services::session::SessionEvent;
use crate::common::models::{Group, GroupMember, InviteAction, Notification, Post, Role, User};

#[derive(Debug, Clone)]
pub enum Message {
    NoOp,
    /// Pumped from the session store's event channel.
    SessionEvent(SessionEvent),

    // Navigation
    OpenHome,
    OpenLogin,
    OpenRoleSelect,
    OpenRegister { role: Role },
    OpenProfile { user_id: Option<i64> },
    OpenGroups,
    OpenGroupDetail { group_id: i64 },
    OpenPostDetail { group_id: i64, post_id: i64 },
    OpenNotifications,
    /// Bell icon: optimistic badge reset plus navigation.
    BellClicked,

    /// A page-mount notification fetch resolved into a badge count.
    NotifCountFetched { count: u32 },

    // Home
    ShuffleTile(usize),

    // Login
    LoginEmailChanged(String),
    LoginPasswordChanged(String),
    LoginSubmit,
    /// Shared by login and registration.
    AuthResult { user: Option<User>, error: Option<String> },

    // Registration
    RegLastNameChanged(String),
    RegFirstNameChanged(String),
    RegMiddleNameChanged(String),
    RegEmailChanged(String),
    RegPasswordChanged(String),
    RegPassword2Changed(String),
    RegisterSubmit,

    // Profile
    ProfileLoaded { profile: Option<User>, error: Option<String> },
    ProfileEdit,
    ProfileCancelEdit,
    ProfileAboutChanged(String),
    ProfileSave,
    ProfileSaved { profile: Option<User>, error: Option<String> },
    Logout,

    // Groups list
    GroupsLoaded { groups: Vec<Group>, error: Option<String> },
    ShowCreateGroup(bool),
    CreateGroupNameChanged(String),
    CreateGroupInfoChanged(String),
    CreateGroupSubmit,
    GroupCreated { group: Option<Group>, error: Option<String> },
    AskDeleteGroup { group_id: i64, name: String },
    CancelDeleteGroup,
    ConfirmDeleteGroup,
    GroupDeleted { group_id: i64, error: Option<String> },

    // Group detail
    GroupLoaded { group: Option<Group>, error: Option<String> },
    ShowCreatePost(bool),
    PostTitleChanged(String),
    PostContentChanged(String),
    ChooseDeadline,
    CancelDeadline,
    SubmitDeadline(Date),
    ClearDeadline,
    FilePathInputChanged(String),
    AttachFile,
    RemovePendingFile(usize),
    CreatePostSubmit,
    PostCreated { post: Option<Post>, error: Option<String> },
    EnterMassDelete,
    CancelMassDelete,
    TogglePostSelected(i64),
    ShowConfirmDelete(bool),
    ConfirmDeleteSelected,
    PostsDeleted { deleted: Vec<i64>, failed: usize },
    ShowInviteModal(bool),
    InviteEmailChanged(String),
    InviteSubmit,
    InviteResult { error: Option<String>, email: String },
    CloseInviteModal,
    AskExcludeMember(GroupMember),
    CancelExclude,
    ConfirmExclude,
    ExcludeResult { error: Option<String> },
    ShowLeaveModal(bool),
    ConfirmLeave,
    LeaveResult { error: Option<String> },

    // Post detail
    PostLoaded { post: Option<Post>, error: Option<String> },
    CommentInputChanged(String),
    ReplyToComment { comment_id: i64, author_name: String },
    CancelReply,
    SubmitComment,
    CommentSaved { error: Option<String> },
    DeleteComment { comment_id: i64 },
    CommentDeleted { error: Option<String> },
    EnterEditPost,
    CancelEditPost,
    EditTitleChanged(String),
    EditContentChanged(String),
    EditChooseDeadline,
    EditCancelDeadline,
    EditSubmitDeadline(Date),
    EditClearDeadline,
    EditFilePathChanged(String),
    EditAttachFile,
    EditRemovePendingFile(usize),
    MarkFileForDelete(i64),
    UnmarkFileForDelete(i64),
    EditPostSubmit,
    PostUpdated { post: Option<Post>, error: Option<String> },

    // Notifications
    NotificationsLoaded { notifications: Vec<Notification>, error: Option<String> },
    MarkViewedDone { ok: bool },
    InviteActionTriggered { notif_id: i64, action: InviteAction },
    InviteActionDone { notif_id: i64, action: InviteAction, error: Option<String> },
    DismissReminder { notif_id: i64 },
    ReminderDismissed { notif_id: i64, error: Option<String> },
}
