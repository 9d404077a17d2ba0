use std::collections::HashSet;
use std::sync::Arc;

use iced::Command;
use iced_aw::date_picker::Date;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::client::models::messages::Message;
use crate::client::services::api_client::{ApiClient, ApiError};
use crate::client::services::auth_service::{AuthService, RegisterForm};
use crate::client::services::group_service::GroupService;
use crate::client::services::notification_service::NotificationService;
use crate::client::services::post_service::{PostDraft, PostEdit, PostService};
use crate::client::services::session::{SessionEvent, SessionStore};
use crate::common::models::{
    pending_count, pending_or_exclude_count, push_attachment, Group, GroupMember, InviteAction,
    Notification, PendingFile, Post, Role, User,
};
use crate::common::validate::{deadline_in_past, is_valid_email, today_ymd};

/// The current page. Unauthenticated viewers are bounced away from
/// protected routes at entry time; there is no per-request 401 handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Login,
    RoleSelect,
    Register,
    Profile {
        /// `None` means the own profile.
        user_id: Option<i64>,
    },
    Groups,
    GroupDetail {
        group_id: i64,
    },
    PostDetail {
        group_id: i64,
        post_id: i64,
    },
    Notifications,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub route: Route,
    // Mirror of the session store, refreshed on session events.
    pub user: Option<User>,
    pub notif_count: u32,

    // Home
    pub tile_phrases: [usize; 4],

    // Login
    pub login_email: String,
    pub login_password: String,
    pub login_error: Option<String>,
    pub auth_loading: bool,

    // Registration
    pub register_role: Option<Role>,
    pub reg_last_name: String,
    pub reg_first_name: String,
    pub reg_middle_name: String,
    pub reg_email: String,
    pub reg_password: String,
    pub reg_password2: String,
    pub register_error: Option<String>,

    // Profile
    pub profile: Option<User>,
    pub profile_loading: bool,
    pub profile_error: Option<String>,
    pub profile_editing: bool,
    pub profile_about_draft: String,

    // Groups list
    pub groups: Vec<Group>,
    pub groups_loading: bool,
    pub groups_error: Option<String>,
    pub show_create_group: bool,
    pub create_group_name: String,
    pub create_group_info: String,
    pub create_group_error: Option<String>,
    pub group_to_delete: Option<(i64, String)>,

    // Group detail
    pub group: Option<Group>,
    pub group_loading: bool,
    pub group_error: Option<String>,
    pub show_create_post: bool,
    pub post_title: String,
    pub post_content: String,
    pub post_deadline: Option<String>,
    pub deadline_error: Option<String>,
    pub show_deadline_picker: bool,
    pub pending_files: Vec<PendingFile>,
    pub file_path_input: String,
    pub create_post_error: Option<String>,
    pub mass_delete_mode: bool,
    pub selected_posts: HashSet<i64>,
    pub show_confirm_delete: bool,
    pub deleting: bool,
    pub show_invite_modal: bool,
    pub invite_email: String,
    pub invite_error: Option<String>,
    pub invite_success: Option<String>,
    pub member_to_exclude: Option<GroupMember>,
    pub show_leave_modal: bool,

    // Post detail
    pub post: Option<Post>,
    pub post_loading: bool,
    pub post_error: Option<String>,
    pub comment_input: String,
    pub reply_to: Option<i64>,
    pub edit_mode: bool,
    pub edit_title: String,
    pub edit_content: String,
    pub edit_deadline: Option<String>,
    pub edit_deadline_error: Option<String>,
    pub show_edit_deadline_picker: bool,
    pub edit_files: Vec<PendingFile>,
    pub edit_file_path_input: String,
    pub files_to_delete: Vec<i64>,
    pub edit_error: Option<String>,

    // Notifications
    pub notifications: Vec<Notification>,
    pub notif_loading: bool,
    pub notif_error: Option<String>,
    /// In-flight invite action; disables the matching button.
    pub action_loading: Option<(i64, InviteAction)>,
}

/// Four distinct phrase indexes for the home tiles.
pub fn initial_tiles() -> [usize; 4] {
    let count = crate::client::gui::views::home::MOTIVATION_PHRASES.len();
    let mut indexes: Vec<usize> = (0..count).collect();
    indexes.shuffle(&mut rand::thread_rng());
    [indexes[0], indexes[1], indexes[2], indexes[3]]
}

/// Maps an `Option<String>` deadline to what the date picker shows.
pub fn picker_date(value: &Option<String>) -> Date {
    if let Some(s) = value {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() == 3 {
            if let (Ok(y), Ok(m), Ok(d)) = (parts[0].parse(), parts[1].parse(), parts[2].parse()) {
                return Date::from_ymd(y, m, d);
            }
        }
    }
    Date::today()
}

pub fn ymd_string(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year, date.month, date.day)
}

/// Pulls a message out of the backend's JSON error body, falling back to a
/// generic banner text.
fn backend_error(err: &ApiError, fallback: &str) -> String {
    if let Some(body) = err.body() {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            for key in ["error", "detail"] {
                if let Some(msg) = value.get(key).and_then(|m| m.as_str()) {
                    return msg.to_string();
                }
            }
            if let Some(msg) = value
                .get("non_field_errors")
                .and_then(|e| e.as_array())
                .and_then(|a| a.first())
                .and_then(|m| m.as_str())
            {
                return msg.to_string();
            }
        }
    }
    fallback.to_string()
}

/// Profile-save errors: the duplicate-email responses get a friendly text.
fn profile_error_text(err: &ApiError) -> String {
    if let Some(body) = err.body() {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(msg) = value
                .get("email")
                .and_then(|e| e.as_array())
                .and_then(|a| a.first())
                .and_then(|m| m.as_str())
            {
                let duplicates = [
                    "This field must be unique.",
                    "user with this email already exists.",
                    "A user with that email already exists.",
                ];
                if duplicates.contains(&msg) {
                    return "A user with this email already exists".to_string();
                }
                return msg.to_string();
            }
        }
    }
    backend_error(err, "Failed to save the profile")
}

fn fetch_notif_count(api: &Arc<ApiClient>, include_exclude: bool) -> Command<Message> {
    if !api.session().is_authenticated() {
        return Command::none();
    }
    let api = api.clone();
    Command::perform(
        async move {
            match NotificationService::fetch_all(&api).await {
                Ok(list) => {
                    let count = if include_exclude {
                        pending_or_exclude_count(&list)
                    } else {
                        pending_count(&list)
                    };
                    Message::NotifCountFetched { count }
                }
                Err(e) => {
                    log::warn!("failed to fetch notifications: {}", e);
                    Message::NotifCountFetched { count: 0 }
                }
            }
        },
        |msg| msg,
    )
}

/// The detail page loads the group out of the my-groups listing, the same
/// way the groups page does.
fn fetch_group(api: &Arc<ApiClient>, group_id: i64) -> Command<Message> {
    let api = api.clone();
    Command::perform(
        async move {
            match GroupService::my_groups(&api).await {
                Ok(groups) => Message::GroupLoaded {
                    group: groups.into_iter().find(|g| g.id == group_id),
                    error: None,
                },
                Err(e) => {
                    log::warn!("failed to load group {}: {}", group_id, e);
                    Message::GroupLoaded {
                        group: None,
                        error: Some("Failed to load the group".to_string()),
                    }
                }
            }
        },
        |msg| msg,
    )
}

fn fetch_post(api: &Arc<ApiClient>, group_id: i64, post_id: i64) -> Command<Message> {
    let api = api.clone();
    Command::perform(
        async move {
            match PostService::fetch_post(&api, group_id, post_id).await {
                Ok(post) => Message::PostLoaded {
                    post: Some(post),
                    error: None,
                },
                Err(e) => {
                    log::warn!("failed to load post {}: {}", post_id, e);
                    Message::PostLoaded {
                        post: None,
                        error: Some("Failed to load the post".to_string()),
                    }
                }
            }
        },
        |msg| msg,
    )
}

impl AppState {
    fn reset_group_detail(&mut self) {
        self.group = None;
        self.group_error = None;
        self.show_create_post = false;
        self.post_title.clear();
        self.post_content.clear();
        self.post_deadline = None;
        self.deadline_error = None;
        self.show_deadline_picker = false;
        self.pending_files.clear();
        self.file_path_input.clear();
        self.create_post_error = None;
        self.mass_delete_mode = false;
        self.selected_posts.clear();
        self.show_confirm_delete = false;
        self.deleting = false;
        self.show_invite_modal = false;
        self.invite_email.clear();
        self.invite_error = None;
        self.invite_success = None;
        self.member_to_exclude = None;
        self.show_leave_modal = false;
    }

    fn reset_post_detail(&mut self) {
        self.post = None;
        self.post_error = None;
        self.comment_input.clear();
        self.reply_to = None;
        self.edit_mode = false;
        self.edit_title.clear();
        self.edit_content.clear();
        self.edit_deadline = None;
        self.edit_deadline_error = None;
        self.show_edit_deadline_picker = false;
        self.edit_files.clear();
        self.edit_file_path_input.clear();
        self.files_to_delete.clear();
        self.edit_error = None;
    }

    pub fn update(
        &mut self,
        message: Message,
        api: &Arc<ApiClient>,
        session: &Arc<SessionStore>,
    ) -> Command<Message> {
        match message {
            Message::NoOp => {}
            Message::SessionEvent(event) => match event {
                SessionEvent::NotifCountChanged(count) => self.notif_count = count,
                SessionEvent::SessionChanged => self.user = session.user(),
                SessionEvent::SessionCleared => {
                    self.user = None;
                    self.notif_count = 0;
                }
            },

            // ── Navigation ────────────────────────────────────────────────
            Message::OpenHome => {
                self.route = Route::Home;
                return fetch_notif_count(api, false);
            }
            Message::OpenLogin => {
                self.route = Route::Login;
                self.login_email.clear();
                self.login_password.clear();
                self.login_error = None;
            }
            Message::OpenRoleSelect => {
                self.route = Route::RoleSelect;
            }
            Message::OpenRegister { role } => {
                // Only students and teachers self-register.
                match role {
                    Role::Student | Role::Teacher => {
                        self.route = Route::Register;
                        self.register_role = Some(role);
                        self.reg_last_name.clear();
                        self.reg_first_name.clear();
                        self.reg_middle_name.clear();
                        self.reg_email.clear();
                        self.reg_password.clear();
                        self.reg_password2.clear();
                        self.register_error = None;
                    }
                    Role::Admin => {
                        self.route = Route::RoleSelect;
                    }
                }
            }
            Message::OpenProfile { user_id } => {
                let Some(current) = &self.user else {
                    self.route = Route::Login;
                    return Command::none();
                };
                let target = user_id.unwrap_or(current.id);
                self.route = Route::Profile { user_id };
                self.profile = None;
                self.profile_loading = true;
                self.profile_error = None;
                self.profile_editing = false;
                let api_clone = api.clone();
                return Command::batch([
                    Command::perform(
                        async move {
                            match AuthService::fetch_profile(&api_clone, target).await {
                                Ok(profile) => Message::ProfileLoaded {
                                    profile: Some(profile),
                                    error: None,
                                },
                                Err(e) => {
                                    log::warn!("failed to load profile {}: {}", target, e);
                                    Message::ProfileLoaded {
                                        profile: None,
                                        error: Some("Failed to load the profile".to_string()),
                                    }
                                }
                            }
                        },
                        |msg| msg,
                    ),
                    fetch_notif_count(api, false),
                ]);
            }
            Message::OpenGroups => {
                self.route = Route::Groups;
                self.show_create_group = false;
                self.create_group_error = None;
                self.group_to_delete = None;
                if self.user.is_none() {
                    return Command::none();
                }
                self.groups_loading = true;
                self.groups_error = None;
                let api_clone = api.clone();
                return Command::batch([
                    Command::perform(
                        async move {
                            match GroupService::my_groups(&api_clone).await {
                                Ok(groups) => Message::GroupsLoaded {
                                    groups,
                                    error: None,
                                },
                                Err(e) => {
                                    log::warn!("failed to load groups: {}", e);
                                    Message::GroupsLoaded {
                                        groups: vec![],
                                        error: Some("Failed to load groups".to_string()),
                                    }
                                }
                            }
                        },
                        |msg| msg,
                    ),
                    fetch_notif_count(api, false),
                ]);
            }
            Message::OpenGroupDetail { group_id } => {
                self.route = Route::GroupDetail { group_id };
                self.reset_group_detail();
                self.group_loading = true;
                return Command::batch([fetch_group(api, group_id), fetch_notif_count(api, false)]);
            }
            Message::OpenPostDetail { group_id, post_id } => {
                self.route = Route::PostDetail { group_id, post_id };
                self.reset_post_detail();
                self.post_loading = true;
                // This page also counts exclusion notices in its badge.
                return Command::batch([
                    fetch_post(api, group_id, post_id),
                    fetch_notif_count(api, true),
                ]);
            }
            Message::BellClicked => {
                // Optimistic: the badge goes to zero before the backend
                // confirms anything.
                self.notif_count = 0;
                return self.update(Message::OpenNotifications, api, session);
            }
            Message::OpenNotifications => {
                self.route = Route::Notifications;
                self.notif_loading = true;
                self.notif_error = None;
                self.action_loading = None;
                let list_api = api.clone();
                let mark_api = api.clone();
                return Command::batch([
                    Command::perform(
                        async move {
                            match NotificationService::fetch_all(&list_api).await {
                                Ok(notifications) => Message::NotificationsLoaded {
                                    notifications,
                                    error: None,
                                },
                                Err(e) => {
                                    log::warn!("failed to load notifications: {}", e);
                                    Message::NotificationsLoaded {
                                        notifications: vec![],
                                        error: Some("Failed to load notifications".to_string()),
                                    }
                                }
                            }
                        },
                        |msg| msg,
                    ),
                    Command::perform(
                        async move {
                            let ok = match NotificationService::mark_viewed(&mark_api).await {
                                Ok(()) => true,
                                Err(e) => {
                                    // Known limitation: the optimistic zero
                                    // is not rolled back on failure.
                                    log::warn!("mark_viewed failed: {}", e);
                                    false
                                }
                            };
                            Message::MarkViewedDone { ok }
                        },
                        |msg| msg,
                    ),
                ]);
            }
            Message::NotifCountFetched { count } => {
                session.set_notif_count(count);
                self.notif_count = count;
            }

            // ── Home ──────────────────────────────────────────────────────
            Message::ShuffleTile(tile) => {
                let phrase_count = crate::client::gui::views::home::MOTIVATION_PHRASES.len();
                let used = self.tile_phrases;
                let available: Vec<usize> =
                    (0..phrase_count).filter(|i| !used.contains(i)).collect();
                if available.is_empty() {
                    return Command::none();
                }
                let pick = available[rand::thread_rng().gen_range(0..available.len())];
                self.tile_phrases[tile] = pick;
            }

            // ── Login ─────────────────────────────────────────────────────
            Message::LoginEmailChanged(email) => self.login_email = email,
            Message::LoginPasswordChanged(password) => self.login_password = password,
            Message::LoginSubmit => {
                if self.auth_loading {
                    return Command::none();
                }
                if self.login_email.trim().is_empty() || self.login_password.is_empty() {
                    self.login_error = Some("Enter your email and password".to_string());
                    return Command::none();
                }
                self.auth_loading = true;
                self.login_error = None;
                let api_clone = api.clone();
                let email = self.login_email.trim().to_string();
                let password = self.login_password.clone();
                return Command::perform(
                    async move {
                        match AuthService::login(&api_clone, &email, &password).await {
                            Ok(user) => Message::AuthResult {
                                user: Some(user),
                                error: None,
                            },
                            Err(e) => Message::AuthResult {
                                user: None,
                                error: Some(backend_error(&e, "Login failed")),
                            },
                        }
                    },
                    |msg| msg,
                );
            }
            Message::AuthResult { user, error } => {
                self.auth_loading = false;
                match user {
                    Some(user) => {
                        self.user = Some(user);
                        self.login_password.clear();
                        self.reg_password.clear();
                        self.reg_password2.clear();
                        return self.update(Message::OpenProfile { user_id: None }, api, session);
                    }
                    None => {
                        let text = error.unwrap_or_else(|| "Authentication failed".to_string());
                        if self.route == Route::Login {
                            self.login_error = Some(text);
                        } else {
                            self.register_error = Some(text);
                        }
                    }
                }
            }

            // ── Registration ──────────────────────────────────────────────
            Message::RegLastNameChanged(value) => self.reg_last_name = value,
            Message::RegFirstNameChanged(value) => self.reg_first_name = value,
            Message::RegMiddleNameChanged(value) => self.reg_middle_name = value,
            Message::RegEmailChanged(value) => self.reg_email = value,
            Message::RegPasswordChanged(value) => self.reg_password = value,
            Message::RegPassword2Changed(value) => self.reg_password2 = value,
            Message::RegisterSubmit => {
                if self.auth_loading {
                    return Command::none();
                }
                let Some(role) = self.register_role else {
                    self.route = Route::RoleSelect;
                    return Command::none();
                };
                if self.reg_last_name.trim().is_empty()
                    || self.reg_first_name.trim().is_empty()
                    || self.reg_email.trim().is_empty()
                    || self.reg_password.is_empty()
                {
                    self.register_error = Some("Fill in all required fields".to_string());
                    return Command::none();
                }
                if !is_valid_email(self.reg_email.trim()) {
                    self.register_error = Some("Enter a valid email address".to_string());
                    return Command::none();
                }
                if self.reg_password != self.reg_password2 {
                    self.register_error = Some("Passwords do not match".to_string());
                    return Command::none();
                }
                self.auth_loading = true;
                self.register_error = None;
                let form = RegisterForm {
                    first_name: self.reg_first_name.trim().to_string(),
                    last_name: self.reg_last_name.trim().to_string(),
                    middle_name: self.reg_middle_name.trim().to_string(),
                    email: self.reg_email.trim().to_string(),
                    password: self.reg_password.clone(),
                    password2: self.reg_password2.clone(),
                    role,
                };
                let api_clone = api.clone();
                return Command::perform(
                    async move {
                        match AuthService::register(&api_clone, &form).await {
                            Ok(user) => Message::AuthResult {
                                user: Some(user),
                                error: None,
                            },
                            Err(e) => Message::AuthResult {
                                user: None,
                                error: Some(backend_error(&e, "Registration failed")),
                            },
                        }
                    },
                    |msg| msg,
                );
            }

            // ── Profile ───────────────────────────────────────────────────
            Message::ProfileLoaded { profile, error } => {
                self.profile_loading = false;
                self.profile_error = error;
                if let Some(profile) = &profile {
                    self.profile_about_draft = profile.about.clone().unwrap_or_default();
                }
                self.profile = profile;
            }
            Message::ProfileEdit => {
                if let Some(profile) = &self.profile {
                    self.profile_editing = true;
                    self.profile_about_draft = profile.about.clone().unwrap_or_default();
                }
            }
            Message::ProfileCancelEdit => {
                self.profile_editing = false;
                self.profile_error = None;
                if let Some(profile) = &self.profile {
                    self.profile_about_draft = profile.about.clone().unwrap_or_default();
                }
            }
            Message::ProfileAboutChanged(value) => self.profile_about_draft = value,
            Message::ProfileSave => {
                let Some(profile) = &self.profile else {
                    return Command::none();
                };
                if !is_valid_email(&profile.email) {
                    self.profile_error = Some("Invalid email".to_string());
                    return Command::none();
                }
                let api_clone = api.clone();
                let email = profile.email.clone();
                let about = self.profile_about_draft.clone();
                return Command::perform(
                    async move {
                        match AuthService::update_profile(&api_clone, &email, &about).await {
                            Ok(profile) => Message::ProfileSaved {
                                profile: Some(profile),
                                error: None,
                            },
                            Err(e) => Message::ProfileSaved {
                                profile: None,
                                error: Some(profile_error_text(&e)),
                            },
                        }
                    },
                    |msg| msg,
                );
            }
            Message::ProfileSaved { profile, error } => match profile {
                Some(profile) => {
                    self.profile = Some(profile);
                    self.profile_editing = false;
                    self.profile_error = None;
                }
                None => self.profile_error = error,
            },
            Message::Logout => {
                let api_clone = api.clone();
                self.user = None;
                self.notif_count = 0;
                self.profile = None;
                self.route = Route::Home;
                return Command::perform(
                    async move {
                        AuthService::logout(&api_clone).await;
                        Message::NoOp
                    },
                    |msg| msg,
                );
            }

            // ── Groups list ───────────────────────────────────────────────
            Message::GroupsLoaded { groups, error } => {
                self.groups_loading = false;
                self.groups_error = error;
                self.groups = groups;
            }
            Message::ShowCreateGroup(show) => {
                self.show_create_group = show;
                self.create_group_error = None;
                if !show {
                    self.create_group_name.clear();
                    self.create_group_info.clear();
                }
            }
            Message::CreateGroupNameChanged(value) => self.create_group_name = value,
            Message::CreateGroupInfoChanged(value) => self.create_group_info = value,
            Message::CreateGroupSubmit => {
                if self.create_group_name.trim().is_empty() {
                    self.create_group_error = Some("The group needs a name".to_string());
                    return Command::none();
                }
                let api_clone = api.clone();
                let name = self.create_group_name.trim().to_string();
                let info = self.create_group_info.trim().to_string();
                return Command::perform(
                    async move {
                        match GroupService::create_group(&api_clone, &name, &info).await {
                            Ok(group) => Message::GroupCreated {
                                group: Some(group),
                                error: None,
                            },
                            Err(e) => {
                                log::warn!("failed to create group: {}", e);
                                Message::GroupCreated {
                                    group: None,
                                    error: Some("Failed to create the group".to_string()),
                                }
                            }
                        }
                    },
                    |msg| msg,
                );
            }
            Message::GroupCreated { group, error } => match group {
                Some(group) => {
                    self.groups.push(group);
                    self.show_create_group = false;
                    self.create_group_name.clear();
                    self.create_group_info.clear();
                    self.create_group_error = None;
                }
                None => self.create_group_error = error,
            },
            Message::AskDeleteGroup { group_id, name } => {
                self.group_to_delete = Some((group_id, name));
            }
            Message::CancelDeleteGroup => self.group_to_delete = None,
            Message::ConfirmDeleteGroup => {
                let Some((group_id, _)) = self.group_to_delete.clone() else {
                    return Command::none();
                };
                let api_clone = api.clone();
                return Command::perform(
                    async move {
                        match GroupService::delete_group(&api_clone, group_id).await {
                            Ok(()) => Message::GroupDeleted {
                                group_id,
                                error: None,
                            },
                            Err(e) => {
                                log::warn!("failed to delete group {}: {}", group_id, e);
                                Message::GroupDeleted {
                                    group_id,
                                    error: Some("Failed to delete the group".to_string()),
                                }
                            }
                        }
                    },
                    |msg| msg,
                );
            }
            Message::GroupDeleted { group_id, error } => {
                self.group_to_delete = None;
                match error {
                    None => self.groups.retain(|g| g.id != group_id),
                    Some(e) => self.groups_error = Some(e),
                }
            }

            // ── Group detail ──────────────────────────────────────────────
            Message::GroupLoaded { group, error } => {
                self.group_loading = false;
                self.group_error = error;
                self.group = group;
            }
            Message::ShowCreatePost(show) => {
                self.show_create_post = show;
                self.create_post_error = None;
                self.deadline_error = None;
                if !show {
                    self.post_title.clear();
                    self.post_content.clear();
                    self.post_deadline = None;
                    self.pending_files.clear();
                    self.file_path_input.clear();
                    self.show_deadline_picker = false;
                }
            }
            Message::PostTitleChanged(value) => self.post_title = value,
            Message::PostContentChanged(value) => self.post_content = value,
            Message::ChooseDeadline => self.show_deadline_picker = true,
            Message::CancelDeadline => self.show_deadline_picker = false,
            Message::SubmitDeadline(date) => {
                self.show_deadline_picker = false;
                let picked = ymd_string(date);
                // The picker enforces the minimum; this is the first of the
                // two checks (the second runs at submit).
                if deadline_in_past(&picked, &today_ymd()) {
                    self.deadline_error =
                        Some("The deadline cannot be earlier than today".to_string());
                } else {
                    self.deadline_error = None;
                    self.post_deadline = Some(picked);
                }
            }
            Message::ClearDeadline => {
                self.post_deadline = None;
                self.deadline_error = None;
            }
            Message::FilePathInputChanged(value) => self.file_path_input = value,
            Message::AttachFile => {
                if self.file_path_input.trim().is_empty() {
                    return Command::none();
                }
                match PendingFile::from_path(&self.file_path_input) {
                    Ok(file) => {
                        // Duplicates (same name and size) are dropped silently.
                        push_attachment(&mut self.pending_files, file);
                        self.file_path_input.clear();
                        self.create_post_error = None;
                    }
                    Err(e) => self.create_post_error = Some(e),
                }
            }
            Message::RemovePendingFile(index) => {
                if index < self.pending_files.len() {
                    self.pending_files.remove(index);
                }
            }
            Message::CreatePostSubmit => {
                self.create_post_error = None;
                self.deadline_error = None;
                if self.post_title.trim().is_empty() || self.post_content.trim().is_empty() {
                    self.create_post_error = Some("Title and content are required".to_string());
                    return Command::none();
                }
                if let Some(deadline) = &self.post_deadline {
                    // Submit-time re-check; nothing is sent for a past date.
                    if deadline_in_past(deadline, &today_ymd()) {
                        self.deadline_error =
                            Some("The deadline cannot be earlier than today".to_string());
                        return Command::none();
                    }
                }
                let Some(group) = &self.group else {
                    return Command::none();
                };
                let group_id = group.id;
                let draft = PostDraft {
                    title: self.post_title.trim().to_string(),
                    content: self.post_content.clone(),
                    deadline: self.post_deadline.clone(),
                    files: self.pending_files.clone(),
                };
                let api_clone = api.clone();
                return Command::perform(
                    async move {
                        match PostService::create_post(&api_clone, group_id, &draft).await {
                            Ok(post) => Message::PostCreated {
                                post: Some(post),
                                error: None,
                            },
                            Err(e) => {
                                log::warn!("failed to create post: {}", e);
                                Message::PostCreated {
                                    post: None,
                                    error: Some("Failed to create the post".to_string()),
                                }
                            }
                        }
                    },
                    |msg| msg,
                );
            }
            Message::PostCreated { post, error } => match post {
                Some(post) => {
                    if let Some(group) = &mut self.group {
                        group.posts.insert(0, post);
                    }
                    return self.update(Message::ShowCreatePost(false), api, session);
                }
                None => self.create_post_error = error,
            },
            Message::EnterMassDelete => {
                self.mass_delete_mode = true;
                self.selected_posts.clear();
            }
            Message::CancelMassDelete => {
                self.mass_delete_mode = false;
                self.selected_posts.clear();
                self.show_confirm_delete = false;
            }
            Message::TogglePostSelected(post_id) => {
                if !self.selected_posts.remove(&post_id) {
                    self.selected_posts.insert(post_id);
                }
            }
            Message::ShowConfirmDelete(show) => {
                if !self.deleting {
                    self.show_confirm_delete = show;
                }
            }
            Message::ConfirmDeleteSelected => {
                if self.deleting || self.selected_posts.is_empty() {
                    return Command::none();
                }
                let Some(group) = &self.group else {
                    return Command::none();
                };
                let group_id = group.id;
                self.deleting = true;
                let mut ids: Vec<i64> = self.selected_posts.iter().copied().collect();
                ids.sort_unstable();
                let api_clone = api.clone();
                return Command::perform(
                    async move {
                        // One request per id, strictly in sequence.
                        let mut deleted = Vec::new();
                        let mut failed = 0usize;
                        for id in ids {
                            match PostService::delete_post(&api_clone, group_id, id).await {
                                Ok(()) => deleted.push(id),
                                Err(e) => {
                                    log::warn!("failed to delete post {}: {}", id, e);
                                    failed += 1;
                                }
                            }
                        }
                        Message::PostsDeleted { deleted, failed }
                    },
                    |msg| msg,
                );
            }
            Message::PostsDeleted { deleted, failed } => {
                if let Some(group) = &mut self.group {
                    group.posts.retain(|p| !deleted.contains(&p.id));
                }
                self.selected_posts.clear();
                self.mass_delete_mode = false;
                self.show_confirm_delete = false;
                self.deleting = false;
                if failed > 0 {
                    self.group_error = Some(format!("Failed to delete {} post(s)", failed));
                }
            }
            Message::ShowInviteModal(show) => {
                self.show_invite_modal = show;
                self.invite_error = None;
                self.invite_success = None;
                if !show {
                    self.invite_email.clear();
                }
            }
            Message::InviteEmailChanged(value) => self.invite_email = value,
            Message::InviteSubmit => {
                self.invite_error = None;
                self.invite_success = None;
                let email = self.invite_email.trim().to_string();
                if !is_valid_email(&email) {
                    self.invite_error = Some("Enter a valid email address".to_string());
                    return Command::none();
                }
                let Some(group) = &self.group else {
                    return Command::none();
                };
                let group_id = group.id;
                let api_clone = api.clone();
                return Command::perform(
                    async move {
                        match GroupService::invite(&api_clone, group_id, &email).await {
                            Ok(()) => Message::InviteResult { error: None, email },
                            Err(e) => Message::InviteResult {
                                error: Some(backend_error(&e, "Failed to send the invitation")),
                                email,
                            },
                        }
                    },
                    |msg| msg,
                );
            }
            Message::InviteResult { error, email } => match error {
                None => {
                    self.invite_success = Some(format!("Invitation sent to {}", email));
                    return Command::perform(
                        async {
                            tokio::time::sleep(tokio::time::Duration::from_millis(1500)).await;
                            Message::CloseInviteModal
                        },
                        |msg| msg,
                    );
                }
                Some(e) => self.invite_error = Some(e),
            },
            Message::CloseInviteModal => {
                self.show_invite_modal = false;
                self.invite_email.clear();
                self.invite_error = None;
                self.invite_success = None;
            }
            Message::AskExcludeMember(member) => self.member_to_exclude = Some(member),
            Message::CancelExclude => self.member_to_exclude = None,
            Message::ConfirmExclude => {
                let Some(member) = self.member_to_exclude.clone() else {
                    return Command::none();
                };
                let Some(group) = &self.group else {
                    return Command::none();
                };
                let group_id = group.id;
                let api_clone = api.clone();
                return Command::perform(
                    async move {
                        match GroupService::exclude_member(&api_clone, group_id, member.id).await {
                            Ok(()) => Message::ExcludeResult { error: None },
                            Err(e) => {
                                log::warn!("failed to exclude member {}: {}", member.id, e);
                                Message::ExcludeResult {
                                    error: Some("Failed to exclude the member".to_string()),
                                }
                            }
                        }
                    },
                    |msg| msg,
                );
            }
            Message::ExcludeResult { error } => {
                self.member_to_exclude = None;
                match error {
                    None => {
                        if let Route::GroupDetail { group_id } = self.route {
                            self.group_loading = true;
                            return fetch_group(api, group_id);
                        }
                    }
                    Some(e) => self.group_error = Some(e),
                }
            }
            Message::ShowLeaveModal(show) => self.show_leave_modal = show,
            Message::ConfirmLeave => {
                let Some(group) = &self.group else {
                    return Command::none();
                };
                let group_id = group.id;
                let api_clone = api.clone();
                return Command::perform(
                    async move {
                        match GroupService::leave_group(&api_clone, group_id).await {
                            Ok(()) => Message::LeaveResult { error: None },
                            Err(e) => {
                                log::warn!("failed to leave group {}: {}", group_id, e);
                                Message::LeaveResult {
                                    error: Some("Failed to leave the group".to_string()),
                                }
                            }
                        }
                    },
                    |msg| msg,
                );
            }
            Message::LeaveResult { error } => {
                self.show_leave_modal = false;
                match error {
                    None => return self.update(Message::OpenGroups, api, session),
                    Some(e) => self.group_error = Some(e),
                }
            }

            // ── Post detail ───────────────────────────────────────────────
            Message::PostLoaded { post, error } => {
                self.post_loading = false;
                self.post_error = error;
                self.post = post;
            }
            Message::CommentInputChanged(value) => self.comment_input = value,
            Message::ReplyToComment {
                comment_id,
                author_name,
            } => {
                self.reply_to = Some(comment_id);
                self.comment_input = format!("@{}, ", author_name);
            }
            Message::CancelReply => self.reply_to = None,
            Message::SubmitComment => {
                let text = self.comment_input.trim().to_string();
                if text.is_empty() {
                    return Command::none();
                }
                let Route::PostDetail { group_id, post_id } = self.route else {
                    return Command::none();
                };
                let parent = self.reply_to;
                let api_clone = api.clone();
                return Command::perform(
                    async move {
                        match PostService::add_comment(&api_clone, group_id, post_id, &text, parent)
                            .await
                        {
                            Ok(_) => Message::CommentSaved { error: None },
                            Err(e) => {
                                log::warn!("failed to add comment: {}", e);
                                Message::CommentSaved {
                                    error: Some("Failed to add the comment".to_string()),
                                }
                            }
                        }
                    },
                    |msg| msg,
                );
            }
            Message::CommentSaved { error } => match error {
                None => {
                    self.comment_input.clear();
                    self.reply_to = None;
                    if let Route::PostDetail { group_id, post_id } = self.route {
                        return fetch_post(api, group_id, post_id);
                    }
                }
                Some(e) => self.post_error = Some(e),
            },
            Message::DeleteComment { comment_id } => {
                let Route::PostDetail { group_id, post_id } = self.route else {
                    return Command::none();
                };
                let api_clone = api.clone();
                return Command::perform(
                    async move {
                        match PostService::delete_comment(&api_clone, group_id, post_id, comment_id)
                            .await
                        {
                            Ok(()) => Message::CommentDeleted { error: None },
                            Err(e) => {
                                log::warn!("failed to delete comment {}: {}", comment_id, e);
                                Message::CommentDeleted {
                                    error: Some("Failed to delete the comment".to_string()),
                                }
                            }
                        }
                    },
                    |msg| msg,
                );
            }
            Message::CommentDeleted { error } => match error {
                None => {
                    if let Route::PostDetail { group_id, post_id } = self.route {
                        return fetch_post(api, group_id, post_id);
                    }
                }
                Some(e) => self.post_error = Some(e),
            },
            Message::EnterEditPost => {
                let Some(post) = &self.post else {
                    return Command::none();
                };
                self.edit_mode = true;
                self.edit_title = post.title.clone();
                self.edit_content = post.content.clone();
                self.edit_deadline = post
                    .deadline
                    .as_ref()
                    .map(|d| d.get(..10).unwrap_or(d).to_string());
                self.edit_deadline_error = None;
                self.edit_files.clear();
                self.edit_file_path_input.clear();
                self.files_to_delete.clear();
                self.edit_error = None;
            }
            Message::CancelEditPost => {
                self.edit_mode = false;
                self.edit_error = None;
                self.edit_deadline_error = None;
            }
            Message::EditTitleChanged(value) => self.edit_title = value,
            Message::EditContentChanged(value) => self.edit_content = value,
            Message::EditChooseDeadline => self.show_edit_deadline_picker = true,
            Message::EditCancelDeadline => self.show_edit_deadline_picker = false,
            Message::EditSubmitDeadline(date) => {
                self.show_edit_deadline_picker = false;
                let picked = ymd_string(date);
                if deadline_in_past(&picked, &today_ymd()) {
                    self.edit_deadline_error =
                        Some("The deadline cannot be earlier than today".to_string());
                } else {
                    self.edit_deadline_error = None;
                    self.edit_deadline = Some(picked);
                }
            }
            Message::EditClearDeadline => {
                self.edit_deadline = None;
                self.edit_deadline_error = None;
            }
            Message::EditFilePathChanged(value) => self.edit_file_path_input = value,
            Message::EditAttachFile => {
                if self.edit_file_path_input.trim().is_empty() {
                    return Command::none();
                }
                match PendingFile::from_path(&self.edit_file_path_input) {
                    Ok(file) => {
                        push_attachment(&mut self.edit_files, file);
                        self.edit_file_path_input.clear();
                        self.edit_error = None;
                    }
                    Err(e) => self.edit_error = Some(e),
                }
            }
            Message::EditRemovePendingFile(index) => {
                if index < self.edit_files.len() {
                    self.edit_files.remove(index);
                }
            }
            Message::MarkFileForDelete(file_id) => {
                if !self.files_to_delete.contains(&file_id) {
                    self.files_to_delete.push(file_id);
                }
            }
            Message::UnmarkFileForDelete(file_id) => {
                self.files_to_delete.retain(|id| *id != file_id);
            }
            Message::EditPostSubmit => {
                self.edit_error = None;
                self.edit_deadline_error = None;
                if self.edit_title.trim().is_empty() || self.edit_content.trim().is_empty() {
                    self.edit_error = Some("Title and content are required".to_string());
                    return Command::none();
                }
                if let Some(deadline) = &self.edit_deadline {
                    if deadline_in_past(deadline, &today_ymd()) {
                        self.edit_deadline_error =
                            Some("The deadline cannot be earlier than today".to_string());
                        return Command::none();
                    }
                }
                let Route::PostDetail { group_id, post_id } = self.route else {
                    return Command::none();
                };
                let edit = PostEdit {
                    title: self.edit_title.trim().to_string(),
                    content: self.edit_content.clone(),
                    deadline: self.edit_deadline.clone(),
                    file_ids_to_delete: self.files_to_delete.clone(),
                    files: self.edit_files.clone(),
                };
                let api_clone = api.clone();
                return Command::perform(
                    async move {
                        match PostService::update_post(&api_clone, group_id, post_id, &edit).await {
                            Ok(post) => Message::PostUpdated {
                                post: Some(post),
                                error: None,
                            },
                            Err(e) => {
                                log::warn!("failed to update post {}: {}", post_id, e);
                                Message::PostUpdated {
                                    post: None,
                                    error: Some("Failed to save the changes".to_string()),
                                }
                            }
                        }
                    },
                    |msg| msg,
                );
            }
            Message::PostUpdated { post, error } => match post {
                Some(post) => {
                    self.post = Some(post);
                    self.edit_mode = false;
                    self.edit_files.clear();
                    self.files_to_delete.clear();
                }
                None => self.edit_error = error,
            },

            // ── Notifications ─────────────────────────────────────────────
            Message::NotificationsLoaded {
                notifications,
                error,
            } => {
                self.notif_loading = false;
                self.notif_error = error;
                self.notifications = notifications;
            }
            Message::MarkViewedDone { ok } => {
                if ok {
                    session.set_notif_count(0);
                    self.notif_count = 0;
                }
            }
            Message::InviteActionTriggered { notif_id, action } => {
                let Some(notification) = self.notifications.iter().find(|n| n.id == notif_id)
                else {
                    return Command::none();
                };
                // Terminal states absorb; a second click on the same button
                // while its request is in flight is suppressed too.
                if !notification.status.is_pending()
                    || self.action_loading == Some((notif_id, action))
                {
                    return Command::none();
                }
                self.action_loading = Some((notif_id, action));
                let api_clone = api.clone();
                return Command::perform(
                    async move {
                        match NotificationService::invitation_action(&api_clone, notif_id, action)
                            .await
                        {
                            Ok(()) => Message::InviteActionDone {
                                notif_id,
                                action,
                                error: None,
                            },
                            Err(e) => {
                                log::warn!("invitation action failed: {}", e);
                                Message::InviteActionDone {
                                    notif_id,
                                    action,
                                    error: Some("Failed to process the invitation".to_string()),
                                }
                            }
                        }
                    },
                    |msg| msg,
                );
            }
            Message::InviteActionDone {
                notif_id,
                action,
                error,
            } => {
                self.action_loading = None;
                match error {
                    None => {
                        for notification in &mut self.notifications {
                            if notification.id == notif_id {
                                notification.status = notification.status.apply(action);
                            }
                        }
                    }
                    Some(e) => self.notif_error = Some(e),
                }
            }
            Message::DismissReminder { notif_id } => {
                let api_clone = api.clone();
                return Command::perform(
                    async move {
                        match NotificationService::delete(&api_clone, notif_id).await {
                            Ok(()) => Message::ReminderDismissed {
                                notif_id,
                                error: None,
                            },
                            Err(e) => {
                                log::warn!("failed to dismiss reminder {}: {}", notif_id, e);
                                Message::ReminderDismissed {
                                    notif_id,
                                    error: Some("Failed to dismiss the reminder".to_string()),
                                }
                            }
                        }
                    },
                    |msg| msg,
                );
            }
            Message::ReminderDismissed { notif_id, error } => match error {
                None => self.notifications.retain(|n| n.id != notif_id),
                Some(e) => self.notif_error = Some(e),
            },
        }

        Command::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::config::ClientConfig;
    use pretty_assertions::assert_eq;

    fn harness() -> (AppState, Arc<ApiClient>, Arc<SessionStore>) {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            api_url: "http://localhost:9".to_string(),
            data_dir: dir.path().to_path_buf(),
        };
        let session = Arc::new(SessionStore::new(config.data_dir.clone()));
        let api = Arc::new(ApiClient::new(&config, session.clone()));
        (AppState::default(), api, session)
    }

    fn invite(id: i64, status: crate::common::models::NotifStatus) -> Notification {
        Notification {
            id,
            notif_type: crate::common::models::NotifType::Invite,
            from_user_name: None,
            group_name: Some("Algebra".into()),
            post_title: None,
            deadline_date: None,
            current_date: None,
            status,
            created_at: "2024-01-01T00:00:00Z".into(),
            message: String::new(),
        }
    }

    #[test]
    fn resolved_invites_ignore_further_actions() {
        let (mut state, api, session) = harness();
        state.notifications = vec![invite(1, crate::common::models::NotifStatus::Accepted)];
        let _ = state.update(
            Message::InviteActionTriggered {
                notif_id: 1,
                action: InviteAction::Decline,
            },
            &api,
            &session,
        );
        // No request was scheduled, nothing changed.
        assert!(state.action_loading.is_none());
        assert_eq!(
            state.notifications[0].status,
            crate::common::models::NotifStatus::Accepted
        );
    }

    #[test]
    fn in_flight_invite_action_suppresses_second_click() {
        let (mut state, api, session) = harness();
        state.notifications = vec![invite(2, crate::common::models::NotifStatus::Pending)];
        state.action_loading = Some((2, InviteAction::Accept));
        let _ = state.update(
            Message::InviteActionTriggered {
                notif_id: 2,
                action: InviteAction::Accept,
            },
            &api,
            &session,
        );
        assert_eq!(state.action_loading, Some((2, InviteAction::Accept)));
    }

    #[test]
    fn invite_action_done_applies_the_transition() {
        let (mut state, api, session) = harness();
        state.notifications = vec![invite(3, crate::common::models::NotifStatus::Pending)];
        state.action_loading = Some((3, InviteAction::Decline));
        let _ = state.update(
            Message::InviteActionDone {
                notif_id: 3,
                action: InviteAction::Decline,
                error: None,
            },
            &api,
            &session,
        );
        assert!(state.action_loading.is_none());
        assert_eq!(
            state.notifications[0].status,
            crate::common::models::NotifStatus::Declined
        );
    }

    #[test]
    fn past_deadline_blocks_submission_without_a_request() {
        let (mut state, api, session) = harness();
        state.post_title = "Homework".into();
        state.post_content = "Read chapter 4".into();
        state.post_deadline = Some("2000-01-01".into());
        state.group = Some(Group {
            id: 1,
            name: "Algebra".into(),
            info: String::new(),
            admin_id: 1,
            members: vec![],
            posts: vec![],
            created_at: None,
        });
        let _ = state.update(Message::CreatePostSubmit, &api, &session);
        assert!(state.deadline_error.is_some());
        // The modal is still open, nothing was cleared.
        assert_eq!(state.post_title, "Homework");
    }

    #[test]
    fn bulk_delete_result_removes_exactly_the_deleted_ids() {
        let (mut state, api, session) = harness();
        let post = |id: i64| Post {
            id,
            title: format!("post {}", id),
            content: String::new(),
            deadline: None,
            author: 1,
            author_name: None,
            created_at: format!("2024-01-0{}T00:00:00Z", id),
            updated_at: None,
            files: vec![],
            comments: vec![],
        };
        state.group = Some(Group {
            id: 1,
            name: "Algebra".into(),
            info: String::new(),
            admin_id: 1,
            members: vec![],
            posts: vec![post(10), post(11), post(12)],
            created_at: None,
        });
        state.deleting = true;
        let _ = state.update(
            Message::PostsDeleted {
                deleted: vec![10, 12],
                failed: 1,
            },
            &api,
            &session,
        );
        let remaining: Vec<i64> = state.group.as_ref().unwrap().posts.iter().map(|p| p.id).collect();
        assert_eq!(remaining, vec![11]);
        assert!(!state.deleting);
        assert!(state.group_error.as_deref().unwrap().contains("1 post"));
    }

    #[test]
    fn invalid_invite_email_never_leaves_the_client() {
        let (mut state, api, session) = harness();
        state.invite_email = "not-an-email".into();
        let _ = state.update(Message::InviteSubmit, &api, &session);
        assert!(state.invite_error.is_some());
    }

    #[test]
    fn reply_prefills_the_comment_input() {
        let (mut state, api, session) = harness();
        let _ = state.update(
            Message::ReplyToComment {
                comment_id: 5,
                author_name: "Ivanov I.".into(),
            },
            &api,
            &session,
        );
        assert_eq!(state.reply_to, Some(5));
        assert_eq!(state.comment_input, "@Ivanov I., ");
    }

    #[test]
    fn protected_route_bounces_unauthenticated_viewers() {
        let (mut state, api, session) = harness();
        let _ = state.update(Message::OpenProfile { user_id: None }, &api, &session);
        assert_eq!(state.route, Route::Login);
    }

    #[test]
    fn session_events_refresh_the_badge_mirror() {
        let (mut state, api, session) = harness();
        let _ = state.update(
            Message::SessionEvent(SessionEvent::NotifCountChanged(6)),
            &api,
            &session,
        );
        assert_eq!(state.notif_count, 6);
        let _ = state.update(
            Message::SessionEvent(SessionEvent::SessionCleared),
            &api,
            &session,
        );
        assert_eq!(state.notif_count, 0);
        assert!(state.user.is_none());
    }

    #[test]
    fn picker_date_round_trips_iso_strings() {
        let date = picker_date(&Some("2024-07-09".to_string()));
        assert_eq!(ymd_string(date), "2024-07-09");
    }
}
