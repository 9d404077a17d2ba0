pub mod group_detail;
pub mod groups_student;
pub mod groups_teacher;
pub mod groups_void;
pub mod home;
pub mod login;
pub mod notifications;
pub mod post_detail;
pub mod profile;
pub mod register;
pub mod role_select;
