//! TaskTalk desktop client: an iced GUI over the TaskTalk REST backend,
//! connecting students and teachers through groups, posts, comments,
//! invitations, and notifications.

pub mod client;
pub mod common;
