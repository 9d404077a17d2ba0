pub mod api_client;
pub mod auth_service;
pub mod group_service;
pub mod notification_service;
pub mod post_service;
pub mod session;
