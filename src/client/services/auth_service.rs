use serde::{Deserialize, Serialize};

use crate::client::services::api_client::{ApiClient, ApiError};
use crate::common::models::{Role, User};

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Registration form, field names matching the backend serializer.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ProfileUpdate<'a> {
    email: &'a str,
    about: &'a str,
}

#[derive(Debug, Default)]
pub struct AuthService;

impl AuthService {
    /// Logs in and stores the returned session (user + token) in the
    /// session store before resolving.
    pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<User, ApiError> {
        let response: AuthResponse = api
            .post_json("/auth/login/", &LoginRequest { email, password })
            .await?;
        api.session()
            .set_session(response.user.clone(), response.token);
        log::info!("logged in as user {}", response.user.id);
        Ok(response.user)
    }

    pub async fn register(api: &ApiClient, form: &RegisterForm) -> Result<User, ApiError> {
        let response: AuthResponse = api.post_json("/auth/register/", form).await?;
        api.session()
            .set_session(response.user.clone(), response.token);
        log::info!("registered user {}", response.user.id);
        Ok(response.user)
    }

    /// Best-effort server-side logout; the local session is cleared
    /// regardless of the outcome.
    pub async fn logout(api: &ApiClient) {
        if let Err(e) = api.post_unit("/auth/logout/").await {
            log::warn!("logout request failed: {}", e);
        }
        api.session().clear_session();
    }

    /// Saves `about`/`email` on the own profile and refreshes the stored
    /// user from the response.
    pub async fn update_profile(
        api: &ApiClient,
        email: &str,
        about: &str,
    ) -> Result<User, ApiError> {
        let user: User = api
            .put_json("/auth/profile/", &ProfileUpdate { email, about })
            .await?;
        api.session().update_user(user.clone());
        Ok(user)
    }

    pub async fn fetch_profile(api: &ApiClient, user_id: i64) -> Result<User, ApiError> {
        api.get_json(&format!("/users/{}/profile/", user_id)).await
    }
}
