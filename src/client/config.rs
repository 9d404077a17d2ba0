use std::env;
use std::path::PathBuf;

/// Client configuration, resolved from the environment once at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the TaskTalk REST API, without a trailing slash.
    pub api_url: String,
    /// Directory for locally persisted session state.
    pub data_dir: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("TASKTALK_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_string());
        let api_url = api_url.trim_end_matches('/').to_string();
        let data_dir = env::var("TASKTALK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        Self { api_url, data_dir }
    }
}
