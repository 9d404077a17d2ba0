use keyring::Entry;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::common::models::User;

const SERVICE: &str = "tasktalk";
const USER: &str = "tasktalk_session";

/// Session state persisted between runs next to the keyring-held token:
/// the serialized current user and the cached notification count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedSession {
    pub user: Option<User>,
    pub notif_count: u32,
}

pub fn save_session_token(token: &str) -> anyhow::Result<()> {
    let entry = Entry::new(SERVICE, USER);
    match entry.set_password(token) {
        Ok(()) => {
            // token stored securely in OS keyring
            Ok(())
        }
        Err(_e) => {
            // Keyring failed. Optionally fall back to a local file when explicitly allowed
            let allow_fallback = std::env::var("KEYRING_FALLBACK").unwrap_or_default() == "true";
            if allow_fallback {
                let path = Path::new("data").join("session_token.txt");
                if let Some(parent) = path.parent() {
                    let _ = std::fs::create_dir_all(parent);
                }
                std::fs::write(&path, token)?;
                // warn in logs but do not print token
                log::warn!("keyring unavailable, persisted token to fallback file");
                Ok(())
            } else {
                // do not persist to disk silently; return error so caller can decide
                Err(anyhow::anyhow!("keyring unavailable and file fallback disabled"))
            }
        }
    }
}

pub fn load_session_token() -> Option<String> {
    let entry = Entry::new(SERVICE, USER);
    match entry.get_password() {
        Ok(t) => {
            if t.trim().is_empty() {
                None
            } else {
                Some(t)
            }
        }
        Err(_e) => {
            // Only attempt file fallback when explicitly enabled via env var
            let allow_fallback = std::env::var("KEYRING_FALLBACK").unwrap_or_default() == "true";
            if allow_fallback {
                let path = Path::new("data").join("session_token.txt");
                if path.exists() {
                    if let Ok(s) = std::fs::read_to_string(&path) {
                        let t = s.trim().to_string();
                        if !t.is_empty() {
                            return Some(t);
                        }
                    }
                }
            }
            None
        }
    }
}

pub fn clear_session_token() -> anyhow::Result<()> {
    let entry = Entry::new(SERVICE, USER);
    let _ = entry.delete_password();
    // remove fallback file only if fallback is enabled
    let allow_fallback = std::env::var("KEYRING_FALLBACK").unwrap_or_default() == "true";
    if allow_fallback {
        let path = Path::new("data").join("session_token.txt");
        if path.exists() {
            let _ = std::fs::remove_file(&path);
        }
    }
    Ok(())
}

pub fn save_session_file(dir: &Path, session: &PersistedSession) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(dir.join("session.json"), json)?;
    Ok(())
}

pub fn load_session_file(dir: &Path) -> Option<PersistedSession> {
    let raw = std::fs::read_to_string(dir.join("session.json")).ok()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("discarding unreadable session file: {}", e);
            None
        }
    }
}

pub fn clear_session_file(dir: &Path) {
    let path = dir.join("session.json");
    if path.exists() {
        let _ = std::fs::remove_file(&path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::models::Role;

    fn sample_user() -> User {
        User {
            id: 1,
            email: "a@b.com".into(),
            full_name: "Ivanov I. I.".into(),
            role: Role::Student,
            about: None,
            first_name: None,
            last_name: None,
            middle_name: None,
            groups: vec![],
        }
    }

    #[test]
    fn session_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let session = PersistedSession {
            user: Some(sample_user()),
            notif_count: 3,
        };
        save_session_file(dir.path(), &session).unwrap();
        let loaded = load_session_file(dir.path()).unwrap();
        assert_eq!(loaded.notif_count, 3);
        assert_eq!(loaded.user.unwrap().id, 1);
    }

    #[test]
    fn missing_or_corrupt_session_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_session_file(dir.path()).is_none());
        std::fs::write(dir.path().join("session.json"), "not json").unwrap();
        assert!(load_session_file(dir.path()).is_none());
        clear_session_file(dir.path());
        assert!(!dir.path().join("session.json").exists());
    }
}
