//! The single owner of session state: current user, auth token, and the
//! cached pending-notification count. Views read through the accessors and
//! mutate through the actions; every mutation notifies subscribers
//! synchronously, which is how open views learn about changes made
//! elsewhere without a shared event bus.

use std::path::PathBuf;
use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::client::config::ClientConfig;
use crate::client::utils::session_store;
use crate::client::utils::session_store::PersistedSession;
use crate::common::models::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The cached pending-notification count changed.
    NotifCountChanged(u32),
    /// A user logged in, registered, or had their profile replaced.
    SessionChanged,
    /// The session was cleared (logout).
    SessionCleared,
}

#[derive(Debug, Clone, Default)]
struct SessionData {
    user: Option<User>,
    token: Option<String>,
    notif_count: u32,
}

type Listener = Box<dyn Fn(&SessionEvent) + Send + Sync>;

pub struct SessionStore {
    data_dir: PathBuf,
    inner: Mutex<SessionData>,
    listeners: Mutex<Vec<Listener>>,
}

impl SessionStore {
    /// Empty store persisting under `data_dir`. Does not touch the keyring.
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            inner: Mutex::new(SessionData::default()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Store seeded from the keyring token and the persisted session file.
    pub fn load(config: &ClientConfig) -> Self {
        let store = Self::new(config.data_dir.clone());
        let token = session_store::load_session_token();
        let persisted = session_store::load_session_file(&config.data_dir).unwrap_or_default();
        {
            let mut data = store.inner.lock().expect("session store poisoned");
            // A token without a user (or vice versa) is a half-written
            // session; treat it as logged out.
            if token.is_some() && persisted.user.is_some() {
                data.token = token;
                data.user = persisted.user;
            }
            data.notif_count = persisted.notif_count;
        }
        store
    }

    pub fn user(&self) -> Option<User> {
        self.inner.lock().expect("session store poisoned").user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.lock().expect("session store poisoned").token.clone()
    }

    pub fn notif_count(&self) -> u32 {
        self.inner.lock().expect("session store poisoned").notif_count
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.lock().expect("session store poisoned").token.is_some()
    }

    /// Registers a listener invoked synchronously on every mutation.
    pub fn subscribe(&self, listener: impl Fn(&SessionEvent) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .expect("session listeners poisoned")
            .push(Box::new(listener));
    }

    /// Channel-backed subscription: events are forwarded into an unbounded
    /// queue the GUI update loop drains.
    pub fn event_channel(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribe(move |event| {
            let _ = tx.send(event.clone());
        });
        rx
    }

    pub fn set_session(&self, user: User, token: String) {
        let snapshot = {
            let mut data = self.inner.lock().expect("session store poisoned");
            data.user = Some(user);
            data.token = Some(token.clone());
            data.clone()
        };
        if let Err(e) = session_store::save_session_token(&token) {
            // Non-fatal: the session still works for this run.
            log::warn!("failed to persist session token: {}", e);
        }
        self.persist(&snapshot);
        self.notify(SessionEvent::SessionChanged);
    }

    /// Replaces the stored user, keeping the token (profile update).
    pub fn update_user(&self, user: User) {
        let snapshot = {
            let mut data = self.inner.lock().expect("session store poisoned");
            data.user = Some(user);
            data.clone()
        };
        self.persist(&snapshot);
        self.notify(SessionEvent::SessionChanged);
    }

    pub fn clear_session(&self) {
        {
            let mut data = self.inner.lock().expect("session store poisoned");
            data.user = None;
            data.token = None;
            data.notif_count = 0;
        }
        let _ = session_store::clear_session_token();
        session_store::clear_session_file(&self.data_dir);
        self.notify(SessionEvent::SessionCleared);
    }

    /// Last-writer-wins; notifies only when the value actually changes.
    pub fn set_notif_count(&self, count: u32) {
        let snapshot = {
            let mut data = self.inner.lock().expect("session store poisoned");
            if data.notif_count == count {
                return;
            }
            data.notif_count = count;
            data.clone()
        };
        self.persist(&snapshot);
        self.notify(SessionEvent::NotifCountChanged(count));
    }

    fn persist(&self, data: &SessionData) {
        let persisted = PersistedSession {
            user: data.user.clone(),
            notif_count: data.notif_count,
        };
        if let Err(e) = session_store::save_session_file(&self.data_dir, &persisted) {
            log::warn!("failed to persist session file: {}", e);
        }
    }

    fn notify(&self, event: SessionEvent) {
        let listeners = self.listeners.lock().expect("session listeners poisoned");
        for listener in listeners.iter() {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::models::Role;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn store() -> SessionStore {
        let dir = tempfile::tempdir().unwrap();
        SessionStore::new(dir.path().to_path_buf())
    }

    fn user() -> User {
        User {
            id: 9,
            email: "t@example.com".into(),
            full_name: "Teacher T.".into(),
            role: Role::Teacher,
            about: None,
            first_name: None,
            last_name: None,
            middle_name: None,
            groups: vec![],
        }
    }

    #[test]
    fn notif_count_notifies_subscribers_synchronously() {
        let store = store();
        let seen = Arc::new(AtomicU32::new(u32::MAX));
        let seen_clone = seen.clone();
        store.subscribe(move |event| {
            if let SessionEvent::NotifCountChanged(count) = event {
                seen_clone.store(*count, Ordering::SeqCst);
            }
        });

        store.set_notif_count(4);
        // Listener ran before set_notif_count returned.
        assert_eq!(seen.load(Ordering::SeqCst), 4);
        assert_eq!(store.notif_count(), 4);
    }

    #[test]
    fn unchanged_count_does_not_rebroadcast() {
        let store = store();
        let fired = Arc::new(AtomicU32::new(0));
        let fired_clone = fired.clone();
        store.subscribe(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.set_notif_count(2);
        store.set_notif_count(2);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn event_channel_receives_mutations() {
        let store = store();
        let mut rx = store.event_channel();
        store.set_notif_count(7);
        assert_eq!(
            rx.try_recv().unwrap(),
            SessionEvent::NotifCountChanged(7)
        );
    }

    #[test]
    fn clearing_resets_everything() {
        let store = store();
        store.update_user(user());
        store.set_notif_count(3);
        store.clear_session();
        assert!(store.user().is_none());
        assert!(store.token().is_none());
        assert_eq!(store.notif_count(), 0);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn last_writer_wins_on_the_count() {
        let store = store();
        store.set_notif_count(5);
        store.set_notif_count(1);
        assert_eq!(store.notif_count(), 1);
    }
}
