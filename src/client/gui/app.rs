use iced::{Application, Command, Element, Theme};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use crate::client::config::ClientConfig;
use crate::client::gui::views;
use crate::client::models::app_state::{initial_tiles, AppState, Route};
use crate::client::models::messages::Message;
use crate::client::services::api_client::ApiClient;
use crate::client::services::session::{SessionEvent, SessionStore};
use crate::common::models::Role;

pub struct TaskTalkApp {
    pub state: AppState,
    pub api: Arc<ApiClient>,
    pub session: Arc<SessionStore>,
    /// Session store events, drained by the pump command below.
    events: Arc<Mutex<mpsc::UnboundedReceiver<SessionEvent>>>,
}

/// Waits for the next session event and feeds it back into the update
/// loop. Restarted after every delivery, so every open view re-reads the
/// cached count when any other view changes it.
fn pump(events: Arc<Mutex<mpsc::UnboundedReceiver<SessionEvent>>>) -> Command<Message> {
    Command::perform(
        async move {
            let mut guard = events.lock().await;
            guard.recv().await
        },
        |event| match event {
            Some(event) => Message::SessionEvent(event),
            None => Message::NoOp,
        },
    )
}

impl Application for TaskTalkApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let config = ClientConfig::from_env();
        let session = Arc::new(SessionStore::load(&config));
        let api = Arc::new(ApiClient::new(&config, session.clone()));
        let events = Arc::new(Mutex::new(session.event_channel()));

        let mut state = AppState {
            tile_phrases: initial_tiles(),
            ..AppState::default()
        };
        // Seed the badge from the cache so a restored session does not
        // flash zero while the first fetch is in flight.
        state.user = session.user();
        state.notif_count = session.notif_count();

        let app = TaskTalkApp {
            state,
            api,
            session,
            events: events.clone(),
        };
        let startup = Command::batch([
            pump(events),
            Command::perform(async { Message::OpenHome }, |msg| msg),
        ]);
        (app, startup)
    }

    fn title(&self) -> String {
        "TaskTalk".to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        if matches!(message, Message::SessionEvent(_)) {
            let applied = self.state.update(message, &self.api, &self.session);
            return Command::batch([applied, pump(self.events.clone())]);
        }
        self.state.update(message, &self.api, &self.session)
    }

    fn view(&self) -> Element<'_, Message> {
        match self.state.route {
            Route::Home => views::home::view(&self.state),
            Route::Login => views::login::view(&self.state),
            Route::RoleSelect => views::role_select::view(&self.state),
            Route::Register => views::register::view(&self.state),
            Route::Profile { .. } => views::profile::view(&self.state),
            Route::Groups => match &self.state.user {
                None => views::groups_void::view(&self.state),
                Some(user) => match user.role {
                    // Admins manage their groups through the same full view.
                    Role::Teacher | Role::Admin => views::groups_teacher::view(&self.state),
                    Role::Student => views::groups_student::view(&self.state),
                },
            },
            Route::GroupDetail { .. } => views::group_detail::view(&self.state),
            Route::PostDetail { .. } => views::post_detail::view(&self.state),
            Route::Notifications => views::notifications::view(&self.state),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}
