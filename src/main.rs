use iced::Application;

fn main() -> iced::Result {
    // load environment from .env (optional)
    let _ = dotenvy::dotenv();
    env_logger::init();
    tasktalk::client::gui::app::TaskTalkApp::run(iced::Settings::default())
}
