use iced::widget::{Button, Column, Container, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::widgets::alert::error_banner;
use crate::client::gui::widgets::style::{card_appearance, page_appearance, BOLD_FONT};
use crate::client::models::app_state::AppState;
use crate::client::models::messages::Message;

pub fn view(state: &AppState) -> Element<'_, Message> {
    let submit = if state.auth_loading {
        Message::NoOp
    } else {
        Message::LoginSubmit
    };

    let mut form = Column::new()
        .spacing(14)
        .push(Text::new("Sign in").font(BOLD_FONT).size(22))
        .push(
            TextInput::new("Email", &state.login_email)
                .on_input(Message::LoginEmailChanged)
                .on_submit(submit.clone())
                .padding(10),
        )
        .push(
            TextInput::new("Password", &state.login_password)
                .on_input(Message::LoginPasswordChanged)
                .on_submit(submit.clone())
                .secure(true)
                .padding(10),
        );
    if let Some(error) = &state.login_error {
        form = form.push(error_banner(error));
    }
    form = form
        .push(
            Button::new(
                Container::new(
                    Text::new(if state.auth_loading { "Signing in..." } else { "Sign in" })
                        .size(15),
                )
                .width(Length::Fill)
                .center_x(),
            )
            .style(iced::theme::Button::Primary)
            .on_press(submit)
            .padding(12)
            .width(Length::Fill),
        )
        .push(
            Button::new(Text::new("No account yet? Register").size(13))
                .style(iced::theme::Button::Text)
                .on_press(Message::OpenRoleSelect),
        );

    let card = Container::new(form)
        .padding(32)
        .width(Length::Fixed(380.0))
        .style(iced::theme::Container::Custom(Box::new(card_appearance)));

    Container::new(
        Column::new()
            .align_items(Alignment::Center)
            .push(card)
            .width(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x()
    .center_y()
    .style(iced::theme::Container::Custom(Box::new(page_appearance)))
    .into()
}
