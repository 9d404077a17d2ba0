use iced::widget::{Button, Column, Container, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::widgets::alert::error_banner;
use crate::client::gui::widgets::style::{card_appearance, page_appearance, BOLD_FONT};
use crate::client::models::app_state::AppState;
use crate::client::models::messages::Message;
use crate::common::models::Role;

pub fn view(state: &AppState) -> Element<'_, Message> {
    let title = match state.register_role {
        Some(Role::Teacher) => "Teacher registration",
        _ => "Student registration",
    };
    let submit = if state.auth_loading {
        Message::NoOp
    } else {
        Message::RegisterSubmit
    };

    let mut form = Column::new()
        .spacing(12)
        .push(Text::new(title).font(BOLD_FONT).size(22))
        .push(
            TextInput::new("Last name", &state.reg_last_name)
                .on_input(Message::RegLastNameChanged)
                .padding(10),
        )
        .push(
            TextInput::new("First name", &state.reg_first_name)
                .on_input(Message::RegFirstNameChanged)
                .padding(10),
        )
        .push(
            TextInput::new("Middle name", &state.reg_middle_name)
                .on_input(Message::RegMiddleNameChanged)
                .padding(10),
        )
        .push(
            TextInput::new("Email", &state.reg_email)
                .on_input(Message::RegEmailChanged)
                .padding(10),
        )
        .push(
            TextInput::new("Password", &state.reg_password)
                .on_input(Message::RegPasswordChanged)
                .secure(true)
                .padding(10),
        )
        .push(
            TextInput::new("Confirm password", &state.reg_password2)
                .on_input(Message::RegPassword2Changed)
                .on_submit(submit.clone())
                .secure(true)
                .padding(10),
        );
    if let Some(error) = &state.register_error {
        form = form.push(error_banner(error));
    }
    form = form.push(
        Button::new(
            Container::new(
                Text::new(if state.auth_loading {
                    "Registering..."
                } else {
                    "Register"
                })
                .size(15),
            )
            .width(Length::Fill)
            .center_x(),
        )
        .style(iced::theme::Button::Primary)
        .on_press(submit)
        .padding(12)
        .width(Length::Fill),
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
