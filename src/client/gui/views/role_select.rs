use iced::widget::{Button, Column, Container, Row, Text};
use iced::{Alignment, Element, Length};

use crate::client::gui::widgets::style::{page_appearance, BOLD_FONT};
use crate::client::models::app_state::AppState;
use crate::client::models::messages::Message;
use crate::common::models::Role;

pub fn view(_state: &AppState) -> Element<'static, Message> {
    let choices = Row::new()
        .spacing(16)
        .push(
            Button::new(Text::new("Student").size(15))
                .style(iced::theme::Button::Primary)
                .on_press(Message::OpenRegister {
                    role: Role::Student,
                })
                .padding([12, 28]),
        )
        .push(
            Button::new(Text::new("Teacher").size(15))
                .style(iced::theme::Button::Primary)
                .on_press(Message::OpenRegister {
                    role: Role::Teacher,
                })
                .padding([12, 28]),
        );

    Container::new(
        Column::new()
            .spacing(20)
            .align_items(Alignment::Center)
            .push(Text::new("Register as:").font(BOLD_FONT).size(22))
            .push(choices),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x()
    .center_y()
    .style(iced::theme::Container::Custom(Box::new(page_appearance)))
    .into()
}
