// Inline banner widgets for page-level errors and confirmations.
use iced::widget::{container, Container, Text};
use iced::{Color, Element, Length};

use crate::client::gui::widgets::style::{DANGER, SUCCESS};
use crate::client::models::messages::Message;

fn banner_appearance(color: Color) -> container::Appearance {
    container::Appearance {
        background: Some(iced::Background::Color(Color {
            a: 0.12,
            ..color
        })),
        text_color: Some(color),
        border: iced::Border {
            width: 1.0,
            color,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

pub fn error_banner(message: &str) -> Element<'_, Message> {
    Container::new(Text::new(message).size(14))
        .padding(10)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            |_: &iced::Theme| banner_appearance(DANGER),
        )))
        .into()
}

pub fn success_banner(message: &str) -> Element<'_, Message> {
    Container::new(Text::new(message).size(14))
        .padding(10)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            |_: &iced::Theme| banner_appearance(SUCCESS),
        )))
        .into()
}
