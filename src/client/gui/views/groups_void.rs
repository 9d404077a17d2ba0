use iced::widget::{Button, Column, Container, Text};
use iced::{Alignment, Element, Length};

use crate::client::gui::widgets::header::header;
use crate::client::gui::widgets::style::{card_appearance, page_appearance, BOLD_FONT};
use crate::client::models::app_state::AppState;
use crate::client::models::messages::Message;

/// Groups page for logged-out visitors: a sign-in prompt instead of cards.
pub fn view(state: &AppState) -> Element<'_, Message> {
    let card = Container::new(
        Column::new()
            .spacing(20)
            .align_items(Alignment::Center)
            .push(
                Text::new("Sign in or register to access your groups")
                    .font(BOLD_FONT)
                    .size(20),
            )
            .push(
                Button::new(Text::new("Sign in").size(14))
                    .style(iced::theme::Button::Primary)
                    .on_press(Message::OpenLogin)
                    .padding([10, 24]),
            )
            .push(
                Button::new(Text::new("Back to the home page").size(13))
                    .style(iced::theme::Button::Text)
                    .on_press(Message::OpenHome),
            ),
    )
    .padding(32)
    .width(Length::Fixed(440.0))
    .style(iced::theme::Container::Custom(Box::new(card_appearance)));

    let page = Column::new().push(header(state)).push(
        Container::new(card)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y(),
    );

    Container::new(page)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(page_appearance)))
        .into()
}
