use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text};
use iced::{Alignment, Element, Length};

use crate::client::gui::widgets::header::header;
use crate::client::gui::widgets::style::{
    card_appearance, page_appearance, ACCENT, BOLD_FONT, SUCCESS, TEXT_SECONDARY,
};
use crate::client::models::app_state::AppState;
use crate::client::models::messages::Message;

/// Rotating study-motivation phrases shown on the landing tiles.
pub const MOTIVATION_PHRASES: [&str; 15] = [
    "Learn for life, not for school!",
    "The best way to learn something is to explain it to someone else.",
    "Small steps every day add up to big results.",
    "Don't be afraid of mistakes - be afraid of not trying!",
    "Plan your day and there will be time for everything.",
    "Set goals and track your progress - it keeps you motivated!",
    "Rest wisely: your brain needs a break too.",
    "Ask questions - that's how you learn faster.",
    "Compare yourself with who you were yesterday, not with others.",
    "Studying is an investment in yourself.",
    "Hard things become simple if you don't give up.",
    "Take notes - writing helps you remember.",
    "Don't be afraid to ask for help - it's easier together!",
    "The main thing is to start; it gets easier from there.",
    "Study with curiosity, not under pressure!",
];

fn feature_line(text: &str) -> Element<'_, Message> {
    Row::new()
        .spacing(8)
        .align_items(Alignment::Center)
        .push(Text::new("+").font(BOLD_FONT).size(18).style(SUCCESS))
        .push(Text::new(text).size(15))
        .into()
}

fn tile(state: &AppState, index: usize) -> Element<'_, Message> {
    let phrase = MOTIVATION_PHRASES[state.tile_phrases[index]];
    Button::new(
        Container::new(Text::new(phrase).size(15))
            .padding(20)
            .width(Length::Fill)
            .center_x()
            .style(iced::theme::Container::Custom(Box::new(card_appearance))),
    )
    .style(iced::theme::Button::Text)
    .on_press(Message::ShuffleTile(index))
    .width(Length::FillPortion(1))
    .into()
}

pub fn view(state: &AppState) -> Element<'_, Message> {
    let banner = Column::new()
        .spacing(12)
        .align_items(Alignment::Center)
        .push(
            Row::new()
                .spacing(8)
                .push(Text::new("Welcome to").size(32))
                .push(Text::new("TaskTalk").font(BOLD_FONT).size(32).style(ACCENT)),
        )
        .push(
            Text::new("A simple platform connecting students and teachers.")
                .size(17)
                .style(TEXT_SECONDARY),
        )
        .push(Space::new(Length::Fill, Length::Fixed(12.0)))
        .push(
            Column::new()
                .spacing(8)
                .push(feature_line("Teachers hand out assignments as posts"))
                .push(feature_line("Groups organized per subject"))
                .push(feature_line("Deadline reminders in your notifications"))
                .push(feature_line("Discussions right under every assignment")),
        );

    let tiles = Column::new()
        .spacing(16)
        .push(
            Row::new()
                .spacing(16)
                .push(tile(state, 0))
                .push(tile(state, 1)),
        )
        .push(
            Row::new()
                .spacing(16)
                .push(tile(state, 2))
                .push(tile(state, 3)),
        );

    let mut footer = Row::new().spacing(16).push(
        Button::new(Text::new("Register").size(13).style(TEXT_SECONDARY))
            .style(iced::theme::Button::Text)
            .on_press(Message::OpenRoleSelect),
    );
    if state.user.is_none() {
        footer = footer.push(
            Button::new(Text::new("Sign in").size(13).style(TEXT_SECONDARY))
                .style(iced::theme::Button::Text)
                .on_press(Message::OpenLogin),
        );
    }

    let content = Column::new()
        .spacing(32)
        .padding(40)
        .align_items(Alignment::Center)
        .push(banner)
        .push(tiles)
        .push(footer)
        .width(Length::Fill);

    let page = Column::new()
        .push(header(state))
        .push(Scrollable::new(content).width(Length::Fill).height(Length::Fill));

    Container::new(page)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(page_appearance)))
        .into()
}
