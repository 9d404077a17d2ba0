// Top navigation bar shared by every page: brand, nav links, the
// notification bell with its unread badge, and the profile/sign-in corner.
use iced::widget::{Button, Container, Row, Space, Text};
use iced::{Alignment, Element, Length};

use crate::client::gui::widgets::style::{
    counter_badge_appearance, header_appearance, ACCENT, BOLD_FONT, EMOJI_FONT, TEXT_SECONDARY,
};
use crate::client::models::app_state::{AppState, Route};
use crate::client::models::messages::Message;

fn nav_link<'a>(label: &'a str, target: Message, active: bool) -> Element<'a, Message> {
    let color = if active { ACCENT } else { TEXT_SECONDARY };
    Button::new(Text::new(label).size(15).style(color))
        .style(iced::theme::Button::Text)
        .on_press(target)
        .padding([4, 8])
        .into()
}

pub fn header(state: &AppState) -> Element<'_, Message> {
    let brand = Button::new(
        Text::new("TaskTalk")
            .font(BOLD_FONT)
            .size(24)
            .style(ACCENT),
    )
    .style(iced::theme::Button::Text)
    .on_press(Message::OpenHome)
    .padding([4, 8]);

    let mut nav = Row::new()
        .spacing(4)
        .align_items(Alignment::Center)
        .push(nav_link("Home", Message::OpenHome, state.route == Route::Home));
    if state.user.is_some() {
        nav = nav.push(nav_link(
            "Profile",
            Message::OpenProfile { user_id: None },
            matches!(state.route, Route::Profile { .. }),
        ));
    }
    nav = nav.push(nav_link(
        "Groups",
        Message::OpenGroups,
        matches!(
            state.route,
            Route::Groups | Route::GroupDetail { .. } | Route::PostDetail { .. }
        ),
    ));

    let mut bell_row = Row::new()
        .spacing(2)
        .align_items(Alignment::Center)
        .push(Text::new("🔔").font(EMOJI_FONT).size(18));
    if state.notif_count > 0 {
        bell_row = bell_row.push(
            Container::new(Text::new(state.notif_count.to_string()).size(11))
                .padding([1, 6])
                .style(iced::theme::Container::Custom(Box::new(
                    counter_badge_appearance,
                ))),
        );
    }
    let bell = Button::new(bell_row)
        .style(iced::theme::Button::Text)
        .on_press(Message::BellClicked)
        .padding([4, 8]);

    let corner: Element<Message> = if state.user.is_some() {
        Button::new(Text::new("👤").font(EMOJI_FONT).size(18))
            .style(iced::theme::Button::Text)
            .on_press(Message::OpenProfile { user_id: None })
            .padding([4, 8])
            .into()
    } else {
        Button::new(Text::new("Sign in").size(14))
            .style(iced::theme::Button::Primary)
            .on_press(Message::OpenLogin)
            .padding([8, 16])
            .into()
    };

    let bar = Row::new()
        .spacing(16)
        .align_items(Alignment::Center)
        .push(brand)
        .push(Space::new(Length::Fixed(12.0), Length::Fixed(0.0)))
        .push(nav)
        .push(Space::new(Length::Fill, Length::Fixed(0.0)))
        .push(bell)
        .push(corner);

    Container::new(bar)
        .padding([12, 24])
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(header_appearance)))
        .into()
}
