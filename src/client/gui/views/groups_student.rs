use iced::widget::{Button, Column, Container, Row, Scrollable, Text};
use iced::{Element, Length};

use crate::client::gui::views::groups_teacher::role_badge;
use crate::client::gui::widgets::alert::error_banner;
use crate::client::gui::widgets::header::header;
use crate::client::gui::widgets::style::{
    card_appearance, page_appearance, BOLD_FONT, TEXT_SECONDARY,
};
use crate::client::models::app_state::AppState;
use crate::client::models::messages::Message;
use crate::common::models::Group;

fn group_card<'a>(group: &'a Group, viewer_id: i64) -> Element<'a, Message> {
    Container::new(
        Column::new()
            .spacing(8)
            .push(Text::new(&group.name).font(BOLD_FONT).size(17))
            .push(Text::new(&group.info).size(13).style(TEXT_SECONDARY))
            .push(
                Text::new(format!("Members: {}", group.members.len()))
                    .size(12)
                    .style(TEXT_SECONDARY),
            )
            .push(role_badge(group.role_of(viewer_id)))
            .push(
                Button::new(Text::new("Open").size(13))
                    .style(iced::theme::Button::Primary)
                    .on_press(Message::OpenGroupDetail { group_id: group.id })
                    .padding([6, 16]),
            ),
    )
    .padding(16)
    .width(Length::FillPortion(1))
    .style(iced::theme::Container::Custom(Box::new(card_appearance)))
    .into()
}

pub fn view(state: &AppState) -> Element<'_, Message> {
    let viewer_id = state.user.as_ref().map(|u| u.id).unwrap_or_default();

    let mut listing = Column::new()
        .spacing(16)
        .push(Text::new("My groups").font(BOLD_FONT).size(26));
    if let Some(error) = &state.groups_error {
        listing = listing.push(error_banner(error));
    }
    if state.groups_loading {
        listing = listing.push(Text::new("Loading...").size(15).style(TEXT_SECONDARY));
    } else if state.groups.is_empty() {
        listing = listing.push(
            Text::new("You have no groups yet. Accept an invitation to join one!")
                .size(15)
                .style(TEXT_SECONDARY),
        );
    } else {
        for chunk in state.groups.chunks(2) {
            let mut row = Row::new().spacing(16);
            for group in chunk {
                row = row.push(group_card(group, viewer_id));
            }
            listing = listing.push(row);
        }
    }

    let page = Column::new().push(header(state)).push(
        Scrollable::new(Container::new(listing.width(Length::Fill)).padding(32))
            .width(Length::Fill)
            .height(Length::Fill),
    );

    Container::new(page)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(page_appearance)))
        .into()
}
