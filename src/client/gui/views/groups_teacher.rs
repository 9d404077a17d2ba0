use iced::widget::{Button, Column, Container, Row, Scrollable, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::widgets::alert::error_banner;
use crate::client::gui::widgets::header::header;
use crate::client::gui::widgets::style::{
    admin_badge_appearance, card_appearance, page_appearance, student_badge_appearance,
    teacher_badge_appearance, BOLD_FONT, TEXT_SECONDARY,
};
use crate::client::models::app_state::AppState;
use crate::client::models::messages::Message;
use crate::common::models::{Group, Role};

pub fn role_badge(role: Role) -> Element<'static, Message> {
    let appearance = match role {
        Role::Admin => admin_badge_appearance,
        Role::Teacher => teacher_badge_appearance,
        Role::Student => student_badge_appearance,
    };
    Container::new(Text::new(format!("Your role: {}", role.label())).size(12))
        .padding([2, 8])
        .style(iced::theme::Container::Custom(Box::new(appearance)))
        .into()
}

fn group_card<'a>(group: &'a Group, viewer_id: i64) -> Element<'a, Message> {
    let role = group.role_of(viewer_id);
    let mut actions = Row::new().spacing(8).push(
        Button::new(Text::new("Open").size(13))
            .style(iced::theme::Button::Primary)
            .on_press(Message::OpenGroupDetail { group_id: group.id })
            .padding([6, 16]),
    );
    // Only the group's admin may delete it.
    if let Role::Admin = role {
        actions = actions.push(
            Button::new(Text::new("Delete").size(13))
                .style(iced::theme::Button::Destructive)
                .on_press(Message::AskDeleteGroup {
                    group_id: group.id,
                    name: group.name.clone(),
                })
                .padding([6, 16]),
        );
    }

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
            .push(role_badge(role))
            .push(actions),
    )
    .padding(16)
    .width(Length::FillPortion(1))
    .style(iced::theme::Container::Custom(Box::new(card_appearance)))
    .into()
}

fn create_group_form(state: &AppState) -> Element<'_, Message> {
    let mut form = Column::new()
        .spacing(14)
        .push(Text::new("Create a new group").font(BOLD_FONT).size(20))
        .push(
            TextInput::new("Group name", &state.create_group_name)
                .on_input(Message::CreateGroupNameChanged)
                .padding(10),
        )
        .push(
            TextInput::new("Description", &state.create_group_info)
                .on_input(Message::CreateGroupInfoChanged)
                .on_submit(Message::CreateGroupSubmit)
                .padding(10),
        );
    if let Some(error) = &state.create_group_error {
        form = form.push(error_banner(error));
    }
    form = form.push(
        Row::new()
            .spacing(12)
            .push(
                Button::new(Text::new("Create").size(14))
                    .style(iced::theme::Button::Primary)
                    .on_press(Message::CreateGroupSubmit)
                    .padding([10, 24]),
            )
            .push(
                Button::new(Text::new("Cancel").size(14))
                    .style(iced::theme::Button::Secondary)
                    .on_press(Message::ShowCreateGroup(false))
                    .padding([10, 24]),
            ),
    );

    Container::new(form)
        .padding(32)
        .width(Length::Fixed(420.0))
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .into()
}

fn delete_confirmation<'a>(name: &'a str) -> Element<'a, Message> {
    Container::new(
        Column::new()
            .spacing(16)
            .align_items(Alignment::Center)
            .push(
                Text::new("Delete this group?")
                    .font(BOLD_FONT)
                    .size(20),
            )
            .push(
                Text::new(format!(
                    "\"{}\" and all of its posts will be gone. This cannot be undone.",
                    name
                ))
                .size(14)
                .style(TEXT_SECONDARY),
            )
            .push(
                Row::new()
                    .spacing(12)
                    .push(
                        Button::new(Text::new("Delete").size(14))
                            .style(iced::theme::Button::Destructive)
                            .on_press(Message::ConfirmDeleteGroup)
                            .padding([10, 24]),
                    )
                    .push(
                        Button::new(Text::new("Cancel").size(14))
                            .style(iced::theme::Button::Secondary)
                            .on_press(Message::CancelDeleteGroup)
                            .padding([10, 24]),
                    ),
            ),
    )
    .padding(32)
    .width(Length::Fixed(440.0))
    .style(iced::theme::Container::Custom(Box::new(card_appearance)))
    .into()
}

pub fn view(state: &AppState) -> Element<'_, Message> {
    let viewer_id = state.user.as_ref().map(|u| u.id).unwrap_or_default();

    let content: Element<Message> = if state.show_create_group {
        Column::new()
            .align_items(Alignment::Center)
            .push(create_group_form(state))
            .width(Length::Fill)
            .into()
    } else if let Some((_, name)) = &state.group_to_delete {
        Column::new()
            .align_items(Alignment::Center)
            .push(delete_confirmation(name))
            .width(Length::Fill)
            .into()
    } else {
        let title_row = Row::new()
            .spacing(16)
            .align_items(Alignment::Center)
            .push(Text::new("My groups").font(BOLD_FONT).size(26))
            .push(
                Button::new(Text::new("Create group").size(14))
                    .style(iced::theme::Button::Primary)
                    .on_press(Message::ShowCreateGroup(true))
                    .padding([10, 20]),
            );

        let mut listing = Column::new().spacing(16).push(title_row);
        if let Some(error) = &state.groups_error {
            listing = listing.push(error_banner(error));
        }
        if state.groups_loading {
            listing = listing.push(Text::new("Loading...").size(15).style(TEXT_SECONDARY));
        } else if state.groups.is_empty() {
            listing = listing.push(
                Text::new("No groups yet. Create the first one!")
                    .size(15)
                    .style(TEXT_SECONDARY),
            );
        } else {
            // Own (admin) groups first, then groups taught in, then the rest.
            let mut sorted: Vec<&Group> = state.groups.iter().collect();
            sorted.sort_by_key(|g| g.role_of(viewer_id).rank());
            for chunk in sorted.chunks(3) {
                let mut row = Row::new().spacing(16);
                for group in chunk {
                    row = row.push(group_card(group, viewer_id));
                }
                listing = listing.push(row);
            }
        }
        listing.width(Length::Fill).into()
    };

    let page = Column::new().push(header(state)).push(
        Scrollable::new(Container::new(content).padding(32))
            .width(Length::Fill)
            .height(Length::Fill),
    );

    Container::new(page)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(page_appearance)))
        .into()
}
