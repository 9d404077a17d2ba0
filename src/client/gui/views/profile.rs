use iced::widget::{container, Button, Column, Container, Row, Scrollable, Text, TextInput};
use iced::{Alignment, Color, Element, Length};

use crate::client::gui::widgets::alert::error_banner;
use crate::client::gui::widgets::header::header;
use crate::client::gui::widgets::style::{
    card_appearance, page_appearance, BOLD_FONT, TEXT_SECONDARY,
};
use crate::client::models::app_state::{AppState, Route};
use crate::client::models::messages::Message;
use crate::common::models::User;

fn avatar_appearance(_: &iced::Theme) -> container::Appearance {
    container::Appearance {
        background: Some(iced::Background::Color(Color::from_rgb(0.85, 0.91, 1.0))),
        border: iced::Border {
            width: 0.0,
            color: Color::TRANSPARENT,
            radius: 40.0.into(),
        },
        ..Default::default()
    }
}

fn group_row_appearance(_: &iced::Theme) -> container::Appearance {
    container::Appearance {
        background: Some(iced::Background::Color(Color::from_rgb(0.97, 0.97, 0.98))),
        border: iced::Border {
            width: 0.0,
            color: Color::TRANSPARENT,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

fn about_section<'a>(state: &'a AppState, profile: &'a User) -> Element<'a, Message> {
    let mut section = Column::new()
        .spacing(8)
        .push(Text::new("About me").font(BOLD_FONT).size(17));
    if state.profile_editing {
        section = section.push(
            TextInput::new("A few words about yourself", &state.profile_about_draft)
                .on_input(Message::ProfileAboutChanged)
                .padding(10),
        );
    } else {
        let about = profile
            .about
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or("No information");
        section = section.push(Text::new(about).size(14).style(TEXT_SECONDARY));
    }
    section.into()
}

pub fn view(state: &AppState) -> Element<'_, Message> {
    let is_own = match (state.route, &state.user) {
        (Route::Profile { user_id: None }, _) => true,
        (Route::Profile { user_id: Some(id) }, Some(user)) => id == user.id,
        _ => false,
    };

    let body: Element<Message> = if state.profile_loading {
        Text::new("Loading...").size(15).style(TEXT_SECONDARY).into()
    } else if let Some(profile) = &state.profile {
        let initial = profile.full_name.chars().next().unwrap_or('?');
        let identity = Row::new()
            .spacing(20)
            .align_items(Alignment::Center)
            .push(
                Container::new(Text::new(initial.to_string()).size(30))
                    .width(Length::Fixed(80.0))
                    .height(Length::Fixed(80.0))
                    .center_x()
                    .center_y()
                    .style(iced::theme::Container::Custom(Box::new(avatar_appearance))),
            )
            .push(
                Column::new()
                    .spacing(4)
                    .push(Text::new(&profile.full_name).font(BOLD_FONT).size(22))
                    .push(Text::new(&profile.email).size(15).style(TEXT_SECONDARY)),
            );

        let mut card = Column::new()
            .spacing(20)
            .push(identity)
            .push(
                Column::new()
                    .spacing(4)
                    .push(Text::new("Role").font(BOLD_FONT).size(17))
                    .push(Text::new(profile.role.label()).size(14).style(TEXT_SECONDARY)),
            );

        if let Some(error) = &state.profile_error {
            card = card.push(error_banner(error));
        }

        if is_own {
            card = card.push(about_section(state, profile));
        }

        let mut groups_section = Column::new()
            .spacing(8)
            .push(Text::new("Groups").font(BOLD_FONT).size(17));
        if profile.groups.is_empty() {
            groups_section = groups_section
                .push(Text::new("No groups yet").size(14).style(TEXT_SECONDARY));
        } else {
            for group in &profile.groups {
                let role_label = group
                    .role
                    .map(|r| r.label())
                    .unwrap_or("Member");
                groups_section = groups_section.push(
                    Container::new(
                        Column::new()
                            .spacing(2)
                            .push(Text::new(&group.name).size(15))
                            .push(
                                Text::new(format!("Role: {}", role_label))
                                    .size(12)
                                    .style(TEXT_SECONDARY),
                            ),
                    )
                    .padding(10)
                    .width(Length::Fill)
                    .style(iced::theme::Container::Custom(Box::new(
                        group_row_appearance,
                    ))),
                );
            }
        }
        card = card.push(groups_section);

        if is_own {
            let actions: Element<Message> = if state.profile_editing {
                Row::new()
                    .spacing(12)
                    .push(
                        Button::new(Text::new("Save").size(14))
                            .style(iced::theme::Button::Primary)
                            .on_press(Message::ProfileSave)
                            .padding([10, 24]),
                    )
                    .push(
                        Button::new(Text::new("Cancel").size(14))
                            .style(iced::theme::Button::Secondary)
                            .on_press(Message::ProfileCancelEdit)
                            .padding([10, 24]),
                    )
                    .into()
            } else {
                Button::new(Text::new("Edit").size(14))
                    .style(iced::theme::Button::Primary)
                    .on_press(Message::ProfileEdit)
                    .padding([10, 24])
                    .into()
            };
            card = card.push(actions).push(
                Button::new(Text::new("Log out").size(14))
                    .style(iced::theme::Button::Destructive)
                    .on_press(Message::Logout)
                    .padding([10, 24]),
            );
        }

        Container::new(card)
            .padding(32)
            .width(Length::Fixed(560.0))
            .style(iced::theme::Container::Custom(Box::new(card_appearance)))
            .into()
    } else if let Some(error) = &state.profile_error {
        error_banner(error)
    } else {
        Text::new("Profile not found").size(15).style(TEXT_SECONDARY).into()
    };

    let content = Column::new()
        .align_items(Alignment::Center)
        .padding(32)
        .push(body)
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
