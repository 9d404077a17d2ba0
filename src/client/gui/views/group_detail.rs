use iced::widget::{Button, Checkbox, Column, Container, Row, Scrollable, Space, Text, TextInput};
use iced::{Alignment, Element, Length};
use iced_aw::DatePicker;

use crate::client::gui::widgets::alert::{error_banner, success_banner};
use crate::client::gui::widgets::header::header;
use crate::client::gui::widgets::style::{
    admin_badge_appearance, card_appearance, info_appearance, page_appearance,
    teacher_badge_appearance, BOLD_FONT, TEXT_SECONDARY,
};
use crate::client::models::app_state::{picker_date, AppState};
use crate::client::models::messages::Message;
use crate::common::models::{Group, Role};
use crate::common::validate::format_date_dmy;

fn member_badge(role: Role) -> Option<Element<'static, Message>> {
    match role {
        Role::Admin => Some(
            Container::new(Text::new("Admin").size(11))
                .padding([2, 6])
                .style(iced::theme::Container::Custom(Box::new(
                    admin_badge_appearance,
                )))
                .into(),
        ),
        Role::Teacher => Some(
            Container::new(Text::new("Teacher").size(11))
                .padding([2, 6])
                .style(iced::theme::Container::Custom(Box::new(
                    teacher_badge_appearance,
                )))
                .into(),
        ),
        Role::Student => None,
    }
}

fn members_sidebar<'a>(group: &'a Group, viewer_id: i64) -> Element<'a, Message> {
    let viewer_role = group.role_of(viewer_id);
    let mut list = Column::new()
        .spacing(8)
        .push(Text::new("Members").font(BOLD_FONT).size(17));

    for member in &group.members {
        let mut row = Row::new().spacing(6).align_items(Alignment::Center).push(
            Button::new(Text::new(&member.name).size(14))
                .style(iced::theme::Button::Text)
                .on_press(Message::OpenProfile {
                    user_id: Some(member.id),
                })
                .padding(0),
        );
        if let Some(badge) = member_badge(member.role) {
            row = row.push(badge);
        }
        row = row.push(Space::new(Length::Fill, Length::Fixed(0.0)));

        // Per-member affordance, decided by the viewer's role in the group.
        match viewer_role {
            Role::Admin => {
                if member.id != viewer_id && member.role != Role::Admin {
                    row = row.push(
                        Button::new(Text::new("Exclude").size(12))
                            .style(iced::theme::Button::Destructive)
                            .on_press(Message::AskExcludeMember(member.clone()))
                            .padding([2, 8]),
                    );
                }
            }
            Role::Teacher | Role::Student => {
                if member.id == viewer_id {
                    row = row.push(
                        Button::new(Text::new("Leave").size(12))
                            .style(iced::theme::Button::Secondary)
                            .on_press(Message::ShowLeaveModal(true))
                            .padding([2, 8]),
                    );
                }
            }
        }
        list = list.push(row);
    }

    if let Role::Admin = viewer_role {
        list = list.push(
            Button::new(
                Container::new(Text::new("Invite").size(14))
                    .width(Length::Fill)
                    .center_x(),
            )
            .style(iced::theme::Button::Positive)
            .on_press(Message::ShowInviteModal(true))
            .padding(10)
            .width(Length::Fill),
        );
    }

    Container::new(list)
        .padding(16)
        .width(Length::Fixed(260.0))
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .into()
}

fn create_post_form(state: &AppState) -> Element<'_, Message> {
    let deadline_label = match &state.post_deadline {
        Some(d) => format!("Deadline: {}", format_date_dmy(d)),
        None => "No deadline".to_string(),
    };
    let picker = DatePicker::new(
        state.show_deadline_picker,
        picker_date(&state.post_deadline),
        Button::new(Text::new("Pick a deadline").size(13))
            .style(iced::theme::Button::Secondary)
            .on_press(Message::ChooseDeadline)
            .padding([6, 12]),
        Message::CancelDeadline,
        Message::SubmitDeadline,
    );
    let mut deadline_row = Row::new()
        .spacing(10)
        .align_items(Alignment::Center)
        .push(picker)
        .push(Text::new(deadline_label).size(13).style(TEXT_SECONDARY));
    if state.post_deadline.is_some() {
        deadline_row = deadline_row.push(
            Button::new(Text::new("Clear").size(12))
                .style(iced::theme::Button::Text)
                .on_press(Message::ClearDeadline)
                .padding([2, 6]),
        );
    }

    let mut form = Column::new()
        .spacing(12)
        .push(Text::new("Create a post").font(BOLD_FONT).size(20))
        .push(
            TextInput::new("Title", &state.post_title)
                .on_input(Message::PostTitleChanged)
                .padding(10),
        )
        .push(
            TextInput::new("Content", &state.post_content)
                .on_input(Message::PostContentChanged)
                .padding(10),
        )
        .push(deadline_row);
    if let Some(error) = &state.deadline_error {
        form = form.push(error_banner(error));
    }

    form = form.push(
        Row::new()
            .spacing(10)
            .push(
                TextInput::new("Path to a file to attach", &state.file_path_input)
                    .on_input(Message::FilePathInputChanged)
                    .on_submit(Message::AttachFile)
                    .padding(10),
            )
            .push(
                Button::new(Text::new("Attach").size(13))
                    .style(iced::theme::Button::Secondary)
                    .on_press(Message::AttachFile)
                    .padding([8, 14]),
            ),
    );
    for (index, file) in state.pending_files.iter().enumerate() {
        form = form.push(
            Row::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(Text::new(&file.name).size(13))
                .push(
                    Text::new(format!("{} B", file.size))
                        .size(12)
                        .style(TEXT_SECONDARY),
                )
                .push(
                    Button::new(Text::new("Remove").size(12))
                        .style(iced::theme::Button::Text)
                        .on_press(Message::RemovePendingFile(index))
                        .padding([2, 6]),
                ),
        );
    }
    if let Some(error) = &state.create_post_error {
        form = form.push(error_banner(error));
    }
    form = form.push(
        Row::new()
            .spacing(12)
            .push(
                Button::new(Text::new("Publish").size(14))
                    .style(iced::theme::Button::Primary)
                    .on_press(Message::CreatePostSubmit)
                    .padding([10, 24]),
            )
            .push(
                Button::new(Text::new("Cancel").size(14))
                    .style(iced::theme::Button::Secondary)
                    .on_press(Message::ShowCreatePost(false))
                    .padding([10, 24]),
            ),
    );

    Container::new(form)
        .padding(24)
        .width(Length::Fixed(520.0))
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .into()
}

fn confirm_delete_card(state: &AppState) -> Element<'_, Message> {
    let delete_label = if state.deleting { "Deleting..." } else { "Delete" };
    let mut delete = Button::new(Text::new(delete_label).size(14))
        .style(iced::theme::Button::Destructive)
        .padding([10, 24]);
    if !state.deleting {
        delete = delete.on_press(Message::ConfirmDeleteSelected);
    }
    Container::new(
        Column::new()
            .spacing(16)
            .align_items(Alignment::Center)
            .push(Text::new("Confirm deletion").font(BOLD_FONT).size(20))
            .push(
                Text::new(format!(
                    "Delete {} selected post(s)? This cannot be undone.",
                    state.selected_posts.len()
                ))
                .size(14)
                .style(TEXT_SECONDARY),
            )
            .push(
                Row::new().spacing(12).push(delete).push(
                    Button::new(Text::new("Cancel").size(14))
                        .style(iced::theme::Button::Secondary)
                        .on_press(Message::ShowConfirmDelete(false))
                        .padding([10, 24]),
                ),
            ),
    )
    .padding(32)
    .width(Length::Fixed(440.0))
    .style(iced::theme::Container::Custom(Box::new(card_appearance)))
    .into()
}

fn invite_card(state: &AppState) -> Element<'_, Message> {
    let mut form = Column::new()
        .spacing(14)
        .push(Text::new("Invite to the group").font(BOLD_FONT).size(20))
        .push(
            TextInput::new("Member's email", &state.invite_email)
                .on_input(Message::InviteEmailChanged)
                .on_submit(Message::InviteSubmit)
                .padding(10),
        );
    if let Some(error) = &state.invite_error {
        form = form.push(error_banner(error));
    }
    if let Some(success) = &state.invite_success {
        form = form.push(success_banner(success));
    }
    form = form.push(
        Row::new()
            .spacing(12)
            .push(
                Button::new(Text::new("Send invitation").size(14))
                    .style(iced::theme::Button::Positive)
                    .on_press(Message::InviteSubmit)
                    .padding([10, 24]),
            )
            .push(
                Button::new(Text::new("Cancel").size(14))
                    .style(iced::theme::Button::Secondary)
                    .on_press(Message::ShowInviteModal(false))
                    .padding([10, 24]),
            ),
    );

    Container::new(form)
        .padding(32)
        .width(Length::Fixed(420.0))
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .into()
}

fn exclude_card<'a>(member_name: &'a str) -> Element<'a, Message> {
    Container::new(
        Column::new()
            .spacing(16)
            .align_items(Alignment::Center)
            .push(Text::new("Exclude this member?").font(BOLD_FONT).size(20))
            .push(
                Text::new(format!(
                    "Are you sure you want to exclude {} from the group?",
                    member_name
                ))
                .size(14)
                .style(TEXT_SECONDARY),
            )
            .push(
                Row::new()
                    .spacing(12)
                    .push(
                        Button::new(Text::new("Exclude").size(14))
                            .style(iced::theme::Button::Destructive)
                            .on_press(Message::ConfirmExclude)
                            .padding([10, 24]),
                    )
                    .push(
                        Button::new(Text::new("Cancel").size(14))
                            .style(iced::theme::Button::Secondary)
                            .on_press(Message::CancelExclude)
                            .padding([10, 24]),
                    ),
            ),
    )
    .padding(32)
    .width(Length::Fixed(440.0))
    .style(iced::theme::Container::Custom(Box::new(card_appearance)))
    .into()
}

fn leave_card<'a>(group_name: &'a str) -> Element<'a, Message> {
    Container::new(
        Column::new()
            .spacing(16)
            .align_items(Alignment::Center)
            .push(Text::new("Leave the group?").font(BOLD_FONT).size(20))
            .push(
                Text::new(format!(
                    "Are you sure you want to leave \"{}\"?",
                    group_name
                ))
                .size(14)
                .style(TEXT_SECONDARY),
            )
            .push(
                Row::new()
                    .spacing(12)
                    .push(
                        Button::new(Text::new("Leave").size(14))
                            .style(iced::theme::Button::Primary)
                            .on_press(Message::ConfirmLeave)
                            .padding([10, 24]),
                    )
                    .push(
                        Button::new(Text::new("Cancel").size(14))
                            .style(iced::theme::Button::Secondary)
                            .on_press(Message::ShowLeaveModal(false))
                            .padding([10, 24]),
                    ),
            ),
    )
    .padding(32)
    .width(Length::Fixed(440.0))
    .style(iced::theme::Container::Custom(Box::new(card_appearance)))
    .into()
}

fn posts_section<'a>(state: &'a AppState, group: &'a Group) -> Element<'a, Message> {
    let mut section = Column::new().spacing(8).push(
        Text::new("Group posts")
            .font(BOLD_FONT)
            .size(17),
    );

    if state.mass_delete_mode {
        let mut delete_selected = Button::new(Text::new("Delete selected").size(13))
            .style(iced::theme::Button::Destructive)
            .padding([8, 16]);
        if !state.selected_posts.is_empty() && !state.deleting {
            delete_selected = delete_selected.on_press(Message::ShowConfirmDelete(true));
        }
        section = section.push(
            Row::new()
                .spacing(10)
                .push(delete_selected)
                .push(
                    Button::new(Text::new("Cancel").size(13))
                        .style(iced::theme::Button::Secondary)
                        .on_press(Message::CancelMassDelete)
                        .padding([8, 16]),
                ),
        );
    }

    if group.posts.is_empty() {
        section = section.push(Text::new("No posts yet").size(14).style(TEXT_SECONDARY));
        return section.into();
    }

    for post in group.sorted_posts() {
        let mut row = Row::new().spacing(8).align_items(Alignment::Center);
        if state.mass_delete_mode {
            let post_id = post.id;
            row = row.push(
                Checkbox::new("", state.selected_posts.contains(&post.id))
                    .on_toggle(move |_| Message::TogglePostSelected(post_id)),
            );
        }
        row = row.push(
            Button::new(Text::new(&post.title).size(15))
                .style(iced::theme::Button::Text)
                .on_press(Message::OpenPostDetail {
                    group_id: group.id,
                    post_id: post.id,
                })
                .padding(0),
        );
        if let Some(deadline) = &post.deadline {
            row = row.push(
                Text::new(format!("Deadline: {}", format_date_dmy(deadline)))
                    .size(12)
                    .style(TEXT_SECONDARY),
            );
        }
        section = section.push(row);
    }
    section.into()
}

pub fn view(state: &AppState) -> Element<'_, Message> {
    let viewer_id = state.user.as_ref().map(|u| u.id).unwrap_or_default();

    let content: Element<Message> = if state.group_loading {
        Text::new("Loading...").size(15).style(TEXT_SECONDARY).into()
    } else if let Some(group) = &state.group {
        if state.show_create_post {
            Column::new()
                .align_items(Alignment::Center)
                .push(create_post_form(state))
                .width(Length::Fill)
                .into()
        } else if state.show_confirm_delete {
            Column::new()
                .align_items(Alignment::Center)
                .push(confirm_delete_card(state))
                .width(Length::Fill)
                .into()
        } else if state.show_invite_modal {
            Column::new()
                .align_items(Alignment::Center)
                .push(invite_card(state))
                .width(Length::Fill)
                .into()
        } else if let Some(member) = &state.member_to_exclude {
            Column::new()
                .align_items(Alignment::Center)
                .push(exclude_card(&member.name))
                .width(Length::Fill)
                .into()
        } else if state.show_leave_modal {
            Column::new()
                .align_items(Alignment::Center)
                .push(leave_card(&group.name))
                .width(Length::Fill)
                .into()
        } else {
            let mut main = Column::new()
                .spacing(12)
                .push(
                    Row::new().push(Space::new(Length::Fill, Length::Fixed(0.0))).push(
                        Button::new(Text::new("Back").size(13))
                            .style(iced::theme::Button::Destructive)
                            .on_press(Message::OpenGroups)
                            .padding([8, 20]),
                    ),
                )
                .push(Text::new(&group.name).font(BOLD_FONT).size(26))
                .push(
                    Container::new(Text::new(&group.info).size(14))
                        .padding(12)
                        .width(Length::Fill)
                        .style(iced::theme::Container::Custom(Box::new(info_appearance))),
                );
            if let Some(error) = &state.group_error {
                main = main.push(error_banner(error));
            }

            // Admin-only affordances, gated by the derived role.
            if let Role::Admin = group.role_of(viewer_id) {
                let mut mass_delete = Button::new(Text::new("Delete posts").size(14))
                    .style(iced::theme::Button::Destructive)
                    .padding([10, 20]);
                if !state.mass_delete_mode && !group.posts.is_empty() {
                    mass_delete = mass_delete.on_press(Message::EnterMassDelete);
                }
                main = main.push(
                    Row::new()
                        .spacing(12)
                        .push(
                            Button::new(Text::new("Create post").size(14))
                                .style(iced::theme::Button::Primary)
                                .on_press(Message::ShowCreatePost(true))
                                .padding([10, 20]),
                        )
                        .push(mass_delete),
                );
            }
            main = main.push(posts_section(state, group));

            Row::new()
                .spacing(24)
                .push(members_sidebar(group, viewer_id))
                .push(main.width(Length::Fill))
                .width(Length::Fill)
                .into()
        }
    } else {
        let text = state
            .group_error
            .as_deref()
            .unwrap_or("Group not found");
        Text::new(text).size(15).style(TEXT_SECONDARY).into()
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
