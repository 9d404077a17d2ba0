use iced::widget::{container, Button, Column, Container, Row, Scrollable, Space, Text, TextInput};
use iced::{Alignment, Color, Element, Length};
use iced_aw::DatePicker;

use crate::client::gui::widgets::alert::error_banner;
use crate::client::gui::widgets::header::header;
use crate::client::gui::widgets::style::{
    card_appearance, page_appearance, ACCENT, BOLD_FONT, DANGER, TEXT_SECONDARY,
};
use crate::client::models::app_state::{picker_date, AppState, Route};
use crate::client::models::messages::Message;
use crate::common::models::{Comment, Post, Role, User};
use crate::common::validate::format_date_dmy;

fn comment_appearance(_: &iced::Theme) -> container::Appearance {
    container::Appearance {
        background: Some(iced::Background::Color(Color::from_rgb(0.96, 0.96, 0.97))),
        border: iced::Border {
            width: 0.0,
            color: Color::TRANSPARENT,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

fn reply_appearance(_: &iced::Theme) -> container::Appearance {
    container::Appearance {
        background: Some(iced::Background::Color(Color::from_rgb(0.93, 0.96, 1.0))),
        border: iced::Border {
            width: 0.0,
            color: Color::TRANSPARENT,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

/// May the viewer delete this comment? Admins and the comment's author may.
fn can_delete_comment(viewer: &Option<User>, comment: &Comment) -> bool {
    match viewer {
        Some(user) => match user.role {
            Role::Admin => true,
            Role::Teacher | Role::Student => user.id == comment.author,
        },
        None => false,
    }
}

fn parent_quote<'a>(post: &'a Post, parent_id: i64) -> Element<'a, Message> {
    // The parent may have been deleted; render a fallback line then.
    match post.comments.iter().find(|c| c.id == parent_id) {
        Some(parent) => {
            let role_suffix = parent
                .author_role
                .as_deref()
                .filter(|r| !r.is_empty())
                .map(|r| format!(" ({})", r))
                .unwrap_or_default();
            Text::new(format!(
                "↳ Replying to {}{}: {}",
                parent.author_name,
                role_suffix,
                parent.excerpt()
            ))
            .size(12)
            .style(TEXT_SECONDARY)
            .into()
        }
        None => Text::new("↳ Replying to a deleted comment")
            .size(12)
            .style(TEXT_SECONDARY)
            .into(),
    }
}

fn comment_item<'a>(state: &'a AppState, post: &'a Post, comment: &'a Comment) -> Element<'a, Message> {
    let mut head = Row::new()
        .spacing(8)
        .align_items(Alignment::Center)
        .push(Text::new(&comment.author_name).font(BOLD_FONT).size(13));
    if let Some(role) = comment.author_role.as_deref().filter(|r| !r.is_empty()) {
        head = head.push(Text::new(format!("({})", role)).size(12).style(ACCENT));
    }
    head = head
        .push(
            Text::new(format_date_dmy(&comment.created_at))
                .size(11)
                .style(TEXT_SECONDARY),
        )
        .push(Space::new(Length::Fill, Length::Fixed(0.0)));
    if can_delete_comment(&state.user, comment) {
        head = head.push(
            Button::new(Text::new("Delete").size(11).style(DANGER))
                .style(iced::theme::Button::Text)
                .on_press(Message::DeleteComment {
                    comment_id: comment.id,
                })
                .padding(0),
        );
    }
    head = head.push(
        Button::new(Text::new("Reply").size(11).style(ACCENT))
            .style(iced::theme::Button::Text)
            .on_press(Message::ReplyToComment {
                comment_id: comment.id,
                author_name: comment.author_name.clone(),
            })
            .padding(0),
    );

    let mut body = Column::new()
        .spacing(4)
        .push(head)
        .push(Text::new(&comment.text).size(13));
    if let Some(parent_id) = comment.parent {
        body = body.push(parent_quote(post, parent_id));
    }

    // Replies render one indent level deep, whatever their parent was.
    let (appearance, left_pad): (fn(&iced::Theme) -> container::Appearance, u16) =
        if comment.parent.is_some() {
            (reply_appearance, 24)
        } else {
            (comment_appearance, 0)
        };

    Container::new(
        Container::new(body)
            .padding(10)
            .width(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(appearance))),
    )
    .padding([0, 0, 0, left_pad])
    .width(Length::Fill)
    .into()
}

fn comments_section<'a>(state: &'a AppState, post: &'a Post) -> Element<'a, Message> {
    let mut section = Column::new()
        .spacing(8)
        .push(Text::new("Comments").font(BOLD_FONT).size(17));
    if post.comments.is_empty() {
        section = section.push(Text::new("No comments yet").size(13).style(TEXT_SECONDARY));
    } else {
        for comment in &post.comments {
            section = section.push(comment_item(state, post, comment));
        }
    }

    if let Some(reply_to) = state.reply_to {
        section = section.push(
            Row::new()
                .spacing(6)
                .align_items(Alignment::Center)
                .push(
                    Text::new(format!("Replying to comment #{}", reply_to))
                        .size(12)
                        .style(ACCENT),
                )
                .push(
                    Button::new(Text::new("×").size(13).style(DANGER))
                        .style(iced::theme::Button::Text)
                        .on_press(Message::CancelReply)
                        .padding(0),
                ),
        );
    }
    section = section.push(
        Row::new()
            .spacing(10)
            .push(
                TextInput::new("Add a comment...", &state.comment_input)
                    .on_input(Message::CommentInputChanged)
                    .on_submit(Message::SubmitComment)
                    .padding(10),
            )
            .push(
                Button::new(Text::new("Send").size(13))
                    .style(iced::theme::Button::Primary)
                    .on_press(Message::SubmitComment)
                    .padding([8, 16]),
            ),
    );
    section.into()
}

fn edit_form(state: &AppState) -> Element<'_, Message> {
    let deadline_label = match &state.edit_deadline {
        Some(d) => format!("Deadline: {}", format_date_dmy(d)),
        None => "No deadline".to_string(),
    };
    let picker = DatePicker::new(
        state.show_edit_deadline_picker,
        picker_date(&state.edit_deadline),
        Button::new(Text::new("Pick a deadline").size(13))
            .style(iced::theme::Button::Secondary)
            .on_press(Message::EditChooseDeadline)
            .padding([6, 12]),
        Message::EditCancelDeadline,
        Message::EditSubmitDeadline,
    );
    let mut deadline_row = Row::new()
        .spacing(10)
        .align_items(Alignment::Center)
        .push(picker)
        .push(Text::new(deadline_label).size(13).style(TEXT_SECONDARY));
    if state.edit_deadline.is_some() {
        deadline_row = deadline_row.push(
            Button::new(Text::new("Clear").size(12))
                .style(iced::theme::Button::Text)
                .on_press(Message::EditClearDeadline)
                .padding([2, 6]),
        );
    }

    let mut form = Column::new()
        .spacing(12)
        .push(
            TextInput::new("Title", &state.edit_title)
                .on_input(Message::EditTitleChanged)
                .padding(10),
        )
        .push(
            TextInput::new("Content", &state.edit_content)
                .on_input(Message::EditContentChanged)
                .padding(10),
        )
        .push(deadline_row);
    if let Some(error) = &state.edit_deadline_error {
        form = form.push(error_banner(error));
    }

    // Stored files can be marked for deletion and restored before saving.
    if let Some(post) = &state.post {
        let mut files = Column::new()
            .spacing(4)
            .push(Text::new("Files").font(BOLD_FONT).size(14));
        if post.files.is_empty() {
            files = files.push(Text::new("No files").size(13).style(TEXT_SECONDARY));
        }
        for file in &post.files {
            let marked = state.files_to_delete.contains(&file.id);
            let name: Element<Message> = if marked {
                Text::new(format!("{} (will be removed)", file.file_name()))
                    .size(13)
                    .style(DANGER)
                    .into()
            } else {
                Text::new(file.file_name()).size(13).into()
            };
            let toggle = if marked {
                Button::new(Text::new("Restore").size(12))
                    .style(iced::theme::Button::Text)
                    .on_press(Message::UnmarkFileForDelete(file.id))
                    .padding(0)
            } else {
                Button::new(Text::new("Delete").size(12).style(DANGER))
                    .style(iced::theme::Button::Text)
                    .on_press(Message::MarkFileForDelete(file.id))
                    .padding(0)
            };
            files = files.push(
                Row::new()
                    .spacing(8)
                    .align_items(Alignment::Center)
                    .push(name)
                    .push(toggle),
            );
        }
        form = form.push(files);
    }

    form = form.push(
        Row::new()
            .spacing(10)
            .push(
                TextInput::new("Path to a file to attach", &state.edit_file_path_input)
                    .on_input(Message::EditFilePathChanged)
                    .on_submit(Message::EditAttachFile)
                    .padding(10),
            )
            .push(
                Button::new(Text::new("Attach").size(13))
                    .style(iced::theme::Button::Secondary)
                    .on_press(Message::EditAttachFile)
                    .padding([8, 14]),
            ),
    );
    for (index, file) in state.edit_files.iter().enumerate() {
        form = form.push(
            Row::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(Text::new(&file.name).size(13))
                .push(
                    Button::new(Text::new("Remove").size(12))
                        .style(iced::theme::Button::Text)
                        .on_press(Message::EditRemovePendingFile(index))
                        .padding([2, 6]),
                ),
        );
    }
    if let Some(error) = &state.edit_error {
        form = form.push(error_banner(error));
    }
    form = form.push(
        Row::new()
            .spacing(12)
            .push(
                Button::new(Text::new("Save").size(14))
                    .style(iced::theme::Button::Primary)
                    .on_press(Message::EditPostSubmit)
                    .padding([10, 24]),
            )
            .push(
                Button::new(Text::new("Cancel").size(14))
                    .style(iced::theme::Button::Secondary)
                    .on_press(Message::CancelEditPost)
                    .padding([10, 24]),
            ),
    );
    form.into()
}

fn post_body<'a>(state: &'a AppState, post: &'a Post) -> Element<'a, Message> {
    let mut body = Column::new()
        .spacing(10)
        .push(Text::new(&post.title).font(BOLD_FONT).size(24))
        .push(Text::new(&post.content).size(14));
    if let Some(deadline) = &post.deadline {
        body = body.push(
            Text::new(format!("Deadline: {}", format_date_dmy(deadline)))
                .size(13)
                .style(TEXT_SECONDARY),
        );
    }

    let mut files = Column::new()
        .spacing(4)
        .push(Text::new("Files").font(BOLD_FONT).size(14));
    if post.files.is_empty() {
        files = files.push(Text::new("No files").size(13).style(TEXT_SECONDARY));
    }
    for file in &post.files {
        files = files.push(
            Row::new()
                .spacing(8)
                .push(Text::new(file.file_name()).size(13).style(ACCENT))
                .push(Text::new(&file.file).size(11).style(TEXT_SECONDARY)),
        );
    }
    body = body.push(files);

    // Only the author edits their post.
    if state.user.as_ref().map(|u| u.id) == Some(post.author) {
        body = body.push(
            Button::new(Text::new("Edit").size(14))
                .style(iced::theme::Button::Primary)
                .on_press(Message::EnterEditPost)
                .padding([10, 24]),
        );
    }
    body.into()
}

pub fn view(state: &AppState) -> Element<'_, Message> {
    let back_target = match state.route {
        Route::PostDetail { group_id, .. } => Message::OpenGroupDetail { group_id },
        _ => Message::OpenGroups,
    };

    let content: Element<Message> = if state.post_loading {
        Text::new("Loading...").size(15).style(TEXT_SECONDARY).into()
    } else if let Some(post) = &state.post {
        let mut card = Column::new().spacing(16).push(
            Row::new().push(Space::new(Length::Fill, Length::Fixed(0.0))).push(
                Button::new(Text::new("Back").size(13))
                    .style(iced::theme::Button::Destructive)
                    .on_press(back_target)
                    .padding([8, 20]),
            ),
        );
        if state.edit_mode {
            card = card.push(edit_form(state));
        } else {
            card = card.push(post_body(state, post));
        }
        if let Some(error) = &state.post_error {
            card = card.push(error_banner(error));
        }
        card = card.push(comments_section(state, post));

        Container::new(card)
            .padding(24)
            .width(Length::Fixed(720.0))
            .style(iced::theme::Container::Custom(Box::new(card_appearance)))
            .into()
    } else if let Some(error) = &state.post_error {
        error_banner(error)
    } else {
        Text::new("Post not found").size(15).style(TEXT_SECONDARY).into()
    };

    let page = Column::new().push(header(state)).push(
        Scrollable::new(
            Column::new()
                .align_items(Alignment::Center)
                .push(content)
                .width(Length::Fill)
                .padding(32),
        )
        .width(Length::Fill)
        .height(Length::Fill),
    );

    Container::new(page)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(page_appearance)))
        .into()
}
