use iced::widget::{container, Button, Column, Container, Row, Scrollable, Space, Text};
use iced::{Alignment, Color, Element, Length};

use crate::client::gui::widgets::alert::error_banner;
use crate::client::gui::widgets::header::header;
use crate::client::gui::widgets::style::{
    card_appearance, page_appearance, ACCENT, BOLD_FONT, DANGER, SUCCESS, TEXT_SECONDARY,
};
use crate::client::models::app_state::AppState;
use crate::client::models::messages::Message;
use crate::common::models::{InviteAction, NotifStatus, NotifType, Notification, Role};
use crate::common::validate::format_date_dmy;

fn alert_card_appearance(accent: Color) -> container::Appearance {
    container::Appearance {
        background: Some(iced::Background::Color(Color::WHITE)),
        border: iced::Border {
            width: 1.0,
            color: accent,
            radius: 10.0.into(),
        },
        shadow: iced::Shadow {
            offset: iced::Vector::new(0.0, 2.0),
            blur_radius: 6.0,
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.10),
        },
        ..Default::default()
    }
}

fn sender_line(notification: &Notification, prefix: &str) -> String {
    let name = notification
        .from_user_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or("Admin");
    format!("{} {}", prefix, name)
}

fn invite_actions(state: &AppState, notification: &Notification) -> Element<'static, Message> {
    let accept_busy = state.action_loading == Some((notification.id, InviteAction::Accept));
    let decline_busy = state.action_loading == Some((notification.id, InviteAction::Decline));

    let mut accept = Button::new(
        Text::new(if accept_busy { "Accepting..." } else { "Accept" }).size(13),
    )
    .style(iced::theme::Button::Positive)
    .padding([8, 18]);
    let mut decline = Button::new(
        Text::new(if decline_busy { "Declining..." } else { "Decline" }).size(13),
    )
    .style(iced::theme::Button::Destructive)
    .padding([8, 18]);

    // The in-flight action's own button is disabled; a repeated click is
    // suppressed.
    if !accept_busy {
        accept = accept.on_press(Message::InviteActionTriggered {
            notif_id: notification.id,
            action: InviteAction::Accept,
        });
    }
    if !decline_busy {
        decline = decline.on_press(Message::InviteActionTriggered {
            notif_id: notification.id,
            action: InviteAction::Decline,
        });
    }

    Row::new().spacing(12).push(accept).push(decline).into()
}

fn invite_card<'a>(state: &'a AppState, notification: &'a Notification) -> Element<'a, Message> {
    let mut card = Column::new()
        .spacing(6)
        .push(
            Row::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(Text::new("Group invitation").font(BOLD_FONT).size(16))
                .push(
                    Text::new(notification.group_name.as_deref().unwrap_or(""))
                        .size(15)
                        .style(ACCENT),
                ),
        )
        .push(Text::new(sender_line(notification, "Invited by")).size(13))
        .push(
            Text::new(format_date_dmy(&notification.created_at))
                .size(11)
                .style(TEXT_SECONDARY),
        );

    card = match notification.status {
        NotifStatus::Pending => card.push(invite_actions(state, notification)),
        NotifStatus::Accepted => card.push(
            Text::new("You accepted the invitation")
                .font(BOLD_FONT)
                .size(13)
                .style(SUCCESS),
        ),
        NotifStatus::Declined => card.push(
            Text::new("You declined the invitation")
                .font(BOLD_FONT)
                .size(13)
                .style(DANGER),
        ),
        // Invites are never marked viewed by the backend.
        NotifStatus::Viewed => card,
    };

    Container::new(card)
        .padding(14)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            |_: &iced::Theme| alert_card_appearance(Color::from_rgb(0.66, 0.78, 0.99)),
        )))
        .into()
}

fn exclude_card(notification: &Notification) -> Element<'_, Message> {
    Container::new(
        Column::new()
            .spacing(6)
            .push(
                Row::new()
                    .spacing(8)
                    .align_items(Alignment::Center)
                    .push(
                        Text::new("Removed from group")
                            .font(BOLD_FONT)
                            .size(16)
                            .style(DANGER),
                    )
                    .push(
                        Text::new(notification.group_name.as_deref().unwrap_or(""))
                            .size(15)
                            .style(ACCENT),
                    ),
            )
            .push(Text::new(sender_line(notification, "Excluded by")).size(13))
            .push(
                Text::new(format_date_dmy(&notification.created_at))
                    .size(11)
                    .style(TEXT_SECONDARY),
            ),
    )
    .padding(14)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        |_: &iced::Theme| alert_card_appearance(DANGER),
    )))
    .into()
}

fn reminder_card(notification: &Notification) -> Element<'_, Message> {
    let accent = if notification.is_overdue() { DANGER } else { ACCENT };
    Container::new(
        Column::new()
            .spacing(6)
            .push(Text::new("Deadline reminder").font(BOLD_FONT).size(16))
            .push(
                Text::new(format!(
                    "Group: {}",
                    notification.group_name.as_deref().unwrap_or("")
                ))
                .size(13),
            )
            .push(
                Text::new(format!(
                    "Post: {}",
                    notification.post_title.as_deref().unwrap_or("")
                ))
                .size(13),
            )
            .push(
                Text::new(format!(
                    "Due: {}",
                    notification
                        .deadline_date
                        .as_deref()
                        .map(format_date_dmy)
                        .unwrap_or_default()
                ))
                .size(13)
                .style(accent),
            )
            .push(
                Text::new(format!(
                    "Today: {}",
                    notification
                        .current_date
                        .as_deref()
                        .map(format_date_dmy)
                        .unwrap_or_default()
                ))
                .size(13)
                .style(TEXT_SECONDARY),
            )
            .push(
                Row::new()
                    .push(Space::new(Length::Fill, Length::Fixed(0.0)))
                    .push(
                        Button::new(Text::new("Dismiss").size(12))
                            .style(iced::theme::Button::Secondary)
                            .on_press(Message::DismissReminder {
                                notif_id: notification.id,
                            })
                            .padding([6, 14]),
                    ),
            ),
    )
    .padding(14)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
        alert_card_appearance(accent)
    })))
    .into()
}

pub fn view(state: &AppState) -> Element<'_, Message> {
    let is_student = matches!(
        state.user.as_ref().map(|u| u.role),
        Some(Role::Student)
    );

    let mut listing = Column::new()
        .spacing(12)
        .push(Text::new("Notifications").font(BOLD_FONT).size(26));

    if let Some(error) = &state.notif_error {
        listing = listing.push(error_banner(error));
    }

    if state.notif_loading {
        listing = listing.push(Text::new("Loading...").size(15).style(TEXT_SECONDARY));
    } else {
        let general: Vec<&Notification> = state
            .notifications
            .iter()
            .filter(|n| n.notif_type != NotifType::Reminder)
            .collect();
        if general.is_empty() {
            listing = listing.push(
                Text::new("No notifications")
                    .size(15)
                    .style(TEXT_SECONDARY),
            );
        }
        for notification in general {
            let card = match notification.notif_type {
                NotifType::Invite => invite_card(state, notification),
                NotifType::Exclude => exclude_card(notification),
                NotifType::Reminder => continue,
            };
            listing = listing.push(card);
        }

        // Deadline reminders only exist for students.
        if is_student {
            listing = listing
                .push(Space::new(Length::Fill, Length::Fixed(16.0)))
                .push(Text::new("Reminders").font(BOLD_FONT).size(26));
            let reminders: Vec<&Notification> = state
                .notifications
                .iter()
                .filter(|n| n.notif_type == NotifType::Reminder)
                .collect();
            if reminders.is_empty() {
                listing = listing.push(
                    Text::new("No reminders").size(15).style(TEXT_SECONDARY),
                );
            }
            for notification in reminders {
                listing = listing.push(reminder_card(notification));
            }
        }
    }

    let page = Column::new().push(header(state)).push(
        Scrollable::new(
            Column::new()
                .align_items(Alignment::Center)
                .push(
                    Container::new(listing.width(Length::Fixed(640.0)))
                        .padding(24)
                        .style(iced::theme::Container::Custom(Box::new(card_appearance))),
                )
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
