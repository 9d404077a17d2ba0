// Shared palette and container styles. Light theme matching the TaskTalk
// web look: pale blue page, white cards, blue accents.
use iced::widget::container;
use iced::{Color, Font};

pub const BG_MAIN: Color = Color::from_rgb(0.94, 0.96, 1.0);
pub const CARD_BG: Color = Color::WHITE;
pub const INFO_BG: Color = Color::from_rgb(1.0, 0.97, 0.80);
pub const ACCENT: Color = Color::from_rgb(0.23, 0.51, 0.96);
pub const SUCCESS: Color = Color::from_rgb(0.13, 0.70, 0.36);
pub const DANGER: Color = Color::from_rgb(0.94, 0.27, 0.27);
pub const TEXT_PRIMARY: Color = Color::from_rgb(0.15, 0.17, 0.21);
pub const TEXT_SECONDARY: Color = Color::from_rgb(0.42, 0.45, 0.50);

pub const EMOJI_FONT: Font = Font::with_name("Segoe UI Emoji");
pub const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

pub fn page_appearance(_: &iced::Theme) -> container::Appearance {
    container::Appearance {
        background: Some(iced::Background::Color(BG_MAIN)),
        text_color: Some(TEXT_PRIMARY),
        ..Default::default()
    }
}

pub fn header_appearance(_: &iced::Theme) -> container::Appearance {
    container::Appearance {
        background: Some(iced::Background::Color(CARD_BG)),
        text_color: Some(TEXT_PRIMARY),
        shadow: iced::Shadow {
            offset: iced::Vector::new(0.0, 2.0),
            blur_radius: 8.0,
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.12),
        },
        ..Default::default()
    }
}

pub fn card_appearance(_: &iced::Theme) -> container::Appearance {
    container::Appearance {
        background: Some(iced::Background::Color(CARD_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            width: 0.0,
            color: Color::TRANSPARENT,
            radius: 12.0.into(),
        },
        shadow: iced::Shadow {
            offset: iced::Vector::new(0.0, 2.0),
            blur_radius: 6.0,
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.12),
        },
        ..Default::default()
    }
}

/// Yellow info box used for the group description.
pub fn info_appearance(_: &iced::Theme) -> container::Appearance {
    container::Appearance {
        background: Some(iced::Background::Color(INFO_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            width: 0.0,
            color: Color::TRANSPARENT,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

/// Small red disc behind the unread counter on the bell.
pub fn counter_badge_appearance(_: &iced::Theme) -> container::Appearance {
    container::Appearance {
        background: Some(iced::Background::Color(DANGER)),
        text_color: Some(Color::WHITE),
        border: iced::Border {
            width: 0.0,
            color: Color::TRANSPARENT,
            radius: 9.0.into(),
        },
        ..Default::default()
    }
}

fn tinted_badge(bg: Color, text: Color) -> container::Appearance {
    container::Appearance {
        background: Some(iced::Background::Color(bg)),
        text_color: Some(text),
        border: iced::Border {
            width: 0.0,
            color: Color::TRANSPARENT,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}

pub fn admin_badge_appearance(_: &iced::Theme) -> container::Appearance {
    tinted_badge(
        Color::from_rgb(0.99, 0.88, 0.45),
        Color::from_rgb(0.44, 0.33, 0.05),
    )
}

pub fn teacher_badge_appearance(_: &iced::Theme) -> container::Appearance {
    tinted_badge(
        Color::from_rgb(0.75, 0.86, 1.0),
        Color::from_rgb(0.12, 0.23, 0.54),
    )
}

pub fn student_badge_appearance(_: &iced::Theme) -> container::Appearance {
    tinted_badge(
        Color::from_rgb(0.90, 0.91, 0.92),
        Color::from_rgb(0.25, 0.28, 0.32),
    )
}
