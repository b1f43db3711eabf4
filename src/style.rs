use iced::widget::button::Status;
use iced::widget::container::Style;
use iced::{Border, Color, Shadow, Theme, Vector};

pub use data::config::custom_theme;

pub fn branding_text(theme: &Theme) -> iced::widget::text::Style {
    let palette = theme.extended_palette();

    iced::widget::text::Style {
        color: Some(palette.primary.base.color),
    }
}

pub fn subtitle_text(theme: &Theme) -> iced::widget::text::Style {
    let palette = theme.extended_palette();

    iced::widget::text::Style {
        color: Some(palette.background.strong.color),
    }
}

// Cards
pub fn card_container(theme: &Theme) -> Style {
    let palette = theme.extended_palette();

    Style {
        background: Some(palette.background.base.color.into()),
        border: Border {
            width: 1.0,
            color: palette.background.weak.color,
            radius: 8.0.into(),
        },
        shadow: Shadow {
            color: Color::BLACK.scale_alpha(if palette.is_dark { 0.4 } else { 0.08 }),
            offset: Vector::new(0.0, 2.0),
            blur_radius: 6.0,
        },
        ..Default::default()
    }
}

pub fn badge_container(theme: &Theme) -> Style {
    let palette = theme.extended_palette();

    Style {
        background: Some(palette.primary.weak.color.into()),
        text_color: Some(palette.primary.weak.text),
        border: Border {
            radius: 8.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn header_row_container(theme: &Theme) -> Style {
    let palette = theme.extended_palette();

    Style {
        background: Some(palette.background.weak.color.into()),
        ..Default::default()
    }
}

// Tooltips
pub fn tooltip(theme: &Theme) -> Style {
    let palette = theme.extended_palette();

    Style {
        background: Some(palette.background.base.color.into()),
        border: Border {
            width: 1.0,
            color: palette.background.strong.color,
            radius: 4.0.into(),
        },
        shadow: Shadow {
            color: Color::BLACK.scale_alpha(0.2),
            offset: Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        },
        ..Default::default()
    }
}

pub fn error_banner(theme: &Theme) -> Style {
    let palette = theme.extended_palette();

    Style {
        background: Some(palette.danger.weak.color.into()),
        text_color: Some(palette.danger.weak.text),
        border: Border {
            width: 1.0,
            color: palette.danger.base.color,
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}

// Delta directions
pub fn delta_up(theme: &Theme) -> iced::widget::text::Style {
    iced::widget::text::Style {
        color: Some(theme.extended_palette().success.base.color),
    }
}

pub fn delta_down(theme: &Theme) -> iced::widget::text::Style {
    iced::widget::text::Style {
        color: Some(theme.extended_palette().danger.base.color),
    }
}

pub fn delta_flat(theme: &Theme) -> iced::widget::text::Style {
    iced::widget::text::Style {
        color: Some(theme.extended_palette().background.strong.color),
    }
}

// Buttons
pub fn header_button(theme: &Theme, status: Status) -> iced::widget::button::Style {
    let palette = theme.extended_palette();

    match status {
        Status::Active | Status::Disabled => iced::widget::button::Style {
            background: None,
            text_color: palette.background.base.text,
            ..Default::default()
        },
        Status::Hovered | Status::Pressed => iced::widget::button::Style {
            background: Some(palette.background.weak.color.into()),
            text_color: palette.primary.base.color,
            ..Default::default()
        },
    }
}

pub fn screenshot_button(theme: &Theme, status: Status) -> iced::widget::button::Style {
    let palette = theme.extended_palette();

    let background = match status {
        Status::Active => palette.primary.base.color,
        Status::Hovered => palette.primary.strong.color,
        Status::Pressed => palette.primary.weak.color,
        Status::Disabled => palette.background.strong.color,
    };

    iced::widget::button::Style {
        background: Some(background.into()),
        text_color: palette.primary.base.text,
        border: Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
