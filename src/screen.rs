use iced::{
    Element, Theme,
    widget::{button, container, row, text},
};

use crate::style;

pub mod dashboard;

#[derive(Debug, Clone)]
pub enum Notification {
    Error(String),
    Info(String),
}

impl Notification {
    pub fn view<'a, M: Clone + 'a>(&'a self, on_dismiss: M) -> Element<'a, M> {
        let (message, style_fn): (&str, fn(&Theme) -> container::Style) = match self {
            Notification::Error(message) => (message, style::error_banner),
            Notification::Info(message) => (message, style::header_row_container),
        };

        container(
            row![
                text(message).size(13),
                button(text("✕").size(12))
                    .style(style::header_button)
                    .on_press(on_dismiss),
            ]
            .spacing(12)
            .align_y(iced::Alignment::Center),
        )
        .padding([6, 12])
        .style(style_fn)
        .into()
    }
}
