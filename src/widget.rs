use crate::style;
use iced::{
    Element,
    widget::{column, container, text},
};

pub mod drag_list;
pub mod price_tooltip;

use data::blocks::{Direction, PriceDelta};
use data::format::format_date_ru;

/// Wraps a cell in a hover tooltip showing the prior day's value and the
/// change against it.
pub fn with_price_tooltip<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
    delta: &PriceDelta,
) -> Element<'a, Message> {
    let direction_style = match delta.direction {
        Direction::Up => style::delta_up,
        Direction::Down => style::delta_down,
        Direction::Flat => style::delta_flat,
    };

    let mut tip = column![
        text(format!(
            "Вчера ({}): {}",
            format_date_ru(&delta.prev_date),
            delta.prev_value
        ))
        .size(12),
    ]
    .spacing(2);

    if !delta.delta.is_empty() {
        tip = tip.push(
            text(format!("Δ: {}", delta.delta))
                .size(12)
                .style(direction_style),
        );
    }

    price_tooltip::PriceTooltip::new(content, container(tip).padding(8).style(style::tooltip))
        .into()
}
