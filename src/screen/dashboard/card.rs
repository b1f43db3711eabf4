use std::cmp::Ordering;

use api::{Block, CellValue};
use data::blocks::{self, ColumnMap, PriceDelta, SheetKind};
use data::format::{format_number_with_spaces, parse_decimal};
use iced::{
    Alignment, Element, Font, Length,
    widget::{Column, Row, button, container, text},
};

use crate::style;
use crate::widget::drag_list::{Axis, DragEvent, List, reorder_vec};
use crate::widget::with_price_tooltip;

pub const EMPTY_PLACEHOLDER: &str =
    "Нет данных на этом листе (или нет строк для выбранной даты).";

const NARROW_CARD_MAX_WIDTH: f32 = 640.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    pub name: String,
    pub numeric: bool,
    pub sort: Option<SortOrder>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub text: String,
    pub numeric: bool,
    pub primary: bool,
    pub delta: Option<PriceDelta>,
}

#[derive(Debug, Clone)]
pub enum Message {
    SortToggled(usize),
    HeaderDragged(DragEvent),
}

/// One rendered sheet: display-ready columns and rows, with sorting and
/// column order applied destructively to the display copies.
#[derive(Debug)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub badge: &'static str,
    pub wide: bool,
    columns: Vec<ColumnView>,
    rows: Vec<Vec<CellView>>,
}

impl Card {
    pub fn from_block(block: &Block) -> Self {
        let kind = SheetKind::from_name(&block.sheet_name);
        let map = ColumnMap::new(block, kind);

        let product_idx = (kind == SheetKind::Competitors)
            .then(|| blocks::find_product_column(&block.columns, map.visible()))
            .flatten();

        let mut raw_rows: Vec<&Vec<CellValue>> = block.rows.iter().collect();
        if kind == SheetKind::Competitors {
            let label_idx = product_idx.unwrap_or(0);
            raw_rows.sort_by(|a, b| blocks::competitor_row_cmp(a, b, label_idx));
        }

        let columns = map
            .visible()
            .iter()
            .enumerate()
            .map(|(pos, &orig)| ColumnView {
                name: block.columns.get(orig).cloned().unwrap_or_default(),
                numeric: map.is_numeric(pos),
                sort: None,
            })
            .collect();

        let rows = raw_rows
            .iter()
            .map(|row| {
                map.visible()
                    .iter()
                    .enumerate()
                    .map(|(pos, &orig)| {
                        let raw = row.get(orig).cloned().unwrap_or(CellValue::Null);
                        let numeric = map.is_numeric(pos);

                        let delta = match product_idx {
                            Some(product) if numeric && pos > 0 => {
                                blocks::price_delta_for(block, row, orig, product)
                            }
                            _ => None,
                        };

                        CellView {
                            text: if numeric {
                                format_number_with_spaces(&raw.to_text())
                            } else {
                                raw.to_text()
                            },
                            numeric,
                            primary: pos == 0,
                            delta,
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            id: block.id.clone(),
            title: kind.title(block),
            subtitle: format!("Лист Excel: {}", block.sheet_name),
            badge: kind.badge(),
            wide: kind.is_wide(),
            columns,
            rows,
        }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::SortToggled(index) => {
                if index >= self.columns.len() {
                    return;
                }

                let next = match self.columns[index].sort {
                    Some(SortOrder::Ascending) => SortOrder::Descending,
                    _ => SortOrder::Ascending,
                };

                for column in &mut self.columns {
                    column.sort = None;
                }
                self.columns[index].sort = Some(next);

                self.sort_rows(index, next);
            }
            Message::HeaderDragged(event) => {
                if let DragEvent::Dropped { .. } = event {
                    reorder_vec(&mut self.columns, &event);
                    for row in &mut self.rows {
                        reorder_vec(row, &event);
                    }
                }
            }
        }
    }

    /// A card without rows or without columns renders the placeholder
    /// instead of a table.
    fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    fn sort_rows(&mut self, index: usize, order: SortOrder) {
        let numeric = self.columns[index].numeric;

        self.rows.sort_by(|a, b| {
            let ordering = if numeric {
                // unparsable cells sort as zero
                let a_val = a
                    .get(index)
                    .and_then(|cell| parse_decimal(&cell.text))
                    .unwrap_or(0.0);
                let b_val = b
                    .get(index)
                    .and_then(|cell| parse_decimal(&cell.text))
                    .unwrap_or(0.0);

                a_val.partial_cmp(&b_val).unwrap_or(Ordering::Equal)
            } else {
                let a_text = a.get(index).map(|cell| cell.text.trim()).unwrap_or("");
                let b_text = b.get(index).map(|cell| cell.text.trim()).unwrap_or("");

                a_text.cmp(b_text)
            };

            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }

    pub fn view(&self) -> Element<'_, Message> {
        let heading = Row::new()
            .push(
                container(text(self.badge).size(11))
                    .padding([2, 8])
                    .style(style::badge_container),
            )
            .push(
                Column::new()
                    .push(text(&self.title).size(16))
                    .push(text(&self.subtitle).size(11).style(style::subtitle_text))
                    .spacing(2),
            )
            .spacing(10)
            .align_y(Alignment::Center);

        let body: Element<'_, Message> = if self.is_empty() {
            text(EMPTY_PLACEHOLDER)
                .size(12)
                .style(style::subtitle_text)
                .into()
        } else {
            Column::new()
                .push(self.header_view())
                .push(self.rows_view())
                .spacing(2)
                .into()
        };

        let card = Column::new().push(heading).push(body).spacing(12);

        let mut card = container(card)
            .padding(16)
            .width(Length::Fill)
            .style(style::card_container);

        if !self.wide {
            card = card.max_width(NARROW_CARD_MAX_WIDTH);
        }

        card.into()
    }

    fn header_view(&self) -> Element<'_, Message> {
        let cells = self.columns.iter().enumerate().map(|(index, column)| {
            let indicator = match column.sort {
                Some(SortOrder::Ascending) => " ▲",
                Some(SortOrder::Descending) => " ▼",
                None => "",
            };

            button(text(format!("{}{indicator}", column.name)).size(12))
                .style(style::header_button)
                .on_press(Message::SortToggled(index))
                .width(Length::FillPortion(1))
                .padding([4, 8])
                .into()
        });

        container(
            List::with_children(Axis::Horizontal, cells)
                .width(Length::Fill)
                .spacing(4)
                .on_drag(Message::HeaderDragged),
        )
        .style(style::header_row_container)
        .into()
    }

    fn rows_view(&self) -> Element<'_, Message> {
        let rows = self.rows.iter().map(|row| {
            let cells = row.iter().map(|cell| {
                let mut content = text(&cell.text).size(12).width(Length::Fill);

                if cell.numeric {
                    content = content.align_x(iced::alignment::Horizontal::Right);
                }
                if cell.primary {
                    content = content.font(Font {
                        weight: iced::font::Weight::Bold,
                        ..Font::DEFAULT
                    });
                }

                let content = container(content)
                    .padding([4, 8])
                    .width(Length::FillPortion(1));

                match &cell.delta {
                    Some(delta) => with_price_tooltip(content, delta),
                    None => content.into(),
                }
            });

            Row::with_children(cells).spacing(4).into()
        });

        Column::with_children(rows).spacing(2).into()
    }

    #[cfg(test)]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[cfg(test)]
    pub fn column_texts(&self, index: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row[index].text.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::blocks::COMPETITORS_SHEET;

    fn text_cell(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn competitors_block() -> Block {
        Block {
            id: "1".to_string(),
            sheet_name: COMPETITORS_SHEET.to_string(),
            columns: ["Дата", "Биржа X", "Продукт", "ННК"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: vec![
                vec![
                    text_cell("2025-12-08"),
                    CellValue::Number(65000.0),
                    text_cell("АИ-95"),
                    CellValue::Number(66000.0),
                ],
                vec![
                    text_cell("2025-12-08"),
                    CellValue::Number(61000.0),
                    text_cell("АИ-92"),
                    CellValue::Number(62500.5),
                ],
            ],
            numeric_columns: vec![1, 3],
            ..Block::default()
        }
    }

    #[test]
    fn competitors_card_pins_columns_and_hides_date() {
        let card = Card::from_block(&competitors_block());

        assert_eq!(card.column_names(), vec!["Продукт", "Биржа X", "ННК"]);
        assert_eq!(card.badge, "Конкуренты");
        assert!(card.wide);
    }

    #[test]
    fn competitors_rows_sort_by_product_label() {
        let card = Card::from_block(&competitors_block());

        assert_eq!(card.column_texts(0), vec!["АИ-92", "АИ-95"]);
        assert_eq!(card.column_texts(2), vec!["62 500,5", "66 000"]);
    }

    #[test]
    fn sort_toggles_between_ascending_and_descending() {
        let mut card = Card::from_block(&competitors_block());

        card.update(Message::SortToggled(1));
        assert_eq!(card.column_texts(1), vec!["61 000", "65 000"]);

        card.update(Message::SortToggled(1));
        assert_eq!(card.column_texts(1), vec!["65 000", "61 000"]);
    }

    #[test]
    fn sorting_another_column_clears_the_previous_indicator() {
        let mut card = Card::from_block(&competitors_block());

        card.update(Message::SortToggled(1));
        card.update(Message::SortToggled(2));

        assert_eq!(card.columns[1].sort, None);
        assert_eq!(card.columns[2].sort, Some(SortOrder::Ascending));
    }

    #[test]
    fn header_drop_moves_every_row_cell_along() {
        let mut card = Card::from_block(&competitors_block());

        card.update(Message::HeaderDragged(DragEvent::Dropped {
            index: 2,
            target_index: 1,
        }));

        assert_eq!(card.column_names(), vec!["Продукт", "ННК", "Биржа X"]);
        assert_eq!(card.column_texts(1), vec!["62 500,5", "66 000"]);
    }

    #[test]
    fn card_construction_is_deterministic() {
        let block = competitors_block();

        let a = Card::from_block(&block);
        let b = Card::from_block(&block);

        assert_eq!(a.columns, b.columns);
        assert_eq!(a.rows, b.rows);
    }

    #[test]
    fn empty_sheet_keeps_its_title() {
        let block = Block {
            id: "7".to_string(),
            sheet_name: "Прогноз".to_string(),
            columns: vec!["Показатель".to_string()],
            ..Block::default()
        };

        let card = Card::from_block(&block);

        assert_eq!(card.title, "Прогноз");
        assert_eq!(card.badge, "Блок");
        assert!(card.is_empty());
    }

    #[test]
    fn zero_column_block_counts_as_empty() {
        let block = Block {
            id: "8".to_string(),
            sheet_name: "Прочее".to_string(),
            rows: vec![vec![text_cell("осиротевшая строка")]],
            ..Block::default()
        };

        let card = Card::from_block(&block);

        assert!(card.is_empty());
    }

    #[test]
    fn short_rows_render_missing_cells_as_empty_text() {
        let block = Block {
            id: "9".to_string(),
            sheet_name: "Прочее".to_string(),
            columns: ["Продукт", "Цена", "Объём"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: vec![vec![text_cell("АИ-92")]],
            numeric_columns: vec![1, 2],
            ..Block::default()
        };

        let card = Card::from_block(&block);

        assert_eq!(card.column_texts(0), vec!["АИ-92"]);
        assert_eq!(card.column_texts(1), vec![""]);
        assert_eq!(card.column_texts(2), vec![""]);
    }
}
