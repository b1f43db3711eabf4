//! Per-sheet display logic: sheet identity, date-column detection, the
//! competitor sheet's pinned column order and row grouping, and the
//! day-over-day price delta shown in cell tooltips.

use std::cmp::Ordering;
use std::sync::OnceLock;

use api::{Block, CellValue};
use regex::Regex;

use crate::format::{format_number_with_spaces, parse_decimal};

pub const COMPETITORS_SHEET: &str = "Конкуренты";
pub const NPZ_SHEET: &str = "НПЗ";
pub const PETROPAVLOVSK_SHEET: &str = "Петропавловск - Камчатский";
/// Sheets never shown as a standalone card.
pub const HIDDEN_SHEETS: &[&str] = &["Курсы"];

const PRODUCT_MARKERS: &[&str] = &["продукт", "номенклат"];
const EXCHANGE_MARKER: &str = "биржа";
const REFERENCE_MARKER: &str = "ннк";
const DATE_COLUMN_MARKER: &str = "дата";

const DELTA_EPSILON: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Competitors,
    Npz,
    Petropavlovsk,
    Rates,
    Other,
}

impl SheetKind {
    pub fn from_name(sheet_name: &str) -> Self {
        match sheet_name {
            COMPETITORS_SHEET => SheetKind::Competitors,
            NPZ_SHEET => SheetKind::Npz,
            PETROPAVLOVSK_SHEET => SheetKind::Petropavlovsk,
            name if HIDDEN_SHEETS.contains(&name) => SheetKind::Rates,
            _ => SheetKind::Other,
        }
    }

    pub fn is_hidden(self) -> bool {
        matches!(self, SheetKind::Rates)
    }

    /// Sheets that carry a date column repeated on every row hide it.
    pub fn hides_date_column(self) -> bool {
        matches!(
            self,
            SheetKind::Competitors | SheetKind::Npz | SheetKind::Petropavlovsk
        )
    }

    /// Full-width card layout hint.
    pub fn is_wide(self) -> bool {
        matches!(self, SheetKind::Competitors | SheetKind::Npz)
    }

    pub fn title(self, block: &Block) -> String {
        match self {
            SheetKind::Competitors => "Конкурентные цены".to_string(),
            SheetKind::Npz => "НПЗ".to_string(),
            SheetKind::Petropavlovsk => "Петропавловск-Камчатский".to_string(),
            _ => block
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .or_else(|| Some(block.sheet_name.clone()).filter(|s| !s.is_empty()))
                .unwrap_or_else(|| "Без названия".to_string()),
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            SheetKind::Competitors => "Конкуренты",
            SheetKind::Npz => "НПЗ",
            SheetKind::Petropavlovsk => "П-Камчатский",
            _ => "Блок",
        }
    }
}

fn date_value_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4}-\d{2}-\d{2}|\d{2}\.\d{2}\.\d{4}|\d{2}-\d{2}-\d{4})$")
            .expect("valid date pattern")
    })
}

fn is_date_string(cell: &CellValue) -> bool {
    if cell.is_null() {
        return false;
    }

    let text = cell.to_text();
    let trimmed = text.trim();
    !trimmed.is_empty() && date_value_regex().is_match(trimmed)
}

/// Finds the column holding dates: a name containing the date marker wins
/// over content that merely looks date-shaped.
pub fn find_date_column(columns: &[String], rows: &[Vec<CellValue>]) -> Option<usize> {
    if columns.is_empty() || rows.is_empty() {
        return None;
    }

    if let Some(idx) = columns
        .iter()
        .position(|name| name.to_lowercase().contains(DATE_COLUMN_MARKER))
    {
        return Some(idx);
    }

    (0..columns.len()).find(|&col| {
        rows.iter()
            .any(|row| row.get(col).is_some_and(is_date_string))
    })
}

fn find_marked(columns: &[String], visible: &[usize], markers: &[&str]) -> Option<usize> {
    visible.iter().copied().find(|&idx| {
        let name = columns
            .get(idx)
            .map(|n| n.trim().to_lowercase())
            .unwrap_or_default();
        markers.iter().any(|marker| name.contains(marker))
    })
}

/// The column holding product names, if one is marked.
pub fn find_product_column(columns: &[String], visible: &[usize]) -> Option<usize> {
    find_marked(columns, visible, PRODUCT_MARKERS)
}

/// Pins the product, exchange and reference columns (in that order, each
/// optional) ahead of the remaining visible columns, preserving their
/// relative order.
pub fn reorder_competitor_columns(columns: &[String], visible: &[usize]) -> Vec<usize> {
    let pinned = [
        find_marked(columns, visible, PRODUCT_MARKERS),
        find_marked(columns, visible, &[EXCHANGE_MARKER]),
        find_marked(columns, visible, &[REFERENCE_MARKER]),
    ];

    let mut result: Vec<usize> = pinned.into_iter().flatten().collect();

    for &idx in visible {
        if !result.contains(&idx) {
            result.push(idx);
        }
    }

    result
}

/// Grouping weight of a competitor row label: benchmark exchanges first,
/// then the reference entity, then everyone else.
pub fn competitor_row_weight(label: &str) -> u8 {
    let lower = label.to_lowercase();

    if lower.contains(EXCHANGE_MARKER) {
        0
    } else if lower.contains(REFERENCE_MARKER) {
        1
    } else {
        2
    }
}

fn row_label(row: &[CellValue], label_idx: usize) -> String {
    row.get(label_idx)
        .map(|cell| cell.to_text().trim().to_string())
        .unwrap_or_default()
}

/// Total order over competitor rows: weight ascending, ties broken by the
/// label text. `label_idx` is the original index of the product column.
pub fn competitor_row_cmp(a: &[CellValue], b: &[CellValue], label_idx: usize) -> Ordering {
    let label_a = row_label(a, label_idx);
    let label_b = row_label(b, label_idx);

    competitor_row_weight(&label_a)
        .cmp(&competitor_row_weight(&label_b))
        .then_with(|| label_a.cmp(&label_b))
}

/// The original-to-visible column permutation for one block, built once per
/// render pass. Rendering, sorting and dragging all index through this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    visible: Vec<usize>,
    numeric: Vec<bool>,
}

impl ColumnMap {
    pub fn new(block: &Block, kind: SheetKind) -> Self {
        let mut visible: Vec<usize> = (0..block.columns.len()).collect();

        if kind.hides_date_column() {
            if let Some(date_idx) = find_date_column(&block.columns, &block.rows) {
                visible.retain(|&i| i != date_idx);
            }
        }

        if kind == SheetKind::Competitors {
            visible = reorder_competitor_columns(&block.columns, &visible);
        }

        // `numeric_columns` references pre-filter indices; translate once.
        let numeric = visible
            .iter()
            .map(|orig| block.numeric_columns.contains(orig))
            .collect();

        Self { visible, numeric }
    }

    /// Original column indices in display order.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// Whether the column at the given *visible* position is numeric.
    pub fn is_numeric(&self, visible_idx: usize) -> bool {
        self.numeric.get(visible_idx).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

/// Day-over-day payload for one competitor price cell, computed once at
/// render time.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceDelta {
    /// ISO date of the prior snapshot.
    pub prev_date: String,
    pub prev_value: String,
    pub delta: String,
    pub direction: Direction,
}

pub fn price_delta(current: &CellValue, prev: &CellValue, prev_date: &str) -> PriceDelta {
    let prev_value = format_number_with_spaces(&prev.to_text());

    let curr_num = parse_decimal(&current.to_text());
    let prev_num = parse_decimal(&prev.to_text());

    let (delta, direction) = match (curr_num, prev_num) {
        (Some(curr), Some(prev)) => {
            let diff = curr - prev;

            if diff.abs() < DELTA_EPSILON {
                ("0".to_string(), Direction::Flat)
            } else {
                let sign = if diff > 0.0 { "+" } else { "−" };
                let formatted = format_number_with_spaces(&format!("{}", diff.abs()));
                (
                    format!("{sign}{formatted}"),
                    if diff > 0.0 {
                        Direction::Up
                    } else {
                        Direction::Down
                    },
                )
            }
        }
        _ => (String::new(), Direction::Flat),
    };

    PriceDelta {
        prev_date: prev_date.to_string(),
        prev_value,
        delta,
        direction,
    }
}

/// Looks up the previous value recorded for this row's product and column,
/// if the block carries historical data for it.
pub fn price_delta_for(
    block: &Block,
    row: &[CellValue],
    orig_idx: usize,
    product_orig_idx: usize,
) -> Option<PriceDelta> {
    let prev_date = block.prev_date.as_deref()?;
    let product_key = row.get(product_orig_idx)?.to_text().trim().to_string();
    let column_name = block.columns.get(orig_idx)?;

    let prev = block.prev_values.get(&product_key)?.get(column_name)?;
    let current = row.get(orig_idx)?;

    Some(price_delta(current, prev, prev_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn name_match_wins_over_date_shaped_content() {
        let columns = cols(&["Продукт", "Дата обновления", "Срок"]);
        let rows = vec![vec![
            text("АИ-92"),
            text("чт"),
            // date-shaped content in a later column must not win
            text("2025-12-08"),
        ]];

        assert_eq!(find_date_column(&columns, &rows), Some(1));
    }

    #[test]
    fn content_scan_finds_first_date_shaped_column() {
        let columns = cols(&["Продукт", "Обновлено", "Цена"]);
        let rows = vec![
            vec![text("АИ-92"), text("08.12.2025"), CellValue::Number(100.0)],
            vec![text("АИ-95"), CellValue::Null, CellValue::Number(200.0)],
        ];

        assert_eq!(find_date_column(&columns, &rows), Some(1));
    }

    #[test]
    fn no_date_column_reports_none() {
        let columns = cols(&["Продукт", "Цена"]);
        let rows = vec![vec![text("АИ-92"), CellValue::Number(100.0)]];

        assert_eq!(find_date_column(&columns, &rows), None);
        assert_eq!(find_date_column(&[], &[]), None);
    }

    #[test]
    fn competitor_columns_pin_product_exchange_reference() {
        let columns = cols(&["Прочее", "ННК", "Биржа X", "Продукт"]);
        let visible = vec![0, 1, 2, 3];

        assert_eq!(
            reorder_competitor_columns(&columns, &visible),
            vec![3, 2, 1, 0]
        );
    }

    #[test]
    fn competitor_reorder_skips_missing_pins() {
        let columns = cols(&["Продукт", "Биржа X", "ННК", "Прочее"]);
        // "ННК" filtered out of the visible subset
        let visible = vec![0, 1, 3];

        assert_eq!(reorder_competitor_columns(&columns, &visible), vec![0, 1, 3]);
    }

    #[test]
    fn competitor_rows_group_exchange_reference_rest() {
        let mut rows = vec![
            vec![text("ННК Y")],
            vec![text("Прочее A")],
            vec![text("Биржа Z")],
        ];

        rows.sort_by(|a, b| competitor_row_cmp(a, b, 0));

        let labels: Vec<String> = rows.iter().map(|r| r[0].to_text()).collect();
        assert_eq!(labels, vec!["Биржа Z", "ННК Y", "Прочее A"]);
    }

    #[test]
    fn column_map_hides_date_and_translates_numeric() {
        let block = Block {
            sheet_name: NPZ_SHEET.to_string(),
            columns: cols(&["Дата", "Завод", "Объём"]),
            rows: vec![vec![
                text("2025-12-08"),
                text("НПЗ-1"),
                CellValue::Number(12.0),
            ]],
            numeric_columns: vec![2],
            ..Block::default()
        };

        let map = ColumnMap::new(&block, SheetKind::Npz);

        assert_eq!(map.visible(), &[1, 2]);
        assert!(!map.is_numeric(0));
        assert!(map.is_numeric(1));
    }

    #[test]
    fn delta_classifies_direction_with_epsilon() {
        let up = price_delta(
            &CellValue::Number(100.5),
            &CellValue::Number(100.0),
            "2025-12-07",
        );
        assert_eq!(up.direction, Direction::Up);
        assert_eq!(up.delta, "+0,5");
        assert_eq!(up.prev_value, "100");

        let down = price_delta(
            &CellValue::Number(99.0),
            &CellValue::Number(100.0),
            "2025-12-07",
        );
        assert_eq!(down.direction, Direction::Down);
        assert_eq!(down.delta, "−1");

        let flat = price_delta(
            &CellValue::Number(100.00001),
            &CellValue::Number(100.0),
            "2025-12-07",
        );
        assert_eq!(flat.direction, Direction::Flat);
        assert_eq!(flat.delta, "0");
    }

    #[test]
    fn delta_lookup_requires_recorded_history() {
        let mut block = Block {
            sheet_name: COMPETITORS_SHEET.to_string(),
            columns: cols(&["Продукт", "Биржа X"]),
            rows: vec![vec![text("АИ-92"), CellValue::Number(65350.5)]],
            numeric_columns: vec![1],
            prev_date: Some("2025-12-07".to_string()),
            ..Block::default()
        };
        block.prev_values.insert(
            "АИ-92".to_string(),
            [("Биржа X".to_string(), CellValue::Number(65000.0))]
                .into_iter()
                .collect(),
        );

        let delta = price_delta_for(&block, &block.rows[0], 1, 0).expect("history exists");
        assert_eq!(delta.delta, "+350,5");

        // unknown product -> no tooltip payload
        let other_row = vec![text("АИ-95"), CellValue::Number(1.0)];
        assert!(price_delta_for(&block, &other_row, 1, 0).is_none());

        // no prev date -> no tooltip payload
        block.prev_date = None;
        assert!(price_delta_for(&block, &block.rows[0], 1, 0).is_none());
    }
}
