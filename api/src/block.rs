use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One spreadsheet sheet's snapshot for a given date, as served by
/// `GET /api/blocks`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Block {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub sheet_name: String,
    pub title: Option<String>,
    pub columns: Vec<String>,
    /// Rows are positionally aligned with `columns`; a row may be shorter,
    /// missing trailing cells render as empty text.
    pub rows: Vec<Vec<CellValue>>,
    /// Indices into the *original* `columns` list.
    pub numeric_columns: Vec<usize>,
    /// Competitor sheet only: prior snapshot date (ISO `YYYY-MM-DD`).
    pub prev_date: Option<String>,
    /// Competitor sheet only: primary-column value -> column name -> previous value.
    pub prev_values: HashMap<String, HashMap<String, CellValue>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Raw display text; null renders empty.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            CellValue::Text(s) => s.clone(),
        }
    }
}

// Block ids come back as either strings or numbers depending on the sheet.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "invalid block id: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_deserializes_wire_shape() {
        let raw = r#"{
            "id": "Конкуренты",
            "sheetName": "Конкуренты",
            "title": "Конкуренты",
            "columns": ["Продукт", "Биржа X", "ННК"],
            "rows": [["АИ-92", 65350.5, null]],
            "numericColumns": [1, 2],
            "prevDate": "2025-12-07",
            "prevValues": {"АИ-92": {"Биржа X": 65000}}
        }"#;

        let block: Block = serde_json::from_str(raw).expect("valid block");

        assert_eq!(block.id, "Конкуренты");
        assert_eq!(block.columns.len(), 3);
        assert_eq!(block.rows[0][1], CellValue::Number(65350.5));
        assert!(block.rows[0][2].is_null());
        assert_eq!(block.numeric_columns, vec![1, 2]);
        assert_eq!(block.prev_date.as_deref(), Some("2025-12-07"));
        assert_eq!(
            block.prev_values["АИ-92"]["Биржа X"],
            CellValue::Number(65000.0)
        );
    }

    #[test]
    fn numeric_id_becomes_string() {
        let block: Block = serde_json::from_str(r#"{"id": 3, "sheetName": "НПЗ"}"#).unwrap();
        assert_eq!(block.id, "3");
    }

    #[test]
    fn missing_fields_default() {
        let block: Block = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(block.columns.is_empty());
        assert!(block.rows.is_empty());
        assert!(block.prev_date.is_none());
        assert!(block.prev_values.is_empty());
    }

    #[test]
    fn cell_display_text() {
        assert_eq!(CellValue::Null.to_text(), "");
        assert_eq!(CellValue::Number(5.0).to_text(), "5");
        assert_eq!(CellValue::Number(10.5).to_text(), "10.5");
        assert_eq!(CellValue::Text("АИ-95".into()).to_text(), "АИ-95");
    }
}
