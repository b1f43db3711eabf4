//! Persisted card order. The order is stored as a flat list of block ids
//! under a versioned file name; ids the list does not know about are
//! appended after the known ones in server order.

use crate::{data_path, write_json_to_file, InternalError};

const ORDER_FILE: &str = "block_order_v1.json";

/// Rearranges `items` to follow `saved`, keyed by `id`. Known ids come
/// first in saved order, unknown ones keep their incoming relative order.
pub fn apply_saved_order<T>(items: Vec<T>, saved: &[String], id: impl Fn(&T) -> &str) -> Vec<T> {
    let mut remaining = items;
    let mut ordered = Vec::with_capacity(remaining.len());

    for wanted in saved {
        if let Some(pos) = remaining.iter().position(|item| id(item) == wanted) {
            ordered.push(remaining.remove(pos));
        }
    }

    ordered.extend(remaining);
    ordered
}

/// Reads the saved order. Missing, unreadable or empty state all mean
/// "no saved order".
pub fn load() -> Option<Vec<String>> {
    let path = data_path(Some(ORDER_FILE));

    let contents = std::fs::read_to_string(&path).ok()?;
    let ids: Vec<String> = serde_json::from_str(&contents)
        .inspect_err(|e| log::error!("Failed to parse saved card order: {e}"))
        .ok()?;

    (!ids.is_empty()).then_some(ids)
}

pub fn save(ids: &[String]) -> Result<(), InternalError> {
    let path = data_path(Some(ORDER_FILE));

    let json = serde_json::to_string(ids)
        .map_err(|e| InternalError::Persistence(format!("Failed to serialize card order: {e}")))?;

    write_json_to_file(&json, &path)
        .map_err(|e| InternalError::Persistence(format!("Failed to write card order: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str);

    fn items(ids: &[&'static str]) -> Vec<Item> {
        ids.iter().map(|id| Item(id)).collect()
    }

    #[test]
    fn saved_ids_come_first_in_saved_order() {
        let saved = vec!["c".to_string(), "a".to_string()];
        let ordered = apply_saved_order(items(&["a", "b", "c"]), &saved, |item| item.0);

        assert_eq!(ordered, items(&["c", "a", "b"]));
    }

    #[test]
    fn unknown_saved_ids_are_ignored() {
        let saved = vec!["ghost".to_string(), "b".to_string()];
        let ordered = apply_saved_order(items(&["a", "b"]), &saved, |item| item.0);

        assert_eq!(ordered, items(&["b", "a"]));
    }

    #[test]
    fn empty_saved_order_keeps_server_order() {
        let ordered = apply_saved_order(items(&["a", "b"]), &[], |item| item.0);

        assert_eq!(ordered, items(&["a", "b"]));
    }
}
