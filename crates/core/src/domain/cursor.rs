//! Cursor scan rule
//!
//! A batch is ordered newest-first. Given the cursor left by the previous
//! round, the fresh items are the ones in front of the cursor match, and they
//! are emitted oldest-to-newest. A missing (or empty) cursor makes the whole
//! batch fresh.

use crate::domain::Item;

/// Result of scanning one batch against the current cursor
#[derive(Debug, PartialEq, Eq)]
pub struct CursorScan<'a> {
    /// Items newer than the cursor, oldest first
    pub fresh: Vec<&'a Item>,
    /// New cursor value, `None` when the cursor stays unchanged
    pub next_cursor: Option<&'a str>,
}

/// Apply the scan rule to `batch` with the prior `cursor`
pub fn scan<'a>(batch: &'a [Item], cursor: &str) -> CursorScan<'a> {
    let cut = if cursor.is_empty() {
        batch.len()
    } else {
        batch
            .iter()
            .position(|item| item.id == cursor)
            .unwrap_or(batch.len())
    };

    let fresh = batch[..cut].iter().rev().collect();

    let next_cursor = batch
        .first()
        .map(|newest| newest.id.as_str())
        .filter(|newest| *newest != cursor);

    CursorScan { fresh, next_cursor }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(ids: &[&str]) -> Vec<Item> {
        ids.iter()
            .map(|id| Item::new(*id, format!("title {}", id)))
            .collect()
    }

    fn ids<'a>(scan: &CursorScan<'a>) -> Vec<&'a str> {
        scan.fresh.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn test_empty_cursor_emits_whole_batch_oldest_first() {
        let items = batch(&["A", "B", "C"]);
        let result = scan(&items, "");

        assert_eq!(ids(&result), vec!["C", "B", "A"]);
        assert_eq!(result.next_cursor, Some("A"));
    }

    #[test]
    fn test_cursor_in_middle_emits_prefix() {
        let items = batch(&["A", "B", "C"]);
        let result = scan(&items, "B");

        assert_eq!(ids(&result), vec!["A"]);
        assert_eq!(result.next_cursor, Some("A"));
    }

    #[test]
    fn test_cursor_at_head_is_idempotent() {
        let items = batch(&["A", "B", "C"]);
        let result = scan(&items, "A");

        assert!(result.fresh.is_empty());
        assert_eq!(result.next_cursor, None);
    }

    #[test]
    fn test_cursor_not_found_emits_whole_batch() {
        let items = batch(&["D", "E", "F"]);
        let result = scan(&items, "A");

        assert_eq!(ids(&result), vec!["F", "E", "D"]);
        assert_eq!(result.next_cursor, Some("D"));
    }

    #[test]
    fn test_empty_batch_keeps_cursor() {
        let result = scan(&[], "A");

        assert!(result.fresh.is_empty());
        assert_eq!(result.next_cursor, None);
    }

    #[test]
    fn test_cursor_at_tail_emits_all_but_tail() {
        let items = batch(&["A", "B", "C", "D"]);
        let result = scan(&items, "D");

        assert_eq!(ids(&result), vec!["C", "B", "A"]);
        assert_eq!(result.next_cursor, Some("A"));
    }
}
