use std::sync::Mutex;

use selcard_types::SelectionSnapshot;

/// Live view of the document selection
pub trait SelectionSource: Send + Sync {
    fn current(&self) -> SelectionSnapshot;
}

/// Latest snapshot reported by the page
#[derive(Default)]
pub struct TrackedSelection {
    latest: Mutex<SelectionSnapshot>,
}

impl TrackedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, snapshot: SelectionSnapshot) {
        *self.latest.lock().unwrap_or_else(|e| e.into_inner()) = snapshot;
    }
}

impl SelectionSource for TrackedSelection {
    fn current(&self) -> SelectionSnapshot {
        self.latest.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Trimmed text if the selection is usable for a card
pub fn selected_text(snapshot: &SelectionSnapshot, min_chars: usize) -> Option<String> {
    if snapshot.range_count == 0 || snapshot.collapsed {
        return None;
    }

    let text = snapshot.text.trim();
    if text.is_empty() || text.chars().count() < min_chars {
        return None;
    }

    Some(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(text: &str, range_count: u32, collapsed: bool) -> SelectionSnapshot {
        SelectionSnapshot {
            text: text.to_string(),
            range_count,
            collapsed,
        }
    }

    #[test]
    fn trims_usable_selection() {
        assert_eq!(
            selected_text(&snapshot("  cat \n", 1, false), 1),
            Some("cat".to_string())
        );
    }

    #[test]
    fn rejects_empty_collapsed_and_rangeless() {
        assert_eq!(selected_text(&snapshot("", 1, false), 1), None);
        assert_eq!(selected_text(&snapshot(" \t\n ", 1, false), 1), None);
        assert_eq!(selected_text(&snapshot("cat", 1, true), 1), None);
        assert_eq!(selected_text(&snapshot("cat", 0, false), 1), None);
    }

    #[test]
    fn minimum_length_counts_chars_not_bytes() {
        assert_eq!(selected_text(&snapshot("a", 1, false), 2), None);
        assert_eq!(
            selected_text(&snapshot("猫猫", 1, false), 2),
            Some("猫猫".to_string())
        );
        assert_eq!(selected_text(&snapshot("猫", 1, false), 2), None);
    }

    #[test]
    fn zero_minimum_still_rejects_empty() {
        assert_eq!(selected_text(&snapshot("  ", 1, false), 0), None);
    }

    #[test]
    fn tracked_selection_returns_latest() {
        let tracked = TrackedSelection::new();
        assert_eq!(tracked.current(), SelectionSnapshot::default());

        tracked.update(snapshot("dog", 1, false));
        assert_eq!(tracked.current().text, "dog");
    }
}
