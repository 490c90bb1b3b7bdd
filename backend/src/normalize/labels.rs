//! Header label assignment.
//!
//! Real labels keep their trimmed text. Empty, sentinel and duplicate
//! cells get a generated `Column_N` label that never collides with a
//! label already present in the header row.

use std::collections::HashSet;

use super::is_placeholder;

/// Prefix of generated labels.
pub const FALLBACK_PREFIX: &str = "Column_";

/// Deterministic generator of unique fallback labels.
#[derive(Debug, Clone, Default)]
pub struct HeaderLabels {
    taken: HashSet<String>,
    counter: usize,
}

impl HeaderLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a label so that generated ones skip it.
    ///
    /// Returns `false` if the label was already taken.
    pub fn reserve(&mut self, label: &str) -> bool {
        self.taken.insert(label.to_string())
    }

    pub fn is_taken(&self, label: &str) -> bool {
        self.taken.contains(label)
    }

    /// Next unused `Column_N` label, reserved on return.
    pub fn next_fallback(&mut self) -> String {
        loop {
            self.counter += 1;
            let candidate = format!("{}{}", FALLBACK_PREFIX, self.counter);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

/// Build the header set from the selected header row.
///
/// The first occurrence of a real label wins. All real labels are
/// reserved before any fallback is generated, so a later `Column_1`
/// cell keeps its name.
pub fn build_header_set(row: &[String]) -> Vec<String> {
    let mut labels = HeaderLabels::new();
    let mut seen = HashSet::new();

    // Which positions keep their own text
    let keeps: Vec<bool> = row
        .iter()
        .map(|cell| {
            let trimmed = cell.trim();
            !is_placeholder(trimmed) && seen.insert(trimmed.to_string())
        })
        .collect();

    for (cell, keep) in row.iter().zip(&keeps) {
        if *keep {
            labels.reserve(cell.trim());
        }
    }

    row.iter()
        .zip(keeps)
        .map(|(cell, keep)| {
            if keep {
                cell.trim().to_string()
            } else {
                labels.next_fallback()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_real_labels_are_trimmed() {
        assert_eq!(build_header_set(&row(&["  Name ", "Age"])), vec!["Name", "Age"]);
    }

    #[test]
    fn test_empty_and_sentinel_cells_get_fallbacks() {
        let headers = build_header_set(&row(&["", "Name", "—", "   "]));
        assert_eq!(headers, vec!["Column_1", "Name", "Column_2", "Column_3"]);
    }

    #[test]
    fn test_duplicates_get_fallbacks() {
        let headers = build_header_set(&row(&["Id", "Id", "Id"]));
        assert_eq!(headers, vec!["Id", "Column_1", "Column_2"]);
    }

    #[test]
    fn test_fallback_skips_existing_labels() {
        let headers = build_header_set(&row(&["", "Column_1", "Column_2"]));
        assert_eq!(headers, vec!["Column_3", "Column_1", "Column_2"]);
    }

    #[test]
    fn test_generator_counts_up() {
        let mut labels = HeaderLabels::new();
        assert!(labels.reserve("Column_2"));
        assert!(!labels.reserve("Column_2"));
        assert_eq!(labels.next_fallback(), "Column_1");
        assert_eq!(labels.next_fallback(), "Column_3");
        assert!(labels.is_taken("Column_3"));
    }
}
