//! Ordered, duplicate-free list of column identifiers.
//!
//! Persisted as a single comma-joined string; an identifier's position is its
//! index in the list and is never stored separately.

/// Delimiter used in the persisted representation.
pub const DELIMITER: char = ',';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOrder {
    ids: Vec<String>,
}

impl ColumnOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted value.
    ///
    /// Never fails: blank segments are dropped and a repeated identifier keeps
    /// its first position, so an empty string yields an empty order.
    pub fn parse(raw: &str) -> Self {
        raw.split(DELIMITER)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// Persisted representation (identifiers joined by `,`).
    pub fn to_raw(&self) -> String {
        self.ids.join(",")
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|existing| existing == id)
    }

    /// Append `id` unless already present. Returns true if it was added.
    pub fn push(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Insert `id` at `position` (clamped to the current length).
    ///
    /// Identifiers already present are left where they are.
    pub fn insert_at(&mut self, position: usize, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        let position = position.min(self.ids.len());
        self.ids.insert(position, id);
        true
    }

    /// Remove `id`, returning the position it held.
    pub fn remove(&mut self, id: &str) -> Option<usize> {
        let position = self.position(id)?;
        self.ids.remove(position);
        Some(position)
    }

    /// `(position, id)` for every identifier containing `needle`.
    ///
    /// Loose substring match: `qbank_foo` also matches `qbank_foobar\col`.
    pub fn matching(&self, needle: &str) -> Vec<(usize, String)> {
        self.ids
            .iter()
            .enumerate()
            .filter(|(_, id)| id.contains(needle))
            .map(|(position, id)| (position, id.clone()))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnOrder {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut order = ColumnOrder::new();
        for id in iter {
            order.push(id);
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_parses_to_empty_order() {
        assert!(ColumnOrder::parse("").is_empty());
        assert!(ColumnOrder::parse(" , ,").is_empty());
    }

    #[test]
    fn parse_then_serialize_is_stable() {
        let cases = [
            ("qbank_a\\col_x", "qbank_a\\col_x", 1),
            (
                "qbank_a\\col_x,qbank_b\\col_y,core_question\\local\\bank\\checkbox_column",
                "qbank_a\\col_x,qbank_b\\col_y,core_question\\local\\bank\\checkbox_column",
                3,
            ),
            (
                "qbank_customfields\\custom_field_column\\field_42,qbank_customfields\\custom_field_column\\field_7",
                "qbank_customfields\\custom_field_column\\field_42,qbank_customfields\\custom_field_column\\field_7",
                2,
            ),
            (
                "  qbank_a\\col_x , qbank_b\\col_y ,,\tqbank_c\\col_z\n",
                "qbank_a\\col_x,qbank_b\\col_y,qbank_c\\col_z",
                3,
            ),
        ];
        for (raw, normalized, len) in cases {
            let order = ColumnOrder::parse(raw);
            assert_eq!(order.len(), len, "{}", raw);
            assert_eq!(order.to_raw(), normalized, "{}", raw);
            assert_eq!(ColumnOrder::parse(&order.to_raw()), order, "{}", raw);
        }
    }

    #[test]
    fn duplicates_keep_first_position() {
        let order = ColumnOrder::parse("a,b,a,c");
        assert_eq!(order.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn insert_at_clamps_and_ignores_duplicates() {
        let mut order = ColumnOrder::parse("a,b");
        assert!(order.insert_at(9, "c"));
        assert!(order.insert_at(0, "z"));
        assert!(!order.insert_at(0, "b"));
        assert_eq!(order.to_raw(), "z,a,b,c");
    }

    #[test]
    fn matching_is_substring_based() {
        let order = ColumnOrder::parse("qbank_foo\\x,qbank_foobar\\y,qbank_bar\\z");
        let matched: Vec<usize> = order
            .matching("qbank_foo")
            .into_iter()
            .map(|(position, _)| position)
            .collect();
        assert_eq!(matched, vec![0, 1]);
    }
}
