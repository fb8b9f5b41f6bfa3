//! Insertion-ordered mapping of column key to display position.

/// Column key -> position, enumerated in insertion order.
///
/// Re-inserting an existing key overwrites its position but keeps the key
/// where it was first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPositions {
    entries: Vec<(String, i64)>,
}

impl ColumnPositions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, position)| *position)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set `key` to `position`, returning the previous position if any.
    pub fn insert(&mut self, key: impl Into<String>, position: i64) -> Option<i64> {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            return Some(std::mem::replace(&mut entry.1, position));
        }
        self.entries.push((key, position));
        None
    }

    pub fn remove(&mut self, key: &str) -> Option<i64> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Overlay `other`: shared keys take `other`'s position in place, keys only
    /// in `other` are appended in `other`'s order.
    pub fn overlay(&mut self, other: &ColumnPositions) {
        for (key, position) in other.iter() {
            self.insert(key, position);
        }
    }

    /// Move `key` to the front, keeping its position value.
    pub fn pin_first(&mut self, key: &str) -> bool {
        match self.remove(key) {
            Some(position) => {
                self.entries.insert(0, (key.to_string(), position));
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries
            .iter()
            .map(|(key, position)| (key.as_str(), *position))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for ColumnPositions {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut positions = ColumnPositions::new();
        for (key, position) in iter {
            positions.insert(key, position);
        }
        positions
    }
}
