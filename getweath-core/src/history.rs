/// Maximum number of remembered locations.
pub const HISTORY_LIMIT: usize = 5;

/// Most-recently-used list of visited locations: ordered front-first,
/// deduplicated by exact string match, never longer than [`HISTORY_LIMIT`].
///
/// The type is a pure value; mutations return a new history and the caller is
/// responsible for persisting the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationHistory {
    entries: Vec<String>,
}

impl LocationHistory {
    /// Rebuild a history from its persisted JSON form. Absent or malformed
    /// input yields an empty history; this never fails.
    ///
    /// The invariants are re-applied on the way in, so a hand-edited state
    /// file cannot smuggle in duplicates or an oversized list.
    pub fn restore(serialized: Option<&str>) -> Self {
        let stored: Vec<String> = serialized
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default();

        let mut entries: Vec<String> = Vec::new();
        for entry in stored {
            if entries.len() == HISTORY_LIMIT {
                break;
            }
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }

        Self { entries }
    }

    /// Move `location` to the front, removing any earlier occurrence, and
    /// truncate to [`HISTORY_LIMIT`]. Relative order of the other entries is
    /// preserved.
    #[must_use]
    pub fn record_visit(&self, location: &str) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(location.to_string());
        entries.extend(self.entries.iter().filter(|e| e.as_str() != location).cloned());
        entries.truncate(HISTORY_LIMIT);

        Self { entries }
    }

    /// An empty history.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::default()
    }

    /// JSON array encoding, front = most recent.
    pub fn serialize(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The most recently visited location, if any.
    pub fn front(&self) -> Option<&str> {
        self.entries.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visits(locations: &[&str]) -> LocationHistory {
        locations
            .iter()
            .fold(LocationHistory::default(), |h, l| h.record_visit(l))
    }

    #[test]
    fn record_visit_puts_newest_first() {
        let history = visits(&["Lucknow", "Delhi", "Mumbai"]);
        assert_eq!(history.entries(), ["Mumbai", "Delhi", "Lucknow"]);
        assert_eq!(history.front(), Some("Mumbai"));
    }

    #[test]
    fn record_visit_is_bounded_and_deduplicated() {
        let history = visits(&[
            "A", "B", "C", "D", "E", "F", "G", "C", "G", "C",
        ]);

        assert!(history.len() <= HISTORY_LIMIT);
        let mut seen = history.entries().to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), history.len());
    }

    #[test]
    fn revisit_moves_to_front_preserving_relative_order() {
        let history = visits(&["A", "B", "C", "D"]).record_visit("B");
        assert_eq!(history.entries(), ["B", "D", "C", "A"]);
    }

    #[test]
    fn dedup_is_case_sensitive() {
        let history = visits(&["paris", "Paris"]);
        assert_eq!(history.entries(), ["Paris", "paris"]);
    }

    #[test]
    fn restore_tolerates_absent_and_malformed_input() {
        assert!(LocationHistory::restore(None).is_empty());
        assert!(LocationHistory::restore(Some("")).is_empty());
        assert!(LocationHistory::restore(Some("not json")).is_empty());
        assert!(LocationHistory::restore(Some(r#"{"wrong": "shape"}"#)).is_empty());
    }

    #[test]
    fn restore_reapplies_invariants() {
        let tampered = r#"["A","B","A","C","D","E","F"]"#;
        let history = LocationHistory::restore(Some(tampered));
        assert_eq!(history.entries(), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn serialize_restore_round_trip() {
        let history = visits(&["Lucknow", "Delhi", "London", "Delhi"]);
        let restored = LocationHistory::restore(Some(&history.serialize()));
        assert_eq!(restored, history);
    }

    #[test]
    fn clear_yields_empty() {
        let history = visits(&["Tokyo", "Paris"]);
        assert!(history.clear().is_empty());
        assert_eq!(history.clear().serialize(), "[]");
    }
}
