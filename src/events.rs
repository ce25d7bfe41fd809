use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Ordered personal events per date, serialized as {"YYYY-MM-DD": ["..."]}.
// A date with an empty list is never stored: removing the last event for a
// date removes the key itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventStore {
    entries: BTreeMap<NaiveDate, Vec<String>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events_for(&self, date: NaiveDate) -> &[String] {
        self.entries
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_events(&self, date: NaiveDate) -> bool {
        self.entries
            .get(&date)
            .is_some_and(|events| !events.is_empty())
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    // Appends the trimmed text; whitespace-only input is rejected.
    pub fn add_event(&mut self, date: NaiveDate, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        self.entries.entry(date).or_default().push(text.to_string());
        true
    }

    pub fn delete_event(&mut self, date: NaiveDate, index: usize) -> Result<String, String> {
        let Some(events) = self.entries.get_mut(&date) else {
            return Err(format!("no events for {date}"));
        };
        if index >= events.len() {
            return Err(format!("no event at index {index} for {date}"));
        }

        let removed = events.remove(index);
        if events.is_empty() {
            self.entries.remove(&date);
        }

        Ok(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[String])> {
        self.entries
            .iter()
            .map(|(date, events)| (*date, events.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::EventStore;
    use chrono::NaiveDate;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("date should parse")
    }

    #[test]
    fn adds_trimmed_events_in_order() {
        let mut store = EventStore::new();
        let day = date("2024-06-15");

        assert!(store.add_event(day, "  Meeting  "));
        assert!(store.add_event(day, "Dinner"));
        assert_eq!(store.events_for(day), ["Meeting", "Dinner"]);
    }

    #[test]
    fn rejects_whitespace_only_input() {
        let mut store = EventStore::new();
        let day = date("2024-06-15");

        assert!(!store.add_event(day, "   "));
        assert!(!store.add_event(day, ""));
        assert!(store.is_empty());
        assert!(!store.contains_date(day));
    }

    #[test]
    fn deleting_last_event_removes_the_date_key() {
        let mut store = EventStore::new();
        let day = date("2024-06-15");
        store.add_event(day, "Meeting");

        let removed = store.delete_event(day, 0).expect("delete should succeed");
        assert_eq!(removed, "Meeting");
        assert!(!store.contains_date(day));
        assert!(store.is_empty());
    }

    #[test]
    fn deleting_by_index_keeps_remaining_order() {
        let mut store = EventStore::new();
        let day = date("2024-06-15");
        store.add_event(day, "First");
        store.add_event(day, "Second");
        store.add_event(day, "Third");

        store.delete_event(day, 1).expect("delete should succeed");
        assert_eq!(store.events_for(day), ["First", "Third"]);
        assert!(store.contains_date(day));
    }

    #[test]
    fn delete_out_of_range_is_an_error() {
        let mut store = EventStore::new();
        let day = date("2024-06-15");
        store.add_event(day, "Meeting");

        assert!(store.delete_event(day, 5).is_err());
        assert!(store.delete_event(date("2024-06-16"), 0).is_err());
        assert_eq!(store.events_for(day), ["Meeting"]);
    }
}
