mod error;

pub use error::{Error, ErrorKind, Result};

use chrono::NaiveDate;
use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::DateKey;

#[derive(Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        EventId(id.into())
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Constructor)]
pub struct Event {
    id: EventId,
    title: String,
    date: NaiveDate,
}

impl Event {
    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn key(&self) -> DateKey {
        DateKey::from(self.date)
    }
}

/// Ids only need to be unique among the events currently stored.
pub trait IdGenerator {
    fn next_id(&mut self) -> EventId;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> EventId {
        EventId(Uuid::new_v4().hyphenated().to_string())
    }
}

#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn starting_at(next: u64) -> Self {
        SequentialIds { next }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> EventId {
        let id = EventId(format!("evt-{}", self.next));
        self.next += 1;
        id
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn next_id(&mut self) -> EventId {
        (**self).next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sequential_ids_are_distinct() {
        let mut ids = SequentialIds::default();
        let first = ids.next_id();
        let second = ids.next_id();

        assert_ne!(first, second);
        assert_eq!(first.as_ref(), "evt-0");
        assert_eq!(SequentialIds::starting_at(7).next_id().to_string(), "evt-7");
    }

    #[test]
    fn uuid_ids_are_distinct() {
        let mut ids = UuidGenerator;
        let generated: HashSet<EventId> = (0..64).map(|_| ids.next_id()).collect();

        assert_eq!(generated.len(), 64);
    }

    #[test]
    fn event_key_matches_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let event = Event::new(EventId::new("a"), "Standup".to_owned(), date);

        assert_eq!(event.key().to_string(), "2024-05-01");
        assert_eq!(event.title(), "Standup");
    }
}
