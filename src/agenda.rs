use log;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::calendar::DateKey;
use crate::provider::*;

pub const MAX_EVENTS_PER_DAY: usize = 3;

/// Never modified in place. `add_event` returns a new value sharing every
/// untouched day.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Agenda {
    days: BTreeMap<DateKey, Arc<Vec<Event>>>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events_of_day(&self, key: &DateKey) -> &[Event] {
        self.days
            .get(key)
            .map(|events| events.as_slice())
            .unwrap_or(&[])
    }

    pub fn add_event<G: IdGenerator>(
        &self,
        key: DateKey,
        title: &str,
        ids: &mut G,
    ) -> Result<Agenda> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::new(
                ErrorKind::EmptyTitle,
                "Please enter a title for the event.",
            ));
        }

        let current = self.events_of_day(&key);
        if current.len() >= MAX_EVENTS_PER_DAY {
            return Err(Error::new(
                ErrorKind::CapacityExceeded,
                &format!("Only {} events are allowed per day.", MAX_EVENTS_PER_DAY),
            ));
        }

        let id = ids.next_id();
        debug_assert!(!self.contains_id(&id), "event id '{}' is already taken", id);

        let mut events = Vec::with_capacity(current.len() + 1);
        events.extend_from_slice(current);
        events.push(Event::new(id, title.to_owned(), key.date()));

        log::info!(
            "Added event '{}' on {} ({}/{})",
            title,
            key,
            events.len(),
            MAX_EVENTS_PER_DAY
        );

        let mut days = self.days.clone();
        days.insert(key, Arc::new(events));

        Ok(Agenda { days })
    }

    pub fn contains_id(&self, id: &EventId) -> bool {
        self.days
            .values()
            .flat_map(|events| events.iter())
            .any(|event| event.id() == id)
    }

    pub fn len(&self) -> usize {
        self.days.values().map(|events| events.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
