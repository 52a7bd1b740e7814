//! In-memory greeting store.

use crate::model::{Greeting, seed_greetings};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::VecDeque;

/// Ordered collection of greetings, newest first.
///
/// Records can only be added at the front; nothing is ever removed or
/// edited in place.
#[derive(Debug, Clone, Default)]
pub struct GreetingStore {
    records: VecDeque<Greeting>,
}

impl GreetingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the two seed records.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let records: VecDeque<Greeting> = seed_greetings(now).into();
        debug!("seeded greeting store (count={})", records.len());
        Self { records }
    }

    /// Insert a record at the front and return a reference to it.
    pub fn prepend(&mut self, greeting: Greeting) -> &Greeting {
        debug!("prepending greeting (id={})", greeting.id());
        self.records.push_front(greeting);
        &self.records[0]
    }

    /// Iterate records newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Greeting> {
        self.records.iter()
    }

    /// Most recent record, if any.
    pub fn first(&self) -> Option<&Greeting> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prepend_puts_newest_first() {
        let mut store = GreetingStore::seeded(Utc::now());
        let id = store.prepend(Greeting::new("Ana", "Hola", Utc::now())).id();
        assert_eq!(store.len(), 3);
        assert_eq!(store.first().map(Greeting::id), Some(id));
    }

    #[test]
    fn empty_store_has_no_first() {
        let store = GreetingStore::new();
        assert!(store.is_empty());
        assert!(store.first().is_none());
    }
}
