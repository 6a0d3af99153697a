/// Ordered record lists updated by id
///
/// Dashboard pages apply the result of a mutation to the list they render
/// instead of re-reading it. Every transition is keyed by record id, so applying
/// a mutation to a list that already reflects it leaves the list unchanged.

use crate::baas::{County, RecordId};

/// Records addressable by their backend id
pub trait Keyed {
    fn key(&self) -> &RecordId;
}

impl Keyed for County {
    fn key(&self) -> &RecordId {
        &self.id
    }
}

/// An ordered list of records, unique by id
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedList<T> {
    items: Vec<T>,
}

impl<T: Keyed> KeyedList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Append a newly created record, or replace it if the list already has its id
    pub fn apply_created(mut self, record: T) -> Self {
        match self.position(record.key()) {
            Some(index) => self.items[index] = record,
            None => self.items.push(record),
        }
        self
    }

    /// Replace the record with the same id in place; unknown ids are ignored
    pub fn apply_updated(mut self, record: T) -> Self {
        if let Some(index) = self.position(record.key()) {
            self.items[index] = record;
        }
        self
    }

    /// Drop the record with this id
    pub fn apply_deleted(mut self, id: &RecordId) -> Self {
        self.items.retain(|item| item.key() != id);
        self
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.items.iter().position(|item| item.key() == id)
    }
}
