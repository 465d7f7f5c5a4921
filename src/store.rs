//! Storage contract for persisted transactions.

use std::collections::BTreeMap;

use crate::{errors::StorageError, types::Transaction};

/// Key-value record store with auto-assigned integer ids.
///
/// Calls are synchronous; each completes before the next starts, so bulk
/// inserts land in call order.
pub trait TransactionStore {
    /// Inserts `record` and returns its id. A record without an id gets the
    /// next free one.
    fn add(&mut self, record: Transaction) -> Result<u64, StorageError>;

    /// Inserts or replaces `record` under its id.
    fn update(&mut self, record: Transaction) -> Result<u64, StorageError>;

    fn get(&self, id: u64) -> Result<Option<Transaction>, StorageError>;

    fn get_all(&self) -> Result<Vec<Transaction>, StorageError>;

    fn delete(&mut self, id: u64) -> Result<(), StorageError>;

    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-memory store. Ids start at 1 and are never reused, even after `clear`.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: BTreeMap<u64, Transaction>,
    /// `None` once `u64::MAX` has been handed out
    next_id: Option<u64>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore {
            records: BTreeMap::new(),
            next_id: Some(1),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn assign_id(&mut self, requested: Option<u64>) -> Option<u64> {
        let id = requested.or(self.next_id)?;
        self.next_id = self
            .next_id
            .zip(id.checked_add(1))
            .map(|(next, after)| next.max(after));
        Some(id)
    }
}

impl TransactionStore for MemoryStore {
    fn add(&mut self, mut record: Transaction) -> Result<u64, StorageError> {
        if let Some(id) = record.id {
            if self.records.contains_key(&id) {
                return Err(StorageError::DuplicateKey(id));
            }
        }

        let id = self
            .assign_id(record.id)
            .ok_or_else(|| StorageError::Add("no ids left to assign".to_string()))?;
        record.id = Some(id);
        self.records.insert(id, record);
        Ok(id)
    }

    fn update(&mut self, mut record: Transaction) -> Result<u64, StorageError> {
        let id = self
            .assign_id(record.id)
            .ok_or_else(|| StorageError::Update("no ids left to assign".to_string()))?;
        record.id = Some(id);
        self.records.insert(id, record);
        Ok(id)
    }

    fn get(&self, id: u64) -> Result<Option<Transaction>, StorageError> {
        Ok(self.records.get(&id).cloned())
    }

    fn get_all(&self) -> Result<Vec<Transaction>, StorageError> {
        Ok(self.records.values().cloned().collect())
    }

    fn delete(&mut self, id: u64) -> Result<(), StorageError> {
        self.records.remove(&id);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.records.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{category::Category, types::TransactionType};
    use rust_decimal::dec;

    fn txn(description: &str) -> Transaction {
        Transaction::new("2024-03-05", description, dec!(10), Category::Other, TransactionType::Expense)
    }

    #[test]
    fn test_add_assigns_incrementing_ids() {
        let mut store = MemoryStore::new();
        assert_eq!(store.add(txn("a")).unwrap(), 1);
        assert_eq!(store.add(txn("b")).unwrap(), 2);
        assert_eq!(store.get(2).unwrap().unwrap().description, "b");
        assert_eq!(store.get(2).unwrap().unwrap().id, Some(2));
    }

    #[test]
    fn test_add_with_explicit_id() {
        let mut store = MemoryStore::new();
        assert_eq!(store.add(txn("a").with_id(10)).unwrap(), 10);
        assert_eq!(store.add(txn("b")).unwrap(), 11);
        assert_eq!(store.add(txn("c").with_id(10)), Err(StorageError::DuplicateKey(10)));
    }

    #[test]
    fn test_update_replaces_record() {
        let mut store = MemoryStore::new();
        let id = store.add(txn("a")).unwrap();

        let mut edited = store.get(id).unwrap().unwrap();
        edited.description = "edited".to_string();
        edited.category = Category::Food;
        assert_eq!(store.update(edited).unwrap(), id);

        let stored = store.get(id).unwrap().unwrap();
        assert_eq!(stored.description, "edited");
        assert_eq!(stored.category, Category::Food);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_without_id_inserts() {
        let mut store = MemoryStore::new();
        let id = store.update(txn("new")).unwrap();
        assert_eq!(id, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.get(42).unwrap().is_none());
    }

    #[test]
    fn test_delete_and_clear() {
        let mut store = MemoryStore::new();
        store.add(txn("a")).unwrap();
        store.add(txn("b")).unwrap();
        store.add(txn("c")).unwrap();

        store.delete(2).unwrap();
        store.delete(99).unwrap();
        let ids: Vec<Option<u64>> = store.get_all().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![Some(1), Some(3)]);

        store.clear().unwrap();
        assert!(store.is_empty());
        assert_eq!(store.add(txn("d")).unwrap(), 4);
    }

    #[test]
    fn test_explicit_max_id_exhausts_counter() {
        let mut store = MemoryStore::new();
        assert_eq!(store.add(txn("last").with_id(u64::MAX)).unwrap(), u64::MAX);
        assert!(matches!(store.add(txn("next")), Err(StorageError::Add(_))));
        assert!(matches!(store.update(txn("next")), Err(StorageError::Update(_))));

        // explicit ids below the maximum are still accepted
        assert_eq!(store.add(txn("low").with_id(5)).unwrap(), 5);
        assert_eq!(store.get(u64::MAX).unwrap().unwrap().description, "last");
        assert_eq!(store.len(), 2);
    }
}
