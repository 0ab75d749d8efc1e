//! Deterministic in-memory CRUD repository.
//!
//! `InMemoryRepository` is the test stand-in for the platform's real
//! storage collaborator. Responses are deterministic and immediate — no
//! artificial latency, no persistence — and listing returns rows in
//! insertion order, so the scoping filter's order preservation is
//! observable end to end.
//!
//! The repository deliberately performs no access checks of its own: it is
//! the collaborator *behind* the gateway, not a second enforcement point.

use std::sync::RwLock;

use thiserror::Error;
use tracing::debug;

use custos_contracts::{capability::ResourceName, record::ScopedRecord};
use custos_core::traits::RecordSource;

/// A record with a stable identifier the repository can key CRUD by.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Errors the repository reports to its callers.
///
/// These are storage-collaborator errors, deliberately separate from the
/// core's `CustosError` — the repository sits outside the trust boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// `create` was called with an id that already exists.
    #[error("record '{id}' already exists in '{resource}'")]
    Duplicate { id: String, resource: String },

    /// `update` or `delete` referenced an id that does not exist.
    #[error("record '{id}' not found in '{resource}'")]
    NotFound { id: String, resource: String },
}

/// An in-memory collection of records for one resource.
///
/// # Thread safety
///
/// Rows live behind an `RwLock`; listing clones the rows so callers never
/// observe a partially applied mutation.
pub struct InMemoryRepository<R> {
    resource: ResourceName,
    rows: RwLock<Vec<R>>,
}

impl<R> InMemoryRepository<R>
where
    R: ScopedRecord + Identified + Clone + Send + Sync,
{
    /// An empty repository for the given resource.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: ResourceName::new(resource),
            rows: RwLock::new(Vec::new()),
        }
    }

    /// A repository pre-populated with `rows`, kept in the given order.
    pub fn seeded(resource: impl Into<String>, rows: Vec<R>) -> Self {
        Self {
            resource: ResourceName::new(resource),
            rows: RwLock::new(rows),
        }
    }

    /// Insert a new record. Fails if a record with the same id exists.
    pub fn create(&self, row: R) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().expect("repository lock poisoned");
        if rows.iter().any(|existing| existing.id() == row.id()) {
            return Err(RepositoryError::Duplicate {
                id: row.id().to_string(),
                resource: self.resource.0.clone(),
            });
        }
        debug!(resource = %self.resource, id = row.id(), "record created");
        rows.push(row);
        Ok(())
    }

    /// Fetch one record by id.
    pub fn get(&self, id: &str) -> Option<R> {
        let rows = self.rows.read().expect("repository lock poisoned");
        rows.iter().find(|row| row.id() == id).cloned()
    }

    /// Replace the record with the same id as `row`.
    pub fn update(&self, row: R) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().expect("repository lock poisoned");
        match rows.iter_mut().find(|existing| existing.id() == row.id()) {
            Some(slot) => {
                *slot = row;
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                id: row.id().to_string(),
                resource: self.resource.0.clone(),
            }),
        }
    }

    /// Remove one record by id.
    pub fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().expect("repository lock poisoned");
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        if rows.len() == before {
            return Err(RepositoryError::NotFound {
                id: id.to_string(),
                resource: self.resource.0.clone(),
            });
        }
        debug!(resource = %self.resource, id, "record deleted");
        Ok(())
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.rows.read().expect("repository lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R> RecordSource for InMemoryRepository<R>
where
    R: ScopedRecord + Identified + Clone + Send + Sync,
{
    type Record = R;

    fn resource(&self) -> &ResourceName {
        &self.resource
    }

    /// All rows in insertion order.
    fn list(&self) -> Vec<R> {
        self.rows.read().expect("repository lock poisoned").clone()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use custos_core::traits::RecordSource;

    use crate::records::{sample_stock_items, StockItem};

    use super::{InMemoryRepository, RepositoryError};

    fn repo() -> InMemoryRepository<StockItem> {
        InMemoryRepository::seeded("stock_items", sample_stock_items())
    }

    #[test]
    fn list_preserves_insertion_order() {
        let repo = repo();
        let ids: Vec<String> = repo.list().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["stk-01", "stk-02", "stk-03", "stk-04"]);
    }

    #[test]
    fn create_rejects_duplicate_ids() {
        let repo = repo();
        let duplicate = repo.get("stk-01").unwrap();

        match repo.create(duplicate) {
            Err(RepositoryError::Duplicate { id, resource }) => {
                assert_eq!(id, "stk-01");
                assert_eq!(resource, "stock_items");
            }
            other => panic!("expected Duplicate, got {:?}", other),
        }
        assert_eq!(repo.len(), 4);
    }

    #[test]
    fn update_replaces_matching_row() {
        let repo = repo();
        let mut item = repo.get("stk-02").unwrap();
        item.quantity = 118;

        repo.update(item).unwrap();
        assert_eq!(repo.get("stk-02").unwrap().quantity, 118);
        // Position is unchanged by an update.
        assert_eq!(repo.list()[1].id, "stk-02");
    }

    #[test]
    fn update_and_delete_report_missing_ids() {
        let repo = repo();
        let mut ghost = repo.get("stk-01").unwrap();
        ghost.id = "stk-99".to_string();

        assert!(matches!(
            repo.update(ghost),
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete("stk-99"),
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[test]
    fn delete_removes_exactly_one_row() {
        let repo = repo();
        repo.delete("stk-03").unwrap();

        assert_eq!(repo.len(), 3);
        assert!(repo.get("stk-03").is_none());
    }
}
