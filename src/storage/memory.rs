//! In-memory page store.
//!
//! Keeps every saved snapshot as a revision. Nothing survives the process;
//! use it for tests and for embedding where the host persists pages itself.

use crate::tree::PageSnapshot;
use crate::Result;
use super::PageStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    revisions: Vec<PageSnapshot>,
    /// Oldest revisions are dropped past this count. `None` keeps all.
    max_revisions: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_revisions(max: usize) -> Self {
        Self { revisions: Vec::new(), max_revisions: Some(max.max(1)) }
    }

    pub fn revisions(&self) -> &[PageSnapshot] {
        &self.revisions
    }
}

impl PageStore for MemoryStore {
    fn save(&mut self, snapshot: PageSnapshot) -> Result<()> {
        self.revisions.push(snapshot);
        if let Some(max) = self.max_revisions {
            if self.revisions.len() > max {
                let excess = self.revisions.len() - max;
                self.revisions.drain(..excess);
            }
        }
        tracing::debug!(revisions = self.revisions.len(), "page saved");
        Ok(())
    }

    fn latest(&self) -> Result<Option<PageSnapshot>> {
        Ok(self.revisions.last().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::BlockTree;

    #[test]
    fn test_revisions_are_capped() {
        let tree = BlockTree::new();
        let mut store = MemoryStore::with_max_revisions(2);
        for _ in 0..3 {
            store.save(tree.snapshot()).unwrap();
        }
        assert_eq!(store.revisions().len(), 2);
        assert!(store.latest().unwrap().is_some());
    }

    #[test]
    fn test_empty_store_has_no_latest() {
        assert!(MemoryStore::new().latest().unwrap().is_none());
    }
}
