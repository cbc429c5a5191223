//! In-memory block tree.
//!
//! The reference page store: a flat arena of blocks keyed by id, with
//! parent links and ordered child lists kept in sync on every mutation.
//!
//! ## Invariants
//!
//! - The root is a container with id 0 and no parent. It cannot be deleted
//!   or moved.
//! - Every non-root block appears in exactly one container's child list,
//!   and its `parent` points at that container.
//! - Deleting a block removes its whole subtree and detaches it from its
//!   parent. No dangling child ids survive.

use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::{Error, Result};

/// Id of the page root container.
pub const ROOT_ID: BlockId = BlockId(0);

// ============================================================================
// Snapshot
// ============================================================================

/// Point-in-time copy of the tree handed to a [`crate::storage::PageStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub root: BlockId,
    /// Blocks in pre-order from the root.
    pub blocks: Vec<Block>,
    pub taken_at: DateTime<Utc>,
}

// ============================================================================
// BlockTree
// ============================================================================

#[derive(Debug, Clone)]
pub struct BlockTree {
    blocks: HashMap<BlockId, Block>,
    next_id: u64,
}

impl Default for BlockTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockTree {
    /// Empty page: just the root container.
    pub fn new() -> Self {
        let mut blocks = HashMap::new();
        blocks.insert(ROOT_ID, Block::new(ROOT_ID, BlockContent::Container));
        Self { blocks, next_id: ROOT_ID.0 + 1 }
    }

    pub fn root(&self) -> BlockId {
        ROOT_ID
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Never true: the root always exists.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    fn get_mut(&mut self, id: BlockId) -> Result<&mut Block> {
        self.blocks.get_mut(&id).ok_or(Error::BlockNotFound(id))
    }

    fn require(&self, id: BlockId) -> Result<&Block> {
        self.blocks.get(&id).ok_or(Error::BlockNotFound(id))
    }

    pub fn parent(&self, id: BlockId) -> Option<BlockId> {
        self.blocks.get(&id).and_then(|b| b.parent)
    }

    pub fn children(&self, id: BlockId) -> &[BlockId] {
        self.blocks.get(&id).map(|b| b.children.as_slice()).unwrap_or(&[])
    }

    /// `id` and everything below it, pre-order.
    pub fn subtree(&self, id: BlockId) -> Vec<BlockId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(block) = self.blocks.get(&next) else { continue };
            out.push(next);
            stack.extend(block.children.iter().rev().copied());
        }
        out
    }

    /// Every block, pre-order from the root.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.subtree(ROOT_ID).into_iter().filter_map(move |id| self.blocks.get(&id))
    }

    /// Is `ancestor` on the path from `id` up to the root (or `id` itself)?
    pub fn is_ancestor(&self, ancestor: BlockId, id: BlockId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Insert a new block under `parent` at `index` (end when `None` or out
    /// of range).
    pub fn insert(&mut self, parent: BlockId, index: Option<usize>, content: BlockContent) -> Result<BlockId> {
        if !self.require(parent)?.is_container() {
            return Err(Error::NotAContainer(parent));
        }

        let id = BlockId(self.next_id);
        self.next_id += 1;

        let mut block = Block::new(id, content);
        block.parent = Some(parent);
        let kind = block.kind();
        self.blocks.insert(id, block);
        self.attach(parent, id, index)?;

        tracing::debug!(%id, %parent, %kind, "block inserted");
        Ok(id)
    }

    /// Remove `id` and its subtree. Returns the removed ids, pre-order.
    pub fn delete(&mut self, id: BlockId) -> Result<Vec<BlockId>> {
        if id == ROOT_ID {
            return Err(Error::RootBlock);
        }
        let parent = self.require(id)?.parent;
        if let Some(parent) = parent {
            self.detach(parent, id);
        }

        let removed = self.subtree(id);
        for rid in &removed {
            self.blocks.remove(rid);
        }

        tracing::debug!(%id, removed = removed.len(), "block deleted");
        Ok(removed)
    }

    /// Move `id` under `new_parent` at `index`.
    pub fn move_block(&mut self, id: BlockId, new_parent: BlockId, index: Option<usize>) -> Result<()> {
        if id == ROOT_ID {
            return Err(Error::RootBlock);
        }
        self.require(id)?;
        if !self.require(new_parent)?.is_container() {
            return Err(Error::NotAContainer(new_parent));
        }
        if self.is_ancestor(id, new_parent) {
            return Err(Error::Cycle { block: id, target: new_parent });
        }

        if let Some(old) = self.parent(id) {
            self.detach(old, id);
        }
        self.get_mut(id)?.parent = Some(new_parent);
        self.attach(new_parent, id, index)?;

        tracing::debug!(%id, %new_parent, "block moved");
        Ok(())
    }

    fn attach(&mut self, parent: BlockId, id: BlockId, index: Option<usize>) -> Result<()> {
        let children = &mut self.get_mut(parent)?.children;
        let at = index.map_or(children.len(), |i| i.min(children.len()));
        children.insert(at, id);
        Ok(())
    }

    fn detach(&mut self, parent: BlockId, id: BlockId) {
        if let Some(p) = self.blocks.get_mut(&parent) {
            p.children.retain(|c| *c != id);
        }
    }

    // ========================================================================
    // Content & styles
    // ========================================================================

    /// Replace a block's content. The type tag must stay the same.
    pub fn update_content(&mut self, id: BlockId, content: BlockContent) -> Result<()> {
        let block = self.get_mut(id)?;
        if block.kind() != content.kind() {
            return Err(Error::KindMismatch { expected: block.kind(), got: content.kind() });
        }
        block.content = content;
        tracing::debug!(%id, "content updated");
        Ok(())
    }

    /// Store `value` under `key`, replacing whatever was there.
    pub fn set_style(&mut self, id: BlockId, key: &str, value: ResponsiveStyle) -> Result<()> {
        let block = self.get_mut(id)?;
        tracing::debug!(%id, key, %value, "style set");
        block.styles.insert(key.to_string(), value);
        Ok(())
    }

    /// Write `raw` at `breakpoint` through the responsive writer.
    pub fn write_style(
        &mut self,
        id: BlockId,
        key: &str,
        raw: &str,
        breakpoint: Breakpoint,
        mode: StyleMode,
    ) -> Result<&ResponsiveStyle> {
        let block = self.get_mut(id)?;
        let next = block
            .styles
            .get(key)
            .map(|prev| prev.write(raw, breakpoint, mode))
            .unwrap_or_else(|| ResponsiveStyle::default().write(raw, breakpoint, mode));
        tracing::debug!(%id, key, %breakpoint, value = %next, "style written");
        block.styles.insert(key.to_string(), next);
        Ok(&block.styles[key])
    }

    /// Drop `key` entirely. Returns the previous value.
    pub fn remove_style(&mut self, id: BlockId, key: &str) -> Result<Option<ResponsiveStyle>> {
        Ok(self.get_mut(id)?.styles.remove(key))
    }

    /// Effective `(property, value)` pairs for `id` at `breakpoint`.
    pub fn resolved_styles(&self, id: BlockId, breakpoint: Breakpoint) -> Result<Vec<(&str, &str)>> {
        Ok(resolve_styles(&self.require(id)?.styles, breakpoint))
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            root: ROOT_ID,
            blocks: self.iter().cloned().collect(),
            taken_at: Utc::now(),
        }
    }

    /// Rebuild a tree from a snapshot, checking parent/child consistency.
    pub fn from_snapshot(snapshot: PageSnapshot) -> Result<Self> {
        if snapshot.root != ROOT_ID {
            return Err(Error::InvalidSnapshot(format!("root must be {ROOT_ID}, got {}", snapshot.root)));
        }

        let mut blocks = HashMap::with_capacity(snapshot.blocks.len());
        for block in snapshot.blocks {
            let id = block.id;
            if blocks.insert(id, block).is_some() {
                return Err(Error::InvalidSnapshot(format!("duplicate block {id}")));
            }
        }

        let root = blocks
            .get(&ROOT_ID)
            .ok_or_else(|| Error::InvalidSnapshot("missing root block".into()))?;
        if !root.is_container() || root.parent.is_some() {
            return Err(Error::InvalidSnapshot("root must be a parentless container".into()));
        }

        for block in blocks.values() {
            if !block.children.is_empty() && !block.is_container() {
                return Err(Error::InvalidSnapshot(format!("{} block {} has children", block.kind(), block.id)));
            }
            for (i, child) in block.children.iter().enumerate() {
                if block.children[..i].contains(child) {
                    return Err(Error::InvalidSnapshot(format!(
                        "duplicate child {child} in {}", block.id
                    )));
                }
                let parent_of_child = blocks.get(child).and_then(|c| c.parent);
                if parent_of_child != Some(block.id) {
                    return Err(Error::InvalidSnapshot(format!(
                        "child {child} of {} does not point back at it", block.id
                    )));
                }
            }
            if let Some(parent) = block.parent {
                let listed = blocks.get(&parent).is_some_and(|p| p.children.contains(&block.id));
                if !listed {
                    return Err(Error::InvalidSnapshot(format!(
                        "block {} is missing from parent {parent}", block.id
                    )));
                }
            }
        }

        let next_id = blocks.keys().map(|id| id.0).max().unwrap_or(0) + 1;
        let tree = Self { blocks, next_id };

        let reachable = tree.subtree(ROOT_ID).len();
        if reachable != tree.len() {
            return Err(Error::InvalidSnapshot(format!(
                "{} of {} blocks reachable from root", reachable, tree.len()
            )));
        }
        Ok(tree)
    }
}
