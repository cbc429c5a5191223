//! # Editor
//!
//! The page-level owner of editing state: the block tree, the selected
//! block, the breakpoint being edited, and at most one pending debounced
//! edit. Side-panel controls call into this; nothing else mutates the tree.
//!
//! ## Pending edits
//!
//! Continuous input (a color picker) goes through [`Editor::queue_style`].
//! Only the last value inside the quiet window is committed, on the next
//! [`Editor::flush_pending`] past the deadline. A pending edit is dropped,
//! not applied, when its editing context goes away: the selection changes,
//! its block is deleted, [`Editor::cancel_pending`] is called, or the editor
//! itself is dropped. [`Editor::save`] commits a pending edit first. A
//! direct write to the same property supersedes it.

pub mod debounce;

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::controls::StyleControl;
use crate::model::*;
use crate::model::template;
use crate::storage::PageStore;
use crate::tree::BlockTree;
use crate::{Error, Result};

pub use debounce::Debouncer;

/// A debounced style write waiting for its quiet window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub block: BlockId,
    pub key: String,
    pub raw: String,
    pub breakpoint: Breakpoint,
    pub mode: StyleMode,
    /// Written with the same value when the edit commits.
    pub mirror: Option<String>,
}

impl PendingEdit {
    fn targets(&self, block: BlockId, key: &str) -> bool {
        self.block == block && (self.key == key || self.mirror.as_deref() == Some(key))
    }
}

/// What a numeric control shows for the current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlValue {
    /// Bare number, or the raw value when nothing numeric was found.
    pub numeric: String,
    /// Active unit suffix (empty when unitless).
    pub unit: String,
    /// Template the number was found in.
    pub template: Option<String>,
}

pub struct Editor<S: PageStore> {
    tree: BlockTree,
    store: S,
    config: EditorConfig,
    selection: Option<BlockId>,
    breakpoint: Breakpoint,
    pending: Debouncer<PendingEdit>,
}

impl<S: PageStore> Editor<S> {
    /// Editor over an empty page.
    pub fn new(store: S, config: EditorConfig) -> Self {
        Self::with_tree(BlockTree::new(), store, config)
    }

    pub fn with_tree(tree: BlockTree, store: S, config: EditorConfig) -> Self {
        Self {
            tree,
            store,
            breakpoint: config.initial_breakpoint,
            pending: Debouncer::new(config.debounce_window()),
            config,
            selection: None,
        }
    }

    /// Editor over the store's latest revision, or an empty page.
    pub fn open(store: S, config: EditorConfig) -> Result<Self> {
        let tree = match store.latest()? {
            Some(snapshot) => BlockTree::from_snapshot(snapshot)?,
            None => BlockTree::new(),
        };
        Ok(Self::with_tree(tree, store, config))
    }

    pub fn tree(&self) -> &BlockTree { &self.tree }
    pub fn store(&self) -> &S { &self.store }
    pub fn config(&self) -> &EditorConfig { &self.config }
    pub fn breakpoint(&self) -> Breakpoint { self.breakpoint }
    pub fn selection(&self) -> Option<BlockId> { self.selection }
    pub fn pending(&self) -> Option<&PendingEdit> { self.pending.peek() }

    pub fn selected(&self) -> Option<&Block> {
        self.selection.and_then(|id| self.tree.get(id))
    }

    fn selected_id(&self) -> Result<BlockId> {
        self.selection.ok_or(Error::NoSelection)
    }

    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.breakpoint = breakpoint;
    }

    // ========================================================================
    // Selection & structure
    // ========================================================================

    pub fn select(&mut self, id: BlockId) -> Result<()> {
        if !self.tree.contains(id) {
            return Err(Error::BlockNotFound(id));
        }
        if self.selection != Some(id) {
            self.drop_pending("selection changed");
        }
        self.selection = Some(id);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.drop_pending("selection cleared");
        self.selection = None;
    }

    /// Insert under `parent` and select the new block.
    pub fn insert_block(&mut self, parent: BlockId, index: Option<usize>, content: BlockContent) -> Result<BlockId> {
        let id = self.tree.insert(parent, index, content)?;
        self.select(id)?;
        Ok(id)
    }

    pub fn delete_block(&mut self, id: BlockId) -> Result<Vec<BlockId>> {
        let removed = self.tree.delete(id)?;
        if self.pending.peek().is_some_and(|p| removed.contains(&p.block)) {
            self.drop_pending("block deleted");
        }
        if self.selection.is_some_and(|s| removed.contains(&s)) {
            self.selection = None;
        }
        Ok(removed)
    }

    pub fn move_block(&mut self, id: BlockId, new_parent: BlockId, index: Option<usize>) -> Result<()> {
        self.tree.move_block(id, new_parent, index)
    }

    pub fn update_content(&mut self, content: BlockContent) -> Result<()> {
        let id = self.selected_id()?;
        self.tree.update_content(id, content)
    }

    // ========================================================================
    // Styles
    // ========================================================================

    /// Effective value of `key` on the selected block at the active breakpoint.
    pub fn style_value(&self, key: &str) -> Result<&str> {
        let id = self.selected_id()?;
        let block = self.tree.get(id).ok_or(Error::BlockNotFound(id))?;
        Ok(block.style(key).map_or("", |v| v.resolve(self.breakpoint)))
    }

    /// Write `raw` at the active breakpoint using the configured mode.
    pub fn set_style(&mut self, key: &str, raw: &str) -> Result<()> {
        self.set_style_with_mode(key, raw, self.config.default_mode)
    }

    /// A pending debounced edit of the same property is superseded and
    /// dropped.
    pub fn set_style_with_mode(&mut self, key: &str, raw: &str, mode: StyleMode) -> Result<()> {
        let id = self.selected_id()?;
        if self.pending.peek().is_some_and(|p| p.targets(id, key)) {
            self.drop_pending("superseded by direct write");
        }
        self.tree.write_style(id, key, raw, self.breakpoint, mode)?;
        Ok(())
    }

    /// Remove the active breakpoint's override of `key` so it inherits.
    pub fn clear_override(&mut self, key: &str) -> Result<()> {
        let id = self.selected_id()?;
        let block = self.tree.get(id).ok_or(Error::BlockNotFound(id))?;
        if let Some(value) = block.style(key) {
            let next = value.clear(self.breakpoint);
            self.tree.set_style(id, key, next)?;
        }
        Ok(())
    }

    /// Split the current value of `control` into number, unit and template.
    pub fn control_value(&self, control: &StyleControl) -> Result<ControlValue> {
        let raw = self.style_value(&control.key)?;
        let mut candidates = control.candidate_templates();
        if candidates.is_empty() {
            candidates = self.config.templates.iter().map(String::as_str).collect();
        }
        let extracted = template::extract(raw, &candidates);

        Ok(match extracted.matched_template {
            Some(t) => ControlValue {
                numeric: extracted.numeric_value,
                unit: control.unit_for_template(&t).map(|u| u.suffix.clone()).unwrap_or_default(),
                template: Some(t),
            },
            None => {
                let parsed = parse_value_unit(raw);
                if parsed.value.is_empty() {
                    ControlValue { numeric: raw.to_string(), unit: String::new(), template: None }
                } else {
                    ControlValue { numeric: parsed.value, unit: parsed.unit, template: None }
                }
            }
        })
    }

    /// Set the number a control edits, keeping its unit or template.
    ///
    /// The number is clamped to the active unit's bounds. The control's
    /// mirror property receives the same raw value. Returns the raw value
    /// written.
    pub fn set_control_number(&mut self, control: &StyleControl, number: f64) -> Result<String> {
        let current = self.control_value(control)?;
        let unit = match &current.template {
            Some(t) => control.unit_for_template(t),
            None => select_unit(&control.units, &current.unit),
        };

        let clamped = unit.map_or(number, |u| u.clamp(number));
        let numeric = format_number(clamped);
        let raw = match (&current.template, unit) {
            (Some(t), _) => template::replace(Some(t), &numeric),
            (None, Some(u)) => u.format(&numeric),
            (None, None) => numeric,
        };

        self.write_control(control, &raw)?;
        Ok(raw)
    }

    /// Switch `control` to the unit with `suffix` (or its first unit),
    /// resetting the value. Magnitudes are not converted. Returns `false`
    /// when the control has no units.
    pub fn change_unit(&mut self, control: &StyleControl, suffix: &str) -> Result<bool> {
        let Some(unit) = select_unit(&control.units, suffix) else {
            return Ok(false);
        };
        let reset = unit.reset_value.clone();
        self.write_control(control, &reset)?;
        Ok(true)
    }

    fn write_control(&mut self, control: &StyleControl, raw: &str) -> Result<()> {
        self.set_style_with_mode(&control.key, raw, control.mode)?;
        if let Some(mirror) = &control.mirror {
            self.set_style_with_mode(mirror, raw, control.mode)?;
        }
        Ok(())
    }

    // ========================================================================
    // Debounced edits
    // ========================================================================

    /// Queue a write of `raw` to `key` on the selected block, in the
    /// configured default mode.
    ///
    /// A newer edit for the same block and property replaces this one. An
    /// edit for a different target commits the pending one immediately.
    pub fn queue_style(&mut self, key: &str, raw: &str, now: Instant) -> Result<()> {
        let edit = PendingEdit {
            block: self.selected_id()?,
            key: key.to_string(),
            raw: raw.to_string(),
            breakpoint: self.breakpoint,
            mode: self.config.default_mode,
            mirror: None,
        };
        self.queue(edit, now)
    }

    /// Queue a write of `raw` through `control`: its key, its mode and its
    /// mirror property.
    pub fn queue_control(&mut self, control: &StyleControl, raw: &str, now: Instant) -> Result<()> {
        let edit = PendingEdit {
            block: self.selected_id()?,
            key: control.key.clone(),
            raw: raw.to_string(),
            breakpoint: self.breakpoint,
            mode: control.mode,
            mirror: control.mirror.clone(),
        };
        self.queue(edit, now)
    }

    fn queue(&mut self, edit: PendingEdit, now: Instant) -> Result<()> {
        let same_target = self.pending.peek().is_some_and(|p| p.block == edit.block && p.key == edit.key);
        if let Some(replaced) = self.pending.push(edit, now) {
            if same_target {
                tracing::trace!(key = %replaced.key, raw = %replaced.raw, "intermediate value dropped");
            } else {
                self.commit(replaced)?;
            }
        }
        Ok(())
    }

    /// Commit the pending edit if its quiet window has passed by `now`.
    pub fn flush_pending(&mut self, now: Instant) -> Result<bool> {
        match self.pending.poll(now) {
            Some(edit) => self.commit(edit),
            None => Ok(false),
        }
    }

    /// Drop the pending edit. Returns whether one was pending.
    pub fn cancel_pending(&mut self) -> bool {
        self.drop_pending("cancelled")
    }

    fn drop_pending(&mut self, reason: &str) -> bool {
        match self.pending.cancel() {
            Some(edit) => {
                tracing::debug!(block = %edit.block, key = %edit.key, reason, "pending edit dropped");
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, edit: PendingEdit) -> Result<bool> {
        if !self.tree.contains(edit.block) {
            tracing::debug!(block = %edit.block, key = %edit.key, "pending edit target gone");
            return Ok(false);
        }
        self.tree.write_style(edit.block, &edit.key, &edit.raw, edit.breakpoint, edit.mode)?;
        if let Some(mirror) = &edit.mirror {
            self.tree.write_style(edit.block, mirror, &edit.raw, edit.breakpoint, edit.mode)?;
        }
        Ok(true)
    }

    // ========================================================================
    // Save
    // ========================================================================

    /// Commit any pending edit, then hand a snapshot to the store.
    pub fn save(&mut self) -> Result<()> {
        if let Some(edit) = self.pending.take() {
            self.commit(edit)?;
        }
        self.store.save(self.tree.snapshot())
    }
}

/// Shortest decimal rendering, at most four fractional digits.
fn format_number(n: f64) -> String {
    let s = format!("{n:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls;
    use crate::storage::MemoryStore;
    use crate::tree::ROOT_ID;
    use std::time::Duration;

    fn editor() -> Editor<MemoryStore> {
        Editor::new(MemoryStore::new(), EditorConfig::default())
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-2.25), "-2.25");
    }

    #[test]
    fn test_style_requires_selection() {
        let mut ed = editor();
        assert!(matches!(ed.set_style("color", "red"), Err(Error::NoSelection)));
    }

    #[test]
    fn test_insert_selects() {
        let mut ed = editor();
        let id = ed.insert_block(ROOT_ID, None, BlockContent::Container).unwrap();
        assert_eq!(ed.selection(), Some(id));
    }

    #[test]
    fn test_selection_change_drops_pending() {
        let mut ed = editor();
        let t0 = Instant::now();
        let a = ed.insert_block(ROOT_ID, None, BlockContent::Container).unwrap();
        let b = ed.insert_block(ROOT_ID, None, BlockContent::Container).unwrap();

        ed.select(a).unwrap();
        ed.queue_style("color", "#fff", t0).unwrap();
        ed.select(b).unwrap();

        assert!(ed.pending().is_none());
        assert!(!ed.flush_pending(t0 + Duration::from_secs(1)).unwrap());
        assert!(ed.tree().get(a).unwrap().style("color").is_none());
    }

    #[test]
    fn test_direct_write_supersedes_pending() {
        let mut ed = editor();
        let t0 = Instant::now();
        let id = ed.insert_block(ROOT_ID, None, BlockContent::Container).unwrap();

        ed.queue_style("color", "#111", t0).unwrap();
        ed.set_style("background", "#eee").unwrap();
        assert!(ed.pending().is_some(), "other property leaves it pending");

        ed.set_style("color", "#000").unwrap();
        assert!(ed.pending().is_none());
        assert!(!ed.flush_pending(t0 + Duration::from_secs(1)).unwrap());
        assert_eq!(ed.tree().get(id).unwrap().style("color").unwrap().resolve(Breakpoint::Xs), "#000");
    }

    #[test]
    fn test_change_unit_without_units() {
        let mut ed = editor();
        ed.insert_block(ROOT_ID, None, BlockContent::Container).unwrap();
        assert!(!ed.change_unit(&controls::color(), "px").unwrap());
    }
}
