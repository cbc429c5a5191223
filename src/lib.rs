//! # blockstyle — Responsive Block Styles for a Visual Page Builder
//!
//! The data model and editing logic behind a drag-and-drop page builder:
//! a tree of content blocks whose style properties can vary per
//! breakpoint, edited from a side panel and rendered live.
//!
//! ## Design Principles
//!
//! 1. **Pure values**: `ResponsiveStyle` resolution and writes are total,
//!    copy-on-write functions. No edit mutates a previous value.
//! 2. **Typed content**: a block's type tag *is* its content variant.
//! 3. **Narrow templates**: compound CSS values are edited through
//!    one-placeholder templates, not a CSS parser.
//! 4. **One owner**: the `Editor` owns the tree; stores only ever see
//!    snapshots.
//!
//! ## Quick Start
//!
//! ```rust
//! use blockstyle::{Breakpoint, BlockContent, Editor, EditorConfig, MemoryStore};
//! use blockstyle::tree::ROOT_ID;
//!
//! # fn example() -> blockstyle::Result<()> {
//! let mut editor = Editor::new(MemoryStore::new(), EditorConfig::default());
//! editor.insert_block(ROOT_ID, None, BlockContent::Container)?;
//!
//! editor.set_style("padding", "24px")?;
//! editor.set_breakpoint(Breakpoint::Xs);
//! editor.set_style("padding", "8px")?;
//!
//! editor.set_breakpoint(Breakpoint::Sm);
//! assert_eq!(editor.style_value("padding")?, "24px");
//!
//! editor.save()?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod controls;
pub mod tree;
pub mod editor;
pub mod storage;
pub mod export;
pub mod config;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Breakpoint, ResponsiveStyle, StyleMode, StyleMap,
    Unit, ValueUnit, Extracted,
    Block, BlockId, BlockKind, BlockContent, HeadingLevel,
    parse_value_unit, select_unit,
};
pub use model::template::{extract, replace};

// ============================================================================
// Re-exports: Tree, Editor, Storage
// ============================================================================

pub use tree::{BlockTree, PageSnapshot};
pub use controls::StyleControl;
pub use editor::{Editor, ControlValue, PendingEdit};
pub use storage::{PageStore, MemoryStore};
pub use config::EditorConfig;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    #[error("Block {0} is not a container")]
    NotAContainer(BlockId),

    #[error("The root block cannot be deleted or moved")]
    RootBlock,

    #[error("Cannot move block {block} into its own subtree (target {target})")]
    Cycle { block: BlockId, target: BlockId },

    #[error("Content kind mismatch: expected {expected}, got {got}")]
    KindMismatch { expected: BlockKind, got: BlockKind },

    #[error("No block selected")]
    NoSelection,

    #[error("Unknown breakpoint: {0}")]
    UnknownBreakpoint(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
