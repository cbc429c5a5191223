//! # Page Store Trait
//!
//! The seam between the editor and whatever persists pages. The editor
//! only ever hands over a complete [`PageSnapshot`]; how and where it is
//! kept is the store's business.
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | Revision list in memory, for tests and embedding |

pub mod memory;

use crate::tree::PageSnapshot;
use crate::Result;

pub use memory::MemoryStore;

/// Where saved pages go.
pub trait PageStore {
    /// Persist `snapshot` as the newest revision.
    fn save(&mut self, snapshot: PageSnapshot) -> Result<()>;

    /// The newest saved revision, if any.
    fn latest(&self) -> Result<Option<PageSnapshot>>;
}
