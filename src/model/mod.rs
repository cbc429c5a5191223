//! # Block Style Model
//!
//! Clean DTOs for the page builder: breakpoints, responsive style values,
//! units, templates and blocks. These types cross every boundary:
//! tree ↔ editor ↔ export ↔ store.
//!
//! This module is pure data and pure functions — no I/O, no clock.

pub mod breakpoint;
pub mod responsive;
pub mod unit;
pub mod template;
pub mod block;
pub mod style_map;

pub use breakpoint::Breakpoint;
pub use responsive::{ResponsiveStyle, StyleMode};
pub use unit::{Unit, ValueUnit, parse_value_unit, select_unit, units};
pub use template::{Extracted, PLACEHOLDER, KNOWN_TEMPLATES, GRID_COLUMNS, GRID_ROWS, GRID_SPAN};
pub use block::{Block, BlockId, BlockKind, BlockContent, Children, HeadingLevel, FormField, FieldInput};
pub use style_map::{StyleMap, resolve_styles, breakpoint_overrides, to_inline_css};
