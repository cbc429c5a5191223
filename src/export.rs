//! Stylesheet and JSON export.
//!
//! Produces what the rendering layer consumes: one CSS rule per block for
//! the desktop tier, then a media query per narrower tier carrying only the
//! declarations that change there.
//!
//! ```text
//! BlockTree → export_stylesheet() → .block-N { ... }
//!                                   @media (max-width: 991px) { ... }
//!                                   @media (max-width: 575px) { ... }
//! ```

use std::io::Write;

use crate::model::*;
use crate::tree::BlockTree;
use crate::Result;

/// Write the page stylesheet.
pub fn export_stylesheet(tree: &BlockTree, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "/* blockstyle stylesheet */")?;
    writeln!(writer, "/* Blocks: {} */", tree.len())?;

    for bp in Breakpoint::ALL {
        let rules: Vec<(String, Vec<(&str, &str)>)> = tree
            .iter()
            .map(|b| (b.class_name(), breakpoint_overrides(&b.styles, bp)))
            .filter(|(_, decls)| !decls.is_empty())
            .collect();

        if rules.is_empty() {
            continue;
        }

        let indent = match bp.max_width_px() {
            Some(px) => {
                writeln!(writer)?;
                writeln!(writer, "@media (max-width: {px}px) {{")?;
                "  "
            }
            None => "",
        };

        for (class, decls) in &rules {
            writeln!(writer, "{indent}.{class} {{")?;
            for (k, v) in decls {
                writeln!(writer, "{indent}  {k}: {v};")?;
            }
            writeln!(writer, "{indent}}}")?;
        }

        if bp.max_width_px().is_some() {
            writeln!(writer, "}}")?;
        }
    }

    tracing::debug!(blocks = tree.len(), "stylesheet exported");
    Ok(())
}

/// Write the tree snapshot as pretty JSON.
pub fn export_json(tree: &BlockTree, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &tree.snapshot())?;
    writeln!(writer)?;
    Ok(())
}
