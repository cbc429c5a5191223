//! Side-panel style controls.
//!
//! A control describes how one CSS property is edited: which units it
//! offers, which compound templates its number may live inside, whether a
//! vendor-prefixed twin is written alongside, and whether edits are
//! per-breakpoint.

use serde::{Deserialize, Serialize};

use crate::model::*;

/// Descriptor for one editable style property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleControl {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub templates: Vec<String>,
    /// Property written with the same value on every edit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror: Option<String>,
    #[serde(default)]
    pub mode: StyleMode,
}

impl StyleControl {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            units: Vec::new(),
            templates: Vec::new(),
            mirror: None,
            mode: StyleMode::Responsive,
        }
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = Unit>) -> Self {
        self.units = units.into_iter().collect();
        self
    }

    pub fn with_templates(mut self, templates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.templates = templates.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mirror(mut self, key: impl Into<String>) -> Self {
        self.mirror = Some(key.into());
        self
    }

    pub fn global(mut self) -> Self {
        self.mode = StyleMode::Global;
        self
    }

    /// Templates to try when reading a raw value: the control's own, then
    /// any unit templates not already listed.
    pub fn candidate_templates(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.templates.iter().map(String::as_str).collect();
        for t in self.units.iter().filter_map(|u| u.template.as_deref()) {
            if !out.contains(&t) {
                out.push(t);
            }
        }
        out
    }

    /// Unit whose template is `template`, if any.
    pub fn unit_for_template(&self, template: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.template.as_deref() == Some(template))
    }
}

// ============================================================================
// Built-in catalog
// ============================================================================

pub fn grid_columns() -> StyleControl {
    StyleControl::new("grid-template-columns", "Columns")
        .with_units([units::columns()])
        .with_templates([GRID_COLUMNS])
}

pub fn grid_rows() -> StyleControl {
    StyleControl::new("grid-template-rows", "Rows")
        .with_units([Unit::new("rows", "repeat(1, auto)").with_bounds(1.0, 12.0, 1.0).with_template(GRID_ROWS)])
}

pub fn grid_column_span() -> StyleControl {
    StyleControl::new("grid-column", "Column span")
        .with_units([Unit::new("span", "span 1").with_bounds(1.0, 12.0, 1.0).with_template(GRID_SPAN)])
}

pub fn font_size() -> StyleControl {
    StyleControl::new("font-size", "Font size").with_units([units::px(), units::rem(), units::em()])
}

pub fn width() -> StyleControl {
    StyleControl::new("width", "Width").with_units([units::px(), units::percent(), units::vw()])
}

pub fn height() -> StyleControl {
    StyleControl::new("height", "Height").with_units([units::px(), units::percent(), units::vh()])
}

pub fn text_stroke_width() -> StyleControl {
    StyleControl::new("text-stroke-width", "Stroke")
        .with_units([Unit::new("px", "0px").with_bounds(0.0, 20.0, 1.0)])
        .with_mirror("-webkit-text-stroke-width")
}

/// Color is edited through the debounced path; it has no units.
pub fn color() -> StyleControl {
    StyleControl::new("color", "Color")
}

/// Every built-in control.
pub fn catalog() -> Vec<StyleControl> {
    vec![
        grid_columns(),
        grid_rows(),
        grid_column_span(),
        font_size(),
        width(),
        height(),
        text_stroke_width(),
        color(),
    ]
}
