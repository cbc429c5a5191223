//! CSS unit descriptors and `"<number><unit>"` parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::template;

/// A unit a style control can edit in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub suffix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Value written when the user switches to this unit.
    pub reset_value: String,
    /// Compound expression the number is embedded in, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl Unit {
    pub fn new(suffix: impl Into<String>, reset_value: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            min: None,
            max: None,
            step: None,
            reset_value: reset_value.into(),
            template: None,
        }
    }

    pub fn with_bounds(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self.step = Some(step);
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Clamp to `[min, max]`, snapping to `step` counted from `min` (or 0).
    pub fn clamp(&self, n: f64) -> f64 {
        let mut v = n;
        if let Some(step) = self.step.filter(|s| *s > 0.0) {
            let base = self.min.unwrap_or(0.0);
            v = base + ((v - base) / step).round() * step;
        }
        if let Some(min) = self.min {
            v = v.max(min);
        }
        if let Some(max) = self.max {
            v = v.min(max);
        }
        v
    }

    /// Render a numeric value in this unit: through the template when one is
    /// set, otherwise as `<number><suffix>`.
    pub fn format(&self, numeric: &str) -> String {
        match &self.template {
            Some(t) => template::replace(Some(t), numeric),
            None => format!("{numeric}{}", self.suffix),
        }
    }
}

/// Result of [`parse_value_unit`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValueUnit {
    pub value: String,
    pub unit: String,
}

static VALUE_UNIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?(?:\d+\.?\d*|\.\d+))(.*)$").expect("static pattern"));

/// Split `"12px"` into `{ value: "12", unit: "px" }`.
///
/// The value is the leading numeric run (optional `-`, optional decimal
/// point); the rest is the unit. No numeric prefix gives an empty value and
/// the whole string as the unit. Nothing is trimmed.
pub fn parse_value_unit(raw: &str) -> ValueUnit {
    match VALUE_UNIT_RE.captures(raw) {
        Some(caps) => ValueUnit {
            value: caps[1].to_string(),
            unit: caps[2].to_string(),
        },
        None => ValueUnit {
            value: String::new(),
            unit: raw.to_string(),
        },
    }
}

/// Unit whose suffix matches exactly, else the first candidate.
pub fn select_unit<'a>(candidates: &'a [Unit], suffix: &str) -> Option<&'a Unit> {
    candidates
        .iter()
        .find(|u| u.suffix == suffix)
        .or_else(|| candidates.first())
}

/// Stock unit descriptors used by the built-in controls.
pub mod units {
    use super::Unit;
    use crate::model::template::GRID_COLUMNS;

    pub fn px() -> Unit { Unit::new("px", "0px").with_bounds(0.0, 2000.0, 1.0) }
    pub fn percent() -> Unit { Unit::new("%", "100%").with_bounds(0.0, 100.0, 1.0) }
    pub fn vh() -> Unit { Unit::new("vh", "100vh").with_bounds(0.0, 100.0, 1.0) }
    pub fn vw() -> Unit { Unit::new("vw", "100vw").with_bounds(0.0, 100.0, 1.0) }
    pub fn em() -> Unit { Unit::new("em", "1em").with_bounds(0.0, 20.0, 0.1) }
    pub fn rem() -> Unit { Unit::new("rem", "1rem").with_bounds(0.0, 20.0, 0.1) }

    /// Column count rendered as a `grid-template-columns` repeat expression.
    pub fn columns() -> Unit {
        Unit::new("cols", "repeat(1, minmax(0, 1fr))")
            .with_bounds(1.0, 12.0, 1.0)
            .with_template(GRID_COLUMNS)
    }
}
