//! Responsive style values: one global string, or per-breakpoint overrides.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Breakpoint;

/// Whether a property is edited per breakpoint or globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    /// Edits land on the active breakpoint only.
    #[default]
    Responsive,
    /// Edits replace the whole value with a plain string.
    Global,
}

/// A style property value.
///
/// Serialized untagged: a JSON string for `Global`, an object keyed by
/// breakpoint token for `PerBreakpoint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsiveStyle {
    Global(String),
    PerBreakpoint(BTreeMap<Breakpoint, String>),
}

impl Default for ResponsiveStyle {
    fn default() -> Self {
        ResponsiveStyle::Global(String::new())
    }
}

impl ResponsiveStyle {
    pub fn global(value: impl Into<String>) -> Self {
        ResponsiveStyle::Global(value.into())
    }

    /// Build a per-breakpoint value from `(breakpoint, value)` pairs.
    pub fn per_breakpoint<I, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Breakpoint, V)>,
        V: Into<String>,
    {
        ResponsiveStyle::PerBreakpoint(entries.into_iter().map(|(bp, v)| (bp, v.into())).collect())
    }

    pub fn is_responsive(&self) -> bool {
        matches!(self, ResponsiveStyle::PerBreakpoint(_))
    }

    /// Explicit entry for `breakpoint`, without fallback.
    pub fn explicit(&self, breakpoint: Breakpoint) -> Option<&str> {
        match self {
            ResponsiveStyle::Global(v) => Some(v),
            ResponsiveStyle::PerBreakpoint(map) => map.get(&breakpoint).map(String::as_str),
        }
    }

    /// Effective value at `breakpoint`.
    ///
    /// Missing or empty entries inherit from the next wider breakpoint;
    /// nothing set on the way to `Desktop` resolves to `""`.
    pub fn resolve(&self, breakpoint: Breakpoint) -> &str {
        match self {
            ResponsiveStyle::Global(v) => v,
            ResponsiveStyle::PerBreakpoint(map) => breakpoint
                .fallback_chain()
                .find_map(|bp| map.get(&bp).filter(|v| !v.is_empty()))
                .map(String::as_str)
                .unwrap_or(""),
        }
    }

    /// Return a new value reflecting `new_raw` written at `breakpoint`.
    ///
    /// In `Global` mode the result is the plain string. In `Responsive`
    /// mode a plain previous value is promoted to a mapping that carries it
    /// to every other breakpoint. `self` is left untouched.
    pub fn write(&self, new_raw: impl Into<String>, breakpoint: Breakpoint, mode: StyleMode) -> Self {
        let new_raw = new_raw.into();
        match (mode, self) {
            (StyleMode::Global, _) => ResponsiveStyle::Global(new_raw),
            (StyleMode::Responsive, ResponsiveStyle::Global(prev)) => {
                let map = Breakpoint::ALL
                    .iter()
                    .map(|&bp| {
                        let v = if bp == breakpoint { new_raw.clone() } else { prev.clone() };
                        (bp, v)
                    })
                    .collect();
                ResponsiveStyle::PerBreakpoint(map)
            }
            (StyleMode::Responsive, ResponsiveStyle::PerBreakpoint(prev)) => {
                let mut map = prev.clone();
                map.insert(breakpoint, new_raw);
                ResponsiveStyle::PerBreakpoint(map)
            }
        }
    }

    /// Drop the override at `breakpoint` so it inherits again.
    ///
    /// A global value has no overrides and is returned as is.
    pub fn clear(&self, breakpoint: Breakpoint) -> Self {
        match self {
            ResponsiveStyle::Global(_) => self.clone(),
            ResponsiveStyle::PerBreakpoint(prev) => {
                let mut map = prev.clone();
                map.remove(&breakpoint);
                ResponsiveStyle::PerBreakpoint(map)
            }
        }
    }

    /// Fold a mapping whose breakpoints all resolve to one value back into
    /// a plain string.
    pub fn collapse(&self) -> Self {
        match self {
            ResponsiveStyle::Global(_) => self.clone(),
            ResponsiveStyle::PerBreakpoint(_) => {
                let first = self.resolve(Breakpoint::Desktop);
                if Breakpoint::ALL.iter().all(|&bp| self.resolve(bp) == first) {
                    ResponsiveStyle::Global(first.to_string())
                } else {
                    self.clone()
                }
            }
        }
    }
}

/// Free-function form of [`ResponsiveStyle::resolve`].
pub fn resolve(value: &ResponsiveStyle, breakpoint: Breakpoint) -> &str {
    value.resolve(breakpoint)
}

/// Free-function form of [`ResponsiveStyle::write`].
pub fn write(
    new_raw: impl Into<String>,
    breakpoint: Breakpoint,
    previous: &ResponsiveStyle,
    mode: StyleMode,
) -> ResponsiveStyle {
    previous.write(new_raw, breakpoint, mode)
}

impl From<&str> for ResponsiveStyle {
    fn from(v: &str) -> Self { ResponsiveStyle::Global(v.to_owned()) }
}
impl From<String> for ResponsiveStyle {
    fn from(v: String) -> Self { ResponsiveStyle::Global(v) }
}
impl From<BTreeMap<Breakpoint, String>> for ResponsiveStyle {
    fn from(v: BTreeMap<Breakpoint, String>) -> Self { ResponsiveStyle::PerBreakpoint(v) }
}

impl fmt::Display for ResponsiveStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponsiveStyle::Global(v) => write!(f, "{v}"),
            ResponsiveStyle::PerBreakpoint(map) => {
                write!(f, "{{")?;
                for (i, (bp, v)) in map.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{bp}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
