//! Template codec: edit a number embedded in a compound CSS expression.
//!
//! A template is a CSS value with exactly one [`PLACEHOLDER`], for example
//! `repeat([[value]], minmax(0, 1fr))`. [`extract`] pulls the number back
//! out of a raw value, [`replace`] puts an edited number back in.
//!
//! ```text
//! "repeat(3, minmax(0, 1fr))" ──extract──▶ { "3", Some(GRID_COLUMNS) }
//!                          ◀──replace───  (Some(GRID_COLUMNS), "4")
//! ```
//!
//! Matching is intentionally narrow: one numeric placeholder per template,
//! no general CSS parsing.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The token a numeric value is substituted into.
pub const PLACEHOLDER: &str = "[[value]]";

/// `grid-template-columns` with N equal columns.
pub const GRID_COLUMNS: &str = "repeat([[value]], minmax(0, 1fr))";
/// `grid-template-rows` with N auto rows.
pub const GRID_ROWS: &str = "repeat([[value]], auto)";
/// `grid-column` / `grid-row` span.
pub const GRID_SPAN: &str = "span [[value]]";

/// Every template the editor controls know about, in match priority order.
pub const KNOWN_TEMPLATES: &[&str] = &[GRID_COLUMNS, GRID_ROWS, GRID_SPAN];

const NUMBER_PATTERN: &str = r"([+-]?(?:\d+(?:\.\d*)?|\.\d+))";

/// Result of [`extract`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extracted {
    pub numeric_value: String,
    pub matched_template: Option<String>,
}

/// Compiled patterns keyed by template text. `None` marks a template that
/// cannot match (wrong placeholder count).
static PATTERN_CACHE: Lazy<RwLock<HashMap<String, Option<Regex>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Pull the numeric value out of `raw` using the first matching candidate.
///
/// No match is not an error: the raw value passes through unchanged and
/// `matched_template` is `None`.
pub fn extract<S: AsRef<str>>(raw: &str, candidates: &[S]) -> Extracted {
    for candidate in candidates {
        let template = candidate.as_ref();
        let Some(re) = pattern_for(template) else { continue };
        if let Some(caps) = re.captures(raw) {
            if let Some(m) = caps.get(1) {
                tracing::trace!(template, value = m.as_str(), "template matched");
                return Extracted {
                    numeric_value: m.as_str().to_string(),
                    matched_template: Some(template.to_string()),
                };
            }
        }
    }

    Extracted {
        numeric_value: raw.to_string(),
        matched_template: None,
    }
}

/// Substitute `numeric` into `template`; `None` returns `numeric` unchanged.
pub fn replace(template: Option<&str>, numeric: &str) -> String {
    match template {
        Some(t) => t.replacen(PLACEHOLDER, numeric, 1),
        None => numeric.to_string(),
    }
}

/// Does `template` carry exactly one placeholder?
pub fn is_valid_template(template: &str) -> bool {
    template.matches(PLACEHOLDER).count() == 1
}

fn pattern_for(template: &str) -> Option<Regex> {
    if let Some(cached) = PATTERN_CACHE.read().get(template) {
        return cached.clone();
    }

    let compiled = compile(template);
    PATTERN_CACHE.write().insert(template.to_string(), compiled.clone());
    compiled
}

fn compile(template: &str) -> Option<Regex> {
    if !is_valid_template(template) {
        tracing::warn!(template, "template must contain exactly one [[value]] placeholder");
        return None;
    }

    let (prefix, suffix) = template.split_once(PLACEHOLDER)?;
    let pattern = format!(r"^\s*{}{}{}\s*$", literal(prefix), NUMBER_PATTERN, literal(suffix));

    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(template, error = %e, "template failed to compile");
            None
        }
    }
}

/// Escape a literal template fragment, letting whitespace flex around
/// punctuation so `minmax(0,1fr)` and `minmax(0, 1fr)` are the same thing.
fn literal(fragment: &str) -> String {
    let mut out = String::new();
    let mut in_space = false;
    for c in fragment.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push_str(r"\s*");
                in_space = true;
            }
            continue;
        }
        in_space = false;
        match c {
            '(' | ')' | ',' | '/' => {
                out.push_str(r"\s*");
                out.push_str(&regex::escape(&c.to_string()));
                out.push_str(r"\s*");
            }
            _ => out.push_str(&regex::escape(&c.to_string())),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_grid_columns() {
        let got = extract("repeat(4, minmax(0, 1fr))", KNOWN_TEMPLATES);
        assert_eq!(got.numeric_value, "4");
        assert_eq!(got.matched_template.as_deref(), Some(GRID_COLUMNS));
    }

    #[test]
    fn test_extract_tolerates_spacing() {
        let got = extract("repeat(2,minmax(0,1fr))", &[GRID_COLUMNS]);
        assert_eq!(got.numeric_value, "2");

        let got = extract("repeat(3, minmax(0, 1fr))", &["repeat([[value]], minmax(0,1fr))"]);
        assert_eq!(got.numeric_value, "3");
    }

    #[test]
    fn test_first_candidate_wins() {
        let got = extract("span 2", &[GRID_COLUMNS, GRID_SPAN, "span [[value]] "]);
        assert_eq!(got.matched_template.as_deref(), Some(GRID_SPAN));
    }

    #[test]
    fn test_no_match_passes_through() {
        let got = extract("1fr 2fr", KNOWN_TEMPLATES);
        assert_eq!(got, Extracted { numeric_value: "1fr 2fr".into(), matched_template: None });
    }

    #[test]
    fn test_invalid_templates_never_match() {
        assert!(!is_valid_template("repeat(2, 1fr)"));
        assert!(!is_valid_template("[[value]] [[value]]"));
        let got = extract("3 3", &["[[value]] [[value]]"]);
        assert_eq!(got.matched_template, None);
    }

    #[test]
    fn test_replace() {
        assert_eq!(replace(None, "12"), "12");
        assert_eq!(replace(Some(GRID_COLUMNS), "5"), "repeat(5, minmax(0, 1fr))");
    }

    #[test]
    fn test_round_trip_decimal_and_sign() {
        for n in ["5", "-2", "1.5", ".5"] {
            let raw = replace(Some(GRID_SPAN), n);
            assert_eq!(extract(&raw, &[GRID_SPAN]).numeric_value, n);
        }
    }
}
