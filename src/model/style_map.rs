//! StyleMap — the property → responsive value store on a block.

use std::collections::BTreeMap;

use super::{Breakpoint, ResponsiveStyle};

/// CSS property name → responsive value. Ordered so rendering is stable.
pub type StyleMap = BTreeMap<String, ResponsiveStyle>;

/// Effective declarations at `breakpoint`, skipping properties that
/// resolve to nothing.
pub fn resolve_styles(styles: &StyleMap, breakpoint: Breakpoint) -> Vec<(&str, &str)> {
    styles
        .iter()
        .map(|(k, v)| (k.as_str(), v.resolve(breakpoint)))
        .filter(|(_, v)| !v.is_empty())
        .collect()
}

/// Declarations at `breakpoint` whose resolved value differs from the next
/// wider breakpoint. At `Desktop` this is every non-empty declaration.
pub fn breakpoint_overrides(styles: &StyleMap, breakpoint: Breakpoint) -> Vec<(&str, &str)> {
    let Some(wider) = breakpoint.wider() else {
        return resolve_styles(styles, breakpoint);
    };
    styles
        .iter()
        .filter_map(|(k, v)| {
            let here = v.resolve(breakpoint);
            (here != v.resolve(wider) && !here.is_empty()).then_some((k.as_str(), here))
        })
        .collect()
}

/// Render `prop: value;` pairs as one inline style string.
pub fn to_inline_css(styles: &StyleMap, breakpoint: Breakpoint) -> String {
    resolve_styles(styles, breakpoint)
        .into_iter()
        .map(|(k, v)| format!("{k}: {v};"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> StyleMap {
        let mut styles = StyleMap::new();
        styles.insert("color".into(), ResponsiveStyle::global("red"));
        styles.insert(
            "width".into(),
            ResponsiveStyle::per_breakpoint([(Breakpoint::Desktop, "50%"), (Breakpoint::Xs, "100%")]),
        );
        styles.insert("margin".into(), ResponsiveStyle::global(""));
        styles
    }

    #[test]
    fn test_resolve_skips_empty() {
        let styles = sample();
        assert_eq!(
            resolve_styles(&styles, Breakpoint::Sm),
            vec![("color", "red"), ("width", "50%")]
        );
    }

    #[test]
    fn test_overrides_only_differences() {
        let styles = sample();
        assert!(breakpoint_overrides(&styles, Breakpoint::Sm).is_empty());
        assert_eq!(breakpoint_overrides(&styles, Breakpoint::Xs), vec![("width", "100%")]);
    }

    #[test]
    fn test_inline_css() {
        assert_eq!(to_inline_css(&sample(), Breakpoint::Xs), "color: red; width: 100%;");
    }
}
