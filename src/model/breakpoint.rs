//! Screen-width tiers that key responsive style overrides.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A named screen-width tier.
///
/// The derived ordering runs widest → narrowest, which is also the
/// fallback direction read in reverse: a narrow tier with no value of its
/// own inherits from the next wider one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Desktop,
    #[serde(alias = "tablet")]
    Sm,
    #[serde(alias = "mobile")]
    Xs,
}

impl Breakpoint {
    /// All breakpoints, widest first.
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Desktop, Breakpoint::Sm, Breakpoint::Xs];

    /// Wire token shared with the rendering layer.
    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Desktop => "desktop",
            Breakpoint::Sm => "sm",
            Breakpoint::Xs => "xs",
        }
    }

    /// Upper bound of the tier in CSS pixels. `Desktop` is unbounded.
    pub fn max_width_px(self) -> Option<u32> {
        match self {
            Breakpoint::Desktop => None,
            Breakpoint::Sm => Some(991),
            Breakpoint::Xs => Some(575),
        }
    }

    /// The next wider tier, if any.
    pub fn wider(self) -> Option<Breakpoint> {
        match self {
            Breakpoint::Desktop => None,
            Breakpoint::Sm => Some(Breakpoint::Desktop),
            Breakpoint::Xs => Some(Breakpoint::Sm),
        }
    }

    /// `self` followed by every wider tier, in lookup order.
    pub fn fallback_chain(self) -> impl Iterator<Item = Breakpoint> {
        let idx = self as usize;
        (0..=idx).rev().map(|i| Self::ALL[i])
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(Breakpoint::Desktop),
            "sm" | "tablet" => Ok(Breakpoint::Sm),
            "xs" | "mobile" => Ok(Breakpoint::Xs),
            other => Err(Error::UnknownBreakpoint(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_chain_walks_toward_widest() {
        let chain: Vec<_> = Breakpoint::Xs.fallback_chain().collect();
        assert_eq!(chain, vec![Breakpoint::Xs, Breakpoint::Sm, Breakpoint::Desktop]);

        let chain: Vec<_> = Breakpoint::Desktop.fallback_chain().collect();
        assert_eq!(chain, vec![Breakpoint::Desktop]);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("tablet".parse::<Breakpoint>().unwrap(), Breakpoint::Sm);
        assert_eq!("Mobile".parse::<Breakpoint>().unwrap(), Breakpoint::Xs);
        assert_eq!("desktop".parse::<Breakpoint>().unwrap(), Breakpoint::Desktop);
        assert!("watch".parse::<Breakpoint>().is_err());
    }

    #[test]
    fn test_serde_tokens() {
        assert_eq!(serde_json::to_string(&Breakpoint::Sm).unwrap(), "\"sm\"");
        let bp: Breakpoint = serde_json::from_str("\"mobile\"").unwrap();
        assert_eq!(bp, Breakpoint::Xs);
    }

    #[test]
    fn test_ordering_is_widest_first() {
        assert!(Breakpoint::Desktop < Breakpoint::Sm);
        assert!(Breakpoint::Sm < Breakpoint::Xs);
        assert_eq!(Breakpoint::Xs.wider(), Some(Breakpoint::Sm));
    }
}
