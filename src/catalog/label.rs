//! Page labels: numeric page positions and the "all" aggregate

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Identifies one fetched page within a category
///
/// A label is either a 1-based page number, or `All` for the result of a
/// full-category traversal. In the persisted document a numeric label
/// serializes as a JSON number and `All` as the string `"all"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLabel {
    /// A single listing page, 1-based
    Page(u32),

    /// The aggregate of every listing page in the category
    All,
}

impl PageLabel {
    /// Returns true for numeric page labels
    ///
    /// Only numeric labels count toward a category's `total_pages`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Page(_))
    }
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{}", n),
            Self::All => write!(f, "all"),
        }
    }
}

impl FromStr for PageLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        match s.parse::<u32>() {
            Ok(n) if n >= 1 => Ok(Self::Page(n)),
            Ok(n) => Err(format!("page number must be >= 1, got {}", n)),
            Err(_) => Err(format!("expected a page number or \"all\", got '{}'", s)),
        }
    }
}

// Numeric labels sort ascending; "all" sorts after every number.
impl Ord for PageLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Page(a), Self::Page(b)) => a.cmp(b),
            (Self::Page(_), Self::All) => Ordering::Less,
            (Self::All, Self::Page(_)) => Ordering::Greater,
            (Self::All, Self::All) => Ordering::Equal,
        }
    }
}

impl PartialOrd for PageLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for PageLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Page(n) => serializer.serialize_u32(*n),
            Self::All => serializer.serialize_str("all"),
        }
    }
}

impl<'de> Deserialize<'de> for PageLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LabelVisitor;

        impl<'de> Visitor<'de> for LabelVisitor {
            type Value = PageLabel;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a positive page number or the string \"all\"")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<PageLabel, E> {
                if value >= 1 && value <= u64::from(u32::MAX) {
                    Ok(PageLabel::Page(value as u32))
                } else {
                    Err(E::custom(format!("page number out of range: {}", value)))
                }
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<PageLabel, E> {
                if value >= 1 {
                    self.visit_u64(value as u64)
                } else {
                    Err(E::custom(format!("page number out of range: {}", value)))
                }
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<PageLabel, E> {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(LabelVisitor)
    }
}
