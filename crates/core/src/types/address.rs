//! Administrative address hierarchy types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Level of a node in the province → city → district hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressLevel {
    Province,
    City,
    District,
}

impl AddressLevel {
    /// The level a node's parent must have, if any.
    #[must_use]
    pub const fn parent_level(&self) -> Option<Self> {
        match self {
            Self::Province => None,
            Self::City => Some(Self::Province),
            Self::District => Some(Self::City),
        }
    }
}

impl fmt::Display for AddressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Province => write!(f, "province"),
            Self::City => write!(f, "city"),
            Self::District => write!(f, "district"),
        }
    }
}

/// One entry in the address hierarchy.
///
/// Provinces serialize without `parentCode`, which gives the
/// `{code, name, type}` projection used by the province listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressNode {
    /// Unique, stable identifier (e.g. "440106").
    pub code: String,
    /// Human-readable label.
    pub name: String,
    /// Hierarchy level.
    #[serde(rename = "type")]
    pub level: AddressLevel,
    /// Code of the owning node one level up; `None` for provinces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_code: Option<String>,
}

impl AddressNode {
    /// A top-level province node.
    #[must_use]
    pub fn province(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            level: AddressLevel::Province,
            parent_code: None,
        }
    }

    /// A city owned by `province_code`.
    #[must_use]
    pub fn city(
        code: impl Into<String>,
        name: impl Into<String>,
        province_code: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            level: AddressLevel::City,
            parent_code: Some(province_code.into()),
        }
    }

    /// A district owned by `city_code`.
    #[must_use]
    pub fn district(
        code: impl Into<String>,
        name: impl Into<String>,
        city_code: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            level: AddressLevel::District,
            parent_code: Some(city_code.into()),
        }
    }
}
