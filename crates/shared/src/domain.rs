use std::collections::HashMap;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub $inner);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(ConnectionId, usize);
id_newtype!(RegionId, i64);

/// A backend data source regions can be searched in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub index: ConnectionId,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub default_name: String,
    /// Localized names keyed by language code. May be empty.
    #[serde(default)]
    pub names: HashMap<String, String>,
}

impl Region {
    pub fn new(default_name: impl Into<String>) -> Self {
        Self {
            default_name: default_name.into(),
            names: HashMap::new(),
        }
    }

    pub fn with_name(mut self, language: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(language.into(), name.into());
        self
    }

    /// Localized name for `language`, falling back to the default name when the
    /// language is unset, empty, or has no translation.
    pub fn display_name(&self, language: Option<&str>) -> &str {
        language
            .filter(|language| !language.is_empty())
            .and_then(|language| self.names.get(language))
            .map(String::as_str)
            .unwrap_or(&self.default_name)
    }
}

/// Chain of region ids from the root area down to the target area.
///
/// `parts` may reference regions that are missing from the accompanying
/// [`RegionIndex`]. `bigger` marks coarse administrative levels, i.e. chains
/// that end above the region that was actually matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionHierarchy {
    pub id: RegionId,
    pub parts: Vec<RegionId>,
    #[serde(default)]
    pub bigger: bool,
}

pub type RegionIndex = HashMap<RegionId, Region>;
