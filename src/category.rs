//! Image categories and the public references derived from them.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ListError;

/// One of the fixed image groupings served by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Carousel source.
    Home,
    Exterior,
    Interior,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Home, Self::Exterior, Self::Interior];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Exterior => "exterior",
            Self::Interior => "interior",
        }
    }

    /// Accepted spellings, for diagnostics.
    pub fn names() -> [&'static str; 3] {
        Self::ALL.map(|category| category.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ListError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == raw)
            .ok_or_else(|| ListError::InvalidCategory(raw.to_string()))
    }
}

/// Root-relative public path of one servable image, `/images/<category>/<file>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(category: Category, file_name: &str) -> Self {
        Self(format!("/images/{}/{}", category.as_str(), file_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ImageRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
