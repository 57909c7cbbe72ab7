//! Music data models

use serde::{Deserialize, Serialize};
use std::fmt;

/// A track as shown in chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    /// Artist names in credit order
    pub artists: Vec<String>,
}

impl Track {
    pub fn new<I, S>(name: impl Into<String>, artists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            artists: artists.into_iter().map(Into::into).collect(),
        }
    }
}

/// `"{artists} - {name}"`, artists joined with `", "`.
impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artists.join(", "), self.name)
    }
}
