//! Comparison activation table, read from LiveSplit's settings document.
//!
//! LiveSplit stores which comparison generators are enabled as
//!
//! ```xml
//! <ComparisonGeneratorStates>
//!   <Generator name="Best Segments">True</Generator>
//!   <Generator name="Average Segments">False</Generator>
//! </ComparisonGeneratorStates>
//! ```
//!
//! The table is built once before the bridge starts serving and never mutated.

use super::PERSONAL_BEST;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const SECTION_TAG: &[u8] = b"ComparisonGeneratorStates";

#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed LiveSplit settings: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Comparison display name → active flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationTable {
    entries: HashMap<String, bool>,
}

impl ActivationTable {
    /// Build a table from explicit entries. "Personal Best" is always seeded active.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let mut entries: HashMap<String, bool> =
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        entries.insert(PERSONAL_BEST.to_string(), true);
        Self { entries }
    }

    /// Load and parse the settings document at `path`.
    pub fn load(path: &Path) -> Result<Self, ActivationError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ActivationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_document(&contents)?;
        debug!(
            path = %path.display(),
            comparisons = table.entries.len(),
            "Loaded comparison activation table"
        );
        Ok(table)
    }

    /// Parse a settings document.
    ///
    /// Only the first `ComparisonGeneratorStates` element is read; its tag and
    /// the `name` attribute are matched case-insensitively. Every element nested
    /// inside it is an entry keyed by its `name` attribute. Entry text is not
    /// trimmed, so ` True ` is inactive.
    pub fn from_document(xml: &str) -> Result<Self, ActivationError> {
        let mut reader = Reader::from_str(xml);

        let mut parsed: Vec<(String, bool)> = Vec::new();
        let mut in_section = false;
        let mut found_section = false;
        // Open elements inside the section: (name attribute, collected text)
        let mut open: Vec<(Option<String>, String)> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) if !in_section => {
                    if is_section(&e) {
                        in_section = true;
                        found_section = true;
                    }
                }
                Event::Start(e) => {
                    open.push((name_attribute(&e)?, String::new()));
                }
                Event::Empty(e) if !in_section => {
                    if is_section(&e) {
                        found_section = true;
                        break;
                    }
                }
                Event::Empty(e) if in_section => match name_attribute(&e)? {
                    Some(name) => parsed.push((name, false)),
                    None => debug!("Skipping unnamed comparison generator"),
                },
                // Whitespace between entries lands here with nothing open
                Event::Text(t) if in_section => {
                    if let Some((_, text)) = open.last_mut() {
                        text.push_str(&t.unescape()?);
                    }
                }
                Event::End(_) if in_section => match open.pop() {
                    Some((Some(name), text)) => {
                        let active = parse_flag(&text);
                        parsed.push((name, active));
                    }
                    Some((None, _)) => debug!("Skipping unnamed comparison generator"),
                    // Closing the section itself
                    None => break,
                },
                Event::Eof => break,
                _ => {}
            }
        }

        if !found_section {
            warn!("No ComparisonGeneratorStates section found; only Personal Best is active");
        }

        Ok(Self::from_entries(parsed))
    }

    /// Whether a comparison is enabled. Unknown names are inactive.
    pub fn is_active(&self, comparison: &str) -> bool {
        comparison == PERSONAL_BEST || self.entries.get(comparison).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by comparison name.
    pub fn sorted(&self) -> Vec<(&str, bool)> {
        let mut entries: Vec<(&str, bool)> = self
            .entries
            .iter()
            .map(|(name, active)| (name.as_str(), *active))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Default for ActivationTable {
    fn default() -> Self {
        Self::from_entries(std::iter::empty::<(String, bool)>())
    }
}

/// Closed parse of LiveSplit's textual booleans. Anything unexpected is inactive.
pub fn parse_flag(text: &str) -> bool {
    match text {
        "True" => true,
        "False" => false,
        _ => false,
    }
}

fn is_section(e: &BytesStart<'_>) -> bool {
    e.name().as_ref().eq_ignore_ascii_case(SECTION_TAG)
}

fn name_attribute(e: &BytesStart<'_>) -> Result<Option<String>, quick_xml::Error> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref().eq_ignore_ascii_case(b"name") {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
