use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{CatalogError, Result};

/// Bare header names whose values travel Base64-encoded on the wire.
///
/// Names match exactly, as written in the list file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeFields {
    names: BTreeSet<String>,
}

impl EncodeFields {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Read a newline-delimited list; lines are trimmed and blanks ignored.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::io(path, source))?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
