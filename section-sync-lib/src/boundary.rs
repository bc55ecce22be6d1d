//! Boundary pattern templates and the markers derived from them.

use crate::error::SyncError;
use regex::Regex;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The token that is replaced by a section key inside a boundary template.
pub const KEY_PLACEHOLDER: &str = "{key}";

/// The template used when no boundary is given on the command line.
pub const DEFAULT_BOUNDARY: &str = "<!-- UPDATE: {key} -->";

/// A boundary template such as `<!-- UPDATE: {key} -->`.
///
/// Substituting a literal key yields the exact marker text searched for in a
/// file. Substituting a capture group yields a regex that extracts keys from
/// any marker built from the same template. Only the first placeholder in the
/// template is substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryPattern {
    template: String,
}

impl BoundaryPattern {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns `true` if the template contains the `{key}` placeholder.
    pub fn has_placeholder(&self) -> bool {
        self.template.contains(KEY_PLACEHOLDER)
    }

    /// Builds the literal marker for `key`.
    pub fn marker(&self, key: &str) -> String {
        self.template.replacen(KEY_PLACEHOLDER, key, 1)
    }

    /// Compiles the key-extraction regex.
    ///
    /// Everything around the placeholder is matched literally; the placeholder
    /// itself becomes a non-greedy group that may be empty but never spans a
    /// line break.
    pub fn to_regex(&self) -> Result<Regex, SyncError> {
        let pattern = match self.template.split_once(KEY_PLACEHOLDER) {
            Some((before, after)) => format!(
                "{}(.*?){}",
                regex::escape(before),
                regex::escape(after)
            ),
            None => regex::escape(&self.template),
        };

        Regex::new(&pattern).map_err(|e| SyncError::InvalidBoundary(e.to_string()))
    }
}

impl Default for BoundaryPattern {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDARY)
    }
}

impl FromStr for BoundaryPattern {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for BoundaryPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// Splits `text` on `marker`, returning the segments only when the marker
/// occurs at least twice. Segment 1 is then the section body.
pub(crate) fn section_segments<'a>(text: &'a str, marker: &str) -> Option<Vec<&'a str>> {
    if marker.is_empty() {
        return None;
    }

    let segments: Vec<&str> = text.split(marker).collect();
    if segments.len() < 3 {
        return None;
    }

    Some(segments)
}
