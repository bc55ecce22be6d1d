//! Reads the sections of a model file into an ordered key → content map.

use crate::boundary::{section_segments, BoundaryPattern};
use crate::error::SyncError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A single section extracted from the model file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub key: String,
    pub content: String,
}

/// Sections of the model file, in the order their keys were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelMap {
    sections: Vec<Section>,
}

impl ModelMap {
    /// Extracts every section delimited by `pattern` in `content`.
    ///
    /// Each distinct key is scanned for with the marker text of its last
    /// match; keys keep the position of their first match. A key whose marker
    /// occurs fewer than two times contributes no section.
    pub fn parse(content: &str, pattern: &BoundaryPattern) -> Result<Self, SyncError> {
        let regex = pattern.to_regex()?;
        log::debug!("Scanning model for boundaries matching /{}/", regex.as_str());

        let mut boundaries: Vec<(&str, &str)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for caps in regex.captures_iter(content) {
            let marker = caps.get(0).map_or("", |m| m.as_str());
            let key = caps.get(1).map_or("", |m| m.as_str());

            match positions.get(key) {
                Some(&index) => boundaries[index].1 = marker,
                None => {
                    positions.insert(key, boundaries.len());
                    boundaries.push((key, marker));
                }
            }
        }

        let mut sections = Vec::with_capacity(boundaries.len());
        for (key, marker) in boundaries {
            if marker.is_empty() {
                log::warn!("Ignoring empty boundary marker for key '{key}'");
                continue;
            }

            match section_segments(content, marker) {
                Some(segments) => {
                    log::debug!("Read section '{key}' ({} bytes)", segments[1].len());
                    sections.push(Section {
                        key: key.to_string(),
                        content: segments[1].to_string(),
                    });
                }
                None => {
                    log::warn!("Boundary '{marker}' occurs only once in the model; skipping");
                }
            }
        }

        Ok(Self { sections })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Looks up the content of the section named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|section| section.key == key)
            .map(|section| section.content.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

impl<'a> IntoIterator for &'a ModelMap {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// Reads the model file at `path` and extracts its sections.
pub fn read_model_file(path: &Path, pattern: &BoundaryPattern) -> Result<ModelMap, SyncError> {
    let content = fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let model = ModelMap::parse(&content, pattern)?;
    log::info!(
        "Read {} section(s) from model {}",
        model.len(),
        path.display()
    );
    Ok(model)
}
