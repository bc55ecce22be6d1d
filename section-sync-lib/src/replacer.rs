//! Contains the logic for overwriting sections of a target file with model content.

use crate::boundary::{section_segments, BoundaryPattern};
use crate::error::SyncError;
use crate::model::ModelMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder as TempFileBuilder;

/// The result of applying a model to a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// The rewritten text.
    pub content: String,
    /// Keys whose sections were overwritten, in the order they were applied.
    pub replaced: Vec<String>,
}

impl Replacement {
    pub fn changes(&self) -> usize {
        self.replaced.len()
    }
}

/// Overwrites every section of `text` that has a counterpart in `model`.
///
/// Keys are applied in model order against the text as rewritten so far. For
/// each key the text is split on its marker; when the marker occurs at least
/// twice, segment 1 is replaced and all segments are joined back together, so
/// any later occurrences of the marker survive untouched.
pub fn replace_sections(text: &str, model: &ModelMap, pattern: &BoundaryPattern) -> Replacement {
    let mut content = text.to_string();
    let mut replaced = Vec::new();

    for section in model {
        let marker = pattern.marker(&section.key);
        let Some(mut segments) = section_segments(&content, &marker) else {
            continue;
        };

        segments[1] = section.content.as_str();
        content = segments.join(&marker);

        log::debug!("Replaced section '{}'", section.key);
        replaced.push(section.key.clone());
    }

    Replacement { content, replaced }
}

/// A target file together with its computed replacement, ready to be written.
#[derive(Debug, Clone)]
pub struct TargetUpdate {
    pub path: PathBuf,
    pub original: String,
    pub replacement: Replacement,
}

impl TargetUpdate {
    /// Reads the target at `path` and applies `model` to it in memory.
    pub fn load(path: &Path, model: &ModelMap, pattern: &BoundaryPattern) -> Result<Self, SyncError> {
        let original = fs::read_to_string(path).map_err(|source| SyncError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let replacement = replace_sections(&original, model, pattern);

        Ok(Self {
            path: path.to_path_buf(),
            original,
            replacement,
        })
    }

    pub fn changes(&self) -> usize {
        self.replacement.changes()
    }

    pub fn updated(&self) -> &str {
        &self.replacement.content
    }

    /// Returns `true` if applying the model changed any text.
    pub fn is_modified(&self) -> bool {
        self.original != self.replacement.content
    }

    /// Writes the updated content over the target file.
    pub fn write(&self) -> Result<(), SyncError> {
        write_in_place(&self.path, self.updated())
    }
}

/// Applies `model` to the target file at `path`, rewriting it in place.
///
/// Returns the number of sections replaced. The file is rewritten even when
/// nothing matched.
pub fn replace_in_file(
    path: &Path,
    model: &ModelMap,
    pattern: &BoundaryPattern,
) -> Result<usize, SyncError> {
    let update = TargetUpdate::load(path, model, pattern)?;
    update.write()?;
    Ok(update.changes())
}

/// Replaces the file at `path` with `content` through a temporary file in the
/// same directory, keeping the original permissions.
///
/// Symlinks are resolved first so the file they point to is rewritten and the
/// link itself stays in place.
fn write_in_place(path: &Path, content: &str) -> Result<(), SyncError> {
    let write_error = |source: std::io::Error| SyncError::Write {
        path: path.to_path_buf(),
        source,
    };

    let resolved = fs::canonicalize(path).map_err(write_error)?;
    let parent_dir = resolved.parent().unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(&resolved).map_err(write_error)?.permissions();

    let mut temp_file = TempFileBuilder::new()
        .prefix(".section-sync-")
        .suffix(".tmp")
        .tempfile_in(parent_dir)
        .map_err(write_error)?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(write_error)?;
    temp_file
        .as_file()
        .set_permissions(permissions)
        .map_err(write_error)?;
    temp_file
        .persist(&resolved)
        .map_err(|e| write_error(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn model(content: &str) -> ModelMap {
        ModelMap::parse(content, &BoundaryPattern::default()).unwrap()
    }

    #[test]
    fn replaces_section_between_markers() {
        let model = model("A<!-- UPDATE: x -->old<!-- UPDATE: x -->B");
        let result = replace_sections(
            "1<!-- UPDATE: x -->REPLACE<!-- UPDATE: x -->2",
            &model,
            &BoundaryPattern::default(),
        );

        assert_eq!(result.content, "1<!-- UPDATE: x -->old<!-- UPDATE: x -->2");
        assert_eq!(result.replaced, vec!["x".to_string()]);
    }

    #[test]
    fn target_without_marker_is_untouched() {
        let model = model("<!-- UPDATE: x -->old<!-- UPDATE: x -->");
        let text = "nothing to see here\n";
        let result = replace_sections(text, &model, &BoundaryPattern::default());

        assert_eq!(result.content, text);
        assert_eq!(result.changes(), 0);
    }

    #[test]
    fn single_marker_in_target_is_skipped() {
        let model = model("<!-- UPDATE: x -->old<!-- UPDATE: x -->");
        let text = "before<!-- UPDATE: x -->after";
        let result = replace_sections(text, &model, &BoundaryPattern::default());

        assert_eq!(result.content, text);
        assert!(result.replaced.is_empty());
    }

    #[test]
    fn markers_beyond_first_pair_are_preserved() {
        let model = model("<!-- UPDATE: x -->new<!-- UPDATE: x -->");
        let result = replace_sections(
            "a<!-- UPDATE: x -->b<!-- UPDATE: x -->c<!-- UPDATE: x -->d",
            &model,
            &BoundaryPattern::default(),
        );

        assert_eq!(
            result.content,
            "a<!-- UPDATE: x -->new<!-- UPDATE: x -->c<!-- UPDATE: x -->d"
        );
        assert_eq!(result.changes(), 1);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let model = model(
            "<!-- UPDATE: a -->alpha<!-- UPDATE: a --><!-- UPDATE: b -->beta<!-- UPDATE: b -->",
        );
        let pattern = BoundaryPattern::default();
        let target = "# Doc\n<!-- UPDATE: b -->?<!-- UPDATE: b -->\n<!-- UPDATE: a -->?<!-- UPDATE: a -->\n";

        let once = replace_sections(target, &model, &pattern);
        let twice = replace_sections(&once.content, &model, &pattern);

        assert_eq!(once.content, twice.content);
        assert_eq!(once.replaced, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn custom_boundary_replacement() {
        let pattern = BoundaryPattern::new("[[{key}]]");
        let model = ModelMap::parse("[[x]]hello[[x]]", &pattern).unwrap();
        let result = replace_sections("foo[[x]]bar[[x]]baz", &model, &pattern);

        assert_eq!(result.content, "foo[[x]]hello[[x]]baz");
    }

    #[test]
    fn multiline_document() {
        let model = model(
            "<!-- UPDATE: usage -->\n```sh\nsection-sync model.md README.md\n```\n<!-- UPDATE: usage -->\n",
        );
        let target = "# Tool\n\n## Usage\n<!-- UPDATE: usage -->\nout of date\n<!-- UPDATE: usage -->\n\n## License\nMIT\n";
        let result = replace_sections(target, &model, &BoundaryPattern::default());

        assert_snapshot!(result.content, @r"
        # Tool

        ## Usage
        <!-- UPDATE: usage -->
        ```sh
        section-sync model.md README.md
        ```
        <!-- UPDATE: usage -->

        ## License
        MIT
        ");
    }
}
