//! Index export
//!
//! The index is rendered fully in memory, written to a temp file beside the
//! destination, synced, and renamed into place. A failed run never leaves a
//! partial index behind.

use crate::error::{IndexError, Result};
use crate::types::SymbolIndex;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Render the index as pretty JSON with a trailing newline.
pub fn render_index(index: &SymbolIndex) -> Result<String> {
    let mut out = serde_json::to_string_pretty(index)?;
    out.push('\n');
    Ok(out)
}

/// Atomically write the index to `path`. Returns the number of bytes written.
pub fn write_index(index: &SymbolIndex, path: &Path) -> Result<usize> {
    let rendered = render_index(index)?;
    let output_err = |source: std::io::Error| IndexError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(output_err)?;

    let mut temp = NamedTempFile::new_in(dir).map_err(output_err)?;
    temp.write_all(rendered.as_bytes()).map_err(output_err)?;
    temp.as_file().sync_all().map_err(output_err)?;

    // NamedTempFile is created 0600.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(output_err)?;
    }
    temp.persist(path).map_err(|e| output_err(e.error))?;

    tracing::info!(
        output = %path.display(),
        symbols = index.len(),
        bytes = rendered.len(),
        "Wrote symbol index"
    );
    Ok(rendered.len())
}

/// Load a previously written index.
pub fn load_index(path: &Path) -> Result<SymbolIndex> {
    let content = std::fs::read_to_string(path).map_err(|e| IndexError::input(path, e))?;
    let index: SymbolIndex = serde_json::from_str(&content)?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> SymbolIndex {
        let mut index = SymbolIndex::new();
        index.insert_first("glBegin", "Drawing");
        index.insert_first("glEnd", "Drawing");
        index.entry_at_mut(0).unwrap().files.push("vertex.c".to_string());
        index
    }

    #[test]
    fn render_uses_two_space_indent_and_declaration_order() {
        let rendered = render_index(&sample()).unwrap();
        let expected = "{\n  \"glBegin\": {\n    \"category\": \"Drawing\",\n    \"files\": [\n      \"vertex.c\"\n    ]\n  },\n  \"glEnd\": {\n    \"category\": \"Drawing\",\n    \"files\": []\n  }\n}\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn empty_index_renders_as_empty_object() {
        assert_eq!(render_index(&SymbolIndex::new()).unwrap(), "{}\n");
    }

    #[test]
    fn write_replaces_existing_file_and_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("function_map.json");
        std::fs::write(&out, "stale").unwrap();

        write_index(&sample(), &out).unwrap();

        let loaded = load_index(&out).unwrap();
        assert_eq!(loaded, sample());
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path() != out)
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn write_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested/out/map.json");
        write_index(&sample(), &out).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn load_missing_index_is_input_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_index(&dir.path().join("none.json")).unwrap_err();
        assert!(matches!(err, IndexError::InputNotFound { .. }));
    }
}
