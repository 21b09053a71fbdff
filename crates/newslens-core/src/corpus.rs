//! Loads a directory of `.txt` files as documents for offline analysis.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::Document;

/// Reads every `.txt` file under `dir` (recursively, sorted by path).
///
/// Each file becomes one [`Document`] titled by its file stem, with its path
/// as the url. Invalid UTF-8 is decoded lossily.
pub fn load_corpus(dir: &Path) -> Result<Vec<Document>> {
    if !dir.is_dir() {
        return Err(Error::Input(format!("'{}' is not a directory", dir.display())));
    }
    let files = list_txt_files(dir);
    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        documents.push(load_document(path)?);
    }
    info!(dir = %dir.display(), count = documents.len(), "loaded corpus");
    Ok(documents)
}

/// Reads a single text file as a [`Document`].
pub fn load_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path)
        .map_err(|e| Error::Input(format!("cannot read '{}': {}", path.display(), e)))?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    };
    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!(path = %path.display(), bytes = text.len(), "read document");
    Ok(Document::new(title, path.to_string_lossy(), text))
}

/// Whether two paths name the same file. Compares canonical paths, falling
/// back to the raw paths when either cannot be resolved.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn list_txt_files(root: &Path) -> Vec<PathBuf> {
    let mut txt_files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("txt"))
        .collect();
    txt_files.sort();
    txt_files
}
