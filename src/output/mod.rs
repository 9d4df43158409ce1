use crate::error::OutputError;
use crate::report::Document;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write the rendered report into `dir`, replacing any previous export of the
/// same subject and cycle
pub fn write_document(dir: &Path, document: &Document) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir).map_err(OutputError::CreateDir)?;

    let path = dir.join(&document.file_name);
    fs::write(&path, &document.markdown).map_err(|source| OutputError::WriteReport {
        path: path.clone(),
        source,
    })?;
    debug!("wrote {} bytes to {}", document.markdown.len(), path.display());

    Ok(path)
}
