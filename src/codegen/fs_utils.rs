//! Filesystem utilities for code generation

use crate::error::GenerateError;
use std::fs;
use std::path::Path;

/// Write content to a file, creating parent directories if needed.
/// Existing files are overwritten.
pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    contents: C,
) -> Result<(), GenerateError> {
    let path = path.as_ref();
    let io_error = |source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    };

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    fs::write(path, contents).map_err(io_error)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}
