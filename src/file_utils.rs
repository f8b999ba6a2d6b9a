use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Turn an item title into a filesystem-safe base name.
    ///
    /// Spaces become underscores and colons are removed. The substitution is
    /// idempotent: sanitizing an already-sanitized title is a no-op.
    pub fn sanitize_title(title: &str) -> String {
        title.replace(' ', "_").replace(':', "")
    }

    // @generates: Output path for an extracted subtitle stream
    // @params: output_dir, sanitized base name, stream index, extension
    pub fn subtitle_output_path<P: AsRef<Path>>(
        output_dir: P,
        base: &str,
        stream_index: usize,
        extension: &str,
    ) -> PathBuf {
        output_dir
            .as_ref()
            .join(format!("{}_subtitle_{}.{}", base, stream_index, extension))
    }

}
