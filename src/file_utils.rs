use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

// @module: File utilities for scripts and catalogs

/// On-disk script representation, detected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    /// Line-oriented text DSL (`.txt` and anything unrecognized)
    Dsl,
    /// Structured JSON document (`.json`)
    Structured,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Read a whole file into a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read file: {}", path.as_ref().display()))
    }

    /// Write a string to a file, creating parent directories if needed
    pub fn write_string<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }
        fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write file: {}", path.as_ref().display()))
    }

    /// Detect the script format from the file extension.
    ///
    /// `.json` is the structured document; everything else is treated as
    /// the text DSL, which is what operators usually hand around as `.txt`.
    pub fn detect_script_format<P: AsRef<Path>>(path: P) -> ScriptFormat {
        match path.as_ref().extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ScriptFormat::Structured,
            _ => ScriptFormat::Dsl,
        }
    }
}
