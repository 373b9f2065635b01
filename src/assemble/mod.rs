//! Account folder assembly: read every dump, combine, extract.
//!
//! Sellers drop one or more `.txt` exports per account folder. The assembler
//! reads them in sorted name order, joins the contents with blank lines, and
//! hands the single blob to the extractor. Reading nothing at all is the one
//! fatal condition; a single unreadable file only loses its own fields.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::errors::{AlhError, Result};
use crate::extract::{self, AccountRecord};

/// Empty template file shipped alongside real dumps; never worth reading.
const TEMPLATE_FILE_NAME: &str = "info.txt";

/// Directory listing and file reads behind a seam so the pipeline can be
/// exercised without a real filesystem.
pub trait FileSource {
    /// File names directly inside `dir`, sorted ascending.
    fn list_files(&self, dir: &Path) -> Result<Vec<String>>;

    /// Full contents of `dir/name`.
    fn read_file(&self, dir: &Path, name: &str) -> Result<String>;
}

/// Production source backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileSource;

impl FileSource for FsFileSource {
    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let entries =
            fs::read_dir(dir).map_err(|error| AlhError::io(dir, error))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|error| AlhError::io(dir, error))?;
            let is_file = entry
                .file_type()
                .map_err(|error| AlhError::io(entry.path(), error))?
                .is_file();
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_file(&self, dir: &Path, name: &str) -> Result<String> {
        let path = dir.join(name);
        fs::read_to_string(&path).map_err(|error| AlhError::io(&path, error))
    }
}

fn is_account_dump(name: &str) -> bool {
    let lowered = name.to_lowercase();
    lowered.ends_with(".txt") && lowered != TEMPLATE_FILE_NAME
}

/// Combine the eligible dump files of one account folder into a single blob.
///
/// Returns `NoReadableContent` when every eligible file was missing, skipped,
/// or empty. Separator characters do not count as readable content.
pub fn combine_account_text<S: FileSource>(
    source: &S,
    dir: &Path,
    files: &[String],
) -> Result<String> {
    let mut combined = String::new();
    let mut chars_read = 0usize;

    for name in files.iter().filter(|name| is_account_dump(name)) {
        let content = match source.read_file(dir, name) {
            Ok(content) => content,
            Err(error) => {
                debug!(file = %name, %error, "skipping unreadable account file");
                continue;
            }
        };
        chars_read += content.chars().count();
        if !combined.is_empty() {
            combined.push_str("\n\n");
        }
        combined.push_str(&content);
    }

    if chars_read == 0 {
        return Err(AlhError::NoReadableContent {
            path: dir.to_path_buf(),
        });
    }
    Ok(combined)
}

/// Parse one account folder given an already-listed set of file names.
pub fn parse_account_data<S: FileSource>(
    source: &S,
    dir: &Path,
    files: &[String],
) -> Result<AccountRecord> {
    let combined = combine_account_text(source, dir, files)?;
    Ok(extract::extract_record(&combined))
}

/// List and parse one account folder in a single call.
pub fn parse_account_dir<S: FileSource>(source: &S, dir: &Path) -> Result<AccountRecord> {
    let files = source.list_files(dir)?;
    parse_account_data(source, dir, &files)
}
