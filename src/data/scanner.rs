use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use log::{debug, info};

use super::model::{DataType, JudgementRecord};
use crate::error::{DatasetError, Result};

/// Glob options for the per-extension patterns: case-sensitive, no
/// descending into subdirectories, dotfiles skipped.
const SCAN_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Finds candidate samples for a dataset: files directly inside `directory`
/// matching one of the data type's patterns (`*.txt`, or `*.jpg` and
/// `*.png`).
#[derive(Debug, Clone)]
pub struct UnlabelledScanner {
    directory: PathBuf,
    data_type: DataType,
}

impl UnlabelledScanner {
    pub fn new(directory: impl Into<PathBuf>, data_type: DataType) -> Self {
        Self {
            directory: directory.into(),
            data_type,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Glob patterns searched by [`discover`](Self::discover). The directory
    /// part is escaped, so brackets or `*` in a directory name match literally.
    pub fn patterns(&self) -> Vec<String> {
        let directory = Pattern::escape(&self.directory.to_string_lossy());
        self.data_type
            .extensions()
            .iter()
            .map(|ext| {
                Path::new(&directory)
                    .join(format!("*.{ext}"))
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    /// All matching paths, sorted. Fails with
    /// [`DatasetError::EmptyDirectory`] when nothing matches, including when
    /// the directory does not exist.
    pub fn discover(&self) -> Result<Vec<String>> {
        let mut paths = Vec::new();
        for pattern in self.patterns() {
            for entry in glob::glob_with(&pattern, SCAN_OPTIONS)? {
                let path = entry.map_err(glob::GlobError::into_error)?;
                if path.is_file() {
                    paths.push(path.to_string_lossy().into_owned());
                }
            }
        }

        if paths.is_empty() {
            return Err(DatasetError::EmptyDirectory {
                directory: self.directory.clone(),
                patterns: self
                    .data_type
                    .extensions()
                    .iter()
                    .map(|e| format!("*.{e}"))
                    .collect::<Vec<_>>()
                    .join(" or "),
            });
        }

        paths.sort();
        paths.dedup();
        Ok(paths)
    }

    /// Unlabelled records for every discovered path that `is_known` rejects.
    ///
    /// Text contents are read here, only for the new paths. Every text file
    /// of the pool ends up in memory, which bounds this to small corpora.
    pub fn scan_new<F>(&self, is_known: F) -> Result<Vec<JudgementRecord>>
    where
        F: Fn(&str) -> bool,
    {
        let found = self.discover()?;
        let total = found.len();

        let mut records = Vec::new();
        for path in found.into_iter().filter(|p| !is_known(p)) {
            let mut record = JudgementRecord::unlabelled(path);
            if self.data_type.carries_text() {
                record.text = Some(read_text(&record.path)?);
            }
            records.push(record);
        }

        info!(
            "scanned {}: {total} files, {} new",
            self.directory.display(),
            records.len()
        );
        Ok(records)
    }
}

/// Invalid UTF-8 is replaced rather than rejected.
fn read_text(path: &str) -> Result<String> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            debug!("{path} is not valid UTF-8, decoding lossily");
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}
