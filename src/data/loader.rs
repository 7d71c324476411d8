use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::{debug, info};

use super::model::{DataType, Judgement, JudgementRecord, Stage};
use crate::error::{DatasetError, Result};

/// Value written to the `labelled` column. The file only ever holds labelled
/// rows, so the column is informational and ignored on load.
const LABELLED_CELL: &str = "True";

// ---------------------------------------------------------------------------
// JudgementStore – the persisted table of judgements
// ---------------------------------------------------------------------------

/// CSV-backed persistence for labelled records.
///
/// File layout: a header row that is exactly the data type's column set
/// (see [`DataType::columns`], any order), then one row per labelled sample.
/// Saves are serialized through an internal lock.
#[derive(Debug)]
pub struct JudgementStore {
    path: PathBuf,
    data_type: DataType,
    save_lock: Mutex<()>,
}

impl JudgementStore {
    pub fn new(path: impl Into<PathBuf>, data_type: DataType) -> Self {
        Self {
            path: path.into(),
            data_type,
            save_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every judgement in the file.
    ///
    /// A missing file is a first run and yields no records. A header whose
    /// column set differs from the schema fails with [`DatasetError::Schema`].
    pub fn load(&self) -> Result<Vec<JudgementRecord>> {
        if !self.path.is_file() {
            debug!("no judgements file at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        check_schema(&self.path, self.data_type.columns(), &headers)?;

        let label_idx = self.column(&headers, "label")?;
        let by_idx = self.column(&headers, "labelled_by")?;
        let path_idx = self.column(&headers, "path")?;
        let stage_idx = self.column(&headers, "stage")?;
        let text_idx = if self.data_type.carries_text() {
            Some(self.column(&headers, "text")?)
        } else {
            None
        };

        let mut records = Vec::new();
        for (row_no, result) in reader.records().enumerate() {
            let row = result?;
            let cell = |idx: usize| row.get(idx).unwrap_or("");

            let stage: Stage = cell(stage_idx)
                .parse()
                .map_err(|reason| DatasetError::InvalidRecord { row: row_no + 1, reason })?;

            records.push(JudgementRecord {
                path: cell(path_idx).to_string(),
                judgement: Some(Judgement {
                    label: cell(label_idx).to_string(),
                    stage,
                    labelled_by: cell(by_idx).to_string(),
                }),
                text: text_idx.map(|idx| cell(idx).to_string()),
            });
        }

        info!("loaded {} judgements from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Write all labelled records, replacing the file.
    ///
    /// Unlabelled records are skipped. The parent directory is created when
    /// missing. Concurrent callers are serialized; the lock is released on
    /// every exit path, including write failures.
    pub fn save<'a, I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a JudgementRecord>,
    {
        let _guard = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let columns = self.data_type.columns();
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(columns)?;

        let mut written = 0;
        for record in records {
            let Some(judgement) = &record.judgement else {
                continue;
            };
            writer.write_record(columns.iter().map(|col| match *col {
                "label" => judgement.label.as_str(),
                "labelled_by" => judgement.labelled_by.as_str(),
                "path" => record.path.as_str(),
                "labelled" => LABELLED_CELL,
                "stage" => judgement.stage.as_str(),
                "text" => record.text.as_deref().unwrap_or(""),
                _ => "",
            }))?;
            written += 1;
        }
        writer.flush()?;

        debug!("saved {written} judgements to {}", self.path.display());
        Ok(written)
    }

    fn column(&self, headers: &[String], name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| schema_error(&self.path, self.data_type.columns(), headers))
    }
}

/// Order-insensitive comparison of the file header against the schema.
fn check_schema(path: &Path, expected: &[&str], found: &[String]) -> Result<()> {
    let mut want: Vec<&str> = expected.to_vec();
    let mut got: Vec<&str> = found.iter().map(String::as_str).collect();
    want.sort_unstable();
    got.sort_unstable();
    if want == got {
        Ok(())
    } else {
        Err(schema_error(path, expected, found))
    }
}

fn schema_error(path: &Path, expected: &[&str], found: &[String]) -> DatasetError {
    DatasetError::Schema {
        path: path.to_path_buf(),
        expected: expected.iter().map(|c| c.to_string()).collect(),
        found: found.to_vec(),
    }
}
