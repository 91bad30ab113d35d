//! Loader module for the employee index ingest.
//!
//! Reads the employee CSV file and turns each valid row into an
//! `EmployeeRecord`.

mod cells;

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder};
use tracing::{debug, info, instrument, warn};

use crate::errors::IngestError;
use cells::{decode_latin1, ColumnKind};
use employee_index_shared::EmployeeRecord;

/// Default column holding the employee identifier.
pub const DEFAULT_ID_COLUMN: &str = "EEID";

/// Default unique key field of the collection schema.
pub const DEFAULT_UNIQUE_KEY: &str = "id";

/// Configuration for the CSV loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Column holding the employee identifier.
    pub id_column: String,
    /// Unique key field of the collection. Filled from its own column when
    /// the file has one, otherwise from `id_column`.
    pub unique_key: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            id_column: DEFAULT_ID_COLUMN.to_string(),
            unique_key: DEFAULT_UNIQUE_KEY.to_string(),
        }
    }
}

/// Why a row was left out of the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The row has more fields than the header.
    TooManyFields { expected: usize, found: usize },
    /// The CSV reader could not parse the row.
    Unreadable(String),
    /// The identifier cell is empty.
    MissingId,
    /// The identifier was already used by an earlier row.
    DuplicateId(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TooManyFields { expected, found } => {
                write!(f, "expected {} fields, saw {}", expected, found)
            }
            SkipReason::Unreadable(msg) => write!(f, "unreadable row: {}", msg),
            SkipReason::MissingId => f.write_str("missing identifier"),
            SkipReason::DuplicateId(id) => write!(f, "duplicate identifier '{}'", id),
        }
    }
}

/// A row that was skipped, with its 1-based line number when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: Option<u64>,
    pub reason: SkipReason,
}

/// The outcome of loading the dataset.
#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    /// Header names, including the excluded column.
    pub columns: Vec<String>,
    /// The column that was dropped, if it was present.
    pub excluded_column: Option<String>,
    /// One record per valid row.
    pub records: Vec<EmployeeRecord>,
    /// Rows left out of `records`.
    pub skipped: Vec<SkippedRow>,
}

/// Loads employee rows from a CSV file.
///
/// The file is opened, read and closed within a single [`load`](Self::load)
/// call; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    path: PathBuf,
    config: LoaderConfig,
}

impl CsvLoader {
    /// Create a loader for the file at `path` with default configuration.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(path: impl Into<PathBuf>, config: LoaderConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read the file, dropping `exclude_column` if it is one of the headers.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self, exclude_column: Option<&str>) -> Result<LoadedDataset, IngestError> {
        let file = File::open(&self.path)?;
        self.load_from_reader(file, exclude_column)
    }

    /// Same as [`load`](Self::load), reading from any byte source.
    pub fn load_from_reader<R: Read>(
        &self,
        reader: R,
        exclude_column: Option<&str>,
    ) -> Result<LoadedDataset, IngestError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .byte_headers()?
            .iter()
            .map(decode_latin1)
            .collect();
        if columns.is_empty() {
            return Err(IngestError::MissingHeader);
        }

        let id_index = columns
            .iter()
            .position(|c| *c == self.config.id_column)
            .ok_or_else(|| IngestError::MissingIdColumn(self.config.id_column.clone()))?;

        let excluded_index =
            exclude_column.and_then(|name| columns.iter().position(|c| c == name));
        match (exclude_column, excluded_index) {
            (Some(name), None) => debug!(column = %name, "Excluded column not present"),
            (Some(name), Some(_)) => debug!(column = %name, "Dropping column"),
            _ => {}
        }

        let key_index = columns
            .iter()
            .position(|c| *c == self.config.unique_key)
            .filter(|&index| Some(index) != excluded_index);

        let mut dataset = LoadedDataset {
            columns,
            excluded_column: excluded_index.and(exclude_column).map(str::to_string),
            records: Vec::new(),
            skipped: Vec::new(),
        };
        let mut rows = Vec::new();
        let mut seen_keys = HashSet::new();

        for result in csv_reader.byte_records() {
            let row = match result {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    let line = e.position().map(|p| p.line());
                    dataset.skip(line, SkipReason::Unreadable(e.to_string()));
                    continue;
                }
            };
            let line = row.position().map(|p| p.line());

            if row.len() > dataset.columns.len() {
                dataset.skip(
                    line,
                    SkipReason::TooManyFields {
                        expected: dataset.columns.len(),
                        found: row.len(),
                    },
                );
                continue;
            }

            let row = PendingRow::decode(&row, key_index, id_index);
            if row.key.is_empty() {
                dataset.skip(line, SkipReason::MissingId);
                continue;
            }
            if !seen_keys.insert(row.key.clone()) {
                dataset.skip(line, SkipReason::DuplicateId(row.key));
                continue;
            }
            rows.push(row);
        }

        let kinds: Vec<ColumnKind> = (0..dataset.columns.len())
            .map(|index| {
                ColumnKind::infer(
                    rows.iter()
                        .filter_map(|row| row.cells.get(index))
                        .flatten()
                        .map(String::as_str),
                )
            })
            .collect();
        debug!(kinds = ?kinds, "Inferred column types");

        dataset.records = rows
            .into_iter()
            .map(|row| self.build_record(&dataset.columns, &kinds, row, excluded_index))
            .collect();

        info!(
            records = dataset.records.len(),
            skipped = dataset.skipped.len(),
            excluded = ?dataset.excluded_column,
            "Loaded employee dataset"
        );

        Ok(dataset)
    }

    /// Shape one row into a record. Short rows leave their trailing fields
    /// unset; the unique key is always present and always text.
    fn build_record(
        &self,
        columns: &[String],
        kinds: &[ColumnKind],
        row: PendingRow,
        excluded_index: Option<usize>,
    ) -> EmployeeRecord {
        let mut record = EmployeeRecord::new();

        let fields = columns.iter().zip(kinds).zip(row.cells).enumerate();
        for (index, ((column, kind), cell)) in fields {
            if Some(index) == excluded_index {
                continue;
            }
            if let Some(cell) = cell {
                record.insert(column.clone(), kind.value(&cell));
            }
        }

        record.insert(self.config.unique_key.clone(), row.key);
        record
    }
}

/// A decoded row waiting for its column types.
struct PendingRow {
    /// Value of the unique key, taken from its own column when the file has
    /// one and the cell is filled, otherwise from the identifier column.
    key: String,
    /// `None` for empty cells.
    cells: Vec<Option<String>>,
}

impl PendingRow {
    fn decode(row: &ByteRecord, key_index: Option<usize>, id_index: usize) -> Self {
        let cells: Vec<Option<String>> = row
            .iter()
            .map(|cell| (!cell.is_empty()).then(|| decode_latin1(cell)))
            .collect();
        let cell = |index: usize| cells.get(index).cloned().flatten();
        let key = key_index
            .and_then(cell)
            .or_else(|| cell(id_index))
            .unwrap_or_default();

        Self { key, cells }
    }
}

impl LoadedDataset {
    fn skip(&mut self, line: Option<u64>, reason: SkipReason) {
        warn!(line = ?line, reason = %reason, "Skipping row");
        self.skipped.push(SkippedRow { line, reason });
    }
}
