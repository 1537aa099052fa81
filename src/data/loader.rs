//! CSV Data Loader Module
//! Fetches the dataset over HTTP (or from a local file) and parses it with Polars.

use polars::prelude::*;
use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Rows scanned to infer column types.
const INFER_SCHEMA_ROWS: usize = 10_000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to fetch CSV: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Failed to read CSV file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] PolarsError),
    #[error("CSV source is empty")]
    EmptyBody,
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Holds the table loaded for the current session.
pub struct DataLoader {
    df: Option<DataFrame>,
    source: Option<DataSource>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            source: None,
        }
    }

    /// Fetch and parse a CSV over HTTP(S). Single attempt, no retries.
    pub fn load_url(url: &str) -> Result<DataFrame, LoaderError> {
        debug!(url, "fetching dataset");
        let response = reqwest::blocking::get(url)?.error_for_status()?;
        let body = response.bytes()?;
        let df = Self::parse_csv(body.to_vec())?;
        info!(url, rows = df.height(), columns = df.width(), "dataset loaded");
        Ok(df)
    }

    /// Read and parse a local CSV file.
    pub fn load_file(path: &std::path::Path) -> Result<DataFrame, LoaderError> {
        let bytes = fs::read(path)?;
        let df = Self::parse_csv(bytes)?;
        info!(path = %path.display(), rows = df.height(), columns = df.width(), "dataset loaded");
        Ok(df)
    }

    /// Load from either kind of source.
    pub fn load(source: &DataSource) -> Result<DataFrame, LoaderError> {
        match source {
            DataSource::Url(url) => Self::load_url(url),
            DataSource::File(path) => Self::load_file(path),
        }
    }

    /// Parse CSV bytes with a header row. Malformed input is an error, never a
    /// partially filled table.
    pub fn parse_csv(bytes: Vec<u8>) -> Result<DataFrame, LoaderError> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(LoaderError::EmptyBody);
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        Ok(df)
    }

    /// Replace the session table.
    pub fn set_dataframe(&mut self, df: DataFrame, source: DataSource) {
        self.df = Some(df);
        self.source = Some(source);
    }

    /// Drop the session table, e.g. after a failed reload.
    pub fn clear(&mut self) {
        self.df = None;
    }

    /// Get list of column names in source order.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    pub fn get_source(&self) -> Option<&DataSource> {
        self.source.as_ref()
    }

    /// First `n` rows of the loaded table.
    pub fn preview(&self, n: usize) -> Option<DataFrame> {
        self.df.as_ref().map(|df| df.head(Some(n)))
    }
}
