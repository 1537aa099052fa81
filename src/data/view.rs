//! Display-ready table snapshot for the preview and filtered-data widgets.

use polars::prelude::*;

/// Headers plus stringified cells. Nulls are rendered as empty text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn from_dataframe(df: &DataFrame) -> Self {
        let headers = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let columns = df.get_columns();
        let rows = (0..df.height())
            .map(|i| columns.iter().map(|col| Self::cell_text(col, i)).collect())
            .collect();

        Self { headers, rows }
    }

    fn cell_text(col: &Column, row: usize) -> String {
        match col.get(row) {
            Ok(AnyValue::Null) | Err(_) => String::new(),
            Ok(AnyValue::String(s)) => s.to_string(),
            Ok(AnyValue::StringOwned(s)) => s.to_string(),
            Ok(value) => value.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
