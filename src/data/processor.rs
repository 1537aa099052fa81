//! Data Processor Module
//! Row filtering by country and column projection.

use crate::data::Selection;
use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Handles the filter stage. Every operation returns a new DataFrame and
/// leaves its input untouched.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep rows whose country cell is one of `selected_countries`.
    ///
    /// An empty selection means no restriction. A table without the country
    /// column is passed through unfiltered.
    pub fn filter_rows(
        df: &DataFrame,
        country_col: &str,
        selected_countries: &[String],
    ) -> Result<DataFrame, ProcessorError> {
        if selected_countries.is_empty() {
            return Ok(df.clone());
        }

        let Ok(country) = df.column(country_col) else {
            warn!(
                column = country_col,
                "country column not found, rows left unfiltered"
            );
            return Ok(df.clone());
        };

        let wanted: HashSet<&str> = selected_countries.iter().map(String::as_str).collect();
        let as_text = country.cast(&DataType::String)?;
        let mask: BooleanChunked = as_text
            .str()?
            .into_iter()
            .map(|value| value.is_some_and(|v| wanted.contains(v)))
            .collect();

        Ok(df.filter(&mask)?)
    }

    /// Project to `selected_columns` in the given order.
    ///
    /// An empty selection keeps every column. Unknown or repeated names are
    /// skipped.
    pub fn filter_columns(
        df: &DataFrame,
        selected_columns: &[String],
    ) -> Result<DataFrame, ProcessorError> {
        if selected_columns.is_empty() {
            return Ok(df.clone());
        }

        let mut seen = HashSet::new();
        let mut present: Vec<&str> = Vec::with_capacity(selected_columns.len());
        for name in selected_columns {
            if df.get_column_index(name).is_none() {
                warn!(column = %name, "selected column not in table, skipped");
                continue;
            }
            if seen.insert(name.as_str()) {
                present.push(name.as_str());
            }
        }

        Ok(df.select(present)?)
    }

    /// Row filter, then column filter.
    pub fn apply(
        df: &DataFrame,
        selection: &Selection,
        country_col: &str,
    ) -> Result<DataFrame, ProcessorError> {
        let rows = Self::filter_rows(df, country_col, selection.countries())?;
        Self::filter_columns(&rows, selection.columns())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn sample() -> DataFrame {
        df![
            "Country" => ["Nigeria", "Nigeria", "Kenya", "Mozambique"],
            "Status" => ["Confirmed", "Recovered", "Confirmed", "Deceased"],
            "Age" => [34, 51, 27, 60],
        ]
        .unwrap()
    }

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn countries(df: &DataFrame) -> Vec<String> {
        df.column("Country")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn empty_country_selection_keeps_all_rows() {
        let df = sample();
        let out = DataProcessor::filter_rows(&df, "Country", &[]).unwrap();
        assert!(out.equals(&df));
    }

    #[test]
    fn rows_restricted_to_selected_countries() {
        let df = sample();
        let selected = vec!["Kenya".to_string(), "Nigeria".to_string(), "Ghana".to_string()];
        let out = DataProcessor::filter_rows(&df, "Country", &selected).unwrap();

        assert_eq!(out.height(), 3);
        let kept = countries(&out);
        assert!(kept.iter().all(|c| selected.contains(c)));
        assert!(kept.contains(&"Kenya".to_string()));
        assert!(kept.contains(&"Nigeria".to_string()));
        // input untouched
        assert_eq!(df.height(), 4);
    }

    #[test]
    fn match_is_exact() {
        let df = sample();
        let out = DataProcessor::filter_rows(&df, "Country", &["nigeria".to_string()]).unwrap();
        assert_eq!(out.height(), 0);
    }

    #[test]
    fn null_country_never_matches() {
        let df = df![
            "Country" => [Some("Kenya"), None],
            "Status" => ["Confirmed", "Confirmed"],
        ]
        .unwrap();
        let out = DataProcessor::filter_rows(&df, "Country", &["Kenya".to_string()]).unwrap();
        assert_eq!(out.height(), 1);
    }

    #[test]
    fn missing_country_column_passes_through() {
        let df = df!["Status" => ["Confirmed", "Recovered"]].unwrap();
        let out = DataProcessor::filter_rows(&df, "Country", &["Kenya".to_string()]).unwrap();
        assert!(out.equals(&df));
    }

    #[test]
    fn empty_column_selection_keeps_source_order() {
        let out = DataProcessor::filter_columns(&sample(), &[]).unwrap();
        assert_eq!(names(&out), vec!["Country", "Status", "Age"]);
    }

    #[test]
    fn columns_follow_selection_order() {
        let selected = vec!["Age".to_string(), "Country".to_string()];
        let out = DataProcessor::filter_columns(&sample(), &selected).unwrap();
        assert_eq!(names(&out), vec!["Age", "Country"]);
        assert_eq!(out.height(), 4);
    }

    #[test]
    fn unknown_and_repeated_columns_skipped() {
        let selected = vec!["Status".to_string(), "Deaths".to_string(), "Status".to_string()];
        let out = DataProcessor::filter_columns(&sample(), &selected).unwrap();
        assert_eq!(names(&out), vec!["Status"]);
    }

    #[test]
    fn apply_filters_rows_before_columns() {
        let mut selection = Selection::new(vec!["Kenya".to_string()]);
        selection.toggle_column("Status");
        let out = DataProcessor::apply(&sample(), &selection, "Country").unwrap();

        // Country is projected away but still drove the row filter
        assert_eq!(names(&out), vec!["Status"]);
        assert_eq!(out.height(), 1);
    }
}
