//! Filter, aggregate and chart-data pipeline.
//! Rebuilt from the loaded table on every selection change.

use crate::data::{DataProcessor, ProcessorError, Selection};
use crate::stats::{ColumnDistribution, DistributionCalculator, DistributionError};
use polars::prelude::DataFrame;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Filter failed: {0}")]
    Filter(#[from] ProcessorError),
    #[error("Aggregation failed: {0}")]
    Distribution(#[from] DistributionError),
}

/// Result of one pass.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub filtered: DataFrame,
    /// One entry per selected column that has at least one value, in
    /// selection order.
    pub charts: Vec<ColumnDistribution>,
}

/// Filter the table, then compute a distribution per selected column.
///
/// Charts are skipped when no column is selected or no row survives the
/// filter.
pub fn run(
    df: &DataFrame,
    selection: &Selection,
    country_col: &str,
) -> Result<PipelineOutput, PipelineError> {
    let filtered = DataProcessor::apply(df, selection, country_col)?;

    let charts = if filtered.height() == 0 || selection.columns().is_empty() {
        Vec::new()
    } else {
        DistributionCalculator::compute_all_parallel(&filtered, selection.columns())?
            .into_iter()
            .filter(|dist| !dist.is_empty())
            .collect()
    };

    info!(
        countries = selection.countries().len(),
        columns = selection.columns().len(),
        rows = filtered.height(),
        charts = charts.len(),
        "pipeline run"
    );

    Ok(PipelineOutput { filtered, charts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn covid_rows() -> DataFrame {
        df![
            "Country" => ["Nigeria", "Nigeria", "Kenya"],
            "Status" => ["Confirmed", "Recovered", "Confirmed"],
        ]
        .unwrap()
    }

    #[test]
    fn nigeria_status_split() {
        let mut selection = Selection::new(vec!["Nigeria".to_string()]);
        selection.toggle_column("Status");

        let out = run(&covid_rows(), &selection, "Country").unwrap();
        assert_eq!(out.filtered.height(), 2);
        assert_eq!(out.charts.len(), 1);
        assert_eq!(out.charts[0].percentage_of("Confirmed"), Some(50.0));
        assert_eq!(out.charts[0].percentage_of("Recovered"), Some(50.0));
    }

    #[test]
    fn no_columns_means_no_charts() {
        let selection = Selection::new(vec!["Kenya".to_string()]);
        let out = run(&covid_rows(), &selection, "Country").unwrap();
        assert_eq!(out.filtered.height(), 1);
        assert_eq!(out.filtered.width(), 2);
        assert!(out.charts.is_empty());
    }

    #[test]
    fn empty_filter_result_means_no_charts() {
        let mut selection = Selection::new(vec!["Mozambique".to_string()]);
        selection.toggle_column("Status");
        let out = run(&covid_rows(), &selection, "Country").unwrap();
        assert_eq!(out.filtered.height(), 0);
        assert!(out.charts.is_empty());
    }

    #[test]
    fn all_null_column_chart_dropped() {
        let df = df![
            "Country" => ["Kenya", "Kenya"],
            "Status" => ["Confirmed", "Confirmed"],
            "Notes" => [None::<&str>, None],
        ]
        .unwrap();
        let mut selection = Selection::default();
        selection.toggle_column("Notes");
        selection.toggle_column("Status");

        let out = run(&df, &selection, "Country").unwrap();
        assert_eq!(out.charts.len(), 1);
        assert_eq!(out.charts[0].column, "Status");
    }
}
