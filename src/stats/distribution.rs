//! Distribution Calculator Module
//! Per-column value counts expressed as percentages of non-missing rows.

use polars::prelude::*;
use rayon::prelude::*;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum DistributionError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// One distinct value of a column and its share.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub label: String,
    pub count: usize,
    /// Share of non-missing rows, 0 to 100.
    pub percentage: f64,
}

/// Percentage distribution of a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDistribution {
    pub column: String,
    /// Non-missing rows counted.
    pub total: usize,
    /// Ordered by descending count, ties by first appearance.
    pub shares: Vec<CategoryShare>,
}

impl ColumnDistribution {
    pub fn empty(column: &str) -> Self {
        Self {
            column: column.to_string(),
            total: 0,
            shares: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Percentage for a label, if observed.
    pub fn percentage_of(&self, label: &str) -> Option<f64> {
        self.shares
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.percentage)
    }

    pub fn max_percentage(&self) -> f64 {
        self.shares
            .iter()
            .map(|s| s.percentage)
            .fold(0.0, f64::max)
    }

    /// Chart title shown above each bar chart.
    pub fn title(&self) -> String {
        format!("Percentage of {} by Category", self.column)
    }
}

/// Computes percentage distributions.
pub struct DistributionCalculator;

impl DistributionCalculator {
    /// Share of each distinct non-missing value of `column`.
    ///
    /// Missing values are excluded from the denominator. An empty table, an
    /// all-null column or an unknown column yields an empty distribution.
    pub fn percentage_distribution(
        df: &DataFrame,
        column: &str,
    ) -> Result<ColumnDistribution, DistributionError> {
        let Ok(series) = df.column(column) else {
            return Ok(ColumnDistribution::empty(column));
        };

        let as_text = series.cast(&DataType::String)?;
        let values = as_text.str()?;

        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in values.into_iter().flatten() {
            let count = counts.entry(value).or_insert(0);
            if *count == 0 {
                order.push(value);
            }
            *count += 1;
        }

        let total: usize = counts.values().sum();
        if total == 0 {
            return Ok(ColumnDistribution::empty(column));
        }

        let mut shares: Vec<CategoryShare> = order
            .into_iter()
            .map(|label| {
                let count = counts[label];
                CategoryShare {
                    label: label.to_string(),
                    count,
                    percentage: count as f64 * 100.0 / total as f64,
                }
            })
            .collect();
        // Stable sort keeps first-appearance order among equal counts
        shares.sort_by(|a, b| b.count.cmp(&a.count));

        debug!(column, total, categories = shares.len(), "distribution computed");

        Ok(ColumnDistribution {
            column: column.to_string(),
            total,
            shares,
        })
    }

    /// One distribution per column, in the order given. Columns are computed
    /// in parallel.
    pub fn compute_all_parallel(
        df: &DataFrame,
        columns: &[String],
    ) -> Result<Vec<ColumnDistribution>, DistributionError> {
        columns
            .par_iter()
            .map(|column| Self::percentage_distribution(df, column))
            .collect()
    }
}
