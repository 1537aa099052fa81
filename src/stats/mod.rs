//! Stats module - Percentage distributions

mod distribution;

pub use distribution::{CategoryShare, ColumnDistribution, DistributionCalculator, DistributionError};
