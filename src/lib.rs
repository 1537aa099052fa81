//! COVID-19 EDA - CSV dashboard for Sub-Saharan Africa
//!
//! Loads a remote CSV, filters it by country and column, and draws one
//! percentage bar chart per selected column.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod pipeline;
pub mod stats;
