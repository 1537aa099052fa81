//! Chart Viewer Widget
//! Central scrollable panel: dataset preview, filtered rows and one bar chart
//! card per selected column.

use crate::charts::ChartPlotter;
use crate::data::TableView;
use crate::pipeline::PipelineOutput;
use crate::stats::ColumnDistribution;
use egui::{Color32, RichText, ScrollArea};

const CHART_HEIGHT: f32 = 320.0;
const PREVIEW_HEIGHT: f32 = 140.0;
const FILTERED_HEIGHT: f32 = 300.0;

/// Everything drawn in the central panel.
#[derive(Default)]
pub struct ChartViewer {
    pub preview: Option<TableView>,
    pub filtered: Option<TableView>,
    pub charts: Vec<ColumnDistribution>,
    pub load_error: Option<String>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything, including the preview
    pub fn clear(&mut self) {
        self.preview = None;
        self.load_error = None;
        self.clear_output();
    }

    /// Clear pipeline output only
    pub fn clear_output(&mut self) {
        self.filtered = None;
        self.charts.clear();
    }

    pub fn set_preview(&mut self, preview: TableView) {
        self.load_error = None;
        self.preview = Some(preview);
    }

    pub fn set_load_error(&mut self, error: String) {
        self.clear();
        self.load_error = Some(error);
    }

    pub fn set_output(&mut self, output: PipelineOutput) {
        self.filtered = Some(TableView::from_dataframe(&output.filtered));
        self.charts = output.charts;
    }

    /// Draw the viewer. Returns the index of a chart whose export button was
    /// clicked.
    pub fn show(&mut self, ui: &mut egui::Ui, is_loading: bool) -> ChartViewerAction {
        let mut action = ChartViewerAction::None;

        ui.heading(RichText::new("Exploratory Data Analysis").size(26.0).strong());
        ui.add_space(8.0);

        // A failed load shows only the message
        if let Some(error) = &self.load_error {
            egui::Frame::none()
                .fill(Color32::from_rgb(255, 235, 238))
                .stroke(egui::Stroke::new(1.0, Color32::from_rgb(220, 53, 69)))
                .rounding(5.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(format!(
                            "An error occurred while loading the data: {}",
                            error
                        ))
                        .color(Color32::from_rgb(156, 0, 6)),
                    );
                });
            return action;
        }

        let Some(preview) = &self.preview else {
            ui.centered_and_justified(|ui| {
                let text = if is_loading { "Loading data..." } else { "No Data" };
                ui.label(RichText::new(text).size(20.0));
            });
            return action;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new("Dataset Preview:").size(18.0).strong());
                ui.add_space(4.0);
                crate::gui::DataTable::show(ui, "preview_table", preview, PREVIEW_HEIGHT);

                ui.add_space(15.0);

                if let Some(filtered) = &self.filtered {
                    ui.label(RichText::new("Filtered Data").size(16.0).strong());
                    ui.label(
                        RichText::new(format!(
                            "{} rows × {} columns",
                            filtered.row_count(),
                            filtered.headers.len()
                        ))
                        .size(11.0)
                        .color(Color32::GRAY),
                    );
                    ui.add_space(4.0);
                    crate::gui::DataTable::show(ui, "filtered_table", filtered, FILTERED_HEIGHT);
                }

                for (idx, chart) in self.charts.iter().enumerate() {
                    ui.add_space(15.0);
                    if Self::draw_chart_card(ui, chart) {
                        action = ChartViewerAction::ExportPng(idx);
                    }
                }
            });

        action
    }

    /// Draw a single chart card. Returns true when export was requested.
    fn draw_chart_card(ui: &mut egui::Ui, chart: &ColumnDistribution) -> bool {
        let mut export = false;

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(chart.title()).size(16.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("💾 Export PNG").clicked() {
                            export = true;
                        }
                    });
                });
                ui.label(
                    RichText::new(format!("{} values counted", chart.total))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(6.0);
                ChartPlotter::draw_percentage_bar_chart(ui, chart, CHART_HEIGHT);
            });

        export
    }
}

/// Actions triggered by the chart viewer
#[derive(Debug, Clone, PartialEq)]
pub enum ChartViewerAction {
    None,
    ExportPng(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn load_error_replaces_everything() {
        let mut viewer = ChartViewer::new();
        viewer.set_preview(TableView::default());
        viewer.charts.push(ColumnDistribution::empty("Status"));

        viewer.set_load_error("timed out".to_string());
        assert!(viewer.preview.is_none());
        assert!(viewer.charts.is_empty());
        assert_eq!(viewer.load_error.as_deref(), Some("timed out"));
    }

    #[test]
    fn output_replaces_previous_pass() {
        let mut viewer = ChartViewer::new();
        viewer.charts.push(ColumnDistribution::empty("Old"));

        let filtered = df!["Status" => ["Confirmed"]].unwrap();
        viewer.set_output(PipelineOutput {
            filtered,
            charts: Vec::new(),
        });
        assert!(viewer.charts.is_empty());
        assert_eq!(viewer.filtered.as_ref().map(|f| f.row_count()), Some(1));
    }
}
