//! Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::{DataLoader, DataSource, TableView};
use crate::gui::{ChartViewer, ChartViewerAction, ControlPanel, ControlPanelAction};
use crate::pipeline;
use egui::SidePanel;
use polars::prelude::DataFrame;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info, warn};

/// CSV loading result from background thread
enum LoadResult {
    Complete { df: DataFrame, source: DataSource },
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            config,
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };
        let source = DataSource::Url(app.config.dataset_url.clone());
        app.start_load(source);
        app
    }

    /// Fetch and parse on a worker thread. One load at a time.
    fn start_load(&mut self, source: DataSource) {
        if self.is_loading {
            return; // Already loading
        }

        info!(source = %source, "loading dataset");
        self.chart_viewer.clear();
        self.control_panel.source_label = source.to_string();
        self.control_panel.set_status("Loading data...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let result = match DataLoader::load(&source) {
                Ok(df) => LoadResult::Complete { df, source },
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { df, source }) => {
                let columns: Vec<String> = df
                    .get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                let row_count = df.height();

                self.loader.set_dataframe(df, source);
                if let Some(preview) = self.loader.preview(self.config.preview_rows) {
                    self.chart_viewer
                        .set_preview(TableView::from_dataframe(&preview));
                }
                self.control_panel.update_columns(columns.clone());
                self.control_panel.set_status(&format!(
                    "Loaded {} rows, {} columns",
                    row_count,
                    columns.len()
                ));
                self.is_loading = false;
                self.run_pipeline();
            }
            Ok(LoadResult::Error(message)) => self.fail_load(message),
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                // Put receiver back, still loading
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.fail_load("loader thread exited".to_string());
            }
        }
    }

    /// Drop any loaded table and show `message` in both panels.
    fn fail_load(&mut self, message: String) {
        error!(error = %message, "dataset load failed");
        self.loader.clear();
        self.control_panel.update_columns(Vec::new());
        self.control_panel.set_error(&message);
        self.chart_viewer.set_load_error(message);
        self.is_loading = false;
    }

    /// Filter and aggregate from the loaded table and the current selection.
    fn run_pipeline(&mut self) {
        let Some(df) = self.loader.get_dataframe() else {
            return;
        };

        match pipeline::run(df, &self.control_panel.selection, &self.config.country_column) {
            Ok(output) => {
                let status = format!(
                    "{} rows selected, {} charts",
                    output.filtered.height(),
                    output.charts.len()
                );
                self.chart_viewer.set_output(output);
                self.control_panel.set_status(&status);
            }
            Err(e) => {
                error!(error = %e, "pipeline failed");
                self.chart_viewer.clear_output();
                self.control_panel.set_error(&e.to_string());
            }
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(DataSource::File(path));
        }
    }

    /// Reload the current source, or the configured URL when nothing loaded
    fn handle_reload(&mut self) {
        let source = self
            .loader
            .get_source()
            .cloned()
            .unwrap_or_else(|| DataSource::Url(self.config.dataset_url.clone()));
        self.start_load(source);
    }

    /// Export one chart as PNG to a user-chosen path
    fn handle_export_png(&mut self, index: usize) {
        let Some(chart) = self.chart_viewer.charts.get(index) else {
            return;
        };

        let file_name = format!("percentage_of_{}.png", chart.column.replace(' ', "_"));
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(&file_name)
            .save_file()
        else {
            return; // User cancelled
        };

        let (width, height) = self.config.chart_export_size;
        match StaticChartRenderer::save_png(chart, &path, width, height) {
            Ok(()) => {
                info!(path = %path.display(), column = %chart.column, "chart exported");
                let status = format!("Saved {}", path.display());
                self.control_panel.set_status(&status);
            }
            Err(e) => {
                warn!(error = %e, "chart export failed");
                self.control_panel.set_error(&e.to_string());
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, self.is_loading);

                    match action {
                        ControlPanelAction::Reload => self.handle_reload(),
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::SelectionChanged => self.run_pipeline(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            if let ChartViewerAction::ExportPng(index) = self.chart_viewer.show(ui, self.is_loading) {
                self.handle_export_png(index);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_app() -> DashboardApp {
        DashboardApp {
            config: DashboardConfig::default(),
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        }
    }

    fn pending_app() -> (DashboardApp, std::sync::mpsc::Sender<LoadResult>) {
        let mut app = idle_app();
        let (tx, rx) = channel();
        app.load_rx = Some(rx);
        app.is_loading = true;
        (app, tx)
    }

    #[test]
    fn load_error_reaches_chart_viewer() {
        let (mut app, tx) = pending_app();
        tx.send(LoadResult::Error("HTTP 404".to_string())).unwrap();

        app.check_load_results();
        assert!(!app.is_loading);
        assert_eq!(app.chart_viewer.load_error.as_deref(), Some("HTTP 404"));
        assert!(app.control_panel.is_error);
    }

    #[test]
    fn dead_loader_thread_reaches_chart_viewer() {
        let (mut app, tx) = pending_app();
        drop(tx);

        app.check_load_results();
        assert!(!app.is_loading);
        assert!(app.load_rx.is_none());
        assert_eq!(
            app.chart_viewer.load_error.as_deref(),
            Some("loader thread exited")
        );
        assert!(app.control_panel.is_error);
        assert!(app.loader.get_dataframe().is_none());
    }

    #[test]
    fn pending_load_keeps_waiting() {
        let (mut app, _tx) = pending_app();

        app.check_load_results();
        assert!(app.is_loading);
        assert!(app.load_rx.is_some());
        assert!(app.chart_viewer.load_error.is_none());
    }
}
