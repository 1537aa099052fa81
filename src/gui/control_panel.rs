//! Control Panel Widget
//! Left side panel with the data source and the country / column selectors.

use crate::config::{self, PAGE_ICON};
use crate::data::Selection;
use egui::{Color32, RichText, ScrollArea};

/// Left side control panel with source and filter controls.
pub struct ControlPanel {
    pub selection: Selection,
    /// Country Registry names offered for selection.
    pub countries: Vec<String>,
    /// Columns of the loaded table.
    pub columns: Vec<String>,
    pub source_label: String,
    pub status: String,
    pub is_error: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        let countries = config::country_names();
        Self {
            // Every registry country is selected initially
            selection: Selection::new(countries.clone()),
            countries,
            columns: Vec::new(),
            source_label: String::new(),
            status: "Ready".to_string(),
            is_error: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update available columns after a load. Selected columns the new table
    /// lacks are dropped.
    pub fn update_columns(&mut self, columns: Vec<String>) {
        self.selection.retain_columns(&columns);
        self.columns = columns;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = false;
    }

    pub fn set_error(&mut self, error: &str) {
        self.status = format!("Error: {}", error);
        self.is_error = true;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, is_loading: bool) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new(format!("{} COVID-19 EDA", PAGE_ICON))
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Sub-Saharan Africa")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let label = if self.source_label.is_empty() {
                    "No data loaded"
                } else {
                    self.source_label.as_str()
                };
                ui.add(egui::Label::new(RichText::new(label).size(11.0)).truncate())
                    .on_hover_text(label);

                ui.add_space(4.0);
                ui.add_enabled_ui(!is_loading, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("🔄 Reload").clicked() {
                            action = ControlPanelAction::Reload;
                        }
                        if ui.button("📂 Open CSV").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Countries Section =====
        ui.label(RichText::new("🌍 Select Countries").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                for country in &self.countries {
                    let mut checked = self.selection.is_country_selected(country);
                    let response = ui.checkbox(&mut checked, country);
                    let response = match config::find_country(country) {
                        Some(c) => response.on_hover_text(format!("{:.4}, {:.4}", c.lat, c.lon)),
                        None => response,
                    };
                    if response.changed() {
                        self.selection.toggle_country(country);
                        action = ControlPanelAction::SelectionChanged;
                    }
                }
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selection.set_countries(&self.countries);
                action = ControlPanelAction::SelectionChanged;
            }
            if ui.small_button("Clear All").clicked() {
                self.selection.clear_countries();
                action = ControlPanelAction::SelectionChanged;
            }
        });
        if self.selection.countries().is_empty() {
            ui.label(
                RichText::new("No country selected: showing all rows")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Columns Section =====
        ui.label(RichText::new("🔧 Select Columns").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                if self.columns.is_empty() {
                    ui.label(RichText::new("Load a dataset first").color(Color32::GRAY));
                    return;
                }
                ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                    for col in &self.columns {
                        let mut checked = self.selection.is_column_selected(col);
                        if ui.checkbox(&mut checked, col).changed() {
                            self.selection.toggle_column(col);
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Clear All").clicked() {
                self.selection.clear_columns();
                action = ControlPanelAction::SelectionChanged;
            }
        });

        // Chart order follows selection order
        if !self.selection.columns().is_empty() {
            ui.add_space(5.0);
            ui.horizontal_wrapped(|ui| {
                for (i, col) in self.selection.columns().iter().enumerate() {
                    ui.label(
                        RichText::new(format!("{}. {}", i + 1, col))
                            .size(11.0)
                            .background_color(ui.visuals().faint_bg_color),
                    );
                }
            });
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            if is_loading {
                ui.spinner();
            }
            let status_color = if self.is_error {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Reload,
    BrowseCsv,
    SelectionChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_every_country_selected() {
        let panel = ControlPanel::new();
        assert_eq!(panel.selection.countries(), panel.countries.as_slice());
        assert!(panel.selection.columns().is_empty());
    }

    #[test]
    fn reload_drops_vanished_columns() {
        let mut panel = ControlPanel::new();
        panel.update_columns(vec!["Country".into(), "Status".into()]);
        panel.selection.toggle_column("Status");

        panel.update_columns(vec!["Country".into(), "Age".into()]);
        assert!(panel.selection.columns().is_empty());
        assert_eq!(panel.columns, vec!["Country", "Age"]);
    }

    #[test]
    fn error_status_is_flagged() {
        let mut panel = ControlPanel::new();
        panel.set_error("boom");
        assert!(panel.is_error);
        assert_eq!(panel.status, "Error: boom");

        panel.set_status("Loaded");
        assert!(!panel.is_error);
    }
}
