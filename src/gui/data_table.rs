//! Data Table Widget
//! Scrollable grid for the dataset preview and the filtered rows.

use crate::data::TableView;
use egui::{RichText, ScrollArea};

const ROW_HEIGHT: f32 = 20.0;
const INDEX_WIDTH: f32 = 48.0;
const MIN_COL_WIDTH: f32 = 70.0;
const MAX_COL_WIDTH: f32 = 220.0;
/// Rough width of one character at the table font size.
const CHAR_WIDTH: f32 = 7.5;

pub struct DataTable;

impl DataTable {
    /// Draw `view` with a row index column. Only visible rows are laid out.
    pub fn show(ui: &mut egui::Ui, id: &str, view: &TableView, max_height: f32) {
        if view.headers.is_empty() {
            ui.label(RichText::new("No columns").color(egui::Color32::GRAY));
            return;
        }

        let widths = Self::column_widths(view);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(6.0)
            .show(ui, |ui| {
                ScrollArea::horizontal().id_salt(id).show(ui, |ui| {
                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            ui.add_sized([INDEX_WIDTH, ROW_HEIGHT], egui::Label::new(""));
                            for (header, width) in view.headers.iter().zip(&widths) {
                                ui.add_sized(
                                    [*width, ROW_HEIGHT],
                                    egui::Label::new(RichText::new(header).strong()).truncate(),
                                );
                            }
                        });
                        ui.separator();

                        if view.is_empty() {
                            ui.label(RichText::new("Empty table").color(egui::Color32::GRAY));
                            return;
                        }

                        ScrollArea::vertical()
                            .id_salt(format!("{}_rows", id))
                            .max_height(max_height)
                            .auto_shrink([false, true])
                            .show_rows(ui, ROW_HEIGHT, view.row_count(), |ui, row_range| {
                                for i in row_range {
                                    ui.horizontal(|ui| {
                                        ui.add_sized(
                                            [INDEX_WIDTH, ROW_HEIGHT],
                                            egui::Label::new(
                                                RichText::new(i.to_string())
                                                    .color(egui::Color32::GRAY),
                                            ),
                                        );
                                        for (cell, width) in view.rows[i].iter().zip(&widths) {
                                            ui.add_sized(
                                                [*width, ROW_HEIGHT],
                                                egui::Label::new(cell).truncate(),
                                            );
                                        }
                                    });
                                }
                            });
                    });
                });
            });
    }

    /// Width per column from its longest header or cell among the first rows.
    fn column_widths(view: &TableView) -> Vec<f32> {
        view.headers
            .iter()
            .enumerate()
            .map(|(c, header)| {
                let longest = view
                    .rows
                    .iter()
                    .take(200)
                    .filter_map(|row| row.get(c))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0);
                (longest as f32 * CHAR_WIDTH + 12.0).clamp(MIN_COL_WIDTH, MAX_COL_WIDTH)
            })
            .collect()
    }
}
