//! Chart Plotter Module
//! Interactive percentage bar charts using egui_plot.

use crate::charts::{category_rgb, percent_label, y_axis_ceiling};
use crate::stats::ColumnDistribution;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, GridMark, Plot, PlotPoint, Text};

/// Draws percentage distributions.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the `index`-th category of a chart.
    pub fn category_color(index: usize) -> Color32 {
        let (r, g, b) = category_rgb(index);
        Color32::from_rgb(r, g, b)
    }

    /// Draw a bar chart for one column.
    /// X-axis: distinct values, Y-axis: percentage of non-missing rows
    pub fn draw_percentage_bar_chart(ui: &mut egui::Ui, dist: &ColumnDistribution, height: f32) {
        let labels: Vec<String> = dist.shares.iter().map(|s| s.label.clone()).collect();
        let n = labels.len();
        let y_max = y_axis_ceiling(dist.max_percentage());

        Plot::new(format!("bar_{}", dist.column))
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show_grid([false, true])
            .include_x(-0.5)
            .include_x(n as f64 - 0.5)
            .include_y(0.0)
            .include_y(y_max)
            // One tick per category
            .x_grid_spacer(move |_input| {
                (0..n)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .y_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .label_formatter(|name, value| {
                if name.is_empty() {
                    String::new()
                } else {
                    format!("{}\n{:.1}%", name, value.y)
                }
            })
            .show(ui, |plot_ui| {
                for (i, share) in dist.shares.iter().enumerate() {
                    let color = Self::category_color(i);

                    let bar = Bar::new(i as f64, share.percentage)
                        .width(0.7)
                        .fill(color)
                        .name(&share.label);
                    plot_ui.bar_chart(BarChart::new(vec![bar]).color(color).name(&share.label));

                    // Label sits just above the bar
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(i as f64, share.percentage),
                            RichText::new(percent_label(share.percentage)).size(12.0),
                        )
                        .anchor(egui::Align2::CENTER_BOTTOM),
                    );
                }
            });
    }
}
