//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};

/// Plotly's default qualitative sequence, as RGB.
pub const CATEGORY_RGB: [(u8, u8, u8); 10] = [
    (99, 110, 250),  // #636EFA
    (239, 85, 59),   // #EF553B
    (0, 204, 150),   // #00CC96
    (171, 99, 250),  // #AB63FA
    (255, 161, 90),  // #FFA15A
    (25, 211, 243),  // #19D3F3
    (255, 102, 146), // #FF6692
    (182, 232, 128), // #B6E880
    (255, 151, 255), // #FF97FF
    (254, 203, 82),  // #FECB52
];

/// Color for the `index`-th category, cycling through the palette.
pub fn category_rgb(index: usize) -> (u8, u8, u8) {
    CATEGORY_RGB[index % CATEGORY_RGB.len()]
}

/// Bar annotation, rounded to a whole percent. Halves round up.
pub fn percent_label(percentage: f64) -> String {
    format!("{:.0}%", percentage.round())
}

/// Upper bound of the y axis: headroom above the tallest bar for its label,
/// never past 100 unless the bar itself is.
pub fn y_axis_ceiling(max_percentage: f64) -> f64 {
    if max_percentage <= 0.0 {
        return 100.0;
    }
    (max_percentage * 1.15).min(105.0).max(max_percentage + 5.0)
}
