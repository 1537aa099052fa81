//! Static Chart Renderer
//! Draws a percentage bar chart to an in-memory PNG for export.
//!
//! Layout:
//! 1. Title: "Percentage of {column} by Category" centered
//! 2. One colored bar per category, labeled with its rounded percentage
//! 3. Category names along the x-axis

use crate::charts::{category_rgb, percent_label, y_axis_ceiling};
use crate::stats::ColumnDistribution;
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to render for column {0}")]
    EmptyDistribution(String),
    #[error("Invalid image size {0}x{1}")]
    InvalidSize(u32, u32),
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Largest accepted width or height of an exported image, in pixels.
pub const MAX_EXPORT_DIMENSION: u32 = 8192;

/// RGB buffer length for a `width` x `height` image.
fn pixel_buffer_len(width: u32, height: u32) -> Result<usize, RenderError> {
    let in_range = |side: u32| (1..=MAX_EXPORT_DIMENSION).contains(&side);
    if !in_range(width) || !in_range(height) {
        return Err(RenderError::InvalidSize(width, height));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or(RenderError::InvalidSize(width, height))
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart and return PNG bytes.
    pub fn render_png(
        dist: &ColumnDistribution,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        if dist.is_empty() {
            return Err(RenderError::EmptyDistribution(dist.column.clone()));
        }

        let mut buffer = vec![0u8; pixel_buffer_len(width, height)?];
        Self::draw(dist, &mut buffer, width, height)?;

        let img = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::Draw("pixel buffer size mismatch".to_string()))?;
        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, ImageFormat::Png)?;
        Ok(png.into_inner())
    }

    /// Render and write to `path`.
    pub fn save_png(
        dist: &ColumnDistribution,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let bytes = Self::render_png(dist, width, height)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn draw(
        dist: &ColumnDistribution,
        buffer: &mut [u8],
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let n = dist.shares.len() as u32;
        let y_max = y_axis_ceiling(dist.max_percentage());
        let labels: Vec<String> = dist.shares.iter().map(|s| s.label.clone()).collect();

        let root = BitMapBackend::with_buffer(buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(dist.title(), ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0u32..n).into_segmented(), 0f64..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_label_formatter(&|v| format!("{:.0}", v))
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style_func(|x, _| {
                        let idx = match x {
                            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => *i as usize,
                            SegmentValue::Last => 0,
                        };
                        let (r, g, b) = category_rgb(idx);
                        RGBColor(r, g, b).filled()
                    })
                    .margin(12)
                    .data(
                        dist.shares
                            .iter()
                            .enumerate()
                            .map(|(i, share)| (i as u32, share.percentage)),
                    ),
            )
            .map_err(draw_err)?;

        let label_style = TextStyle::from(("sans-serif", 16).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(dist.shares.iter().enumerate().map(|(i, share)| {
                Text::new(
                    percent_label(share.percentage),
                    (SegmentValue::CenterOf(i as u32), share.percentage),
                    label_style.clone(),
                )
            }))
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::CategoryShare;

    #[test]
    fn empty_distribution_is_not_rendered() {
        let dist = ColumnDistribution::empty("Status");
        let err = StaticChartRenderer::render_png(&dist, 400, 300).unwrap_err();
        assert!(matches!(err, RenderError::EmptyDistribution(ref c) if c == "Status"));
    }

    fn status_distribution() -> ColumnDistribution {
        ColumnDistribution {
            column: "Status".to_string(),
            total: 8,
            shares: vec![
                CategoryShare {
                    label: "Confirmed".to_string(),
                    count: 5,
                    percentage: 62.5,
                },
                CategoryShare {
                    label: "Recovered".to_string(),
                    count: 3,
                    percentage: 37.5,
                },
            ],
        }
    }

    #[test]
    fn renders_png_of_requested_size() {
        let bytes = StaticChartRenderer::render_png(&status_distribution(), 1000, 600).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));

        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!(img.width(), 1000);
        assert_eq!(img.height(), 600);
    }

    #[test]
    fn save_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("percentage_of_Status.png");
        StaticChartRenderer::save_png(&status_distribution(), &path, 400, 300).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"\x89PNG"));
        let img = image::load_from_memory(&written).unwrap();
        assert_eq!((img.width(), img.height()), (400, 300));
    }

    #[test]
    fn zero_size_rejected_before_drawing() {
        let dist = status_distribution();
        for (w, h) in [(0, 0), (0, 600), (1000, 0)] {
            let err = StaticChartRenderer::render_png(&dist, w, h).unwrap_err();
            assert!(matches!(err, RenderError::InvalidSize(x, y) if x == w && y == h));
        }
    }

    #[test]
    fn oversized_image_rejected() {
        let err = StaticChartRenderer::render_png(&status_distribution(), 70000, 70000).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSize(70000, 70000)));
        assert!(matches!(
            pixel_buffer_len(u32::MAX, u32::MAX),
            Err(RenderError::InvalidSize(_, _))
        ));
        assert_eq!(pixel_buffer_len(1000, 600).unwrap(), 1_800_000);
    }

    #[test]
    fn failed_save_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let result = StaticChartRenderer::save_png(&status_distribution(), &path, 0, 600);
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
