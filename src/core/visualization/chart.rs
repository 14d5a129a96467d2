// src/core/visualization/chart.rs
//
// Line chart of the six covariance series over the recording envelope.

use image::{ImageBuffer, Rgb};
use log::debug;
use std::path::Path;

use super::text::TextRenderer;
use crate::config::Attack;
use crate::error::{AnalysisError, Result};
use crate::report::CovarianceSeries;

pub type Canvas = ImageBuffer<Rgb<u8>, Vec<u8>>;

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    /// Opacity of the covariance lines
    pub series_alpha: f32,
    /// Opacity of the envelope line
    pub envelope_alpha: f32,
    /// Label font size in pixels
    pub font_size: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 600,
            series_alpha: 0.7,
            envelope_alpha: 0.8,
            font_size: 16.0,
        }
    }
}

/// Line colours, one per reference followed by the envelope
const PALETTE: [Rgb<u8>; 7] = [
    Rgb([76, 114, 176]),
    Rgb([221, 132, 82]),
    Rgb([85, 168, 104]),
    Rgb([196, 78, 82]),
    Rgb([129, 114, 179]),
    Rgb([147, 120, 96]),
    Rgb([218, 139, 195]),
];

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const PLOT_AREA: Rgb<u8> = Rgb([234, 234, 242]);
const GRID: Rgb<u8> = Rgb([255, 255, 255]);
const TEXT: Rgb<u8> = Rgb([40, 40, 40]);

const MARGIN_LEFT: u32 = 80;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 20;
const MARGIN_BOTTOM: u32 = 40;
const TICKS: usize = 5;

/// Maps data coordinates to pixels inside the plot area
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        if self.x_max <= 0.0 {
            return self.left;
        }
        self.left + x / self.x_max * self.width
    }

    fn py(&self, y: f64) -> f64 {
        self.top + (self.y_max - y) / (self.y_max - self.y_min) * self.height
    }
}

/// Render the covariance chart to a PNG file.
///
/// Draws one line per reference, the recording envelope, grid, tick labels
/// and a legend naming all seven lines.
pub fn render_covariance_chart(
    series: &CovarianceSeries,
    envelope: &[f64],
    config: &ChartConfig,
    output_path: &Path,
) -> Result<()> {
    let img = draw_covariance_chart(series, envelope, config)?;
    img.save(output_path)
        .map_err(|e| AnalysisError::Render(format!("{}: {}", output_path.display(), e)))?;
    debug!("chart written to {}", output_path.display());
    Ok(())
}

/// Draw the chart into an in-memory image
pub fn draw_covariance_chart(
    series: &CovarianceSeries,
    envelope: &[f64],
    config: &ChartConfig,
) -> Result<Canvas> {
    if series.is_empty() {
        return Err(AnalysisError::Render("no covariance windows to plot".to_string()));
    }
    if config.width <= MARGIN_LEFT + MARGIN_RIGHT + 50
        || config.height <= MARGIN_TOP + MARGIN_BOTTOM + 50
    {
        return Err(AnalysisError::Render(format!(
            "chart size {}x{} is too small",
            config.width, config.height
        )));
    }

    let times = series.time_axis();
    let columns: Vec<Vec<f64>> = Attack::ALL.iter().map(|&a| series.column(a)).collect();

    let (y_min, y_max) = value_range(columns.iter().flatten().chain(envelope.iter()));
    let frame = Frame {
        left: MARGIN_LEFT as f64,
        top: MARGIN_TOP as f64,
        width: (config.width - MARGIN_LEFT - MARGIN_RIGHT) as f64,
        height: (config.height - MARGIN_TOP - MARGIN_BOTTOM) as f64,
        x_max: series.duration_secs(),
        y_min,
        y_max,
    };

    let mut img = ImageBuffer::from_pixel(config.width, config.height, BACKGROUND);
    fill_rect(
        &mut img,
        MARGIN_LEFT,
        MARGIN_TOP,
        config.width - MARGIN_RIGHT,
        config.height - MARGIN_BOTTOM,
        PLOT_AREA,
    );
    let text = TextRenderer::new(config.font_size)?;
    draw_grid(&mut img, &frame, &text);

    for (values, &color) in columns.iter().zip(PALETTE.iter()) {
        draw_polyline(&mut img, &frame, &times, values, color, config.series_alpha);
    }
    draw_polyline(&mut img, &frame, &times, envelope, PALETTE[6], config.envelope_alpha);

    draw_legend(&mut img, config, &text);
    Ok(img)
}

/// Finite min/max padded by 5%; falls back to [-1, 1]
fn value_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for &v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    if (hi - lo).abs() < 1e-12 {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

fn fill_rect(img: &mut Canvas, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

fn draw_grid(img: &mut Canvas, frame: &Frame, text: &TextRenderer) {
    let bottom = (frame.top + frame.height) as u32;
    let right = (frame.left + frame.width) as u32;
    let label_h = text.line_height();

    for i in 0..TICKS {
        let t = i as f64 / (TICKS - 1) as f64;

        let x_value = t * frame.x_max;
        let x = frame.px(x_value).round() as u32;
        fill_rect(img, x, frame.top as u32, x + 1, bottom, GRID);
        let label = format!("{:.1}", x_value);
        let lx = x as i64 - text.text_width(&label) as i64 / 2;
        text.draw_text(img, lx, bottom as i64 + 8, &label, TEXT);

        let y_value = frame.y_min + t * (frame.y_max - frame.y_min);
        let y = frame.py(y_value).round() as u32;
        fill_rect(img, frame.left as u32, y, right, y + 1, GRID);
        let label = format!("{:.1}", y_value);
        let lx = frame.left as i64 - 8 - text.text_width(&label) as i64;
        text.draw_text(img, lx, y as i64 - label_h as i64 / 2, &label, TEXT);
    }

    if frame.y_min < 0.0 && frame.y_max > 0.0 {
        let y = frame.py(0.0).round() as u32;
        fill_rect(img, frame.left as u32, y, right, y + 1, Rgb([200, 200, 210]));
    }
}

fn draw_polyline(
    img: &mut Canvas,
    frame: &Frame,
    times: &[f64],
    values: &[f64],
    color: Rgb<u8>,
    alpha: f32,
) {
    let mut previous: Option<(f64, f64)> = None;
    for (&t, &v) in times.iter().zip(values.iter()) {
        if !v.is_finite() {
            previous = None;
            continue;
        }
        let point = (frame.px(t), frame.py(v));
        match previous {
            Some(p) => draw_line(img, p, point, color, alpha),
            None => blend_pixel(img, point.0.round() as i64, point.1.round() as i64, color, alpha),
        }
        previous = Some(point);
    }
}

/// Bresenham line, two pixels thick
fn draw_line(img: &mut Canvas, from: (f64, f64), to: (f64, f64), color: Rgb<u8>, alpha: f32) {
    let (mut x0, mut y0) = (from.0.round() as i64, from.1.round() as i64);
    let (x1, y1) = (to.0.round() as i64, to.1.round() as i64);

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        blend_pixel(img, x0, y0, color, alpha);
        blend_pixel(img, x0, y0 + 1, color, alpha);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

pub(super) fn blend_pixel(img: &mut Canvas, x: i64, y: i64, color: Rgb<u8>, alpha: f32) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    let a = alpha.clamp(0.0, 1.0);
    let pixel = img.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        let blended = a * color.0[c] as f32 + (1.0 - a) * pixel.0[c] as f32;
        pixel.0[c] = blended.round().clamp(0.0, 255.0) as u8;
    }
}

fn draw_legend(img: &mut Canvas, config: &ChartConfig, text: &TextRenderer) {
    let labels: Vec<&str> = Attack::ALL
        .iter()
        .map(|a| a.code())
        .chain(std::iter::once("sound"))
        .collect();

    let label_h = text.line_height() as i64;
    let line_h = label_h + 6;
    let swatch = 24i64;
    let text_w = labels
        .iter()
        .map(|l| text.text_width(l))
        .max()
        .unwrap_or(0) as i64;
    let box_w = 10 + swatch + 8 + text_w + 10;
    let box_h = 10 + line_h * labels.len() as i64 + 4;

    let x0 = config.width as i64 - MARGIN_RIGHT as i64 - box_w - 10;
    let y0 = MARGIN_TOP as i64 + 10;
    if x0 < 0 {
        return;
    }
    fill_rect(
        img,
        x0 as u32,
        y0 as u32,
        (x0 + box_w) as u32,
        (y0 + box_h) as u32,
        BACKGROUND,
    );

    for (i, (label, &color)) in labels.iter().zip(PALETTE.iter()).enumerate() {
        let row_y = y0 + 10 + i as i64 * line_h;
        let mid = row_y + label_h / 2;
        draw_line(
            img,
            ((x0 + 10) as f64, mid as f64),
            ((x0 + 10 + swatch) as f64, mid as f64),
            color,
            1.0,
        );
        text.draw_text(img, x0 + 10 + swatch + 8, row_y, label, TEXT);
    }
}
