//! Drawing of a `LayoutPlan`.
//!
//! `draw_plan` only reads coordinates from the plan; a `RenderSink` turns the
//! primitives into pixels or markup.

use crate::layout::{LayoutPlan, RowLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const HOUR_GRID: Rgb = Rgb(0xea, 0xea, 0xea);
    pub const BLOCK_GRID: Rgb = Rgb(0xf5, 0xf5, 0xf5);

    /// Bar colour, shifting from blue to green as intensity rises.
    pub fn for_intensity(intensity: u8) -> Self {
        Rgb(0, intensity, 255 - intensity)
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Middle,
    End,
}

pub trait RenderSink {
    fn begin(&mut self, width: i32, height: i32);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb);
    fn rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64, color: Rgb);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Rgb);
    fn text(&mut self, x: f64, y: f64, size: u32, align: TextAlign, color: Rgb, content: &str);
    fn finish(&mut self);
}

const BAR_RADIUS: f64 = 4.0;
const MIN_COUNT_LABEL_WIDTH: i32 = 30;

pub fn draw_plan(plan: &LayoutPlan, sink: &mut impl RenderSink) {
    let width = plan.width as f64;
    let height = plan.height as f64;
    let top = plan.top_margin as f64;

    sink.begin(plan.width, plan.height);
    sink.fill_rect(0.0, 0.0, width, height, Rgb::WHITE);

    for x in &plan.block_marks {
        sink.line(*x as f64, top, *x as f64, height, Rgb::BLOCK_GRID);
    }
    for mark in &plan.hour_marks {
        let x = mark.x as f64;
        sink.line(x, top, x, height, Rgb::HOUR_GRID);
        sink.text(x, top - 20.0, 12, TextAlign::Middle, Rgb::BLACK, &mark.label);
    }

    for row in &plan.rows {
        draw_row(plan, row, sink);
    }
    sink.finish();
}

fn draw_row(plan: &LayoutPlan, row: &RowLayout, sink: &mut impl RenderSink) {
    let y = row.y as f64;
    let row_height = plan.row_height as f64;
    let left = plan.left_margin as f64;

    sink.text(
        left - 10.0,
        y + row_height / 2.0 + 4.0,
        12,
        TextAlign::End,
        Rgb::BLACK,
        &row.label,
    );
    sink.line(left, y, plan.width as f64, y, Rgb::HOUR_GRID);

    // 60% of the row
    let bar_height = row_height * 3.0 / 5.0;
    let bar_y = y + (row_height - bar_height) / 2.0;
    for window in &row.windows {
        let Some(bar) = window.bar else {
            continue;
        };
        sink.rounded_rect(
            bar.start_x as f64,
            bar_y,
            bar.width() as f64,
            bar_height,
            BAR_RADIUS,
            Rgb::for_intensity(window.intensity),
        );
        if bar.width() > MIN_COUNT_LABEL_WIDTH {
            sink.text(
                bar.start_x as f64 + bar.width() as f64 / 2.0,
                bar_y + bar_height / 2.0 + 3.0,
                10,
                TextAlign::Middle,
                Rgb::BLACK,
                &window.active.to_string(),
            );
        }
    }
}

/// Standalone SVG document.
#[derive(Debug, Default)]
pub struct SvgSink {
    svg: String,
}

impl SvgSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.svg
    }
}

impl RenderSink for SvgSink {
    fn begin(&mut self, width: i32, height: i32) {
        self.svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="Arial, sans-serif">"#
        ));
        self.svg.push('\n');
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        self.svg.push_str(&format!(
            r#"  <rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"/>"#,
            color.hex()
        ));
        self.svg.push('\n');
    }

    fn rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64, color: Rgb) {
        self.svg.push_str(&format!(
            r#"  <rect x="{x}" y="{y}" width="{width}" height="{height}" rx="{radius}" ry="{radius}" fill="{}"/>"#,
            color.hex()
        ));
        self.svg.push('\n');
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Rgb) {
        self.svg.push_str(&format!(
            r#"  <line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="1"/>"#,
            color.hex()
        ));
        self.svg.push('\n');
    }

    fn text(&mut self, x: f64, y: f64, size: u32, align: TextAlign, color: Rgb, content: &str) {
        let anchor = match align {
            TextAlign::Middle => "middle",
            TextAlign::End => "end",
        };
        self.svg.push_str(&format!(
            r#"  <text x="{x}" y="{y}" font-size="{size}" text-anchor="{anchor}" fill="{}">{}</text>"#,
            color.hex(),
            xml_escape(content)
        ));
        self.svg.push('\n');
    }

    fn finish(&mut self) {
        self.svg.push_str("</svg>\n");
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
