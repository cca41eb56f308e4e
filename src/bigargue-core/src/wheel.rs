//! Radial selector geometry.
//!
//! Pure trigonometry for the pie-style discipline picker: equal angular
//! slices with a global -90 degree rotation so slice 0 starts at the top,
//! pie-wedge SVG paths, and upright label anchors. Selection state never
//! changes the geometry, only fill and text colors, so a layout can be
//! computed once per category count and reused.

use std::f64::consts::PI;
use std::fmt::Write;

use crate::catalog::Discipline;

/// Canvas constants, matching the 400x400 viewBox of the original wheel.
pub const CENTER_X: f64 = 200.0;
pub const CENTER_Y: f64 = 200.0;
pub const INNER_RADIUS: f64 = 80.0;
pub const OUTER_RADIUS: f64 = 180.0;

/// Degrees trimmed off each side of an outer wedge for visual separation.
const WEDGE_GAP_DEG: f64 = 2.0;

/// Background fill for the inner ring, masking the visual center.
const INNER_FILL: &str = "#f0ece9";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Convert a polar coordinate to Cartesian.
///
/// Angles are in degrees measured clockwise from vertical-up: the -90
/// degree shift is baked in before the radian conversion, so angle 0 lands
/// directly north of the center.
pub fn polar_to_cartesian(center_x: f64, center_y: f64, radius: f64, angle_deg: f64) -> Point {
    let angle_rad = (angle_deg - 90.0) * PI / 180.0;
    Point {
        x: center_x + radius * angle_rad.cos(),
        y: center_y + radius * angle_rad.sin(),
    }
}

/// SVG path for a closed pie wedge.
///
/// Moves to the end-angle point, arcs back to the start-angle point (long
/// way round when the span exceeds 180 degrees), then closes through the
/// center.
pub fn describe_arc(
    center_x: f64,
    center_y: f64,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> String {
    let start = polar_to_cartesian(center_x, center_y, radius, end_angle);
    let end = polar_to_cartesian(center_x, center_y, radius, start_angle);
    let large_arc_flag = if end_angle - start_angle <= 180.0 { 0 } else { 1 };
    format!(
        "M {} {} A {} {} 0 {} 0 {} {} L {} {} Z",
        start.x, start.y, radius, radius, large_arc_flag, end.x, end.y, center_x, center_y
    )
}

/// Geometry for one slice of the wheel.
#[derive(Debug, Clone)]
pub struct WheelSlice {
    pub index: usize,
    /// Slice boundaries in degrees, before the per-wedge gap inset.
    pub start_angle: f64,
    pub end_angle: f64,
    /// Outer ring wedge, inset by the gap on each side.
    pub outer_path: String,
    /// Inner ring wedge, untrimmed, drawn beneath the label.
    pub inner_path: String,
    /// Label anchor: angular midpoint of the slice at mid-radius.
    pub label_pos: Point,
    /// Local counter-rotation that keeps label text upright despite the
    /// -90 degree canvas rotation.
    pub label_rotation: f64,
}

/// Precomputed layout for a wheel of `count` categories.
#[derive(Debug, Clone)]
pub struct WheelLayout {
    slices: Vec<WheelSlice>,
}

impl WheelLayout {
    /// Partition the full circle into `count` equal slices.
    pub fn new(count: usize) -> Self {
        let mid_radius = (INNER_RADIUS + OUTER_RADIUS) / 2.0;
        let slices = (0..count)
            .map(|index| {
                let start_angle = (index as f64 * 360.0) / count as f64;
                let end_angle = ((index as f64 + 1.0) * 360.0) / count as f64;
                let mid_angle = (start_angle + end_angle) / 2.0;
                WheelSlice {
                    index,
                    start_angle,
                    end_angle,
                    outer_path: describe_arc(
                        CENTER_X,
                        CENTER_Y,
                        OUTER_RADIUS,
                        start_angle + WEDGE_GAP_DEG,
                        end_angle - WEDGE_GAP_DEG,
                    ),
                    inner_path: describe_arc(CENTER_X, CENTER_Y, INNER_RADIUS, start_angle, end_angle),
                    label_pos: polar_to_cartesian(CENTER_X, CENTER_Y, mid_radius, mid_angle),
                    label_rotation: 90.0,
                }
            })
            .collect();
        Self { slices }
    }

    pub fn slices(&self) -> &[WheelSlice] {
        &self.slices
    }
}

/// Render the discipline wheel as a standalone SVG document.
///
/// Geometry is selection-independent; `selected_ids` only decides whether a
/// wedge is filled with its discipline color (label in white) or left white
/// (label in the discipline's text color).
pub fn render_wheel_svg(disciplines: &[Discipline], selected_ids: &[String]) -> String {
    let layout = WheelLayout::new(disciplines.len());
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 400 400" width="400" height="400">"#
    );
    let _ = writeln!(svg, r#"  <g transform="rotate(-90 {} {})">"#, CENTER_X, CENTER_Y);

    for (discipline, slice) in disciplines.iter().zip(layout.slices()) {
        let selected = selected_ids.iter().any(|id| *id == discipline.id);
        let fill = if selected { discipline.color.as_str() } else { "white" };
        let text_fill = if selected { "white" } else { discipline.text_color.as_str() };

        let _ = writeln!(
            svg,
            r#"    <path d="{}" fill="{}" stroke="{}" stroke-width="2"/>"#,
            slice.outer_path, fill, discipline.color
        );
        let _ = writeln!(
            svg,
            r#"    <path d="{}" fill="{}"/>"#,
            slice.inner_path, INNER_FILL
        );
        let _ = writeln!(
            svg,
            r#"    <text x="{x}" y="{y}" transform="rotate({rot} {x} {y})" fill="{fill}" font-size="11" font-weight="bold" text-anchor="middle" dominant-baseline="middle">{label}</text>"#,
            x = slice.label_pos.x,
            y = slice.label_pos.y,
            rot = slice.label_rotation,
            fill = text_fill,
            label = xml_escape(&discipline.label),
        );
    }

    let _ = writeln!(svg, "  </g>");
    svg.push_str("</svg>\n");
    svg
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
