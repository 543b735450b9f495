//! Dial geometry: angle mapping and the static layout computed in `begin()`.
//!
//! Angles are in degrees, measured clockwise from the positive x axis in
//! screen coordinates (y grows downward). This is the same convention
//! `embedded-graphics` uses for [`Arc`](embedded_graphics::primitives::Arc),
//! so points computed here line up with arcs drawn by the renderer.

use core::f32::consts::PI;

use embedded_graphics::{prelude::*, primitives::Rectangle};
use heapless::Vec;

use crate::config::{GaugeConfig, MAX_TICKS};

/// Gap between the tick band and the outer edge of the value arc.
const ARC_TICK_GAP: i32 = 3;
/// Extra inset of the range labels inside the tick band.
const LABEL_INSET: i32 = 6;

/// Angle in degrees for a normalised position `fraction` in `[0, 1]`.
pub fn value_angle_deg(config: &GaugeConfig, fraction: f32) -> f32 {
    config.start_angle_deg + config.sweep_angle_deg * fraction
}

/// Point at `radius` pixels from `center` along `angle_deg`, rounded to the
/// nearest pixel.
pub fn point_on_circle(center: Point, radius: f32, angle_deg: f32) -> Point {
    let rad = angle_deg * (PI / 180.0);
    Point::new(
        center.x + libm::roundf(radius * libm::cosf(rad)) as i32,
        center.y + libm::roundf(radius * libm::sinf(rad)) as i32,
    )
}

/// Returns `true` if `inner` lies entirely inside `outer`.
///
/// A zero-sized `inner` always fits.
pub fn rect_within(inner: &Rectangle, outer: &Rectangle) -> bool {
    let (Some(inner_br), Some(outer_br)) = (inner.bottom_right(), outer.bottom_right()) else {
        return inner.size.width == 0 || inner.size.height == 0;
    };

    inner.top_left.x >= outer.top_left.x
        && inner.top_left.y >= outer.top_left.y
        && inner_br.x <= outer_br.x
        && inner_br.y <= outer_br.y
}

/// One radial tick mark, stored as its two end points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickMark {
    /// End point on the outer edge of the dial.
    pub outer: Point,
    /// End point towards the centre.
    pub inner: Point,
}

/// Everything about the dial that does not change with the value.
///
/// Computed once by [`CircularGauge::begin()`](crate::CircularGauge::begin)
/// and dropped again by `stop()`.
#[derive(Debug, Clone, PartialEq)]
pub struct DialGeometry {
    /// Dial centre.
    pub center: Point,
    /// Outer radius (`diameter / 2`).
    pub radius: i32,
    /// Square region cleared and redrawn every frame.
    pub bounding_box: Rectangle,
    /// Tick marks from minimum to maximum.
    pub ticks: Vec<TickMark, MAX_TICKS>,
    /// Diameter of the circle the value arc is stroked on.
    pub value_arc_diameter: u32,
    /// Needle length from the centre, in pixels.
    pub needle_length: u32,
    /// Centre of the numeric value readout.
    pub value_text_anchor: Point,
    /// Centre of the minimum label (used when range labels are enabled).
    pub min_label_anchor: Point,
    /// Centre of the maximum label.
    pub max_label_anchor: Point,
}

impl DialGeometry {
    /// Derive the static dial layout from `config`.
    ///
    /// Returns `None` if the configuration is invalid or leaves no room for
    /// a needle longer than the hub.
    pub fn compute(config: &GaugeConfig) -> Option<Self> {
        if !config.is_valid() {
            return None;
        }

        let center = config.center;
        let radius = (config.diameter / 2) as i32;
        let tick_length = config.tick_length as i32;
        let arc_width = config.value_arc_width as i32;

        let value_arc_radius = radius - tick_length - ARC_TICK_GAP - arc_width / 2;
        let needle_length = value_arc_radius - arc_width - 1;
        if value_arc_radius <= arc_width || needle_length <= (config.hub_diameter / 2) as i32 {
            return None;
        }

        let mut ticks = Vec::new();
        if config.major_ticks > 0 {
            let last = (config.major_ticks - 1) as f32;
            for i in 0..config.major_ticks {
                let angle = value_angle_deg(config, i as f32 / last);
                let tick = TickMark {
                    outer: point_on_circle(center, (radius - 1) as f32, angle),
                    inner: point_on_circle(center, (radius - 1 - tick_length) as f32, angle),
                };
                if ticks.push(tick).is_err() {
                    return None;
                }
            }
        }

        let label_radius = (radius - tick_length - LABEL_INSET) as f32;

        Some(Self {
            center,
            radius,
            bounding_box: Rectangle::with_center(
                center,
                Size::new(config.diameter, config.diameter),
            ),
            ticks,
            value_arc_diameter: (value_arc_radius * 2) as u32,
            needle_length: needle_length as u32,
            value_text_anchor: center + Point::new(0, radius / 2),
            min_label_anchor: point_on_circle(center, label_radius, value_angle_deg(config, 0.0)),
            max_label_anchor: point_on_circle(center, label_radius, value_angle_deg(config, 1.0)),
        })
    }

    /// End point of the needle when pointing at `angle_deg`.
    pub fn needle_tip(&self, angle_deg: f32) -> Point {
        point_on_circle(self.center, self.needle_length as f32, angle_deg)
    }

    /// Returns `true` if the whole dial lies inside `area`.
    pub fn fits_within(&self, area: &Rectangle) -> bool {
        rect_within(&self.bounding_box, area)
    }
}
