//! Gauge layout and refresh configuration.

use embedded_graphics::prelude::Point;

/// Upper bound on the number of tick marks a dial can carry.
///
/// Tick geometry is stored in a fixed-capacity `heapless::Vec`.
pub const MAX_TICKS: usize = 32;

/// Smallest dial diameter the renderer supports, in pixels.
pub const MIN_DIAMETER: u32 = 24;

// ── GaugeConfig ──────────────────────────────────────────────────────────

/// Configuration for the dial geometry and the update task.
///
/// All layout geometry lives here — there are **no** module-level layout
/// constants. Callers can tune every dimension at construction time
/// without modifying library source.
///
/// [`GaugeConfig::default()`] centres a 62 px dial on a 128×64 display
/// with a 270° sweep and the gap at the bottom:
///
/// ```text
///            270°
///         .-''''-.
///   180° |   \    | 0°
///        |    o   |
///    135° '-.  .-' 45°
///          value
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeConfig {
    /// Update task refresh rate in Hz. Default: 30. Max: 60.
    pub update_frequency_hz: u32,

    // ── Dial geometry ────────────────────────────────────────────────
    /// Dial centre in display coordinates. Default: (64, 32).
    pub center: Point,
    /// Outer dial diameter in pixels. Default: 62.
    pub diameter: u32,
    /// Angle of the minimum value, degrees clockwise from 3 o'clock.
    /// Default: 135.
    pub start_angle_deg: f32,
    /// Clockwise sweep from minimum to maximum, degrees in `(0, 360]`.
    /// Default: 270.
    pub sweep_angle_deg: f32,
    /// Number of evenly spaced tick marks including both ends. `0`
    /// disables ticks; otherwise `2..=MAX_TICKS`. Default: 11.
    pub major_ticks: usize,
    /// Radial length of each tick mark in pixels. Default: 4.
    pub tick_length: u32,
    /// Stroke width of the value arc in pixels. Default: 3.
    pub value_arc_width: u32,
    /// Diameter of the filled needle hub. Default: 5.
    pub hub_diameter: u32,

    // ── Text ─────────────────────────────────────────────────────────
    /// Digits after the decimal point in the value readout (max 3).
    /// Default: 0.
    pub value_decimals: u8,
    /// Draw the range bounds next to the first and last tick. Default: false.
    pub show_range_labels: bool,
    /// Top-left corner of the render-time overlay. Default: (0, 0).
    pub render_time_origin: Point,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            update_frequency_hz: 30,
            center: Point::new(64, 32),
            diameter: 62,
            start_angle_deg: 135.0,
            sweep_angle_deg: 270.0,
            major_ticks: 11,
            tick_length: 4,
            value_arc_width: 3,
            hub_diameter: 5,
            value_decimals: 0,
            show_range_labels: false,
            render_time_origin: Point::zero(),
        }
    }
}

impl GaugeConfig {
    /// Convert the configured frequency to a timer period in milliseconds.
    ///
    /// Formula: `1000 / update_frequency_hz`.
    pub fn update_period_ms(&self) -> u64 {
        1000 / self.update_frequency_hz.max(1) as u64
    }

    /// Check the parameters that do not depend on derived geometry.
    ///
    /// Radius-dependent constraints (e.g. the needle being longer than
    /// the hub) are checked by [`DialGeometry::compute`](crate::geometry::DialGeometry::compute).
    pub fn is_valid(&self) -> bool {
        let ticks_ok = self.major_ticks == 0 || (2..=MAX_TICKS).contains(&self.major_ticks);
        let sweep_ok = self.sweep_angle_deg > 0.0 && self.sweep_angle_deg <= 360.0;

        ticks_ok
            && sweep_ok
            && self.start_angle_deg.is_finite()
            && self.diameter >= MIN_DIAMETER
            && self.value_arc_width > 0
            && self.value_decimals <= 3
            && (1..=60).contains(&self.update_frequency_hz)
    }
}
