//! The circular gauge widget.
//!
//! [`CircularGauge`] borrows a display, owns nothing but its own state, and
//! turns values into dial frames.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::config::GaugeConfig;
use crate::error::GaugeError;
use crate::geometry::{rect_within, value_angle_deg, DialGeometry};
use crate::range::GaugeRange;
use crate::render::{render_elapsed, render_gauge, render_time_area};
use crate::render_time::{NoClock, RenderClock, RenderStats};
use crate::state::GaugeState;

/// Circular gauge drawing a value as an arc and needle on a monochrome
/// display.
///
/// The display is borrowed for the gauge's lifetime; the caller keeps
/// ownership and decides when to flush.
///
/// # Lifecycle
///
/// 1. [`CircularGauge::new()`] — validates the range. No drawing.
/// 2. [`CircularGauge::begin()`] — computes the static dial geometry.
/// 3. [`CircularGauge::draw_gauge_data()`] — renders a value into the
///    display's frame buffer.
/// 4. [`CircularGauge::stop()`] — releases the geometry; further draws fail
///    until `begin()` is called again.
///
/// # Example
///
/// ```
/// use circular_gauge_rs::{CircularGauge, GaugeConfig};
/// use embedded_graphics::{mock_display::MockDisplay, pixelcolor::BinaryColor, prelude::*};
///
/// let mut display = MockDisplay::<BinaryColor>::new();
/// display.set_allow_overdraw(true);
///
/// let config = GaugeConfig {
///     center: Point::new(32, 32),
///     diameter: 60,
///     ..GaugeConfig::default()
/// };
/// let mut gauge = CircularGauge::with_config(&mut display, 0, 100, config).unwrap();
/// gauge.begin().unwrap();
/// gauge.draw_gauge_data(42.0).unwrap();
/// assert!(gauge.is_active());
/// ```
pub struct CircularGauge<'d, D, C = NoClock> {
    display: &'d mut D,
    range: GaugeRange,
    config: GaugeConfig,
    state: GaugeState,
    /// `Some` only while started.
    geometry: Option<DialGeometry>,
    /// Last drawn value, always inside `range`.
    value: f32,
    /// `Some` when render time tracking is enabled.
    clock: Option<C>,
    stats: RenderStats,
}

impl<'d, D> CircularGauge<'d, D, NoClock>
where
    D: DrawTarget<Color = BinaryColor>,
{
    /// Construct a gauge for `[min, max]` with the default layout.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::InvalidRange`] if `min >= max`.
    pub fn new(display: &'d mut D, min: i32, max: i32) -> Result<Self, GaugeError<D::Error>> {
        Self::with_config(display, min, max, GaugeConfig::default())
    }

    /// Construct a gauge for `[min, max]` with a custom layout.
    ///
    /// The configuration itself is validated by [`begin()`](Self::begin).
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::InvalidRange`] if `min >= max`.
    pub fn with_config(
        display: &'d mut D,
        min: i32,
        max: i32,
        config: GaugeConfig,
    ) -> Result<Self, GaugeError<D::Error>> {
        Self::build(display, min, max, config, None)
    }
}

impl<'d, D, C> CircularGauge<'d, D, C>
where
    D: DrawTarget<Color = BinaryColor>,
    C: RenderClock,
{
    /// Construct a gauge that measures and overlays its render time.
    ///
    /// Each frame is timed with `clock`; the result is drawn at
    /// [`GaugeConfig::render_time_origin`] and accumulated in
    /// [`render_stats()`](Self::render_stats). The dial itself is drawn
    /// exactly as without tracking.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::InvalidRange`] if `min >= max`.
    pub fn with_render_time(
        display: &'d mut D,
        min: i32,
        max: i32,
        config: GaugeConfig,
        clock: C,
    ) -> Result<Self, GaugeError<D::Error>> {
        Self::build(display, min, max, config, Some(clock))
    }

    pub(crate) fn build(
        display: &'d mut D,
        min: i32,
        max: i32,
        config: GaugeConfig,
        clock: Option<C>,
    ) -> Result<Self, GaugeError<D::Error>> {
        let range = GaugeRange::new(min, max).ok_or(GaugeError::InvalidRange)?;
        Ok(Self {
            display,
            range,
            config,
            state: GaugeState::NotStarted,
            geometry: None,
            value: min as f32,
            clock,
            stats: RenderStats::default(),
        })
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Compute the static dial geometry and make the gauge ready to draw.
    ///
    /// Calling `begin()` on a gauge that is already ready does nothing.
    /// After [`stop()`](Self::stop) it recomputes the geometry.
    ///
    /// # Errors
    ///
    /// * [`GaugeError::InvalidConfig`] if the configuration cannot be laid
    ///   out.
    /// * [`GaugeError::DoesNotFit`] if the dial, or the render-time overlay
    ///   when tracking is on, extends past the display bounds.
    pub fn begin(&mut self) -> Result<(), GaugeError<D::Error>> {
        if self.state.is_ready() {
            return Ok(());
        }

        let geometry = DialGeometry::compute(&self.config).ok_or(GaugeError::InvalidConfig)?;

        let screen = self.display.bounding_box();
        if !geometry.fits_within(&screen) {
            #[cfg(feature = "defmt")]
            defmt::warn!("gauge dial does not fit the display");
            return Err(GaugeError::DoesNotFit);
        }
        let overlay = render_time_area(self.config.render_time_origin);
        if self.clock.is_some() && !rect_within(&overlay, &screen) {
            #[cfg(feature = "defmt")]
            defmt::warn!("render time overlay does not fit the display");
            return Err(GaugeError::DoesNotFit);
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "gauge ready: range [{}, {}], {} ticks",
            self.range.min(),
            self.range.max(),
            geometry.ticks.len()
        );

        self.geometry = Some(geometry);
        self.state = GaugeState::Ready;
        Ok(())
    }

    /// Stop drawing and release the cached geometry.
    ///
    /// Safe to call at any time; a gauge that was never started stays
    /// [`GaugeState::NotStarted`]. The frame buffer is left untouched.
    pub fn stop(&mut self) {
        if self.state == GaugeState::NotStarted {
            return;
        }
        self.geometry = None;
        self.state = GaugeState::Stopped;

        #[cfg(feature = "defmt")]
        defmt::info!("gauge stopped after {} frames", self.stats.frames);
    }

    // ── Drawing ──────────────────────────────────────────────────────

    /// Render `value` into the display's frame buffer.
    ///
    /// Out-of-range values (including infinities) are clamped to the gauge
    /// range. Nothing reaches the hardware until the caller flushes the
    /// display.
    ///
    /// # Errors
    ///
    /// * [`GaugeError::NotInitialized`] before [`begin()`](Self::begin) or
    ///   after [`stop()`](Self::stop).
    /// * [`GaugeError::InvalidValue`] if `value` is NaN.
    /// * [`GaugeError::Draw`] if the display rejects a draw call. The gauge
    ///   state and stored value are unchanged in that case.
    pub fn draw_gauge_data(&mut self, value: f32) -> Result<(), GaugeError<D::Error>> {
        let Some(geometry) = self.geometry.as_ref() else {
            return Err(GaugeError::NotInitialized);
        };
        if value.is_nan() {
            return Err(GaugeError::InvalidValue);
        }

        let value = self.range.clamp(value);
        let started = self.clock.as_ref().map(|clock| clock.now_micros());

        render_gauge(&mut *self.display, geometry, &self.config, &self.range, value)?;

        if let (Some(clock), Some(started)) = (self.clock.as_ref(), started) {
            let elapsed = clock.now_micros().saturating_sub(started);
            self.stats.record(elapsed);
            render_elapsed(&mut *self.display, self.config.render_time_origin, elapsed)?;
        }

        self.value = value;
        self.state = GaugeState::Active;
        Ok(())
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The bound display.
    pub fn display(&self) -> &D {
        &*self.display
    }

    /// The bound display, for composing extra drawing or flushing.
    ///
    /// Always the same object the gauge was constructed with.
    pub fn display_mut(&mut self) -> &mut D {
        &mut *self.display
    }

    /// `true` while values can be drawn (after `begin()`, before `stop()`).
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// `true` once a value has been drawn since the last `begin()`.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GaugeState {
        self.state
    }

    /// Last successfully drawn (clamped) value; `min` before the first draw.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Needle angle for the current value, degrees clockwise from 3 o'clock.
    pub fn value_angle_deg(&self) -> f32 {
        value_angle_deg(&self.config, self.range.fraction(self.value))
    }

    /// The gauge's value range.
    pub fn range(&self) -> GaugeRange {
        self.range
    }

    /// The layout configuration.
    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// Static dial geometry, available while the gauge is ready.
    pub fn geometry(&self) -> Option<&DialGeometry> {
        self.geometry.as_ref()
    }

    /// `true` if the gauge was built with a render clock.
    pub fn tracks_render_time(&self) -> bool {
        self.clock.is_some()
    }

    /// Render time statistics, or `None` when tracking is disabled.
    pub fn render_stats(&self) -> Option<RenderStats> {
        self.clock.as_ref().map(|_| self.stats)
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::primitives::{ContainsPoint, PointsIter};

    use super::*;
    use crate::render::RENDER_TIME_CHARS;

    /// Clock that advances by `step` microseconds on every read.
    struct StepClock {
        now: Cell<u64>,
        step: u64,
    }

    impl StepClock {
        fn new(step: u64) -> Self {
            Self {
                now: Cell::new(0),
                step,
            }
        }
    }

    impl RenderClock for StepClock {
        fn now_micros(&self) -> u64 {
            let t = self.now.get();
            self.now.set(t + self.step);
            t
        }
    }

    fn mock_display() -> MockDisplay<BinaryColor> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display
    }

    fn small_dial() -> GaugeConfig {
        GaugeConfig {
            center: Point::new(32, 32),
            diameter: 60,
            render_time_origin: Point::zero(),
            ..GaugeConfig::default()
        }
    }

    fn pixel(display: &MockDisplay<BinaryColor>, x: i32, y: i32) -> Option<BinaryColor> {
        display.get_pixel(Point::new(x, y))
    }

    #[test]
    fn rejects_invalid_range() {
        let mut display = mock_display();
        let err = CircularGauge::new(&mut display, 5, 5).err();
        assert_eq!(err, Some(GaugeError::InvalidRange));

        let err = CircularGauge::new(&mut display, 10, 0).err();
        assert_eq!(err, Some(GaugeError::InvalidRange));
    }

    #[test]
    fn new_gauge_is_not_ready() {
        for (min, max) in [(0, 1), (-100, 100), (i32::MIN, i32::MAX)] {
            let mut display = mock_display();
            let gauge = CircularGauge::with_config(&mut display, min, max, small_dial()).unwrap();
            assert!(!gauge.is_ready());
            assert!(!gauge.is_active());
            assert_eq!(gauge.state(), GaugeState::NotStarted);
            assert_eq!(gauge.value(), min as f32);
        }
    }

    #[test]
    fn construction_does_not_draw() {
        let mut display = mock_display();
        let gauge = CircularGauge::with_config(&mut display, 0, 100, small_dial()).unwrap();
        drop(gauge);
        assert!(display
            .bounding_box()
            .points()
            .all(|p| display.get_pixel(p).is_none()));
    }

    #[test]
    fn begin_makes_gauge_ready() {
        let mut display = mock_display();
        let mut gauge = CircularGauge::with_config(&mut display, 0, 100, small_dial()).unwrap();
        gauge.begin().unwrap();
        assert!(gauge.is_ready());
        assert!(!gauge.is_active());
        assert_eq!(gauge.state(), GaugeState::Ready);
        assert_eq!(gauge.geometry().map(|g| g.ticks.len()), Some(11));
    }

    #[test]
    fn begin_is_idempotent() {
        let mut display = mock_display();
        let mut gauge = CircularGauge::with_config(&mut display, 0, 100, small_dial()).unwrap();
        gauge.begin().unwrap();
        gauge.draw_gauge_data(10.0).unwrap();

        gauge.begin().unwrap();
        assert_eq!(gauge.state(), GaugeState::Active);
        assert_eq!(gauge.value(), 10.0);
    }

    #[test]
    fn begin_rejects_invalid_config() {
        let mut display = mock_display();
        let config = GaugeConfig {
            major_ticks: 1,
            ..small_dial()
        };
        let mut gauge = CircularGauge::with_config(&mut display, 0, 100, config).unwrap();
        assert_eq!(gauge.begin(), Err(GaugeError::InvalidConfig));
        assert!(!gauge.is_ready());
    }

    #[test]
    fn default_layout_does_not_fit_64x64() {
        let mut display = mock_display();
        let mut gauge = CircularGauge::new(&mut display, 0, 100).unwrap();
        assert_eq!(gauge.begin(), Err(GaugeError::DoesNotFit));
        assert_eq!(gauge.state(), GaugeState::NotStarted);
    }

    #[test]
    fn render_time_overlay_must_fit() {
        let mut display = mock_display();
        let config = GaugeConfig {
            render_time_origin: Point::new(60, 0),
            ..small_dial()
        };
        let mut gauge =
            CircularGauge::with_render_time(&mut display, 0, 100, config, StepClock::new(1))
                .unwrap();
        assert_eq!(gauge.begin(), Err(GaugeError::DoesNotFit));
    }

    #[test]
    fn draw_before_begin_fails() {
        let mut display = mock_display();
        let mut gauge = CircularGauge::with_config(&mut display, 0, 100, small_dial()).unwrap();
        assert_eq!(gauge.draw_gauge_data(50.0), Err(GaugeError::NotInitialized));
        assert_eq!(gauge.state(), GaugeState::NotStarted);
    }

    #[test]
    fn draws_every_in_range_value() {
        let mut display = mock_display();
        let mut gauge = CircularGauge::with_config(&mut display, -20, 20, small_dial()).unwrap();
        gauge.begin().unwrap();

        for v in -20..=20 {
            gauge.draw_gauge_data(v as f32).unwrap();
            assert_eq!(gauge.value(), v as f32);
        }
        assert!(gauge.is_active());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut display = mock_display();
        let mut gauge = CircularGauge::with_config(&mut display, 0, 100, small_dial()).unwrap();
        gauge.begin().unwrap();

        gauge.draw_gauge_data(250.0).unwrap();
        assert_eq!(gauge.value(), 100.0);
        assert_eq!(gauge.value_angle_deg(), 405.0);

        gauge.draw_gauge_data(f32::NEG_INFINITY).unwrap();
        assert_eq!(gauge.value(), 0.0);
        assert_eq!(gauge.value_angle_deg(), 135.0);
    }

    #[test]
    fn nan_is_rejected() {
        let mut display = mock_display();
        let mut gauge = CircularGauge::with_config(&mut display, 0, 100, small_dial()).unwrap();
        gauge.begin().unwrap();
        gauge.draw_gauge_data(30.0).unwrap();

        assert_eq!(gauge.draw_gauge_data(f32::NAN), Err(GaugeError::InvalidValue));
        assert_eq!(gauge.value(), 30.0);
    }

    #[test]
    fn needle_follows_value() {
        let mut display = mock_display();
        let mut gauge = CircularGauge::with_config(&mut display, 0, 100, small_dial()).unwrap();
        gauge.begin().unwrap();

        // Minimum: needle runs down-left along the 135° diagonal.
        gauge.draw_gauge_data(0.0).unwrap();
        assert_eq!(pixel(gauge.display(), 27, 37), Some(BinaryColor::On));
        assert_eq!(pixel(gauge.display(), 37, 37), Some(BinaryColor::Off));

        // Maximum: needle runs down-right along 45°, old needle cleared.
        gauge.draw_gauge_data(100.0).unwrap();
        assert_eq!(pixel(gauge.display(), 37, 37), Some(BinaryColor::On));
        assert_eq!(pixel(gauge.display(), 27, 37), Some(BinaryColor::Off));
    }

    #[test]
    fn stop_clears_flags() {
        let mut display = mock_display();
        let mut gauge = CircularGauge::with_config(&mut display, 0, 100, small_dial()).unwrap();
        gauge.begin().unwrap();
        gauge.draw_gauge_data(1.0).unwrap();

        gauge.stop();
        assert!(!gauge.is_active());
        assert!(!gauge.is_ready());
        assert_eq!(gauge.state(), GaugeState::Stopped);
        assert!(gauge.geometry().is_none());
        assert_eq!(gauge.draw_gauge_data(2.0), Err(GaugeError::NotInitialized));
    }

    #[test]
    fn stop_before_begin_is_safe() {
        let mut display = mock_display();
        let mut gauge = CircularGauge::with_config(&mut display, 0, 100, small_dial()).unwrap();
        gauge.stop();
        gauge.stop();
        assert!(!gauge.is_active());
        assert_eq!(gauge.state(), GaugeState::NotStarted);
    }

    #[test]
    fn begin_after_stop_restarts() {
        let mut display = mock_display();
        let mut gauge = CircularGauge::with_config(&mut display, 0, 100, small_dial()).unwrap();
        gauge.begin().unwrap();
        gauge.stop();

        gauge.begin().unwrap();
        assert_eq!(gauge.state(), GaugeState::Ready);
        gauge.draw_gauge_data(75.0).unwrap();
        assert!(gauge.is_active());
    }

    #[test]
    fn display_reference_is_stable() {
        let mut display = mock_display();
        let expected: *const MockDisplay<BinaryColor> = &display;
        let mut gauge = CircularGauge::with_config(&mut display, 0, 100, small_dial()).unwrap();

        let first: *const MockDisplay<BinaryColor> = gauge.display_mut();
        let second: *const MockDisplay<BinaryColor> = gauge.display_mut();
        assert!(core::ptr::eq(first, second));
        assert!(core::ptr::eq(first, expected));
        assert!(core::ptr::eq(gauge.display(), expected));
    }

    #[test]
    fn render_time_is_not_tracked_by_default() {
        let mut display = mock_display();
        let mut gauge = CircularGauge::with_config(&mut display, 0, 100, small_dial()).unwrap();
        gauge.begin().unwrap();
        gauge.draw_gauge_data(5.0).unwrap();
        assert!(!gauge.tracks_render_time());
        assert!(gauge.render_stats().is_none());
    }

    #[test]
    fn render_time_is_recorded_per_frame() {
        let mut display = mock_display();
        let mut gauge =
            CircularGauge::with_render_time(&mut display, 0, 100, small_dial(), StepClock::new(250))
                .unwrap();
        gauge.begin().unwrap();

        gauge.draw_gauge_data(10.0).unwrap();
        gauge.draw_gauge_data(20.0).unwrap();

        let stats = gauge.render_stats().unwrap();
        assert_eq!(stats.frames, 2);
        assert_eq!(stats.last_micros, 250);
        assert_eq!(stats.max_micros, 250);
        assert_eq!(stats.average_micros(), 250);
    }

    #[test]
    fn render_time_overlay_is_drawn() {
        let mut display = mock_display();
        let mut gauge =
            CircularGauge::with_render_time(&mut display, 0, 100, small_dial(), StepClock::new(42))
                .unwrap();
        gauge.begin().unwrap();
        gauge.draw_gauge_data(0.0).unwrap();
        drop(gauge);

        // Top-left strip outside the dial only holds the overlay.
        let overlay_lit = (0..(4 * RENDER_TIME_CHARS as i32))
            .flat_map(|x| (0..3).map(move |y| Point::new(x, y)))
            .filter(|p| display.get_pixel(*p) == Some(BinaryColor::On))
            .count();
        assert!(overlay_lit > 0);
    }

    #[test]
    fn tracking_does_not_change_the_dial() {
        let mut plain = mock_display();
        {
            let mut gauge = CircularGauge::with_config(&mut plain, 0, 100, small_dial()).unwrap();
            gauge.begin().unwrap();
            gauge.draw_gauge_data(60.0).unwrap();
        }

        let mut timed = mock_display();
        {
            let mut gauge =
                CircularGauge::with_render_time(&mut timed, 0, 100, small_dial(), StepClock::new(7))
                    .unwrap();
            gauge.begin().unwrap();
            gauge.draw_gauge_data(60.0).unwrap();
        }

        let dial = DialGeometry::compute(&small_dial()).unwrap().bounding_box;
        let overlay = render_time_area(Point::zero());
        for p in dial.points() {
            if !overlay.contains(p) {
                assert_eq!(plain.get_pixel(p), timed.get_pixel(p), "pixel {:?} differs", p);
            }
        }
    }

    #[test]
    fn draw_errors_propagate() {
        struct Broken;

        impl OriginDimensions for Broken {
            fn size(&self) -> Size {
                Size::new(64, 64)
            }
        }

        impl DrawTarget for Broken {
            type Color = BinaryColor;
            type Error = &'static str;

            fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
            where
                I: IntoIterator<Item = Pixel<Self::Color>>,
            {
                Err("bus fault")
            }
        }

        let mut display = Broken;
        let mut gauge = CircularGauge::with_config(&mut display, 0, 100, small_dial()).unwrap();
        gauge.begin().unwrap();
        assert_eq!(gauge.draw_gauge_data(50.0), Err(GaugeError::Draw("bus fault")));
        assert_eq!(gauge.state(), GaugeState::Ready);
        assert_eq!(gauge.value(), 0.0);
    }

    /// 128×64 frame buffer that ignores pixels off the panel.
    struct Canvas {
        pixels: [[bool; 128]; 64],
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            Size::new(128, 64)
        }
    }

    impl DrawTarget for Canvas {
        type Color = BinaryColor;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(p, color) in pixels {
                if let (Ok(x), Ok(y)) = (usize::try_from(p.x), usize::try_from(p.y)) {
                    if x < 128 && y < 64 {
                        self.pixels[y][x] = color.is_on();
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn wide_values_leave_nothing_outside_the_dial() {
        let mut canvas = Canvas {
            pixels: [[false; 128]; 64],
        };
        let dial = DialGeometry::compute(&GaugeConfig::default())
            .unwrap()
            .bounding_box;

        {
            let mut gauge = CircularGauge::new(&mut canvas, -1_000_000_000, 1_000_000_000).unwrap();
            gauge.begin().unwrap();
            gauge.draw_gauge_data(-1e9).unwrap();
            gauge.draw_gauge_data(0.0).unwrap();
        }

        for (y, row) in canvas.pixels.iter().enumerate() {
            for (x, &lit) in row.iter().enumerate() {
                let p = Point::new(x as i32, y as i32);
                assert!(!lit || dial.contains(p), "stale pixel {:?} outside dial", p);
            }
        }
    }
}
