//! Optional per-frame render time measurement.
//!
//! A gauge built with [`CircularGauge::with_render_time()`] reads a
//! [`RenderClock`] before and after drawing each frame, keeps running
//! [`RenderStats`], and overlays the last measurement on the display.
//!
//! [`CircularGauge::with_render_time()`]: crate::CircularGauge::with_render_time

/// Monotonic microsecond time source.
pub trait RenderClock {
    /// Current time in microseconds. Only differences are used.
    fn now_micros(&self) -> u64;
}

/// Placeholder clock for gauges that do not track render time.
///
/// Never read: gauges built without a clock store `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClock;

impl RenderClock for NoClock {
    fn now_micros(&self) -> u64 {
        0
    }
}

/// Clock backed by the Embassy time driver.
#[cfg(feature = "task")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "task")]
impl RenderClock for EmbassyClock {
    fn now_micros(&self) -> u64 {
        embassy_time::Instant::now().as_micros()
    }
}

/// Running render time statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderStats {
    /// Frames measured so far.
    pub frames: u32,
    /// Duration of the most recent frame.
    pub last_micros: u64,
    /// Slowest frame seen.
    pub max_micros: u64,
    /// Sum of all frame durations (saturating).
    pub total_micros: u64,
}

impl RenderStats {
    /// Record one frame.
    pub fn record(&mut self, micros: u64) {
        self.frames = self.frames.saturating_add(1);
        self.last_micros = micros;
        self.max_micros = self.max_micros.max(micros);
        self.total_micros = self.total_micros.saturating_add(micros);
    }

    /// Mean frame duration, or `0` before the first frame.
    pub fn average_micros(&self) -> u64 {
        if self.frames == 0 {
            0
        } else {
            self.total_micros / self.frames as u64
        }
    }
}
