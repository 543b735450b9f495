//! Gauge lifecycle state.

/// Lifecycle of a [`CircularGauge`](crate::CircularGauge).
///
/// ```text
///  NotStarted ──begin()──► Ready ──draw_gauge_data()──► Active
///                           ▲                              │
///                           └──begin()── Stopped ◄─stop()──┘
/// ```
///
/// `stop()` from `Ready` also leads to `Stopped`; `stop()` from
/// `NotStarted` is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GaugeState {
    /// Constructed, `begin()` not yet called.
    #[default]
    NotStarted,
    /// Geometry computed, nothing drawn yet.
    Ready,
    /// At least one frame drawn since the last `begin()`.
    Active,
    /// Stopped; geometry released until the next `begin()`.
    Stopped,
}

impl GaugeState {
    /// `true` while values can be drawn.
    pub fn is_ready(&self) -> bool {
        matches!(self, GaugeState::Ready | GaugeState::Active)
    }

    /// `true` once the gauge has drawn and has not been stopped.
    pub fn is_active(&self) -> bool {
        matches!(self, GaugeState::Active)
    }
}
