//! Commands for a running gauge loop and the per-tick scheduling decision.
//!
//! [`FrameScheduler`] holds the value waiting to reach the panel. A value
//! stays pending until [`flushed()`](FrameScheduler::flushed) confirms it,
//! so a failed draw or flush is retried on the next tick even when no new
//! command arrives.

/// Message sent to a running gauge update loop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GaugeCommand {
    /// Show a new value.
    Value(f32),
    /// Stop the gauge and end the loop.
    Stop,
}

/// What the update loop should do on this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickAction {
    /// Nothing to draw.
    Idle,
    /// Render and flush this value.
    Draw(f32),
    /// Stop the gauge and return.
    Stop,
}

/// Tracks the pending value and the last value that reached the panel.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameScheduler {
    pending: Option<f32>,
    last_flushed: Option<f32>,
}

impl FrameScheduler {
    /// Decide the action for one tick, given the command taken this tick.
    ///
    /// A new `Value` replaces any pending one. A pending value equal to
    /// the last flushed value is dropped without drawing.
    pub fn next(&mut self, command: Option<GaugeCommand>) -> TickAction {
        match command {
            Some(GaugeCommand::Stop) => return TickAction::Stop,
            Some(GaugeCommand::Value(v)) => self.pending = Some(v),
            None => {}
        }

        match self.pending {
            Some(v) if self.last_flushed == Some(v) => {
                self.pending = None;
                TickAction::Idle
            }
            Some(v) => TickAction::Draw(v),
            None => TickAction::Idle,
        }
    }

    /// Record that `value` is now on the panel.
    pub fn flushed(&mut self, value: f32) {
        self.last_flushed = Some(value);
        if self.pending == Some(value) {
            self.pending = None;
        }
    }

    /// Give up on the pending value (e.g. one the gauge rejects outright).
    pub fn discard(&mut self) {
        self.pending = None;
    }

    /// Value still waiting to reach the panel.
    pub fn pending(&self) -> Option<f32> {
        self.pending
    }
}
