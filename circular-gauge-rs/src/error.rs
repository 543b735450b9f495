//! Error types for the gauge widget and the OLED display handle.

use core::fmt;

use display_interface::DisplayError;

/// Errors returned by [`CircularGauge`](crate::CircularGauge).
///
/// Generic over the draw target's error type so that drawing failures
/// surface unchanged through [`GaugeError::Draw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeError<E> {
    /// The value range is empty or inverted (`min >= max`).
    InvalidRange,
    /// The [`GaugeConfig`](crate::GaugeConfig) describes impossible geometry.
    InvalidConfig,
    /// The dial (or render-time overlay) extends past the display bounds.
    DoesNotFit,
    /// A value was drawn before [`begin()`](crate::CircularGauge::begin)
    /// or after [`stop()`](crate::CircularGauge::stop).
    NotInitialized,
    /// The value passed to `draw_gauge_data` was NaN.
    InvalidValue,
    /// The underlying draw target failed.
    Draw(E),
}

// Allow `?` directly on embedded-graphics draw calls.
impl<E> From<E> for GaugeError<E> {
    fn from(error: E) -> Self {
        GaugeError::Draw(error)
    }
}

impl<E: fmt::Debug> fmt::Display for GaugeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GaugeError::InvalidRange => write!(f, "Invalid range (min must be < max)"),
            GaugeError::InvalidConfig => write!(f, "Invalid gauge configuration"),
            GaugeError::DoesNotFit => write!(f, "Gauge does not fit on the display"),
            GaugeError::NotInitialized => write!(f, "Gauge not started"),
            GaugeError::InvalidValue => write!(f, "Gauge value is NaN"),
            GaugeError::Draw(e) => write!(f, "Draw error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for GaugeError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            GaugeError::InvalidRange => defmt::write!(f, "Invalid range"),
            GaugeError::InvalidConfig => defmt::write!(f, "Invalid config"),
            GaugeError::DoesNotFit => defmt::write!(f, "Does not fit"),
            GaugeError::NotInitialized => defmt::write!(f, "Not initialized"),
            GaugeError::InvalidValue => defmt::write!(f, "Invalid value"),
            GaugeError::Draw(e) => defmt::write!(f, "Draw error: {}", e),
        }
    }
}

/// Errors that can occur during OLED display operations.
///
/// The `ssd1306` crate wraps all underlying I2C bus errors into
/// [`DisplayError`], so this enum is non-generic.
#[derive(Debug)]
pub enum OledError {
    /// Display interface error (wraps I2C and other bus-level failures).
    Display(DisplayError),
    /// Display hardware did not respond to initialisation.
    InitializationFailed,
    /// The frame buffer was drawn to or flushed before
    /// [`OledDriver::init()`](crate::OledDriver::init) succeeded.
    NotInitialized,
}

impl From<DisplayError> for OledError {
    fn from(e: DisplayError) -> Self {
        OledError::Display(e)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OledError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::Display(_e) => defmt::write!(f, "Display interface error"),
            OledError::InitializationFailed => defmt::write!(f, "Initialization failed"),
            OledError::NotInitialized => defmt::write!(f, "Not initialized"),
        }
    }
}
