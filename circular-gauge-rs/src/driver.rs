//! OLED display handle wrapping the `ssd1306` crate in async buffered
//! graphics mode.
//!
//! [`OledDriver`] is the concrete display a [`CircularGauge`] usually
//! borrows: it implements [`DrawTarget`] over its frame buffer, so the
//! gauge renders without I2C traffic and the caller flushes afterwards.
//!
//! [`CircularGauge`]: crate::CircularGauge

use display_interface_i2c::I2CInterface;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use embedded_hal_async::i2c::I2c;
use ssd1306::{
    mode::BufferedGraphicsModeAsync, prelude::*, I2CDisplayInterface, Ssd1306Async,
};

use crate::error::OledError;

/// Concrete display type used internally by [`OledDriver`].
type Display<I2C> = Ssd1306Async<
    I2CInterface<I2C>,
    DisplaySize128x64,
    BufferedGraphicsModeAsync<DisplaySize128x64>,
>;

/// Panel width in pixels.
pub const OLED_WIDTH: u32 = 128;
/// Panel height in pixels.
pub const OLED_HEIGHT: u32 = 64;

/// Async driver for a 128×64 monochrome OLED over I2C.
///
/// # Lifecycle
///
/// 1. [`OledDriver::new()`] — constructs the driver without any I2C traffic.
/// 2. [`OledDriver::init()`] — sends the controller initialisation sequence.
/// 3. Draw into the frame buffer through the [`DrawTarget`] impl, usually
///    via a [`CircularGauge`](crate::CircularGauge).
/// 4. [`OledDriver::flush()`] — transfers the frame buffer to hardware.
///
/// # Example
///
/// ```no_run
/// use circular_gauge_rs::{CircularGauge, OledDriver};
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// let mut oled = OledDriver::new(i2c, 0x3C);
/// oled.init().await.unwrap();
///
/// let mut gauge = CircularGauge::new(&mut oled, 0, 100).unwrap();
/// gauge.begin().unwrap();
/// gauge.draw_gauge_data(72.5).unwrap();
/// gauge.display_mut().flush().await.unwrap();
/// # }
/// ```
pub struct OledDriver<I2C> {
    display: Display<I2C>,
    /// Set to `true` after a successful `init()` call.
    initialized: bool,
}

impl<I2C> OledDriver<I2C>
where
    I2C: I2c,
{
    /// Construct an uninitialised driver.
    ///
    /// No I2C traffic is generated. You **must** call [`init()`](Self::init)
    /// before drawing or flushing.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access).
    /// * `address` — 7-bit I2C device address (typically `0x3C` or `0x3D`).
    pub fn new(i2c: I2C, address: u8) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let display = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Self {
            display,
            initialized: false,
        }
    }

    /// Initialise the panel.
    ///
    /// Sends the initialisation command sequence over I2C. Calling it again
    /// after a success re-sends the sequence, which the controller accepts.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::InitializationFailed`] if the display does not
    /// respond.
    pub async fn init(&mut self) -> Result<(), OledError> {
        self.display
            .init()
            .await
            .map_err(|_| OledError::InitializationFailed)?;
        self.initialized = true;
        Ok(())
    }

    /// Clear the in-memory frame buffer.
    ///
    /// Does **not** send any I2C traffic.
    pub fn clear_buffer(&mut self) {
        self.display.clear_buffer();
    }

    /// Transfer the frame buffer to the display via I2C.
    ///
    /// At 400 kHz I2C this takes approximately 20 ms for a full 1024-byte
    /// frame.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::NotInitialized`] if [`init()`](Self::init) has
    /// not succeeded, or [`OledError::Display`] on a bus-level failure.
    pub async fn flush(&mut self) -> Result<(), OledError> {
        if !self.initialized {
            return Err(OledError::NotInitialized);
        }
        self.display.flush().await?;
        Ok(())
    }

    /// Check whether the display has been successfully initialised.
    ///
    /// No I2C traffic is generated.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl<I2C> OriginDimensions for OledDriver<I2C> {
    fn size(&self) -> Size {
        Size::new(OLED_WIDTH, OLED_HEIGHT)
    }
}

impl<I2C> DrawTarget for OledDriver<I2C>
where
    I2C: I2c,
{
    type Color = BinaryColor;
    type Error = OledError;

    /// Writes into the frame buffer only; nothing is sent until `flush()`.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::NotInitialized`] before [`init()`](Self::init).
    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        if !self.initialized {
            return Err(OledError::NotInitialized);
        }
        self.display.draw_iter(pixels)?;
        Ok(())
    }
}
