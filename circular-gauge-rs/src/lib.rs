//! Circular gauge widget for monochrome OLED displays.
//!
//! This crate provides [`CircularGauge`], which renders a value as an arc,
//! a needle and a numeric readout on any `embedded-graphics`
//! [`DrawTarget`] with [`BinaryColor`] pixels, and [`OledDriver`], an async
//! SSD1306 128×64 I2C display the gauge can draw into directly. With the
//! `task` feature, `gauge_update_task` runs the whole loop on Embassy.
//!
//! # Quick Start
//!
//! ```ignore
//! use circular_gauge_rs::{CircularGauge, OledDriver};
//!
//! let mut oled = OledDriver::new(i2c, 0x3C);
//! oled.init().await?;
//!
//! let mut gauge = CircularGauge::new(&mut oled, 0, 100)?;
//! gauge.begin()?;
//! loop {
//!     gauge.draw_gauge_data(read_sensor())?;
//!     gauge.display_mut().flush().await?;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`](https://docs.rs/defmt).
//! - **`task`** — `gauge_update_task` and `EmbassyClock`, using
//!   `embassy-sync` and `embassy-time`.
//!
//! [`DrawTarget`]: embedded_graphics::draw_target::DrawTarget
//! [`BinaryColor`]: embedded_graphics::pixelcolor::BinaryColor

#![no_std]

pub mod command;
pub mod config;
pub mod driver;
pub mod error;
pub mod gauge;
#[cfg(feature = "task")]
pub mod gauge_task;
pub mod geometry;
pub mod range;
pub mod render;
pub mod render_time;
pub mod state;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use command::{FrameScheduler, GaugeCommand, TickAction};
pub use config::GaugeConfig;
pub use driver::OledDriver;
pub use error::{GaugeError, OledError};
pub use gauge::CircularGauge;
#[cfg(feature = "task")]
pub use gauge_task::{gauge_update_task, GaugeSignal};
pub use range::GaugeRange;
#[cfg(feature = "task")]
pub use render_time::EmbassyClock;
pub use render_time::{NoClock, RenderClock, RenderStats};
pub use state::GaugeState;
