//! Gauge update task.
//!
//! Contains the [`gauge_update_task`] async function that periodically
//! takes the latest [`GaugeCommand`] from an Embassy [`Signal`], renders it
//! with a [`CircularGauge`], and flushes changed frames to the OLED
//! hardware.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;

use crate::command::{FrameScheduler, GaugeCommand, TickAction};
use crate::config::GaugeConfig;
use crate::driver::OledDriver;
use crate::error::GaugeError;
use crate::gauge::CircularGauge;
use crate::render_time::{EmbassyClock, RenderClock};

/// Signal type the task reads commands from.
pub type GaugeSignal = Signal<CriticalSectionRawMutex, GaugeCommand>;

// ── Gauge update task ────────────────────────────────────────────────────

/// Periodic gauge update loop.
///
/// This is a regular `async fn` — **not** an Embassy `#[task]`. Callers
/// should create a thin, concrete task wrapper that calls this function,
/// since Embassy tasks cannot be generic:
///
/// ```ignore
/// static GAUGE: GaugeSignal = Signal::new();
///
/// #[embassy_executor::task]
/// async fn gauge_task(driver: OledDriver<MyConcreteI2cType>) {
///     gauge_update_task(driver, 0, 100, GaugeConfig::default(), true, &GAUGE).await;
/// }
///
/// // Elsewhere:
/// GAUGE.signal(GaugeCommand::Value(42.0));
/// ```
///
/// # Control flow
///
/// 1. Initialise the display hardware, build the gauge (timed with
///    [`EmbassyClock`] when `include_render_time` is set) and `begin()` it.
/// 2. Loop at `config.update_frequency_hz`:
///    - **Step 1** — Take the latest command, if any, and let the
///      [`FrameScheduler`] decide. Older commands that were overwritten
///      before this tick are never seen.
///    - **Step 2** — `Stop`: stop the gauge and return.
///    - **Step 3** — Render the pending value into the frame buffer (no I2C).
///      Values equal to the last flushed one were already dropped.
///    - **Step 4** — Flush frame buffer to hardware (~20 ms I2C), then mark
///      the value flushed. Until then it stays pending and is retried.
///
/// # Errors
///
/// * Initialisation, construction or `begin()` failure: logs the error and
///   **returns** (task exits).
/// * Render / flush failure: logs the error and retries the same value on
///   the next cycle. A NaN value is logged and dropped.
#[allow(clippy::needless_pass_by_value)] // config is small and consumed
pub async fn gauge_update_task<I2C>(
    mut driver: OledDriver<I2C>,
    min: i32,
    max: i32,
    config: GaugeConfig,
    include_render_time: bool,
    commands: &'static GaugeSignal,
) where
    I2C: I2c,
{
    // ── Initialisation ───────────────────────────────────────────────
    if let Err(_e) = driver.init().await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED init failed: {}", _e);
        return;
    }

    #[cfg(feature = "defmt")]
    defmt::info!("OLED initialised");

    // Blank the whole panel once; the gauge only redraws its own region.
    driver.clear_buffer();

    let period = Duration::from_millis(config.update_period_ms());
    let clock = include_render_time.then_some(EmbassyClock);

    let mut gauge = match CircularGauge::build(&mut driver, min, max, config, clock) {
        Ok(gauge) => gauge,
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::error!("Gauge construction failed: {}", _e);
            return;
        }
    };

    if let Err(_e) = gauge.begin() {
        #[cfg(feature = "defmt")]
        defmt::error!("Gauge begin failed: {}", _e);
        return;
    }

    run_gauge(&mut gauge, period, commands).await;
}

/// Main loop, split out so it is generic over the render clock.
async fn run_gauge<I2C, C>(
    gauge: &mut CircularGauge<'_, OledDriver<I2C>, C>,
    period: Duration,
    commands: &'static GaugeSignal,
) where
    I2C: I2c,
    C: RenderClock,
{
    let mut frames = FrameScheduler::default();

    loop {
        Timer::after(period).await;

        // ── Step 1: take the latest command ──────────────────────────
        let value = match frames.next(commands.try_take()) {
            TickAction::Idle => continue,
            // ── Step 2: stop ─────────────────────────────────────────
            TickAction::Stop => {
                gauge.stop();
                return;
            }
            TickAction::Draw(v) => v,
        };

        // ── Step 3: render to frame buffer (no I2C) ──────────────────
        match gauge.draw_gauge_data(value) {
            Ok(()) => {}
            Err(GaugeError::Draw(_e)) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Render failed: {}", _e);
                continue;
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Value rejected: {}", _e);
                frames.discard();
                continue;
            }
        }

        // ── Step 4: flush to hardware (~20 ms I2C) ───────────────────
        if let Err(_e) = gauge.display_mut().flush().await {
            #[cfg(feature = "defmt")]
            defmt::error!("Flush failed: {}", _e);
            continue;
        }

        frames.flushed(value);

        #[cfg(feature = "defmt")]
        if let Some(stats) = gauge.render_stats() {
            defmt::trace!("frame rendered in {} us", stats.last_micros);
        }
    }
}

// Scheduling decisions made by this loop are tested in command.rs.
