//! Frame rendering.
//!
//! Stateless functions that draw a dial (or the render-time overlay) into
//! any `embedded-graphics` [`DrawTarget`] with [`BinaryColor`] pixels. They
//! only touch the frame buffer; flushing to hardware is the caller's job.

use core::fmt::Write;

use embedded_graphics::{
    geometry::Angle,
    mono_font::{
        ascii::{FONT_4X6, FONT_6X10},
        MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Arc, Circle, Line, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder},
};
use heapless::String;

use crate::config::GaugeConfig;
use crate::geometry::{value_angle_deg, DialGeometry};
use crate::range::GaugeRange;

/// Value arcs narrower than this are skipped.
const MIN_ARC_SWEEP_DEG: f32 = 1.0;

/// Width of the render-time overlay in characters (`"9999us"`).
pub const RENDER_TIME_CHARS: usize = 6;

/// Region cleared before each render-time overlay is drawn.
pub fn render_time_area(origin: Point) -> Rectangle {
    let glyph = FONT_4X6.character_size;
    Rectangle::new(
        origin,
        Size::new(glyph.width * RENDER_TIME_CHARS as u32, glyph.height),
    )
}

fn centered() -> TextStyle {
    TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build()
}

/// Draw one full gauge frame for `value`.
///
/// The dial's bounding box is cleared first, so stale needle positions
/// never survive a redraw. Text is clipped to the same box.
///
/// # Layout
///
/// ```text
///  outer track arc + tick marks
///   └─ value arc, start angle → value angle
///       └─ needle from the hub towards the value
///  numeric value centred in the gap below the hub
///  optional min / max labels just inside the first and last tick
/// ```
pub fn render_gauge<D>(
    display: &mut D,
    geometry: &DialGeometry,
    config: &GaugeConfig,
    range: &GaugeRange,
    value: f32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let thin = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    let start = Angle::from_degrees(config.start_angle_deg);

    display.fill_solid(&geometry.bounding_box, BinaryColor::Off)?;

    // ── Static dial ──────────────────────────────────────────────────
    Arc::with_center(
        geometry.center,
        config.diameter,
        start,
        Angle::from_degrees(config.sweep_angle_deg),
    )
    .into_styled(thin)
    .draw(display)?;

    for tick in &geometry.ticks {
        Line::new(tick.inner, tick.outer)
            .into_styled(thin)
            .draw(display)?;
    }

    // ── Value arc ────────────────────────────────────────────────────
    let fraction = range.fraction(value);
    let value_sweep = config.sweep_angle_deg * fraction;
    if value_sweep >= MIN_ARC_SWEEP_DEG {
        Arc::with_center(
            geometry.center,
            geometry.value_arc_diameter,
            start,
            Angle::from_degrees(value_sweep),
        )
        .into_styled(PrimitiveStyle::with_stroke(
            BinaryColor::On,
            config.value_arc_width,
        ))
        .draw(display)?;
    }

    // ── Needle ───────────────────────────────────────────────────────
    let tip = geometry.needle_tip(value_angle_deg(config, fraction));
    Line::new(geometry.center, tip)
        .into_styled(thin)
        .draw(display)?;
    Circle::with_center(geometry.center, config.hub_diameter)
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display)?;

    // ── Text ─────────────────────────────────────────────────────────
    // Clipped to the dial so the next clear removes every glyph pixel.
    let mut dial = display.clipped(&geometry.bounding_box);
    let mut buf: String<16> = String::new();
    // core::fmt::Write — works in no_std without alloc.
    let _ = write!(buf, "{:.*}", config.value_decimals as usize, range.clamp(value));
    Text::with_text_style(
        buf.as_str(),
        geometry.value_text_anchor,
        MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
        centered(),
    )
    .draw(&mut dial)?;

    if config.show_range_labels {
        let label_style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
        for (bound, anchor) in [
            (range.min(), geometry.min_label_anchor),
            (range.max(), geometry.max_label_anchor),
        ] {
            let mut label: String<12> = String::new();
            let _ = write!(label, "{}", bound);
            Text::with_text_style(label.as_str(), anchor, label_style, centered())
                .draw(&mut dial)?;
        }
    }

    Ok(())
}

/// Overlay a render time at `origin`, as `NNNNus` below 10 ms and `NNNNms`
/// above (saturating at `9999ms`).
pub fn render_elapsed<D>(display: &mut D, origin: Point, micros: u64) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    display.fill_solid(&render_time_area(origin), BinaryColor::Off)?;

    let mut buf: String<RENDER_TIME_CHARS> = String::new();
    let _ = if micros < 10_000 {
        write!(buf, "{}us", micros)
    } else {
        write!(buf, "{}ms", (micros / 1000).min(9999))
    };

    Text::with_baseline(
        buf.as_str(),
        origin,
        MonoTextStyle::new(&FONT_4X6, BinaryColor::On),
        Baseline::Top,
    )
    .draw(display)?;

    Ok(())
}
