//! Value range of a gauge.

/// Inclusive `[min, max]` range a gauge displays.
///
/// Always non-empty: [`GaugeRange::new()`] rejects `min >= max`, so
/// [`fraction()`](Self::fraction) never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GaugeRange {
    min: i32,
    max: i32,
}

impl GaugeRange {
    /// Build a range, returning `None` unless `min < max`.
    pub fn new(min: i32, max: i32) -> Option<Self> {
        if min < max {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Lower bound (inclusive).
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound (inclusive).
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Width of the range as a float.
    pub fn span(&self) -> f32 {
        // i64 avoids overflow for ranges like [i32::MIN, i32::MAX].
        (self.max as i64 - self.min as i64) as f32
    }

    /// Limit `value` to `[min, max]`. Infinities clamp to the nearest bound.
    ///
    /// NaN is passed through unchanged; callers reject it beforehand.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min as f32, self.max as f32)
    }

    /// Position of `value` within the range, clamped to `[0.0, 1.0]`.
    pub fn fraction(&self, value: f32) -> f32 {
        let offset = self.clamp(value) - self.min as f32;
        (offset / self.span()).clamp(0.0, 1.0)
    }
}
