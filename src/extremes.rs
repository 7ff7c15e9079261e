//! Lifetime pressure extremes for the live trend bar.
//!
//! Tracks the lowest and highest corrected reading since power-on. The range
//! only ever widens.

/// Running minimum and maximum of the corrected pressure, in pascals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunningExtremes {
    bounds: Option<(i32, i32)>,
}

impl RunningExtremes {
    #[must_use]
    pub const fn new() -> Self {
        Self { bounds: None }
    }

    /// Fold a reading into the extremes. Returns `true` if the range widened.
    pub fn observe(
        &mut self,
        pa: i32,
    ) -> bool {
        match self.bounds {
            None => {
                self.bounds = Some((pa, pa));
                true
            }
            Some((min, max)) if pa < min => {
                self.bounds = Some((pa, max));
                true
            }
            Some((min, max)) if pa > max => {
                self.bounds = Some((min, pa));
                true
            }
            Some(_) => false,
        }
    }

    #[inline]
    #[must_use]
    pub fn min(&self) -> Option<i32> {
        self.bounds.map(|(min, _)| min)
    }

    #[inline]
    #[must_use]
    pub fn max(&self) -> Option<i32> {
        self.bounds.map(|(_, max)| max)
    }

    /// Place `pa` on a bar of `length` pixels spanning the extremes.
    ///
    /// Returns the centre while the extremes are still a single value, and
    /// `None` before anything was observed. Readings outside the extremes
    /// are pinned to the bar ends.
    #[must_use]
    pub fn indicator_position(
        &self,
        pa: i32,
        length: u32,
    ) -> Option<u32> {
        let (min, max) = self.bounds?;
        if max == min {
            return Some(length / 2);
        }
        let offset = i64::from(pa.clamp(min, max) - min);
        let span = i64::from(max - min);
        Some((offset * i64::from(length) / span) as u32)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
