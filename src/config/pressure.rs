//! Pressure scale, history and timing constants.
//!
//! Pressures in the history are whole hectopascals (hPa == mbar). Live
//! readings travel through the firmware as integer pascals, which are
//! hundredths of a millibar.

// =============================================================================
// Display Range
// =============================================================================

/// Lowest pressure the gauge scales can show (maps to gauge unit 0).
pub const MIN_PRESSURE_HPA: i16 = 997;

/// Highest pressure the gauge scales can show (maps to gauge unit 100).
pub const MAX_PRESSURE_HPA: i16 = 1036;

/// Length of every gauge scale in display units.
pub const SCALE_LENGTH: i16 = 100;

// =============================================================================
// History
// =============================================================================

/// Number of one-hour slots kept in the pressure history ("now" plus ten hours back).
pub const HISTORY_SLOTS: usize = 11;

/// Synthetic history used until real hourly samples replace it.
///
/// Index 0 is the newest slot. The values climb across the display range so
/// the gauges show a sensible staircase right after power-on.
pub const SEED_HISTORY: [i16; HISTORY_SLOTS] = [999, 1003, 1006, 1010, 1014, 1018, 1021, 1025, 1029, 1032, 1036];

// =============================================================================
// Gauges
// =============================================================================

/// Number of needle gauges on the display.
pub const GAUGE_COUNT: usize = 6;

/// History slots shown by the gauges, left to right: -10h, -8h, -6h, -3h, -1h, now.
pub const GAUGE_SLOTS: [usize; GAUGE_COUNT] = [10, 8, 6, 3, 1, 0];

// =============================================================================
// Timing
// =============================================================================

/// Delay between two polling cycles.
pub const POLL_INTERVAL_MS: u64 = 5_000;

/// Settle time after the throw-away first sensor read.
pub const SETTLE_DELAY_MS: u32 = 1_000;

/// Wait before re-reading a sensor that returned an implausible value.
pub const RETRY_DELAY_MS: u32 = 1_000;

// =============================================================================
// Sensor Correction
// =============================================================================

/// Station elevation used for sea-level correction, in metres.
pub const DEFAULT_ELEVATION_M: f32 = 162.0;

/// Fixed correction for the BMP280 breakout board (-2.0 mbar).
pub const BOARD_PRESSURE_OFFSET_PA: i32 = -200;

/// Plausible station pressure window (BME280 operating range, 300..1100 hPa).
pub const PLAUSIBLE_PRESSURE_PA: (f32, f32) = (30_000.0, 110_000.0);

/// Plausible ambient temperature window in degrees Celsius.
pub const PLAUSIBLE_TEMPERATURE_C: (f32, f32) = (-40.0, 85.0);

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_increasing_and_in_range() {
        for pair in SEED_HISTORY.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(SEED_HISTORY.iter().all(|&p| (MIN_PRESSURE_HPA..=MAX_PRESSURE_HPA).contains(&p)));
    }

    #[test]
    fn test_gauge_slots_fit_history() {
        assert!(GAUGE_SLOTS.iter().all(|&slot| slot < HISTORY_SLOTS));
        assert_eq!(GAUGE_SLOTS[GAUGE_COUNT - 1], 0, "Rightmost gauge shows 'now'");
    }
}
