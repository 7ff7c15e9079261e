//! Application configuration.
//!
//! - `pressure`: Pressure range, history depth, gauge selection and timing constants
//! - `layout`: Display dimensions and pre-computed gauge geometry
//! - `settings`: Runtime [`Settings`] chosen once at boot

pub mod layout;
pub mod pressure;
pub mod settings;

// Re-export pressure constants at config level for convenience
pub use pressure::{
    BOARD_PRESSURE_OFFSET_PA,
    DEFAULT_ELEVATION_M,
    GAUGE_COUNT,
    GAUGE_SLOTS,
    HISTORY_SLOTS,
    MAX_PRESSURE_HPA,
    MIN_PRESSURE_HPA,
    POLL_INTERVAL_MS,
    RETRY_DELAY_MS,
    SCALE_LENGTH,
    SEED_HISTORY,
    SETTLE_DELAY_MS,
};
// Re-export layout constants at config level for convenience
pub use layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
pub use settings::{Cadence, ConfigError, FirstRun, GaugeSlots, PressureRange, Settings, TemperatureUnit};
