//! Colors and pre-computed text styles shared by all widgets.

pub mod colors;
pub mod styles;
