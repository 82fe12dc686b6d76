//! # Rendering Module
//!
//! The draw-surface contract, the screen-space UI built on it and the macroquad
//! display that implements it.

pub mod display;
pub mod surface;
pub mod ui;

pub use display::*;
pub use surface::*;
pub use ui::*;
