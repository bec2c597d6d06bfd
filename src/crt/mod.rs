//! Raster output devices.
//!
//! A device is notified once per CPU cycle with the current value of X
//! (the sprite position) and decides what to draw:
//! - [`Crt`] - the handheld's 40×6 screen
//! - [`NullDevice`] - ignores every notification
//! - [`LoggingDevice`] - logs notifications, then forwards them

mod device;
mod screen;

pub use device::{RasterDevice, NullDevice, LoggingDevice};
pub use screen::{Crt, WIDTH, HEIGHT, LIT, DARK};
