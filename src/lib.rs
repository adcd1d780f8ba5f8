//! Full-screen zoom overlay for images in a web page.
//!
//! Double-tapping (or double-clicking) an image inside a `.zoomable` container
//! opens it in a shared overlay, where wheel and pinch gestures zoom it
//! between [`MIN_SCALE`] and [`MAX_SCALE`]. [`ZoomController`] holds the state
//! machine and is platform neutral; [`dom`] drives it from `web-sys`.

pub mod binding;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod host;
pub mod state;
mod util;

pub use config::ZoomConfig;
pub use controller::{ClickTarget, ZoomController};
pub use dom::{setup_from_window, setup_with_config, setup_zoomable_images, SharedController, ZoomHandle};
pub use error::ZoomError;
pub use geometry::{MAX_SCALE, MIN_SCALE};
pub use host::Host;
