//! The interactive thumbnail overlay.
//!
//! When the `overlay-gtk` feature is enabled, [`gtk::run_overlay`] takes
//! over the main thread with the GLib main loop and drives an opened
//! session to its committed end.

#[cfg(feature = "overlay-gtk")]
pub mod gtk;
