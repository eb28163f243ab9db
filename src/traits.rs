//! Core traits that decouple swaytab from sway and from `grim`.
//!
//! Every concrete backend (the sway IPC socket, the grim screenshot tool, a
//! test harness, …) implements one of these traits.  The orchestration in
//! [`switcher`](crate::switcher) and the overlay only depend on these
//! abstractions.

use crate::tree::{Node, Rect};
use std::path::Path;

/// Abstraction over a window manager that can report its tree, focus
/// windows, and place the switcher's own overlay window.
///
/// An implementation might talk to sway via IPC, or it might be a recording
/// stub used in tests.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Return the current layout tree.
    fn tree(&self) -> Result<Node, Self::Error>;

    /// Give focus to the window with the given container id.
    fn focus(&self, con_id: i64) -> Result<(), Self::Error>;

    /// Turn the window titled `title` into a borderless floating surface,
    /// centered and resized to `width` × `height` pixels.
    ///
    /// Used once per session to place the switcher overlay.  Addressing by
    /// title rather than id is deliberate: the overlay has not been seen in
    /// any tree query at the time this is issued.
    fn place_overlay(&self, title: &str, width: u32, height: u32) -> Result<(), Self::Error>;
}

/// Abstraction over the screenshot step of thumbnail capture.
///
/// The default backend captures by screen geometry and therefore only sees
/// composited pixels — the target window must be focused and on top.  A
/// backend that can read occluded window buffers directly should return
/// `false` from [`requires_focus`](CaptureBackend::requires_focus) and the
/// capture phase will skip the focus-steal entirely.
pub trait CaptureBackend {
    /// The error type produced by this backend.
    type Error: std::error::Error + Send + 'static;

    /// Whether the target window must be focused (composited on top) for
    /// [`capture`](CaptureBackend::capture) to see its real content.
    fn requires_focus(&self) -> bool;

    /// Capture the screen region `rect` into an image file at `dest`.
    fn capture(&self, rect: &Rect, dest: &Path) -> Result<(), Self::Error>;
}
