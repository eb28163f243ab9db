//! **swaytab** — an alt-tab window switcher with live thumbnails for sway.
//!
//! One invocation runs one switching session: the windows of the currently
//! focused workspace are read from the sway tree, each one is captured with
//! `grim` (briefly focusing it so the compositor paints real pixels), and an
//! overlay strip of thumbnails lets the user cycle with Tab / the arrow keys
//! and pick a window with Enter or by releasing Alt.
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::WindowManager`] — abstracts the tree query, focus commands,
//!   and overlay placement so the switching logic is not coupled to sway's
//!   IPC socket.
//! * [`traits::CaptureBackend`] — abstracts the screenshot step so a backend
//!   that can read occluded window buffers can skip the focus-steal that
//!   capture-by-geometry requires.
//!
//! Concrete implementations live in [`sway`] (i3-compatible IPC) and
//! [`capture`] (`grim`).  [`switcher`] stitches tree reading, workspace
//! filtering, and thumbnail capture into a [`session::SwitcherSession`],
//! which the GTK overlay in [`overlay`] drives to completion.

pub mod capture;
pub mod cli;
pub mod commit;
pub mod config;
pub mod instance;
pub mod notify;
pub mod overlay;
pub mod picker;
pub mod session;
pub mod sway;
pub mod switcher;
pub mod traits;
pub mod tree;
