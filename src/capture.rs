//! Thumbnail capture.
//!
//! Capture-by-geometry only sees composited pixels, so a window that is not
//! on top would come back stale or blank.  The capture phase therefore
//! briefly focuses each non-focused candidate, waits one settle delay for
//! the compositor to paint it, captures, and hands focus back to whichever
//! window held it immediately before the steal.  The rapid focus flicker
//! this causes is bounded by [`SETTLE_DELAY`] × candidate count.
//!
//! A backend whose [`requires_focus`](crate::traits::CaptureBackend::requires_focus)
//! is `false` (one that can read occluded window buffers) skips the whole
//! dance and capture becomes flicker-free.

use crate::traits::{CaptureBackend, WindowManager};
use crate::tree::{Rect, WindowRecord};
use image::imageops::FilterType;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, SystemTime};

/// Thumbnail bounding box, in pixels.  Aspect ratio is preserved.
pub const THUMB_MAX_WIDTH: u32 = 200;
pub const THUMB_MAX_HEIGHT: u32 = 165;

/// Pause between focusing a window and capturing it, so the compositor has
/// painted the newly raised surface.  Two-plus frames at 60 Hz.
pub const SETTLE_DELAY: Duration = Duration::from_millis(40);

/// A captured, normalized thumbnail on disk.
///
/// The owning [`SwitcherSession`](crate::session::SwitcherSession) is
/// responsible for deleting `path` when it closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRecord {
    /// Container id of the captured window.
    pub con_id: i64,
    /// Normalized image in the system temp directory.
    pub path: PathBuf,
    pub captured_at: SystemTime,
}

/// Errors from a single capture attempt.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("capture tool exited with {status}: {stderr}")]
    Tool {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("capture backend: {0}")]
    Backend(String),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// [`CaptureBackend`] that shells out to `grim`.
pub struct GrimCapture;

impl Default for GrimCapture {
    fn default() -> Self {
        Self
    }
}

impl GrimCapture {
    pub fn new() -> Self {
        Self
    }
}

impl CaptureBackend for GrimCapture {
    type Error = CaptureError;

    fn requires_focus(&self) -> bool {
        true
    }

    fn capture(&self, rect: &Rect, dest: &Path) -> Result<(), CaptureError> {
        let geometry = format!("{},{} {}x{}", rect.x, rect.y, rect.width, rect.height);
        let output = Command::new("grim")
            .arg("-g")
            .arg(&geometry)
            .arg(dest)
            .output()?;
        if !output.status.success() {
            return Err(CaptureError::Tool {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Capture every candidate in tree order.
///
/// `focused_id` is the window holding focus when the phase starts.  Windows
/// whose capture fails (focus command rejected, tool error, unreadable
/// image) are logged and dropped; the session simply proceeds without them.
pub fn capture_all<W, C>(
    wm: &W,
    backend: &C,
    windows: &[WindowRecord],
    focused_id: i64,
) -> Vec<(WindowRecord, ThumbnailRecord)>
where
    W: WindowManager,
    C: CaptureBackend,
{
    let mut entries = Vec::with_capacity(windows.len());
    // The window currently holding focus; each steal restores to it.
    let mut holder = focused_id;

    for window in windows {
        let steal = backend.requires_focus() && window.id != holder;
        if steal {
            if let Err(e) = wm.focus(window.id) {
                warn!("skipping window {}: focus for capture failed: {}", window.id, e);
                continue;
            }
            std::thread::sleep(SETTLE_DELAY);
        }

        let raw = capture_raw(backend, window);

        // Hand focus back before the (comparatively slow) resize, keeping
        // the visible steal as short as possible.
        if steal {
            if let Err(e) = wm.focus(holder) {
                warn!("restoring focus to {} failed: {}", holder, e);
                holder = window.id;
            }
        }

        let result = raw.and_then(|path| match shrink_in_place(&path) {
            Ok(()) => Ok(ThumbnailRecord {
                con_id: window.id,
                path,
                captured_at: SystemTime::now(),
            }),
            Err(e) => {
                let _ = std::fs::remove_file(&path);
                Err(e)
            }
        });

        match result {
            Ok(thumb) => {
                debug!("captured {} -> {}", window.id, thumb.path.display());
                entries.push((window.clone(), thumb));
            }
            Err(e) => warn!("skipping window {} ({}): {}", window.id, window.title, e),
        }
    }
    entries
}

/// Capture one window's raw screenshot into a fresh temp file.
///
/// The temp file is removed again if the capture fails, so only successful
/// captures ever own a path.
fn capture_raw<C: CaptureBackend>(
    backend: &C,
    window: &WindowRecord,
) -> Result<PathBuf, CaptureError> {
    let file = tempfile::Builder::new()
        .prefix("swaytab-")
        .suffix(".png")
        .tempfile()?;
    // Detach from tempfile's auto-delete: deletion is session-owned.
    let (_, path) = file.keep().map_err(|e| CaptureError::Io(e.error))?;

    match backend.capture(&window.rect, &path) {
        Ok(()) => Ok(path),
        Err(e) => {
            let _ = std::fs::remove_file(&path);
            Err(CaptureError::Backend(e.to_string()))
        }
    }
}

/// Resize the image at `path` to fit the thumbnail bounding box, keeping
/// aspect ratio, overwriting the file.
fn shrink_in_place(path: &Path) -> Result<(), CaptureError> {
    let img = image::open(path)?;
    img.resize(THUMB_MAX_WIDTH, THUMB_MAX_HEIGHT, FilterType::Lanczos3)
        .save(path)?;
    Ok(())
}

//  Tests
