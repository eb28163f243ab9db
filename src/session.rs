//! In-memory session model and its state machine.
//!
//! A session moves through `Building → Open → Closed`, exactly once each.
//! While `Open`, the selection index wraps modulo the candidate count; every
//! path out of `Open` commits the currently highlighted candidate — there is
//! no separate cancel, because re-committing the window that was focused
//! when the session started *is* cancel.
//!
//! The session owns the thumbnail temp files.  They are deleted on the
//! transition into `Closed`, and again from `Drop` as a backstop so unwind
//! paths cannot leak them.

use crate::capture::ThumbnailRecord;
use crate::tree::WindowRecord;
use log::warn;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Thumbnails captured, overlay not yet shown.
    Building,
    /// Overlay visible, awaiting input.
    Open,
    /// Terminal: selection committed.
    Closed,
}

/// Which neighbour of the focused window starts out highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Next,
    Prev,
}

/// One switching session: the ordered candidates, the wrapping selection
/// index, and the window that had focus before the session started.
///
/// Exactly one session exists per process and it never outlives it.
#[derive(Debug)]
pub struct SwitcherSession {
    entries: Vec<(WindowRecord, ThumbnailRecord)>,
    index: usize,
    origin_id: i64,
    state: SessionState,
    cleaned: bool,
}

impl SwitcherSession {
    /// Create a session in the `Building` state.
    ///
    /// `entries` must be in tree-traversal order; callers only construct a
    /// session once at least two candidates captured successfully.
    pub fn new(entries: Vec<(WindowRecord, ThumbnailRecord)>, origin_id: i64) -> Self {
        Self {
            entries,
            index: 0,
            origin_id,
            state: SessionState::Building,
            cleaned: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// Current selection index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Container id of the window focused before the session started.
    pub fn origin_id(&self) -> i64 {
        self.origin_id
    }

    /// The candidates with their thumbnails, in tree order.
    pub fn entries(&self) -> &[(WindowRecord, ThumbnailRecord)] {
        &self.entries
    }

    /// The currently highlighted candidate.
    pub fn selected(&self) -> &WindowRecord {
        &self.entries[self.index].0
    }

    /// Transition `Building → Open` and seed the initial selection.
    ///
    /// `Next` starts one past the focused window ("already switched once"),
    /// `Prev` starts one before it (the last candidate in tree order).
    pub fn open(&mut self, direction: CycleDirection) {
        if self.state != SessionState::Building {
            return;
        }
        self.index = match direction {
            CycleDirection::Next => {
                if self.entries.len() >= 2 {
                    1
                } else {
                    0
                }
            }
            CycleDirection::Prev => self.entries.len().saturating_sub(1),
        };
        self.state = SessionState::Open;
    }

    /// Advance the selection by one, wrapping.  No-op unless `Open`.
    pub fn cycle_forward(&mut self) -> usize {
        if self.is_open() && !self.entries.is_empty() {
            self.index = (self.index + 1) % self.entries.len();
        }
        self.index
    }

    /// Move the selection back by one, wrapping.  No-op unless `Open`.
    pub fn cycle_backward(&mut self) -> usize {
        if self.is_open() && !self.entries.is_empty() {
            self.index = (self.index + self.entries.len() - 1) % self.entries.len();
        }
        self.index
    }

    /// Transition into `Closed`, returning the committed container id.
    pub fn commit(&mut self) -> i64 {
        self.state = SessionState::Closed;
        self.entries[self.index].0.id
    }

    /// Delete every thumbnail file.  Idempotent; failures are logged, not
    /// surfaced — the files live in the temp dir either way.
    pub fn cleanup(&mut self) {
        if self.cleaned {
            return;
        }
        self.cleaned = true;
        for (_, thumb) in &self.entries {
            if let Err(e) = std::fs::remove_file(&thumb.path) {
                warn!("could not remove {}: {}", thumb.path.display(), e);
            }
        }
    }
}

impl Drop for SwitcherSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

//  Tests
