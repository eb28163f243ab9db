//! The orchestrator that builds a switching session.
//!
//! Stitches together the tree query, workspace filtering, and thumbnail
//! capture, and decides whether there is anything to switch between at all.
//! Generic over [`WindowManager`] and [`CaptureBackend`], so it is
//! completely independent of sway and grim.

use crate::capture;
use crate::session::SwitcherSession;
use crate::traits::{CaptureBackend, WindowManager};
use crate::tree::{resolve_workspace, windows_on_workspace};
use log::{info, warn};

/// Possible errors from the switcher.
#[derive(Debug, thiserror::Error)]
pub enum SwitcherError {
    /// The window manager returned an error.
    #[error("window manager error: {0}")]
    WindowManager(String),
}

/// Result of trying to build a session.
///
/// The two no-op variants are ordinary outcomes, not errors: the process
/// exits 0 on both, having issued no focus command.
#[derive(Debug)]
pub enum SessionOutcome {
    /// A session in the `Building` state, ready to open.
    Ready(SwitcherSession),
    /// Nothing holds focus — there is nothing to switch *from*.
    NoFocusedWindow,
    /// Fewer than two usable candidates on the focused workspace.
    InsufficientCandidates,
}

/// Read the tree, filter the focused workspace, capture thumbnails.
pub fn build_session<W, C>(wm: &W, backend: &C) -> Result<SessionOutcome, SwitcherError>
where
    W: WindowManager,
    C: CaptureBackend,
{
    let tree = wm
        .tree()
        .map_err(|e| SwitcherError::WindowManager(e.to_string()))?;

    let Some(focused) = tree.find_focused() else {
        return Ok(SessionOutcome::NoFocusedWindow);
    };
    let focused_id = focused.id;
    let Some(workspace) = resolve_workspace(&tree, focused_id) else {
        return Ok(SessionOutcome::NoFocusedWindow);
    };

    let candidates = windows_on_workspace(&tree, workspace);
    if candidates.len() < 2 {
        info!(
            "{} window(s) on workspace {}, nothing to cycle",
            candidates.len(),
            workspace
        );
        return Ok(SessionOutcome::InsufficientCandidates);
    }

    info!(
        "capturing {} windows on workspace {}",
        candidates.len(),
        workspace
    );
    let entries = capture::capture_all(wm, backend, &candidates, focused_id);
    if entries.len() < 2 {
        warn!(
            "only {} of {} candidates captured, not opening the switcher",
            entries.len(),
            candidates.len()
        );
        // The survivors' thumbnails would otherwise leak.
        for (_, thumb) in &entries {
            let _ = std::fs::remove_file(&thumb.path);
        }
        return Ok(SessionOutcome::InsufficientCandidates);
    }

    Ok(SessionOutcome::Ready(SwitcherSession::new(
        entries, focused_id,
    )))
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mocks::{PngCapture, RecorderWm};

    /// Workspace "1" holds windows 11 (focused), 12, 13 at distinct x
    /// coordinates; workspace "2" holds window 21.
    const TREE_JSON: &str = r#"{
        "id": 1, "name": "root", "type": "root",
        "rect": {"x": 0, "y": 0, "width": 1920, "height": 1080},
        "nodes": [
            {
                "id": 2, "name": "eDP-1", "type": "output",
                "rect": {"x": 0, "y": 0, "width": 1920, "height": 1080},
                "nodes": [
                    {
                        "id": 10, "name": "1", "type": "workspace",
                        "rect": {"x": 0, "y": 0, "width": 1920, "height": 1080},
                        "nodes": [
                            {"id": 11, "name": "A", "type": "con", "app_id": "a",
                             "focused": true,
                             "rect": {"x": 0, "y": 0, "width": 400, "height": 300}},
                            {"id": 12, "name": "B", "type": "con", "app_id": "b",
                             "rect": {"x": 400, "y": 0, "width": 400, "height": 300}},
                            {"id": 13, "name": "C", "type": "con", "app_id": "c",
                             "rect": {"x": 800, "y": 0, "width": 400, "height": 300}}
                        ]
                    },
                    {
                        "id": 20, "name": "2", "type": "workspace",
                        "rect": {"x": 0, "y": 0, "width": 1920, "height": 1080},
                        "nodes": [
                            {"id": 21, "name": "D", "type": "con", "app_id": "d",
                             "rect": {"x": 0, "y": 0, "width": 400, "height": 300}}
                        ]
                    }
                ]
            }
        ]
    }"#;

    const NO_FOCUS_JSON: &str = r#"{
        "id": 1, "name": "root", "type": "root",
        "rect": {"x": 0, "y": 0, "width": 1920, "height": 1080},
        "nodes": [
            {
                "id": 2, "name": "eDP-1", "type": "output",
                "rect": {"x": 0, "y": 0, "width": 1920, "height": 1080},
                "nodes": [
                    {
                        "id": 10, "name": "1", "type": "workspace",
                        "rect": {"x": 0, "y": 0, "width": 1920, "height": 1080},
                        "nodes": [
                            {"id": 11, "name": "A", "type": "con", "app_id": "a",
                             "rect": {"x": 0, "y": 0, "width": 400, "height": 300}}
                        ]
                    }
                ]
            }
        ]
    }"#;

    const LONELY_JSON: &str = r#"{
        "id": 1, "name": "root", "type": "root",
        "rect": {"x": 0, "y": 0, "width": 1920, "height": 1080},
        "nodes": [
            {
                "id": 2, "name": "eDP-1", "type": "output",
                "rect": {"x": 0, "y": 0, "width": 1920, "height": 1080},
                "nodes": [
                    {
                        "id": 10, "name": "1", "type": "workspace",
                        "rect": {"x": 0, "y": 0, "width": 1920, "height": 1080},
                        "nodes": [
                            {"id": 11, "name": "A", "type": "con", "app_id": "a",
                             "focused": true,
                             "rect": {"x": 0, "y": 0, "width": 400, "height": 300}}
                        ]
                    }
                ]
            }
        ]
    }"#;

    fn backend() -> PngCapture {
        PngCapture {
            requires_focus: true,
            ..PngCapture::default()
        }
    }

    #[test]
    fn builds_a_session_in_tree_order() {
        let wm = RecorderWm::with_tree(TREE_JSON);
        match build_session(&wm, &backend()).unwrap() {
            SessionOutcome::Ready(session) => {
                let ids: Vec<i64> = session.entries().iter().map(|(w, _)| w.id).collect();
                assert_eq!(ids, vec![11, 12, 13]);
                assert_eq!(session.origin_id(), 11);
                assert_eq!(session.len(), 3);
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn other_workspaces_are_not_candidates() {
        let wm = RecorderWm::with_tree(TREE_JSON);
        match build_session(&wm, &backend()).unwrap() {
            SessionOutcome::Ready(session) => {
                assert!(session.entries().iter().all(|(w, _)| w.id != 21));
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn no_focused_window_is_a_no_op() {
        let wm = RecorderWm::with_tree(NO_FOCUS_JSON);
        let outcome = build_session(&wm, &backend()).unwrap();
        assert!(matches!(outcome, SessionOutcome::NoFocusedWindow));
        assert!(wm.focus_log.borrow().is_empty());
    }

    #[test]
    fn single_window_is_a_no_op_without_focus_commands() {
        let wm = RecorderWm::with_tree(LONELY_JSON);
        let outcome = build_session(&wm, &backend()).unwrap();
        assert!(matches!(outcome, SessionOutcome::InsufficientCandidates));
        assert!(wm.focus_log.borrow().is_empty());
    }

    #[test]
    fn one_failed_capture_shrinks_the_session() {
        let wm = RecorderWm::with_tree(TREE_JSON);
        let backend = PngCapture {
            requires_focus: true,
            fail_x: vec![400], // window 12
            ..PngCapture::default()
        };
        match build_session(&wm, &backend).unwrap() {
            SessionOutcome::Ready(session) => {
                let ids: Vec<i64> = session.entries().iter().map(|(w, _)| w.id).collect();
                assert_eq!(ids, vec![11, 13]);
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn too_many_failed_captures_abort_and_leave_no_files() {
        let wm = RecorderWm::with_tree(TREE_JSON);
        let backend = PngCapture {
            requires_focus: true,
            fail_x: vec![400, 800], // windows 12 and 13
            ..PngCapture::default()
        };
        let outcome = build_session(&wm, &backend).unwrap();
        assert!(matches!(outcome, SessionOutcome::InsufficientCandidates));
        // The one successful capture must have been deleted again.
        for path in backend.captured.borrow().iter() {
            assert!(!path.exists(), "{} should be gone", path.display());
        }
    }

    #[test]
    fn tree_failure_is_an_error() {
        let wm = RecorderWm::with_tree("not json");
        let err = build_session(&wm, &backend()).unwrap_err();
        assert!(matches!(err, SwitcherError::WindowManager(_)));
    }
}
