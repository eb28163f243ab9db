//! Terminal session action: focus the committed window and clean up.
//!
//! One focus command, fire-and-forget.  A failure here is logged but not
//! retried — the session is ending regardless, and the user sees the
//! outcome on screen faster than any retry could help.

use crate::session::SwitcherSession;
use crate::traits::WindowManager;
use log::{info, warn};

/// Close the session on its current selection: issue the focus command,
/// then delete the thumbnails.  Returns the committed container id.
pub fn commit_selection<W: WindowManager>(wm: &W, session: &mut SwitcherSession) -> i64 {
    let con_id = session.commit();
    info!("focusing window {}", con_id);
    if let Err(e) = wm.focus(con_id) {
        warn!("focus commit for {} failed: {}", con_id, e);
    }
    session.cleanup();
    con_id
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::ThumbnailRecord;
    use crate::session::CycleDirection;
    use crate::traits::mocks::RecorderWm;
    use crate::tree::{Rect, WindowRecord};
    use std::time::SystemTime;

    fn session_for(ids: &[i64]) -> SwitcherSession {
        let entries = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let file = tempfile::Builder::new()
                    .prefix("swaytab-commit-test-")
                    .suffix(".png")
                    .tempfile()
                    .unwrap();
                let (_, path) = file.keep().unwrap();
                (
                    WindowRecord {
                        id,
                        title: format!("window-{}", id),
                        app_id: "app".into(),
                        class: String::new(),
                        rect: Rect::default(),
                        workspace: "1".into(),
                        focused: i == 0,
                    },
                    ThumbnailRecord {
                        con_id: id,
                        path,
                        captured_at: SystemTime::now(),
                    },
                )
            })
            .collect();
        let mut session = SwitcherSession::new(entries, ids[0]);
        session.open(CycleDirection::Next);
        session
    }

    #[test]
    fn commit_focuses_the_selection_and_cleans_up() {
        let wm = RecorderWm::default();
        let mut session = session_for(&[11, 12, 13]);
        session.cycle_forward(); // 12 -> 13

        let committed = commit_selection(&wm, &mut session);

        assert_eq!(committed, 13);
        assert_eq!(*wm.focus_log.borrow(), vec![13]);
        assert!(session
            .entries()
            .iter()
            .all(|(_, thumb)| !thumb.path.exists()));
    }

    #[test]
    fn focus_failure_still_cleans_up() {
        let wm = RecorderWm {
            fail_focus: vec![12],
            ..RecorderWm::default()
        };
        let mut session = session_for(&[11, 12]);

        let committed = commit_selection(&wm, &mut session);

        assert_eq!(committed, 12);
        assert!(wm.focus_log.borrow().is_empty());
        assert!(session
            .entries()
            .iter()
            .all(|(_, thumb)| !thumb.path.exists()));
    }
}
