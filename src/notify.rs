//! Desktop notification side-channel.
//!
//! After a switch commits, a short low-urgency notification names the
//! window that now holds focus.  `notify-send` is invoked as a child
//! process, like the capture tool; a missing or failing notifier is a
//! debug-level event, never an error — the switch itself already happened.

use crate::tree::WindowRecord;
use log::debug;
use std::process::Command;

/// Announce the newly focused window.  Best effort.
pub fn send_switch_notification(window: &WindowRecord, timeout_ms: u64) {
    let result = Command::new("notify-send")
        .arg("--app-name")
        .arg("Window Switcher")
        .arg("--icon")
        .arg(window.icon_hint())
        .arg("--expire-time")
        .arg(timeout_ms.to_string())
        .arg("--urgency")
        .arg("low")
        .arg(format!("→ {}", window.title))
        .output();

    match result {
        Ok(output) if !output.status.success() => {
            debug!(
                "notify-send exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(_) => {}
        Err(e) => debug!("notify-send not available: {}", e),
    }
}
