//! `--list` mode: a flat picker over all windows, no thumbnails.
//!
//! Every leaf window — across all workspaces — is piped to a
//! dmenu-compatible menu program (rofi by default) that prints the selected
//! line *index*; the chosen window is then focused.  Shell components (bars,
//! launchers, lockers) are filtered out so the list only contains windows
//! worth switching to.

use crate::switcher::SwitcherError;
use crate::traits::WindowManager;
use crate::tree::{resolve_workspace, Node, WindowRecord};
use log::{debug, info, warn};
use std::io::Write;
use std::process::{Command, Stdio};

/// Desktop-shell clients that never belong in the picker.
const SKIP_APPS: &[&str] = &["waybar", "wofi", "rofi", "dmenu", "swaync", "swaylock"];

/// Whether a window looks like part of the desktop shell.
fn is_shell_component(window: &WindowRecord) -> bool {
    let haystack = format!("{}{}{}", window.app_id, window.title, window.class).to_lowercase();
    SKIP_APPS.iter().any(|needle| haystack.contains(needle))
}

/// All selectable leaf windows in tree order, shell components removed.
///
/// Windows without a workspace ancestor are still listed (workspace is only
/// informational here, unlike in the interactive switcher).
pub fn collect_windows(root: &Node) -> Vec<WindowRecord> {
    root.leaves()
        .map(|node| {
            let workspace = resolve_workspace(root, node.id).unwrap_or("");
            WindowRecord::from_node(node, workspace)
        })
        .filter(|window| !is_shell_component(window))
        .collect()
}

/// One menu line per window: focus marker, title, app hint (pango markup,
/// which rofi renders in dmenu mode).
pub fn format_menu_lines(windows: &[WindowRecord]) -> String {
    windows
        .iter()
        .map(|window| {
            let marker = if window.focused { "● " } else { "  " };
            let app = if !window.app_id.is_empty() {
                window.app_id.as_str()
            } else if !window.class.is_empty() {
                window.class.as_str()
            } else {
                "?"
            };
            format!("{}{}   <small>({})</small>", marker, window.title, app)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run the flat picker to completion.
///
/// A cancelled menu, an empty window list, or a nonsense reply are all
/// quiet no-ops; only window-manager failures surface as errors.
pub fn run_flat_picker<W: WindowManager>(wm: &W, menu: &[String]) -> Result<(), SwitcherError> {
    let tree = wm
        .tree()
        .map_err(|e| SwitcherError::WindowManager(e.to_string()))?;
    let windows = collect_windows(&tree);
    if windows.is_empty() {
        info!("no windows to list");
        return Ok(());
    }

    let Some(index) = run_menu(menu, &format_menu_lines(&windows)) else {
        return Ok(());
    };
    let Some(window) = windows.get(index) else {
        warn!("menu returned out-of-range index {}", index);
        return Ok(());
    };

    info!("focusing window {} ({})", window.id, window.title);
    if let Err(e) = wm.focus(window.id) {
        warn!("focus for {} failed: {}", window.id, e);
    }
    Ok(())
}

/// Feed `input` to the menu program and parse the selected line index from
/// its stdout.  `None` means the user cancelled or the menu misbehaved.
fn run_menu(menu: &[String], input: &str) -> Option<usize> {
    let (program, args) = menu.split_first()?;
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            warn!("menu {} failed to start: {}", program, e);
            return None;
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(input.as_bytes()) {
            warn!("writing to menu failed: {}", e);
        }
    }

    let output = match child.wait_with_output() {
        Ok(output) => output,
        Err(e) => {
            warn!("waiting for menu failed: {}", e);
            return None;
        }
    };
    if !output.status.success() {
        debug!("menu cancelled");
        return None;
    }
    String::from_utf8_lossy(&output.stdout).trim().parse().ok()
}

//  Tests
