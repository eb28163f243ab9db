//! [`WindowManager`] implementation backed by sway IPC.

use crate::sway::ipc::{self, IpcError};
use crate::traits::WindowManager;
use crate::tree::Node;

/// sway-backed window manager.
///
/// All communication happens over sway's IPC socket; each method call is a
/// short-lived request.  No child processes are spawned.
pub struct SwayWm;

impl Default for SwayWm {
    fn default() -> Self {
        Self
    }
}

impl SwayWm {
    /// Create a new handle.  No connection is opened eagerly.
    pub fn new() -> Self {
        Self
    }
}

impl WindowManager for SwayWm {
    type Error = IpcError;

    fn tree(&self) -> Result<Node, IpcError> {
        ipc::get_tree()
    }

    fn focus(&self, con_id: i64) -> Result<(), IpcError> {
        ipc::run_command(&format!("[con_id={}] focus", con_id))
    }

    fn place_overlay(&self, title: &str, width: u32, height: u32) -> Result<(), IpcError> {
        // Issued one by one: sway rejects a whole command line when any
        // single criterion/command pair in it fails.
        ipc::run_command(&format!("[title=\"{}\"] floating enable", title))?;
        ipc::run_command(&format!("[title=\"{}\"] border none", title))?;
        ipc::run_command(&format!("[title=\"{}\"] move position center", title))?;
        ipc::run_command(&format!(
            "[title=\"{}\"] resize set {} {}",
            title, width, height
        ))?;
        Ok(())
    }
}
