//! Best-effort single-instance detection.
//!
//! Two switchers racing each other would steal focus back and forth during
//! the capture phase, so a second launch backs out before touching the
//! window manager.  The check scans the process table for another process
//! with our executable name; it is a usability guard, not a lock — a race
//! between two near-simultaneous launches is accepted.

use std::ffi::OsStr;
use sysinfo::{ProcessesToUpdate, System};

/// Base name of the current executable, e.g. `"swaytab"`.
pub fn current_exe_name() -> Option<String> {
    let exe = std::env::current_exe().ok()?;
    exe.file_name()
        .and_then(OsStr::to_str)
        .map(str::to_string)
}

/// Whether another process with the executable name `exe_name` is running.
///
/// The current process is excluded.  Matches the process name itself or the
/// base name of the first command-line argument, so interpreter-launched or
/// renamed copies are still caught.
pub fn already_running(exe_name: &str) -> bool {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);
    let current = std::process::id();

    system.processes().iter().any(|(pid, process)| {
        if pid.as_u32() == current {
            return false;
        }
        if process.name().to_string_lossy() == exe_name {
            return true;
        }
        process
            .cmd()
            .first()
            .map(|argv0| {
                let argv0 = argv0.to_string_lossy();
                argv0.rsplit('/').next() == Some(exe_name)
            })
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_exe_name_is_nonempty() {
        let name = current_exe_name().expect("test binary should have a name");
        assert!(!name.is_empty());
    }

    #[test]
    fn unknown_executable_is_not_running() {
        assert!(!already_running("swaytab-no-such-process-xyz"));
    }

    #[test]
    fn scan_with_own_name_does_not_panic() {
        // Another copy of the test runner may legitimately exist, so the
        // result is not asserted; the scan itself must survive a full
        // process-table walk.
        let name = current_exe_name().unwrap();
        let _ = already_running(&name);
    }
}
