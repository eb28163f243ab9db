//! Entry point for the **swaytab** binary.
//!
//! One invocation is one switching session: guard against a second running
//! instance, build the session (tree query → workspace filter → thumbnail
//! capture), then hand it to the GTK overlay, which commits a selection and
//! exits.  `--list` runs the flat menu picker instead.
//!
//! Early no-ops — another instance running, no focused window, fewer than
//! two candidates — exit 0 with an info line; only unexpected internal
//! errors exit non-zero.

use clap::Parser;
use log::{error, info};
use swaytab::capture::GrimCapture;
use swaytab::cli::Args;
use swaytab::config::Config;
use swaytab::instance;
use swaytab::picker;
use swaytab::session::SwitcherSession;
use swaytab::sway::wm::SwayWm;
use swaytab::switcher::{self, SessionOutcome, SwitcherError};

/// Resolve the config directory (`$XDG_CONFIG_HOME/swaytab`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("swaytab")
}

/// Try to load the config from `$XDG_CONFIG_HOME/swaytab/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

/// Resolve the user CSS stylesheet path.
#[cfg(feature = "overlay-gtk")]
fn css_path() -> std::path::PathBuf {
    config_dir().join("style.css")
}

//  Main

fn main() {
    env_logger::init();
    let args = Args::parse();

    let exe_name = instance::current_exe_name().unwrap_or_else(|| "swaytab".to_string());
    if instance::already_running(&exe_name) {
        info!("an instance of {} is already running, exiting", exe_name);
        return;
    }

    let config = load_config();
    let wm = SwayWm::new();

    let result = if args.list {
        picker::run_flat_picker(&wm, &config.menu)
    } else {
        run_switcher(wm, &args, &config)
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Interactive mode: build the session and drive it through the overlay.
fn run_switcher(wm: SwayWm, args: &Args, config: &Config) -> Result<(), SwitcherError> {
    let backend = GrimCapture::new();
    match switcher::build_session(&wm, &backend)? {
        SessionOutcome::NoFocusedWindow => {
            info!("no focused window, nothing to switch from");
            Ok(())
        }
        SessionOutcome::InsufficientCandidates => Ok(()),
        SessionOutcome::Ready(mut session) => {
            session.open(args.direction());
            present_overlay(wm, session, args, config);
            Ok(())
        }
    }
}

#[cfg(feature = "overlay-gtk")]
fn present_overlay(wm: SwayWm, session: SwitcherSession, args: &Args, config: &Config) {
    let options = swaytab::overlay::gtk::OverlayOptions {
        notify: !args.disable_preview,
        notify_timeout_ms: config.notify_timeout_ms,
    };
    swaytab::overlay::gtk::run_overlay(wm, session, Some(css_path()), options);
}

#[cfg(not(feature = "overlay-gtk"))]
fn present_overlay(_wm: SwayWm, session: SwitcherSession, _args: &Args, _config: &Config) {
    // Delete the captured thumbnails before bailing out.
    drop(session);
    error!("built without the `overlay-gtk` feature; interactive switching is unavailable");
    std::process::exit(1);
}
