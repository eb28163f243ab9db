//! GTK4 overlay that runs on the **main thread**.
//!
//! # Widget tree
//!
//! ```text
//! window                      (undecorated toplevel, placed by the WM)
//! └ box                     (vertical, margins)
//!     └ box                 (horizontal thumbnail strip)
//!         ├ .thumb-item     (vbox: image + label)
//!         ├ .thumb-item.selected
//!         └ …
//! ```
//!
//! # CSS selectors
//!
//! | Selector                | Targets                                  |
//! |-------------------------|------------------------------------------|
//! | `window`                | The overlay window background            |
//! | `.thumb-item`           | Every candidate box                      |
//! | `.thumb-item.selected`  | The highlighted candidate                |
//! | `.thumb-label`          | The title under each thumbnail           |
//!
//! The overlay is a plain toplevel, not a layer-shell surface: placement
//! goes through the window manager by title criteria
//! ([`WindowManager::place_overlay`]), which only addresses regular
//! windows.  The placement pass is deferred by [`PLACEMENT_DELAY`] because
//! commands issued while the surface is still mapping race the
//! compositor's own placement of new windows.
//!
//! Every path out of the overlay — Enter, releasing Alt, or the window
//! being closed under us — commits the currently highlighted candidate.

use crate::capture::{THUMB_MAX_HEIGHT, THUMB_MAX_WIDTH};
use crate::commit;
use crate::notify;
use crate::session::SwitcherSession;
use crate::traits::WindowManager;
use gtk4::prelude::*;
use gtk4::{gdk, glib, pango};
use log::{info, warn};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

/// Title the placement commands match on.
pub const OVERLAY_TITLE: &str = "Sway Window Switcher";

/// Delay before the window-manager placement pass.
const PLACEMENT_DELAY: Duration = Duration::from_millis(80);

/// Horizontal padding accounted per candidate when sizing the overlay.
const ITEM_PADDING: u32 = 40;
/// The overlay never grows wider than this, however many candidates exist.
const MAX_OVERLAY_WIDTH: u32 = 1400;
/// Margins, spacing, and label below the thumbnail row.
const CHROME_HEIGHT: u32 = 120;

//  Default CSS

const DEFAULT_CSS: &str = r#"
window {
    background-color: rgba(24, 24, 24, 0.95);
}

.thumb-item.selected {
    border: 4px solid #4CAF50;
    border-radius: 8px;
    background-color: rgba(76, 175, 80, 0.1);
    padding: 6px;
}

.thumb-label {
    color: white;
    font-size: 14px;
    margin-top: 6px;
}
"#;

/// Behavioural knobs for one overlay run.
#[derive(Debug, Clone)]
pub struct OverlayOptions {
    /// Whether to announce the committed window via a notification.
    pub notify: bool,
    /// Notification display time in milliseconds.
    pub notify_timeout_ms: u64,
}

/// Everything the event handlers mutate.
struct OverlayState {
    session: SwitcherSession,
    items: Vec<gtk4::Box>,
}

/// Overlay width for a given candidate count, capped.
fn overlay_width(candidates: usize) -> u32 {
    (candidates as u32 * (THUMB_MAX_WIDTH + ITEM_PADDING)).min(MAX_OVERLAY_WIDTH)
}

fn overlay_height() -> u32 {
    THUMB_MAX_HEIGHT + CHROME_HEIGHT
}

//  Public API

/// Show the overlay for an opened session and block until it commits.
///
/// Runs the GLib main loop on the **current** (main) thread.  `css_path`
/// optionally points at a user stylesheet overriding the built-in CSS.
pub fn run_overlay<W: WindowManager + 'static>(
    wm: W,
    session: SwitcherSession,
    css_path: Option<PathBuf>,
    options: OverlayOptions,
) {
    gtk4::init().expect("failed to initialise GTK4");
    info!("GTK4 initialised on main thread");

    load_css(&css_path);

    //  Widget tree
    let window = gtk4::Window::new();
    window.set_title(Some(OVERLAY_TITLE));
    window.set_default_size(300, 200);
    window.set_decorated(false);

    let main_box = gtk4::Box::new(gtk4::Orientation::Vertical, 10);
    main_box.set_margin_top(20);
    main_box.set_margin_bottom(20);
    main_box.set_margin_start(20);
    main_box.set_margin_end(20);
    window.set_child(Some(&main_box));

    let thumbs_box = gtk4::Box::new(gtk4::Orientation::Horizontal, 16);
    thumbs_box.set_halign(gtk4::Align::Center);
    thumbs_box.set_valign(gtk4::Align::Center);
    main_box.append(&thumbs_box);

    let mut items = Vec::with_capacity(session.len());
    for (record, thumb) in session.entries() {
        let item = gtk4::Box::new(gtk4::Orientation::Vertical, 4);
        item.add_css_class("thumb-item");
        item.set_halign(gtk4::Align::Center);

        let image = gtk4::Image::from_file(&thumb.path);
        image.set_pixel_size(THUMB_MAX_WIDTH as i32);
        item.append(&image);

        let label = gtk4::Label::new(Some(record.title.as_str()));
        label.add_css_class("thumb-label");
        label.set_ellipsize(pango::EllipsizeMode::End);
        label.set_max_width_chars(25);
        item.append(&label);

        thumbs_box.append(&item);
        items.push(item);
    }
    items[session.index()].add_css_class("selected");

    let candidate_count = session.len();
    let wm = Rc::new(wm);
    let main_loop = glib::MainLoop::new(None, false);
    let state = Rc::new(RefCell::new(OverlayState { session, items }));

    //  Keyboard
    let key_controller = gtk4::EventControllerKey::new();
    {
        let state = Rc::clone(&state);
        let wm = Rc::clone(&wm);
        let main_loop = main_loop.clone();
        let options = options.clone();
        key_controller.connect_key_pressed(move |_, keyval, _keycode, modifier| {
            on_key_pressed(keyval, modifier, &state, &wm, &main_loop, &options)
        });
    }
    {
        let state = Rc::clone(&state);
        let wm = Rc::clone(&wm);
        let main_loop = main_loop.clone();
        let options = options.clone();
        key_controller.connect_key_released(move |_, keyval, _keycode, _modifier| {
            // Hold modifier, tap Tab, release modifier to pick.
            if keyval == gdk::Key::Alt_L || keyval == gdk::Key::Alt_R {
                finish(&state, &wm, &main_loop, &options);
            }
        });
    }
    window.add_controller(key_controller);

    //  A close from outside (e.g. a kill binding) still commits.
    {
        let state = Rc::clone(&state);
        let wm = Rc::clone(&wm);
        let main_loop = main_loop.clone();
        let options = options.clone();
        window.connect_close_request(move |_| {
            finish(&state, &wm, &main_loop, &options);
            glib::Propagation::Proceed
        });
    }

    window.present();

    //  Deferred placement pass
    {
        let wm = Rc::clone(&wm);
        glib::timeout_add_local_once(PLACEMENT_DELAY, move || {
            let width = overlay_width(candidate_count);
            if let Err(e) = wm.place_overlay(OVERLAY_TITLE, width, overlay_height()) {
                warn!("overlay placement failed (overlay may be mis-positioned): {}", e);
            }
        });
    }

    info!("overlay shown with {} candidates", candidate_count);
    main_loop.run();
    info!("GLib main loop exited");
}

//  Event handling

fn on_key_pressed<W: WindowManager>(
    keyval: gdk::Key,
    modifier: gdk::ModifierType,
    state: &Rc<RefCell<OverlayState>>,
    wm: &Rc<W>,
    main_loop: &glib::MainLoop,
    options: &OverlayOptions,
) -> glib::Propagation {
    // Shift+Tab arrives as ISO_Left_Tab on most keymaps.
    if keyval == gdk::Key::Tab || keyval == gdk::Key::ISO_Left_Tab {
        cycle(state, !modifier.contains(gdk::ModifierType::SHIFT_MASK));
        glib::Propagation::Stop
    } else if keyval == gdk::Key::Right {
        cycle(state, true);
        glib::Propagation::Stop
    } else if keyval == gdk::Key::Left {
        cycle(state, false);
        glib::Propagation::Stop
    } else if keyval == gdk::Key::Return || keyval == gdk::Key::KP_Enter {
        finish(state, wm, main_loop, options);
        glib::Propagation::Stop
    } else {
        glib::Propagation::Proceed
    }
}

/// Move the selection and the highlight one step.
fn cycle(state: &Rc<RefCell<OverlayState>>, forward: bool) {
    let mut st = state.borrow_mut();
    if !st.session.is_open() {
        return;
    }
    let old = st.session.index();
    let new = if forward {
        st.session.cycle_forward()
    } else {
        st.session.cycle_backward()
    };
    st.items[old].remove_css_class("selected");
    st.items[new].add_css_class("selected");
}

/// Commit the highlighted candidate and leave the main loop.  Idempotent:
/// only the first call on an open session does anything.
fn finish<W: WindowManager>(
    state: &Rc<RefCell<OverlayState>>,
    wm: &Rc<W>,
    main_loop: &glib::MainLoop,
    options: &OverlayOptions,
) {
    let mut st = state.borrow_mut();
    if !st.session.is_open() {
        return;
    }
    let record = st.session.selected().clone();
    commit::commit_selection(wm.as_ref(), &mut st.session);
    if options.notify {
        notify::send_switch_notification(&record, options.notify_timeout_ms);
    }
    main_loop.quit();
}

//  CSS loading

fn load_css(css_path: &Option<PathBuf>) {
    let provider = gtk4::CssProvider::new();

    let css_content = match css_path.as_ref().filter(|p| p.exists()) {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(content) => {
                info!("user CSS: {} ({} bytes)", p.display(), content.len());
                content
            }
            Err(e) => {
                warn!("CSS read failed ({}): {} — using built-in", p.display(), e);
                DEFAULT_CSS.to_string()
            }
        },
        None => DEFAULT_CSS.to_string(),
    };

    #[allow(deprecated)]
    provider.load_from_data(&css_content);

    if let Some(display) = gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    } else {
        warn!("no GDK display — CSS will not be applied");
    }
}
