//! Command-line surface.
//!
//! All flags are optional; a bare invocation behaves like `--next`.

use clap::Parser;

/// An alt-tab window switcher with live thumbnails for sway.
#[derive(Debug, Parser)]
#[command(name = "swaytab", version, about)]
pub struct Args {
    /// Open the switcher with the next window pre-selected (default).
    #[arg(long, conflicts_with_all = ["prev", "list"])]
    pub next: bool,

    /// Open the switcher with the previous window pre-selected.
    #[arg(long, conflicts_with = "list")]
    pub prev: bool,

    /// Flat picker over all windows via a menu program, no thumbnails.
    #[arg(long)]
    pub list: bool,

    /// Suppress the desktop notification after switching.
    #[arg(long)]
    pub disable_preview: bool,
}

impl Args {
    /// Which direction the interactive session should start cycling in.
    pub fn direction(&self) -> crate::session::CycleDirection {
        if self.prev {
            crate::session::CycleDirection::Prev
        } else {
            crate::session::CycleDirection::Next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CycleDirection;

    #[test]
    fn bare_invocation_means_next() {
        let args = Args::parse_from(["swaytab"]);
        assert!(!args.prev);
        assert!(!args.list);
        assert_eq!(args.direction(), CycleDirection::Next);
    }

    #[test]
    fn prev_flag_flips_direction() {
        let args = Args::parse_from(["swaytab", "--prev"]);
        assert_eq!(args.direction(), CycleDirection::Prev);
    }

    #[test]
    fn next_and_prev_conflict() {
        assert!(Args::try_parse_from(["swaytab", "--next", "--prev"]).is_err());
    }

    #[test]
    fn list_and_prev_conflict() {
        assert!(Args::try_parse_from(["swaytab", "--list", "--prev"]).is_err());
    }

    #[test]
    fn disable_preview_combines_with_next() {
        let args = Args::parse_from(["swaytab", "--next", "--disable-preview"]);
        assert!(args.disable_preview);
        assert_eq!(args.direction(), CycleDirection::Next);
    }
}
