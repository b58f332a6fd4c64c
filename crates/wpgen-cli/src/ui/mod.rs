//! Terminal status messages.
//!
//! Messages go to stderr. Color is decided once by [`init_colors`] from the
//! `--no-color` flag, `NO_COLOR`/`FORCE_COLOR` and terminal detection. The
//! logger reads the same decision through [`colors_enabled`]. `--quiet`
//! silences these messages via [`set_quiet`].
//!
//! # Examples
//!
//! ```no_run
//! use wpgen_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Wrote webpack.config.json");
//! ui::warning("No pages found");
//! ```

mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{success, warning};

static COLORS: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support. Call once, early in `main`.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

/// Whether [`init_colors`] enabled color output.
pub fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

/// Suppress status messages (`--quiet`).
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub(crate) fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}
