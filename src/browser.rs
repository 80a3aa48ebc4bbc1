//! Best-effort launch of the user's default browser

use crate::logger;
use std::io;

/// Open `url` in the default browser
///
/// Returns whether the launcher started. Failure is logged together with the
/// URL to open by hand and never propagated.
pub fn open_browser(url: &str) -> bool {
    open_browser_with(url, |u| open::that_detached(u))
}

/// Same as [`open_browser`] with an injectable launcher
pub fn open_browser_with<F>(url: &str, opener: F) -> bool
where
    F: FnOnce(&str) -> io::Result<()>,
{
    match opener(url) {
        Ok(()) => {
            logger::log_browser_opened(url);
            true
        }
        Err(e) => {
            logger::log_browser_fallback(url, &e);
            false
        }
    }
}
