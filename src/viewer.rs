//! Chart Viewer
//! Presents a written chart in the platform's default image viewer.

use std::io;
use std::path::Path;
use tracing::debug;

/// Whether a graphical session is available to show images in.
pub fn display_available() -> bool {
    if cfg!(any(target_os = "macos", target_os = "windows")) {
        return true;
    }
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

/// Open `path` with the default viewer. Does nothing without a display.
pub fn show(path: &Path) -> io::Result<()> {
    if !display_available() {
        debug!(path = %path.display(), "no display available, skipping viewer");
        return Ok(());
    }
    open::that(path)
}
