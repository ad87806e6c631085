//! Opening entries with the OS default handler.

use std::path::Path;

use tracing::warn;

/// Collaborator that hands a path to the operating system.
///
/// The core never spawns processes itself; presenters pass an
/// implementation in, and tests inject a recording fake.
pub trait Shell {
    /// Open `path` with the OS default handler. Returns `false` when the
    /// handler could not be launched or exited unsuccessfully; failure is
    /// logged, never panicked on, and must not disturb navigation state.
    fn open(&self, path: &Path) -> bool;
}

/// [`Shell`] backed by the platform open command (`start` on Windows,
/// `open` on macOS, `xdg-open` on Linux). Platforms without a mapping
/// fail at compile time; there is no runtime fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn open(&self, path: &Path) -> bool {
        match open::that(path) {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to open {} with default handler: {err}", path.display());
                false
            }
        }
    }
}
