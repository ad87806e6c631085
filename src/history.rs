//! Browser-style navigation history over filesystem locations.
//!
//! Pure data structure: no filesystem access happens here. Whether a
//! location actually exists is discovered by the listing refresh that
//! follows a move.

use std::path::{Component, Path, PathBuf};

/// Back/forward stacks plus the current location.
///
/// Both stacks are bounded; pushing past the limit silently drops the
/// oldest entry. A fresh navigation clears the forward stack, exactly
/// like a web browser.
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    current: PathBuf,
    back: Vec<PathBuf>,
    forward: Vec<PathBuf>,
}

impl NavigationHistory {
    /// Start a history at `initial` with empty stacks.
    pub fn new(initial: impl Into<PathBuf>) -> Self {
        Self {
            current: normalize(&initial.into()),
            back: Vec::new(),
            forward: Vec::new(),
        }
    }

    /// The location the view is currently at.
    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Locations reachable via [`Self::go_back`], oldest first.
    pub fn back(&self) -> &[PathBuf] {
        &self.back
    }

    /// Locations reachable via [`Self::go_forward`], oldest first.
    pub fn forward(&self) -> &[PathBuf] {
        &self.forward
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Move to `path`, pushing the current location onto the back stack
    /// and clearing the forward stack.
    ///
    /// Always succeeds structurally; a dead path simply lists as empty on
    /// the next refresh.
    pub fn navigate_to(&mut self, path: impl Into<PathBuf>, max_history: usize) {
        let target = normalize(&path.into());
        let previous = std::mem::replace(&mut self.current, target);
        push_bounded(&mut self.back, previous, max_history);
        self.forward.clear();
    }

    /// Step back one location. Returns `false` (and does nothing) when
    /// the back stack is empty.
    pub fn go_back(&mut self, max_history: usize) -> bool {
        let Some(previous) = self.back.pop() else {
            return false;
        };
        let displaced = std::mem::replace(&mut self.current, previous);
        push_bounded(&mut self.forward, displaced, max_history);
        true
    }

    /// Step forward one location. Returns `false` (and does nothing) when
    /// the forward stack is empty.
    pub fn go_forward(&mut self, max_history: usize) -> bool {
        let Some(next) = self.forward.pop() else {
            return false;
        };
        let displaced = std::mem::replace(&mut self.current, next);
        push_bounded(&mut self.back, displaced, max_history);
        true
    }

    /// Navigate to the parent of the current location. A root has no
    /// parent, so the call is a no-op there and returns `false`.
    pub fn go_to_parent(&mut self, max_history: usize) -> bool {
        let Some(parent) = self.current.parent().map(Path::to_path_buf) else {
            return false;
        };
        self.navigate_to(parent, max_history);
        true
    }

    /// Drop both stacks, keeping the current location.
    pub fn reset_history(&mut self) {
        self.back.clear();
        self.forward.clear();
    }
}

fn push_bounded(stack: &mut Vec<PathBuf>, path: PathBuf, max_history: usize) {
    stack.push(path);
    if stack.len() > max_history {
        stack.remove(0);
    }
}

/// Lexically normalize a path: drop `.` components and resolve `..`
/// against the preceding component. No filesystem access, so symlinks are
/// not resolved.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // The parent of a root is the root itself.
                if !out.pop() && !out.has_root() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}
