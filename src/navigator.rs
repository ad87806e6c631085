//! One explorer pane: a navigation history, the listing it looks at, and
//! the search box above it.
//!
//! Runs synchronously inside the presenter's render tick. Settings are
//! threaded into every call that needs them so independent panes never
//! share hidden state.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use tracing::debug;

use crate::history::NavigationHistory;
use crate::listing::{self, Activation, DirectoryListing, EntryRow};
use crate::settings::Settings;
use crate::shell::Shell;

/// Couples a [`NavigationHistory`] with the cached listing of its current
/// directory. Every directory change re-enumerates the filesystem; the
/// listing is only ever replaced whole.
#[derive(Debug, Clone)]
pub struct FolderNavigator {
    history: NavigationHistory,
    listing: DirectoryListing,
    search_box: String,
}

impl FolderNavigator {
    /// Open a pane at `base_directory` and list it.
    pub fn new(base_directory: impl Into<PathBuf>, settings: &Settings) -> Self {
        let history = NavigationHistory::new(base_directory);
        let mut navigator = Self {
            search_box: history.current().display().to_string(),
            history,
            listing: DirectoryListing::new(),
        };
        navigator.refresh(settings);
        navigator
    }

    /// Open a pane at the user's home directory.
    pub fn at_home(settings: &Settings) -> Self {
        Self::new(home_directory(), settings)
    }

    pub fn current_directory(&self) -> &Path {
        self.history.current()
    }

    /// Rows of the current directory as of the last refresh.
    pub fn entries(&self) -> &[EntryRow] {
        &self.listing
    }

    /// Rows of the current directory with the search-box filter applied.
    ///
    /// The box snaps to the current directory after every move, and in
    /// that state every row is visible. Once the user edits it, the
    /// file-name portion of the typed path becomes the needle.
    pub fn visible_entries(&self) -> DirectoryListing {
        let typed = Path::new(&self.search_box);
        if typed == self.history.current() {
            return self.listing.clone();
        }
        match typed.file_name() {
            Some(name) => listing::filter(&self.listing, &name.to_string_lossy()),
            None => self.listing.clone(),
        }
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Re-enumerate the current directory. Called after every move and
    /// whenever the presenter requests it (explicit refresh button,
    /// `show_hidden` toggled).
    pub fn refresh(&mut self, settings: &Settings) {
        self.listing = listing::refresh(self.history.current(), settings.show_hidden);
    }

    /// Navigate to `path` and list it.
    pub fn change_directory(&mut self, path: impl Into<PathBuf>, settings: &Settings) {
        self.history.navigate_to(path, settings.max_history_size);
        self.sync_after_move(settings);
    }

    /// Step back in history. No-op when there is nowhere to go.
    pub fn go_back(&mut self, settings: &Settings) -> bool {
        let moved = self.history.go_back(settings.max_history_size);
        if moved {
            self.sync_after_move(settings);
        }
        moved
    }

    /// Step forward in history. No-op when there is nowhere to go.
    pub fn go_forward(&mut self, settings: &Settings) -> bool {
        let moved = self.history.go_forward(settings.max_history_size);
        if moved {
            self.sync_after_move(settings);
        }
        moved
    }

    /// Move to the parent directory. No-op at a filesystem root.
    pub fn go_to_parent(&mut self, settings: &Settings) -> bool {
        let moved = self.history.go_to_parent(settings.max_history_size);
        if moved {
            self.sync_after_move(settings);
        }
        moved
    }

    /// Navigate to the user's home directory.
    pub fn go_home(&mut self, settings: &Settings) {
        self.change_directory(home_directory(), settings);
    }

    /// Forget back/forward history, keeping the current directory.
    pub fn reset_history(&mut self) {
        self.history.reset_history();
    }

    /// Apply `row`'s activation: enter directories, hand files to the
    /// shell. Returns `false` only when the shell failed; navigation
    /// state is untouched in that case.
    pub fn open_entry(&mut self, row: &EntryRow, settings: &Settings, shell: &impl Shell) -> bool {
        match listing::activate(row) {
            Activation::NavigateTo(path) => {
                self.change_directory(path, settings);
                true
            }
            Activation::OpenWithShell(path) => shell.open(&path),
        }
    }

    /// Text currently in the search box. Snaps to the current directory
    /// after every move.
    pub fn search_box(&self) -> &str {
        &self.search_box
    }

    pub fn set_search_box(&mut self, text: impl Into<String>) {
        self.search_box = text.into();
    }

    /// Autocomplete candidates for the search box: entries of the typed
    /// path's parent whose name contains the typed filename,
    /// case-insensitive. Order follows filesystem enumeration.
    pub fn completions(&self, settings: &Settings) -> Vec<PathBuf> {
        let typed = Path::new(&self.search_box);
        let Some(parent) = typed.parent() else {
            return Vec::new();
        };
        let needle = typed
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let Ok(read_dir) = fs::read_dir(parent) else {
            debug!("No completions: {} is not listable", parent.display());
            return Vec::new();
        };
        read_dir
            .flatten()
            .filter(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                (settings.show_hidden || !listing::is_hidden(&name))
                    && name.to_lowercase().contains(&needle)
            })
            .map(|entry| entry.path())
            .collect()
    }

    /// Open whatever the search box points at: enter it when it is a
    /// directory, shell-open it when it is a file, do nothing when it
    /// does not exist.
    pub fn commit_search(&mut self, settings: &Settings, shell: &impl Shell) -> bool {
        let typed = PathBuf::from(&self.search_box);
        if !typed.exists() {
            return false;
        }
        if typed.is_dir() {
            self.change_directory(typed, settings);
            true
        } else {
            shell.open(&typed)
        }
    }

    fn sync_after_move(&mut self, settings: &Settings) {
        self.search_box = self.history.current().display().to_string();
        self.refresh(settings);
    }
}

/// The user's home directory, falling back to the filesystem root when it
/// cannot be resolved.
pub fn home_directory() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/"))
}
