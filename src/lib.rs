//! Library exports for the explorer core; presenters and tests build on these.
/// Application directory helpers.
pub mod app_dirs;
/// Bounded back/forward navigation history.
pub mod history;
/// Directory listing projection and entry formatting.
pub mod listing;
/// Logging setup for embedding applications.
pub mod logging;
/// One explorer pane coupling history, listing, and search box.
pub mod navigator;
/// Explorer settings and their TOML persistence.
pub mod settings;
/// Shell-open collaborator for non-directory entries.
pub mod shell;
/// Stable-id arena of explorer tabs.
pub mod tabs;
