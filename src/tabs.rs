//! Tab collection for the explorer: independent panes keyed by stable id.
//!
//! Tabs are addressed by [`TabId`], never by position, so removing a tab
//! cannot invalidate the handle to any other. Each tab owns its own
//! history and listing; there is no shared mutable state between them.

use std::path::PathBuf;

use tracing::debug;

use crate::navigator::FolderNavigator;
use crate::settings::Settings;

/// Stable handle for one tab. Ids are never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(u64);

/// Ordered arena of explorer tabs with an optional current selection.
#[derive(Debug, Default)]
pub struct Tabs {
    tabs: Vec<(TabId, FolderNavigator)>,
    current: Option<TabId>,
    next_id: u64,
}

impl Tabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Tabs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (TabId, &FolderNavigator)> {
        self.tabs.iter().map(|(id, pane)| (*id, pane))
    }

    pub fn current_id(&self) -> Option<TabId> {
        self.current
    }

    pub fn current(&self) -> Option<&FolderNavigator> {
        self.pane(self.current?)
    }

    pub fn current_mut(&mut self) -> Option<&mut FolderNavigator> {
        let id = self.current?;
        self.pane_mut(id)
    }

    pub fn pane(&self, id: TabId) -> Option<&FolderNavigator> {
        self.tabs
            .iter()
            .find(|(tab_id, _)| *tab_id == id)
            .map(|(_, pane)| pane)
    }

    pub fn pane_mut(&mut self, id: TabId) -> Option<&mut FolderNavigator> {
        self.tabs
            .iter_mut()
            .find(|(tab_id, _)| *tab_id == id)
            .map(|(_, pane)| pane)
    }

    /// Open a new tab at `path`. The first tab always becomes current;
    /// later ones only when `select` is set.
    pub fn add(&mut self, path: impl Into<PathBuf>, select: bool, settings: &Settings) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;
        self.tabs.push((id, FolderNavigator::new(path, settings)));
        if select || self.current.is_none() {
            self.current = Some(id);
        }
        debug!("Added tab {id:?}");
        id
    }

    /// Make `id` the current tab. Unknown ids are ignored.
    pub fn select(&mut self, id: TabId) -> bool {
        if self.pane(id).is_none() {
            debug!("Ignoring selection of unknown tab {id:?}");
            return false;
        }
        self.current = Some(id);
        true
    }

    /// Close a tab. When the current tab is removed, selection falls back
    /// to its predecessor in insertion order (or the new first tab);
    /// closing the last tab leaves nothing selected.
    pub fn remove(&mut self, id: TabId) -> bool {
        let Some(position) = self.tabs.iter().position(|(tab_id, _)| *tab_id == id) else {
            debug!("Ignoring removal of unknown tab {id:?}");
            return false;
        };
        self.tabs.remove(position);
        if self.current == Some(id) {
            self.current = if self.tabs.is_empty() {
                None
            } else {
                let fallback = position.saturating_sub(1).min(self.tabs.len() - 1);
                Some(self.tabs[fallback].0)
            };
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tabs_with(paths: &[&std::path::Path], settings: &Settings) -> (Tabs, Vec<TabId>) {
        let mut tabs = Tabs::new();
        let ids = paths
            .iter()
            .map(|path| tabs.add(*path, false, settings))
            .collect();
        (tabs, ids)
    }

    #[test]
    fn first_tab_becomes_current() {
        let dir = tempdir().unwrap();
        let settings = Settings::default();
        let (tabs, ids) = tabs_with(&[dir.path(), dir.path()], &settings);
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs.current_id(), Some(ids[0]));
    }

    #[test]
    fn ids_stay_valid_after_removal() {
        let dir = tempdir().unwrap();
        let settings = Settings::default();
        let (mut tabs, ids) = tabs_with(&[dir.path(), dir.path(), dir.path()], &settings);

        assert!(tabs.remove(ids[0]));
        // The handles of the surviving tabs are untouched.
        assert!(tabs.pane(ids[1]).is_some());
        assert!(tabs.pane(ids[2]).is_some());
        assert!(tabs.pane(ids[0]).is_none());
        assert!(!tabs.remove(ids[0]));
    }

    #[test]
    fn removing_current_falls_back_to_predecessor() {
        let dir = tempdir().unwrap();
        let settings = Settings::default();
        let (mut tabs, ids) = tabs_with(&[dir.path(), dir.path(), dir.path()], &settings);

        assert!(tabs.select(ids[1]));
        assert!(tabs.remove(ids[1]));
        assert_eq!(tabs.current_id(), Some(ids[0]));

        assert!(tabs.remove(ids[0]));
        assert_eq!(tabs.current_id(), Some(ids[2]));

        assert!(tabs.remove(ids[2]));
        assert_eq!(tabs.current_id(), None);
        assert!(tabs.is_empty());
    }

    #[test]
    fn removing_a_background_tab_keeps_selection() {
        let dir = tempdir().unwrap();
        let settings = Settings::default();
        let (mut tabs, ids) = tabs_with(&[dir.path(), dir.path()], &settings);
        tabs.select(ids[0]);
        tabs.remove(ids[1]);
        assert_eq!(tabs.current_id(), Some(ids[0]));
    }

    #[test]
    fn tabs_navigate_independently() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let settings = Settings::default();

        let mut tabs = Tabs::new();
        let left = tabs.add(dir.path(), true, &settings);
        let right = tabs.add(dir.path(), false, &settings);

        tabs.pane_mut(left)
            .unwrap()
            .change_directory(&sub, &settings);

        assert_eq!(tabs.pane(left).unwrap().current_directory(), sub.as_path());
        assert_eq!(tabs.pane(right).unwrap().current_directory(), dir.path());
        assert!(!tabs.pane(right).unwrap().can_go_back());
    }

    #[test]
    fn select_ignores_unknown_ids() {
        let dir = tempdir().unwrap();
        let settings = Settings::default();
        let (mut tabs, ids) = tabs_with(&[dir.path()], &settings);
        let stale = {
            let mut other = Tabs::new();
            other.add(dir.path(), true, &settings);
            other.add(dir.path(), true, &settings)
        };
        assert!(!tabs.select(stale));
        assert_eq!(tabs.current_id(), Some(ids[0]));
    }
}
