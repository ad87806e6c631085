use std::{
    cell::RefCell,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use roam::{
    history::NavigationHistory,
    listing::{self, Activation},
    navigator::FolderNavigator,
    settings::Settings,
    shell::Shell,
    tabs::Tabs,
};

struct ExplorerHarness {
    _temp: TempDir,
    root: PathBuf,
    settings: Settings,
}

impl ExplorerHarness {
    /// Build `/<root>/a.txt` (500 bytes), `/<root>/.hidden` (10 bytes) and
    /// `/<root>/docs` with three regular files inside.
    fn with_sample_tree() -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let root = temp.path().join("u");
        std::fs::create_dir(&root).expect("create root");
        write_bytes(&root.join("a.txt"), 500);
        write_bytes(&root.join(".hidden"), 10);
        let docs = root.join("docs");
        std::fs::create_dir(&docs).expect("create docs");
        for name in ["one.txt", "two.pdf", "three.png"] {
            write_bytes(&docs.join(name), 10);
        }
        Self {
            _temp: temp,
            root,
            settings: Settings::default(),
        }
    }

    fn docs(&self) -> PathBuf {
        self.root.join("docs")
    }
}

fn write_bytes(path: &Path, len: usize) {
    let mut file = File::create(path).expect("create file");
    file.write_all(&vec![0u8; len]).expect("write file");
}

#[derive(Default)]
struct RecordingShell {
    opened: RefCell<Vec<PathBuf>>,
}

impl Shell for RecordingShell {
    fn open(&self, path: &Path) -> bool {
        self.opened.borrow_mut().push(path.to_path_buf());
        true
    }
}

#[test]
fn listing_projects_the_sample_tree() {
    let h = ExplorerHarness::with_sample_tree();
    let rows = listing::refresh(&h.root, h.settings.show_hidden);

    assert_eq!(rows.len(), 2);
    let file_row = rows.iter().find(|row| row.display_name == "a.txt").unwrap();
    assert_eq!(file_row.size_label, "500 B");
    assert_eq!(file_row.type_label, "Text");
    let dir_row = rows.iter().find(|row| row.display_name == "docs").unwrap();
    assert_eq!(dir_row.size_label, "3 files");
    assert_eq!(dir_row.type_label, "Others");

    // Same directory with hidden entries is a superset.
    let with_hidden = listing::refresh(&h.root, true);
    assert_eq!(with_hidden.len(), 3);
    for row in &rows {
        assert!(with_hidden.iter().any(|other| other.path == row.path));
    }
}

#[test]
fn parent_after_navigate_enables_forward() {
    let h = ExplorerHarness::with_sample_tree();
    let mut pane = FolderNavigator::new(&h.root, &h.settings);

    pane.change_directory(h.docs(), &h.settings);
    assert_eq!(pane.current_directory(), h.docs().as_path());
    assert_eq!(pane.entries().len(), 3);

    assert!(pane.go_to_parent(&h.settings));
    assert_eq!(pane.current_directory(), h.root.as_path());
    assert_eq!(pane.history().forward(), [h.docs()]);

    assert!(pane.go_forward(&h.settings));
    assert_eq!(pane.current_directory(), h.docs().as_path());
}

#[test]
fn activation_decides_without_performing_io() {
    let h = ExplorerHarness::with_sample_tree();
    let rows = listing::refresh(&h.root, h.settings.show_hidden);

    for row in &rows {
        let expected = if row.is_directory {
            Activation::NavigateTo(row.path.clone())
        } else {
            Activation::OpenWithShell(row.path.clone())
        };
        assert_eq!(listing::activate(row), expected);
    }
}

#[test]
fn opening_a_file_goes_through_the_shell_collaborator() {
    let h = ExplorerHarness::with_sample_tree();
    let mut pane = FolderNavigator::new(&h.root, &h.settings);
    let shell = RecordingShell::default();

    let file_row = pane
        .entries()
        .iter()
        .find(|row| !row.is_directory)
        .unwrap()
        .clone();
    assert!(pane.open_entry(&file_row, &h.settings, &shell));
    assert_eq!(shell.opened.borrow().as_slice(), [file_row.path.clone()]);
    assert_eq!(pane.current_directory(), h.root.as_path());

    let dir_row = pane
        .entries()
        .iter()
        .find(|row| row.is_directory)
        .unwrap()
        .clone();
    assert!(pane.open_entry(&dir_row, &h.settings, &shell));
    assert_eq!(pane.current_directory(), h.docs().as_path());
    // Entering a directory never touches the shell.
    assert_eq!(shell.opened.borrow().len(), 1);
}

#[test]
fn navigating_to_a_dead_path_lists_empty_and_recovers() {
    let h = ExplorerHarness::with_sample_tree();
    let mut pane = FolderNavigator::new(&h.root, &h.settings);

    pane.change_directory(h.root.join("missing"), &h.settings);
    assert!(pane.entries().is_empty());

    assert!(pane.go_back(&h.settings));
    assert_eq!(pane.current_directory(), h.root.as_path());
    assert_eq!(pane.entries().len(), 2);
}

#[test]
fn history_stays_bounded_under_long_sessions() {
    let h = ExplorerHarness::with_sample_tree();
    let settings = Settings {
        max_history_size: 4,
        ..Settings::default()
    };
    let mut history = NavigationHistory::new(&h.root);

    for _ in 0..20 {
        history.navigate_to(h.docs(), settings.max_history_size);
        history.navigate_to(&h.root, settings.max_history_size);
        assert!(history.back().len() <= settings.max_history_size);
        assert!(history.forward().len() <= settings.max_history_size);
    }
    while history.go_back(settings.max_history_size) {
        assert!(history.forward().len() <= settings.max_history_size);
    }
}

#[test]
fn tabs_browse_the_same_tree_independently() {
    let h = ExplorerHarness::with_sample_tree();
    let mut tabs = Tabs::new();
    let first = tabs.add(&h.root, true, &h.settings);
    let second = tabs.add(&h.root, false, &h.settings);
    assert_eq!(tabs.current_id(), Some(first));

    tabs.current_mut()
        .unwrap()
        .change_directory(h.docs(), &h.settings);
    assert_eq!(
        tabs.pane(first).unwrap().current_directory(),
        h.docs().as_path()
    );
    assert_eq!(
        tabs.pane(second).unwrap().current_directory(),
        h.root.as_path()
    );

    tabs.remove(first);
    assert_eq!(tabs.current_id(), Some(second));
}
