//! Projection of a directory into display-ready rows.
//!
//! The whole listing is rebuilt on every refresh; nothing is cached
//! across render ticks. Missing or unreadable directories are a
//! representable empty state, never an error.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

const SIZE_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// One filesystem entry projected into display fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub path: PathBuf,
    pub display_name: String,
    pub size_label: String,
    pub type_label: String,
    pub is_directory: bool,
}

/// What the presenter should do after a row is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Enter the directory; forwarded to the navigation history.
    NavigateTo(PathBuf),
    /// Hand the file to the OS default handler via the shell collaborator.
    OpenWithShell(PathBuf),
}

/// Ordered rows for one directory at one point in time.
pub type DirectoryListing = Vec<EntryRow>;

/// Enumerate the direct children of `location` into display rows.
///
/// Soft-fails to an empty listing when `location` does not exist or is
/// not a directory. Hidden entries (leading `.`) are skipped unless
/// `show_hidden` is set; entries that are neither regular file,
/// directory, nor symlink are never shown. Rows keep filesystem
/// enumeration order.
pub fn refresh(location: &Path, show_hidden: bool) -> DirectoryListing {
    let read_dir = match fs::read_dir(location) {
        Ok(read_dir) => read_dir,
        Err(err) => {
            debug!("Listing {} unavailable: {err}", location.display());
            return DirectoryListing::new();
        }
    };

    let mut rows = DirectoryListing::new();
    for entry in read_dir.flatten() {
        let display_name = entry.file_name().to_string_lossy().to_string();
        if !show_hidden && is_hidden(&display_name) {
            continue;
        }
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() && !file_type.is_dir() && !file_type.is_symlink() {
            continue;
        }
        let path = entry.path();
        // Symlinks are sized and classified through their target.
        let is_directory = path.is_dir();
        rows.push(EntryRow {
            display_name,
            size_label: size_label(&path, is_directory),
            type_label: type_label(&path, is_directory).to_string(),
            is_directory,
            path,
        });
    }
    rows
}

/// Keep the rows whose display name contains `needle`, case-insensitive.
/// An empty needle keeps everything; source order is preserved.
pub fn filter(listing: &[EntryRow], needle: &str) -> DirectoryListing {
    let needle = needle.to_lowercase();
    listing
        .iter()
        .filter(|row| row.display_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Resolve what activating `row` should mean.
///
/// Pure decision: the caller performs the navigation or shell call, this
/// function does no I/O.
pub fn activate(row: &EntryRow) -> Activation {
    if row.is_directory {
        Activation::NavigateTo(row.path.clone())
    } else {
        Activation::OpenWithShell(row.path.clone())
    }
}

/// An entry is hidden when its filename starts with a dot.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Human-readable byte count using binary units and integer division, so
/// `1536` renders as `"1 KB"`, not `"1.5 KB"`.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes;
    let mut unit = 0;
    while size >= 1024 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024;
        unit += 1;
    }
    format!("{size} {}", SIZE_UNITS[unit])
}

/// Count regular files under `folder`, recursively.
///
/// Recomputed on every refresh with no cache; deep trees make this the
/// most expensive part of a listing. Kept until a caching layer lands.
pub fn count_files(folder: &Path) -> usize {
    let Ok(read_dir) = fs::read_dir(folder) else {
        return 0;
    };
    let mut count = 0;
    for entry in read_dir.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            count += count_files(&entry.path());
        } else if file_type.is_file() {
            count += 1;
        } else if file_type.is_symlink() {
            // A link to a regular file counts; linked directories are
            // not descended into.
            if fs::metadata(entry.path())
                .map(|meta| meta.is_file())
                .unwrap_or(false)
            {
                count += 1;
            }
        }
    }
    count
}

fn size_label(path: &Path, is_directory: bool) -> String {
    if is_directory {
        format!("{} files", count_files(path))
    } else {
        let bytes = fs::metadata(path).map(|meta| meta.len()).unwrap_or(0);
        format_size(bytes)
    }
}

/// Coarse extension-based type label. The extension match is
/// case-sensitive and the set is deliberately closed; directories and
/// unknown extensions all read `Others`.
fn type_label(path: &Path, is_directory: bool) -> &'static str {
    if is_directory {
        return "Others";
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("txt") => "Text",
        Some("pdf") => "PDF",
        Some("jpg" | "jpeg" | "png") => "Image",
        _ => "Others",
    }
}
