//! Flat index of every object in a file, keyed by normalized path.

use crate::path;
use crate::store::{DataObject, ObjectKind};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

pub const BLUE: &str = "\x1b[94m";
pub const GREEN: &str = "\x1b[92m";
pub const RED: &str = "\x1b[91m";
pub const END_COLOR: &str = "\x1b[0m";

/// Display metadata of one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub class_name: String,
    pub title: String,
    pub kind: ObjectKind,
}

impl DirectoryEntry {
    pub fn from_object(object: &dyn DataObject) -> Self {
        Self {
            name: object.name().to_string(),
            class_name: object.class_name().to_string(),
            title: object.title().to_string(),
            kind: object.kind(),
        }
    }

    /// ANSI color of the entry's kind, `None` for plain objects.
    pub fn color(&self) -> Option<&'static str> {
        match self.kind {
            ObjectKind::Histogram => Some(RED),
            ObjectKind::Tree => Some(GREEN),
            ObjectKind::Directory => Some(BLUE),
            ObjectKind::Other => None,
        }
    }

    /// Wrap `text` in the entry's color when `enabled`.
    pub fn paint(&self, text: &str, enabled: bool) -> String {
        match self.color() {
            Some(color) if enabled => format!("{color}{text}{END_COLOR}"),
            _ => text.to_string(),
        }
    }
}

/// Depth-first walk below `dir`, calling `visit` with each object and its
/// path (`prefix` joined with the names leading to it).
///
/// Directories are descended into once each, and a path is reported at most
/// once, so a hierarchy that loops back on itself still terminates.
pub fn walk<'a>(
    dir: &'a dyn DataObject,
    prefix: &str,
    visit: &mut dyn FnMut(&str, &'a dyn DataObject),
) {
    let mut seen_paths = HashSet::new();
    let mut seen_dirs = HashSet::new();
    seen_dirs.insert(identity(dir));
    walk_inner(dir, prefix, visit, &mut seen_paths, &mut seen_dirs);
}

fn identity(object: &dyn DataObject) -> *const () {
    std::ptr::from_ref(object).cast::<()>()
}

fn walk_inner<'a>(
    dir: &'a dyn DataObject,
    prefix: &str,
    visit: &mut dyn FnMut(&str, &'a dyn DataObject),
    seen_paths: &mut HashSet<String>,
    seen_dirs: &mut HashSet<*const ()>,
) {
    for child in dir.children() {
        if !is_valid_name(child.name()) {
            tracing::warn!(parent = %prefix, name = child.name(), "skipping object with unusable name");
            continue;
        }
        let path = if prefix.is_empty() {
            child.name().to_string()
        } else {
            format!("{prefix}/{}", child.name())
        };
        if !seen_paths.insert(path.clone()) {
            tracing::warn!(path = %path, "duplicate object name, keeping the first one");
            continue;
        }
        visit(&path, child);
        if child.kind() == ObjectKind::Directory && seen_dirs.insert(identity(child)) {
            walk_inner(child, &path, visit, seen_paths, seen_dirs);
        }
    }
}

// Names that would not survive path normalization unchanged.
fn is_valid_name(name: &str) -> bool {
    !matches!(name, "" | "." | "..") && !name.contains('/')
}

/// Every object of a file, built once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DirectoryMap {
    entries: BTreeMap<String, DirectoryEntry>,
}

impl DirectoryMap {
    /// Index every object below `root`. The root itself is not an entry.
    pub fn build(root: &dyn DataObject) -> Self {
        let mut entries = BTreeMap::new();
        walk(root, "", &mut |path: &str, object: &dyn DataObject| {
            entries.insert(path::normalize(path), DirectoryEntry::from_object(object));
        });
        tracing::debug!(objects = entries.len(), "directory map built");
        Self { entries }
    }

    pub fn get(&self, path: &str) -> Option<&DirectoryEntry> {
        self.entries.get(path)
    }

    /// True for directory entries and for the root.
    pub fn is_dir(&self, path: &str) -> bool {
        path.is_empty()
            || self
                .get(path)
                .is_some_and(|entry| entry.kind == ObjectKind::Directory)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectoryEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    /// Entries whose path matches `pattern`, in path order.
    pub fn matching<'a>(
        &'a self,
        pattern: &'a Regex,
    ) -> impl Iterator<Item = (&'a str, &'a DirectoryEntry)> {
        self.iter().filter(|(path, _)| pattern.is_match(path))
    }
}
