//! The object model the tools navigate.
//!
//! Everything the shell and the dumper know about a data file goes through the
//! [`DataFile`] and [`DataObject`] traits: fetching an object by path, listing
//! the children of a directory, and asking an object for its name, class,
//! title and kind. Histograms are handed out as owned [`Histogram`] values so
//! callers can rebin or project them without touching the file.
//!
//! [`JsonFile`] is the bundled backend, reading a hierarchy from a JSON
//! document.

mod hist;
mod json;

pub use hist::{Axis, Hist1D, Hist2D, Histogram, ProjectionAxis};
pub use json::{JsonFile, JsonObject};

use std::path::PathBuf;

/// Coarse classification of an object, as used for listing and navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Histogram,
    Tree,
    Directory,
    Other,
}

impl ObjectKind {
    /// Single-letter code used by `find --type`.
    pub fn code(self) -> char {
        match self {
            ObjectKind::Histogram => 'h',
            ObjectKind::Tree => 't',
            ObjectKind::Directory => 'd',
            ObjectKind::Other => 'o',
        }
    }
}

/// An object stored in a data file.
pub trait DataObject {
    fn name(&self) -> &str;

    /// Concrete class of the object, e.g. `TH1D` or `TDirectoryFile`.
    fn class_name(&self) -> &str;

    fn title(&self) -> &str;

    fn kind(&self) -> ObjectKind;

    /// Direct children. Empty for anything that is not a directory.
    fn children(&self) -> Vec<&dyn DataObject> {
        Vec::new()
    }

    /// An owned copy of the binned data, if this object is a histogram.
    fn histogram(&self) -> Option<Histogram> {
        None
    }
}

/// An opened data file: a root directory plus lookup by path.
pub trait DataFile {
    fn root(&self) -> &dyn DataObject;

    /// Look up an object by a `/`-separated path relative to the root.
    ///
    /// The empty path is the root itself.
    fn get(&self, path: &str) -> Option<&dyn DataObject> {
        let mut current = self.root();
        for part in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .children()
                .into_iter()
                .find(|child| child.name() == part)?;
        }
        Some(current)
    }
}

/// Errors raised while loading files or manipulating histograms.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("can't read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid axis: {0}")]
    Axis(String),
    #[error("invalid object `{name}`: {reason}")]
    Object { name: String, reason: String },
    #[error("rebin failed: {0}")]
    Rebin(String),
}
