//! JSON document backend.
//!
//! A document is a single directory node. Nodes are tagged by `type`:
//! `directory`, `hist1d`, `hist2d`, `tree` or `object`.

use super::hist::{Axis, Hist1D, Hist2D, Histogram};
use super::{DataFile, DataObject, ObjectKind, StoreError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AxisDoc {
    Edges {
        edges: Vec<f64>,
        #[serde(default)]
        labels: Vec<String>,
    },
    Uniform {
        bins: usize,
        min: f64,
        max: f64,
        #[serde(default)]
        labels: Vec<String>,
    },
}

impl AxisDoc {
    fn into_axis(self) -> Result<Axis, StoreError> {
        match self {
            AxisDoc::Edges { edges, labels } => Axis::from_edges(edges)?.with_labels(labels),
            AxisDoc::Uniform {
                bins,
                min,
                max,
                labels,
            } => Axis::uniform(bins, min, max)?.with_labels(labels),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum NodeDoc {
    Directory {
        name: String,
        #[serde(default)]
        title: String,
        class: Option<String>,
        #[serde(default)]
        children: Vec<NodeDoc>,
    },
    Hist1d {
        name: String,
        #[serde(default)]
        title: String,
        class: Option<String>,
        axis: AxisDoc,
        contents: Vec<f64>,
        sumw2: Option<Vec<f64>>,
    },
    Hist2d {
        name: String,
        #[serde(default)]
        title: String,
        class: Option<String>,
        x_axis: AxisDoc,
        y_axis: AxisDoc,
        contents: Vec<f64>,
        sumw2: Option<Vec<f64>>,
    },
    Tree {
        name: String,
        #[serde(default)]
        title: String,
        class: Option<String>,
    },
    Object {
        name: String,
        #[serde(default)]
        title: String,
        class: String,
    },
}

/// An object loaded from a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonObject {
    Directory {
        name: String,
        title: String,
        class_name: String,
        children: Vec<JsonObject>,
    },
    Hist1(Hist1D),
    Hist2(Hist2D),
    Tree {
        name: String,
        title: String,
        class_name: String,
    },
    Other {
        name: String,
        title: String,
        class_name: String,
    },
}

impl TryFrom<NodeDoc> for JsonObject {
    type Error = StoreError;

    fn try_from(node: NodeDoc) -> Result<Self, StoreError> {
        let object = match node {
            NodeDoc::Directory {
                name,
                title,
                class,
                children,
            } => JsonObject::Directory {
                name,
                title,
                class_name: class.unwrap_or_else(|| "TDirectoryFile".to_string()),
                children: children
                    .into_iter()
                    .map(JsonObject::try_from)
                    .collect::<Result<_, _>>()?,
            },
            NodeDoc::Hist1d {
                name,
                title,
                class,
                axis,
                contents,
                sumw2,
            } => {
                let hist = Hist1D::new(name, title, axis.into_axis()?, contents, sumw2)?;
                JsonObject::Hist1(match class {
                    Some(class) => hist.with_class(class),
                    None => hist,
                })
            }
            NodeDoc::Hist2d {
                name,
                title,
                class,
                x_axis,
                y_axis,
                contents,
                sumw2,
            } => {
                let hist = Hist2D::new(
                    name,
                    title,
                    x_axis.into_axis()?,
                    y_axis.into_axis()?,
                    contents,
                    sumw2,
                )?;
                JsonObject::Hist2(match class {
                    Some(class) => hist.with_class(class),
                    None => hist,
                })
            }
            NodeDoc::Tree {
                name,
                title,
                class,
            } => JsonObject::Tree {
                name,
                title,
                class_name: class.unwrap_or_else(|| "TTree".to_string()),
            },
            NodeDoc::Object { name, title, class } => JsonObject::Other {
                name,
                title,
                class_name: class,
            },
        };
        Ok(object)
    }
}

impl DataObject for JsonObject {
    fn name(&self) -> &str {
        match self {
            JsonObject::Directory { name, .. }
            | JsonObject::Tree { name, .. }
            | JsonObject::Other { name, .. } => name,
            JsonObject::Hist1(h) => &h.name,
            JsonObject::Hist2(h) => &h.name,
        }
    }

    fn class_name(&self) -> &str {
        match self {
            JsonObject::Directory { class_name, .. }
            | JsonObject::Tree { class_name, .. }
            | JsonObject::Other { class_name, .. } => class_name,
            JsonObject::Hist1(h) => &h.class_name,
            JsonObject::Hist2(h) => &h.class_name,
        }
    }

    fn title(&self) -> &str {
        match self {
            JsonObject::Directory { title, .. }
            | JsonObject::Tree { title, .. }
            | JsonObject::Other { title, .. } => title,
            JsonObject::Hist1(h) => &h.title,
            JsonObject::Hist2(h) => &h.title,
        }
    }

    fn kind(&self) -> ObjectKind {
        match self {
            JsonObject::Directory { .. } => ObjectKind::Directory,
            JsonObject::Hist1(_) | JsonObject::Hist2(_) => ObjectKind::Histogram,
            JsonObject::Tree { .. } => ObjectKind::Tree,
            JsonObject::Other { .. } => ObjectKind::Other,
        }
    }

    fn children(&self) -> Vec<&dyn DataObject> {
        match self {
            JsonObject::Directory { children, .. } => {
                children.iter().map(|c| c as &dyn DataObject).collect()
            }
            _ => Vec::new(),
        }
    }

    fn histogram(&self) -> Option<Histogram> {
        match self {
            JsonObject::Hist1(h) => Some(Histogram::OneD(h.clone())),
            JsonObject::Hist2(h) => Some(Histogram::TwoD(h.clone())),
            _ => None,
        }
    }
}

/// A data file read from a JSON document.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
    root: JsonObject,
}

impl JsonFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut file = Self::from_json(&text)?;
        file.path = path.to_path_buf();
        tracing::info!(path = %path.display(), "opened data file");
        Ok(file)
    }

    /// Parse a document held in memory. The root node must be a directory.
    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        let doc: NodeDoc = serde_json::from_str(text)?;
        let root = JsonObject::try_from(doc)?;
        if root.kind() != ObjectKind::Directory {
            return Err(StoreError::Object {
                name: root.name().to_string(),
                reason: "the document root must be a directory".to_string(),
            });
        }
        Ok(Self {
            path: PathBuf::new(),
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataFile for JsonFile {
    fn root(&self) -> &dyn DataObject {
        &self.root
    }
}
