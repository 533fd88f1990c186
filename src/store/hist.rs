//! Binned data: axes, 1-D and 2-D histograms.
//!
//! Bin numbering follows the usual convention: bin 0 is the underflow, bins
//! `1..=n_bins` are the regular bins and `n_bins + 1` is the overflow. Content
//! and `sumw2` vectors always carry the two flow bins.

use super::StoreError;
use std::fmt;

/// Relative tolerance used when matching requested edges to existing ones.
const EDGE_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    edges: Vec<f64>,
    labels: Vec<String>,
}

impl Axis {
    /// Variable-width axis. Edges must be finite and strictly increasing.
    pub fn from_edges(edges: Vec<f64>) -> Result<Self, StoreError> {
        if edges.len() < 2 {
            return Err(StoreError::Axis(format!(
                "at least two edges are needed, got {}",
                edges.len()
            )));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(StoreError::Axis("edges must be finite".to_string()));
        }
        if edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(StoreError::Axis(
                "edges must be strictly increasing".to_string(),
            ));
        }
        Ok(Self {
            edges,
            labels: Vec::new(),
        })
    }

    /// `bins` equal-width bins spanning `[min, max)`.
    pub fn uniform(bins: usize, min: f64, max: f64) -> Result<Self, StoreError> {
        if bins == 0 {
            return Err(StoreError::Axis("an axis needs at least one bin".to_string()));
        }
        if !(min < max) {
            return Err(StoreError::Axis(format!("min {min} must be < max {max}")));
        }
        let width = (max - min) / bins as f64;
        let edges = (0..=bins)
            .map(|i| if i == bins { max } else { min + width * i as f64 })
            .collect();
        Self::from_edges(edges)
    }

    /// Attach one text label per regular bin. An empty list removes labels.
    pub fn with_labels(mut self, labels: Vec<String>) -> Result<Self, StoreError> {
        if !labels.is_empty() && labels.len() != self.n_bins() {
            return Err(StoreError::Axis(format!(
                "{} labels for {} bins",
                labels.len(),
                self.n_bins()
            )));
        }
        self.labels = labels;
        Ok(self)
    }

    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    // Flow bins are clamped to the nearest regular bin.
    fn regular(&self, bin: usize) -> usize {
        bin.clamp(1, self.n_bins())
    }

    pub fn low_edge(&self, bin: usize) -> f64 {
        self.edges[self.regular(bin) - 1]
    }

    pub fn up_edge(&self, bin: usize) -> f64 {
        self.edges[self.regular(bin)]
    }

    pub fn width(&self, bin: usize) -> f64 {
        self.up_edge(bin) - self.low_edge(bin)
    }

    pub fn center(&self, bin: usize) -> f64 {
        0.5 * (self.low_edge(bin) + self.up_edge(bin))
    }

    /// Text label of a regular bin, or `""` when the axis has none.
    pub fn label(&self, bin: usize) -> &str {
        if bin == 0 || bin > self.labels.len() {
            return "";
        }
        &self.labels[bin - 1]
    }

    /// Bin containing `x`: 0 below the axis, `n_bins + 1` at or above the
    /// last edge.
    pub fn find_bin(&self, x: f64) -> usize {
        if x < self.edges[0] {
            return 0;
        }
        if x >= self.edges[self.n_bins()] {
            return self.n_bins() + 1;
        }
        self.edges.partition_point(|&e| e <= x)
    }

    fn has_edge(&self, x: f64) -> bool {
        self.edges
            .iter()
            .any(|&e| (e - x).abs() <= EDGE_TOLERANCE * e.abs().max(1.0))
    }
}

/// Axis selector for projecting a 2-D histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionAxis {
    X,
    Y,
}

impl fmt::Display for ProjectionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionAxis::X => write!(f, "X"),
            ProjectionAxis::Y => write!(f, "Y"),
        }
    }
}

fn check_cells(
    name: &str,
    what: &str,
    values: &[f64],
    expected: usize,
) -> Result<(), StoreError> {
    if values.len() != expected {
        return Err(StoreError::Object {
            name: name.to_string(),
            reason: format!(
                "{what} has {} cells, expected {expected} (flow bins included)",
                values.len()
            ),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hist1D {
    pub name: String,
    pub title: String,
    pub class_name: String,
    axis: Axis,
    contents: Vec<f64>,
    sumw2: Option<Vec<f64>>,
}

impl Hist1D {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        axis: Axis,
        contents: Vec<f64>,
        sumw2: Option<Vec<f64>>,
    ) -> Result<Self, StoreError> {
        let name = name.into();
        let cells = axis.n_bins() + 2;
        check_cells(&name, "contents", &contents, cells)?;
        if let Some(sumw2) = &sumw2 {
            check_cells(&name, "sumw2", sumw2, cells)?;
        }
        Ok(Self {
            name,
            title: title.into(),
            class_name: "TH1D".to_string(),
            axis,
            contents,
            sumw2,
        })
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    pub fn n_bins(&self) -> usize {
        self.axis.n_bins()
    }

    pub fn bin_content(&self, bin: usize) -> f64 {
        self.contents.get(bin).copied().unwrap_or(0.0)
    }

    /// `sqrt(sumw2)` when squared weights are stored, `sqrt(|content|)` otherwise.
    pub fn bin_error(&self, bin: usize) -> f64 {
        match &self.sumw2 {
            Some(sumw2) => sumw2.get(bin).copied().unwrap_or(0.0).sqrt(),
            None => self.bin_content(bin).abs().sqrt(),
        }
    }

    /// Merge every `factor` consecutive bins into one.
    ///
    /// Bins left over at the end of the axis are added to the overflow.
    pub fn rebin(&mut self, factor: usize) -> Result<(), StoreError> {
        if factor == 0 {
            return Err(StoreError::Rebin("the merge factor must be at least 1".to_string()));
        }
        let n = self.n_bins();
        let merged = n / factor;
        if merged == 0 {
            return Err(StoreError::Rebin(format!(
                "factor {factor} exceeds the {n} bins of `{}`",
                self.name
            )));
        }

        let edges = (0..=merged).map(|i| self.axis.edges[i * factor]).collect();
        let labels = if self.axis.labels.is_empty() {
            Vec::new()
        } else {
            (0..merged)
                .map(|i| self.axis.labels[i * factor].clone())
                .collect()
        };
        let regroup = |values: &[f64]| -> Vec<f64> {
            let mut out = Vec::with_capacity(merged + 2);
            out.push(values[0]);
            for i in 0..merged {
                out.push(values[1 + i * factor..1 + (i + 1) * factor].iter().sum());
            }
            out.push(values[1 + merged * factor..].iter().sum());
            out
        };

        self.contents = regroup(&self.contents);
        self.sumw2 = self.sumw2.as_deref().map(regroup);
        self.axis = Axis { edges, labels };
        Ok(())
    }

    /// Rebin onto explicit edges, each of which must already be an edge of
    /// this histogram. Bins outside the new range move into the flow bins.
    pub fn rebin_to(&mut self, edges: &[f64]) -> Result<(), StoreError> {
        let target = Axis::from_edges(edges.to_vec())?;
        if let Some(&edge) = edges.iter().find(|&&e| !self.axis.has_edge(e)) {
            return Err(StoreError::Rebin(format!(
                "{edge} is not a bin edge of `{}`",
                self.name
            )));
        }

        let n = self.n_bins();
        let old = &self.axis;
        let destination = |bin: usize| match bin {
            0 => 0,
            b if b == n + 1 => target.n_bins() + 1,
            b => target.find_bin(old.center(b)),
        };
        let regroup = |values: &[f64]| -> Vec<f64> {
            let mut out = vec![0.0; target.n_bins() + 2];
            for (bin, value) in values.iter().enumerate() {
                out[destination(bin)] += value;
            }
            out
        };

        let contents = regroup(&self.contents);
        let sumw2 = self.sumw2.as_deref().map(regroup);
        self.contents = contents;
        self.sumw2 = sumw2;
        self.axis = target;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hist2D {
    pub name: String,
    pub title: String,
    pub class_name: String,
    x_axis: Axis,
    y_axis: Axis,
    contents: Vec<f64>,
    sumw2: Option<Vec<f64>>,
}

impl Hist2D {
    /// Cells are laid out row by row: cell `(ix, iy)` sits at
    /// `iy * (nx + 2) + ix`.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        x_axis: Axis,
        y_axis: Axis,
        contents: Vec<f64>,
        sumw2: Option<Vec<f64>>,
    ) -> Result<Self, StoreError> {
        let name = name.into();
        let cells = (x_axis.n_bins() + 2) * (y_axis.n_bins() + 2);
        check_cells(&name, "contents", &contents, cells)?;
        if let Some(sumw2) = &sumw2 {
            check_cells(&name, "sumw2", sumw2, cells)?;
        }
        Ok(Self {
            name,
            title: title.into(),
            class_name: "TH2D".to_string(),
            x_axis,
            y_axis,
            contents,
            sumw2,
        })
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    fn cell(&self, ix: usize, iy: usize) -> usize {
        iy * (self.x_axis.n_bins() + 2) + ix
    }

    /// Sum over the full range of the other axis, flow bins included.
    pub fn project(&self, axis: ProjectionAxis) -> Hist1D {
        let nx = self.x_axis.n_bins() + 2;
        let ny = self.y_axis.n_bins() + 2;
        let collapse = |values: &[f64]| -> Vec<f64> {
            match axis {
                ProjectionAxis::X => (0..nx)
                    .map(|ix| (0..ny).map(|iy| values[self.cell(ix, iy)]).sum())
                    .collect(),
                ProjectionAxis::Y => (0..ny)
                    .map(|iy| (0..nx).map(|ix| values[self.cell(ix, iy)]).sum())
                    .collect(),
            }
        };
        let (kept, suffix) = match axis {
            ProjectionAxis::X => (&self.x_axis, "_px"),
            ProjectionAxis::Y => (&self.y_axis, "_py"),
        };
        Hist1D {
            name: format!("{}{suffix}", self.name),
            title: self.title.clone(),
            class_name: "TH1D".to_string(),
            axis: kept.clone(),
            contents: collapse(&self.contents),
            sumw2: self.sumw2.as_deref().map(collapse),
        }
    }
}

/// Binned data fetched from a file.
#[derive(Debug, Clone, PartialEq)]
pub enum Histogram {
    OneD(Hist1D),
    TwoD(Hist2D),
}

impl Histogram {
    pub fn name(&self) -> &str {
        match self {
            Histogram::OneD(h) => &h.name,
            Histogram::TwoD(h) => &h.name,
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            Histogram::OneD(_) => 1,
            Histogram::TwoD(_) => 2,
        }
    }
}
