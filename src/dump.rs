//! Print a histogram as a fixed-width text table.
//!
//! The table has one column per bin: a line of contents, optionally a line
//! of `+/-` markers and a line of errors, a rule of `=` and a line of bin
//! labels. Underflow and overflow get their own columns unless a display
//! range is set.

use crate::format::{center, format_value};
use crate::literal::{BinRange, Binning, LiteralError};
use crate::store::{DataFile, Hist1D, Histogram, ProjectionAxis, StoreError};
use std::io::{self, Write};

const WIDTH: usize = 9;
const COMPACT_WIDTH: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("no object at `{0}`")]
    NotFound(String),
    #[error("`{path}` is a {class_name}, not a histogram")]
    NotAHistogram { path: String, class_name: String },
    #[error("`{0}` is two-dimensional, use --project X or --project Y")]
    NeedsProjection(String),
    #[error("`{0}` is one-dimensional and can't be projected")]
    ProjectionOf1D(String),
    #[error("--bin-range and --use-labels can't be used together")]
    ConflictingLabels,
    #[error(transparent)]
    Literal(#[from] LiteralError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// What goes in the label line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelMode {
    /// Bin center.
    #[default]
    Center,
    /// Low and high edge, each in half a column.
    BinRange,
    /// The axis' text labels.
    Labels,
}

impl LabelMode {
    pub fn from_flags(bin_range: bool, use_labels: bool) -> Result<Self, DumpError> {
        match (bin_range, use_labels) {
            (true, true) => Err(DumpError::ConflictingLabels),
            (true, false) => Ok(LabelMode::BinRange),
            (false, true) => Ok(LabelMode::Labels),
            (false, false) => Ok(LabelMode::Center),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    pub show_errors: bool,
    pub compact: bool,
    pub labels: LabelMode,
    pub project: Option<ProjectionAxis>,
    pub rebin: Option<Binning>,
    pub range: Option<BinRange>,
}

impl DumpOptions {
    /// Column width in characters.
    pub fn width(&self) -> usize {
        if self.compact { COMPACT_WIDTH } else { WIDTH }
    }
}

/// One column of the table; `label` is already rendered to the column width.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramRow {
    pub label: String,
    pub value: f64,
    pub error: f64,
}

/// Turn whatever was fetched into the 1-D histogram to print: project if
/// asked to, then rebin.
pub fn prepare(histogram: Histogram, opts: &DumpOptions) -> Result<Hist1D, DumpError> {
    let mut hist = match (histogram, opts.project) {
        (Histogram::OneD(h), None) => h,
        (Histogram::OneD(h), Some(_)) => return Err(DumpError::ProjectionOf1D(h.name)),
        (Histogram::TwoD(h), Some(axis)) => h.project(axis),
        (Histogram::TwoD(h), None) => return Err(DumpError::NeedsProjection(h.name)),
    };
    match &opts.rebin {
        Some(Binning::Factor(factor)) => hist.rebin(*factor)?,
        Some(Binning::Edges(edges)) => hist.rebin_to(edges)?,
        None => {}
    }
    Ok(hist)
}

pub fn build_rows(hist: &Hist1D, opts: &DumpOptions) -> Vec<HistogramRow> {
    let width = opts.width();
    let axis = hist.axis();
    let n = hist.n_bins();
    let flow = |label: &str, bin: usize| HistogramRow {
        label: center(label, width),
        value: hist.bin_content(bin),
        error: hist.bin_error(bin),
    };

    let mut rows = Vec::with_capacity(n + 2);
    if opts.range.is_none() {
        rows.push(flow("uflow", 0));
    }
    for bin in 1..=n {
        if let Some(range) = &opts.range
            && !range.contains(axis.center(bin))
        {
            continue;
        }
        let label = match opts.labels {
            LabelMode::Center => format_value(axis.center(bin), width),
            LabelMode::BinRange => format!(
                "{}-{}",
                format_value(axis.low_edge(bin), width / 2),
                format_value(axis.up_edge(bin), width / 2)
            ),
            LabelMode::Labels => {
                let text: String = axis.label(bin).chars().take(width).collect();
                center(&text, width)
            }
        };
        rows.push(HistogramRow {
            label,
            value: hist.bin_content(bin),
            error: hist.bin_error(bin),
        });
    }
    if opts.range.is_none() {
        rows.push(flow("oflow", n + 1));
    }
    rows
}

pub fn render(rows: &[HistogramRow], opts: &DumpOptions, out: &mut dyn Write) -> io::Result<()> {
    let width = opts.width();
    let join = |cells: Vec<String>| cells.join("|");

    let values = join(rows.iter().map(|r| format_value(r.value, width)).collect());
    writeln!(out, "{values}")?;
    if opts.show_errors {
        writeln!(out, "{}", join(vec![center("+/-", width); rows.len()]))?;
        writeln!(
            out,
            "{}",
            join(rows.iter().map(|r| format_value(r.error, width)).collect())
        )?;
    }
    writeln!(out, "{}", "=".repeat(values.chars().count()))?;
    writeln!(out, "{}", join(rows.iter().map(|r| r.label.clone()).collect()))
}

/// Fetch the histogram at `path` from `file` and print it to `out`.
pub fn dump(
    file: &dyn DataFile,
    path: &str,
    opts: &DumpOptions,
    out: &mut dyn Write,
) -> Result<(), DumpError> {
    let object = file
        .get(path)
        .ok_or_else(|| DumpError::NotFound(path.to_string()))?;
    let histogram = object.histogram().ok_or_else(|| DumpError::NotAHistogram {
        path: path.to_string(),
        class_name: object.class_name().to_string(),
    })?;
    tracing::debug!(
        name = histogram.name(),
        dimension = histogram.dimension(),
        "fetched histogram"
    );

    let hist = prepare(histogram, opts)?;
    let rows = build_rows(&hist, opts);
    render(&rows, opts, out)?;
    Ok(())
}
