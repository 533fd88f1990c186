//! Parsers for the small literals accepted on the `hist2txt` command line:
//! merge factors, edge lists, display ranges and projection axes.
//!
//! Lists are written as `[a, b, ...]` or `(a, b, ...)`; a trailing comma is
//! allowed. Nothing is evaluated, anything else is rejected.

use crate::store::ProjectionAxis;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LiteralError {
    #[error("`{0}` is neither a merge factor nor a list of bin edges")]
    Binning(String),
    #[error("the merge factor must be at least 1")]
    ZeroFactor,
    #[error("a list of bin edges needs at least two values, got {0}")]
    TooFewEdges(usize),
    #[error("`{0}` is not a range, expected `(low, high)` or `[low, high]`")]
    Range(String),
    #[error("`{0}` is not a number")]
    Number(String),
    #[error("unknown projection axis `{0}`, expected X or Y")]
    Axis(String),
}

/// How to rebin a histogram before printing it.
#[derive(Debug, Clone, PartialEq)]
pub enum Binning {
    /// Merge this many consecutive bins.
    Factor(usize),
    /// Rebin onto these edges.
    Edges(Vec<f64>),
}

impl FromStr for Binning {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // `(4)` is a parenthesized factor, not a one-element list.
        if let Some(inner) = s.strip_prefix('(').and_then(|rest| rest.strip_suffix(')'))
            && let Ok(factor) = inner.trim().parse::<usize>()
        {
            return match factor {
                0 => Err(LiteralError::ZeroFactor),
                factor => Ok(Binning::Factor(factor)),
            };
        }
        if let Some(values) = parse_list(s)? {
            if values.len() < 2 {
                return Err(LiteralError::TooFewEdges(values.len()));
            }
            return Ok(Binning::Edges(values));
        }
        match s.parse::<usize>() {
            Ok(0) => Err(LiteralError::ZeroFactor),
            Ok(factor) => Ok(Binning::Factor(factor)),
            Err(_) => Err(LiteralError::Binning(s.to_string())),
        }
    }
}

/// Closed interval of bin centers to display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinRange {
    pub low: f64,
    pub high: f64,
}

impl BinRange {
    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }
}

impl FromStr for BinRange {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_list(s.trim())?.as_deref() {
            Some(&[low, high]) => Ok(BinRange { low, high }),
            _ => Err(LiteralError::Range(s.to_string())),
        }
    }
}

impl FromStr for ProjectionAxis {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "X" => Ok(ProjectionAxis::X),
            "Y" => Ok(ProjectionAxis::Y),
            _ => Err(LiteralError::Axis(s.to_string())),
        }
    }
}

/// `Ok(None)` when `s` is not bracketed at all.
fn parse_list(s: &str) -> Result<Option<Vec<f64>>, LiteralError> {
    let inner = match (s.chars().next(), s.chars().last()) {
        (Some('['), Some(']')) | (Some('('), Some(')')) if s.len() >= 2 => &s[1..s.len() - 1],
        _ => return Ok(None),
    };
    let mut items: Vec<&str> = inner.split(',').map(str::trim).collect();
    if items.last() == Some(&"") {
        items.pop();
    }
    items
        .into_iter()
        .map(|item| {
            item.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| LiteralError::Number(item.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
