//! Error and warning types for the grid fill pipeline.
//!
//! Validation failures (`InvalidSelection`, `InvalidConfig`, `DegenerateGrid`,
//! `LoopTooLong`)
//! are raised before the first mutation request reaches the host mesh.
//! `TopologyOperation` is raised mid-sequence and leaves whatever topology was
//! already created in place; rolling that back is the caller's transaction.

use std::fmt;

use serde::Serialize;

use super::collaborator::EdgeId;

/// Fatal errors that abort a grid fill run.
#[derive(Debug, thiserror::Error)]
pub enum GridFillError {
    #[error("invalid edge loop selection `{token}`: {reason}")]
    InvalidSelection { token: String, reason: String },
    #[error("invalid grid fill configuration: {0}")]
    InvalidConfig(String),
    #[error(
        "edge loop of {loop_len} edges is too small for a grid ({rows} rows, {cols} columns)"
    )]
    DegenerateGrid { loop_len: usize, rows: i64, cols: i64 },
    #[error("edge loop of {loop_len} edges exceeds the supported maximum of {max}")]
    LoopTooLong { loop_len: usize, max: usize },
    #[error("mesh edit failed during {step}: {source}")]
    TopologyOperation {
        step: FillStep,
        #[source]
        source: MeshEditError,
    },
}

impl GridFillError {
    pub(crate) fn selection(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelection {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn topology(step: FillStep) -> impl FnOnce(MeshEditError) -> Self {
        move |source| Self::TopologyOperation { step, source }
    }

    /// Returns `true` when the error was raised before any mutation request.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::TopologyOperation { .. })
    }
}

/// Errors reported by a [`MeshEditor`](super::collaborator::MeshEditor).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshEditError {
    #[error("{operation} rejected: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },
    #[error("edge {0} does not exist")]
    UnknownEdge(EdgeId),
    #[error("host assigned edge {actual} where edge {expected} was expected")]
    IdSequenceMismatch { expected: EdgeId, actual: EdgeId },
    #[error("edge id {base} + {delta} does not fit in 32 bits")]
    IdSpaceExhausted { base: u32, delta: usize },
}

/// The mutation step that was running when a [`MeshEditError`] surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStep {
    Inset,
    CloseBoundary,
    RowSplit { row: usize },
    RowSubdivide { row: usize },
    ColumnSplit { column: usize, link: usize },
    Relax { pass: usize },
}

impl fmt::Display for FillStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inset => write!(f, "inset"),
            Self::CloseBoundary => write!(f, "boundary close"),
            Self::RowSplit { row } => write!(f, "row {row} split"),
            Self::RowSubdivide { row } => write!(f, "row {row} subdivision"),
            Self::ColumnSplit { column, link } => write!(f, "column {column} split {link}"),
            Self::Relax { pass } => write!(f, "edge flow pass {pass}"),
        }
    }
}

/// Non-fatal conditions reported alongside a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FillWarning {
    /// The loop has an odd edge count; the grid is built from truncated
    /// integer arithmetic and may come out one row or column short.
    NonEvenLoop { loop_len: usize },
}

impl fmt::Display for FillWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonEvenLoop { loop_len } => write!(
                f,
                "edge loop has an odd number of edges ({loop_len}); select an even number of edges"
            ),
        }
    }
}
