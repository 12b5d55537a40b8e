//! Run diagnostics for the grid fill tool.
//!
//! Collected by [`GridFill::apply`](super::GridFill::apply) and returned on
//! success. Failed runs report through [`GridFillError`](super::GridFillError)
//! instead.

use std::fmt::Write as _;

use serde::Serialize;

use super::collaborator::RequestCounts;
use super::config::FillMode;
use super::error::FillWarning;
use super::plan::GridPlan;
use super::splitter::GridBands;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridFillDiagnostics {
    /// Edges in the boundary loop that was filled (after any inset).
    pub loop_len: usize,

    pub fill_mode: FillMode,

    /// Only set for [`FillMode::Grid`].
    pub plan: Option<GridPlan>,

    /// Only set once the grid has been split.
    pub bands: Option<GridBands>,

    /// Collaborator requests issued, by kind.
    pub requests: RequestCounts,

    /// Host edge count before and after the run.
    pub edges_before: usize,
    pub edges_after: usize,

    pub warnings: Vec<FillWarning>,
}

impl GridFillDiagnostics {
    #[must_use]
    pub fn new(loop_len: usize, fill_mode: FillMode, edges_before: usize) -> Self {
        Self {
            loop_len,
            fill_mode,
            plan: None,
            bands: None,
            requests: RequestCounts::default(),
            edges_before,
            edges_after: edges_before,
            warnings: Vec::new(),
        }
    }

    /// `true` when the run finished without warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    #[must_use]
    pub fn edges_created(&self) -> usize {
        self.edges_after.saturating_sub(self.edges_before)
    }

    /// One-line summary for logs and the CLI.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!("loop={} mode={:?}", self.loop_len, self.fill_mode);
        if let Some(plan) = &self.plan {
            let _ = write!(out, " rows={} cols={}", plan.rows, plan.cols);
        }
        let _ = write!(
            out,
            " splits={} subdivisions={} flow={} new_edges={}",
            self.requests.split,
            self.requests.subdivide,
            self.requests.flow,
            self.edges_created()
        );
        if !self.warnings.is_empty() {
            let _ = write!(out, " warnings={}", self.warnings.len());
        }
        out
    }
}
