//! Grid construction: row cross-edges first, then the column chains that
//! thread through the row subdivision points.
//!
//! Id bookkeeping per row (`c = cols`):
//!
//! ```text
//! k          the split edge across the loop
//! k+1..=k+c  its subdivision segments; k+1+r is the start of segment r
//! next row   k + c + 1
//! ```
//!
//! Columns connect the start vertices of matching segments across rows, so
//! every row must exist before the first column is requested.

use serde::Serialize;

use super::collaborator::{EdgeCursor, EdgeId, InsertionPoint, MeshEditor};
use super::error::{FillStep, GridFillError};
use super::plan::GridPlan;
use super::selection::EdgeLoop;

/// First ids of the row and column edge bands created by [`build_grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridBands {
    pub row_band_start: EdgeId,
    pub col_band_start: EdgeId,
}

/// Splits the closed loop face into a `rows x cols` grid.
///
/// Every request is checked against the cursor prediction; a host that
/// assigns ids out of sequence fails the run instead of silently wiring
/// columns to the wrong vertices.
pub fn build_grid<M: MeshEditor + ?Sized>(
    mesh: &mut M,
    boundary: &EdgeLoop,
    plan: &GridPlan,
) -> Result<GridBands, GridFillError> {
    let (row_band_start, last_i) = split_rows(mesh, boundary, plan)?;
    let col_band_start = split_columns(mesh, boundary, plan, row_band_start, last_i)?;
    Ok(GridBands {
        row_band_start,
        col_band_start,
    })
}

/// Returns the first row edge and the loop position the last row started at.
fn split_rows<M: MeshEditor + ?Sized>(
    mesh: &mut M,
    boundary: &EdgeLoop,
    plan: &GridPlan,
) -> Result<(EdgeId, usize), GridFillError> {
    let mut cursor =
        EdgeCursor::seed(mesh).map_err(GridFillError::topology(FillStep::RowSplit { row: 0 }))?;
    let row_band_start = cursor.current();
    let mut i = plan.anchor_i;
    let mut j = plan.anchor_j;

    for row in 0..plan.rows {
        let points = [
            InsertionPoint::at_start(boundary.edge_at(i)),
            InsertionPoint::at_start(boundary.edge_at(j)),
        ];
        let edge = mesh
            .split_face(&points)
            .and_then(|actual| cursor.confirm(actual))
            .map_err(GridFillError::topology(FillStep::RowSplit { row }))?;

        let mut segments = cursor;
        segments
            .advance(1)
            .and_then(|()| mesh.subdivide_edge(edge, plan.cols))
            .and_then(|actual| segments.confirm(actual))
            .map_err(GridFillError::topology(FillStep::RowSubdivide { row }))?;

        log::debug!("row {row}: split {} -> {} as {edge}", points[0], points[1]);

        if row + 1 == plan.rows {
            break;
        }
        i = plan.forward(i, 1);
        j = plan.backward(j, 1);
        cursor
            .advance(plan.cols + 1)
            .map_err(GridFillError::topology(FillStep::RowSplit { row: row + 1 }))?;
    }

    Ok((row_band_start, i))
}

fn split_columns<M: MeshEditor + ?Sized>(
    mesh: &mut M,
    boundary: &EdgeLoop,
    plan: &GridPlan,
    row_band_start: EdgeId,
    last_i: usize,
) -> Result<EdgeId, GridFillError> {
    let first = FillStep::ColumnSplit { column: 0, link: 0 };
    let mut cursor = EdgeCursor::seed(mesh).map_err(GridFillError::topology(first))?;
    let col_band_start = cursor.current();
    let mut i = plan.forward(last_i, 2);
    let mut j = plan.backward(plan.anchor_i, 2);
    let mut row_point = row_band_start
        .offset(1)
        .map_err(GridFillError::topology(first))?;

    for column in 0..plan.cols {
        let mut from = InsertionPoint::at_start(boundary.edge_at(j));
        for link in 0..=plan.rows {
            let step = FillStep::ColumnSplit { column, link };
            let target = if link < plan.rows {
                row_point.offset(link * (plan.cols + 1))
            } else {
                Ok(boundary.edge_at(i))
            };
            let to = target
                .map(InsertionPoint::at_start)
                .map_err(GridFillError::topology(step))?;
            mesh.split_face(&[from, to])
                .and_then(|actual| cursor.confirm(actual))
                .and_then(|_| cursor.advance(1))
                .map_err(GridFillError::topology(step))?;
            from = to;
        }

        log::debug!(
            "column {column}: chained {} splits from loop position {j} to {i}",
            plan.rows + 1
        );

        if column + 1 == plan.cols {
            break;
        }
        i = plan.forward(i, 1);
        j = plan.backward(j, 1);
        row_point = row_point.offset(1).map_err(GridFillError::topology(
            FillStep::ColumnSplit {
                column: column + 1,
                link: 0,
            },
        ))?;
    }

    Ok(col_band_start)
}
