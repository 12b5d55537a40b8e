//! Grid planning: row/column counts and the anchor pair for a loop of `N` edges.
//!
//! ```text
//! span = N / 4
//! rows = span       (span odd)
//!      = span - 1   (span even)
//! cols = N / 2 - rows - 2
//! ```
//!
//! The row count is always odd so the grid has a true center row. The two
//! anchors start diametrically opposite (positions `offset` and
//! `N / 2 + offset`) and are pulled back by `(span - 1) / 2` so the band of
//! rows is centered on them.

use serde::Serialize;

use super::error::{FillWarning, GridFillError};
use super::selection::MAX_LOOP_LEN;

/// Wraps a signed loop position into `[0, n)`. Negative values wrap to the
/// high end of the loop.
///
/// # Panics
/// Panics when `n` is zero.
#[must_use]
pub fn wrap(x: i64, n: usize) -> usize {
    let modulus = i128::try_from(n).unwrap_or(i128::MAX);
    let wrapped = i128::from(x).rem_euclid(modulus);
    usize::try_from(wrapped).unwrap_or_default()
}

/// Derived grid layout for one fill invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPlan {
    pub loop_len: usize,
    pub span: usize,
    pub rows: usize,
    pub cols: usize,
    pub offset: i64,
    /// Loop position of the first row's start point.
    pub anchor_i: usize,
    /// Loop position of the first row's end point.
    pub anchor_j: usize,
}

impl GridPlan {
    /// Whether the edge-flow pass has a symmetric pair of bands to work on.
    #[must_use]
    pub fn relaxes(&self) -> bool {
        self.rows > 1 && self.cols > 1
    }

    /// Number of mirrored band pairs the relaxer walks through.
    #[must_use]
    pub fn relax_passes(&self) -> usize {
        self.span.saturating_sub(1) / 2
    }

    /// Quads produced inside the loop by a full grid fill.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        (self.rows + 1) * (self.cols + 1)
    }

    /// The loop position `steps` further along from `position`.
    #[must_use]
    pub fn forward(&self, position: usize, steps: usize) -> usize {
        (position % self.loop_len + steps % self.loop_len) % self.loop_len
    }

    /// The loop position `steps` back from `position`.
    #[must_use]
    pub fn backward(&self, position: usize, steps: usize) -> usize {
        (position % self.loop_len + self.loop_len - steps % self.loop_len) % self.loop_len
    }
}

/// Plans a grid for a loop of `loop_len` edges, rotated by `offset` positions.
///
/// Odd loops are planned with truncated arithmetic and reported through the
/// returned warnings. Loops too small for one row and one column fail with
/// [`GridFillError::DegenerateGrid`]; loops over [`MAX_LOOP_LEN`] with
/// [`GridFillError::LoopTooLong`]. Any `offset` is accepted.
pub fn plan(
    loop_len: usize,
    offset: i64,
) -> Result<(GridPlan, Vec<FillWarning>), GridFillError> {
    if loop_len > MAX_LOOP_LEN {
        return Err(GridFillError::LoopTooLong {
            loop_len,
            max: MAX_LOOP_LEN,
        });
    }

    let mut warnings = Vec::new();
    if loop_len % 2 == 1 {
        let warning = FillWarning::NonEvenLoop { loop_len };
        log::warn!("{warning}");
        warnings.push(warning);
    }

    let n = i64::try_from(loop_len).map_err(|_| GridFillError::LoopTooLong {
        loop_len,
        max: MAX_LOOP_LEN,
    })?;
    let span = n / 4;
    let rows = if span % 2 == 1 { span } else { span - 1 };
    let cols = n / 2 - rows - 2;

    let degenerate = || GridFillError::DegenerateGrid {
        loop_len,
        rows,
        cols,
    };
    if rows < 1 || cols < 1 {
        return Err(degenerate());
    }
    let span = usize::try_from(span).map_err(|_| degenerate())?;
    let rows = usize::try_from(rows).map_err(|_| degenerate())?;
    let cols = usize::try_from(cols).map_err(|_| degenerate())?;

    // Reduce the offset before adding anything to it; it may be any i64.
    let start = wrap(offset, loop_len);
    let pull = (span - 1) / 2;
    let anchor_i = (start + loop_len - pull) % loop_len;
    let anchor_j = (start + loop_len / 2 + pull) % loop_len;

    let plan = GridPlan {
        loop_len,
        span,
        rows,
        cols,
        offset,
        anchor_i,
        anchor_j,
    };
    log::debug!(
        "planned grid for {loop_len} edges: span={} rows={} cols={} anchors=({anchor_i}, {anchor_j})",
        plan.span,
        plan.rows,
        plan.cols
    );
    Ok((plan, warnings))
}
