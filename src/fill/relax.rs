//! Edge-flow relaxation of the interior grid bands.
//!
//! Bands are paired with their mirror across the grid center and adjusted
//! together, outermost pair first. The center row and column are never part
//! of a pair.

use super::collaborator::{EdgeId, MeshEditor};
use super::error::{FillStep, GridFillError, MeshEditError};
use super::plan::GridPlan;
use super::splitter::GridBands;

/// One mirrored pair of interior bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandPair {
    pub pass: usize,
    pub edges: Vec<EdgeId>,
}

/// Lists the band pairs [`relax`] adjusts, in request order (row pair, then
/// column pair, for each pass).
pub fn band_pairs(bands: &GridBands, plan: &GridPlan) -> Result<Vec<BandPair>, GridFillError> {
    if !plan.relaxes() {
        return Ok(Vec::new());
    }

    let mut pairs = Vec::new();
    for pass in 0..plan.relax_passes() {
        // A row owns `cols + 1` ids (split plus segments), a column `rows + 1` links.
        let row_pair =
            mirrored_bands(bands.row_band_start, pass, plan.rows, plan.cols + 1, plan.cols - 1);
        let col_pair =
            mirrored_bands(bands.col_band_start, pass, plan.cols, plan.rows + 1, plan.rows - 1);
        for edges in [row_pair, col_pair] {
            if let Some(edges) = edges.map_err(GridFillError::topology(FillStep::Relax { pass }))? {
                pairs.push(BandPair { pass, edges });
            }
        }
    }
    Ok(pairs)
}

/// Edges of band `pass` and of its mirror `count - 1 - pass`, each `len`
/// long and starting one past the band's first edge. `None` once the pair
/// would meet at or cross the center band.
fn mirrored_bands(
    start: EdgeId,
    pass: usize,
    count: usize,
    stride: usize,
    len: usize,
) -> Result<Option<Vec<EdgeId>>, MeshEditError> {
    let Some(mirror) = count.checked_sub(1 + pass).filter(|&mirror| pass < mirror) else {
        return Ok(None);
    };
    let near = start.offset(1 + pass * stride)?;
    let far = start.offset(1 + mirror * stride)?;
    (0..len)
        .map(|k| near.offset(k))
        .chain((0..len).map(|k| far.offset(k)))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Requests one edge-flow adjustment per mirrored band pair; returns how many
/// were issued. Does nothing when rows or columns number one.
pub fn relax<M: MeshEditor + ?Sized>(
    mesh: &mut M,
    bands: &GridBands,
    plan: &GridPlan,
) -> Result<usize, GridFillError> {
    if !plan.relaxes() {
        log::debug!(
            "edge flow skipped: {} rows x {} columns has no mirrored bands",
            plan.rows,
            plan.cols
        );
        return Ok(0);
    }

    let pairs = band_pairs(bands, plan)?;
    for pair in &pairs {
        mesh.adjust_edge_flow(&pair.edges)
            .map_err(GridFillError::topology(FillStep::Relax { pass: pair.pass }))?;
    }
    log::debug!("edge flow adjusted on {} band pairs", pairs.len());
    Ok(pairs.len())
}
