//! The grid fill tool: validation, optional inset, fill, selection restore.
//!
//! ```ignore
//! use gridfill_engine::fill::{GridFill, GridFillConfig};
//!
//! let mut mesh = host_mesh_editor();
//! let diagnostics = GridFill::new(GridFillConfig::default()).apply(&mut mesh)?;
//! println!("{}", diagnostics.summary());
//! ```
//!
//! Everything that can be rejected without touching the mesh (selection,
//! settings, loop size) is checked before the first request. A failure after
//! that point leaves the partial topology in place; callers wrap the run in
//! their own undo transaction.

use super::collaborator::{CountingEditor, EdgeId, MeshEditor};
use super::config::{FillMode, GridFillConfig};
use super::diagnostics::GridFillDiagnostics;
use super::error::{FillStep, GridFillError, MeshEditError};
use super::plan::{GridPlan, plan};
use super::relax::relax;
use super::selection::{EdgeLoop, map_loop};
use super::splitter::build_grid;

#[derive(Debug, Clone, Default)]
pub struct GridFill {
    config: GridFillConfig,
}

impl GridFill {
    #[must_use]
    pub fn new(config: GridFillConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GridFillConfig {
        &self.config
    }

    /// Fills the loop currently selected on `mesh`.
    pub fn apply<M: MeshEditor + ?Sized>(
        &self,
        mesh: &mut M,
    ) -> Result<GridFillDiagnostics, GridFillError> {
        let tokens = mesh.list_selection();
        self.apply_to(mesh, &tokens)
    }

    /// Fills the loop described by `tokens`, then selects `tokens` again.
    pub fn apply_to<M: MeshEditor + ?Sized>(
        &self,
        mesh: &mut M,
        tokens: &[String],
    ) -> Result<GridFillDiagnostics, GridFillError> {
        self.config.validate()?;
        let mut boundary = map_loop(tokens)?;
        let loop_len = boundary.len();

        let mut diagnostics =
            GridFillDiagnostics::new(loop_len, self.config.fill_mode, mesh.edge_count());

        // Insetting keeps the loop length, so the plan made here still holds
        // for the inner loop.
        let grid_plan = if self.config.fill_mode == FillMode::Grid {
            let (grid_plan, warnings) = plan(loop_len, self.config.effective_offset())?;
            diagnostics.plan = Some(grid_plan);
            diagnostics.warnings.extend(warnings);
            Some(grid_plan)
        } else {
            None
        };

        let mut editor = CountingEditor::new(mesh);

        if let Some(settings) = self.config.inset() {
            let inner = editor
                .inset_boundary(&boundary, &settings)
                .and_then(|edges| same_length(edges, loop_len))
                .map_err(GridFillError::topology(FillStep::Inset))?;
            boundary = EdgeLoop::from_edges(inner)?;
            log::debug!(
                "inset {} loops of width {}; filling inner loop",
                settings.loop_count,
                settings.width
            );
        }

        match (self.config.fill_mode, grid_plan) {
            (FillMode::Grid, Some(grid_plan)) => {
                close(&mut editor, &boundary)?;
                fill_grid(&mut editor, &boundary, &grid_plan, &mut diagnostics)?;
            }
            (FillMode::Ngon, _) => close(&mut editor, &boundary)?,
            _ => {}
        }

        diagnostics.requests = editor.counts;
        diagnostics.edges_after = editor.edge_count();
        editor.select(tokens);

        log::info!("completed grid fill: {}", diagnostics.summary());
        Ok(diagnostics)
    }
}

fn same_length(edges: Vec<EdgeId>, loop_len: usize) -> Result<Vec<EdgeId>, MeshEditError> {
    if edges.len() == loop_len {
        Ok(edges)
    } else {
        Err(MeshEditError::Rejected {
            operation: "inset_boundary",
            reason: format!("inner loop has {} edges, expected {loop_len}", edges.len()),
        })
    }
}

fn close<M: MeshEditor + ?Sized>(mesh: &mut M, boundary: &EdgeLoop) -> Result<(), GridFillError> {
    mesh.close_boundary(boundary)
        .map_err(GridFillError::topology(FillStep::CloseBoundary))
}

fn fill_grid<M: MeshEditor + ?Sized>(
    mesh: &mut M,
    boundary: &EdgeLoop,
    grid_plan: &GridPlan,
    diagnostics: &mut GridFillDiagnostics,
) -> Result<(), GridFillError> {
    let bands = build_grid(mesh, boundary, grid_plan)?;
    diagnostics.bands = Some(bands);
    relax(mesh, &bands, grid_plan)?;
    Ok(())
}
