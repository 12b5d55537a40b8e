mod collaborator;
mod config;
mod diagnostics;
mod error;
mod operation;
mod plan;
mod recorder;
mod relax;
mod selection;
mod splitter;

pub use collaborator::{EdgeCursor, EdgeId, InsertionPoint, MeshEditor, RequestCounts};
pub use config::{FillMode, GridFillConfig, InsetAxis, InsetSettings};
pub use diagnostics::GridFillDiagnostics;
pub use error::{FillStep, FillWarning, GridFillError, MeshEditError};
pub use operation::GridFill;
pub use plan::{GridPlan, plan, wrap};
pub use recorder::{MeshOp, RecordingMesh};
pub use relax::{BandPair, band_pairs, relax};
pub use selection::{EdgeLoop, EdgeRange, MAX_LOOP_LEN, map_loop, parse_token};
pub use splitter::{GridBands, build_grid};

#[cfg(test)]
mod tests;
