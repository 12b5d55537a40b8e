//! In-memory [`MeshEditor`] that records requests instead of editing geometry.
//!
//! Ids are assigned the way the hosts this tool targets assign them: new
//! edges are appended in creation order starting at the current count.
//!
//! | request          | new edges                                  |
//! |------------------|--------------------------------------------|
//! | `split_face`     | `points - 1`                               |
//! | `subdivide_edge` | `divisions`                                |
//! | `inset_boundary` | `2 * N` per loop (rungs, then the new ring) |
//! | others           | none                                       |
//!
//! Used by the CLI scenarios, the web preview and the tests.

use std::fmt;

use serde::Serialize;

use super::collaborator::{EdgeId, InsertionPoint, MeshEditor};
use super::config::InsetSettings;
use super::error::MeshEditError;
use super::selection::EdgeLoop;

/// One recorded collaborator request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum MeshOp {
    CloseBoundary {
        edges: Vec<EdgeId>,
    },
    Inset {
        settings: InsetSettings,
        inner: Vec<EdgeId>,
    },
    Split {
        points: Vec<InsertionPoint>,
        first_new: EdgeId,
    },
    Subdivide {
        edge: EdgeId,
        divisions: usize,
        first_new: EdgeId,
    },
    AdjustFlow {
        edges: Vec<EdgeId>,
    },
    Select {
        tokens: Vec<String>,
    },
}

impl MeshOp {
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Select { .. })
    }
}

impl fmt::Display for MeshOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CloseBoundary { edges } => write!(f, "close_boundary {}", edges.len()),
            Self::Inset { settings, inner } => write!(
                f,
                "inset width={} loops={} axis={:?} inner={}..{}",
                settings.width,
                settings.loop_count,
                settings.axis,
                inner.first().map_or(0, |e| e.index()),
                inner.last().map_or(0, |e| e.index()),
            ),
            Self::Split { points, first_new } => {
                write!(f, "split")?;
                for point in points {
                    write!(f, " {point}")?;
                }
                write!(f, " -> {first_new}")
            }
            Self::Subdivide {
                edge,
                divisions,
                first_new,
            } => write!(f, "subdivide {edge} x{divisions} -> {first_new}"),
            Self::AdjustFlow { edges } => {
                write!(f, "adjust_flow")?;
                for edge in edges {
                    write!(f, " {}", edge.index())?;
                }
                Ok(())
            }
            Self::Select { tokens } => write!(f, "select {}", tokens.join(" ")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingMesh {
    edge_count: usize,
    selection: Vec<String>,
    ops: Vec<MeshOp>,
    mutations: usize,
    fail_at: Option<usize>,
}

impl RecordingMesh {
    /// A mesh that already holds `edge_count` edges.
    #[must_use]
    pub fn new(edge_count: usize) -> Self {
        Self {
            edge_count,
            ..Self::default()
        }
    }

    /// Sets the current selection reported by [`MeshEditor::list_selection`].
    #[must_use]
    pub fn with_selection<S: Into<String>>(mut self, tokens: impl IntoIterator<Item = S>) -> Self {
        self.selection = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Makes the mutation request with zero-based index `call` fail.
    #[must_use]
    pub fn fail_at(mut self, call: usize) -> Self {
        self.fail_at = Some(call);
        self
    }

    #[must_use]
    pub fn ops(&self) -> &[MeshOp] {
        &self.ops
    }

    #[must_use]
    pub fn mutation_count(&self) -> usize {
        self.ops.iter().filter(|op| op.is_mutation()).count()
    }

    #[must_use]
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Renders the recorded requests, one per line.
    #[must_use]
    pub fn script(&self) -> String {
        let mut out = String::new();
        for op in &self.ops {
            out.push_str(&op.to_string());
            out.push('\n');
        }
        out
    }

    fn begin(&mut self, operation: &'static str) -> Result<(), MeshEditError> {
        let call = self.mutations;
        self.mutations += 1;
        if self.fail_at == Some(call) {
            return Err(MeshEditError::Rejected {
                operation,
                reason: format!("injected failure at request {call}"),
            });
        }
        Ok(())
    }

    fn check_edge(&self, edge: EdgeId) -> Result<(), MeshEditError> {
        match usize::try_from(edge.index()) {
            Ok(index) if index < self.edge_count => Ok(()),
            _ => Err(MeshEditError::UnknownEdge(edge)),
        }
    }

    /// Reserves `count` new ids; fails without changing the mesh when the
    /// last of them would not fit in an [`EdgeId`].
    fn allocate(&mut self, count: usize) -> Result<EdgeId, MeshEditError> {
        let first = EdgeId::from_count(self.edge_count)?;
        if let Some(last) = count.checked_sub(1) {
            first.offset(last)?;
        }
        self.edge_count += count;
        Ok(first)
    }
}

impl MeshEditor for RecordingMesh {
    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn close_boundary(&mut self, boundary: &EdgeLoop) -> Result<(), MeshEditError> {
        self.begin("close_boundary")?;
        for edge in boundary.edges() {
            self.check_edge(*edge)?;
        }
        self.ops.push(MeshOp::CloseBoundary {
            edges: boundary.edges().to_vec(),
        });
        Ok(())
    }

    fn split_face(&mut self, points: &[InsertionPoint]) -> Result<EdgeId, MeshEditError> {
        self.begin("split_face")?;
        if points.len() < 2 {
            return Err(MeshEditError::Rejected {
                operation: "split_face",
                reason: format!("needs at least 2 insertion points, got {}", points.len()),
            });
        }
        for (index, point) in points.iter().enumerate() {
            self.check_edge(point.edge)?;
            if !(0.0..=1.0).contains(&point.fraction) {
                return Err(MeshEditError::Rejected {
                    operation: "split_face",
                    reason: format!("fraction {} outside [0, 1]", point.fraction),
                });
            }
            if points[..index].contains(point) {
                return Err(MeshEditError::Rejected {
                    operation: "split_face",
                    reason: format!("insertion point {point} repeats"),
                });
            }
        }

        let first_new = self.allocate(points.len() - 1)?;
        self.ops.push(MeshOp::Split {
            points: points.to_vec(),
            first_new,
        });
        Ok(first_new)
    }

    fn subdivide_edge(
        &mut self,
        edge: EdgeId,
        divisions: usize,
    ) -> Result<EdgeId, MeshEditError> {
        self.begin("subdivide_edge")?;
        self.check_edge(edge)?;
        if divisions == 0 {
            return Err(MeshEditError::Rejected {
                operation: "subdivide_edge",
                reason: "divisions must be at least 1".to_string(),
            });
        }

        let first_new = self.allocate(divisions)?;
        self.ops.push(MeshOp::Subdivide {
            edge,
            divisions,
            first_new,
        });
        Ok(first_new)
    }

    fn adjust_edge_flow(&mut self, edges: &[EdgeId]) -> Result<(), MeshEditError> {
        self.begin("adjust_edge_flow")?;
        if edges.is_empty() {
            return Err(MeshEditError::Rejected {
                operation: "adjust_edge_flow",
                reason: "no edges given".to_string(),
            });
        }
        for edge in edges {
            self.check_edge(*edge)?;
        }
        self.ops.push(MeshOp::AdjustFlow {
            edges: edges.to_vec(),
        });
        Ok(())
    }

    fn inset_boundary(
        &mut self,
        boundary: &EdgeLoop,
        settings: &InsetSettings,
    ) -> Result<Vec<EdgeId>, MeshEditError> {
        self.begin("inset_boundary")?;
        for edge in boundary.edges() {
            self.check_edge(*edge)?;
        }
        if settings.loop_count == 0 {
            return Err(MeshEditError::Rejected {
                operation: "inset_boundary",
                reason: "loop count must be at least 1".to_string(),
            });
        }

        let n = boundary.len();
        let mut ring = self.allocate(2 * n)?.offset(n)?;
        for _ in 1..settings.loop_count {
            ring = self.allocate(2 * n)?.offset(n)?;
        }
        let inner = (0..n)
            .map(|k| ring.offset(k))
            .collect::<Result<Vec<_>, _>>()?;

        self.ops.push(MeshOp::Inset {
            settings: *settings,
            inner: inner.clone(),
        });
        Ok(inner)
    }

    fn list_selection(&self) -> Vec<String> {
        self.selection.clone()
    }

    fn select(&mut self, tokens: &[String]) {
        self.selection = tokens.to_vec();
        self.ops.push(MeshOp::Select {
            tokens: tokens.to_vec(),
        });
    }
}
