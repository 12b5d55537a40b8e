//! The host mesh-editing surface the grid fill core drives.
//!
//! The core never stores or evaluates geometry. Every topology change is a
//! request against a [`MeshEditor`], and every new edge is identified by the
//! id the host assigns to it. Hosts assign ids in creation order starting at
//! their current edge count; [`EdgeCursor`] predicts those ids and checks the
//! ones the host reports back.

use std::fmt;

use serde::Serialize;

use super::config::InsetSettings;
use super::error::MeshEditError;
use super::selection::EdgeLoop;

/// Opaque host edge handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EdgeId(pub u32);

impl EdgeId {
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The id the host assigns after `count` existing edges.
    pub fn from_count(count: usize) -> Result<Self, MeshEditError> {
        u32::try_from(count)
            .map(Self)
            .map_err(|_| MeshEditError::IdSpaceExhausted {
                base: 0,
                delta: count,
            })
    }

    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// The id `delta` positions further along the host's id sequence.
    pub fn offset(self, delta: usize) -> Result<Self, MeshEditError> {
        u32::try_from(delta)
            .ok()
            .and_then(|delta| self.0.checked_add(delta))
            .map(Self)
            .ok_or(MeshEditError::IdSpaceExhausted {
                base: self.0,
                delta,
            })
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e[{}]", self.0)
    }
}

/// A point on an existing edge, `fraction` of the way from its start vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InsertionPoint {
    pub edge: EdgeId,
    pub fraction: f64,
}

impl InsertionPoint {
    /// The start vertex of `edge`.
    #[must_use]
    pub const fn at_start(edge: EdgeId) -> Self {
        Self { edge, fraction: 0.0 }
    }
}

impl fmt::Display for InsertionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.edge, self.fraction)
    }
}

/// Mesh editing operations the grid fill consumes.
///
/// Implementations must append new edges at the end of the id sequence, in
/// the order they are created, and report the first id of each batch.
pub trait MeshEditor {
    /// Current total edge count.
    fn edge_count(&self) -> usize;

    /// Fills the open boundary described by `boundary` with a single n-gon.
    fn close_boundary(&mut self, boundary: &EdgeLoop) -> Result<(), MeshEditError>;

    /// Splits a face along a chain through `points`; returns the first new edge.
    fn split_face(&mut self, points: &[InsertionPoint]) -> Result<EdgeId, MeshEditError>;

    /// Splits `edge` into `divisions` segments; returns the first new edge.
    fn subdivide_edge(&mut self, edge: EdgeId, divisions: usize)
    -> Result<EdgeId, MeshEditError>;

    /// Redistributes vertices along `edges` for even spacing. No topology change.
    fn adjust_edge_flow(&mut self, edges: &[EdgeId]) -> Result<(), MeshEditError>;

    /// Insets the open boundary `settings.loop_count` times and returns the
    /// innermost boundary, still open, in loop order.
    fn inset_boundary(
        &mut self,
        boundary: &EdgeLoop,
        settings: &InsetSettings,
    ) -> Result<Vec<EdgeId>, MeshEditError>;

    fn list_selection(&self) -> Vec<String>;

    fn select(&mut self, tokens: &[String]);
}

/// Running prediction of the next id the host will assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeCursor {
    next: EdgeId,
}

impl EdgeCursor {
    /// Seeds the cursor from the host's current edge count.
    pub fn seed<M: MeshEditor + ?Sized>(mesh: &M) -> Result<Self, MeshEditError> {
        Ok(Self {
            next: EdgeId::from_count(mesh.edge_count())?,
        })
    }

    #[must_use]
    pub const fn current(&self) -> EdgeId {
        self.next
    }

    pub fn advance(&mut self, created: usize) -> Result<(), MeshEditError> {
        self.next = self.next.offset(created)?;
        Ok(())
    }

    /// Checks an id reported by the host against the prediction.
    pub fn confirm(&self, actual: EdgeId) -> Result<EdgeId, MeshEditError> {
        if actual == self.next {
            Ok(actual)
        } else {
            Err(MeshEditError::IdSequenceMismatch {
                expected: self.next,
                actual,
            })
        }
    }
}

/// Forwards to an inner editor and counts each request kind.
pub(crate) struct CountingEditor<'a, M: MeshEditor + ?Sized> {
    inner: &'a mut M,
    pub(crate) counts: RequestCounts,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCounts {
    pub close: usize,
    pub inset: usize,
    pub split: usize,
    pub subdivide: usize,
    pub flow: usize,
}

impl RequestCounts {
    #[must_use]
    pub fn mutations(&self) -> usize {
        self.close + self.inset + self.split + self.subdivide + self.flow
    }
}

impl<'a, M: MeshEditor + ?Sized> CountingEditor<'a, M> {
    pub(crate) fn new(inner: &'a mut M) -> Self {
        Self {
            inner,
            counts: RequestCounts::default(),
        }
    }
}

impl<M: MeshEditor + ?Sized> MeshEditor for CountingEditor<'_, M> {
    fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    fn close_boundary(&mut self, boundary: &EdgeLoop) -> Result<(), MeshEditError> {
        self.counts.close += 1;
        self.inner.close_boundary(boundary)
    }

    fn split_face(&mut self, points: &[InsertionPoint]) -> Result<EdgeId, MeshEditError> {
        self.counts.split += 1;
        self.inner.split_face(points)
    }

    fn subdivide_edge(
        &mut self,
        edge: EdgeId,
        divisions: usize,
    ) -> Result<EdgeId, MeshEditError> {
        self.counts.subdivide += 1;
        self.inner.subdivide_edge(edge, divisions)
    }

    fn adjust_edge_flow(&mut self, edges: &[EdgeId]) -> Result<(), MeshEditError> {
        self.counts.flow += 1;
        self.inner.adjust_edge_flow(edges)
    }

    fn inset_boundary(
        &mut self,
        boundary: &EdgeLoop,
        settings: &InsetSettings,
    ) -> Result<Vec<EdgeId>, MeshEditError> {
        self.counts.inset += 1;
        self.inner.inset_boundary(boundary, settings)
    }

    fn list_selection(&self) -> Vec<String> {
        self.inner.list_selection()
    }

    fn select(&mut self, tokens: &[String]) {
        self.inner.select(tokens);
    }
}
