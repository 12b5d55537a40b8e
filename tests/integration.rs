use gridfill_engine::fill::{
    EdgeId, EdgeLoop, FillMode, GridFill, GridFillConfig, GridFillError, InsetSettings,
    InsertionPoint, MeshEditError, MeshEditor, RecordingMesh, map_loop,
};

/// Minimal host: counts edges and keeps the split chains it was asked for.
#[derive(Default)]
struct CountingHost {
    edges: usize,
    splits: Vec<Vec<InsertionPoint>>,
    flows: usize,
    selection: Vec<String>,
}

impl MeshEditor for CountingHost {
    fn edge_count(&self) -> usize {
        self.edges
    }

    fn close_boundary(&mut self, _boundary: &EdgeLoop) -> Result<(), MeshEditError> {
        Ok(())
    }

    fn split_face(&mut self, points: &[InsertionPoint]) -> Result<EdgeId, MeshEditError> {
        let first = EdgeId::from_count(self.edges)?;
        self.edges += points.len() - 1;
        self.splits.push(points.to_vec());
        Ok(first)
    }

    fn subdivide_edge(&mut self, _edge: EdgeId, divisions: usize) -> Result<EdgeId, MeshEditError> {
        let first = EdgeId::from_count(self.edges)?;
        self.edges += divisions;
        Ok(first)
    }

    fn adjust_edge_flow(&mut self, _edges: &[EdgeId]) -> Result<(), MeshEditError> {
        self.flows += 1;
        Ok(())
    }

    fn inset_boundary(
        &mut self,
        _boundary: &EdgeLoop,
        _settings: &InsetSettings,
    ) -> Result<Vec<EdgeId>, MeshEditError> {
        Err(MeshEditError::Rejected {
            operation: "inset_boundary",
            reason: "not supported by this host".to_string(),
        })
    }

    fn list_selection(&self) -> Vec<String> {
        self.selection.clone()
    }

    fn select(&mut self, tokens: &[String]) {
        self.selection = tokens.to_vec();
    }
}

#[test]
fn custom_host_runs_full_grid() {
    let mut host = CountingHost {
        edges: 64,
        selection: vec!["e[0:31]".to_string()],
        ..CountingHost::default()
    };
    let diagnostics = GridFill::default().apply(&mut host).expect("grid fill");

    let plan = diagnostics.plan.expect("plan");
    assert_eq!((plan.rows, plan.cols), (7, 7));
    // rows, then (rows + 1) links per column
    assert_eq!(host.splits.len(), 7 + 7 * 8);
    assert_eq!(host.flows, diagnostics.requests.flow);
    assert_eq!(host.flows, 6);
    assert_eq!(host.selection, vec!["e[0:31]".to_string()]);
}

#[test]
fn host_without_inset_support_surfaces_topology_error() {
    let mut host = CountingHost {
        edges: 32,
        selection: vec!["e[0:15]".to_string()],
        ..CountingHost::default()
    };
    let config = GridFillConfig {
        inset_enabled: true,
        inset_width: 0.1,
        ..GridFillConfig::default()
    };
    let err = GridFill::new(config).apply(&mut host).unwrap_err();
    assert!(matches!(err, GridFillError::TopologyOperation { .. }));
    assert!(err.to_string().contains("inset"));
    assert!(host.splits.is_empty());
}

#[test]
fn dyn_editor_is_accepted() {
    let mut mesh = RecordingMesh::new(32).with_selection(["e[0:15]"]);
    let editor: &mut dyn MeshEditor = &mut mesh;
    let diagnostics = GridFill::default().apply(editor).expect("grid fill");
    assert_eq!(diagnostics.fill_mode, FillMode::Grid);
    assert_eq!(mesh.edge_count(), 56);
}

#[test]
fn mapped_loop_round_trips_to_tokens() {
    let edge_loop = map_loop(&["pPlane1.e[40:47]", "pPlane1.e[4:11]"]).expect("loop");
    assert_eq!(edge_loop.len(), 16);
    assert_eq!(edge_loop.to_tokens(), vec!["[40:47]", "[4:11]"]);
}
