//! Tests for mirrored band pairing and edge-flow requests.

use crate::fill::plan::plan;
use crate::fill::relax::{band_pairs, relax};
use crate::fill::selection::map_loop;
use crate::fill::splitter::build_grid;
use crate::fill::{
    EdgeId, FillStep, GridBands, GridFillError, MeshEditError, MeshOp, RecordingMesh,
};

fn ids(edges: &[u32]) -> Vec<EdgeId> {
    edges.iter().copied().map(EdgeId).collect()
}

fn flow_requests(mesh: &RecordingMesh) -> Vec<Vec<EdgeId>> {
    mesh.ops()
        .iter()
        .filter_map(|op| match op {
            MeshOp::AdjustFlow { edges } => Some(edges.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_sixteen_edge_loop_relaxes_one_pass() {
    let boundary = map_loop(&["e[0:15]"]).unwrap();
    let (grid, _) = plan(16, 0).unwrap();
    let mut mesh = RecordingMesh::new(32);
    let bands = build_grid(&mut mesh, &boundary, &grid).unwrap();

    let issued = relax(&mut mesh, &bands, &grid).unwrap();
    assert_eq!(issued, 2);
    assert_eq!(
        flow_requests(&mesh),
        vec![ids(&[33, 34, 41, 42]), ids(&[45, 46, 53, 54])]
    );
}

#[test]
fn test_single_column_grid_skips_relaxation() {
    let boundary = map_loop(&["e[0:11]"]).unwrap();
    let (grid, _) = plan(12, 0).unwrap();
    let mut mesh = RecordingMesh::new(24);
    let bands = build_grid(&mut mesh, &boundary, &grid).unwrap();
    let before = mesh.ops().len();

    assert_eq!(relax(&mut mesh, &bands, &grid).unwrap(), 0);
    assert_eq!(mesh.ops().len(), before);
}

#[test]
fn test_single_row_grid_skips_relaxation() {
    let (grid, _) = plan(10, 0).unwrap();
    assert_eq!((grid.rows, grid.cols), (1, 2));
    let bands = GridBands {
        row_band_start: EdgeId(20),
        col_band_start: EdgeId(24),
    };
    assert!(band_pairs(&bands, &grid).unwrap().is_empty());
}

#[test]
fn test_center_bands_are_never_adjusted() {
    // 20 edges: 5 rows x 3 columns, two passes.
    let (grid, _) = plan(20, 0).unwrap();
    assert_eq!((grid.rows, grid.cols, grid.relax_passes()), (5, 3, 2));
    let bands = GridBands {
        row_band_start: EdgeId(100),
        col_band_start: EdgeId(200),
    };

    let pairs = band_pairs(&bands, &grid).unwrap();
    // pass 0: rows 0/4 and columns 0/2; pass 1: rows 1/3 only, column 1 is the center.
    assert_eq!(pairs.len(), 3);
    assert_eq!(
        pairs.iter().map(|pair| pair.pass).collect::<Vec<_>>(),
        vec![0, 0, 1]
    );

    let stride = grid.cols + 1;
    let center_row: Vec<EdgeId> = (0..grid.cols - 1)
        .map(|k| bands.row_band_start.offset(1 + 2 * stride + k).unwrap())
        .collect();
    let center_col: Vec<EdgeId> = (0..grid.rows - 1)
        .map(|k| bands.col_band_start.offset(1 + (grid.rows + 1) + k).unwrap())
        .collect();
    for pair in &pairs {
        assert!(pair.edges.iter().all(|edge| !center_row.contains(edge)));
        assert!(pair.edges.iter().all(|edge| !center_col.contains(edge)));
    }
}

#[test]
fn test_pairs_are_symmetric_outside_in() {
    let (grid, _) = plan(32, 0).unwrap();
    let bands = GridBands {
        row_band_start: EdgeId(64),
        col_band_start: EdgeId(128),
    };
    let pairs = band_pairs(&bands, &grid).unwrap();
    assert_eq!(grid.relax_passes(), 3);
    assert_eq!(pairs.len(), 6);

    for pair in &pairs {
        // two equally long bands per request
        assert_eq!(pair.edges.len() % 2, 0);
        let half = pair.edges.len() / 2;
        assert!(pair.edges[0] < pair.edges[half]);
    }

    // Row pairs move inward: the near band starts later on every pass.
    let row_starts: Vec<EdgeId> = pairs.iter().step_by(2).map(|pair| pair.edges[0]).collect();
    assert!(row_starts.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_bands_at_the_top_of_the_id_range_fail_the_pass() {
    let (grid, _) = plan(16, 0).unwrap();
    let bands = GridBands {
        row_band_start: EdgeId(100),
        col_band_start: EdgeId(u32::MAX - 2),
    };
    let err = band_pairs(&bands, &grid).unwrap_err();
    assert!(matches!(
        err,
        GridFillError::TopologyOperation {
            step: FillStep::Relax { pass: 0 },
            source: MeshEditError::IdSpaceExhausted { .. },
        }
    ));
}
