//! Tests for edge loop mapping.

use crate::fill::selection::{EdgeLoop, map_loop, parse_token};
use crate::fill::{EdgeId, GridFillError, MAX_LOOP_LEN};

fn ids(edges: &[u32]) -> Vec<EdgeId> {
    edges.iter().copied().map(EdgeId).collect()
}

// ============================================================================
// Token parsing
// ============================================================================

#[test]
fn test_parse_range_token() {
    let range = parse_token("[4:7]").unwrap();
    assert_eq!((range.first, range.last), (4, 7));
    assert_eq!(range.count(), 4);
}

#[test]
fn test_parse_host_prefixed_tokens() {
    let range = parse_token("pCube1.e[12:19]").unwrap();
    assert_eq!((range.first, range.last), (12, 19));

    // The object name carries digits too; only the bracketed group counts.
    let single = parse_token("polySurface12.e[3]").unwrap();
    assert_eq!((single.first, single.last), (3, 3));
}

#[test]
fn test_parse_bare_tokens() {
    assert_eq!(parse_token("5").unwrap().count(), 1);
    let range = parse_token(" 3:6 ").unwrap();
    assert_eq!((range.first, range.last), (3, 6));
}

#[test]
fn test_parse_rejects_tokens_without_index() {
    for token in ["pCube1", "e[]", "", "[a:b]"] {
        let err = parse_token(token).unwrap_err();
        assert!(
            matches!(err, GridFillError::InvalidSelection { .. }),
            "token {token:?} should be rejected, got {err:?}"
        );
    }
}

#[test]
fn test_parse_rejects_reversed_range() {
    let err = parse_token("e[9:2]").unwrap_err();
    assert!(err.to_string().contains("precedes"), "unexpected message: {err}");
}

#[test]
fn test_parse_rejects_overflowing_index() {
    assert!(parse_token("e[99999999999]").is_err());
}

// ============================================================================
// Loop mapping
// ============================================================================

#[test]
fn test_single_range_maps_consecutively() {
    let edge_loop = map_loop(&["e[20:31]"]).unwrap();
    assert_eq!(edge_loop.len(), 12);
    for k in 0..12 {
        assert_eq!(edge_loop.edge_at(k), EdgeId(20 + k as u32));
    }
}

#[test]
fn test_disjoint_tokens_concatenate_in_selection_order() {
    let edge_loop = map_loop(&["[0:3]", "[10:12]"]).unwrap();
    assert_eq!(edge_loop.len(), 7);
    assert_eq!(edge_loop.edges(), ids(&[0, 1, 2, 3, 10, 11, 12]).as_slice());
}

#[test]
fn test_mixed_single_and_range_tokens() {
    let edge_loop = map_loop(&["e[8]", "e[2:4]", "e[40]"]).unwrap();
    assert_eq!(edge_loop.edges(), ids(&[8, 2, 3, 4, 40]).as_slice());
}

#[test]
fn test_empty_selection_is_invalid() {
    let tokens: [&str; 0] = [];
    let err = map_loop(&tokens).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("nothing selected"));
}

#[test]
fn test_one_bad_token_fails_the_whole_selection() {
    assert!(map_loop(&["e[0:3]", "pCube1"]).is_err());
}

// ============================================================================
// Canonical tokens
// ============================================================================

#[test]
fn test_to_tokens_merges_consecutive_runs() {
    let edge_loop = map_loop(&["[0:3]", "[10:12]"]).unwrap();
    assert_eq!(edge_loop.to_tokens(), vec!["[0:3]", "[10:12]"]);

    let edge_loop = EdgeLoop::from_edges(ids(&[5, 7, 8, 6])).unwrap();
    assert_eq!(edge_loop.to_tokens(), vec!["[5]", "[7:8]", "[6]"]);
}

#[test]
fn test_from_edges_rejects_empty_loop() {
    assert!(EdgeLoop::from_edges(Vec::new()).is_err());
}

#[test]
fn test_oversized_selection_is_refused_before_expansion() {
    let err = map_loop(&["e[0:4294967295]"]).unwrap_err();
    match err {
        GridFillError::LoopTooLong { loop_len, max } => {
            assert_eq!(max, MAX_LOOP_LEN);
            assert!(loop_len > MAX_LOOP_LEN);
        }
        other => panic!("expected LoopTooLong, got {other:?}"),
    }

    let half = format!("e[0:{}]", MAX_LOOP_LEN / 2 - 1);
    let rest = format!("e[{}:{}]", MAX_LOOP_LEN, MAX_LOOP_LEN + MAX_LOOP_LEN / 2);
    assert!(map_loop(&[half.as_str(), rest.as_str()]).is_err());
    assert_eq!(map_loop(&[half.as_str()]).unwrap().len(), MAX_LOOP_LEN / 2);
}
