#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod fill;

use std::fmt;

use fill::{
    GridFill, GridFillConfig, GridFillDiagnostics, GridFillError, GridPlan, MeshOp,
    RecordingMesh, map_loop,
};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    log::set_logger(&DEFAULT_LOGGER).expect("error initializing logger");
    log::set_max_level(LevelFilter::Debug);
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

/// Result of a dry run against the recording mesh, as sent to the front end.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewExport {
    diagnostics: GridFillDiagnostics,
    ops: Vec<MeshOp>,
    warnings: Vec<String>,
}

/// Runs the tool against a [`RecordingMesh`] sized to hold the selected loop.
fn preview(tokens: &[String], config: GridFillConfig) -> Result<PreviewExport, GridFillError> {
    let boundary = map_loop(tokens)?;
    let edge_count = match boundary.edges().iter().max() {
        Some(edge) => usize::try_from(edge.index())
            .ok()
            .and_then(|index| index.checked_add(1))
            .ok_or_else(|| {
                GridFillError::selection(edge.to_string(), "edge id does not fit the preview mesh")
            })?,
        None => 0,
    };

    let mut mesh = RecordingMesh::new(edge_count).with_selection(tokens.iter().cloned());
    let diagnostics = GridFill::new(config).apply(&mut mesh)?;
    let warnings = diagnostics.warnings.iter().map(ToString::to_string).collect();

    Ok(PreviewExport {
        diagnostics,
        ops: mesh.ops().to_vec(),
        warnings,
    })
}

/// Plan the grid for a loop of `loop_len` edges rotated by `offset` positions.
#[wasm_bindgen]
pub fn plan_grid_fill(loop_len: u32, offset: i32) -> Result<JsValue, JsValue> {
    let loop_len = usize::try_from(loop_len).map_err(to_js_error)?;
    let (plan, _warnings): (GridPlan, _) =
        fill::plan(loop_len, i64::from(offset)).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&plan).map_err(|err| JsError::new(&err.to_string()).into())
}

/// Dry-run the grid fill for a selection (array of strings) and a settings
/// object; returns the request script and diagnostics.
#[wasm_bindgen]
pub fn preview_grid_fill(selection: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let tokens: Vec<String> = serde_wasm_bindgen::from_value(selection)
        .map_err(|err| js_error(&format!("selection must be an array of strings: {err}")))?;
    let config: GridFillConfig = if config.is_undefined() || config.is_null() {
        GridFillConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|err| js_error(&format!("invalid settings object: {err}")))?
    };

    let export = preview(&tokens, config).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&export).map_err(|err| JsError::new(&err.to_string()).into())
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::preview;
    use crate::fill::{FillMode, GridFillConfig, GridFillError, MeshEditError, MeshOp};

    #[test]
    fn preview_sizes_mesh_from_selection() {
        let tokens = vec!["e[100:115]".to_string()];
        let export = preview(&tokens, GridFillConfig::default()).expect("preview runs");

        assert_eq!(export.diagnostics.edges_before, 116);
        assert_eq!(export.diagnostics.requests.flow, 2);
        assert!(export.warnings.is_empty());
        assert!(matches!(export.ops.last(), Some(MeshOp::Select { .. })));
    }

    #[test]
    fn preview_reports_warnings_as_text() {
        let tokens = vec!["e[0:12]".to_string()];
        let export = preview(&tokens, GridFillConfig::default()).expect("preview runs");
        assert_eq!(export.warnings.len(), 1);
        assert!(export.warnings[0].contains("odd number of edges"));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn preview_near_the_id_limit_fails_instead_of_reusing_ids() {
        let tokens = vec!["e[4294967288:4294967295]".to_string()];
        let err = preview(&tokens, GridFillConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            GridFillError::TopologyOperation {
                source: MeshEditError::IdSpaceExhausted { .. },
                ..
            }
        ));
    }

    #[test]
    fn preview_propagates_validation_errors() {
        let tokens = vec!["e[0:5]".to_string()];
        let err = preview(&tokens, GridFillConfig::default()).unwrap_err();
        assert!(matches!(err, GridFillError::DegenerateGrid { .. }));

        let config = GridFillConfig {
            fill_mode: FillMode::Ngon,
            ..GridFillConfig::default()
        };
        assert!(preview(&tokens, config).is_ok());
    }
}
