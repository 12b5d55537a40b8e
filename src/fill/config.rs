//! Tool settings, as handed over by the front end.

use serde::{Deserialize, Serialize};

use super::error::GridFillError;

/// What to do with the loop after the optional inset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Close the loop and split it into a quad grid.
    #[default]
    Grid,
    /// Close the loop with a single n-gon.
    Ngon,
    /// Leave the loop open.
    None,
}

/// Axis along which the inset loops are pushed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsetAxis {
    #[default]
    Y,
    Z,
}

/// Inset pre-pass parameters forwarded to the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsetSettings {
    pub width: f64,
    pub loop_count: usize,
    pub axis: InsetAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridFillConfig {
    pub offset_enabled: bool,
    pub offset_amount: i64,
    pub inset_enabled: bool,
    pub inset_width: f64,
    pub inset_loop_count: usize,
    pub inset_axis: InsetAxis,
    pub fill_mode: FillMode,
}

impl Default for GridFillConfig {
    fn default() -> Self {
        Self {
            offset_enabled: false,
            offset_amount: 0,
            inset_enabled: false,
            inset_width: 0.0,
            inset_loop_count: 1,
            inset_axis: InsetAxis::Y,
            fill_mode: FillMode::Grid,
        }
    }
}

impl GridFillConfig {
    /// Rejects settings the host could not act on. Disabled sections are not
    /// checked.
    pub fn validate(&self) -> Result<(), GridFillError> {
        if self.inset_enabled {
            if !self.inset_width.is_finite() || self.inset_width < 0.0 {
                return Err(GridFillError::InvalidConfig(format!(
                    "inset width must be a finite, non-negative number (got {})",
                    self.inset_width
                )));
            }
            if self.inset_loop_count == 0 {
                return Err(GridFillError::InvalidConfig(
                    "inset needs at least one loop".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Loop rotation applied to the grid anchors.
    #[must_use]
    pub fn effective_offset(&self) -> i64 {
        if self.offset_enabled { self.offset_amount } else { 0 }
    }

    #[must_use]
    pub fn inset(&self) -> Option<InsetSettings> {
        self.inset_enabled.then_some(InsetSettings {
            width: self.inset_width,
            loop_count: self.inset_loop_count,
            axis: self.inset_axis,
        })
    }
}
