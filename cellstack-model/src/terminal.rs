//! Edge terminals.
//!
//! An edge endpoint either references another cell by id or floats at a
//! fixed point on the canvas. The JSON shapes match the wire format the
//! rendering layer consumes: `{"cell": "<id>"}` or `{"x": .., "y": ..}`.

use cellstack_types::CellId;
use serde::{Deserialize, Serialize};

/// An edge's source or target endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Terminal {
    /// Connected to another cell.
    Cell { cell: CellId },
    /// Free-floating point.
    Point { x: f64, y: f64 },
}

impl Terminal {
    /// Terminal referencing a cell by id.
    #[must_use]
    pub fn cell(id: impl Into<CellId>) -> Self {
        Self::Cell { cell: id.into() }
    }

    /// Free-floating terminal at a point.
    #[must_use]
    pub fn point(x: f64, y: f64) -> Self {
        Self::Point { x, y }
    }

    /// The referenced cell id, if this terminal is connected.
    #[must_use]
    pub fn cell_id(&self) -> Option<&CellId> {
        match self {
            Self::Cell { cell } => Some(cell),
            Self::Point { .. } => None,
        }
    }

    /// True for free-floating terminals.
    #[must_use]
    pub fn is_point(&self) -> bool {
        matches!(self, Self::Point { .. })
    }
}
