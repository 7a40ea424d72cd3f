use std::fmt;

use crate::layer::LayerId;

/// Error type for map geometry, layer model and configuration handling
#[derive(Debug)]
pub enum MapError {
    /// Tile width or height is zero
    InvalidTileSize {
        /// Configured tile width in pixels
        width: u32,
        /// Configured tile height in pixels
        height: u32,
    },
    /// Hex side length is longer than the tile extent along the stagger axis
    InvalidHexSideLength {
        /// Configured side length
        side: u32,
        /// Tile extent the side has to fit in
        tile: u32,
    },
    /// A textual enum value (orientation, render order, ...) was not recognised
    UnknownValue {
        /// Which enum was being parsed
        kind: &'static str,
        /// The offending spelling
        value: String,
    },
    /// A tile layer's data length does not match width * height
    InvalidLayerSize {
        /// Layer name
        layer: String,
        /// width * height
        expected: usize,
        /// Number of gids supplied
        actual: usize,
    },
    /// Children can only be attached to group layers
    NotAGroup(LayerId),
    /// The layer id does not belong to this tree
    UnknownLayer(LayerId),
    /// Object whose shape cannot be drawn (too few points, empty tile, ...)
    MalformedObject {
        /// Object id
        id: u32,
        /// What is wrong with it
        reason: String,
    },
    /// Render configuration out of range
    InvalidConfig(String),
    /// JSON parse error
    Json(serde_json::Error),
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        MapError::Json(err)
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::InvalidTileSize { width, height } => {
                write!(f, "Invalid tile size {}x{}: both sides must be non-zero", width, height)
            }
            MapError::InvalidHexSideLength { side, tile } => write!(
                f,
                "Hex side length {} does not fit in a tile extent of {}",
                side, tile
            ),
            MapError::UnknownValue { kind, value } => write!(f, "Unknown {}: '{}'", kind, value),
            MapError::InvalidLayerSize {
                layer,
                expected,
                actual,
            } => write!(
                f,
                "Invalid layer size for layer '{}': expected {} tiles, got {}",
                layer, expected, actual
            ),
            MapError::NotAGroup(id) => write!(f, "Layer {} is not a group layer", id.0),
            MapError::UnknownLayer(id) => write!(f, "No layer with index {}", id.0),
            MapError::MalformedObject { id, reason } => {
                write!(f, "Object {} cannot be drawn: {}", id, reason)
            }
            MapError::InvalidConfig(msg) => write!(f, "Invalid render config: {}", msg),
            MapError::Json(e) => write!(f, "JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Json(e) => Some(e),
            _ => None,
        }
    }
}
