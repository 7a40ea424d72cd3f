//! Grid-line geometry for a whole map.

use std::collections::{HashMap, HashSet};

use crate::math::Vector2;
use crate::transform::{Projection, TransformEngine};

/// Line list outlining every tile of a map. Shared corners are stored once
/// and shared edges are emitted once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridMesh {
    pub vertices: Vec<Vector2>,
    /// Pairs of indices into `vertices`, one pair per line.
    pub indices: Vec<u32>,
}

fn vertex_key(v: Vector2) -> (u64, u64) {
    // + 0.0 folds -0.0 into 0.0
    ((v.x + 0.0).to_bits(), (v.y + 0.0).to_bits())
}

impl GridMesh {
    /// Outlines every tile the engine visits, in visitation order.
    pub fn build(engine: &TransformEngine) -> Self {
        let mut mesh = GridMesh::default();
        let mut lookup: HashMap<(u64, u64), u32> = HashMap::new();
        let mut edges: HashSet<(u32, u32)> = HashSet::new();

        for visit in engine.tiles() {
            let outline = engine.tile_outline(visit.x, visit.y);
            let ids: Vec<u32> = outline
                .iter()
                .map(|&v| {
                    *lookup.entry(vertex_key(v)).or_insert_with(|| {
                        mesh.vertices.push(v);
                        (mesh.vertices.len() - 1) as u32
                    })
                })
                .collect();

            for (i, &a) in ids.iter().enumerate() {
                let b = ids[(i + 1) % ids.len()];
                if a == b {
                    continue;
                }
                if edges.insert((a.min(b), a.max(b))) {
                    mesh.indices.push(a);
                    mesh.indices.push(b);
                }
            }
        }
        mesh
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.indices.len() / 2
    }

    /// Segments as start and end points.
    pub fn lines(&self) -> impl Iterator<Item = (Vector2, Vector2)> + '_ {
        self.indices
            .chunks_exact(2)
            .map(|pair| (self.vertices[pair[0] as usize], self.vertices[pair[1] as usize]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{MapGeometry, Orientation, StaggerAxis, StaggerIndex};

    #[test]
    fn orthogonal_grid_shares_edges() {
        let engine = TransformEngine::new(&MapGeometry::new(Orientation::Orthogonal, 3, 2, 16, 16)).expect("valid");
        let mesh = GridMesh::build(&engine);
        assert_eq!(mesh.vertices.len(), 4 * 3);
        // horizontal: 3 per row line * 3 lines, vertical: 4 per column line * 2 rows
        assert_eq!(mesh.line_count(), 9 + 8);
    }

    #[test]
    fn hex_cells_share_corners() {
        let g = MapGeometry::new(Orientation::Hexagonal, 2, 1, 32, 28)
            .with_stagger(StaggerAxis::X, StaggerIndex::Odd)
            .with_hex_side_length(16);
        let mesh = GridMesh::build(&TransformEngine::new(&g).expect("valid"));
        // two hexagons sharing one edge
        assert_eq!(mesh.vertices.len(), 10);
        assert_eq!(mesh.line_count(), 11);
    }

    #[test]
    fn empty_map_has_no_lines() {
        let engine = TransformEngine::new(&MapGeometry::new(Orientation::Staggered, 0, 4, 64, 32)).expect("valid");
        assert_eq!(GridMesh::build(&engine), GridMesh::default());
    }
}
