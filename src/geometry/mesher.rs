//! # Shape Mesher
//!
//! Turns block values into shaded, textured triangles. For every voxel the
//! mesher emits the axis faces its corner mask supports, culled against
//! full-cube neighbors, plus the diagonal face of its catalog shape (if any).
//! Output accumulates in an append-only vertex builder that the renderer
//! uploads once per frame.

use cgmath::{InnerSpace, Vector3};

use super::shape::{
    corner_offset, occludes, shape_mask, Diagonal, EMPTY_MASK, SHAPE_TABLE,
};
use super::vertex::Vertex;

/// An axis-aligned cube face: the four corner indices on it (in winding
/// order) and its outward unit normal.
pub struct AxisFace {
    /// Corner indices in slot order; slot k takes texture coordinate
    /// `SLOT_UVS[k]`.
    pub corners: [u8; 4],
    /// Outward unit normal.
    pub normal: [f32; 3],
}

/// The six cube faces in neighbor order: -x, +x, -y, +y, -z, +z.
pub const AXIS_FACES: [AxisFace; 6] = [
    AxisFace { corners: [0, 4, 6, 2], normal: [-1.0, 0.0, 0.0] },
    AxisFace { corners: [1, 3, 7, 5], normal: [1.0, 0.0, 0.0] },
    AxisFace { corners: [0, 1, 5, 4], normal: [0.0, -1.0, 0.0] },
    AxisFace { corners: [2, 6, 7, 3], normal: [0.0, 1.0, 0.0] },
    AxisFace { corners: [0, 2, 3, 1], normal: [0.0, 0.0, -1.0] },
    AxisFace { corners: [4, 5, 7, 6], normal: [0.0, 0.0, 1.0] },
];

/// Texture coordinate assigned to each face slot.
const SLOT_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

/// Ambient floor of the flat shading term.
const AMBIENT: f32 = 0.3;
/// Diffuse share of the flat shading term.
const DIFFUSE: f32 = 0.7;

/// Base color for a generated terrain block value, spreading the palette over
/// a 4x4x4 RGB lattice.
pub fn block_color(value: u8) -> [f32; 3] {
    let c = value.saturating_sub(1) as u32;
    [
        (c % 4) as f32 * 0.33,
        ((c / 4) % 4) as f32 * 0.33,
        ((c / 16) % 4) as f32 * 0.33,
    ]
}

/// Append-only builder collecting the triangles of one frame.
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    light: Vector3<f32>,
}

impl MeshBuilder {
    /// Creates an empty builder lit from the fixed world light direction.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            light: Vector3::new(0.5, 1.0, -1.0).normalize(),
        }
    }

    /// Discards the accumulated vertices, keeping the allocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// The vertices emitted so far, three per triangle.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of complete triangles emitted so far.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Emits all geometry of one voxel.
    ///
    /// `neighbors` holds the block values of the six face-adjacent voxels in
    /// `AXIS_FACES` order; a face is culled only when its neighbor is a full
    /// cube. Boundaries against partial shapes are always emitted, even where
    /// that overlaps coplanar neighbor geometry.
    pub fn emit_voxel(
        &mut self,
        x: i64,
        y: i64,
        z: i64,
        value: u8,
        neighbors: [u8; 6],
        base_color: [f32; 3],
    ) {
        let mask = shape_mask(value);
        if mask == EMPTY_MASK {
            return;
        }

        for (face, &neighbor) in AXIS_FACES.iter().zip(neighbors.iter()) {
            if occludes(neighbor) {
                continue;
            }
            let color = self.shade(Vector3::from(face.normal), base_color);
            self.emit_axis_face(x, y, z, mask, face, color);
        }

        // Diagonal faces keep the reference convention of lighting by the raw
        // (1, 1, 1) direction regardless of actual orientation.
        match SHAPE_TABLE[mask as usize].diagonal {
            Diagonal::None => {}
            Diagonal::Quad(corners) => {
                let color = self.shade(Vector3::new(1.0, 1.0, 1.0), base_color);
                self.push_quad(x, y, z, corners, color);
            }
            Diagonal::Tri(corners) => {
                let color = self.shade(Vector3::new(1.0, 1.0, 1.0), base_color);
                self.push_triangle(x, y, z, corners, color);
            }
        }
    }

    /// Emits one axis face of a mask: a full quad when all four of its corners
    /// are included, the matching triangle when exactly three are, nothing
    /// otherwise.
    fn emit_axis_face(&mut self, x: i64, y: i64, z: i64, mask: u8, face: &AxisFace, color: [f32; 3]) {
        let mut included = 0u32;
        for &corner in &face.corners {
            if mask & (1 << corner) != 0 {
                included += 1;
            }
        }

        match included {
            4 => self.push_quad(x, y, z, face.corners, color),
            3 => {
                // The surviving corners keep the texture coordinates of their
                // slots, so the triangle stays registered with the quad.
                let mut slots = [(0u8, [0.0f32; 2]); 3];
                let mut n = 0;
                for (slot, &corner) in face.corners.iter().enumerate() {
                    if mask & (1 << corner) != 0 {
                        slots[n] = (corner, SLOT_UVS[slot]);
                        n += 1;
                    }
                }
                for (corner, uv) in slots {
                    self.push_vertex(x, y, z, corner, uv, color);
                }
            }
            _ => {}
        }
    }

    /// Two triangles sharing the (0,0)/(1,1) texture diagonal.
    fn push_quad(&mut self, x: i64, y: i64, z: i64, corners: [u8; 4], color: [f32; 3]) {
        for slot in [0, 1, 2, 0, 2, 3] {
            self.push_vertex(x, y, z, corners[slot], SLOT_UVS[slot], color);
        }
    }

    fn push_triangle(&mut self, x: i64, y: i64, z: i64, corners: [u8; 3], color: [f32; 3]) {
        for (slot, &corner) in corners.iter().enumerate() {
            self.push_vertex(x, y, z, corner, SLOT_UVS[slot], color);
        }
    }

    fn push_vertex(&mut self, x: i64, y: i64, z: i64, corner: u8, uv: [f32; 2], color: [f32; 3]) {
        let offset = corner_offset(corner);
        self.vertices.push(Vertex {
            position: [
                x as f32 + offset[0],
                y as f32 + offset[1],
                z as f32 + offset[2],
            ],
            color,
            uv,
        });
    }

    /// Flat shading: ambient floor plus the diffuse term against the fixed
    /// light. The normal is used as handed in; axis normals are unit, the
    /// diagonal direction deliberately is not.
    fn shade(&self, normal: Vector3<f32>, base: [f32; 3]) -> [f32; 3] {
        let facing = (-normal.dot(self.light)).max(0.0);
        let c = AMBIENT + DIFFUSE * facing;
        [base[0] * c, base[1] * c, base[2] * c]
    }
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::shape::{ShapeKind, CUBE_MASK};

    const NO_NEIGHBORS: [u8; 6] = [0; 6];
    const ALL_CUBES: [u8; 6] = [CUBE_MASK; 6];
    const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

    fn emit(value: u8, neighbors: [u8; 6]) -> MeshBuilder {
        let mut builder = MeshBuilder::new();
        builder.emit_voxel(0, 0, 0, value, neighbors, WHITE);
        builder
    }

    #[test]
    fn every_mask_meshes_without_error() {
        for value in 0..=255u8 {
            let builder = emit(value, NO_NEIGHBORS);
            assert_eq!(builder.vertices().len() % 3, 0, "value {value}");
        }
    }

    #[test]
    fn empty_and_cube_extremes() {
        assert_eq!(emit(0, NO_NEIGHBORS).triangle_count(), 0);
        // A free-standing cube is 6 quads.
        assert_eq!(emit(255, NO_NEIGHBORS).triangle_count(), 12);
        // Value 1 renders identically to 255.
        assert_eq!(
            emit(1, NO_NEIGHBORS).vertices(),
            emit(255, NO_NEIGHBORS).vertices()
        );
    }

    #[test]
    fn cube_against_cubes_emits_nothing() {
        assert_eq!(emit(255, ALL_CUBES).triangle_count(), 0);
        assert_eq!(emit(1, ALL_CUBES).triangle_count(), 0);
    }

    #[test]
    fn single_open_side_emits_one_quad() {
        // Only the -x neighbor is empty: exactly the shared boundary quad.
        let mut neighbors = ALL_CUBES;
        neighbors[0] = 0;
        let builder = emit(255, neighbors);
        assert_eq!(builder.triangle_count(), 2);
        for vertex in builder.vertices() {
            assert_eq!(vertex.position[0], 0.0);
        }
    }

    #[test]
    fn partial_neighbors_never_occlude() {
        // A prism neighbor leaves the face in, accepted coplanar overlap.
        let mut neighbors = ALL_CUBES;
        neighbors[5] = 63;
        assert_eq!(emit(255, neighbors).triangle_count(), 2);
    }

    #[test]
    fn prism_carries_one_diagonal_quad() {
        // Mask 63 = cube minus corners 6 and 7. The -y and -z faces survive
        // whole, the +y and +z faces vanish, the two x faces drop to 3
        // corners each, and the slope closes with one diagonal quad.
        let builder = emit(63, NO_NEIGHBORS);
        assert_eq!(builder.triangle_count(), 2 * 2 + 2 + 2);
    }

    #[test]
    fn pyramid_carries_one_diagonal_triangle() {
        // Mask 23: apex corner 0. One full axis quad never survives (each
        // face has at most 3 of its corners), three 3-corner triangles plus
        // the base triangle.
        let builder = emit(23, NO_NEIGHBORS);
        assert_eq!(builder.triangle_count(), 3 + 1);
    }

    #[test]
    fn anti_pyramid_carries_one_diagonal_triangle() {
        // Mask 254: three faces keep 4 corners, three keep 3, plus the cut.
        let builder = emit(254, NO_NEIGHBORS);
        assert_eq!(builder.triangle_count(), 3 * 2 + 3 + 1);
    }

    #[test]
    fn diagonal_census_matches_catalog() {
        let mut with_diagonal = 0;
        for value in 2..=255u8 {
            let plain = emit(value, ALL_CUBES);
            if plain.triangle_count() > 0 {
                // With all axis faces culled, only diagonal faces remain.
                with_diagonal += 1;
                let kind = SHAPE_TABLE[value as usize].kind;
                assert!(
                    matches!(
                        kind,
                        ShapeKind::Prism | ShapeKind::Pyramid | ShapeKind::AntiPyramid
                    ),
                    "value {value}"
                );
            }
        }
        assert_eq!(with_diagonal, 12 + 8 + 8);
    }

    #[test]
    fn quad_uv_order_is_fixed() {
        let mut neighbors = ALL_CUBES;
        neighbors[3] = 0;
        let builder = emit(255, neighbors);
        let uvs: Vec<[f32; 2]> = builder.vertices().iter().map(|v| v.uv).collect();
        assert_eq!(
            uvs,
            vec![
                [0.0, 0.0],
                [0.0, 1.0],
                [1.0, 1.0],
                [0.0, 0.0],
                [1.0, 1.0],
                [1.0, 0.0],
            ]
        );
    }

    #[test]
    fn flat_shading_follows_the_fixed_light() {
        // light = normalize(0.5, 1, -1) = (1/3, 2/3, -2/3).
        let mut neighbors = ALL_CUBES;
        neighbors[5] = 0; // +z face: -dot(n, l) = 2/3
        let lit = emit(255, neighbors).vertices()[0].color[0];
        assert!((lit - (0.3 + 0.7 * (2.0 / 3.0))).abs() < 1e-5);

        let mut neighbors = ALL_CUBES;
        neighbors[4] = 0; // -z face looks away: ambient floor only
        let shadowed = emit(255, neighbors).vertices()[0].color[0];
        assert!((shadowed - 0.3).abs() < 1e-5);
    }

    #[test]
    fn block_colors_spread_over_the_palette() {
        assert_eq!(block_color(1), [0.0, 0.0, 0.0]);
        assert_eq!(block_color(2), [0.33, 0.0, 0.0]);
        assert_eq!(block_color(6), [0.33, 0.33, 0.0]);
        assert_eq!(block_color(11), [0.66, 0.66, 0.0]);
    }
}
