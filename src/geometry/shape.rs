//! # Block Shape Catalog
//!
//! A voxel's solid shape is an 8-bit corner-inclusion mask: bit `i` marks
//! whether unit-cube corner `i` belongs to the solid, with corner `i` sitting
//! at offset `(i & 1, (i >> 1) & 1, (i >> 2) & 1)`. This module classifies all
//! 256 masks into the closed shape catalog and records, for the 28 masks that
//! have one, the diagonal face joining the surviving corners.
//!
//! The table is the single source of truth: lookups replace the long
//! mask-value conditional chain, and the ordered corner lists fix the winding
//! and texture assignment of every diagonal face. Reordering an entry changes
//! which side of the face is visible.

/// The empty mask.
pub const EMPTY_MASK: u8 = 0;
/// The full cube mask.
pub const CUBE_MASK: u8 = 255;

/// Classification of a corner mask into the shape catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// No corners: no geometry.
    Empty,
    /// All eight corners: axis faces only.
    Cube,
    /// Six corners, an adjacent pair removed: one diagonal quad.
    Prism,
    /// Four corners around an apex: one diagonal triangle.
    Pyramid,
    /// Seven corners, one removed: one diagonal triangle across the cut.
    AntiPyramid,
    /// Any other mask: whatever axis faces its corners support, nothing else.
    Fragment,
}

/// The diagonal face of a shape, as an ordered corner list.
///
/// Order is winding: quad corners map to texture coordinates
/// (0,0), (0,1), (1,1), (1,0) in sequence, triangles to the first three.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Diagonal {
    /// No diagonal face.
    None,
    /// A quad joining four corners.
    Quad([u8; 4]),
    /// A triangle joining three corners.
    Tri([u8; 3]),
}

/// One entry of the 256-slot shape table.
#[derive(Clone, Copy, Debug)]
pub struct ShapeEntry {
    /// Which family the mask belongs to.
    pub kind: ShapeKind,
    /// Its diagonal face, if the family has one.
    pub diagonal: Diagonal,
}

/// The 12 prism masks (255 minus an adjacent corner pair) and their quads.
const PRISMS: [(u8, [u8; 4]); 12] = [
    (255 - 128 - 64, [2, 4, 5, 3]),
    (255 - 2 - 1, [4, 2, 3, 5]),
    (255 - 32 - 16, [1, 7, 6, 0]),
    (255 - 8 - 4, [7, 1, 0, 6]),
    (255 - 64 - 16, [0, 5, 7, 2]),
    (255 - 8 - 2, [5, 0, 2, 7]),
    (255 - 128 - 32, [3, 6, 4, 1]),
    (255 - 4 - 1, [6, 3, 1, 4]),
    (255 - 32 - 2, [0, 3, 7, 4]),
    (255 - 64 - 4, [3, 0, 4, 7]),
    (255 - 16 - 1, [5, 6, 2, 1]),
    (255 - 128 - 8, [6, 5, 1, 2]),
];

/// The 8 pyramid masks (apex corner plus its three axis neighbors) and the
/// triangle over the base-adjacent survivors.
const PYRAMIDS: [(u8, [u8; 3]); 8] = [
    (23, [1, 2, 4]),
    (43, [0, 5, 3]),
    (77, [3, 6, 0]),
    (142, [2, 1, 7]),
    (113, [5, 0, 6]),
    (178, [4, 7, 1]),
    (212, [7, 4, 2]),
    (232, [6, 3, 5]),
];

/// The 8 anti-pyramid masks (255 minus one corner) and the triangle across
/// the cut.
const ANTI_PYRAMIDS: [(u8, [u8; 3]); 8] = [
    (254, [1, 4, 2]),
    (253, [0, 3, 5]),
    (251, [3, 0, 6]),
    (247, [2, 7, 1]),
    (255 - 16, [5, 6, 0]),
    (255 - 32, [4, 1, 7]),
    (255 - 64, [7, 2, 4]),
    (255 - 128, [6, 5, 3]),
];

/// Shape classification for every possible mask value.
pub static SHAPE_TABLE: [ShapeEntry; 256] = build_shape_table();

const fn build_shape_table() -> [ShapeEntry; 256] {
    let mut table = [ShapeEntry {
        kind: ShapeKind::Fragment,
        diagonal: Diagonal::None,
    }; 256];

    table[EMPTY_MASK as usize] = ShapeEntry {
        kind: ShapeKind::Empty,
        diagonal: Diagonal::None,
    };
    table[CUBE_MASK as usize] = ShapeEntry {
        kind: ShapeKind::Cube,
        diagonal: Diagonal::None,
    };

    let mut i = 0;
    while i < PRISMS.len() {
        let (mask, corners) = PRISMS[i];
        table[mask as usize] = ShapeEntry {
            kind: ShapeKind::Prism,
            diagonal: Diagonal::Quad(corners),
        };
        i += 1;
    }

    let mut i = 0;
    while i < PYRAMIDS.len() {
        let (mask, corners) = PYRAMIDS[i];
        table[mask as usize] = ShapeEntry {
            kind: ShapeKind::Pyramid,
            diagonal: Diagonal::Tri(corners),
        };
        i += 1;
    }

    let mut i = 0;
    while i < ANTI_PYRAMIDS.len() {
        let (mask, corners) = ANTI_PYRAMIDS[i];
        table[mask as usize] = ShapeEntry {
            kind: ShapeKind::AntiPyramid,
            diagonal: Diagonal::Tri(corners),
        };
        i += 1;
    }

    table
}

/// The corner mask a block value renders as.
///
/// Value 1 is the full-cube alias; every other value is its own mask.
#[inline]
pub fn shape_mask(value: u8) -> u8 {
    if value == 1 {
        CUBE_MASK
    } else {
        value
    }
}

/// Whether a neighboring block value occludes a shared axis face.
///
/// Only full cubes occlude; partial shapes and air never do, even when the
/// shared boundary is partially covered.
#[inline]
pub fn occludes(value: u8) -> bool {
    shape_mask(value) == CUBE_MASK
}

/// Position of corner `i` within the unit cube.
#[inline]
pub fn corner_offset(corner: u8) -> [f32; 3] {
    [
        (corner & 1) as f32,
        ((corner >> 1) & 1) as f32,
        ((corner >> 2) & 1) as f32,
    ]
}
