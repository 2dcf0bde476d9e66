//! # Torus Addressing
//!
//! This module maps unbounded world coordinates onto the fixed-size map window.
//! Every world coordinate owns exactly one slot in the dense buffer, shared with
//! all coordinates congruent to it modulo `MAP_SIZE`; the freshness test decides
//! whether a slot currently holds the data for a given world coordinate.

/// The side length of the cached map window in voxels.
pub const MAP_SIZE: i64 = 128;

/// Radius of the voxel sweep around the observer during mesh building.
pub const RENDER_LIMIT: i64 = 61;

/// Extra ring so neighbor-occlusion lookups at the sweep edge stay inside the window.
pub const OCCLUSION_MARGIN: i64 = 4;

// Face-culling queries must never alias wrapped-around data from the far side
// of the window.
const _: () = assert!(MAP_SIZE >= 1 + 2 * RENDER_LIMIT + OCCLUSION_MARGIN);

/// Wraps a world coordinate into the window range `[0, MAP_SIZE)`.
///
/// Works for any integer input including negatives: `wrap(-1)` is
/// `MAP_SIZE - 1`, not `-1`.
#[inline]
pub fn wrap(v: i64) -> usize {
    v.rem_euclid(MAP_SIZE) as usize
}

/// Flat index of a world coordinate into the dense `MAP_SIZE³` voxel buffer.
#[inline]
pub fn voxel_index(x: i64, y: i64, z: i64) -> usize {
    (wrap(x) * MAP_SIZE as usize + wrap(y)) * MAP_SIZE as usize + wrap(z)
}

/// Flat index of a world column into the dense `MAP_SIZE²` height buffer.
#[inline]
pub fn column_index(x: i64, y: i64) -> usize {
    wrap(x) * MAP_SIZE as usize + wrap(y)
}

/// Whether the slot for coordinate `v` holds data for `v` itself under a window
/// whose origin on this axis is `origin`.
///
/// A slot is fresh iff unwrapping it against the origin reproduces the world
/// coordinate. Applied against the origin stored *before* a refresh commits,
/// this is the staleness test that drives incremental regeneration.
#[inline]
pub fn is_fresh(v: i64, origin: i64) -> bool {
    wrap(v) as i64 + origin == v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_covers_negatives() {
        assert_eq!(wrap(0), 0);
        assert_eq!(wrap(MAP_SIZE), 0);
        assert_eq!(wrap(-1), (MAP_SIZE - 1) as usize);
        assert_eq!(wrap(-MAP_SIZE), 0);
        assert_eq!(wrap(-3 * MAP_SIZE - 5), (MAP_SIZE - 5) as usize);
        for v in -300..300 {
            assert!(wrap(v) < MAP_SIZE as usize);
        }
    }

    #[test]
    fn voxel_index_is_injective_over_one_window() {
        // Every coordinate of a single window maps to a distinct slot.
        let origin = (-57, 13, -200);
        let mut seen = vec![false; (MAP_SIZE * MAP_SIZE * MAP_SIZE) as usize];
        for x in origin.0..origin.0 + MAP_SIZE {
            for y in origin.1..origin.1 + 2 {
                for z in origin.2..origin.2 + MAP_SIZE {
                    let idx = voxel_index(x, y, z);
                    assert!(!seen[idx]);
                    seen[idx] = true;
                }
            }
        }
    }

    #[test]
    fn congruent_coordinates_share_a_slot() {
        assert_eq!(voxel_index(5, 6, 7), voxel_index(5 + MAP_SIZE, 6, 7 - MAP_SIZE));
        assert_eq!(column_index(5, 6), column_index(5 - MAP_SIZE, 6 + 2 * MAP_SIZE));
    }

    #[test]
    fn freshness_distinguishes_congruent_coordinates() {
        let origin = -64;
        assert!(is_fresh(-64, origin));
        assert!(is_fresh(63, origin));
        assert!(!is_fresh(64, origin));
        assert!(!is_fresh(-64 + MAP_SIZE, origin));
        assert!(!is_fresh(-65, origin));
    }
}
