//! # Map Cache
//!
//! The wrap-around voxel window at the heart of the viewer. A dense
//! `MAP_SIZE³` buffer holds the neighborhood of world space around the
//! observer; as the observer moves, `refresh` re-centers the window and
//! regenerates only the cells that newly entered it, reusing everything whose
//! slot already holds fresh data. Stale slots are never cleared eagerly, they
//! are simply overwritten the next time their coordinate range matters.

use std::time::{Duration, Instant};

use cgmath::Point3;
use log::debug;

use super::coords::{column_index, is_fresh, voxel_index, wrap, MAP_SIZE};
use super::generator::{TerrainGenerator, EMPTY};

/// Window origin used before the first refresh. Far outside any reachable
/// coordinate range so the initial refresh sees every slot as stale.
const UNINITIALIZED_ORIGIN: i64 = 1_000_000_000;

/// Radius of the player collision sphere in voxels.
pub fn collision_radius() -> f32 {
    0.5 + 3.0_f32.sqrt() / 2.0 + 0.15
}

/// A moving window of generated world data centered on the observer.
pub struct MapCache {
    voxels: Vec<u8>,
    heights: Vec<i64>,
    origin: Point3<i64>,
    generator: TerrainGenerator,
    last_refresh: Duration,
}

impl MapCache {
    /// Allocates the window buffers. Nothing is generated until the first
    /// `refresh`.
    pub fn new(generator: TerrainGenerator) -> Self {
        let side = MAP_SIZE as usize;
        Self {
            voxels: vec![EMPTY; side * side * side],
            heights: vec![0; side * side],
            origin: Point3::new(
                UNINITIALIZED_ORIGIN,
                UNINITIALIZED_ORIGIN,
                UNINITIALIZED_ORIGIN,
            ),
            generator,
            last_refresh: Duration::ZERO,
        }
    }

    /// The block value at a world coordinate.
    ///
    /// Total over all integers, but only meaningful for coordinates inside the
    /// active window; outside it the slot belongs to some other congruent
    /// coordinate and the value read is stale.
    #[inline]
    pub fn get(&self, x: i64, y: i64, z: i64) -> u8 {
        self.voxels[voxel_index(x, y, z)]
    }

    /// Minimum corner of the active window.
    pub fn origin(&self) -> Point3<i64> {
        self.origin
    }

    /// Wall-clock duration of the most recent non-trivial refresh.
    pub fn last_refresh(&self) -> Duration {
        self.last_refresh
    }

    /// Re-centers the window on the observer and fills in stale cells.
    ///
    /// Work is proportional to the number of columns and voxels newly entering
    /// the window: a no-op when the observer has not left the window center, a
    /// thin shell for small moves, and the full window only on the first call.
    pub fn refresh(&mut self, observer: Point3<f32>) {
        let px = observer.x.floor() as i64;
        let py = observer.y.floor() as i64;
        let pz = observer.z.floor() as i64;

        let half = MAP_SIZE / 2;
        if px == self.origin.x + half && py == self.origin.y + half && pz == self.origin.z + half {
            return;
        }

        let started = Instant::now();
        let new_origin = Point3::new(px - half, py - half, pz - half);

        for x in new_origin.x..new_origin.x + MAP_SIZE {
            let x_fresh = is_fresh(x, self.origin.x);
            for y in new_origin.y..new_origin.y + MAP_SIZE {
                let q = column_index(x, y);
                let column_fresh = x_fresh && is_fresh(y, self.origin.y);
                if !column_fresh {
                    self.heights[q] = self.generator.height(x, y);
                }
                let height = self.heights[q];
                let base = q * MAP_SIZE as usize;
                for z in new_origin.z..new_origin.z + MAP_SIZE {
                    if !(column_fresh && is_fresh(z, self.origin.z)) {
                        self.voxels[base + wrap(z)] = self.generator.block(x, y, z, height);
                    }
                }
            }
        }

        self.origin = new_origin;
        self.last_refresh = started.elapsed();
        debug!(
            "map refresh: origin ({}, {}, {}), {:.1}ms",
            new_origin.x,
            new_origin.y,
            new_origin.z,
            self.last_refresh.as_secs_f64() * 1000.0
        );
    }

    /// Whether a sphere of the collision radius centered at `center` overlaps
    /// any occupied voxel in the surrounding 3x3x3 neighborhood.
    ///
    /// Each voxel is tested by the squared distance from its center, matching
    /// the movement integrator's stop-at-first-contact scheme.
    pub fn sphere_collides(&self, center: Point3<f32>) -> bool {
        let r = collision_radius();
        let r_squared = r * r;
        let bx = center.x.floor() as i64;
        let by = center.y.floor() as i64;
        let bz = center.z.floor() as i64;
        for x in bx - 1..=bx + 1 {
            let dx = x as f32 + 0.5 - center.x;
            for y in by - 1..=by + 1 {
                let dy = y as f32 + 0.5 - center.y;
                for z in bz - 1..=bz + 1 {
                    let dz = z as f32 + 0.5 - center.z;
                    if self.get(x, y, z) != EMPTY
                        && dx * dx + dy * dy + dz * dz < r_squared
                    {
                        return true;
                    }
                }
            }
        }
        false
    }
}
