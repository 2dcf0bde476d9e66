//! End-to-end checks of the map window and mesher against the production
//! terrain generator: window centering, eviction determinism, and meshing of
//! real terrain.

use cgmath::Point3;

use arena_voxel::geometry::shape::{occludes, ShapeKind, SHAPE_TABLE};
use arena_voxel::geometry::{block_color, MeshBuilder};
use arena_voxel::map::{MapCache, TerrainGenerator, MAP_SIZE, RENDER_LIMIT};

fn fresh_map(observer: Point3<f32>) -> MapCache {
    let mut map = MapCache::new(TerrainGenerator::new());
    map.refresh(observer);
    map
}

#[test]
fn window_recenters_on_the_observer() {
    let mut map = fresh_map(Point3::new(0.0, 0.0, 20.0));
    assert_eq!(
        map.origin(),
        Point3::new(-MAP_SIZE / 2, -MAP_SIZE / 2, 20 - MAP_SIZE / 2)
    );

    map.refresh(Point3::new(33.9, -12.1, 20.0));
    assert_eq!(
        map.origin(),
        Point3::new(33 - MAP_SIZE / 2, -13 - MAP_SIZE / 2, 20 - MAP_SIZE / 2)
    );
}

#[test]
fn world_survives_eviction_and_reload() {
    let mut map = fresh_map(Point3::new(0.0, 0.0, 20.0));

    let probes: Vec<(i64, i64, i64)> = (-20..20)
        .map(|i| (i * 3, -i * 2, (i % 7) - 3))
        .collect();
    let before: Vec<u8> = probes.iter().map(|&(x, y, z)| map.get(x, y, z)).collect();

    // Walk far enough that the whole original window is evicted, then return.
    map.refresh(Point3::new(400.0, 0.0, 20.0));
    map.refresh(Point3::new(800.0, 300.0, 20.0));
    map.refresh(Point3::new(0.0, 0.0, 20.0));

    let after: Vec<u8> = probes.iter().map(|&(x, y, z)| map.get(x, y, z)).collect();
    assert_eq!(before, after);
}

#[test]
fn terrain_meshes_into_triangles() {
    let observer = Point3::new(0.0, 0.0, 20.0);
    let map = fresh_map(observer);

    let mut mesh = MeshBuilder::new();
    let px = observer.x.floor() as i64;
    let py = observer.y.floor() as i64;
    let pz = observer.z.floor() as i64;
    for x in px - RENDER_LIMIT..=px + RENDER_LIMIT {
        for y in py - RENDER_LIMIT..=py + RENDER_LIMIT {
            for z in pz - RENDER_LIMIT..=pz + RENDER_LIMIT {
                let value = map.get(x, y, z);
                if value != 0 {
                    let neighbors = [
                        map.get(x - 1, y, z),
                        map.get(x + 1, y, z),
                        map.get(x, y - 1, z),
                        map.get(x, y + 1, z),
                        map.get(x, y, z - 1),
                        map.get(x, y, z + 1),
                    ];
                    mesh.emit_voxel(x, y, z, value, neighbors, block_color(value));
                }
            }
        }
    }

    assert!(mesh.triangle_count() > 0, "terrain produced no geometry");
    assert_eq!(mesh.vertices().len() % 3, 0);

    // Everything emitted sits inside the render cube (unit-cube corners may
    // poke one voxel past the sweep bound).
    let limit = (RENDER_LIMIT + 1) as f32;
    for vertex in mesh.vertices() {
        assert!((vertex.position[0] - observer.x).abs() <= limit);
        assert!((vertex.position[1] - observer.y).abs() <= limit);
        assert!((vertex.position[2] - observer.z).abs() <= limit);
    }
}

#[test]
fn neighbor_queries_at_the_sweep_edge_stay_fresh() {
    // The occlusion margin keeps a ring beyond the render cube inside the
    // window, so neighbor lookups at the sweep edge never read stale slots.
    let edge = RENDER_LIMIT + 1;
    assert!(edge < MAP_SIZE / 2);

    // The same coordinate read from two differently centered windows agrees.
    let near = fresh_map(Point3::new(0.0, 0.0, 0.0));
    let far = fresh_map(Point3::new(edge as f32, edge as f32, 0.0));
    for z in -3..3 {
        assert_eq!(near.get(edge, edge, z), far.get(edge, edge, z));
    }
}

#[test]
fn generated_palette_stays_inside_the_mask_domain() {
    let map = fresh_map(Point3::new(0.0, 0.0, 0.0));
    for x in -10..10 {
        for y in -10..10 {
            for z in -30..5 {
                let value = map.get(x, y, z);
                assert!(value <= 11, "generator produced out-of-palette value {value}");
                match value {
                    0 => assert_eq!(SHAPE_TABLE[0].kind, ShapeKind::Empty),
                    // Value 1 aliases the full cube and occludes neighbors.
                    1 => assert!(occludes(value)),
                    // The rest of the palette is low-bit fragment masks.
                    _ => assert_eq!(SHAPE_TABLE[value as usize].kind, ShapeKind::Fragment),
                }
            }
        }
    }
}
