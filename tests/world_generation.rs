use voxel_terrain::generation::{NoiseField, NoiseSource, TerrainParams};
use voxel_terrain::rendering::VisibilityResolver;
use voxel_terrain::voxels::block::{block_type::BlockType, EMPTY_BLOCK};
use voxel_terrain::{BlockCatalog, World, WorldParams, WorldSize};

/// A field sampling to fixed values.
struct FixedField {
    horizontal: f64,
    volume: f64,
}

impl NoiseField for FixedField {
    fn sample_2d(&self, _x: f64, _z: f64) -> f64 {
        self.horizontal
    }

    fn sample_3d(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.volume
    }
}

/// Hands out `fields` in order, then zero everywhere.
struct ScriptedSource {
    fields: Vec<f64>,
    drawn: usize,
}

impl ScriptedSource {
    fn new(fields: Vec<f64>) -> Self {
        ScriptedSource { fields, drawn: 0 }
    }
}

impl NoiseSource for ScriptedSource {
    type Field = FixedField;

    fn next_field(&mut self) -> FixedField {
        let value = self.fields.get(self.drawn).copied().unwrap_or(0.0);
        self.drawn += 1;
        FixedField {
            horizontal: value,
            volume: value,
        }
    }
}

fn flat_world(width: u32, height: u32, offset: f64) -> World {
    World::with_params(
        WorldSize { width, height },
        WorldParams {
            seed: 0,
            terrain: TerrainParams {
                scale: 1.0,
                magnitude: 0.0,
                offset,
            },
        },
    )
}

#[test]
fn single_column_lays_out_fill_surface_and_air() {
    let catalog = BlockCatalog::default().without_resources();
    let mut world = flat_world(1, 3, 0.5);
    world.generate(&catalog).expect("generation");

    let grid = world.grid();
    assert_eq!(grid.block_type_at(0, 0, 0), BlockType::DIRT.id());
    assert_eq!(grid.block_type_at(0, 1, 0), BlockType::GRASS.id());
    assert_eq!(grid.block_type_at(0, 2, 0), EMPTY_BLOCK);

    // a one-wide world has no interior, so both solid cells are drawn
    let batches = world.batches();
    assert_eq!(batches.get(BlockType::DIRT.id()).map(|b| b.len()), Some(1));
    assert_eq!(batches.get(BlockType::GRASS.id()).map(|b| b.len()), Some(1));
}

#[test]
fn resources_survive_below_the_surface_only() {
    let catalog = BlockCatalog::default();
    let mut world = flat_world(4, 6, 0.5);
    // stone everywhere, no coal, then a flat height field
    let mut source = ScriptedSource::new(vec![1.0, -1.0, 0.0]);
    world
        .generate_with(&catalog, &mut source)
        .expect("generation");

    let grid = world.grid();
    assert_eq!(grid.count_of(BlockType::STONE.id()), 4 * 4 * 3);
    assert_eq!(grid.count_of(BlockType::GRASS.id()), 4 * 4);
    assert_eq!(grid.count_of(BlockType::DIRT.id()), 0);
    assert_eq!(grid.count_of(BlockType::COAL_ORE.id()), 0);
    assert_eq!(grid.count_of(EMPTY_BLOCK), 4 * 4 * 2);

    // bottom layer is on the boundary; the two layers above show only their rims
    let batches = world.batches();
    assert_eq!(batches.get(BlockType::STONE.id()).map(|b| b.len()), Some(16 + 12 + 12));
    assert_eq!(batches.get(BlockType::GRASS.id()).map(|b| b.len()), Some(16));
    assert_eq!(batches.get(BlockType::COAL_ORE.id()).map(|b| b.len()), Some(0));
}

#[test]
fn seeded_generation_is_reproducible() {
    let catalog = BlockCatalog::default();
    let size = WorldSize {
        width: 20,
        height: 12,
    };
    let params = WorldParams {
        seed: 4242,
        ..WorldParams::default()
    };

    let mut first = World::with_params(size, params);
    let mut second = World::with_params(size, params);
    first.generate(&catalog).expect("first generation");
    second.generate(&catalog).expect("second generation");

    assert_eq!(first.grid(), second.grid());
    assert_eq!(first.batches(), second.batches());
}

#[test]
fn instances_are_exactly_the_exposed_voxels() {
    let catalog = BlockCatalog::default();
    let mut world = World::with_params(
        WorldSize {
            width: 16,
            height: 16,
        },
        WorldParams {
            seed: 7,
            terrain: TerrainParams {
                scale: 8.0,
                magnitude: 0.4,
                offset: 0.5,
            },
        },
    );
    world.generate(&catalog).expect("generation");

    let grid = world.grid();
    for (position, voxel) in grid.iter() {
        let (x, y, z) = (position.x as i32, position.y as i32, position.z as i32);
        let exposed =
            voxel.block_type != EMPTY_BLOCK && VisibilityResolver::is_exposed(grid, x, y, z);
        assert_eq!(voxel.instance_id.is_some(), exposed, "voxel at {:?}", position);
    }
}

#[test]
fn batches_are_dense_and_point_back_at_their_voxels() {
    let catalog = BlockCatalog::default();
    let mut world = World::with_params(
        WorldSize {
            width: 12,
            height: 10,
        },
        WorldParams {
            seed: 31,
            terrain: TerrainParams {
                scale: 6.0,
                magnitude: 0.5,
                offset: 0.4,
            },
        },
    );
    world.generate(&catalog).expect("generation");

    let grid = world.grid();
    let batches = world.batches();
    for batch in batches.iter() {
        let mut ids: Vec<u32> = grid
            .iter()
            .filter(|(_, voxel)| voxel.block_type == batch.block_type())
            .filter_map(|(_, voxel)| voxel.instance_id)
            .collect();
        ids.sort_unstable();
        let expected: Vec<u32> = (0..batch.len() as u32).collect();
        assert_eq!(ids, expected, "ids of {}", batch.name());
        assert!(batch.len() <= batch.max_instances());

        for (slot, transform) in batch.transforms().iter().enumerate() {
            let [x, y, z] = transform.translation();
            let voxel = grid
                .get(x.floor() as i32, y.floor() as i32, z.floor() as i32)
                .expect("instance inside the grid");
            assert_eq!(voxel.block_type, batch.block_type());
            assert_eq!(voxel.instance_id, Some(slot as u32));
        }
    }
}

#[test]
fn enclosed_voxels_are_culled() {
    let catalog = BlockCatalog::default().without_resources();
    // surface at the top row: solid dirt with a grass lid
    let mut world = flat_world(5, 5, 0.99);
    world.generate(&catalog).expect("generation");

    let grid = world.grid();
    assert_eq!(grid.count_of(EMPTY_BLOCK), 0);
    assert_eq!(grid.get(2, 2, 2).and_then(|v| v.instance_id), None);

    // a 3x3x3 core is hidden
    assert_eq!(world.batches().total_instances(), 125 - 27);
}
