//! # Block Module
//!
//! This module provides the block registry: one static row of physical and
//! visual properties per [`BlockType`]. Every other subsystem asks the
//! registry what a block does instead of matching on the type itself.

use block_side::BlockSide;
use block_type::{BlockType, BLOCK_TYPE_COUNT};
use cgmath::Vector3;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Number of tiles along each edge of the texture atlas.
pub const ATLAS_TILES_PER_ROW: f32 = 16.0;

/// Column and row of a tile in the texture atlas.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AtlasTile {
    /// Tile column, counted from the left edge
    pub column: u8,
    /// Tile row, counted from the top edge
    pub row: u8,
}

impl AtlasTile {
    /// Creates a tile reference.
    pub const fn new(column: u8, row: u8) -> Self {
        AtlasTile { column, row }
    }

    /// Normalized `(u_min, v_min, u_max, v_max)` rectangle of this tile.
    pub fn uv_rect(self) -> [f32; 4] {
        let u_min = self.column as f32 / ATLAS_TILES_PER_ROW;
        let v_min = self.row as f32 / ATLAS_TILES_PER_ROW;
        [
            u_min,
            v_min,
            u_min + 1.0 / ATLAS_TILES_PER_ROW,
            v_min + 1.0 / ATLAS_TILES_PER_ROW,
        ]
    }
}

/// Atlas tiles for the top, the four sides and the bottom of a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceTextures {
    pub top: AtlasTile,
    pub side: AtlasTile,
    pub bottom: AtlasTile,
}

impl FaceTextures {
    /// Uses the same tile on every face.
    pub const fn uniform(tile: AtlasTile) -> Self {
        FaceTextures {
            top: tile,
            side: tile,
            bottom: tile,
        }
    }

    /// The tile drawn on the given face.
    pub fn for_side(&self, side: BlockSide) -> AtlasTile {
        match side {
            BlockSide::TOP => self.top,
            BlockSide::BOTTOM => self.bottom,
            _ => self.side,
        }
    }
}

/// Physical and visual properties shared by every block of one type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockProperties {
    /// Atlas tiles for the top, side and bottom faces
    pub textures: FaceTextures,
    /// Participates in collision
    pub solid: bool,
    /// Does not hide neighboring faces or cast ambient occlusion
    pub transparent: bool,
    /// Participates in buoyancy physics and only shows faces against air
    pub fluid: bool,
    /// May be overwritten by a placement without being removed first
    pub replaceable: bool,
    /// Occupied fraction of the unit cube on the vertical axis, in (0, 1]
    pub height: f32,
    /// Can hold up a neighbor that needs support
    pub is_support: bool,
    /// Disappears when none of `support_directions` holds a support
    pub needs_support: bool,
    /// Offsets at which a supporting block is accepted
    pub support_directions: &'static [[i32; 3]],
}

impl BlockProperties {
    /// Whether the block occupies less than a full cube vertically.
    pub fn is_partial(&self) -> bool {
        self.height < 1.0
    }

    /// Whether the block darkens neighboring vertices for ambient occlusion.
    pub fn occludes(&self) -> bool {
        self.solid && !self.transparent && !self.is_partial()
    }

    /// Offsets at which a supporting block is accepted, as vectors.
    pub fn support_offsets(&self) -> impl Iterator<Item = Vector3<i32>> + '_ {
        self.support_directions
            .iter()
            .map(|direction| Vector3::new(direction[0], direction[1], direction[2]))
    }
}

const BELOW: &[[i32; 3]] = &[[0, -1, 0]];
const ABOVE_OR_BESIDE: &[[i32; 3]] = &[[0, 1, 0], [1, 0, 0], [-1, 0, 0], [0, 0, 1], [0, 0, -1]];

/// A full, opaque, solid cube that supports its neighbors.
const FULL_BLOCK: BlockProperties = BlockProperties {
    textures: FaceTextures::uniform(AtlasTile::new(0, 0)),
    solid: true,
    transparent: false,
    fluid: false,
    replaceable: false,
    height: 1.0,
    is_support: true,
    needs_support: false,
    support_directions: &[],
};

/// The registry. Indexed by `BlockType as usize`, one row per declared type.
static BLOCK_PROPERTIES: [BlockProperties; BLOCK_TYPE_COUNT] = [
    // AIR
    BlockProperties {
        solid: false,
        transparent: true,
        replaceable: true,
        is_support: false,
        ..FULL_BLOCK
    },
    // GRASS
    BlockProperties {
        textures: FaceTextures {
            top: AtlasTile::new(0, 0),
            side: AtlasTile::new(1, 0),
            bottom: AtlasTile::new(2, 0),
        },
        ..FULL_BLOCK
    },
    // DIRT
    BlockProperties {
        textures: FaceTextures::uniform(AtlasTile::new(2, 0)),
        ..FULL_BLOCK
    },
    // STONE
    BlockProperties {
        textures: FaceTextures::uniform(AtlasTile::new(3, 0)),
        ..FULL_BLOCK
    },
    // SAND
    BlockProperties {
        textures: FaceTextures::uniform(AtlasTile::new(4, 0)),
        needs_support: true,
        support_directions: BELOW,
        ..FULL_BLOCK
    },
    // WATER
    BlockProperties {
        textures: FaceTextures::uniform(AtlasTile::new(5, 0)),
        solid: false,
        transparent: true,
        fluid: true,
        replaceable: true,
        is_support: false,
        ..FULL_BLOCK
    },
    // BEDROCK
    BlockProperties {
        textures: FaceTextures::uniform(AtlasTile::new(6, 0)),
        ..FULL_BLOCK
    },
    // SNOW
    BlockProperties {
        textures: FaceTextures::uniform(AtlasTile::new(7, 0)),
        replaceable: true,
        height: 0.125,
        is_support: false,
        needs_support: true,
        support_directions: BELOW,
        ..FULL_BLOCK
    },
    // WOOD
    BlockProperties {
        textures: FaceTextures {
            top: AtlasTile::new(9, 0),
            side: AtlasTile::new(8, 0),
            bottom: AtlasTile::new(9, 0),
        },
        ..FULL_BLOCK
    },
    // LEAVES
    BlockProperties {
        textures: FaceTextures::uniform(AtlasTile::new(10, 0)),
        transparent: true,
        ..FULL_BLOCK
    },
    // GLASS
    BlockProperties {
        textures: FaceTextures::uniform(AtlasTile::new(11, 0)),
        transparent: true,
        ..FULL_BLOCK
    },
    // PLANKS
    BlockProperties {
        textures: FaceTextures::uniform(AtlasTile::new(12, 0)),
        ..FULL_BLOCK
    },
    // VINE
    BlockProperties {
        textures: FaceTextures::uniform(AtlasTile::new(13, 0)),
        solid: false,
        transparent: true,
        replaceable: true,
        needs_support: true,
        support_directions: ABOVE_OR_BESIDE,
        ..FULL_BLOCK
    },
];

/// Looks up the registry row for a block type.
///
/// Total over every declared [`BlockType`]; raw ids are validated when they are
/// converted into a `BlockType`.
pub fn properties(block_type: BlockType) -> &'static BlockProperties {
    &BLOCK_PROPERTIES[block_type as usize]
}

impl BlockType {
    /// Shorthand for [`properties`].
    pub fn properties(self) -> &'static BlockProperties {
        properties(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_height_is_in_unit_range() {
        for block_type in BlockType::ALL {
            let height = block_type.properties().height;
            assert!(height > 0.0 && height <= 1.0, "{:?}", block_type);
        }
    }

    #[test]
    fn partial_blocks_never_occlude() {
        for block_type in BlockType::ALL {
            let props = block_type.properties();
            if props.is_partial() {
                assert!(!props.occludes(), "{:?}", block_type);
            }
        }
        assert!(BlockType::SNOW.properties().is_partial());
    }

    #[test]
    fn empty_and_fluid_blocks_support_nothing() {
        assert!(!BlockType::AIR.properties().is_support);
        assert!(!BlockType::WATER.properties().is_support);
        assert!(BlockType::AIR.properties().transparent);
    }

    #[test]
    fn dependents_declare_where_they_rest() {
        for block_type in BlockType::ALL {
            let props = block_type.properties();
            assert_eq!(
                props.needs_support,
                !props.support_directions.is_empty(),
                "{:?}",
                block_type
            );
        }
    }

    #[test]
    fn grass_uses_distinct_top_side_and_bottom_tiles() {
        let textures = BlockType::GRASS.properties().textures;
        assert_ne!(textures.for_side(BlockSide::TOP), textures.for_side(BlockSide::LEFT));
        assert_ne!(textures.for_side(BlockSide::BOTTOM), textures.for_side(BlockSide::FRONT));
    }

    #[test]
    fn uv_rect_covers_one_tile() {
        let [u_min, v_min, u_max, v_max] = AtlasTile::new(3, 2).uv_rect();
        assert_eq!(u_min, 3.0 / 16.0);
        assert_eq!(v_min, 2.0 / 16.0);
        assert!((u_max - u_min - 1.0 / 16.0).abs() < 1e-6);
        assert!((v_max - v_min - 1.0 / 16.0).abs() < 1e-6);
    }
}
