//! # Block Type Module
//!
//! This module defines the closed set of block types in the voxel world and
//! the conversions between the compact storage id and the enum.

use num_derive::FromPrimitive;

use crate::error::VoxelError;

use super::BlockTypeSize;

/// Number of declared block types. The registry has exactly this many rows.
pub const BLOCK_TYPE_COUNT: usize = 13;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminant is the compact id used in storage; `AIR` is always 0.
/// Physical and visual behavior is never derived from the variant directly,
/// it is looked up in the registry through [`BlockType::properties`].
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Empty space.
    #[default]
    AIR = 0,

    /// Top layer of dry land.
    GRASS = 1,

    /// Sub-surface soil, three layers under the surface.
    DIRT = 2,

    /// Bulk underground material.
    STONE = 3,

    /// Beach and seabed top layer. Falls when nothing is below it.
    SAND = 4,

    /// The only fluid.
    WATER = 5,

    /// World floor.
    BEDROCK = 6,

    /// A thin partial slab that needs a block under it.
    SNOW = 7,

    WOOD = 8,
    LEAVES = 9,
    GLASS = 10,
    PLANKS = 11,

    /// Hangs from a block above or clings to a block beside it.
    VINE = 12,
}

impl BlockType {
    /// Every declared block type, in id order.
    pub const ALL: [BlockType; BLOCK_TYPE_COUNT] = [
        BlockType::AIR,
        BlockType::GRASS,
        BlockType::DIRT,
        BlockType::STONE,
        BlockType::SAND,
        BlockType::WATER,
        BlockType::BEDROCK,
        BlockType::SNOW,
        BlockType::WOOD,
        BlockType::LEAVES,
        BlockType::GLASS,
        BlockType::PLANKS,
        BlockType::VINE,
    ];

    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Panics
    /// Panics if the id does not name a declared block type. Ids only come from
    /// this enum, so an unknown id is a programming error; use
    /// `BlockType::try_from` for untrusted input.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Self {
        match Self::try_from(btype) {
            Ok(block_type) => block_type,
            Err(err) => panic!("{}", err),
        }
    }

    /// The compact storage id of this block type.
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Whether this is `AIR`.
    pub fn is_air(self) -> bool {
        self == BlockType::AIR
    }
}

impl TryFrom<BlockTypeSize> for BlockType {
    type Error = VoxelError;

    fn try_from(value: BlockTypeSize) -> Result<Self, Self::Error> {
        num_traits::FromPrimitive::from_u8(value).ok_or(VoxelError::InvalidBlockType(value))
    }
}
