//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world and
//! the static registry that maps each block id to its capability flags.

use bitflags::bitflags;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockTypeSize;

bitflags! {
    /// Capability flags of a block type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BlockFlags: u8 {
        /// Block is solid and cannot be walked through
        const SOLID = 1 << 0;
        /// Block is transparent, treated as air when meshing nearby blocks
        const TRANSPARENT = 1 << 1;
        /// Block emits faces when meshed
        const MESHED = 1 << 2;
        /// Block can be broken by the player
        const DESTRUCTIBLE = 1 << 3;
        /// Top face samples the atlas slot one row below the canonical one
        const TEXTURE_TOP = 1 << 4;
        /// Bottom face samples the atlas slot two rows below the canonical one
        const TEXTURE_BOTTOM = 1 << 5;
    }
}

/// Enumerates all possible block types in the voxel world.
///
/// The discriminant of each variant is the block id stored in chunks, so the
/// order here is part of the persisted world format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// An air block, which is non-solid and transparent.
    AIR = 0,

    /// Plain stone, found below the dirt layer.
    STONE = 1,

    /// Dirt, found between the surface and the stone layer.
    DIRT = 2,

    /// A grass block with different textures on top and bottom.
    GRASS = 3,

    /// Brick, the default block placed by the player.
    BRICK = 4,

    /// Glass, solid but transparent to face culling.
    GLASS = 5,
}

/// Number of registered block types.
pub const BLOCK_TYPE_COUNT: usize = 6;

const OPAQUE: BlockFlags = BlockFlags::SOLID
    .union(BlockFlags::MESHED)
    .union(BlockFlags::DESTRUCTIBLE);

/// Capability flags indexed by block id.
pub static BLOCK_FLAGS: [BlockFlags; BLOCK_TYPE_COUNT] = [
    // AIR
    BlockFlags::TRANSPARENT,
    // STONE
    OPAQUE,
    // DIRT
    OPAQUE,
    // GRASS
    OPAQUE
        .union(BlockFlags::TEXTURE_TOP)
        .union(BlockFlags::TEXTURE_BOTTOM),
    // BRICK
    OPAQUE,
    // GLASS
    OPAQUE.union(BlockFlags::TRANSPARENT),
];

/// Looks up the flags of a block id.
///
/// # Panics
/// Panics if `id` is not a registered block id. Ids only come from terrain
/// generation or the placement palette, so an unknown id is a logic error.
#[inline]
pub fn flags_of(id: BlockTypeSize) -> BlockFlags {
    match BLOCK_FLAGS.get(id as usize) {
        Some(flags) => *flags,
        None => panic!("block id {} is outside the block registry", id),
    }
}

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Returns
    /// `None` if the id is not registered.
    pub fn from_id(id: BlockTypeSize) -> Option<Self> {
        <BlockType as FromPrimitive>::from_u8(id)
    }

    /// The id stored in chunk block arrays for this type.
    #[inline]
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// The registry flags of this type.
    #[inline]
    pub fn flags(self) -> BlockFlags {
        BLOCK_FLAGS[self as usize]
    }
}
