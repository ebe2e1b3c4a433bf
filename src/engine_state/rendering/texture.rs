//! Texture atlas slot arithmetic.
//!
//! The block atlas is a 16 x 16 grid of equally sized slots. Every block id
//! owns a column and a band of three rows: the canonical texture, then an
//! optional top texture, then an optional bottom texture. Only slot math lives
//! here; decoding the atlas image is the renderer's job.

use crate::engine_state::voxels::block::{
    block_side::BlockSide,
    block_type::{flags_of, BlockFlags},
    BlockTypeSize,
};

/// Number of slots along each edge of the atlas.
pub const ATLAS_TEXTURE_SLOT_COUNT: u32 = 16;
/// Size of one slot in UV units.
pub const ATLAS_SLOT_UV_SIZE: f32 = 1.0 / ATLAS_TEXTURE_SLOT_COUNT as f32;
/// Rows reserved per block id: canonical, top, bottom.
pub const ATLAS_ROWS_PER_BLOCK: u32 = 3;

/// A slot in the texture atlas, addressed by column and row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AtlasSlot {
    /// Column index, 0..16
    pub column: u32,
    /// Row index, 0..16
    pub row: u32,
}

impl AtlasSlot {
    /// Canonical slot for a block id.
    pub fn for_block(block_id: BlockTypeSize) -> Self {
        let id = block_id as u32;
        AtlasSlot {
            column: id % ATLAS_TEXTURE_SLOT_COUNT,
            row: (id / ATLAS_TEXTURE_SLOT_COUNT) * ATLAS_ROWS_PER_BLOCK,
        }
    }

    /// Slot sampled by one face of a block, honoring top/bottom overrides.
    ///
    /// # Returns
    /// The slot and whether it is an override slot. Override slots use the
    /// alternate corner mapping of [`AtlasSlot::corner_uv`].
    pub fn for_face(block_id: BlockTypeSize, side: BlockSide) -> (Self, bool) {
        let flags = flags_of(block_id);
        let canonical = Self::for_block(block_id);

        match side {
            BlockSide::TOP if flags.contains(BlockFlags::TEXTURE_TOP) => (
                AtlasSlot {
                    row: canonical.row + 1,
                    ..canonical
                },
                true,
            ),
            BlockSide::BOTTOM if flags.contains(BlockFlags::TEXTURE_BOTTOM) => (
                AtlasSlot {
                    row: canonical.row + 2,
                    ..canonical
                },
                true,
            ),
            _ => (canonical, false),
        }
    }

    /// UV of the slot's origin corner.
    pub fn base_uv(self) -> [f32; 2] {
        [
            self.column as f32 / ATLAS_TEXTURE_SLOT_COUNT as f32,
            self.row as f32 / ATLAS_TEXTURE_SLOT_COUNT as f32,
        ]
    }

    /// UV of quad corner `corner` (0..4) inside this slot.
    ///
    /// Side faces map corners 0 and 1 to the far u edge and corners 0 and 3 to
    /// the far v edge. Override faces (`alternate`) map corners 1 and 2 to the
    /// far u edge and corners 2 and 3 to the far v edge.
    pub fn corner_uv(self, corner: usize, alternate: bool) -> [f32; 2] {
        let [u, v] = self.base_uv();
        let (far_u, far_v) = if alternate {
            (corner == 1 || corner == 2, corner == 2 || corner == 3)
        } else {
            (corner == 0 || corner == 1, corner == 0 || corner == 3)
        };

        [
            u + if far_u { ATLAS_SLOT_UV_SIZE } else { 0.0 },
            v + if far_v { ATLAS_SLOT_UV_SIZE } else { 0.0 },
        ]
    }
}
