use crate::engine_state::{
    rendering::Vertex,
    voxels::block::{block_side::BlockSide, block_type::BlockType, ATLAS_TILES_PER_ROW},
};

use super::ambient_occlusion::{flip_diagonal, AO_CURVE};

/// Represents a single visible quad of a voxel in the mesh.
///
/// A face is one side of one block. Its four corners follow
/// [`BlockSide::corners`], counter-clockwise when seen from outside, and each
/// corner carries its own ambient occlusion level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Block coordinates of the owning voxel in chunk space
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// The block this face belongs to, used for texturing and shading
    pub block_type: BlockType,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
    /// Occlusion level (0..=3) of each corner, in corner order
    pub occlusion: [u8; 4],
}

impl Face {
    /// Creates a new face for a voxel at the given coordinates.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - The coordinates of the voxel in chunk space
    /// * `block_type` - The type of the block
    /// * `block_side` - Which side of the block this face represents
    /// * `occlusion` - Per-corner occlusion levels; ignored for fluids
    pub fn new(
        x: i32,
        y: i32,
        z: i32,
        block_type: BlockType,
        block_side: BlockSide,
        occlusion: [u8; 4],
    ) -> Self {
        Face {
            x,
            y,
            z,
            block_type,
            block_side,
            occlusion,
        }
    }

    /// Generates the four vertices of this face.
    ///
    /// Vertical extent is scaled by the block height so partial blocks render
    /// as slabs. Side faces map V along Y; top and bottom faces map the XZ
    /// plane onto the tile.
    pub fn vertices(&self) -> [Vertex; 4] {
        let props = self.block_type.properties();
        let [u_min, _, _, v_max] = props.textures.for_side(self.block_side).uv_rect();
        let tile = 1.0 / ATLAS_TILES_PER_ROW;
        let normal = self.block_side.normal();
        let shade = self.block_side.brightness();

        let corners = self.block_side.corners();
        let mut vertices = [Vertex::new([0.0; 3], normal, [0.0; 2], shade); 4];
        for (index, corner) in corners.iter().enumerate() {
            let cx = corner[0] as f32;
            let cy = corner[1] as f32 * props.height;
            let cz = corner[2] as f32;

            let (u, v) = match self.block_side {
                BlockSide::TOP | BlockSide::BOTTOM => (cx, 1.0 - cz),
                BlockSide::FRONT | BlockSide::BACK => (cx, cy),
                BlockSide::LEFT | BlockSide::RIGHT => (cz, cy),
            };

            let ao = if props.fluid {
                AO_CURVE[0]
            } else {
                AO_CURVE[self.occlusion[index] as usize]
            };

            vertices[index] = Vertex::new(
                [self.x as f32 + cx, self.y as f32 + cy, self.z as f32 + cz],
                normal,
                [u_min + u * tile, v_max - v * tile],
                ao * shade,
            );
        }
        vertices
    }

    /// Generates the six indices of this face's two triangles.
    ///
    /// # Arguments
    /// * `base` - Index of this face's first vertex in the vertex buffer
    ///
    /// The quad is split along the 0-2 diagonal unless the 1-3 corner pair is
    /// more occluded.
    pub fn indices(&self, base: u32) -> [u32; 6] {
        let flip = !self.block_type.properties().fluid && flip_diagonal(self.occlusion);
        if flip {
            [base + 1, base + 2, base + 3, base + 1, base + 3, base]
        } else {
            [base, base + 1, base + 2, base, base + 2, base + 3]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snow_face_is_scaled_vertically() {
        let face = Face::new(0, 4, 0, BlockType::SNOW, BlockSide::TOP, [0; 4]);
        for vertex in face.vertices() {
            assert!((vertex.position[1] - 4.125).abs() < 1e-6);
        }
    }

    #[test]
    fn occluded_corners_are_darker() {
        let face = Face::new(0, 0, 0, BlockType::STONE, BlockSide::TOP, [0, 1, 2, 3]);
        let vertices = face.vertices();
        assert_eq!(vertices[0].brightness, 1.0);
        assert!(vertices[1].brightness > vertices[2].brightness);
        assert!((vertices[3].brightness - 0.45).abs() < 1e-6);
    }

    #[test]
    fn fluid_faces_ignore_occlusion() {
        let face = Face::new(0, 0, 0, BlockType::WATER, BlockSide::FRONT, [3; 4]);
        for vertex in face.vertices() {
            assert_eq!(vertex.brightness, BlockSide::FRONT.brightness());
        }
        assert_eq!(face.indices(0), [0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn diagonal_follows_occlusion() {
        let even = Face::new(0, 0, 0, BlockType::STONE, BlockSide::TOP, [1, 0, 1, 0]);
        assert_eq!(even.indices(4), [4, 5, 6, 4, 6, 7]);
        let flipped = Face::new(0, 0, 0, BlockType::STONE, BlockSide::TOP, [0, 1, 0, 1]);
        assert_eq!(flipped.indices(4), [5, 6, 7, 5, 7, 4]);
    }

    #[test]
    fn uvs_stay_inside_the_tile() {
        for side in BlockSide::all() {
            let face = Face::new(0, 0, 0, BlockType::GRASS, side, [0; 4]);
            let [u_min, v_min, u_max, v_max] =
                BlockType::GRASS.properties().textures.for_side(side).uv_rect();
            for vertex in face.vertices() {
                let [u, v] = vertex.tex_coords;
                assert!(u >= u_min - 1e-6 && u <= u_max + 1e-6);
                assert!(v >= v_min - 1e-6 && v <= v_max + 1e-6);
            }
        }
    }
}
