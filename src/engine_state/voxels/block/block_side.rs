//! # Block Side Module
//!
//! This module defines the six faces of a voxel block, the direction each one
//! faces, and the fixed per-face shading the mesher applies.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

/// Unit-cube corners of each face, counter-clockwise when seen from outside.
///
/// Indexed by `BlockSide as usize`. Corner 0 and corner 2 are opposite, as are
/// corner 1 and corner 3.
const FACE_CORNERS: [[[u8; 3]; 4]; 6] = [
    // FRONT
    [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]],
    // BACK
    [[0, 0, 0], [0, 1, 0], [1, 1, 0], [1, 0, 0]],
    // BOTTOM
    [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]],
    // TOP
    [[0, 1, 0], [0, 1, 1], [1, 1, 1], [1, 1, 0]],
    // LEFT
    [[0, 0, 0], [0, 0, 1], [0, 1, 1], [0, 1, 0]],
    // RIGHT
    [[1, 0, 0], [1, 1, 0], [1, 1, 1], [1, 0, 1]],
];

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The integer step from a block to the neighbor this face looks at.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> [f32; 3] {
        let offset = self.offset();
        [offset.x as f32, offset.y as f32, offset.z as f32]
    }

    /// Index of the axis the face normal lies on (0 = X, 1 = Y, 2 = Z).
    pub fn axis(self) -> usize {
        match self {
            BlockSide::LEFT | BlockSide::RIGHT => 0,
            BlockSide::BOTTOM | BlockSide::TOP => 1,
            BlockSide::FRONT | BlockSide::BACK => 2,
        }
    }

    /// The four unit-cube corners of this face, counter-clockwise from outside.
    pub fn corners(self) -> [[u8; 3]; 4] {
        FACE_CORNERS[self as usize]
    }

    /// Flat directional shading for this face.
    ///
    /// Top is brightest and bottom darkest; the Z-facing and X-facing sides sit
    /// at two intermediate levels.
    pub fn brightness(self) -> f32 {
        match self {
            BlockSide::TOP => 1.0,
            BlockSide::FRONT | BlockSide::BACK => 0.8,
            BlockSide::LEFT | BlockSide::RIGHT => 0.65,
            BlockSide::BOTTOM => 0.5,
        }
    }
}

/// The dimmest directional brightness any face receives.
pub const MIN_SIDE_BRIGHTNESS: f32 = 0.5;
