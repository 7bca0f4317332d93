//! Spatial primitives shared by the mining core and its collaborators.

/// Six-way cardinal directions.
pub mod direction;
/// Integer block coordinates.
pub mod pos;

pub use direction::{Direction, ParseDirectionError};
pub use pos::BlockPos;
