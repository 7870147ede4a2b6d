//! World content: the JSON seed loader and the built-in demo world.

pub mod canonical;
pub mod seeds;

pub use seeds::load_world;
