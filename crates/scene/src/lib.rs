pub mod camera;
pub mod components;
pub mod entity;
pub mod geometry;
pub mod label;
pub mod picking;
pub mod renderer;
pub mod resources;
pub mod selection;
pub mod world;

pub use entity::NodeId;
pub use world::*;
