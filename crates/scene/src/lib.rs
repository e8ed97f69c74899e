pub mod animation;
pub mod camera;
pub mod components;
pub mod config;
pub mod entity;
pub mod interaction;
pub mod layout;
pub mod picking;
pub mod prefabs;
pub mod radiant;
pub mod severity;
pub mod world;

pub use world::*;
