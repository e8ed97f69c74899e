pub mod geometry;
pub mod matrix;
pub mod renderer;

pub use renderer::*;
