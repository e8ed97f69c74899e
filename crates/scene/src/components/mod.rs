pub mod appearance;
pub mod drawable3d;
pub mod event_data;
pub mod transform;

pub use appearance::*;
pub use drawable3d::*;
pub use event_data::*;
pub use transform::*;
