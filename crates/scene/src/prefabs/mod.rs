pub mod radiant;

pub use radiant::*;
