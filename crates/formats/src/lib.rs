pub mod history;
pub mod history_ingest;
pub mod history_loader;

pub use history::*;
pub use history_ingest::*;
pub use history_loader::*;
