pub mod file_store;
pub mod manager;

pub use file_store::*;
pub use manager::*;
