pub mod document;
pub mod engine;

pub use document::*;
pub use engine::*;
