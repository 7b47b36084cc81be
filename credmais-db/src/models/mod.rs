pub mod account;
pub mod common_enums;
pub mod contract;
pub mod evidence;
pub mod identifiable;
pub mod note;
pub mod owned;
pub mod seller;
pub mod text_limits;

// Re-exports
pub use account::*;
pub use common_enums::*;
pub use contract::*;
pub use evidence::*;
pub use identifiable::*;
pub use note::*;
pub use owned::*;
pub use seller::*;
pub use text_limits::*;
