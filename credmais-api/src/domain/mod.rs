pub mod forms;
pub mod identity;
pub mod money;
pub mod report;

pub use forms::*;
pub use identity::*;
pub use money::*;
pub use report::*;
