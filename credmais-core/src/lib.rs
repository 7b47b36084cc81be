pub mod aggregator;
pub mod config;
pub mod contracts;
pub mod evidence;
pub mod identity;
pub mod notes;
pub mod password;
pub mod policy;
pub mod provisioning;
pub mod report;
pub mod sellers;
pub mod services;
pub mod session;
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use aggregator::*;
pub use config::*;
pub use contracts::*;
pub use evidence::*;
pub use identity::*;
pub use notes::*;
pub use policy::*;
pub use provisioning::*;
pub use report::*;
pub use sellers::*;
pub use services::*;
pub use session::*;
