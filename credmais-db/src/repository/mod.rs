pub mod account_queries;
pub mod contract_queries;
pub mod contract_query;
pub mod create_batch;
pub mod delete_batch;
pub mod evidence_queries;
pub mod exist_by_ids;
pub mod load_batch;
pub mod note_queries;
pub mod repositories;
pub mod seller_queries;
pub mod update_batch;

// Re-exports
pub use account_queries::*;
pub use contract_queries::*;
pub use contract_query::*;
pub use create_batch::*;
pub use delete_batch::*;
pub use evidence_queries::*;
pub use exist_by_ids::*;
pub use load_batch::*;
pub use note_queries::*;
pub use repositories::*;
pub use seller_queries::*;
pub use update_batch::*;
