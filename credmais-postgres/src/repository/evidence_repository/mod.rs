pub mod repo_impl;
pub mod create_batch;
pub mod delete_batch;
pub mod evidence_queries;
pub mod load_batch;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::EvidenceRepositoryImpl;
