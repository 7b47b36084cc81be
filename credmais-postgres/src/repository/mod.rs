pub mod account_repository;
pub mod contract_repository;
pub mod evidence_repository;
pub mod note_repository;
pub mod seller_repository;

pub use account_repository::AccountRepositoryImpl;
pub use contract_repository::ContractRepositoryImpl;
pub use evidence_repository::EvidenceRepositoryImpl;
pub use note_repository::NoteRepositoryImpl;
pub use seller_repository::SellerRepositoryImpl;
