pub mod postgres_repositories;
pub mod repository;
pub mod utils;

pub use postgres_repositories::{PostgresRepositories, UnitOfWork};

#[cfg(test)]
pub mod test_helper;
