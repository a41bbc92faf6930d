pub mod repository;

pub use repository::{OrderRepository, RepositoryError, RepositoryResult};
