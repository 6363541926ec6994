//! Repository layer for data access.

mod base;
mod bootstrap_repository;
pub mod entities;

pub use base::{count_where, get_or_create};
pub use bootstrap_repository::{BootstrapRepository, BootstrapStore};

// Export mock for tests
#[cfg(any(test, feature = "test-utils"))]
pub use bootstrap_repository::MockBootstrapRepository;
