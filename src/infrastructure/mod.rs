//! Infrastructure implementations of domain contracts.

pub mod memory;

pub use memory::InMemoryUserRepository;
