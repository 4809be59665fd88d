//! Core traits for the dependency injection container.

mod injectable;
mod resolver;

pub use injectable::Injectable;
pub use resolver::{Resolver, ResolverCore};
