//! Binding lifetime definitions.

#[cfg(any(feature = "config", feature = "graph-export"))]
use serde::{Deserialize, Serialize};

/// Binding lifetimes controlling instance caching behavior
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, Recipe, Lifetime, Resolver};
/// use std::sync::Arc;
///
/// struct Connection { dsn: String }
///
/// let container = Container::new();
/// container.singleton("connection", Recipe::resolver(|_| {
///     Ok(Connection { dsn: "sqlite::memory:".to_string() })
/// }));
/// container.bind("request_id", Recipe::resolver(|_| Ok(7u64)), false);
///
/// assert_eq!(container.get_binding("connection").unwrap().lifetime(), Lifetime::Singleton);
/// assert_eq!(container.get_binding("request_id").unwrap().lifetime(), Lifetime::Transient);
///
/// let a = container.get::<Connection>("connection").unwrap();
/// let b = container.get::<Connection>("connection").unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(a.dsn, "sqlite::memory:");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(any(feature = "config", feature = "graph-export"), derive(Serialize, Deserialize))]
pub enum Lifetime {
    /// First resolved instance is cached and returned for every later request
    Singleton,
    /// New instance per resolution, never cached
    #[default]
    Transient,
}

impl Lifetime {
    /// Maps the `singleton` flag accepted by `Container::bind`.
    #[inline]
    pub fn from_flag(singleton: bool) -> Self {
        if singleton {
            Lifetime::Singleton
        } else {
            Lifetime::Transient
        }
    }

    #[inline]
    pub fn is_singleton(self) -> bool {
        self == Lifetime::Singleton
    }
}
