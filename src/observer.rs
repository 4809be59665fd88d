//! Diagnostic observers for resolution events.
//!
//! Observers are called synchronously from inside the resolution engine. They
//! are only consulted when at least one is installed, so an unobserved
//! container pays nothing beyond a length check.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, info, trace, warn, Level};

use crate::error::DiError;
use crate::key::Identifier;

/// Observer trait for resolution events.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, DiObserver, Identifier, Recipe, Resolver};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct CountingObserver {
///     resolved: AtomicUsize,
/// }
///
/// impl DiObserver for CountingObserver {
///     fn resolving(&self, _id: &Identifier) {}
///
///     fn resolved(&self, _id: &Identifier, _duration: Duration) {
///         self.resolved.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let observer = Arc::new(CountingObserver::default());
/// let container = Container::new();
/// container.add_observer(observer.clone());
/// container.bind("answer", Recipe::value(42u8), false);
///
/// container.get::<u8>("answer").unwrap();
/// assert_eq!(observer.resolved.load(Ordering::SeqCst), 1);
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before an identifier is resolved.
    fn resolving(&self, id: &Identifier);

    /// Called after an identifier resolved successfully.
    fn resolved(&self, id: &Identifier, duration: Duration);

    /// Called when resolution of an identifier failed.
    fn failed(&self, id: &Identifier, error: &DiError) {
        let _ = (id, error);
    }
}

/// Installed observers.
#[derive(Default)]
pub(crate) struct Observers {
    observers: RwLock<Vec<Arc<dyn DiObserver>>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&self, observer: Arc<dyn DiObserver>) {
        self.observers.write().push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.read().is_empty()
    }

    // Snapshot so observers never run under our lock.
    fn snapshot(&self) -> Vec<Arc<dyn DiObserver>> {
        self.observers.read().clone()
    }

    pub(crate) fn resolving(&self, id: &Identifier) {
        for observer in self.snapshot() {
            observer.resolving(id);
        }
    }

    pub(crate) fn resolved(&self, id: &Identifier, duration: Duration) {
        for observer in self.snapshot() {
            observer.resolved(id, duration);
        }
    }

    pub(crate) fn failed(&self, id: &Identifier, error: &DiError) {
        for observer in self.snapshot() {
            observer.failed(id, error);
        }
    }
}

/// Built-in observer that forwards events to `tracing`.
///
/// Resolutions are emitted at the configured level (`DEBUG` by default),
/// failures always at `WARN`.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, LoggingObserver};
/// use std::sync::Arc;
/// use tracing::Level;
///
/// let container = Container::new();
/// container.add_observer(Arc::new(LoggingObserver::with_prefix("[app]").at_level(Level::INFO)));
/// ```
pub struct LoggingObserver {
    prefix: String,
    level: Level,
}

impl LoggingObserver {
    /// Creates a new logging observer with default prefix.
    pub fn new() -> Self {
        Self::with_prefix("[ferrous-ioc]")
    }

    /// Creates a new logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            level: Level::DEBUG,
        }
    }

    pub fn at_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn resolving(&self, id: &Identifier) {
        trace!(prefix = %self.prefix, identifier = %id, "resolving");
    }

    fn resolved(&self, id: &Identifier, duration: Duration) {
        // tracing macros need the level at compile time
        match self.level {
            Level::ERROR | Level::WARN | Level::INFO => {
                info!(prefix = %self.prefix, identifier = %id, ?duration, "resolved")
            }
            Level::DEBUG => debug!(prefix = %self.prefix, identifier = %id, ?duration, "resolved"),
            _ => trace!(prefix = %self.prefix, identifier = %id, ?duration, "resolved"),
        }
    }

    fn failed(&self, id: &Identifier, error: &DiError) {
        warn!(prefix = %self.prefix, identifier = %id, %error, "resolution failed");
    }
}
