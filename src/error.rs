//! Error types for the dependency injection container.

use std::fmt;
use std::sync::Arc;

/// Dependency injection errors
///
/// Represents the various error conditions that can occur while binding,
/// resolving or building values in ferrous-ioc.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, DiError};
///
/// let container = Container::new();
/// match container.resolve("mailer") {
///     Err(DiError::UnresolvableDependency(id)) => assert_eq!(id, "mailer"),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use ferrous_ioc::DiError;
///
/// let not_instantiable = DiError::NotInstantiable("app::Logger".to_string());
/// let circular = DiError::CircularDependency(vec!["a".into(), "b".into(), "a".into()]);
///
/// println!("Error: {}", not_instantiable);
/// println!("Error: {}", circular);
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// The identifier names a type that cannot be constructed (abstract/trait-only)
    NotInstantiable(String),
    /// No binding exists and the identifier names no known type
    UnresolvableDependency(String),
    /// An identifier was requested again while it was still being resolved (includes path)
    CircularDependency(Vec<String>),
    /// Maximum recursion depth exceeded
    DepthExceeded(usize),
    /// Type downcast failed
    TypeMismatch(&'static str),
    /// A constructor asked for more positional arguments than were assembled
    MissingArgument {
        /// Type being constructed
        type_name: &'static str,
        /// Zero-based argument position
        position: usize,
    },
    /// Failure raised by a caller-supplied resolver or constructor
    Resolver(Arc<dyn std::error::Error + Send + Sync>),
    /// Invalid configuration value
    Config(String),
    /// Dependency graph could not be serialized
    Export(String),
}

impl DiError {
    /// Wraps a caller-defined error so a resolver can return it through `DiResult`.
    ///
    /// The container never inspects or retries it; `source()` exposes the original.
    pub fn resolver<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DiError::Resolver(Arc::new(error))
    }
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::NotInstantiable(name) => write!(f, "Type is not instantiable: {}", name),
            DiError::UnresolvableDependency(id) => write!(f, "Unresolvable dependency: {}", id),
            DiError::CircularDependency(path) => {
                write!(f, "Circular dependency: {}", path.join(" -> "))
            }
            DiError::DepthExceeded(depth) => write!(f, "Max depth {} exceeded", depth),
            DiError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
            DiError::MissingArgument { type_name, position } => {
                write!(f, "Missing constructor argument {} for: {}", position, type_name)
            }
            DiError::Resolver(err) => write!(f, "Resolver failed: {}", err),
            DiError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DiError::Export(msg) => write!(f, "Export failed: {}", msg),
        }
    }
}

impl std::error::Error for DiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiError::Resolver(err) => Some(err.as_ref() as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

/// Result type for DI operations
///
/// A convenience alias for `Result<T, DiError>` used throughout ferrous-ioc.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{DiResult, DiError};
///
/// fn load_setting() -> DiResult<String> {
///     Ok("production".to_string())
/// }
///
/// fn failing_lookup() -> DiResult<()> {
///     Err(DiError::UnresolvableDependency("settings".to_string()))
/// }
///
/// assert!(load_setting().is_ok());
/// assert!(failing_lookup().is_err());
/// ```
pub type DiResult<T> = Result<T, DiError>;
