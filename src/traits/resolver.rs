//! Resolver traits for identifier-based resolution.

use std::any::{type_name, Any};
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::Identifier;
use crate::registration::AnyArc;

/// Core resolver trait for object-safe resolution.
///
/// This trait carries the fundamental, type-erased resolution entry point.
/// It is object-safe, so resolvers can be passed around as
/// `&dyn ResolverCore`.
///
/// Most users should use the [`Resolver`] trait instead, which provides
/// typed generic methods built on top of this trait.
pub trait ResolverCore: Send + Sync {
    /// Resolves an identifier, handing `args` to the dependency builder when
    /// the identifier ends up being constructed.
    ///
    /// # Returns
    ///
    /// * `Ok(AnyArc)` - The resolved value wrapped in `Arc<dyn Any>`
    /// * `Err(DiError)` - Resolution error (unresolvable, not instantiable, circular, etc.)
    fn resolve_any(&self, id: &Identifier, args: Vec<AnyArc>) -> DiResult<AnyArc>;
}

/// High-level resolver interface with typed generic methods.
///
/// Handles downcasting of the type-erased values produced by
/// [`ResolverCore::resolve_any`].
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, Recipe, Resolver};
/// use std::sync::Arc;
///
/// trait Logger: Send + Sync {
///     fn log(&self, msg: &str) -> String;
/// }
///
/// struct ConsoleLogger;
/// impl Logger for ConsoleLogger {
///     fn log(&self, msg: &str) -> String {
///         format!("LOG: {}", msg)
///     }
/// }
///
/// let container = Container::new();
/// container.bind("port", Recipe::value(8080u16), false);
/// container.singleton("logger", Recipe::resolver_trait(|_| {
///     Ok(Arc::new(ConsoleLogger) as Arc<dyn Logger>)
/// }));
///
/// assert_eq!(*container.get::<u16>("port").unwrap(), 8080);
/// assert_eq!(container.get_trait::<dyn Logger>("Logger").unwrap().log("up"), "LOG: up");
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves `id` and downcasts the result to a concrete `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_ioc::{Container, Recipe, Resolver};
    ///
    /// let container = Container::new();
    /// container.bind("dsn", Recipe::value("postgres://localhost".to_string()), false);
    ///
    /// let dsn = container.get::<String>("DSN").unwrap();
    /// assert_eq!(&*dsn, "postgres://localhost");
    /// ```
    fn get<T: Any + Send + Sync>(&self, id: impl AsRef<str>) -> DiResult<Arc<T>> {
        self.resolve_any(&Identifier::new(id), Vec::new())?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
    }

    /// Resolves `id` as a trait object.
    ///
    /// Trait objects are stored as `Arc<Arc<dyn T>>`; see
    /// [`Recipe::resolver_trait`](crate::Recipe::resolver_trait).
    fn get_trait<T: ?Sized + Send + Sync + 'static>(&self, id: impl AsRef<str>) -> DiResult<Arc<T>> {
        self.resolve_any(&Identifier::new(id), Vec::new())?
            .downcast::<Arc<T>>()
            .map(|boxed| (*boxed).clone())
            .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
    }

    /// Resolves a type by its short name and downcasts the result.
    ///
    /// A binding under the type's name wins over the type catalog.
    fn make<T: Any + Send + Sync>(&self) -> DiResult<Arc<T>> {
        self.make_with::<T>(Vec::new())
    }

    /// Like [`make`](Self::make), passing extra trailing constructor arguments.
    fn make_with<T: Any + Send + Sync>(&self, args: Vec<AnyArc>) -> DiResult<Arc<T>> {
        self.resolve_any(&Identifier::of_type::<T>(), args)?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
    }

    /// Resolves `id` as a concrete `T`, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics if the identifier cannot be resolved or holds a different type.
    fn get_required<T: Any + Send + Sync>(&self, id: impl AsRef<str>) -> Arc<T> {
        let id = id.as_ref();
        self.get::<T>(id)
            .unwrap_or_else(|e| panic!("Failed to resolve {} as {}: {:?}", id, type_name::<T>(), e))
    }

    /// Resolves `id` as a trait object, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics if the identifier cannot be resolved or holds a different type.
    fn get_required_trait<T: ?Sized + Send + Sync + 'static>(&self, id: impl AsRef<str>) -> Arc<T> {
        let id = id.as_ref();
        self.get_trait::<T>(id)
            .unwrap_or_else(|e| panic!("Failed to resolve trait {} as {}: {:?}", id, type_name::<T>(), e))
    }

    /// Resolves a type by its short name, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics if the type cannot be resolved.
    fn make_required<T: Any + Send + Sync>(&self) -> Arc<T> {
        self.make::<T>()
            .unwrap_or_else(|e| panic!("Failed to make {}: {:?}", type_name::<T>(), e))
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}
