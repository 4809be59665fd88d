//! Constructor metadata for types the dependency builder can instantiate.

use std::any::Any;

use crate::arguments::Arguments;
use crate::descriptors::Parameter;
use crate::error::DiResult;

/// A type that describes its own constructor to the container.
///
/// `constructor()` lists the declared parameters in declaration order, or
/// returns `None` when the type has no constructor and is built without
/// arguments. `construct()` receives the assembled positional [`Arguments`]:
/// injected dependencies first, caller-supplied extras after them.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Arguments, Container, DiResult, Injectable, Parameter, Resolver};
/// use std::sync::Arc;
///
/// struct Connection { dsn: String }
///
/// impl Injectable for Connection {
///     fn constructor() -> Option<Vec<Parameter>> {
///         Some(vec![Parameter::untyped("dsn").optional()])
///     }
///
///     fn construct(mut args: Arguments) -> DiResult<Self> {
///         let dsn = args
///             .next_optional::<String>()?
///             .map(|dsn| (*dsn).clone())
///             .unwrap_or_else(|| "sqlite::memory:".to_string());
///         Ok(Connection { dsn })
///     }
/// }
///
/// struct Model { connection: Arc<Connection> }
///
/// impl Injectable for Model {
///     fn constructor() -> Option<Vec<Parameter>> {
///         Some(vec![Parameter::typed::<Connection>("connection")])
///     }
///
///     fn construct(mut args: Arguments) -> DiResult<Self> {
///         Ok(Model { connection: args.next()? })
///     }
/// }
///
/// let container = Container::new();
/// container.register::<Connection>();
/// container.register::<Model>();
///
/// let model = container.make::<Model>().unwrap();
/// assert_eq!(model.connection.dsn, "sqlite::memory:");
/// ```
pub trait Injectable: Any + Send + Sync + Sized {
    /// Declared constructor parameters, or `None` for a type without a constructor.
    fn constructor() -> Option<Vec<Parameter>> {
        None
    }

    /// Builds the value from positional arguments.
    fn construct(args: Arguments) -> DiResult<Self>;
}
