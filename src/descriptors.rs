//! Type descriptors standing in for runtime reflection, plus binding
//! descriptors for introspection and diagnostics.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::arguments::Arguments;
use crate::container::Container;
use crate::error::DiResult;
use crate::key::{short_type_name, strip_path, Identifier};
use crate::lifetime::Lifetime;
use crate::registration::{AnyArc, RecipeKind};
use crate::traits::Injectable;

pub(crate) type ConstructFn = Arc<dyn Fn(Arguments) -> DiResult<AnyArc> + Send + Sync>;

/// Whether a catalog type can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Concrete,
    /// Trait objects and other types only reachable through an explicit binding
    Abstract,
}

/// Declared type of a constructor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    Untyped,
    Typed {
        type_id: TypeId,
        type_name: &'static str,
    },
}

/// One constructor parameter, in declaration order.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, Parameter};
///
/// struct Connection;
///
/// let conn = Parameter::typed::<Connection>("connection");
/// assert!(conn.is_injectable());
/// assert_eq!(conn.declared_type(), Some("Connection"));
///
/// assert!(!Parameter::untyped("name").is_injectable());
/// assert!(!Parameter::typed::<Connection>("replica").optional().is_injectable());
/// assert!(Parameter::typed::<Container>("container").is_container());
/// ```
#[derive(Debug, Clone)]
pub struct Parameter {
    name: &'static str,
    ty: ParameterType,
    optional: bool,
    variadic: bool,
}

impl Parameter {
    /// Required parameter whose declared type is `T`.
    pub fn typed<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            name,
            ty: ParameterType::Typed {
                type_id: TypeId::of::<T>(),
                type_name: short_type_name::<T>(),
            },
            optional: false,
            variadic: false,
        }
    }

    /// Parameter without a resolvable type (scalars, strings, ...).
    pub fn untyped(name: &'static str) -> Self {
        Self {
            name,
            ty: ParameterType::Untyped,
            optional: false,
            variadic: false,
        }
    }

    /// Marks the parameter as having a default value.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Marks the parameter as collecting every remaining argument.
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parameter_type(&self) -> ParameterType {
        self.ty
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Short name of the declared type, if any.
    pub fn declared_type(&self) -> Option<&'static str> {
        match self.ty {
            ParameterType::Typed { type_name, .. } => Some(type_name),
            ParameterType::Untyped => None,
        }
    }

    /// Identifier the builder resolves for this parameter.
    pub fn identifier(&self) -> Option<Identifier> {
        self.declared_type().map(Identifier::new)
    }

    /// True when the builder fills this parameter itself.
    pub fn is_injectable(&self) -> bool {
        !self.optional && !self.variadic && self.declared_type().is_some()
    }

    /// True when the declared type is the container itself.
    pub fn is_container(&self) -> bool {
        matches!(self.ty, ParameterType::Typed { type_id, .. } if type_id == TypeId::of::<Container>())
    }
}

/// Catalog entry describing how to construct a type.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, Parameter, Resolver, TypeDescriptor};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Clock;
///
/// struct Scheduler { clock: Arc<Clock>, name: String }
///
/// let container = Container::new();
/// container.register_type(TypeDescriptor::with_default::<Clock>());
/// container.register_type(TypeDescriptor::concrete::<Scheduler, _>(
///     vec![Parameter::typed::<Clock>("clock"), Parameter::untyped("name")],
///     |mut args| Ok(Scheduler { clock: args.next()?, name: args.next_value()? }),
/// ));
///
/// let extra: Vec<ferrous_ioc::AnyArc> = vec![Arc::new("nightly".to_string())];
/// let scheduler = container
///     .resolve_with("Scheduler", extra)
///     .unwrap()
///     .downcast::<Scheduler>()
///     .unwrap();
/// assert_eq!(scheduler.name, "nightly");
/// ```
#[derive(Clone)]
pub struct TypeDescriptor {
    name: &'static str,
    qualified_name: &'static str,
    type_id: TypeId,
    kind: TypeKind,
    parameters: Option<Vec<Parameter>>,
    construct: Option<ConstructFn>,
}

impl TypeDescriptor {
    /// Descriptor driven by the type's [`Injectable`] implementation.
    pub fn of<T: Injectable>() -> Self {
        Self::build::<T, _>(T::constructor(), |args| T::construct(args))
    }

    /// Type without a declared constructor, instantiated through `Default`.
    pub fn with_default<T: Default + Any + Send + Sync>() -> Self {
        Self::build::<T, _>(None, |_| Ok(T::default()))
    }

    /// Type with an explicit constructor parameter list.
    pub fn concrete<T, F>(parameters: Vec<Parameter>, construct: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Arguments) -> DiResult<T> + Send + Sync + 'static,
    {
        Self::build::<T, _>(Some(parameters), construct)
    }

    /// Type that can only be produced by a binding (trait objects, interfaces).
    pub fn abstract_type<T: ?Sized + 'static>() -> Self {
        Self {
            name: short_type_name::<T>(),
            qualified_name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
            kind: TypeKind::Abstract,
            parameters: None,
            construct: None,
        }
    }

    fn build<T, F>(parameters: Option<Vec<Parameter>>, construct: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Arguments) -> DiResult<T> + Send + Sync + 'static,
    {
        let construct: ConstructFn = Arc::new(move |args: Arguments| -> DiResult<AnyArc> {
            let value: AnyArc = Arc::new(construct(args)?);
            Ok(value)
        });
        Self {
            name: short_type_name::<T>(),
            qualified_name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
            kind: TypeKind::Concrete,
            parameters,
            construct: Some(construct),
        }
    }

    /// Overrides the short name the type is registered under.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = strip_path(name);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn qualified_name(&self) -> &'static str {
        self.qualified_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_instantiable(&self) -> bool {
        self.kind == TypeKind::Concrete && self.construct.is_some()
    }

    /// Declared constructor parameters; `None` when the type has no constructor.
    pub fn parameters(&self) -> Option<&[Parameter]> {
        self.parameters.as_deref()
    }

    pub(crate) fn construct(&self) -> Option<&ConstructFn> {
        self.construct.as_ref()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("qualified_name", &self.qualified_name)
            .field("kind", &self.kind)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Binding descriptor for introspection and diagnostics
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, Lifetime, Recipe, RecipeKind};
///
/// let container = Container::new();
/// container.singleton("Config", Recipe::resolver(|_| Ok(42u32)));
/// container.bind("greeting", Recipe::value("hi"), false);
/// container.resolve("config").unwrap();
///
/// let descriptors = container.descriptors();
/// assert_eq!(descriptors.len(), 2);
///
/// let config = descriptors.iter().find(|d| d.identifier.as_str() == "config").unwrap();
/// assert_eq!(config.lifetime, Lifetime::Singleton);
/// assert_eq!(config.kind, RecipeKind::Resolver);
/// assert!(config.resolved);
/// ```
#[derive(Debug, Clone)]
pub struct BindingDescriptor {
    /// Normalized identifier
    pub identifier: Identifier,
    /// Recipe discriminant
    pub kind: RecipeKind,
    /// Lifetime after factory promotion
    pub lifetime: Lifetime,
    /// Type referenced by a `Type` recipe
    pub target: Option<Identifier>,
    /// Whether a cached singleton instance exists
    pub resolved: bool,
}

impl BindingDescriptor {
    pub fn is_singleton(&self) -> bool {
        self.lifetime.is_singleton()
    }
}
