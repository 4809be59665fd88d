//! The container: binding table, instance cache and resolution engine.
//!
//! This module contains the [`Container`] type, which owns the bindings and
//! the type catalog and resolves identifiers into values.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::ReentrantMutex;
use tracing::{debug, trace};

use crate::catalog::TypeCatalog;
use crate::config::ContainerConfig;
use crate::descriptors::{BindingDescriptor, TypeDescriptor};
use crate::error::DiResult;
use crate::internal::{with_frame, ResolutionStack};
use crate::key::{short_type_name, Identifier};
use crate::lifetime::Lifetime;
use crate::observer::{DiObserver, Observers};
use crate::registration::{AnyArc, Binding, BindingTable, Recipe};
use crate::traits::{Injectable, ResolverCore};

mod builder;
mod entries;

pub use entries::{Entries, KeyedAccess};

/// Inversion-of-control container.
///
/// Values are bound under case-insensitive identifiers and resolved on
/// demand. Identifiers that have no binding but name a type known to the
/// container's type catalog are built by the dependency builder, which
/// resolves the type's constructor parameters recursively.
///
/// # Thread Safety
///
/// `Container` is a cheap handle around shared state and can be cloned and
/// sent across threads. Every operation runs under one reentrant lock, so a
/// singleton is materialized at most once, and resolvers may call back into
/// the container from the same thread.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, Recipe, Resolver};
/// use std::sync::Arc;
///
/// struct Database { url: String }
/// struct UserService { db: Arc<Database> }
///
/// let container = Container::new();
/// container.singleton("Database", Recipe::resolver(|_| {
///     Ok(Database { url: "postgres://localhost".to_string() })
/// }));
/// container.bind("users", Recipe::resolver(|c| {
///     Ok(UserService { db: c.get::<Database>("database")? })
/// }), false);
///
/// let users = container.get_required::<UserService>("USERS");
/// assert_eq!(users.db.url, "postgres://localhost");
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    state: ReentrantMutex<State>,
    observers: Observers,
    config: ContainerConfig,
}

/// Everything guarded by the container lock.
pub(crate) struct State {
    pub(crate) table: RefCell<BindingTable>,
    pub(crate) catalog: RefCell<TypeCatalog>,
    pub(crate) stack: RefCell<ResolutionStack>,
}

impl Container {
    /// Creates an empty container with the default configuration.
    pub fn new() -> Self {
        Self::from_config(ContainerConfig::default())
    }

    /// Creates an empty container after validating `config`.
    pub fn with_config(config: ContainerConfig) -> DiResult<Self> {
        Ok(Self::from_config(config.validate()?))
    }

    fn from_config(config: ContainerConfig) -> Self {
        let state = State {
            table: RefCell::new(BindingTable::new()),
            catalog: RefCell::new(TypeCatalog::new()),
            stack: RefCell::new(ResolutionStack::new(config.max_depth)),
        };
        Self {
            inner: Arc::new(ContainerInner {
                state: ReentrantMutex::new(state),
                observers: Observers::new(),
                config,
            }),
        }
    }

    /// Returns the configuration this container was created with.
    pub fn config(&self) -> &ContainerConfig {
        &self.inner.config
    }

    /// Runs `f` with the locked container state.
    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&State) -> R) -> R {
        let guard = self.inner.state.lock();
        f(&guard)
    }

    /// Binds `recipe` under `id`, replacing any previous binding.
    ///
    /// The recipe is not checked here; a bad recipe fails when resolved.
    /// Rebinding drops the previous singleton instance unless
    /// [`ContainerConfig::evict_on_rebind`] is off.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_ioc::{Container, Recipe, Resolver};
    ///
    /// let container = Container::new();
    /// container.bind("greeting", Recipe::value("hello"), false);
    /// container.bind("Greeting", Recipe::value("bonjour"), false);
    ///
    /// assert_eq!(*container.get::<&str>("GREETING").unwrap(), "bonjour");
    /// ```
    pub fn bind(&self, id: impl AsRef<str>, recipe: Recipe, singleton: bool) {
        let id = Identifier::new(id);
        let binding = Binding::new(recipe, Lifetime::from_flag(singleton));

        self.with_state(|state| {
            let mut table = state.table.borrow_mut();
            trace!(identifier = %id, kind = ?binding.recipe().kind(), lifetime = ?binding.lifetime(), "bind");
            let replaced = table.insert(id.clone(), binding);
            if replaced.is_some() && self.inner.config.evict_on_rebind && table.evict(&id) {
                debug!(identifier = %id, "evicted cached instance on rebind");
            }
        });
    }

    /// Binds `recipe` under `id` as a singleton.
    pub fn singleton(&self, id: impl AsRef<str>, recipe: Recipe) {
        self.bind(id, recipe, true);
    }

    /// Registers an already-built value under its type's short name.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_ioc::{Container, Resolver};
    ///
    /// struct Settings { verbose: bool }
    ///
    /// let container = Container::new();
    /// container.instance(Settings { verbose: true });
    ///
    /// assert!(container.get::<Settings>("settings").unwrap().verbose);
    /// assert!(container.make::<Settings>().unwrap().verbose);
    /// ```
    pub fn instance<T: Any + Send + Sync>(&self, value: T) {
        self.bind(short_type_name::<T>(), Recipe::value(value), false);
    }

    /// Re-tags a resolver recipe so every resolution produces a fresh value.
    ///
    /// The binding made from the returned recipe is transient even when bound
    /// with `singleton = true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_ioc::{Container, Recipe};
    /// use std::sync::Arc;
    ///
    /// let container = Container::new();
    /// let recipe = container.factory(Recipe::resolver(|_| Ok(Vec::<u8>::new())));
    /// container.singleton("buffer", recipe);
    ///
    /// assert!(!container.is_singleton("buffer"));
    /// let a = container.resolve("buffer").unwrap();
    /// let b = container.resolve("buffer").unwrap();
    /// assert!(!Arc::ptr_eq(&a, &b));
    /// ```
    pub fn factory(&self, recipe: Recipe) -> Recipe {
        recipe.into_factory()
    }

    /// Returns a copy of the binding stored under `id`.
    pub fn get_binding(&self, id: impl AsRef<str>) -> Option<Binding> {
        let id = Identifier::new(id);
        self.with_state(|state| state.table.borrow().get(&id).cloned())
    }

    /// True when a binding exists under `id`, resolved or not.
    pub fn has(&self, id: impl AsRef<str>) -> bool {
        let id = Identifier::new(id);
        self.with_state(|state| state.table.borrow().contains(&id))
    }

    /// Deletes the binding under `id` and any cached instance.
    ///
    /// Returns whether a binding was removed.
    pub fn remove(&self, id: impl AsRef<str>) -> bool {
        let id = Identifier::new(id);
        self.with_state(|state| {
            let removed = state.table.borrow_mut().remove(&id).is_some();
            if removed {
                debug!(identifier = %id, "binding removed");
            }
            removed
        })
    }

    /// False for unbound identifiers and for factory bindings.
    pub fn is_singleton(&self, id: impl AsRef<str>) -> bool {
        self.get_binding(id).map_or(false, |b| b.is_singleton())
    }

    /// True when a singleton instance has been cached under `id`.
    pub fn is_resolved(&self, id: impl AsRef<str>) -> bool {
        let id = Identifier::new(id);
        self.with_state(|state| state.table.borrow().is_resolved(&id))
    }

    /// Adds a type to the catalog used for building unbound types.
    pub fn register_type(&self, descriptor: TypeDescriptor) {
        self.with_state(|state| {
            trace!(type_name = descriptor.qualified_name(), "register type");
            state.catalog.borrow_mut().insert(descriptor);
        });
    }

    /// Adds an [`Injectable`] type to the catalog.
    pub fn register<T: Injectable>(&self) {
        self.register_type(TypeDescriptor::of::<T>());
    }

    /// Adds a type that only an explicit binding can produce, such as a trait object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_ioc::{Container, DiError};
    ///
    /// trait Transport: Send + Sync {}
    ///
    /// let container = Container::new();
    /// container.register_abstract::<dyn Transport>();
    ///
    /// assert!(matches!(container.resolve("Transport"), Err(DiError::NotInstantiable(_))));
    /// ```
    pub fn register_abstract<T: ?Sized + 'static>(&self) {
        self.register_type(TypeDescriptor::abstract_type::<T>());
    }

    /// Resolves `id` into a value.
    ///
    /// Bound identifiers follow their recipe; anything else is treated as a
    /// type name and built from the catalog without being cached.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_ioc::{Container, Recipe};
    /// use std::sync::Arc;
    ///
    /// let container = Container::new();
    /// container.singleton("clock", Recipe::resolver(|_| Ok(std::time::Instant::now())));
    ///
    /// let a = container.resolve("clock").unwrap();
    /// let b = container.resolve("CLOCK").unwrap();
    /// assert!(Arc::ptr_eq(&a, &b));
    /// ```
    pub fn resolve(&self, id: impl AsRef<str>) -> DiResult<AnyArc> {
        self.resolve_with(id, Vec::new())
    }

    /// Resolves `id`, appending `args` after the injected constructor arguments
    /// when a type ends up being built.
    pub fn resolve_with(&self, id: impl AsRef<str>, args: Vec<AnyArc>) -> DiResult<AnyArc> {
        self.resolve_identifier(&Identifier::new(id), args)
    }

    pub(crate) fn resolve_identifier(&self, id: &Identifier, args: Vec<AnyArc>) -> DiResult<AnyArc> {
        if !self.inner.observers.has_observers() {
            return self.resolve_framed(id, args);
        }

        let start = Instant::now();
        self.inner.observers.resolving(id);
        let result = self.resolve_framed(id, args);
        match &result {
            Ok(_) => self.inner.observers.resolved(id, start.elapsed()),
            Err(e) => self.inner.observers.failed(id, e),
        }
        result
    }

    fn resolve_framed(&self, id: &Identifier, args: Vec<AnyArc>) -> DiResult<AnyArc> {
        let state = self.inner.state.lock();
        with_frame(&state.stack, id, || self.resolve_locked(&state, id, args))
    }

    fn resolve_locked(&self, state: &State, id: &Identifier, args: Vec<AnyArc>) -> DiResult<AnyArc> {
        let binding = state.table.borrow().get(id).cloned();
        let Some(binding) = binding else {
            trace!(identifier = %id, "unbound, building from catalog");
            return builder::build_locked(self, state, id, args);
        };

        if binding.is_singleton() {
            if let Some(cached) = state.table.borrow().cached(id) {
                trace!(identifier = %id, "cached instance");
                return Ok(cached);
            }
        }

        let value = match binding.recipe {
            Recipe::Value(value) => return Ok(value),
            Recipe::Resolver(resolver) | Recipe::Factory(resolver) => {
                trace!(identifier = %id, "invoking resolver");
                resolver(self)?
            }
            Recipe::Type(target) => builder::build_locked(self, state, &target, args)?,
        };

        if binding.lifetime.is_singleton() {
            debug!(identifier = %id, "singleton materialized");
            state.table.borrow_mut().store_instance(id.clone(), value.clone());
        }
        Ok(value)
    }

    /// Builds a catalog type directly, ignoring any binding under its name.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_ioc::{Container, Recipe, TypeDescriptor};
    ///
    /// #[derive(Default)]
    /// struct Cache;
    ///
    /// let container = Container::new();
    /// container.register_type(TypeDescriptor::with_default::<Cache>());
    /// container.bind("Cache", Recipe::value(0u8), false);
    ///
    /// assert!(container.build("cache", Vec::new()).unwrap().is::<Cache>());
    /// ```
    pub fn build(&self, type_name: impl AsRef<str>, args: Vec<AnyArc>) -> DiResult<AnyArc> {
        let id = Identifier::new(type_name);
        self.with_state(|state| builder::build_locked(self, state, &id, args))
    }

    /// Installs an observer notified about every resolution.
    pub fn add_observer(&self, observer: Arc<dyn DiObserver>) {
        self.inner.observers.add(observer);
    }

    /// Snapshot of every binding, sorted by identifier.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        let mut descriptors: Vec<BindingDescriptor> = self.with_state(|state| {
            let table = state.table.borrow();
            table
                .iter()
                .map(|(id, binding)| BindingDescriptor {
                    identifier: id.clone(),
                    kind: binding.recipe().kind(),
                    lifetime: binding.lifetime(),
                    target: match binding.recipe() {
                        Recipe::Type(target) => Some(target.clone()),
                        _ => None,
                    },
                    resolved: table.is_resolved(id),
                })
                .collect()
        });
        descriptors.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        descriptors
    }

    /// True when both handles refer to the same container.
    pub fn ptr_eq(a: &Container, b: &Container) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Renders every binding with its lifetime and cache state, one per line.
    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Container Debug ===\n");
        s.push_str("Bindings:\n");
        for d in self.descriptors() {
            let resolved = if d.resolved { " (resolved)" } else { "" };
            match &d.target {
                Some(target) => s.push_str(&format!("  {}: {:?} -> {} {:?}{}\n", d.identifier, d.kind, target, d.lifetime, resolved)),
                None => s.push_str(&format!("  {}: {:?} {:?}{}\n", d.identifier, d.kind, d.lifetime, resolved)),
            }
        }
        s.push_str("Types:\n");
        self.with_state(|state| {
            for descriptor in state.catalog.borrow().iter() {
                s.push_str(&format!("  {} ({:?})\n", descriptor.qualified_name(), descriptor.kind()));
            }
        });
        s
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // another thread may be mid-resolution
        match self.inner.state.try_lock() {
            Some(state) => f
                .debug_struct("Container")
                .field("bindings", &state.table.borrow().len())
                .field("types", &state.catalog.borrow().len())
                .finish(),
            None => f.debug_struct("Container").finish_non_exhaustive(),
        }
    }
}

impl ResolverCore for Container {
    fn resolve_any(&self, id: &Identifier, args: Vec<AnyArc>) -> DiResult<AnyArc> {
        self.resolve_identifier(id, args)
    }
}
