//! Binding table types: recipes, bindings and the instance cache.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::container::Container;
use crate::error::DiResult;
use crate::key::Identifier;
use crate::lifetime::Lifetime;

/// Type-erased `Arc` stored in the binding table and handed to callers.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// Callable stored by resolver and factory recipes.
pub type ResolverFn = Arc<dyn Fn(&Container) -> DiResult<AnyArc> + Send + Sync>;

#[cfg(feature = "ahash")]
pub(crate) type Map<K, V> = ahash::AHashMap<K, V>;
#[cfg(not(feature = "ahash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

/// How a binding produces its value.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, Recipe, Resolver};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> String { "hello".to_string() }
/// }
///
/// let container = Container::new();
/// container.bind("app.name", Recipe::value("ferrous".to_string()), false);
/// container.bind("greeter", Recipe::resolver_trait(|_| {
///     Ok(Arc::new(English) as Arc<dyn Greeter>)
/// }), true);
///
/// assert_eq!(*container.get::<String>("APP.NAME").unwrap(), "ferrous");
/// assert_eq!(container.get_trait::<dyn Greeter>("greeter").unwrap().greet(), "hello");
/// ```
#[derive(Clone)]
pub enum Recipe {
    /// Literal value or already-built instance, returned as-is
    Value(AnyArc),
    /// Callable invoked on resolution, cached when the binding is a singleton
    Resolver(ResolverFn),
    /// Callable that always produces a fresh value, whatever the bind flag says
    Factory(ResolverFn),
    /// Type name handed to the dependency builder
    Type(Identifier),
}

/// Discriminant of a [`Recipe`], used for introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "graph-export", derive(serde::Serialize, serde::Deserialize))]
pub enum RecipeKind {
    Value,
    Resolver,
    Factory,
    Type,
}

impl Recipe {
    /// Wraps a concrete value.
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Recipe::Value(Arc::new(value))
    }

    /// Uses an existing shared value without re-wrapping it, preserving its identity.
    pub fn shared(value: AnyArc) -> Self {
        Recipe::Value(value)
    }

    /// Resolver producing a concrete `T`.
    pub fn resolver<T, F>(resolver: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Container) -> DiResult<T> + Send + Sync + 'static,
    {
        Recipe::Resolver(Arc::new(move |c: &Container| -> DiResult<AnyArc> {
            let value: AnyArc = Arc::new(resolver(c)?);
            Ok(value)
        }))
    }

    /// Resolver producing a trait object, stored as `Arc<Arc<dyn T>>`.
    pub fn resolver_trait<T, F>(resolver: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Container) -> DiResult<Arc<T>> + Send + Sync + 'static,
    {
        Recipe::Resolver(Arc::new(move |c: &Container| -> DiResult<AnyArc> {
            let value: AnyArc = Arc::new(resolver(c)?);
            Ok(value)
        }))
    }

    /// Resolver returning an already type-erased value.
    pub fn resolver_any<F>(resolver: F) -> Self
    where
        F: Fn(&Container) -> DiResult<AnyArc> + Send + Sync + 'static,
    {
        Recipe::Resolver(Arc::new(resolver))
    }

    /// Reference to a type registered in the catalog.
    pub fn type_ref(type_name: impl AsRef<str>) -> Self {
        Recipe::Type(Identifier::new(type_name))
    }

    /// Reference to `T` by its short type name.
    pub fn of_type<T: ?Sized + 'static>() -> Self {
        Recipe::Type(Identifier::of_type::<T>())
    }

    /// Re-tags a resolver as a factory. Other recipes are returned unchanged.
    pub fn into_factory(self) -> Self {
        match self {
            Recipe::Resolver(f) => Recipe::Factory(f),
            other => other,
        }
    }

    pub fn kind(&self) -> RecipeKind {
        match self {
            Recipe::Value(_) => RecipeKind::Value,
            Recipe::Resolver(_) => RecipeKind::Resolver,
            Recipe::Factory(_) => RecipeKind::Factory,
            Recipe::Type(_) => RecipeKind::Type,
        }
    }
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipe::Type(target) => f.debug_tuple("Type").field(target).finish(),
            other => write!(f, "{:?}", other.kind()),
        }
    }
}

/// Stored recipe plus lifetime for one identifier.
#[derive(Clone, Debug)]
pub struct Binding {
    pub(crate) recipe: Recipe,
    pub(crate) lifetime: Lifetime,
}

impl Binding {
    /// Factory recipes are transient regardless of the requested lifetime.
    pub(crate) fn new(recipe: Recipe, requested: Lifetime) -> Self {
        let lifetime = match recipe {
            Recipe::Factory(_) => Lifetime::Transient,
            _ => requested,
        };
        Self { recipe, lifetime }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    pub fn is_singleton(&self) -> bool {
        self.lifetime.is_singleton()
    }
}

/// Binding table together with the singleton instance cache
#[derive(Default)]
pub(crate) struct BindingTable {
    bindings: Map<Identifier, Binding>,
    instances: Map<Identifier, AnyArc>,
}

impl BindingTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stores a binding and returns the one it replaced.
    pub(crate) fn insert(&mut self, id: Identifier, binding: Binding) -> Option<Binding> {
        self.bindings.insert(id, binding)
    }

    #[inline]
    pub(crate) fn get(&self, id: &Identifier) -> Option<&Binding> {
        self.bindings.get(id)
    }

    #[inline]
    pub(crate) fn contains(&self, id: &Identifier) -> bool {
        self.bindings.contains_key(id)
    }

    /// Deletes a binding together with any cached instance under its identifier.
    pub(crate) fn remove(&mut self, id: &Identifier) -> Option<Binding> {
        let removed = self.bindings.remove(id);
        if removed.is_some() {
            // a transient rebind may have kept an earlier singleton's instance
            self.instances.remove(id);
        }
        removed
    }

    #[inline]
    pub(crate) fn cached(&self, id: &Identifier) -> Option<AnyArc> {
        self.instances.get(id).cloned()
    }

    pub(crate) fn store_instance(&mut self, id: Identifier, value: AnyArc) {
        self.instances.insert(id, value);
    }

    pub(crate) fn evict(&mut self, id: &Identifier) -> bool {
        self.instances.remove(id).is_some()
    }

    pub(crate) fn is_resolved(&self, id: &Identifier) -> bool {
        self.instances.contains_key(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Identifier, &Binding)> {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_recipe_forces_transient() {
        let recipe = Recipe::resolver(|_| Ok(1u8)).into_factory();
        let binding = Binding::new(recipe, Lifetime::Singleton);
        assert_eq!(binding.lifetime(), Lifetime::Transient);
        assert_eq!(binding.recipe().kind(), RecipeKind::Factory);
    }

    #[test]
    fn into_factory_leaves_values_alone() {
        let recipe = Recipe::value(5u32).into_factory();
        assert_eq!(recipe.kind(), RecipeKind::Value);
    }

    #[test]
    fn remove_evicts_singleton_instance() {
        let mut table = BindingTable::new();
        let id = Identifier::new("cache");
        table.insert(id.clone(), Binding::new(Recipe::value(1u8), Lifetime::Singleton));
        table.store_instance(id.clone(), Arc::new(1u8));
        assert!(table.is_resolved(&id));

        assert!(table.remove(&id).is_some());
        assert!(!table.contains(&id));
        assert!(table.cached(&id).is_none());
    }
}
