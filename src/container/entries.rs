//! Map-style access to a container.

use crate::error::DiResult;
use crate::registration::{AnyArc, Recipe};

use super::Container;

/// Keyed read/write/contains/delete access.
///
/// Implemented by [`Entries`]; every operation forwards to the container.
pub trait KeyedAccess {
    /// Resolves `id`.
    fn read(&self, id: &str) -> DiResult<AnyArc>;

    /// Binds `recipe` under `id` as a transient binding.
    fn write(&mut self, id: &str, recipe: Recipe);

    /// True when a binding exists under `id`.
    fn contains(&self, id: &str) -> bool;

    /// Removes the binding under `id`.
    fn delete(&mut self, id: &str);
}

/// Map-style view over a [`Container`].
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, KeyedAccess, Recipe};
///
/// let container = Container::new();
/// let mut entries = container.entries();
///
/// entries.write("Mode", Recipe::value("debug"));
/// assert!(entries.contains("mode"));
/// assert_eq!(*entries.read("MODE").unwrap().downcast::<&str>().unwrap(), "debug");
///
/// entries.delete("mode");
/// assert!(!container.has("mode"));
/// ```
pub struct Entries<'a> {
    container: &'a Container,
}

impl Container {
    /// Returns a map-style view over this container's bindings.
    pub fn entries(&self) -> Entries<'_> {
        Entries { container: self }
    }
}

impl KeyedAccess for Entries<'_> {
    fn read(&self, id: &str) -> DiResult<AnyArc> {
        self.container.resolve(id)
    }

    fn write(&mut self, id: &str, recipe: Recipe) {
        self.container.bind(id, recipe, false);
    }

    fn contains(&self, id: &str) -> bool {
        self.container.has(id)
    }

    fn delete(&mut self, id: &str) {
        self.container.remove(id);
    }
}

impl<K: AsRef<str>> Extend<(K, Recipe)> for Entries<'_> {
    fn extend<I: IntoIterator<Item = (K, Recipe)>>(&mut self, iter: I) {
        for (id, recipe) in iter {
            self.container.bind(id, recipe, false);
        }
    }
}
