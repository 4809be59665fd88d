//! Positional constructor arguments handed to catalog constructors.

use std::any::{type_name, Any};
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::registration::AnyArc;

#[cfg(feature = "smallvec")]
pub(crate) type ArgList = smallvec::SmallVec<[AnyArc; 4]>;
#[cfg(not(feature = "smallvec"))]
pub(crate) type ArgList = Vec<AnyArc>;

/// Argument list assembled by the dependency builder.
///
/// Resolved dependencies come first, in parameter declaration order, followed
/// by any extra arguments the caller passed to `resolve_with`/`build`.
/// Constructors consume them front to back.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Arguments, AnyArc};
/// use std::sync::Arc;
///
/// let values: Vec<AnyArc> = vec![Arc::new(8080u16), Arc::new("localhost".to_string())];
/// let mut args = Arguments::new("Server", values);
///
/// assert_eq!(args.next_value::<u16>().unwrap(), 8080);
/// assert_eq!(*args.next::<String>().unwrap(), "localhost");
/// assert!(args.next_optional::<u8>().unwrap().is_none());
/// ```
pub struct Arguments {
    type_name: &'static str,
    values: ArgList,
    position: usize,
}

impl Arguments {
    pub fn new(type_name: &'static str, values: impl IntoIterator<Item = AnyArc>) -> Self {
        Self {
            type_name,
            values: values.into_iter().collect(),
            position: 0,
        }
    }

    pub(crate) fn from_list(type_name: &'static str, values: ArgList) -> Self {
        Self { type_name, values, position: 0 }
    }

    /// Type these arguments are being assembled for.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Number of arguments not consumed yet.
    pub fn remaining(&self) -> usize {
        self.values.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Takes the next argument without downcasting it.
    pub fn next_any(&mut self) -> DiResult<AnyArc> {
        let value = self
            .values
            .get(self.position)
            .cloned()
            .ok_or(DiError::MissingArgument {
                type_name: self.type_name,
                position: self.position,
            })?;
        self.position += 1;
        Ok(value)
    }

    /// Takes the next argument as a concrete `T`.
    pub fn next<T: Any + Send + Sync>(&mut self) -> DiResult<Arc<T>> {
        self.next_any()?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
    }

    /// Takes the next argument as a trait object stored as `Arc<Arc<dyn T>>`.
    pub fn next_trait<T: ?Sized + Send + Sync + 'static>(&mut self) -> DiResult<Arc<T>> {
        self.next_any()?
            .downcast::<Arc<T>>()
            .map(|boxed| (*boxed).clone())
            .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
    }

    /// Takes the next argument and clones the value out of its `Arc`.
    pub fn next_value<T: Any + Send + Sync + Clone>(&mut self) -> DiResult<T> {
        self.next::<T>().map(|arc| (*arc).clone())
    }

    /// Like [`next`](Self::next), but yields `None` once the list is exhausted.
    ///
    /// Used for optional parameters, which the builder never fills itself.
    pub fn next_optional<T: Any + Send + Sync>(&mut self) -> DiResult<Option<Arc<T>>> {
        if self.is_empty() {
            return Ok(None);
        }
        self.next::<T>().map(Some)
    }

    /// Drains everything that is left, e.g. for a variadic trailing parameter.
    pub fn rest(&mut self) -> Vec<AnyArc> {
        let rest = self.values[self.position..].to_vec();
        self.position = self.values.len();
        rest
    }
}
