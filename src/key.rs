//! Identifier types for binding storage and lookup.

use std::fmt;

/// Case-folded key for bindings, cached instances and catalog entries.
///
/// Every store and lookup goes through an `Identifier`, so two keys that only
/// differ in letter case always denote the same binding.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::Identifier;
///
/// let a = Identifier::new("Database.Connection");
/// let b = Identifier::new("database.CONNECTION");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "database.connection");
///
/// struct Mailer;
/// assert_eq!(Identifier::of_type::<Mailer>().as_str(), "mailer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Normalizes `raw` by lower-casing it.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Identifier(raw.as_ref().to_lowercase())
    }

    /// Identifier under which a type is looked up: its short name.
    pub fn of_type<T: ?Sized + 'static>() -> Self {
        Identifier::new(short_type_name::<T>())
    }

    /// Identifier built from the fully-qualified Rust path of `T`.
    pub fn qualified<T: ?Sized + 'static>() -> Self {
        Identifier::new(std::any::type_name::<T>())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(raw: &str) -> Self {
        Identifier::new(raw)
    }
}

impl From<String> for Identifier {
    fn from(raw: String) -> Self {
        Identifier::new(raw)
    }
}

/// Short name of a type: the last path segment, without generics or `dyn`.
///
/// `alloc::vec::Vec<u8>` becomes `Vec` and `dyn app::mail::Mailer` becomes
/// `Mailer`.
pub fn short_type_name<T: ?Sized + 'static>() -> &'static str {
    strip_path(std::any::type_name::<T>())
}

pub(crate) fn strip_path(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    let base = base.trim_start_matches("dyn ");
    let base = base.split(" + ").next().unwrap_or(base);
    base.rsplit("::").next().unwrap_or(base)
}
