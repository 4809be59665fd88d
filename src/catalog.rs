//! Registration-based type catalog used by the dependency builder.

use std::any::TypeId;
use std::sync::Arc;

use crate::descriptors::TypeDescriptor;
use crate::key::Identifier;
use crate::registration::Map;

/// Known types, addressable by short name and by fully-qualified path.
#[derive(Default)]
pub(crate) struct TypeCatalog {
    types: Vec<Arc<TypeDescriptor>>,
    names: Map<Identifier, usize>,
}

impl TypeCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor; registering the same `TypeId` again replaces it.
    pub(crate) fn insert(&mut self, descriptor: TypeDescriptor) {
        let short = Identifier::new(descriptor.name());
        let qualified = Identifier::new(descriptor.qualified_name());
        let descriptor = Arc::new(descriptor);

        let index = match self.position_of(descriptor.type_id()) {
            Some(index) => {
                let previous = Identifier::new(self.types[index].name());
                if previous != short {
                    self.names.remove(&previous);
                }
                self.types[index] = descriptor;
                index
            }
            None => {
                self.types.push(descriptor);
                self.types.len() - 1
            }
        };

        self.names.insert(short, index);
        self.names.insert(qualified, index);
    }

    pub(crate) fn get(&self, id: &Identifier) -> Option<Arc<TypeDescriptor>> {
        self.names.get(id).map(|&index| self.types[index].clone())
    }

    pub(crate) fn contains(&self, id: &Identifier) -> bool {
        self.names.contains_key(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.types.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Arc<TypeDescriptor>> {
        self.types.iter()
    }

    fn position_of(&self, type_id: TypeId) -> Option<usize> {
        self.types.iter().position(|d| d.type_id() == type_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Mailer;

    #[test]
    fn lookup_by_short_and_qualified_name() {
        let mut catalog = TypeCatalog::new();
        catalog.insert(TypeDescriptor::with_default::<Mailer>());

        assert!(catalog.contains(&Identifier::new("Mailer")));
        assert!(catalog.contains(&Identifier::qualified::<Mailer>()));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn renaming_replaces_the_old_alias() {
        let mut catalog = TypeCatalog::new();
        catalog.insert(TypeDescriptor::with_default::<Mailer>());
        catalog.insert(TypeDescriptor::with_default::<Mailer>().named("Postman"));

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains(&Identifier::new("postman")));
        assert!(!catalog.contains(&Identifier::new("mailer")));
    }
}
