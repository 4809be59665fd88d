//! Dependency builder: instantiates catalog types, resolving constructor
//! parameters through the container.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::arguments::{ArgList, Arguments};
use crate::descriptors::TypeKind;
use crate::error::{DiError, DiResult};
use crate::key::Identifier;
use crate::registration::AnyArc;

use super::{Container, State};

/// Builds the catalog type named `id`. The caller holds the container lock.
///
/// Injected dependencies are collected walking the parameter list from the
/// last parameter to the first, each one prepended, so the constructor sees
/// them in declaration order followed by `extra`.
pub(super) fn build_locked(container: &Container, state: &State, id: &Identifier, extra: Vec<AnyArc>) -> DiResult<AnyArc> {
    let descriptor = state
        .catalog
        .borrow()
        .get(id)
        .ok_or_else(|| DiError::UnresolvableDependency(id.to_string()))?;

    let construct = match descriptor.construct() {
        Some(construct) if descriptor.kind() == TypeKind::Concrete => construct,
        _ => return Err(DiError::NotInstantiable(descriptor.qualified_name().to_string())),
    };

    let mut values = ArgList::new();
    match descriptor.parameters() {
        None => {
            if !extra.is_empty() {
                warn!(
                    type_name = descriptor.name(),
                    dropped = extra.len(),
                    "type has no constructor, extra arguments ignored"
                );
            }
        }
        Some(parameters) => {
            for parameter in parameters.iter().rev() {
                // optional, variadic and untyped parameters are left to the constructor
                let Some(dependency) = parameter.identifier().filter(|_| parameter.is_injectable()) else {
                    continue;
                };

                let value: AnyArc = if parameter.is_container() {
                    Arc::new(container.clone())
                } else {
                    container.resolve_identifier(&dependency, Vec::new())?
                };
                values.insert(0, value);
            }
            values.extend(extra);
        }
    }

    debug!(type_name = descriptor.name(), arguments = values.len(), "building");
    construct(Arguments::from_list(descriptor.name(), values))
}
