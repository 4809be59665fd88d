//! Static validation of a container's bindings and type catalog.
//!
//! Walks the constructor parameters of every catalog type without building
//! anything, so configuration mistakes surface before the first resolution
//! instead of deep inside a request.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::catalog::TypeCatalog;
use crate::descriptors::{TypeDescriptor, TypeKind};
use crate::key::Identifier;
use crate::registration::{Binding, BindingTable, Recipe};
use crate::Container;

/// Result of [`Container::validate`].
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Problems that will make resolution fail
    pub errors: Vec<ValidationError>,
    /// Configurations that work but are probably unintended
    pub warnings: Vec<ValidationWarning>,
}

/// A configuration problem that will make resolution fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A constructor parameter or a type binding names something that is
    /// neither bound nor registered
    MissingDependency {
        service: String,
        dependency: String,
    },
    /// A constructor parameter names an abstract type that has no binding
    AbstractDependency {
        service: String,
        dependency: String,
    },
    /// Constructors that require each other
    CircularDependency {
        cycle: Vec<String>,
    },
}

/// A configuration that works but is probably unintended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// A registered concrete type is unreachable by name because a binding
    /// under the same identifier takes precedence
    ShadowedByBinding {
        type_name: String,
        binding: String,
    },
}

impl ValidationResult {
    /// Returns true if validation passed without errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if there are warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Formats errors and warnings for display.
    pub fn format_issues(&self) -> String {
        let mut output = String::new();

        if !self.errors.is_empty() {
            output.push_str("Validation Errors:\n");
            for error in &self.errors {
                output.push_str(&format!("  - {}\n", format_error(error)));
            }
        }

        if !self.warnings.is_empty() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str("Validation Warnings:\n");
            for warning in &self.warnings {
                output.push_str(&format!("  - {}\n", format_warning(warning)));
            }
        }

        output
    }
}

fn format_error(error: &ValidationError) -> String {
    match error {
        ValidationError::MissingDependency { service, dependency } => {
            format!("'{}' depends on '{}', which is neither bound nor registered", service, dependency)
        }
        ValidationError::AbstractDependency { service, dependency } => {
            format!("'{}' depends on abstract type '{}', which has no binding", service, dependency)
        }
        ValidationError::CircularDependency { cycle } => {
            format!("Circular dependency detected: {}", cycle.join(" -> "))
        }
    }
}

fn format_warning(warning: &ValidationWarning) -> String {
    match warning {
        ValidationWarning::ShadowedByBinding { type_name, binding } => {
            format!("Type '{}' is shadowed by binding '{}'", type_name, binding)
        }
    }
}

struct Validator<'a> {
    table: &'a BindingTable,
    catalog: &'a TypeCatalog,
}

impl Validator<'_> {
    fn run(&self) -> ValidationResult {
        let mut result = ValidationResult::default();
        let mut edges: HashMap<TypeId, Vec<TypeId>> = HashMap::new();

        for descriptor in self.catalog.iter() {
            let service = descriptor.name();
            let id = Identifier::new(service);

            if descriptor.kind() == TypeKind::Concrete {
                if let Some(binding) = self.table.get(&id) {
                    if !self.builds(binding, descriptor) {
                        result.warnings.push(ValidationWarning::ShadowedByBinding {
                            type_name: service.to_string(),
                            binding: id.to_string(),
                        });
                    }
                }
            }

            for parameter in descriptor.parameters().unwrap_or(&[]) {
                if parameter.is_container() {
                    continue;
                }
                let Some(dependency) = parameter.identifier().filter(|_| parameter.is_injectable()) else {
                    continue;
                };
                // a binding may resolve anything; trust it
                if self.table.contains(&dependency) {
                    continue;
                }

                match self.catalog.get(&dependency) {
                    None => result.errors.push(ValidationError::MissingDependency {
                        service: service.to_string(),
                        dependency: dependency.to_string(),
                    }),
                    Some(target) if target.kind() == TypeKind::Abstract => {
                        result.errors.push(ValidationError::AbstractDependency {
                            service: service.to_string(),
                            dependency: target.name().to_string(),
                        })
                    }
                    Some(target) => edges.entry(descriptor.type_id()).or_default().push(target.type_id()),
                }
            }
        }

        let mut bindings: Vec<_> = self.table.iter().collect();
        bindings.sort_by(|a, b| a.0.cmp(b.0));
        for (id, binding) in bindings {
            if let Recipe::Type(target) = binding.recipe() {
                if !self.catalog.contains(target) {
                    result.errors.push(ValidationError::MissingDependency {
                        service: id.to_string(),
                        dependency: target.to_string(),
                    });
                }
            }
        }

        for cycle in self.detect_cycles(&edges) {
            result.errors.push(ValidationError::CircularDependency { cycle });
        }

        debug!(
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validation finished"
        );
        result
    }

    /// True when `binding` is a type binding that builds `descriptor` itself.
    fn builds(&self, binding: &Binding, descriptor: &TypeDescriptor) -> bool {
        match binding.recipe() {
            Recipe::Type(target) => self
                .catalog
                .get(target)
                .map_or(false, |t| t.type_id() == descriptor.type_id()),
            _ => false,
        }
    }

    /// Detects circular dependencies using DFS.
    fn detect_cycles(&self, edges: &HashMap<TypeId, Vec<TypeId>>) -> Vec<Vec<String>> {
        let names: HashMap<TypeId, &'static str> = self.catalog.iter().map(|d| (d.type_id(), d.name())).collect();
        let mut visited = HashSet::new();
        let mut path = Vec::new();
        let mut cycles = Vec::new();

        for descriptor in self.catalog.iter() {
            if !visited.contains(&descriptor.type_id()) {
                dfs_cycles(descriptor.type_id(), edges, &mut visited, &mut path, &mut cycles);
            }
        }

        cycles
            .into_iter()
            .map(|cycle| {
                cycle
                    .iter()
                    .map(|id| names.get(id).copied().unwrap_or("?").to_string())
                    .collect()
            })
            .collect()
    }
}

fn dfs_cycles(
    current: TypeId,
    edges: &HashMap<TypeId, Vec<TypeId>>,
    visited: &mut HashSet<TypeId>,
    path: &mut Vec<TypeId>,
    cycles: &mut Vec<Vec<TypeId>>,
) {
    if let Some(start) = path.iter().position(|&id| id == current) {
        let mut cycle = path[start..].to_vec();
        cycle.push(current);
        cycles.push(cycle);
        return;
    }

    if visited.contains(&current) {
        return;
    }

    visited.insert(current);
    path.push(current);

    if let Some(dependencies) = edges.get(&current) {
        for &dependency in dependencies {
            dfs_cycles(dependency, edges, visited, path, cycles);
        }
    }

    path.pop();
}

impl Container {
    /// Checks the catalog and bindings for problems without building anything.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_ioc::{Container, Parameter, TypeDescriptor, ValidationError};
    /// use std::sync::Arc;
    ///
    /// struct Mailer;
    /// struct Signup { mailer: Arc<Mailer> }
    ///
    /// let container = Container::new();
    /// container.register_type(TypeDescriptor::concrete::<Signup, _>(
    ///     vec![Parameter::typed::<Mailer>("mailer")],
    ///     |mut args| Ok(Signup { mailer: args.next()? }),
    /// ));
    ///
    /// let result = container.validate();
    /// assert!(!result.is_valid());
    /// assert_eq!(
    ///     result.errors[0],
    ///     ValidationError::MissingDependency { service: "Signup".into(), dependency: "mailer".into() }
    /// );
    /// ```
    pub fn validate(&self) -> ValidationResult {
        self.with_state(|state| {
            let table = state.table.borrow();
            let catalog = state.catalog.borrow();
            Validator { table: &table, catalog: &catalog }.run()
        })
    }
}
