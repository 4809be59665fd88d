//! Graph export functionality for dependency visualization.
//!
//! [`Container::dependency_graph`] snapshots bindings and catalog types as
//! nodes and constructor parameters as edges. The graph can be rendered as
//! DOT or Mermaid, and serialized to JSON or YAML with the `graph-export`
//! feature.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "graph-export")]
use serde::{Deserialize, Serialize};

use crate::descriptors::TypeKind;
use crate::error::{DiError, DiResult};
use crate::key::Identifier;
use crate::registration::RecipeKind;
use crate::validation::ValidationError;
use crate::Container;

/// Whether a node stands for a binding or a catalog type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "graph-export", derive(Serialize, Deserialize))]
pub enum NodeKind {
    Binding,
    Type,
}

/// A node in the dependency graph.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "graph-export", derive(Serialize, Deserialize))]
pub struct GraphNode {
    /// Unique identifier for this node
    pub id: String,
    /// Identifier for bindings, short type name for catalog types
    pub label: String,
    pub kind: NodeKind,
    /// Binding lifetime; `None` for catalog types
    pub lifetime: Option<String>,
    /// Recipe discriminant; `None` for catalog types
    pub recipe: Option<RecipeKind>,
    /// Abstract catalog type
    pub is_abstract: bool,
    /// Additional metadata about the node
    pub metadata: HashMap<String, String>,
}

/// An edge from a node to something it needs.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "graph-export", derive(Serialize, Deserialize))]
pub struct GraphEdge {
    /// Source node ID (the dependent)
    pub from: String,
    /// Target node ID (the dependency)
    pub to: String,
    pub dependency_type: DependencyType,
    /// Constructor parameter name, when the edge comes from one
    pub parameter: Option<String>,
}

/// Types of dependency relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "graph-export", derive(Serialize, Deserialize))]
pub enum DependencyType {
    /// Parameter the builder resolves
    Required,
    /// Typed parameter the builder leaves to the constructor
    Optional,
    /// Type binding pointing at the catalog type it builds
    Target,
}

/// Complete dependency graph export containing all nodes and relationships.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "graph-export", derive(Serialize, Deserialize))]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub metadata: GraphMetadata,
}

/// Metadata about the entire dependency graph.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "graph-export", derive(Serialize, Deserialize))]
pub struct GraphMetadata {
    pub binding_count: usize,
    pub type_count: usize,
    pub singleton_count: usize,
    pub transient_count: usize,
    /// Singletons with a cached instance
    pub resolved_count: usize,
    /// Whether constructor cycles were detected
    pub has_circular_dependencies: bool,
    /// Export timestamp
    pub exported_at: String,
    /// Crate version that produced the export
    pub version: String,
}

/// Export formats supported for dependency graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format (requires `graph-export`)
    Json,
    /// YAML format (requires `graph-export`)
    Yaml,
    /// DOT format for Graphviz visualization
    Dot,
    /// Mermaid format for documentation
    Mermaid,
}

fn binding_node_id(id: &Identifier) -> String {
    format!("binding:{}", id)
}

fn type_node_id(name: &str) -> String {
    format!("type:{}", name.to_lowercase())
}

fn mermaid_id(id: &str) -> String {
    id.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect()
}

fn timestamp() -> String {
    #[cfg(feature = "graph-export")]
    {
        chrono::Utc::now().to_rfc3339()
    }
    #[cfg(not(feature = "graph-export"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
            .to_string()
    }
}

impl Container {
    /// Snapshots bindings, catalog types and their relationships.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_ioc::{Container, DependencyType, Parameter, Recipe, TypeDescriptor};
    /// use std::sync::Arc;
    ///
    /// #[derive(Default)]
    /// struct Pool;
    /// struct Repo { pool: Arc<Pool> }
    ///
    /// let container = Container::new();
    /// container.register_type(TypeDescriptor::with_default::<Pool>());
    /// container.register_type(TypeDescriptor::concrete::<Repo, _>(
    ///     vec![Parameter::typed::<Pool>("pool")],
    ///     |mut args| Ok(Repo { pool: args.next()? }),
    /// ));
    /// container.singleton("repo", Recipe::type_ref("Repo"));
    ///
    /// let graph = container.dependency_graph();
    /// assert_eq!(graph.metadata.binding_count, 1);
    /// assert_eq!(graph.metadata.type_count, 2);
    /// assert!(graph.edges.iter().any(|e| e.from == "type:repo" && e.to == "type:pool"
    ///     && e.dependency_type == DependencyType::Required));
    /// ```
    pub fn dependency_graph(&self) -> DependencyGraph {
        let bindings = self.descriptors();
        let has_circular_dependencies = self
            .validate()
            .errors
            .iter()
            .any(|e| matches!(e, ValidationError::CircularDependency { .. }));

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let bound: HashSet<Identifier> = bindings.iter().map(|b| b.identifier.clone()).collect();

        for binding in &bindings {
            let mut metadata = HashMap::new();
            metadata.insert("resolved".to_string(), binding.resolved.to_string());
            nodes.push(GraphNode {
                id: binding_node_id(&binding.identifier),
                label: binding.identifier.to_string(),
                kind: NodeKind::Binding,
                lifetime: Some(format!("{:?}", binding.lifetime)),
                recipe: Some(binding.kind),
                is_abstract: false,
                metadata,
            });
        }

        let type_count = self.with_state(|state| {
            let catalog = state.catalog.borrow();

            for binding in &bindings {
                let Some(target) = &binding.target else { continue };
                if let Some(descriptor) = catalog.get(target) {
                    edges.push(GraphEdge {
                        from: binding_node_id(&binding.identifier),
                        to: type_node_id(descriptor.name()),
                        dependency_type: DependencyType::Target,
                        parameter: None,
                    });
                }
            }

            for descriptor in catalog.iter() {
                let from = type_node_id(descriptor.name());
                let mut metadata = HashMap::new();
                metadata.insert("qualified_name".to_string(), descriptor.qualified_name().to_string());

                for parameter in descriptor.parameters().unwrap_or(&[]) {
                    if parameter.is_container() {
                        metadata.insert("injects_container".to_string(), "true".to_string());
                        continue;
                    }
                    let Some(dependency) = parameter.identifier() else { continue };
                    let to = if bound.contains(&dependency) {
                        binding_node_id(&dependency)
                    } else if let Some(target) = catalog.get(&dependency) {
                        type_node_id(target.name())
                    } else {
                        continue;
                    };
                    edges.push(GraphEdge {
                        from: from.clone(),
                        to,
                        dependency_type: if parameter.is_injectable() {
                            DependencyType::Required
                        } else {
                            DependencyType::Optional
                        },
                        parameter: Some(parameter.name().to_string()),
                    });
                }

                nodes.push(GraphNode {
                    id: from,
                    label: descriptor.name().to_string(),
                    kind: NodeKind::Type,
                    lifetime: None,
                    recipe: None,
                    is_abstract: descriptor.kind() == TypeKind::Abstract,
                    metadata,
                });
            }

            catalog.len()
        });

        let singleton_count = bindings.iter().filter(|b| b.is_singleton()).count();
        let metadata = GraphMetadata {
            binding_count: bindings.len(),
            type_count,
            singleton_count,
            transient_count: bindings.len() - singleton_count,
            resolved_count: bindings.iter().filter(|b| b.resolved).count(),
            has_circular_dependencies,
            exported_at: timestamp(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };

        DependencyGraph { nodes, edges, metadata }
    }
}

impl DependencyGraph {
    /// Renders the graph in `format`.
    pub fn export(&self, format: ExportFormat) -> DiResult<String> {
        match format {
            #[cfg(feature = "graph-export")]
            ExportFormat::Json => self.to_json(),
            #[cfg(feature = "graph-export")]
            ExportFormat::Yaml => self.to_yaml(),
            #[cfg(not(feature = "graph-export"))]
            ExportFormat::Json | ExportFormat::Yaml => Err(DiError::Export(format!(
                "{:?} export requires the graph-export feature",
                format
            ))),
            ExportFormat::Dot => Ok(self.to_dot()),
            ExportFormat::Mermaid => Ok(self.to_mermaid()),
        }
    }

    #[cfg(feature = "graph-export")]
    pub fn to_json(&self) -> DiResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DiError::Export(e.to_string()))
    }

    #[cfg(feature = "graph-export")]
    pub fn to_yaml(&self) -> DiResult<String> {
        serde_yaml::to_string(self).map_err(|e| DiError::Export(e.to_string()))
    }

    /// Exports graph as DOT format for Graphviz.
    pub fn to_dot(&self) -> String {
        let mut output = String::new();
        output.push_str("digraph DependencyGraph {\n");
        output.push_str("  rankdir=TB;\n");
        output.push_str("  node [shape=box];\n\n");

        for node in &self.nodes {
            let shape = match (node.kind, node.is_abstract) {
                (NodeKind::Type, true) => "ellipse",
                (NodeKind::Type, false) => "box",
                (NodeKind::Binding, _) => "note",
            };
            let color = match node.lifetime.as_deref() {
                Some("Singleton") => "lightblue",
                Some("Transient") => "lightyellow",
                _ => "white",
            };
            let label = match &node.lifetime {
                Some(lifetime) => format!("{}\\n({})", node.label, lifetime),
                None => node.label.clone(),
            };

            output.push_str(&format!(
                "  \"{}\" [label=\"{}\", shape={}, fillcolor={}, style=filled];\n",
                node.id, label, shape, color
            ));
        }

        output.push('\n');

        for edge in &self.edges {
            let style = match edge.dependency_type {
                DependencyType::Required => "solid",
                DependencyType::Optional => "dashed",
                DependencyType::Target => "bold",
            };
            output.push_str(&format!("  \"{}\" -> \"{}\" [style={}];\n", edge.from, edge.to, style));
        }

        output.push_str("}\n");
        output
    }

    /// Exports graph as Mermaid format.
    pub fn to_mermaid(&self) -> String {
        let mut output = String::new();
        output.push_str("graph TD\n");

        for node in &self.nodes {
            let id = mermaid_id(&node.id);
            let shape = if node.is_abstract {
                format!("{}({})", id, node.label)
            } else {
                format!("{}[{}]", id, node.label)
            };
            output.push_str(&format!("  {}\n", shape));
        }

        for edge in &self.edges {
            let arrow = match edge.dependency_type {
                DependencyType::Optional => "-.->",
                DependencyType::Target => "==>",
                DependencyType::Required => "-->",
            };
            output.push_str(&format!("  {} {} {}\n", mermaid_id(&edge.from), arrow, mermaid_id(&edge.to)));
        }

        output.push_str("\n  classDef singleton fill:#e1f5fe\n");
        output.push_str("  classDef transient fill:#fff3e0\n");
        for node in &self.nodes {
            let class = match node.lifetime.as_deref() {
                Some("Singleton") => "singleton",
                Some("Transient") => "transient",
                _ => continue,
            };
            output.push_str(&format!("  class {} {}\n", mermaid_id(&node.id), class));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Parameter, Recipe, TypeDescriptor};
    use std::sync::Arc;

    #[derive(Default)]
    struct Engine;

    struct Car {
        _engine: Arc<Engine>,
    }

    fn container() -> Container {
        let container = Container::new();
        container.register_type(TypeDescriptor::with_default::<Engine>());
        container.register_type(TypeDescriptor::concrete::<Car, _>(
            vec![Parameter::typed::<Engine>("engine")],
            |mut args| Ok(Car { _engine: args.next()? }),
        ));
        container.singleton("engine", Recipe::type_ref("Engine"));
        container
    }

    #[test]
    fn bound_dependencies_point_at_the_binding() {
        let graph = container().dependency_graph();
        assert!(graph
            .edges
            .iter()
            .any(|e| e.from == "type:car" && e.to == "binding:engine"));
        assert!(graph
            .edges
            .iter()
            .any(|e| e.from == "binding:engine" && e.dependency_type == DependencyType::Target));
        assert!(!graph.metadata.has_circular_dependencies);
    }

    #[test]
    fn dot_and_mermaid_render_every_node() {
        let graph = container().dependency_graph();
        let dot = graph.to_dot();
        let mermaid = graph.export(ExportFormat::Mermaid).unwrap();

        assert!(dot.starts_with("digraph DependencyGraph {"));
        assert!(dot.contains("\"type:car\" -> \"binding:engine\""));
        assert!(mermaid.contains("type_car --> binding_engine"));
        assert!(mermaid.contains("class binding_engine singleton"));
    }
}
