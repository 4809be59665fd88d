//! # ferrous-ioc
//!
//! A small inversion-of-control container for Rust: case-insensitive
//! identifiers, singleton and transient bindings, factories, and automatic
//! constructor injection for registered types.
//!
//! ## Features
//!
//! - **Case-insensitive identifiers**: `Mailer`, `mailer` and `MAILER` name the same binding
//! - **Lifetimes**: Singleton bindings are materialized once; transient ones on every resolution
//! - **Factories**: Resolvers re-tagged as factories always produce fresh values
//! - **Constructor injection**: Unbound type names are built from the type catalog,
//!   resolving constructor parameters recursively
//! - **Self-injection**: Constructors can ask for the container itself
//! - **Circular dependency detection**: Cycles fail with the full path instead of overflowing the stack
//! - **Thread-safe**: `Container` is a cheap `Clone` handle that can be shared across threads
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_ioc::{Arguments, Container, DiResult, Injectable, Parameter, Recipe, Resolver};
//! use std::sync::Arc;
//!
//! struct Database {
//!     url: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! impl Injectable for UserService {
//!     fn constructor() -> Option<Vec<Parameter>> {
//!         Some(vec![Parameter::typed::<Database>("db")])
//!     }
//!
//!     fn construct(mut args: Arguments) -> DiResult<Self> {
//!         Ok(UserService { db: args.next()? })
//!     }
//! }
//!
//! let container = Container::new();
//! container.singleton("Database", Recipe::resolver(|_| {
//!     Ok(Database { url: "postgres://localhost".to_string() })
//! }));
//! container.register::<UserService>();
//!
//! let users = container.make_required::<UserService>();
//! assert_eq!(users.db.url, "postgres://localhost");
//! ```
//!
//! ## Lifetimes
//!
//! - **Singleton**: Created on first resolution and shared afterwards
//! - **Transient**: Created fresh on every resolution (the default)
//!
//! Literal values are returned as-is and never cached.
//!
//! ## Trait Objects
//!
//! ```rust
//! use ferrous_ioc::{Container, Recipe, Resolver};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!     fn log(&self, message: &str) -> String;
//! }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!     fn log(&self, message: &str) -> String {
//!         format!("[LOG] {}", message)
//!     }
//! }
//!
//! let container = Container::new();
//! container.singleton("logger", Recipe::resolver_trait(|_| {
//!     Ok(Arc::new(ConsoleLogger) as Arc<dyn Logger>)
//! }));
//!
//! let logger = container.get_required_trait::<dyn Logger>("Logger");
//! assert_eq!(logger.log("Hello, World!"), "[LOG] Hello, World!");
//! ```
//!
//! ## Map-Style Access
//!
//! ```rust
//! use ferrous_ioc::{Container, KeyedAccess, Recipe};
//!
//! let container = Container::new();
//! let mut entries = container.entries();
//! entries.extend([("host", Recipe::value("localhost")), ("port", Recipe::value(5432u16))]);
//!
//! assert!(entries.contains("HOST"));
//! assert_eq!(*entries.read("port").unwrap().downcast::<u16>().unwrap(), 5432);
//! ```
//!
//! ## Cargo Features
//!
//! - `config`: JSON configuration through `serde`
//! - `graph-export`: JSON/YAML dependency graph export
//! - `diagnostics`: `Container::to_debug_string`
//! - `performance`: `ahash` hashing and inline argument lists

pub mod arguments;
pub mod config;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod graph_export;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod traits;
pub mod validation;

mod catalog;
mod internal;
mod registration;

pub use arguments::Arguments;
pub use config::ContainerConfig;
pub use container::{Container, Entries, KeyedAccess};
pub use descriptors::{BindingDescriptor, Parameter, ParameterType, TypeDescriptor, TypeKind};
pub use error::{DiError, DiResult};
pub use graph_export::{
    DependencyGraph, DependencyType, ExportFormat, GraphEdge, GraphMetadata, GraphNode, NodeKind,
};
pub use key::{short_type_name, Identifier};
pub use lifetime::Lifetime;
pub use observer::{DiObserver, LoggingObserver};
pub use registration::{AnyArc, Binding, Recipe, RecipeKind, ResolverFn};
pub use traits::{Injectable, Resolver, ResolverCore};
pub use validation::{ValidationError, ValidationResult, ValidationWarning};
