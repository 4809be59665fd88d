/// Unit tests for DiError and DiResult types

use ferrous_ioc::{DiError, DiResult};
use std::error::Error;

#[derive(Debug)]
struct Timeout;

impl std::fmt::Display for Timeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("timed out")
    }
}

impl Error for Timeout {}

#[test]
fn test_error_display_not_instantiable() {
    let error = DiError::NotInstantiable("dyn app::Transport".to_string());
    assert_eq!(error.to_string(), "Type is not instantiable: dyn app::Transport");
}

#[test]
fn test_error_display_unresolvable() {
    let error = DiError::UnresolvableDependency("mailer".to_string());
    assert_eq!(error.to_string(), "Unresolvable dependency: mailer");
}

#[test]
fn test_error_display_circular() {
    let error = DiError::CircularDependency(vec!["a".into(), "b".into(), "a".into()]);
    assert_eq!(error.to_string(), "Circular dependency: a -> b -> a");
}

#[test]
fn test_error_display_depth() {
    assert_eq!(DiError::DepthExceeded(1024).to_string(), "Max depth 1024 exceeded");
}

#[test]
fn test_error_display_type_mismatch() {
    let error = DiError::TypeMismatch("alloc::string::String");
    assert_eq!(error.to_string(), "Type mismatch for: alloc::string::String");
}

#[test]
fn test_error_display_missing_argument() {
    let error = DiError::MissingArgument { type_name: "Server", position: 2 };
    assert_eq!(error.to_string(), "Missing constructor argument 2 for: Server");
}

#[test]
fn test_error_display_config_and_export() {
    assert_eq!(
        DiError::Config("max_depth must be greater than zero".into()).to_string(),
        "Configuration error: max_depth must be greater than zero"
    );
    assert_eq!(DiError::Export("broken".into()).to_string(), "Export failed: broken");
}

#[test]
fn test_resolver_error_exposes_source() {
    let error = DiError::resolver(Timeout);
    assert_eq!(error.to_string(), "Resolver failed: timed out");

    let source = error.source().expect("resolver errors carry a source");
    assert!(source.downcast_ref::<Timeout>().is_some());
}

#[test]
fn test_other_errors_have_no_source() {
    assert!(DiError::DepthExceeded(1).source().is_none());
    assert!(DiError::UnresolvableDependency("x".into()).source().is_none());
}

#[test]
fn test_error_is_clone() {
    let error = DiError::resolver(Timeout);
    let copy = error.clone();
    assert_eq!(error.to_string(), copy.to_string());
}

#[test]
fn test_di_result_alias() {
    fn lookup(found: bool) -> DiResult<u8> {
        if found {
            Ok(1)
        } else {
            Err(DiError::UnresolvableDependency("thing".into()))
        }
    }

    assert_eq!(lookup(true).unwrap(), 1);
    assert!(matches!(lookup(false), Err(DiError::UnresolvableDependency(_))));
}
