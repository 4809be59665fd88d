use ferrous_ioc::{
    Container, Parameter, Recipe, TypeDescriptor, ValidationError, ValidationWarning,
};
use std::sync::Arc;

trait Queue: Send + Sync {}

#[derive(Default)]
struct Clock;

struct Worker {
    _clock: Arc<Clock>,
}

struct Producer {
    _queue: Arc<dyn Queue>,
}

fn worker() -> TypeDescriptor {
    TypeDescriptor::concrete::<Worker, _>(vec![Parameter::typed::<Clock>("clock")], |mut args| {
        Ok(Worker { _clock: args.next()? })
    })
}

fn producer() -> TypeDescriptor {
    TypeDescriptor::concrete::<Producer, _>(vec![Parameter::typed::<dyn Queue>("queue")], |mut args| {
        Ok(Producer { _queue: args.next_trait()? })
    })
}

#[test]
fn test_complete_configuration_is_valid() {
    let container = Container::new();
    container.register_type(TypeDescriptor::with_default::<Clock>());
    container.register_type(worker());

    let result = container.validate();
    assert!(result.is_valid());
    assert!(!result.has_warnings());
    assert!(result.format_issues().is_empty());
}

#[test]
fn test_missing_dependency() {
    let container = Container::new();
    container.register_type(worker());

    let result = container.validate();
    assert_eq!(
        result.errors,
        vec![ValidationError::MissingDependency {
            service: "Worker".to_string(),
            dependency: "clock".to_string(),
        }]
    );
    assert!(result.format_issues().contains("Validation Errors:"));
}

#[test]
fn test_binding_satisfies_dependency() {
    let container = Container::new();
    container.register_type(worker());
    container.singleton("clock", Recipe::resolver(|_| Ok(Clock)));

    assert!(container.validate().is_valid());
}

#[test]
fn test_abstract_dependency_needs_binding() {
    let container = Container::new();
    container.register_abstract::<dyn Queue>();
    container.register_type(producer());

    let result = container.validate();
    assert!(matches!(
        result.errors.as_slice(),
        [ValidationError::AbstractDependency { service, dependency }]
            if service == "Producer" && dependency == "Queue"
    ));

    struct Memory;
    impl Queue for Memory {}
    container.singleton("queue", Recipe::resolver_trait(|_| Ok(Arc::new(Memory) as Arc<dyn Queue>)));
    assert!(container.validate().is_valid());
}

#[test]
fn test_constructor_cycle() {
    struct Left {
        _right: Arc<Right>,
    }
    struct Right {
        _left: Arc<Left>,
    }

    let container = Container::new();
    container.register_type(TypeDescriptor::concrete::<Left, _>(
        vec![Parameter::typed::<Right>("right")],
        |mut args| Ok(Left { _right: args.next()? }),
    ));
    container.register_type(TypeDescriptor::concrete::<Right, _>(
        vec![Parameter::typed::<Left>("left")],
        |mut args| Ok(Right { _left: args.next()? }),
    ));

    let result = container.validate();
    assert_eq!(
        result.errors,
        vec![ValidationError::CircularDependency {
            cycle: vec!["Left".to_string(), "Right".to_string(), "Left".to_string()],
        }]
    );
}

#[test]
fn test_type_binding_to_unknown_type() {
    let container = Container::new();
    container.bind("mailer", Recipe::type_ref("SmtpMailer"), true);

    let result = container.validate();
    assert_eq!(
        result.errors,
        vec![ValidationError::MissingDependency {
            service: "mailer".to_string(),
            dependency: "smtpmailer".to_string(),
        }]
    );
}

#[test]
fn test_shadowed_type_is_a_warning() {
    let container = Container::new();
    container.register_type(TypeDescriptor::with_default::<Clock>());
    container.bind("clock", Recipe::value(0u64), false);

    let result = container.validate();
    assert!(result.is_valid());
    assert_eq!(
        result.warnings,
        vec![ValidationWarning::ShadowedByBinding {
            type_name: "Clock".to_string(),
            binding: "clock".to_string(),
        }]
    );
    assert!(result.format_issues().contains("shadowed"));
}

#[test]
fn test_binding_to_own_type_is_not_shadowing() {
    let container = Container::new();
    container.register_type(TypeDescriptor::with_default::<Clock>());
    container.singleton("clock", Recipe::of_type::<Clock>());

    assert!(!container.validate().has_warnings());
}

#[test]
fn test_container_parameter_is_always_satisfied() {
    struct Locator {
        _container: Arc<Container>,
    }

    let container = Container::new();
    container.register_type(TypeDescriptor::concrete::<Locator, _>(
        vec![Parameter::typed::<Container>("container")],
        |mut args| Ok(Locator { _container: args.next()? }),
    ));

    assert!(container.validate().is_valid());
}
