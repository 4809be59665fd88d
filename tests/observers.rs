use ferrous_ioc::{Container, DiError, DiObserver, Identifier, LoggingObserver, Recipe, Resolver};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Recording {
    events: Mutex<Vec<String>>,
}

impl Recording {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl DiObserver for Recording {
    fn resolving(&self, id: &Identifier) {
        self.events.lock().unwrap().push(format!("resolving {}", id));
    }

    fn resolved(&self, id: &Identifier, _duration: Duration) {
        self.events.lock().unwrap().push(format!("resolved {}", id));
    }

    fn failed(&self, id: &Identifier, error: &DiError) {
        self.events.lock().unwrap().push(format!("failed {}: {}", id, error));
    }
}

#[test]
fn test_nested_resolutions_are_observed_in_order() {
    let recording = Arc::new(Recording::default());
    let container = Container::new();
    container.add_observer(recording.clone());

    container.bind("inner", Recipe::value(1u8), false);
    container.bind("Outer", Recipe::resolver(|c| c.get::<u8>("inner").map(|v| *v + 1)), false);

    assert_eq!(*container.get::<u8>("OUTER").unwrap(), 2);
    assert_eq!(
        recording.events(),
        vec!["resolving outer", "resolving inner", "resolved inner", "resolved outer"]
    );
}

#[test]
fn test_failures_are_observed() {
    let recording = Arc::new(Recording::default());
    let container = Container::new();
    container.add_observer(recording.clone());

    assert!(container.resolve("nothing").is_err());
    assert_eq!(
        recording.events(),
        vec!["resolving nothing", "failed nothing: Unresolvable dependency: nothing"]
    );
}

#[test]
fn test_every_observer_is_notified() {
    let first = Arc::new(Recording::default());
    let second = Arc::new(Recording::default());
    let container = Container::new();
    container.add_observer(first.clone());
    container.add_observer(second.clone());
    container.add_observer(Arc::new(LoggingObserver::default()));

    container.bind("x", Recipe::value(0u8), false);
    container.resolve("x").unwrap();

    assert_eq!(first.events(), second.events());
    assert_eq!(first.events().len(), 2);
}

#[test]
fn test_clones_share_observers() {
    let recording = Arc::new(Recording::default());
    let container = Container::new();
    let clone = container.clone();
    clone.add_observer(recording.clone());

    container.bind("x", Recipe::value(0u8), false);
    container.resolve("x").unwrap();
    assert_eq!(recording.events().len(), 2);
}
