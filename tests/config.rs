use ferrous_ioc::{Container, ContainerConfig, DiError, Recipe};
use serial_test::serial;
use std::env;

fn clear(prefix: &str) {
    env::remove_var(format!("{}_MAX_DEPTH", prefix));
    env::remove_var(format!("{}_EVICT_ON_REBIND", prefix));
}

#[test]
#[serial]
fn test_from_env_defaults_when_unset() {
    clear("FERROUS_IOC");
    assert_eq!(ContainerConfig::from_env().unwrap(), ContainerConfig::default());
}

#[test]
#[serial]
fn test_from_env_reads_variables() {
    clear("FERROUS_IOC");
    env::set_var("FERROUS_IOC_MAX_DEPTH", "16");
    env::set_var("FERROUS_IOC_EVICT_ON_REBIND", "false");

    let config = ContainerConfig::from_env().unwrap();
    clear("FERROUS_IOC");

    assert_eq!(config.max_depth, 16);
    assert!(!config.evict_on_rebind);
}

#[test]
#[serial]
fn test_from_env_with_custom_prefix() {
    clear("MYAPP_DI");
    env::set_var("MYAPP_DI_MAX_DEPTH", " 32 ");

    let config = ContainerConfig::from_env_with_prefix("myapp_di").unwrap();
    clear("MYAPP_DI");

    assert_eq!(config.max_depth, 32);
    assert!(config.evict_on_rebind);
}

#[test]
#[serial]
fn test_from_env_rejects_garbage() {
    clear("FERROUS_IOC");
    env::set_var("FERROUS_IOC_MAX_DEPTH", "deep");
    let depth = ContainerConfig::from_env();
    clear("FERROUS_IOC");

    env::set_var("FERROUS_IOC_EVICT_ON_REBIND", "sometimes");
    let evict = ContainerConfig::from_env();
    clear("FERROUS_IOC");

    match depth {
        Err(DiError::Config(msg)) => assert!(msg.contains("FERROUS_IOC_MAX_DEPTH")),
        other => panic!("expected Config error, got {:?}", other),
    }
    assert!(matches!(evict, Err(DiError::Config(_))));
}

#[test]
#[serial]
fn test_from_env_rejects_zero_depth() {
    clear("FERROUS_IOC");
    env::set_var("FERROUS_IOC_MAX_DEPTH", "0");
    let result = ContainerConfig::from_env();
    clear("FERROUS_IOC");

    assert!(matches!(result, Err(DiError::Config(_))));
}

#[test]
fn test_with_config_validates() {
    assert!(Container::with_config(ContainerConfig::new().with_max_depth(0)).is_err());

    let container = Container::with_config(ContainerConfig::new().with_max_depth(3)).unwrap();
    assert_eq!(container.config().max_depth, 3);
}

#[test]
fn test_rebind_without_eviction_keeps_old_instance() {
    let config = ContainerConfig::new().with_evict_on_rebind(false);
    let container = Container::with_config(config).unwrap();

    container.singleton("v", Recipe::resolver(|_| Ok(1u8)));
    container.resolve("v").unwrap();
    container.singleton("v", Recipe::resolver(|_| Ok(2u8)));

    assert_eq!(*container.resolve("v").unwrap().downcast::<u8>().unwrap(), 1);

    // removal still drops it
    container.remove("v");
    container.singleton("v", Recipe::resolver(|_| Ok(2u8)));
    assert_eq!(*container.resolve("v").unwrap().downcast::<u8>().unwrap(), 2);
}

#[cfg(feature = "config")]
#[test]
fn test_from_json() {
    let config = ContainerConfig::from_json(r#"{ "max_depth": 12, "evict_on_rebind": false }"#).unwrap();
    assert_eq!(config.max_depth, 12);
    assert!(!config.evict_on_rebind);

    assert!(matches!(ContainerConfig::from_json("{ not json"), Err(DiError::Config(_))));
    assert!(matches!(ContainerConfig::from_json(r#"{ "max_depth": 0 }"#), Err(DiError::Config(_))));
}
