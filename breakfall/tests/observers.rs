use breakfall::observers::{CountingObserver, TracingObserver};
use breakfall::{BreakfallConfig, ConfigError, Incident, Instrumentation, RegistryBuilder};

mod common;
use common::{AppError, TestApp};

#[test]
fn test_standard_observers_together() {
    let counter = CountingObserver::new();
    let registry = RegistryBuilder::<TestApp>::new()
        .with_scoped("DummyController", TracingObserver::named("dummy"))
        .with_global(counter.clone())
        .build();

    let error = AppError::Database("gone");
    let report =
        registry.dispatch(&Incident::<TestApp>::new(&error).with_handler_id("DummyController"));
    registry.dispatch(&Incident::<TestApp>::new(&error));

    assert_eq!(report.names(), vec!["dummy", "counting"]);
    assert!(report.all_completed());
    assert_eq!(counter.count(), 2);
    assert_eq!(counter.reset(), 2);
    assert_eq!(counter.count(), 0);
}

#[test]
fn test_env_config() {
    let config = BreakfallConfig::from_lookup(|var| match var {
        "BREAKFALL_UNITS" => Some("DummyController, OtherController".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(
        config.instrumentation,
        Instrumentation::only(["DummyController", "OtherController"])
    );
}

#[test]
fn test_env_config_rejects_garbage() {
    let err = BreakfallConfig::from_lookup(|var| {
        (var == "BREAKFALL_ENABLED").then(|| "maybe".to_string())
    })
    .unwrap_err();

    assert!(matches!(
        err,
        ConfigError::Env {
            var: "BREAKFALL_ENABLED",
            ..
        }
    ));
}

#[cfg(feature = "config")]
#[test]
fn test_toml_config() {
    let config = BreakfallConfig::from_toml_str(
        r#"
        [breakfall]
        units = ["DummyController"]
        "#,
    )
    .unwrap();
    assert!(config.instrumentation.covers("DummyController"));
    assert!(!config.instrumentation.covers("OtherController"));
}
