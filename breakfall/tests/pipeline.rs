//! Handling units run under a supervisor, the way a request pipeline would.

use breakfall::testing::{CallLog, RecordingObserver};
use breakfall::{HandlerId, Instrumentation, RegistryBuilder, Supervisor};
use std::sync::Arc;

mod common;
use common::{AppError, DummyController, OtherController, TestApp};

fn supervisor(recorder: &RecordingObserver) -> Supervisor<TestApp> {
    let registry = RegistryBuilder::<TestApp>::new()
        .with_scoped(HandlerId::of::<DummyController>(), recorder.clone())
        .build();
    Supervisor::new(Arc::new(registry))
}

#[test]
fn test_rescued_error_is_not_dispatched() {
    let recorder = RecordingObserver::new("rec");
    let supervisor = supervisor(&recorder);
    let controller = DummyController::new();

    let result = supervisor.guard(&controller, || controller.rescued());

    assert_eq!(result, Ok("fallback"));
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_escaping_error_dispatched_once_and_surfaces() {
    let recorder = RecordingObserver::new("rec");
    let supervisor = supervisor(&recorder);
    let controller = DummyController::new();

    let result = supervisor.guard(&controller, || controller.failing());

    assert_eq!(result, Err(AppError::NotFound("/dummy/42".into())));
    assert_eq!(recorder.count(), 1);
}

#[test]
fn test_success_is_not_dispatched() {
    let recorder = RecordingObserver::new("rec");
    let supervisor = supervisor(&recorder);
    let controller = DummyController::new();

    assert_eq!(supervisor.guard(&controller, || controller.succeeding()), Ok("ok"));
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_handler_receives_request_params_and_user() {
    let recorder = RecordingObserver::new("rec");
    let supervisor = supervisor(&recorder);
    let controller = DummyController::new();

    let _ = supervisor.guard(&controller, || controller.failing());

    let records = recorder.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.handler_id, Some(HandlerId::from("DummyController")));
    assert_eq!(record.error, r#"NotFound("/dummy/42")"#);
    assert!(record.has_request);
    assert!(record.has_params);
    assert!(record.has_actor);
}

#[test]
fn test_anonymous_request_has_no_actor() {
    let recorder = RecordingObserver::new("rec");
    let supervisor = supervisor(&recorder);
    let controller = DummyController::anonymous();

    let _ = supervisor.guard(&controller, || controller.failing());

    assert!(!recorder.records()[0].has_actor);
}

#[test]
fn test_unit_without_scoped_observers() {
    let log = CallLog::new();
    let registry = RegistryBuilder::<TestApp>::new()
        .with_scoped("DummyController", RecordingObserver::with_log("scoped", &log))
        .with_global(RecordingObserver::with_log("global", &log))
        .build();
    let supervisor = Supervisor::new(Arc::new(registry));

    let result: Result<(), _> =
        supervisor.guard(&OtherController, || Err(AppError::Database("timeout")));

    assert_eq!(result, Err(AppError::Database("timeout")));
    assert_eq!(log.entries(), vec!["global"]);
}

#[test]
fn test_intercept_returns_report() {
    let log = CallLog::new();
    let registry = RegistryBuilder::<TestApp>::new()
        .with_global(RecordingObserver::with_log("g1", &log))
        .with_scoped("DummyController", RecordingObserver::with_log("c1", &log))
        .build();
    let supervisor = Supervisor::new(Arc::new(registry));

    let report = supervisor
        .intercept(&DummyController::new(), &AppError::Database("timeout"))
        .unwrap();

    assert_eq!(report.names(), vec!["c1", "g1"]);
    assert_eq!(report.handler_id().map(HandlerId::as_str), Some("DummyController"));
}

#[test]
fn test_instrumentation_limits_units() {
    let recorder = RecordingObserver::new("rec");
    let registry = RegistryBuilder::<TestApp>::new()
        .with_global(recorder.clone())
        .build();
    let supervisor = Supervisor::new(Arc::new(registry))
        .with_instrumentation(Instrumentation::only(["OtherController"]));

    let controller = DummyController::new();
    let result = supervisor.guard(&controller, || controller.failing());
    assert!(result.is_err());
    assert_eq!(recorder.count(), 0);

    let _ = supervisor.guard(&OtherController, || Err::<(), _>(AppError::Database("x")));
    assert_eq!(recorder.count(), 1);

    let disabled = supervisor.with_instrumentation(Instrumentation::Disabled);
    assert!(!disabled.is_instrumented("OtherController"));
}

#[tokio::test]
async fn test_async_unit() {
    let recorder = RecordingObserver::new("rec");
    let supervisor = supervisor(&recorder);
    let controller = DummyController::new();

    let result = supervisor
        .guard_async(&controller, async {
            tokio::task::yield_now().await;
            controller.failing()
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(recorder.count(), 1);
}
