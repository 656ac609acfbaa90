//! Unit tests for creating and injecting through descriptors

use std::sync::{Arc, Mutex};

use weft_application::{Dependency, ResolutionStack, build_descriptor};
use weft_domain::metadata::{
    ClassMeta, ConstructorMeta, FieldMeta, Instance, Marker, MethodMeta, TypeExpr, TypeRegistry,
    downcast_value,
};
use weft_domain::value_objects::{Phase, TypeIdentity};
use weft_domain::{InjectionError, InvokeError};

use crate::test_utils::{
    MapProvider, Recorder, Token, events_of, param, recorder_constructor, recording_constructor,
    recording_field, recording_method, static_method,
};

fn registry(classes: Vec<ClassMeta>) -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    for class in classes {
        registry.register(class).unwrap();
    }
    registry
}

fn key(name: &str) -> TypeIdentity {
    TypeIdentity::of(name)
}

#[test]
fn test_materialize_runs_creator_then_members_in_order() {
    let registry = registry(vec![
        ClassMeta::builder("app.Service")
            .constructor(recording_constructor(vec![param("clock", "app.Clock")]))
            .field(recording_field("log", TypeExpr::class("app.Log")).inject())
            .method(recording_method("start", vec![param("db", "app.Db")]).inject())
            .build(),
    ]);
    let provider = MapProvider::new()
        .value(key("app.Clock"), Token("clock"))
        .value(key("app.Log"), Token("log"))
        .value(key("app.Db"), Token("db"));

    let descriptor = build_descriptor(&registry, "app.Service", Phase::Instance).unwrap();
    let instance = descriptor.materialize(&provider).unwrap();

    assert_eq!(
        events_of(&instance),
        vec!["new(clock)", "log=log", "start(db)"]
    );
    assert_eq!(
        provider.calls(),
        vec![key("app.Clock"), key("app.Log"), key("app.Db")]
    );
}

#[test]
fn test_no_arg_constructor_makes_no_provider_calls() {
    let registry = registry(vec![
        ClassMeta::builder("app.Plain")
            .constructor(recorder_constructor())
            .build(),
    ]);
    let provider = MapProvider::new();

    let descriptor = build_descriptor(&registry, "app.Plain", Phase::Instance).unwrap();
    let instance = descriptor.create(&provider).unwrap();

    assert!(instance.downcast_ref::<Recorder>().is_some());
    assert!(provider.calls().is_empty());
}

#[test]
fn test_inject_into_existing_instance() {
    let registry = registry(vec![
        ClassMeta::builder("app.Service")
            .constructor(recorder_constructor())
            .field(recording_field("log", TypeExpr::class("app.Log")).inject())
            .build(),
    ]);
    let provider = MapProvider::new().value(key("app.Log"), Token("log"));
    let descriptor = build_descriptor(&registry, "app.Service", Phase::Instance).unwrap();

    let existing: Instance = Arc::new(Recorder::default());
    descriptor.inject(&provider, &existing).unwrap();

    assert_eq!(events_of(&existing), vec!["log=log"]);
}

#[test]
fn test_optional_unbound_field_keeps_default() {
    let registry = registry(vec![
        ClassMeta::builder("app.Service")
            .constructor(recorder_constructor())
            .field(
                recording_field("metrics", TypeExpr::class("app.Metrics"))
                    .inject()
                    .marked(Marker::Optional),
            )
            .build(),
    ]);
    let provider = MapProvider::new();

    let descriptor = build_descriptor(&registry, "app.Service", Phase::Instance).unwrap();
    let instance = descriptor.materialize(&provider).unwrap();

    assert!(events_of(&instance).is_empty(), "setter must not run");
    assert!(provider.calls().is_empty());
}

#[test]
fn test_nullable_field_is_cleared_by_absent_binding() {
    let registry = registry(vec![
        ClassMeta::builder("app.Service")
            .constructor(recorder_constructor())
            .field(
                recording_field("cache", TypeExpr::class("app.Cache"))
                    .inject()
                    .marked(Marker::Nullable),
            )
            .build(),
    ]);
    let provider = MapProvider::new().absent(key("app.Cache"));

    let descriptor = build_descriptor(&registry, "app.Service", Phase::Instance).unwrap();
    let instance = descriptor.materialize(&provider).unwrap();

    assert_eq!(events_of(&instance), vec!["cache=none"]);
}

#[test]
fn test_nullable_field_without_binding_fails() {
    let registry = registry(vec![
        ClassMeta::builder("app.Service")
            .constructor(recorder_constructor())
            .field(
                recording_field("cache", TypeExpr::class("app.Cache"))
                    .inject()
                    .marked(Marker::Nullable),
            )
            .build(),
    ]);
    let descriptor = build_descriptor(&registry, "app.Service", Phase::Instance).unwrap();

    let existing: Instance = Arc::new(Recorder::default());
    match descriptor.inject(&MapProvider::new(), &existing) {
        Err(InjectionError::MissingDependency { key: missing }) => {
            assert_eq!(missing, key("app.Cache"));
        }
        other => panic!("Expected MissingDependency, got {other:?}"),
    }
    assert!(events_of(&existing).is_empty(), "setter must not run");
}

#[test]
fn test_required_field_with_absent_binding_fails() {
    let registry = registry(vec![
        ClassMeta::builder("app.Service")
            .constructor(recorder_constructor())
            .field(recording_field("cache", TypeExpr::class("app.Cache")).inject())
            .build(),
    ]);
    let provider = MapProvider::new().absent(key("app.Cache"));

    let descriptor = build_descriptor(&registry, "app.Service", Phase::Instance).unwrap();
    match descriptor.materialize(&provider) {
        Err(InjectionError::MissingDependency { key: missing }) => {
            assert_eq!(missing, key("app.Cache"));
        }
        other => panic!("Expected MissingDependency, got {:?}", other.err()),
    }
}

#[test]
fn test_optional_method_with_nothing_bound_is_not_invoked() {
    let registry = registry(vec![
        ClassMeta::builder("app.Service")
            .constructor(recorder_constructor())
            .method(
                recording_method("tune", vec![param("a", "app.A"), param("b", "app.B")])
                    .inject()
                    .marked(Marker::Optional),
            )
            .build(),
    ]);
    let provider = MapProvider::new();

    let descriptor = build_descriptor(&registry, "app.Service", Phase::Instance).unwrap();
    let instance = descriptor.materialize(&provider).unwrap();

    assert!(events_of(&instance).is_empty());
}

#[test]
fn test_optional_method_with_partial_bindings_is_invoked() {
    let registry = registry(vec![
        ClassMeta::builder("app.Service")
            .constructor(recorder_constructor())
            .method(
                recording_method("tune", vec![param("a", "app.A"), param("b", "app.B")])
                    .inject()
                    .marked(Marker::Optional),
            )
            .build(),
    ]);
    let provider = MapProvider::new().value(key("app.B"), Token("b"));

    let descriptor = build_descriptor(&registry, "app.Service", Phase::Instance).unwrap();
    let instance = descriptor.materialize(&provider).unwrap();

    assert_eq!(events_of(&instance), vec!["tune(none,b)"]);
}

#[test]
fn test_optional_method_without_parameters_is_invoked() {
    let registry = registry(vec![
        ClassMeta::builder("app.Service")
            .constructor(recorder_constructor())
            .method(
                recording_method("ready", vec![])
                    .inject()
                    .marked(Marker::Optional),
            )
            .build(),
    ]);

    let descriptor = build_descriptor(&registry, "app.Service", Phase::Instance).unwrap();
    let instance = descriptor.materialize(&MapProvider::new()).unwrap();

    assert_eq!(events_of(&instance), vec!["ready()"]);
}

#[test]
fn test_cycle_reports_chain() {
    let registry = registry(vec![
        ClassMeta::builder("app.X")
            .constructor(recording_constructor(vec![param("y", "app.Y")]))
            .build(),
        ClassMeta::builder("app.Y")
            .constructor(recording_constructor(vec![param("x", "app.X")]))
            .build(),
    ]);
    let x = build_descriptor(&registry, "app.X", Phase::Instance).unwrap();
    let y = build_descriptor(&registry, "app.Y", Phase::Instance).unwrap();
    let provider = MapProvider::new()
        .building(key("app.X"), x.clone())
        .building(key("app.Y"), y);

    let mut stack = ResolutionStack::new();
    let err = Dependency::new(key("app.X"))
        .resolve(&provider, &mut stack)
        .unwrap_err();

    match &err {
        InjectionError::CircularDependency { key: closing, chain } => {
            assert_eq!(closing, &key("app.X"));
            assert_eq!(chain, &vec![key("app.X"), key("app.Y")]);
        }
        other => panic!("Expected CircularDependency, got {other:?}"),
    }
    assert!(stack.is_empty());

    // Creating X directly does not put X itself on the stack; the cycle
    // closes on Y instead.
    let err = x.create(&provider).unwrap_err();
    assert_eq!(err.cycle(), Some(&[key("app.Y"), key("app.X")][..]));
}

#[test]
fn test_shared_dependency_is_not_a_cycle() {
    let registry = registry(vec![
        ClassMeta::builder("app.Top")
            .constructor(recording_constructor(vec![
                param("left", "app.Clock"),
                param("right", "app.Clock"),
            ]))
            .build(),
    ]);
    let provider = MapProvider::new().value(key("app.Clock"), Token("clock"));

    let descriptor = build_descriptor(&registry, "app.Top", Phase::Instance).unwrap();
    let instance = descriptor.create(&provider).unwrap();

    assert_eq!(events_of(&instance), vec!["new(clock,clock)"]);
    assert_eq!(provider.call_count(&key("app.Clock")), 2);
}

#[test]
fn test_target_failure_is_wrapped_with_point() {
    let registry = registry(vec![
        ClassMeta::builder("app.Fragile")
            .constructor(
                ConstructorMeta::new(|_| Err(InvokeError::target("disk full"))).inject(),
            )
            .build(),
    ]);

    let descriptor = build_descriptor(&registry, "app.Fragile", Phase::Instance).unwrap();
    match descriptor.create(&MapProvider::new()) {
        Err(InjectionError::TargetFailed { point, source }) => {
            assert_eq!(point, "constructor app.Fragile::new(0 params)");
            assert_eq!(source.to_string(), "disk full");
        }
        other => panic!("Expected TargetFailed, got {:?}", other.err()),
    }
}

#[test]
fn test_wrong_receiver_is_invocation_failure() {
    let registry = registry(vec![
        ClassMeta::builder("app.Service")
            .constructor(ConstructorMeta::default_of::<u32>())
            .field(recording_field("log", TypeExpr::class("app.Log")).inject())
            .build(),
    ]);
    let provider = MapProvider::new().value(key("app.Log"), Token("log"));

    let descriptor = build_descriptor(&registry, "app.Service", Phase::Instance).unwrap();
    match descriptor.materialize(&provider) {
        Err(InjectionError::InvocationFailed { point, .. }) => {
            assert_eq!(point, "field app.Service.log");
        }
        other => panic!("Expected InvocationFailed, got {:?}", other.err()),
    }
}

#[test]
fn test_provider_failure_stops_injection() {
    let registry = registry(vec![
        ClassMeta::builder("app.Service")
            .constructor(recorder_constructor())
            .field(
                recording_field("first", TypeExpr::class("app.Broken"))
                    .inject()
                    .marked(Marker::Optional),
            )
            .field(recording_field("second", TypeExpr::class("app.Log")).inject())
            .build(),
    ]);
    let provider = MapProvider::new()
        .failing(key("app.Broken"), "backend down")
        .value(key("app.Log"), Token("log"));

    let descriptor = build_descriptor(&registry, "app.Service", Phase::Instance).unwrap();
    let existing: Instance = Arc::new(Recorder::default());
    let err = descriptor.inject(&provider, &existing).unwrap_err();

    assert!(matches!(err, InjectionError::Provider { .. }));
    assert!(events_of(&existing).is_empty());
    assert_eq!(provider.call_count(&key("app.Log")), 0);
}

#[test]
fn test_depth_limit_applies_to_nested_resolution() {
    let registry = registry(vec![
        ClassMeta::builder("app.Outer")
            .constructor(recording_constructor(vec![param("inner", "app.Inner")]))
            .build(),
        ClassMeta::builder("app.Inner")
            .constructor(recording_constructor(vec![param("clock", "app.Clock")]))
            .build(),
    ]);
    let inner = build_descriptor(&registry, "app.Inner", Phase::Instance).unwrap();
    let outer = build_descriptor(&registry, "app.Outer", Phase::Instance).unwrap();
    let provider = MapProvider::new()
        .building(key("app.Inner"), inner)
        .value(key("app.Clock"), Token("clock"));

    let mut shallow = ResolutionStack::with_max_depth(1);
    let err = outer.create_in(&provider, &mut shallow).unwrap_err();
    assert!(matches!(err, InjectionError::DepthExceeded { depth: 1, .. }));

    let instance = outer.create(&provider).unwrap();
    assert_eq!(events_of(&instance), vec!["new(?)"]);
}

// ============================================================================
// Phases
// ============================================================================

#[test]
fn test_static_injection_runs_static_members_without_instance() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let shared = Arc::new(Mutex::new(None::<String>));
    let slot = Arc::clone(&shared);
    let registry = registry(vec![
        ClassMeta::builder("app.Config")
            .constructor(recorder_constructor())
            .field(
                FieldMeta::new("default_log", TypeExpr::class("app.Log"), move |target, value| {
                    assert!(target.is_none());
                    let token = downcast_value::<Token>(value)?;
                    *slot.lock().unwrap() = token.map(|token| token.0.to_string());
                    Ok(())
                })
                .as_static()
                .inject(),
            )
            .method(
                static_method("configure", Arc::clone(&log))
                    .param(param("db", "app.Db"))
                    .inject(),
            )
            .method(recording_method("instance_only", vec![]).inject())
            .build(),
    ]);
    let provider = MapProvider::new()
        .value(key("app.Log"), Token("log"))
        .value(key("app.Db"), Token("db"));

    let descriptor = build_descriptor(&registry, "app.Config", Phase::Static).unwrap();
    descriptor.inject_static(&provider).unwrap();

    assert_eq!(shared.lock().unwrap().as_deref(), Some("log"));
    assert_eq!(*log.lock().unwrap(), vec!["configure(db)".to_string()]);
}

#[test]
fn test_static_descriptor_cannot_create() {
    let registry = registry(vec![
        ClassMeta::builder("app.Config")
            .constructor(recorder_constructor())
            .build(),
    ]);

    let descriptor = build_descriptor(&registry, "app.Config", Phase::Static).unwrap();
    assert!(matches!(
        descriptor.create(&MapProvider::new()),
        Err(InjectionError::NotConstructible { .. })
    ));
}

#[test]
fn test_instance_injection_requires_instance() {
    let registry = registry(vec![
        ClassMeta::builder("app.Service")
            .constructor(recorder_constructor())
            .method(MethodMeta::new("noop", |_, _| Ok(())).inject())
            .build(),
    ]);

    let descriptor = build_descriptor(&registry, "app.Service", Phase::Instance).unwrap();
    assert!(matches!(
        descriptor.inject_static(&MapProvider::new()),
        Err(InjectionError::MissingInstance { .. })
    ));
}
