//! Unit tests for domain error types

use weft_domain::value_objects::TypeIdentity;
use weft_domain::{Error, InjectionError, InvokeError, TypeError};

#[test]
fn test_configuration_error() {
    let error = Error::configuration("max_depth must be positive");
    match error {
        Error::Configuration { message, source } => {
            assert_eq!(message, "max_depth must be positive");
            assert!(source.is_none());
        }
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_type_error_converts_into_error() {
    let error: Error = TypeError::unknown_type("app.Missing").into();
    assert!(matches!(error, Error::Type(TypeError::UnknownType { .. })));
    assert_eq!(error.to_string(), "Unknown type: app.Missing");
}

#[test]
fn test_circular_dependency_renders_chain() {
    let error = InjectionError::CircularDependency {
        key: TypeIdentity::of("app.X"),
        chain: vec![TypeIdentity::of("app.X"), TypeIdentity::of("app.Y")],
    };
    assert_eq!(
        error.to_string(),
        "Circular dependency on app.X: app.X -> app.Y"
    );
    assert_eq!(error.cycle().map(<[_]>::len), Some(2));
}

#[test]
fn test_invoke_error_translation_distinguishes_target_failures() {
    let target = InjectionError::from_invoke("method app.A.init()", InvokeError::target("boom"));
    match target {
        InjectionError::TargetFailed { point, source } => {
            assert_eq!(point, "method app.A.init()");
            assert_eq!(source.to_string(), "boom");
        }
        other => panic!("Expected TargetFailed, got {other:?}"),
    }

    let access = InjectionError::from_invoke("field app.A.b", InvokeError::access("wrong receiver"));
    assert!(matches!(
        access,
        InjectionError::InvocationFailed { ref reason, .. } if reason == "wrong receiver"
    ));
}

#[test]
fn test_missing_dependency_message() {
    let error = InjectionError::missing(&TypeIdentity::of("app.Db"));
    assert_eq!(error.to_string(), "Missing dependency: app.Db");
}

#[test]
fn test_cyclic_hierarchy_renders_chain() {
    let error = TypeError::CyclicHierarchy {
        chain: vec!["app.A".to_string(), "app.B".to_string(), "app.A".to_string()],
    };
    assert_eq!(
        error.to_string(),
        "Cyclic class hierarchy: app.A -> app.B -> app.A"
    );
}
