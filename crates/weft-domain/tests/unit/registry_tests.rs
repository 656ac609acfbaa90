//! Unit tests for the type registry and class metadata

use weft_domain::TypeError;
use weft_domain::metadata::{
    Annotated, ClassMeta, ConstructorMeta, Executable, FieldMeta, MethodMeta, ParamMeta,
    TypeExpr, TypeRegistry,
};

#[derive(Default)]
struct Widget;

fn widget() -> ClassMeta {
    ClassMeta::builder("app.ui.Widget")
        .constructor(ConstructorMeta::default_of::<Widget>())
        .field(FieldMeta::new("label", TypeExpr::class("app.Label"), |_, _| Ok(())).inject())
        .method(
            MethodMeta::new("attach", |_, _| Ok(()))
                .param(ParamMeta::new("parent", TypeExpr::class("app.ui.Panel")))
                .inject(),
        )
        .build()
}

#[test]
fn test_register_and_get() {
    let registry = TypeRegistry::new().with(widget()).unwrap();
    assert!(registry.contains("app.ui.Widget"));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("app.ui.Widget").unwrap().package(), "app.ui");
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let mut registry = TypeRegistry::new();
    registry.register(widget()).unwrap();
    let err = registry.register(widget()).unwrap_err();
    assert_eq!(
        err,
        TypeError::DuplicateType {
            name: "app.ui.Widget".to_string()
        }
    );
}

#[test]
fn test_unknown_type_lookup() {
    let registry = TypeRegistry::new();
    assert!(registry.find("app.Nope").is_none());
    assert!(matches!(
        registry.get("app.Nope"),
        Err(TypeError::UnknownType { .. })
    ));
}

#[test]
fn test_members_describe_their_owner() {
    let meta = widget();
    assert_eq!(meta.fields()[0].describe(), "field app.ui.Widget.label");
    let method = &meta.methods()[0];
    assert_eq!(method.describe(), "method app.ui.Widget.attach()");
    assert_eq!(
        method.params()[0].describe(),
        "parameter parent of app.ui.Widget.attach()"
    );
}

#[test]
fn test_default_constructor_builds_instance() {
    let meta = widget();
    let instance = (meta.constructors()[0].constructor())(Default::default()).unwrap();
    assert!(instance.downcast_ref::<Widget>().is_some());
}
