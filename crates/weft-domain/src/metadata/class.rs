//! Class metadata

use super::marker::{Annotated, Marker};
use super::members::{ConstructorMeta, FieldMeta, MethodMeta};
use super::type_expr::TypeExpr;

/// What kind of type a class declaration describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassKind {
    #[default]
    Concrete,
    Abstract,
    Interface,
    Primitive,
}

/// Whether and how a class is nested in another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Nesting {
    #[default]
    TopLevel,
    /// Nested without access to an enclosing instance
    Static,
    /// Nested and bound to an enclosing instance
    Inner,
}

/// Registered class declaration
///
/// Names are package-qualified with `.` separators (`app.net.Client`); the
/// package is everything before the last separator.
#[derive(Debug, Clone)]
pub struct ClassMeta {
    name: String,
    kind: ClassKind,
    nesting: Nesting,
    type_params: Vec<String>,
    superclass: Option<TypeExpr>,
    interfaces: Vec<TypeExpr>,
    constructors: Vec<ConstructorMeta>,
    fields: Vec<FieldMeta>,
    methods: Vec<MethodMeta>,
    markers: Vec<Marker>,
}

impl ClassMeta {
    /// Start describing the class `name`
    pub fn builder<S: Into<String>>(name: S) -> ClassBuilder {
        ClassBuilder {
            meta: ClassMeta {
                name: name.into(),
                kind: ClassKind::default(),
                nesting: Nesting::default(),
                type_params: Vec::new(),
                superclass: None,
                interfaces: Vec::new(),
                constructors: Vec::new(),
                fields: Vec::new(),
                methods: Vec::new(),
                markers: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Package part of the qualified name; empty for the default package
    pub fn package(&self) -> &str {
        self.name.rsplit_once('.').map_or("", |(package, _)| package)
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn nesting(&self) -> Nesting {
        self.nesting
    }

    /// Declared type parameters, positionally
    pub fn type_params(&self) -> &[String] {
        &self.type_params
    }

    pub fn declares_type_param(&self, name: &str) -> bool {
        self.type_params.iter().any(|param| param == name)
    }

    pub fn superclass(&self) -> Option<&TypeExpr> {
        self.superclass.as_ref()
    }

    pub fn interfaces(&self) -> &[TypeExpr] {
        &self.interfaces
    }

    /// Superclass followed by interfaces
    pub fn supertypes(&self) -> impl Iterator<Item = &TypeExpr> {
        self.superclass.iter().chain(self.interfaces.iter())
    }

    pub fn constructors(&self) -> &[ConstructorMeta] {
        &self.constructors
    }

    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }

    pub fn methods(&self) -> &[MethodMeta] {
        &self.methods
    }
}

impl Annotated for ClassMeta {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn describe(&self) -> String {
        format!("type {}", self.name)
    }
}

/// Builder for [`ClassMeta`]
#[derive(Debug)]
pub struct ClassBuilder {
    meta: ClassMeta,
}

impl ClassBuilder {
    #[must_use]
    pub fn kind(mut self, kind: ClassKind) -> Self {
        self.meta.kind = kind;
        self
    }

    /// Shorthand for `kind(ClassKind::Abstract)`
    #[must_use]
    pub fn abstract_class(self) -> Self {
        self.kind(ClassKind::Abstract)
    }

    /// Shorthand for `kind(ClassKind::Interface)`
    #[must_use]
    pub fn interface(self) -> Self {
        self.kind(ClassKind::Interface)
    }

    #[must_use]
    pub fn nesting(mut self, nesting: Nesting) -> Self {
        self.meta.nesting = nesting;
        self
    }

    /// Declare a type parameter
    #[must_use]
    pub fn type_param<S: Into<String>>(mut self, name: S) -> Self {
        self.meta.type_params.push(name.into());
        self
    }

    #[must_use]
    pub fn extends(mut self, superclass: TypeExpr) -> Self {
        self.meta.superclass = Some(superclass);
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: TypeExpr) -> Self {
        self.meta.interfaces.push(interface);
        self
    }

    #[must_use]
    pub fn constructor(mut self, mut constructor: ConstructorMeta) -> Self {
        constructor.set_owner(&self.meta.name);
        self.meta.constructors.push(constructor);
        self
    }

    #[must_use]
    pub fn field(mut self, mut field: FieldMeta) -> Self {
        field.set_owner(&self.meta.name);
        self.meta.fields.push(field);
        self
    }

    #[must_use]
    pub fn method(mut self, mut method: MethodMeta) -> Self {
        method.set_owner(&self.meta.name);
        self.meta.methods.push(method);
        self
    }

    #[must_use]
    pub fn marked(mut self, marker: Marker) -> Self {
        self.meta.markers.push(marker);
        self
    }

    pub fn build(self) -> ClassMeta {
        self.meta
    }
}
