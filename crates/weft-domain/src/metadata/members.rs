//! Member metadata: parameters, fields, methods and constructors

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::InvokeError;

use super::invoke::{Args, ConstructFn, FieldSetFn, Instance, MethodFn};
use super::marker::{Annotated, Executable, Marker};
use super::type_expr::TypeExpr;

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    /// Visible within the declaring package only
    Package,
    Private,
}

/// Constructor or method parameter
#[derive(Debug, Clone)]
pub struct ParamMeta {
    name: String,
    ty: TypeExpr,
    markers: Vec<Marker>,
    location: String,
}

impl ParamMeta {
    pub fn new<S: Into<String>>(name: S, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            markers: Vec::new(),
            location: String::new(),
        }
    }

    /// Add a marker
    #[must_use]
    pub fn marked(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeExpr {
        &self.ty
    }

    pub(crate) fn locate(&mut self, executable: &str) {
        self.location = executable.to_string();
    }
}

impl Annotated for ParamMeta {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn describe(&self) -> String {
        if self.location.is_empty() {
            format!("parameter {}", self.name)
        } else {
            format!("parameter {} of {}", self.name, self.location)
        }
    }
}

/// Field declaration
#[derive(Clone)]
pub struct FieldMeta {
    name: String,
    ty: TypeExpr,
    visibility: Visibility,
    is_static: bool,
    is_final: bool,
    markers: Vec<Marker>,
    owner: String,
    setter: FieldSetFn,
}

impl FieldMeta {
    /// Field with the closure that assigns it
    pub fn new<S, F>(name: S, ty: TypeExpr, setter: F) -> Self
    where
        S: Into<String>,
        F: Fn(Option<&Instance>, Option<Instance>) -> Result<(), InvokeError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::default(),
            is_static: false,
            is_final: false,
            markers: Vec::new(),
            owner: String::new(),
            setter: Arc::new(setter),
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Declare the field static
    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Declare the field final
    #[must_use]
    pub fn as_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    #[must_use]
    pub fn marked(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Shorthand for `marked(Marker::Inject)`
    #[must_use]
    pub fn inject(self) -> Self {
        self.marked(Marker::Inject)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeExpr {
        &self.ty
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn setter(&self) -> &FieldSetFn {
        &self.setter
    }

    pub(crate) fn set_owner(&mut self, owner: &str) {
        self.owner = owner.to_string();
    }
}

impl Annotated for FieldMeta {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn describe(&self) -> String {
        format!("field {}.{}", self.owner, self.name)
    }
}

impl fmt::Debug for FieldMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMeta")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .field("is_final", &self.is_final)
            .field("markers", &self.markers)
            .finish_non_exhaustive()
    }
}

/// Method declaration
#[derive(Clone)]
pub struct MethodMeta {
    name: String,
    params: Vec<ParamMeta>,
    return_type: Option<TypeExpr>,
    visibility: Visibility,
    is_static: bool,
    markers: Vec<Marker>,
    owner: String,
    invoker: MethodFn,
}

impl MethodMeta {
    /// Method with the closure that invokes it; returns nothing by default
    pub fn new<S, F>(name: S, invoker: F) -> Self
    where
        S: Into<String>,
        F: Fn(Option<&Instance>, Args) -> Result<(), InvokeError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type: None,
            visibility: Visibility::default(),
            is_static: false,
            markers: Vec::new(),
            owner: String::new(),
            invoker: Arc::new(invoker),
        }
    }

    #[must_use]
    pub fn param(mut self, param: ParamMeta) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: TypeExpr) -> Self {
        self.return_type = Some(ty);
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Declare the method static
    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn marked(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Shorthand for `marked(Marker::Inject)`
    #[must_use]
    pub fn inject(self) -> Self {
        self.marked(Marker::Inject)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared return type, `None` for unit
    pub fn return_type(&self) -> Option<&TypeExpr> {
        self.return_type.as_ref()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn invoker(&self) -> &MethodFn {
        &self.invoker
    }

    pub(crate) fn set_owner(&mut self, owner: &str) {
        self.owner = owner.to_string();
        let location = format!("{}.{}()", self.owner, self.name);
        for param in &mut self.params {
            param.locate(&location);
        }
    }
}

impl Annotated for MethodMeta {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn describe(&self) -> String {
        format!("method {}.{}()", self.owner, self.name)
    }
}

impl Executable for MethodMeta {
    fn params(&self) -> &[ParamMeta] {
        &self.params
    }
}

impl fmt::Debug for MethodMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodMeta")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("return_type", &self.return_type)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .field("markers", &self.markers)
            .finish_non_exhaustive()
    }
}

/// Constructor declaration
#[derive(Clone)]
pub struct ConstructorMeta {
    params: Vec<ParamMeta>,
    visibility: Visibility,
    markers: Vec<Marker>,
    owner: String,
    construct: ConstructFn,
}

impl ConstructorMeta {
    /// Public constructor backed by `construct`
    pub fn new<F>(construct: F) -> Self
    where
        F: Fn(Args) -> Result<Instance, InvokeError> + Send + Sync + 'static,
    {
        Self {
            params: Vec::new(),
            visibility: Visibility::Public,
            markers: Vec::new(),
            owner: String::new(),
            construct: Arc::new(construct),
        }
    }

    /// Public no-argument constructor producing `T::default()`
    pub fn default_of<T: Default + Send + Sync + 'static>() -> Self {
        Self::new(|_| Ok(Arc::new(T::default()) as Instance))
    }

    #[must_use]
    pub fn param(mut self, param: ParamMeta) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn marked(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Shorthand for `marked(Marker::Inject)`
    #[must_use]
    pub fn inject(self) -> Self {
        self.marked(Marker::Inject)
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn constructor(&self) -> &ConstructFn {
        &self.construct
    }

    pub(crate) fn set_owner(&mut self, owner: &str) {
        self.owner = owner.to_string();
        let location = format!("{}::new()", self.owner);
        for param in &mut self.params {
            param.locate(&location);
        }
    }
}

impl Annotated for ConstructorMeta {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn describe(&self) -> String {
        format!("constructor {}::new({} params)", self.owner, self.params.len())
    }
}

impl Executable for ConstructorMeta {
    fn params(&self) -> &[ParamMeta] {
        &self.params
    }
}

impl fmt::Debug for ConstructorMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorMeta")
            .field("params", &self.params)
            .field("visibility", &self.visibility)
            .field("markers", &self.markers)
            .finish_non_exhaustive()
    }
}
