//! Type Metadata
//!
//! Explicit description of the classes that take part in injection. A class
//! is registered once with its supertypes, constructors, fields and methods;
//! each executable member carries the closure that performs it.
//!
//! ```text
//! ClassMeta::builder("app.Service")
//!     ├── extends / implements   → supertype chain for generic resolution
//!     ├── constructor(..)        → creator candidates
//!     ├── field(..)              → field injection points
//!     └── method(..)             → method injection points
//!                  │
//!                  ▼
//!           TypeRegistry::register
//! ```

pub mod class;
pub mod invoke;
pub mod marker;
pub mod members;
pub mod registry;
pub mod type_expr;

pub use class::{ClassBuilder, ClassKind, ClassMeta, Nesting};
pub use invoke::{Args, ConstructFn, FieldSetFn, Instance, MethodFn, downcast_target, downcast_value};
pub use marker::{Annotated, Executable, Marker};
pub use members::{ConstructorMeta, FieldMeta, MethodMeta, ParamMeta, Visibility};
pub use registry::TypeRegistry;
pub use type_expr::TypeExpr;
