//! Override signatures
//!
//! Two method declarations in one hierarchy refer to the same overridable
//! slot when their override signatures are equal. The signature is the name,
//! erased parameter types and erased return type, scoped by visibility:
//!
//! | visibility        | scope                 |
//! |-------------------|-----------------------|
//! | private / static  | declaring class       |
//! | package           | declaring package     |
//! | protected / public| none (hierarchy-wide) |

use std::fmt;

use weft_domain::metadata::{ClassMeta, Executable, MethodMeta, Visibility};

/// Visibility-scoped method signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverrideSignature(String);

impl OverrideSignature {
    /// Signature of `method` as declared in `class`
    pub fn of(class: &ClassMeta, method: &MethodMeta) -> Self {
        let params = method
            .params()
            .iter()
            .map(|param| param.ty().erasure())
            .collect::<Vec<_>>()
            .join(",");
        let returns = method
            .return_type()
            .map_or_else(|| "()".to_string(), |ty| ty.erasure());
        let bare = format!("{}({}){}", method.name(), params, returns);

        let scoped = if method.is_static() || method.visibility() == Visibility::Private {
            format!("{}#{}", class.name(), bare)
        } else if method.visibility() == Visibility::Package {
            format!("{}/{}", class.package(), bare)
        } else {
            bare
        };
        Self(scoped)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OverrideSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
