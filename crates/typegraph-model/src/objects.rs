use serde::{Deserialize, Serialize};

use crate::constant::ConstValue;
use crate::ids::{PackageId, TypeId};

/// A declaration: a named program entity with a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    /// Owning package. `None` for universe-scope (built-in) declarations such as
    /// the type names of primitive types.
    pub package: Option<PackageId>,
    pub ty: TypeId,
    pub kind: ObjectKind,
}

impl Object {
    pub fn is_builtin(&self) -> bool {
        self.package.is_none()
    }
}

/// The closed set of declaration kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Func,
    Var,
    TypeName,
    Const(ConstValue),
    /// A local name for an imported package.
    PkgName { imported: PackageId },
}

impl ObjectKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ObjectKind::Func => "func",
            ObjectKind::Var => "var",
            ObjectKind::TypeName => "type name",
            ObjectKind::Const(_) => "const",
            ObjectKind::PkgName { .. } => "package name",
        }
    }
}
