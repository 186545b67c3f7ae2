//! The arena that owns every entity of a checked program.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::constant::ConstValue;
use crate::ids::{ObjectId, PackageId, ScopeId, TypeId};
use crate::objects::{Object, ObjectKind};
use crate::scope::{Package, Scope};
use crate::types::Type;

/// Name of the basic type given to package-name declarations, which have no
/// meaningful type of their own.
pub const INVALID_TYPE: &str = "invalid type";

/// Owner of all objects, types, scopes and packages produced by one type-checking run.
///
/// Entities are appended and never removed, so an id stays valid for the lifetime
/// of the universe. The only mutations after creation are the ones needed to close
/// cycles: [`Universe::set_underlying`], [`Universe::add_method`] and scope insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "UniverseData", into = "UniverseData")]
pub struct Universe {
    objects: Vec<Object>,
    types: Vec<Type>,
    scopes: Vec<Scope>,
    packages: Vec<Package>,

    // Indices rebuilt from the vectors above; not part of the serialized form.
    basics: FxHashMap<String, TypeId>,
    builtin_names: FxHashMap<String, ObjectId>,
    by_path: FxHashMap<String, PackageId>,
}

/// Serialized shape of a [`Universe`].
#[derive(Serialize, Deserialize)]
struct UniverseData {
    #[serde(default)]
    objects: Vec<Object>,
    #[serde(default)]
    types: Vec<Type>,
    #[serde(default)]
    scopes: Vec<Scope>,
    #[serde(default)]
    packages: Vec<Package>,
}

impl From<UniverseData> for Universe {
    fn from(data: UniverseData) -> Self {
        let mut universe = Universe {
            objects: data.objects,
            types: data.types,
            scopes: data.scopes,
            packages: data.packages,
            ..Default::default()
        };
        universe.reindex();
        universe
    }
}

impl From<Universe> for UniverseData {
    fn from(universe: Universe) -> Self {
        UniverseData {
            objects: universe.objects,
            types: universe.types,
            scopes: universe.scopes,
            packages: universe.packages,
        }
    }
}

impl Universe {
    pub fn new() -> Self {
        Self::default()
    }

    fn reindex(&mut self) {
        self.basics.clear();
        self.builtin_names.clear();
        self.by_path.clear();
        for (i, ty) in self.types.iter().enumerate() {
            if let Type::Basic { name } = ty {
                self.basics.entry(name.clone()).or_insert(TypeId(i as u32));
            }
        }
        for (i, obj) in self.objects.iter().enumerate() {
            if obj.is_builtin() && obj.kind == ObjectKind::TypeName {
                self.builtin_names.entry(obj.name.clone()).or_insert(ObjectId(i as u32));
            }
        }
        for (i, pkg) in self.packages.iter().enumerate() {
            self.by_path.insert(pkg.path.clone(), PackageId(i as u32));
        }
    }

    // --- Lookup ---

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.index())
    }

    pub fn ty(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.index())
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.packages.get(id.index())
    }

    pub fn package_by_path(&self, path: &str) -> Option<PackageId> {
        self.by_path.get(path).copied()
    }

    pub fn packages(&self) -> impl Iterator<Item = (PackageId, &Package)> {
        self.packages
            .iter()
            .enumerate()
            .map(|(i, p)| (PackageId(i as u32), p))
    }

    pub fn num_objects(&self) -> usize {
        self.objects.len()
    }

    pub fn num_types(&self) -> usize {
        self.types.len()
    }

    // --- Construction ---

    /// Creates a package together with its (empty) root scope. A later package with
    /// the same path shadows the earlier one in [`Universe::package_by_path`].
    pub fn new_package(&mut self, path: impl Into<String>, name: impl Into<String>) -> PackageId {
        let scope = self.push_scope(Scope::default());
        let path = path.into();
        let id = PackageId(self.packages.len() as u32);
        self.by_path.insert(path.clone(), id);
        self.packages.push(Package {
            path,
            name: name.into(),
            imports: Vec::new(),
            scope,
        });
        id
    }

    pub fn add_import(&mut self, pkg: PackageId, imported: PackageId) {
        if let Some(p) = self.packages.get_mut(pkg.index()) {
            if !p.imports.contains(&imported) {
                p.imports.push(imported);
            }
        }
    }

    /// Creates a scope nested in `parent` and appends it to the parent's children.
    pub fn new_scope(&mut self, parent: ScopeId) -> ScopeId {
        let id = self.push_scope(Scope {
            parent: Some(parent),
            ..Default::default()
        });
        if let Some(p) = self.scopes.get_mut(parent.index()) {
            p.children.push(id);
        }
        id
    }

    fn push_scope(&mut self, scope: Scope) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(scope);
        id
    }

    /// Binds `obj` under its own name in `scope`, returning the binding it replaced.
    pub fn insert(&mut self, scope: ScopeId, obj: ObjectId) -> Option<ObjectId> {
        let name = self.objects.get(obj.index())?.name.clone();
        self.scopes.get_mut(scope.index())?.bindings.insert(name, obj)
    }

    pub fn new_object(&mut self, obj: Object) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        if obj.is_builtin() && obj.kind == ObjectKind::TypeName {
            self.builtin_names.entry(obj.name.clone()).or_insert(id);
        }
        self.objects.push(obj);
        id
    }

    pub fn new_type(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        if let Type::Basic { name } = &ty {
            self.basics.entry(name.clone()).or_insert(id);
        }
        self.types.push(ty);
        id
    }

    /// The basic type called `name`, created on first use.
    pub fn basic(&mut self, name: &str) -> TypeId {
        match self.basics.get(name) {
            Some(id) => *id,
            None => self.new_type(Type::Basic { name: name.to_string() }),
        }
    }

    /// The universe-scope type name declaring the basic type `name`.
    pub fn builtin_type_name(&mut self, name: &str) -> ObjectId {
        if let Some(id) = self.builtin_names.get(name) {
            return *id;
        }
        let ty = self.basic(name);
        self.new_object(Object {
            name: name.to_string(),
            package: None,
            ty,
            kind: ObjectKind::TypeName,
        })
    }

    /// Declares a defined type in `package`. The returned type has no underlying
    /// type yet; call [`Universe::set_underlying`] once its components exist.
    pub fn new_named(&mut self, package: PackageId, name: impl Into<String>) -> (ObjectId, TypeId) {
        let obj = ObjectId(self.objects.len() as u32);
        let ty = self.new_type(Type::Named {
            underlying: None,
            obj,
            methods: Vec::new(),
        });
        let created = self.new_object(Object {
            name: name.into(),
            package: Some(package),
            ty,
            kind: ObjectKind::TypeName,
        });
        debug_assert_eq!(obj, created);
        (obj, ty)
    }

    /// Sets the underlying type of a named type. Returns `false` if `named` is not
    /// a named type.
    pub fn set_underlying(&mut self, named: TypeId, underlying: TypeId) -> bool {
        match self.types.get_mut(named.index()) {
            Some(Type::Named { underlying: slot, .. }) => {
                *slot = Some(underlying);
                true
            }
            _ => false,
        }
    }

    /// Appends a method declaration to a named type. Returns `false` if `named` is
    /// not a named type.
    pub fn add_method(&mut self, named: TypeId, func: ObjectId) -> bool {
        match self.types.get_mut(named.index()) {
            Some(Type::Named { methods, .. }) => {
                methods.push(func);
                true
            }
            _ => false,
        }
    }

    // --- Convenience constructors for package-scoped declarations ---

    pub fn new_var(&mut self, package: PackageId, name: impl Into<String>, ty: TypeId) -> ObjectId {
        self.declare(package, name, ty, ObjectKind::Var)
    }

    pub fn new_func(&mut self, package: PackageId, name: impl Into<String>, sig: TypeId) -> ObjectId {
        self.declare(package, name, sig, ObjectKind::Func)
    }

    pub fn new_const(
        &mut self,
        package: PackageId,
        name: impl Into<String>,
        ty: TypeId,
        value: ConstValue,
    ) -> ObjectId {
        self.declare(package, name, ty, ObjectKind::Const(value))
    }

    pub fn new_pkg_name(
        &mut self,
        package: PackageId,
        name: impl Into<String>,
        imported: PackageId,
    ) -> ObjectId {
        let ty = self.basic(INVALID_TYPE);
        self.declare(package, name, ty, ObjectKind::PkgName { imported })
    }

    fn declare(&mut self, package: PackageId, name: impl Into<String>, ty: TypeId, kind: ObjectKind) -> ObjectId {
        self.new_object(Object {
            name: name.into(),
            package: Some(package),
            ty,
            kind,
        })
    }

    pub fn tuple(&mut self, vars: Vec<ObjectId>) -> TypeId {
        self.new_type(Type::Tuple { vars })
    }

    /// Creates a signature with fresh parameter and result tuples.
    pub fn signature(
        &mut self,
        params: Vec<ObjectId>,
        results: Vec<ObjectId>,
        recv: Option<ObjectId>,
        variadic: bool,
    ) -> TypeId {
        let params = self.tuple(params);
        let results = self.tuple(results);
        self.new_type(Type::Signature {
            params,
            results,
            recv,
            variadic,
        })
    }
}
