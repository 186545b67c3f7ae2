use crate::error::{SourceError, SourceResult};
use crate::ids::PackageId;
use crate::universe::Universe;

/// The type-checking collaborator as seen by an import resolver.
///
/// `load` is asked for a package only when the package is neither known in memory
/// nor already present in storage. A successful load must return a fully checked
/// package living in [`PackageSource::universe`].
pub trait PackageSource {
    fn load(&mut self, path: &str) -> SourceResult<PackageId>;

    fn universe(&self) -> &Universe;
}

/// A universe that was checked up front serves its own packages.
impl PackageSource for Universe {
    fn load(&mut self, path: &str) -> SourceResult<PackageId> {
        self.package_by_path(path)
            .ok_or_else(|| SourceError::PackageNotFound(path.to_string()))
    }

    fn universe(&self) -> &Universe {
        self
    }
}
