//! Package ingestion: the entry point that turns one checked package into one
//! atomic batch of key-value writes.

use rustc_hash::FxHashMap;
use typegraph_kv::KvStore;
use typegraph_model::{PackageId, PackageSource, Universe};

use crate::batch::WriteBatch;
use crate::config::{GraphConfig, IdStrategy};
use crate::encoder::Encoder;
use crate::error::{ConfigError, GraphError, GraphResult};
use crate::keys::Key;
use crate::registry::Registry;

/// Where a package stands from this process's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageState {
    /// Neither ingested by this process nor present in storage.
    Unknown,
    /// Currently being ingested (its imports are being resolved or it is being encoded).
    Ingesting,
    /// Fully ingested by this process.
    InMemory,
    /// Present in storage from an earlier pass.
    OnDisk,
    /// Built into the checker; always present, never written.
    Intrinsic,
}

#[derive(Debug, Clone)]
enum Record {
    Ingesting,
    InMemory { root_scope: Key },
}

/// Encodes packages into a key-value store.
///
/// The registry lives as long as the graph, so an entity shared by several
/// packages ingested through the same graph is written once.
pub struct Graph<S> {
    store: S,
    config: GraphConfig,
    registry: Registry,
    packages: FxHashMap<String, Record>,
    /// Set once a sequential-id graph has seen an empty store before its first write.
    sequence_claimed: bool,
}

impl Graph<typegraph_kv::SqliteStore> {
    /// Opens the SQLite store named by `config.store.path`.
    pub fn open(config: GraphConfig) -> GraphResult<Self> {
        let store = typegraph_kv::SqliteStore::open(&config.store.path)?;
        log::info!("opened graph at {}", config.store.path.display());
        Ok(Graph::new(store, config))
    }

    pub fn close(self) -> GraphResult<()> {
        self.store.close()?;
        Ok(())
    }
}

impl<S: KvStore> Graph<S> {
    pub fn new(store: S, config: GraphConfig) -> Self {
        let registry = Registry::new(config.ingest.ids);
        Graph {
            store,
            config,
            registry,
            packages: FxHashMap::default(),
            sequence_claimed: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn state(&self, path: &str) -> GraphResult<PackageState> {
        if self.config.is_intrinsic(path) {
            return Ok(PackageState::Intrinsic);
        }
        match self.packages.get(path) {
            Some(Record::Ingesting) => Ok(PackageState::Ingesting),
            Some(Record::InMemory { .. }) => Ok(PackageState::InMemory),
            None if self.store.exists(Key::package_name(path).as_bytes())? => Ok(PackageState::OnDisk),
            None => Ok(PackageState::Unknown),
        }
    }

    /// Whether the package needs no ingestion: intrinsic, ingested by this process,
    /// or already in storage.
    pub fn has_package(&self, path: &str) -> GraphResult<bool> {
        Ok(matches!(
            self.state(path)?,
            PackageState::Intrinsic | PackageState::InMemory | PackageState::OnDisk
        ))
    }

    /// The key of the package's root scope node, as recorded in memory or storage.
    pub fn root_scope(&self, path: &str) -> GraphResult<Option<Key>> {
        if let Some(Record::InMemory { root_scope }) = self.packages.get(path) {
            return Ok(Some(root_scope.clone()));
        }
        Ok(self
            .store
            .get(Key::package_scope(path).as_bytes())?
            .map(Key::from_bytes))
    }

    /// Ingests package `pkg` of `universe` unless it is already known, returning
    /// the key of its root scope (`None` for intrinsic packages).
    pub fn insert_package(&mut self, universe: &Universe, pkg: PackageId) -> GraphResult<Option<Key>> {
        let path = &universe
            .package(pkg)
            .ok_or_else(|| GraphError::DanglingReference {
                entity: "package",
                id: pkg.to_string(),
            })?
            .path;
        match self.state(path)? {
            PackageState::Intrinsic => Ok(None),
            PackageState::InMemory | PackageState::OnDisk => self.root_scope(path),
            PackageState::Ingesting => Err(GraphError::ImportCycle { path: path.clone() }),
            PackageState::Unknown => self.ingest(universe, pkg).map(Some),
        }
    }

    /// Resolves an import the way a checker's importer would: memory first, then
    /// storage, and only then the checker itself. The package's own imports are
    /// resolved before it is ingested.
    pub fn import<P: PackageSource + ?Sized>(&mut self, path: &str, source: &mut P) -> GraphResult<Option<Key>> {
        match self.state(path)? {
            PackageState::Intrinsic => return Ok(None),
            PackageState::InMemory => return self.root_scope(path),
            PackageState::OnDisk => {
                log::info!("importing from graph: {path}");
                return self.root_scope(path);
            }
            PackageState::Ingesting => return Err(GraphError::ImportCycle { path: path.to_string() }),
            PackageState::Unknown => {}
        }

        log::info!("loading: {path}");
        self.packages.insert(path.to_string(), Record::Ingesting);
        let result = self.load_and_ingest(path, source);
        if result.is_err() {
            self.packages.remove(path);
        }
        result.map(Some)
    }

    fn load_and_ingest<P: PackageSource + ?Sized>(&mut self, path: &str, source: &mut P) -> GraphResult<Key> {
        let pkg = source.load(path).map_err(|err| GraphError::Upstream {
            path: path.to_string(),
            source: err,
        })?;
        let imports = {
            let universe = source.universe();
            let package = universe.package(pkg).ok_or_else(|| GraphError::DanglingReference {
                entity: "package",
                id: pkg.to_string(),
            })?;
            package
                .imports
                .iter()
                .map(|imp| {
                    universe
                        .package(*imp)
                        .map(|p| p.path.clone())
                        .ok_or_else(|| GraphError::DanglingReference {
                            entity: "package",
                            id: imp.to_string(),
                        })
                })
                .collect::<GraphResult<Vec<_>>>()?
        };
        for imported in &imports {
            self.import(imported, &mut *source)?;
        }
        self.ingest(source.universe(), pkg)
    }

    /// Stages and flushes one package. On any failure the registry forgets what
    /// this pass minted and the package is left unknown, so a retry starts over.
    fn ingest(&mut self, universe: &Universe, pkg: PackageId) -> GraphResult<Key> {
        let package = universe.package(pkg).ok_or_else(|| GraphError::DanglingReference {
            entity: "package",
            id: pkg.to_string(),
        })?;
        let path = package.path.as_str();
        self.claim_sequence()?;
        log::info!("inserting {path}");
        self.packages.insert(path.to_string(), Record::Ingesting);

        let result = self.stage_and_flush(universe, pkg);
        match &result {
            Ok(root_scope) => {
                let stats = self.registry.stats();
                log::debug!(
                    "{path}: committed {} registry entries (totals: {} objects, {} types, {} builtins)",
                    self.registry.pending(),
                    stats.objects,
                    stats.types,
                    stats.builtins
                );
                self.registry.commit();
                self.packages.insert(
                    path.to_string(),
                    Record::InMemory {
                        root_scope: root_scope.clone(),
                    },
                );
            }
            Err(err) => {
                let dropped = self.registry.rollback();
                log::error!("failed to insert {path}: {err}; dropped {dropped} registry entries");
                self.packages.remove(path);
            }
        }
        result
    }

    /// Sequential ids restart at 1 in every process while type keys are global, so
    /// they are only sound when this graph is the store's first writer.
    fn claim_sequence(&mut self) -> GraphResult<()> {
        if self.config.ingest.ids != IdStrategy::Sequential || self.sequence_claimed {
            return Ok(());
        }
        if !self.store.is_empty()? {
            log::error!("refusing to mint sequential ids into a populated store");
            return Err(ConfigError::SequentialIdsOnPopulatedStore.into());
        }
        self.sequence_claimed = true;
        Ok(())
    }

    fn stage_and_flush(&mut self, universe: &Universe, pkg: PackageId) -> GraphResult<Key> {
        let package = universe.package(pkg).ok_or_else(|| GraphError::DanglingReference {
            entity: "package",
            id: pkg.to_string(),
        })?;
        let path = package.path.as_str();
        let mut batch = WriteBatch::new();

        for imported in &package.imports {
            let imported = universe.package(*imported).ok_or_else(|| GraphError::DanglingReference {
                entity: "package",
                id: imported.to_string(),
            })?;
            batch.set(Key::package_import(path, &imported.path), Vec::new());
        }
        batch.set(Key::package_name(path), package.name.as_bytes());

        let root_scope = Encoder::new(universe, &mut self.registry, &mut batch).scope(path, package.scope)?;
        batch.set(Key::package_scope(path), root_scope.as_bytes());

        log::debug!("{path}: flushing {} staged entries", batch.len());
        self.store.write_batch(batch.into_entries())?;
        Ok(root_scope)
    }
}
