use std::path::{Path, PathBuf};

use typegraph_encode::{Graph, GraphConfig};
use typegraph_model::Universe;

use crate::error::CliError;

pub fn read_universe(path: &Path) -> Result<Universe, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::IoError {
        path: path.to_path_buf(),
        operation: "read".to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| CliError::BadUniverse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Imports `packages` (every package of the universe when empty) into the graph
/// at `config.store.path`, dependencies first.
pub fn handle_ingest(config: GraphConfig, universe: &Path, packages: Vec<String>) -> Result<(), CliError> {
    let mut universe = read_universe(universe)?;
    let packages = if packages.is_empty() {
        universe.packages().map(|(_, p)| p.path.clone()).collect()
    } else {
        for path in &packages {
            if universe.package_by_path(path).is_none() {
                return Err(CliError::UnknownPackage(path.clone()));
            }
        }
        packages
    };

    let store_path: PathBuf = config.store.path.clone();
    let mut graph = Graph::open(config)?;
    for path in &packages {
        match graph.import(path, &mut universe)? {
            Some(root) => println!("{path}: {root}"),
            None => println!("{path}: intrinsic"),
        }
    }
    let stats = graph.registry().stats();
    log::info!(
        "{} packages into {}: {} objects, {} types, {} builtin references",
        packages.len(),
        store_path.display(),
        stats.objects,
        stats.types,
        stats.builtins
    );
    graph.close()?;
    Ok(())
}
