use typegraph_encode::{Graph, GraphConfig, GraphResult};
use typegraph_kv::KvStore;

use crate::error::CliError;

pub fn handle_has(config: GraphConfig, path: &str) -> Result<(), CliError> {
    let graph = Graph::open(config)?;
    println!("{path}: {}", presence(&graph, path)?);
    graph.close()?;
    Ok(())
}

/// How `path` stands in the graph, as printed by `typegraph has`.
pub fn presence<S: KvStore>(graph: &Graph<S>, path: &str) -> GraphResult<String> {
    if graph.config().is_intrinsic(path) {
        return Ok("intrinsic".to_string());
    }
    if !graph.has_package(path)? {
        return Ok("unknown".to_string());
    }
    Ok(match graph.root_scope(path)? {
        Some(root) => format!("stored (root scope {root})"),
        None => "stored".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use typegraph_encode::IdStrategy;
    use typegraph_kv::MemoryStore;
    use typegraph_model::Universe;

    #[test]
    fn presence_of_each_kind_of_package() {
        let mut u = Universe::new();
        let pkg = u.new_package("x/p", "p");
        let mut config = GraphConfig::default();
        config.ingest.ids = IdStrategy::Sequential;
        let mut graph = Graph::new(MemoryStore::new(), config);

        assert_eq!(presence(&graph, "x/p").unwrap(), "unknown");
        assert_eq!(presence(&graph, "unsafe").unwrap(), "intrinsic");

        graph.insert_package(&u, pkg).unwrap();
        assert_eq!(
            presence(&graph, "x/p").unwrap(),
            "stored (root scope pkgs/x/p\\0scopes/00000000-0000-0000-0000-000000000001)"
        );

        let reopened = Graph::new(graph.into_store(), GraphConfig::default());
        assert_eq!(
            presence(&reopened, "x/p").unwrap(),
            "stored (root scope pkgs/x/p\\0scopes/00000000-0000-0000-0000-000000000001)"
        );
    }
}
