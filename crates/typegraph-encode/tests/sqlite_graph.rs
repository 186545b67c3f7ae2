use tempfile::TempDir;
use typegraph_encode::{ConfigError, Graph, GraphConfig, GraphError, IdStrategy, Key, PackageState};
use typegraph_kv::KvStore;
use typegraph_model::{ConstValue, Type, Universe};

fn config(dir: &TempDir) -> GraphConfig {
    let mut config = GraphConfig::default();
    config.store.path = dir.path().join("graph").join("typegraph.db");
    config.ingest.ids = IdStrategy::Sequential;
    config
}

fn universe() -> Universe {
    let mut u = Universe::new();
    let pkg = u.new_package("x/p", "p");
    let root = u.package(pkg).unwrap().scope;
    let string = u.basic("untyped string");
    let greeting = u.new_const(pkg, "Greeting", string, ConstValue::String("hello".into()));
    u.insert(root, greeting);
    u
}

#[test]
fn packages_survive_reopening() {
    let dir = TempDir::new().unwrap();
    let mut u = universe();

    let mut graph = Graph::open(config(&dir)).unwrap();
    let root = graph.import("x/p", &mut u).unwrap().unwrap();
    assert_eq!(graph.store().len().unwrap(), 4);
    graph.close().unwrap();

    let mut graph = Graph::open(config(&dir)).unwrap();
    assert_eq!(graph.state("x/p").unwrap(), PackageState::OnDisk);
    assert_eq!(graph.root_scope("x/p").unwrap(), Some(root.clone()));
    let pkg = u.package_by_path("x/p").unwrap();
    assert_eq!(graph.insert_package(&u, pkg).unwrap(), Some(root));
    assert_eq!(graph.store().len().unwrap(), 4);
    assert_eq!(
        graph.store().get(Key::package_name("x/p").as_bytes()).unwrap(),
        Some(b"p".to_vec())
    );
}

/// `x/q` declares `var xs []int`; `x/p` declares `var m map[string]string`.
fn two_packages() -> Universe {
    let mut u = Universe::new();
    let q = u.new_package("x/q", "q");
    let int = u.basic("int");
    let ints = u.new_type(Type::Slice { elem: int });
    let xs = u.new_var(q, "xs", ints);
    let root = u.package(q).unwrap().scope;
    u.insert(root, xs);

    let p = u.new_package("x/p", "p");
    let string = u.basic("string");
    let map = u.new_type(Type::Map { key: string, elem: string });
    let m = u.new_var(p, "m", map);
    let root = u.package(p).unwrap().scope;
    u.insert(root, m);
    u
}

/// Values under `types/<n>` for sequentially minted ids `ns`.
fn stored(graph: &Graph<typegraph_kv::SqliteStore>, ns: &[u128]) -> Vec<Option<Vec<u8>>> {
    ns.iter()
        .map(|n| {
            let key = format!("types/00000000-0000-0000-0000-{n:012}");
            graph.store().get(key.as_bytes()).unwrap()
        })
        .collect()
}

#[test]
fn sequential_ids_never_overwrite_an_earlier_process() {
    let dir = TempDir::new().unwrap();
    let mut u = two_packages();

    let mut graph = Graph::open(config(&dir)).unwrap();
    graph.import("x/q", &mut u).unwrap();
    let before = stored(&graph, &[3]);
    assert!(before[0].is_some());
    let entries = graph.store().len().unwrap();
    graph.close().unwrap();

    let mut graph = Graph::open(config(&dir)).unwrap();
    let err = graph.import("x/p", &mut u).unwrap_err();
    assert!(
        matches!(err, GraphError::Config(ConfigError::SequentialIdsOnPopulatedStore)),
        "{err:?}"
    );
    assert_eq!(graph.state("x/p").unwrap(), PackageState::Unknown);
    assert_eq!(graph.state("x/q").unwrap(), PackageState::OnDisk);
    assert_eq!(stored(&graph, &[3]), before);
    assert_eq!(graph.store().len().unwrap(), entries);
    graph.close().unwrap();

    // Random ids are safe to mix into the same store.
    let mut random = config(&dir);
    random.ingest.ids = IdStrategy::Random;
    let mut graph = Graph::open(random).unwrap();
    assert!(graph.import("x/p", &mut u).unwrap().is_some());
    assert_eq!(stored(&graph, &[3]), before);
}

#[test]
fn sequential_ids_keep_writing_into_a_store_they_started() {
    let dir = TempDir::new().unwrap();
    let mut u = two_packages();

    let mut graph = Graph::open(config(&dir)).unwrap();
    graph.import("x/q", &mut u).unwrap();
    graph.import("x/p", &mut u).unwrap();
    assert_eq!(graph.state("x/p").unwrap(), PackageState::InMemory);
    // Scope, declaration, then type for each package: the slice is 3, the map 6.
    let types = stored(&graph, &[3, 6]);
    assert_eq!(types[0].as_deref().map(|v| v[1]), Some(7));
    assert_eq!(types[1].as_deref().map(|v| v[1]), Some(13));
}
