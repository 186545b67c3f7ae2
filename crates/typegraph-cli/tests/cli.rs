use std::{fs, path::Path, process::Command};

use tempfile::TempDir;
use typegraph_model::{ConstValue, Universe};

/// `x/p` declares `const Answer = 42` and imports `x/q`, which is empty.
fn write_universe(dir: &Path) {
    let mut u = Universe::new();
    let q = u.new_package("x/q", "q");
    let p = u.new_package("x/p", "p");
    u.add_import(p, q);
    let root = u.package(p).unwrap().scope;
    let int = u.basic("untyped int");
    let answer = u.new_const(p, "Answer", int, ConstValue::Int(42));
    u.insert(root, answer);
    fs::write(dir.join("universe.json"), serde_json::to_string(&u).unwrap()).unwrap();
}

fn setup() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temporary directory");
    fs::write(
        dir.path().join("typegraph.toml"),
        r#"
[store]
path = "out/graph.db"

[ingest]
ids = "sequential"
"#,
    )
    .unwrap();
    write_universe(dir.path());
    dir
}

fn typegraph(dir: &Path, args: &[&str]) -> (bool, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_typegraph"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run typegraph");
    (output.status.success(), String::from_utf8_lossy(&output.stdout).into_owned())
}

#[test]
fn ingest_then_query() {
    let dir = setup();

    let (ok, out) = typegraph(dir.path(), &["ingest", "universe.json", "--package", "x/p"]);
    assert!(ok, "{out}");
    assert_eq!(
        out,
        "x/p: pkgs/x/p\\0scopes/00000000-0000-0000-0000-000000000002\n"
    );
    assert!(dir.path().join("out/graph.db").is_file());

    let (ok, out) = typegraph(dir.path(), &["has", "x/q"]);
    assert!(ok);
    assert_eq!(
        out,
        "x/q: stored (root scope pkgs/x/q\\0scopes/00000000-0000-0000-0000-000000000001)\n"
    );

    let (ok, out) = typegraph(dir.path(), &["has", "x/none"]);
    assert!(ok);
    assert_eq!(out, "x/none: unknown\n");

    let (ok, out) = typegraph(dir.path(), &["has", "unsafe"]);
    assert!(ok);
    assert_eq!(out, "unsafe: intrinsic\n");

    let (ok, out) = typegraph(dir.path(), &["show", r"pkgs/x/p\0name"]);
    assert!(ok);
    assert_eq!(out, "pkgs/x/p\\0name: \"p\"\n");
}

#[test]
fn sequential_ingest_refuses_a_populated_store() {
    let dir = setup();
    let (ok, _) = typegraph(dir.path(), &["ingest", "universe.json", "--package", "x/q"]);
    assert!(ok);
    let (ok, _) = typegraph(dir.path(), &["ingest", "universe.json", "--package", "x/p"]);
    assert!(!ok);
    let (ok, out) = typegraph(dir.path(), &["has", "x/p"]);
    assert!(ok);
    assert_eq!(out, "x/p: unknown\n");
}

#[test]
fn unknown_packages_are_rejected() {
    let dir = setup();
    let (ok, _) = typegraph(dir.path(), &["ingest", "universe.json", "--package", "x/nope"]);
    assert!(!ok);
    let (ok, _) = typegraph(dir.path(), &["show", "types/none"]);
    assert!(!ok);
}
