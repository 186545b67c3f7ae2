mod common;

use common::{dump, memory_graph};
use expect_test::expect;
use typegraph_model::{Type, Universe};

#[test]
fn slice_variable_layout() {
    let mut u = Universe::new();
    let pkg = u.new_package("x/p", "p");
    let root = u.package(pkg).unwrap().scope;
    let int = u.basic("int");
    let ints = u.new_type(Type::Slice { elem: int });
    let xs = u.new_var(pkg, "xs", ints);
    u.insert(root, xs);

    let mut graph = memory_graph();
    graph.insert_package(&u, pkg).unwrap();

    expect![[r#"
        pkgs/x/p\0name = "p"
        pkgs/x/p\0objects/00000000-0000-0000-0000-000000000002 = ["xs", [01], "types/00000000-0000-0000-0000-000000000003"]
        pkgs/x/p\0scope = "pkgs/x/p\0scopes/00000000-0000-0000-0000-000000000001"
        pkgs/x/p\0scopes/00000000-0000-0000-0000-000000000001 = [[01], "pkgs/x/p\0objects/00000000-0000-0000-0000-000000000002", [00]]
        types/00000000-0000-0000-0000-000000000003 = [[07], "builtin/int"]
    "#]]
    .assert_eq(&dump(graph.store()));
}
