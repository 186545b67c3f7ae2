use typegraph_model::*;

fn sample() -> Universe {
    let mut u = Universe::new();
    let pkg = u.new_package("x/geom", "geom");
    let root = u.package(pkg).unwrap().scope;
    let float = u.basic("float64");
    let pi = u.new_const(pkg, "Pi", float, ConstValue::Float(Rational::from_integer(3)));
    u.insert(root, pi);
    let (point, named) = u.new_named(pkg, "Point");
    let x = u.new_var(pkg, "X", float);
    let st = u.new_type(Type::Struct {
        fields: vec![Field { var: x, tag: "json:\"x\"".into() }],
    });
    u.set_underlying(named, st);
    u.insert(root, point);
    u
}

#[test]
fn universe_survives_a_json_round_trip() {
    let u = sample();
    let json = serde_json::to_string(&u).unwrap();
    let back: Universe = serde_json::from_str(&json).unwrap();
    assert_eq!(back, u);
}

#[test]
fn indices_are_rebuilt_after_deserializing() {
    let json = serde_json::to_string(&sample()).unwrap();
    let mut back: Universe = serde_json::from_str(&json).unwrap();
    let pkg = back.package_by_path("x/geom").expect("package index rebuilt");
    assert_eq!(back.package(pkg).unwrap().name, "geom");

    let types_before = back.num_types();
    back.basic("float64");
    assert_eq!(back.num_types(), types_before, "basic type memo rebuilt");
}

#[test]
fn universe_serves_its_own_packages() {
    let mut u = sample();
    assert!(u.load("x/geom").is_ok());
    assert_eq!(
        u.load("x/missing"),
        Err(SourceError::PackageNotFound("x/missing".into()))
    );
}
