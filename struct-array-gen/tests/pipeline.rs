use struct_array_gen::merge::PROLOGUE;
use struct_array_gen::{Error, Generator, Manifest, MemorySink, OUTPUT_FILE_NAME};

fn manifest(text: &str) -> Manifest {
    Manifest::parse(text, "pipeline.toml").unwrap()
}

#[test]
fn concrete_scenario() {
    let manifest = manifest(
        r#"
        [[struct_array]]
        name = "Vec3Storage"
        namespace = "Geometry"
        size = 3
        "#,
    );
    let text = Generator::new().generate(&manifest).unwrap().unwrap();

    assert!(text.starts_with(PROLOGUE));
    assert!(text.contains("pub mod geometry {"));
    assert!(text.contains("    pub struct Vec3Storage<T> {"));
    assert!(text.contains("        pub const LENGTH: usize = 3;"));
    for slot in 0..3 {
        assert!(text.contains(&format!("        _value{slot}: T,")));
    }
    assert!(!text.contains("_value3"));
}

#[test]
fn requests_merge_into_one_document() {
    let manifest = manifest(
        r#"
        [[struct_array]]
        name = "A"
        namespace = "merge"
        size = 2

        [[struct_array]]
        name = "B"
        namespace = "merge"
        size = 4
        "#,
    );
    let mut sink = MemorySink::default();
    let count = Generator::new().run(&manifest, &mut sink).unwrap();

    assert_eq!(count, 2);
    assert_eq!(sink.sources.len(), 1);
    let (name, text) = &sink.sources[0];
    assert_eq!(name, OUTPUT_FILE_NAME);
    assert_eq!(text.matches(PROLOGUE).count(), 1);
    assert_eq!(text.matches("pub mod merge {").count(), 1);
    assert!(text.contains("pub struct A<T> {"));
    assert!(text.contains("pub struct B<T> {"));
}

#[test]
fn single_worker_output_is_reproducible() {
    let manifest = manifest(
        r#"
        [[struct_array]]
        name = "Zeta"
        namespace = "order"
        size = 1

        [[struct_array]]
        name = "Alpha"
        namespace = "order"
        size = 5

        [[struct_array]]
        name = "Mid"
        namespace = "order.inner"
        size = 8
        "#,
    );
    let generator = Generator::new().workers(1);
    let first = generator.generate(&manifest).unwrap().unwrap();
    let second = generator.generate(&manifest).unwrap().unwrap();
    assert_eq!(first, second);

    // Discovery order is kept within a namespace.
    let zeta = first.find("pub struct Zeta<T>").unwrap();
    let alpha = first.find("pub struct Alpha<T>").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn zero_size_is_suppressed() {
    let manifest = manifest(
        r#"
        [[struct_array]]
        name = "On"
        namespace = "toggles"
        size = 2

        [[struct_array]]
        name = "Off"
        namespace = "toggles"
        size = 0
        "#,
    );
    let text = Generator::new().generate(&manifest).unwrap().unwrap();
    assert!(text.contains("pub struct On<T>"));
    assert!(!text.contains("Off"));
}

#[test]
fn nothing_tagged_registers_no_source() {
    let mut sink = MemorySink::default();
    let count = Generator::new()
        .run(&manifest("[generator]\nworkers = 2\n"), &mut sink)
        .unwrap();
    assert_eq!(count, 0);
    assert!(sink.sources.is_empty());
}

#[test]
fn schema_violation_names_the_entry() {
    let manifest = manifest(
        r#"
        [[struct_array]]
        name = "Ok"
        namespace = "m"
        size = 2

        [[struct_array]]
        name = "Broken"
        namespace = "m"
        size = "2"
        "#,
    );
    let err = Generator::new().generate(&manifest).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));
    assert_eq!(
        err.to_string(),
        "invalid #[struct_array::struct_array] on `manifest: [[struct_array]] #2`: \
         argument 2 must be an integer, found a string"
    );
}

#[test]
fn type_named_like_the_element_parameter_is_rejected() {
    let manifest = manifest(
        r#"
        [[struct_array]]
        name = "T"
        namespace = "clash"
        size = 2
        "#,
    );
    let err = Generator::new().generate(&manifest).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid #[struct_array::struct_array] on `manifest: [[struct_array]] #1`: \
         `T` is not a valid type name"
    );
}

#[test]
fn duplicate_declarations_fail_the_pass() {
    let manifest = manifest(
        r#"
        [[struct_array]]
        name = "Twice"
        namespace = "dup"
        size = 2

        [[struct_array]]
        name = "Twice"
        namespace = "dup"
        size = 3
        "#,
    );
    let err = Generator::new().generate(&manifest).unwrap_err();
    assert_eq!(err.to_string(), "struct array `dup::Twice` is declared more than once");
}

#[test]
fn extra_derives_reach_every_type() {
    let manifest = manifest(
        r#"
        [generator]
        extra_derives = ["::serde::Serialize"]

        [[struct_array]]
        name = "A"
        namespace = ""
        size = 1

        [[struct_array]]
        name = "B"
        namespace = "b"
        size = 1
        "#,
    );
    let text = Generator::from_config(&manifest.generator)
        .generate(&manifest)
        .unwrap()
        .unwrap();
    assert_eq!(text.matches(", ::serde::Serialize)]").count(), 2);
}
