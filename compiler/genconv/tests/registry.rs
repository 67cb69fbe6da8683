//! Method registry behavior: termination, reuse and duplicates.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use genconv::{
    DuplicatePolicy, GenerateError, Generator, GeneratorConfig, MethodRequest, Signature, TypeTable,
};
use genconv_types::{Field, Ty};
use pretty_assertions::assert_eq;

const IN: &str = "example.com/in";
const OUT: &str = "example.com/out";

/// `type A struct { Bs []B }` and `type B struct { As []A }` on both sides.
fn mutual(table: &mut TypeTable) -> (Ty, Ty) {
    for path in [IN, OUT] {
        table.define(
            path,
            "A",
            Ty::structure(vec![Field::new("Bs", Ty::slice(Ty::named(path, "B")))]),
        );
        table.define(
            path,
            "B",
            Ty::structure(vec![Field::new("As", Ty::slice(Ty::named(path, "A")))]),
        );
    }
    (Ty::named(IN, "A"), Ty::named(OUT, "A"))
}

#[test]
fn mutually_recursive_types_build_two_methods() {
    let mut table = TypeTable::new();
    let (a_in, a_out) = mutual(&mut table);
    let mut generator = Generator::new(&table, GeneratorConfig::default());
    generator
        .register(MethodRequest::new("ConvertA", a_in, a_out))
        .unwrap();
    let output = generator.render().unwrap();

    let names: Vec<&str> = generator.methods().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["BToB", "ConvertA"]);
    assert!(output.contains("\t\taList[i] = c.ConvertA(source.As[i])\n"));
    assert!(output.contains("\t\tbList[i] = c.BToB(source.Bs[i])\n"));
}

#[test]
fn each_method_is_built_once() {
    let mut table = TypeTable::new();
    let (a_in, a_out) = mutual(&mut table);
    let mut generator = Generator::new(&table, GeneratorConfig::default());
    generator
        .register(MethodRequest::new("ConvertA", a_in, a_out))
        .unwrap();
    generator
        .register(MethodRequest::new(
            "ConvertBs",
            Ty::slice(Ty::named(IN, "B")),
            Ty::slice(Ty::named(OUT, "B")),
        ))
        .unwrap();
    let output = generator.render().unwrap();

    assert_eq!(generator.len(), 3);
    assert_eq!(output.matches("func (c *ConverterImpl) BToB(").count(), 1);
    assert_eq!(output.matches("func (c *ConverterImpl) ConvertA(").count(), 1);
}

#[test]
fn rendering_is_deterministic() {
    let mut table = TypeTable::new();
    let (a_in, a_out) = mutual(&mut table);
    let render = || {
        let mut generator = Generator::new(&table, GeneratorConfig::default());
        generator
            .register(MethodRequest::new("ConvertA", a_in.clone(), a_out.clone()))
            .unwrap();
        generator
            .register(MethodRequest::new("Back", a_out.clone(), a_in.clone()))
            .unwrap();
        generator.render().unwrap()
    };
    let first = render();
    for _ in 0..8 {
        assert_eq!(render(), first);
    }
}

#[test]
fn duplicate_signature_overwrites_by_default() {
    let table = TypeTable::new();
    let mut generator = Generator::new(&table, GeneratorConfig::default());
    generator
        .register(MethodRequest::new("First", Ty::INT, Ty::INT))
        .unwrap();
    generator
        .register(MethodRequest::new("Second", Ty::INT, Ty::INT))
        .unwrap();
    let output = generator.render().unwrap();

    assert_eq!(generator.len(), 1);
    assert_eq!(
        generator.get(&Signature::new(&Ty::INT, &Ty::INT)).unwrap().name,
        "Second"
    );
    assert!(output.contains("func (c *ConverterImpl) Second(source int) int {\n\treturn source\n}\n"));
    assert!(!output.contains("First"));
}

#[test]
fn duplicate_signature_can_be_rejected() {
    let table = TypeTable::new();
    let config = GeneratorConfig::default().with_duplicate_policy(DuplicatePolicy::Reject);
    let mut generator = Generator::new(&table, config);
    generator
        .register(MethodRequest::new("First", Ty::INT, Ty::INT))
        .unwrap();
    let err = generator
        .register(MethodRequest::new("Second", Ty::INT, Ty::INT))
        .unwrap_err();

    assert_eq!(
        err,
        GenerateError::DuplicateSignature {
            method: "Second".to_string(),
            existing: "First".to_string(),
            source_type: "int".to_string(),
            target_type: "int".to_string(),
        }
    );
    assert_eq!(generator.methods()[0].name, "First");
}

#[test]
fn signatures_are_ordered_pairs() {
    let table = TypeTable::new();
    let config = GeneratorConfig::default().with_duplicate_policy(DuplicatePolicy::Reject);
    let mut generator = Generator::new(&table, config);
    let id = Ty::named(IN, "ID");
    generator
        .register(MethodRequest::new("To", Ty::INT, id.clone()))
        .unwrap();
    generator
        .register(MethodRequest::new("From", id, Ty::INT))
        .unwrap();
    assert_eq!(generator.len(), 2);
}

#[test]
fn deep_unnamed_nesting_does_not_overflow() {
    // Build, print and drop on a thread with a fixed 8MB stack.
    let output = std::thread::Builder::new()
        .stack_size(8 * 1024 * 1024)
        .spawn(|| {
            let table = TypeTable::new();
            let mut source = Ty::INT;
            let mut target = Ty::INT;
            for _ in 0..1000 {
                source = Ty::slice(source);
                target = Ty::slice(target);
            }
            genconv::generate(
                &table,
                GeneratorConfig::default(),
                [MethodRequest::new("Deep", source, target)],
            )
            .unwrap()
        })
        .unwrap()
        .join()
        .unwrap();
    assert!(output.contains("func (c *ConverterImpl) Deep("));
    // Eight single-letter indices, then `index`, `index1`, ... for the rest.
    assert!(output.contains("for index991 := 0;"));
}
