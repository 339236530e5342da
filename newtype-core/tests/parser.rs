use newtype_core::ast::*;
use newtype_core::parser::{parse, parse_interface};
use pretty_assertions::assert_eq;

fn parse_ok(src: &str) -> Program {
    match parse(src) {
        Ok(program) => program,
        Err(err) => panic!("expected parse to succeed, got {err:?}"),
    }
}

fn first_message(src: &str) -> String {
    match parse(src) {
        Ok(program) => panic!("expected parse to fail, got {program:?}"),
        Err(err) => err.triples().remove(0).2,
    }
}

#[test]
fn empty_program_has_no_statements() {
    assert_eq!(parse_ok(""), Program::default());
    assert_eq!(parse_ok("\n  \n\n"), Program::default());
}

#[test]
fn type_definition_with_params() {
    let program = parse_ok("type Pair a b = [a, b]");
    assert_eq!(
        program.statements,
        vec![Statement::TypeDef {
            name: "Pair".into(),
            params: vec!["a".into(), "b".into()],
            body: Expr::Tuple(vec![Expr::ident("a"), Expr::ident("b")]),
        }]
    );
}

#[test]
fn application_arguments_parse_at_elevated_precedence() {
    // A (B true) {} is one application with two arguments
    let program = parse_ok("type T = A (B true) {}");
    let Statement::TypeDef { body, .. } = &program.statements[0] else {
        panic!("expected a type definition");
    };
    assert_eq!(
        *body,
        Expr::Application(
            "A".into(),
            vec![
                Expr::Application("B".into(), vec![Expr::Bool(true)]),
                Expr::ObjectLiteral(vec![]),
            ]
        )
    );
}

#[test]
fn bare_argument_identifiers_do_not_consume_arguments() {
    let program = parse_ok("type T = A B C");
    let Statement::TypeDef { body, .. } = &program.statements[0] else {
        panic!("expected a type definition");
    };
    assert_eq!(
        *body,
        Expr::Application("A".into(), vec![Expr::ident("B"), Expr::ident("C")])
    );
}

#[test]
fn intersection_binds_tighter_than_union() {
    let program = parse_ok("type T = A | B & C");
    let Statement::TypeDef { body, .. } = &program.statements[0] else {
        panic!("expected a type definition");
    };
    assert_eq!(
        *body,
        Expr::Union(
            Box::new(Expr::ident("A")),
            Box::new(Expr::Intersection(
                Box::new(Expr::ident("B")),
                Box::new(Expr::ident("C")),
            )),
        )
    );
}

#[test]
fn conditional_without_else_defaults_to_never() {
    let program = parse_ok("type T = if a <: b then c");
    let Statement::TypeDef { body, .. } = &program.statements[0] else {
        panic!("expected a type definition");
    };
    assert_eq!(
        *body,
        Expr::Extends {
            lhs: Box::new(Expr::ident("a")),
            negate: false,
            op: CompareOp::ExtendsLeft,
            rhs: Box::new(Expr::ident("b")),
            if_body: Box::new(Expr::ident("c")),
            else_body: Box::new(Expr::never()),
        }
    );
}

#[test]
fn conditional_operators_and_negation() {
    for (src, negate, op) in [
        ("type T = if not a <: b then c", true, CompareOp::ExtendsLeft),
        ("type T = if a :> b then c", false, CompareOp::ExtendsRight),
        ("type T = if a == b then c", false, CompareOp::Equals),
        ("type T = if a != b then c", false, CompareOp::NotEquals),
    ] {
        let program = parse_ok(src);
        let Statement::TypeDef { body, .. } = &program.statements[0] else {
            panic!("expected a type definition");
        };
        let Expr::Extends {
            negate: n, op: o, ..
        } = body
        else {
            panic!("expected a conditional in {src}");
        };
        assert_eq!((*n, *o), (negate, op), "{src}");
    }
}

#[test]
fn infer_binding_inside_conditional() {
    let program = parse_ok("type Unwrap x = if x <: Array ?t then t else x");
    let Statement::TypeDef { body, .. } = &program.statements[0] else {
        panic!("expected a type definition");
    };
    let Expr::Extends { rhs, .. } = body else {
        panic!("expected a conditional");
    };
    assert_eq!(
        **rhs,
        Expr::Application("Array".into(), vec![Expr::Infer("t".into())])
    );
}

#[test]
fn case_collects_inline_arms() {
    let program = parse_ok("type T = case x of string -> 1");
    let Statement::TypeDef { body, .. } = &program.statements[0] else {
        panic!("expected a type definition");
    };
    assert_eq!(
        *body,
        Expr::Case {
            scrutinee: Box::new(Expr::ident("x")),
            arms: vec![CaseArm {
                pattern: Expr::ident("string"),
                body: Expr::Int("1".into()),
            }],
        }
    );
}

#[test]
fn import_clause_shapes() {
    let program = parse_ok(concat!(
        "import React from \"react\"\n",
        "import * as fs from \"fs\"\n",
        "import { a, b as c } from \"m\"\n",
        "import D, * as ns from \"n\"\n",
        "import D, { x } from \"o\"\n",
    ));
    let clauses: Vec<&ImportClause> = program
        .statements
        .iter()
        .map(|s| match s {
            Statement::Import { clause, .. } => clause,
            other => panic!("expected an import, got {other:?}"),
        })
        .collect();
    assert_eq!(*clauses[0], ImportClause::Default("React".into()));
    assert_eq!(*clauses[1], ImportClause::Namespace("fs".into()));
    assert_eq!(
        *clauses[2],
        ImportClause::Named(vec![
            ImportSpecifier::Named("a".into()),
            ImportSpecifier::Renamed {
                from: "b".into(),
                to: "c".into()
            },
        ])
    );
    assert_eq!(
        *clauses[3],
        ImportClause::DefaultAndNamespace("D".into(), "ns".into())
    );
    assert_eq!(
        *clauses[4],
        ImportClause::DefaultAndNamed("D".into(), vec![ImportSpecifier::Named("x".into())])
    );
}

#[test]
fn export_is_a_bare_marker() {
    let program = parse_ok("export\ntype A = string");
    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.statements[0], Statement::Export);
}

#[test]
fn reserved_word_cannot_name_a_type() {
    let message = first_message("type if = string");
    assert_eq!(
        message,
        "keyword `if` is reserved and cannot be used as an identifier"
    );
}

#[test]
fn first_error_aborts_the_parse() {
    let err = parse("type = string\ntype = number").unwrap_err();
    assert_eq!(err.triples().len(), 1);
}

#[test]
fn interface_has_its_own_entry_point() {
    let statement = parse_interface(concat!(
        "interface User a extends Base where\n",
        "  name: string\n",
        "  age?: number\n",
    ))
    .unwrap();
    assert_eq!(
        statement,
        Statement::InterfaceDef {
            name: "User".into(),
            params: vec!["a".into()],
            extends: vec![Expr::ident("Base")],
            props: vec![
                ObjectProperty {
                    readonly: Modifier::Unset,
                    optional: Modifier::Unset,
                    key: "name".into(),
                    value: Expr::ident("string"),
                },
                ObjectProperty {
                    readonly: Modifier::Unset,
                    optional: Modifier::Add,
                    key: "age".into(),
                    value: Expr::ident("number"),
                },
            ],
        }
    );
}

#[test]
fn interface_property_readonly_modifier() {
    let statement =
        parse_interface("interface Frozen where\n  readonly id: string\n").unwrap();
    let Statement::InterfaceDef { props, .. } = statement else {
        panic!("expected an interface");
    };
    assert_eq!(props[0].readonly, Modifier::Add);
}
