use newtype_core::parser::parse;
use pretty_assertions::assert_eq;

fn first_error(src: &str) -> (u32, u32, String) {
    match parse(src) {
        Ok(program) => panic!("expected parse to fail, got {program:?}"),
        Err(err) => err.triples().remove(0),
    }
}

#[test]
fn body_may_continue_on_a_deeper_line() {
    let src = "type T =\n  string\n";
    let flat = parse("type T = string").unwrap();
    assert_eq!(parse(src).unwrap(), flat);
}

#[test]
fn dedented_body_is_an_indentation_error() {
    let (line, column, message) = first_error("type T =\nstring\n");
    assert_eq!((line, column), (2, 1));
    assert_eq!(
        message,
        "incorrect indentation (got 1, should be greater than 1)"
    );
}

#[test]
fn indented_statement_keyword_continues_the_previous_body() {
    // `type` is contextual: indented under the first body it reads as
    // an application argument, not as a new statement
    use newtype_core::ast::{Expr, Statement};
    let program = parse("type A = F\n  type").unwrap();
    assert_eq!(program.statements.len(), 1);
    let Statement::TypeDef { body, .. } = &program.statements[0] else {
        panic!("expected a type definition");
    };
    assert_eq!(
        *body,
        Expr::Application("F".into(), vec![Expr::ident("type")])
    );
}

#[test]
fn statement_at_column_one_ends_the_previous_body() {
    let src = "type A = string\ntype B = number\n";
    let program = parse(src).unwrap();
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn union_continuation_lines_must_be_indented() {
    let ok = parse("type T =\n  A\n  | B\n").unwrap();
    let flat = parse("type T = A | B").unwrap();
    assert_eq!(ok, flat);

    let (line, column, message) = first_error("type T = A |\nB\n");
    assert_eq!((line, column), (2, 1));
    assert_eq!(
        message,
        "incorrect indentation (got 1, should be greater than 1)"
    );
}

#[test]
fn indentation_error_cites_the_anchor_column() {
    // statement anchored at column 3, continuation also at column 3
    let (_, _, message) = first_error("  type T =\n  x =\n");
    assert_eq!(
        message,
        "incorrect indentation (got 3, should be greater than 3)"
    );
}

#[test]
fn blank_lines_are_insignificant() {
    let spaced = "\n\ntype A = string\n\n\n\ntype B = number\n\n";
    let tight = "type A = string\ntype B = number";
    assert_eq!(parse(spaced).unwrap(), parse(tight).unwrap());

    let rendered_spaced = newtype_core::compile(spaced).unwrap();
    let rendered_tight = newtype_core::compile(tight).unwrap();
    assert_eq!(rendered_spaced, rendered_tight);
}

#[test]
fn case_arm_body_ends_where_the_next_arm_begins() {
    let src = concat!(
        "type T = case x of\n",
        "  string ->\n",
        "    1\n",
        "  number -> 2\n",
    );
    let inline = "type T = case x of string -> 1 number -> 2";
    assert_eq!(parse(src).unwrap(), parse(inline).unwrap());
}

#[test]
fn case_arms_end_at_a_dedent() {
    let src = concat!(
        "type T = case x of\n",
        "  string -> 1\n",
        "type U = number\n",
    );
    let program = parse(src).unwrap();
    assert_eq!(program.statements.len(), 2);
}
