//! Rendering of the AST into canonical conditional-type syntax.
//!
//! Total over well-formed trees: every variant has a rendering rule
//! and none of them can fail. The comparison operators are interpreted
//! here and nowhere else: `negate` swaps the branches, `:>` swaps the
//! operands, `==` wraps both sides in singleton tuples, and `!=` does
//! the tuple wrapping and swaps the branches. `case` is desugared
//! before rendering, so it never reaches the target syntax directly.

use crate::ast::{
    CompareOp, Expr, ImportClause, ImportSpecifier, Modifier, ObjectProperty, Program, Statement,
};
use crate::doc::Doc;
use crate::simplify;

/// Render a whole program. Statements are separated by single line
/// breaks, export markers contribute nothing, and the output ends
/// with a newline unless it is empty.
pub fn render_program(program: &Program) -> String {
    let docs: Vec<Doc> = program
        .statements
        .iter()
        .filter(|s| !matches!(s, Statement::Export))
        .map(statement_doc)
        .collect();
    if docs.is_empty() {
        return String::new();
    }
    let mut out = Doc::join(docs, Doc::Hard).print(None);
    out.push('\n');
    out
}

pub fn render_statement(statement: &Statement) -> String {
    statement_doc(statement).print(None)
}

pub fn render_expr(expr: &Expr) -> String {
    expr_doc(expr).print(None)
}

/// Like [`render_expr`] but with a target width, so groups break when
/// they would overflow it.
pub fn render_expr_width(expr: &Expr, width: usize) -> String {
    expr_doc(expr).print(Some(width))
}

fn statement_doc(statement: &Statement) -> Doc {
    match statement {
        Statement::Export => Doc::Nil,
        Statement::Import { clause, source } => {
            Doc::text(format!("import {} from \"{source}\"", clause_text(clause)))
        }
        Statement::TypeDef { name, params, body } => {
            let mut header = format!("type {name}");
            header.push_str(&param_list(params));
            header.push_str(" =");
            // `=` stays attached to the name; a breaking body moves
            // onto its own indented line.
            Doc::group(Doc::concat(vec![
                Doc::text(header),
                Doc::nest(Doc::concat(vec![Doc::line(), expr_doc(body)])),
            ]))
        }
        Statement::InterfaceDef {
            name,
            params,
            extends,
            props,
        } => {
            let mut header = format!("interface {name}");
            header.push_str(&param_list(params));
            if !extends.is_empty() {
                let list: Vec<String> = extends.iter().map(render_expr).collect();
                header.push_str(&format!(" extends {}", list.join(", ")));
            }
            if props.is_empty() {
                return Doc::text(format!("{header} {{}}"));
            }
            let mut body = Vec::new();
            for prop in props {
                body.push(Doc::Hard);
                body.push(property_doc(prop));
                body.push(Doc::text(";"));
            }
            Doc::concat(vec![
                Doc::text(header),
                Doc::text(" {"),
                Doc::nest(Doc::concat(body)),
                Doc::Hard,
                Doc::text("}"),
            ])
        }
    }
}

fn param_list(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("<{}>", params.join(", "))
    }
}

fn clause_text(clause: &ImportClause) -> String {
    match clause {
        ImportClause::Default(name) => name.clone(),
        ImportClause::Namespace(name) => format!("* as {name}"),
        ImportClause::Named(specifiers) => specifier_list(specifiers),
        ImportClause::DefaultAndNamespace(default, name) => format!("{default}, * as {name}"),
        ImportClause::DefaultAndNamed(default, specifiers) => {
            format!("{default}, {}", specifier_list(specifiers))
        }
    }
}

fn specifier_list(specifiers: &[ImportSpecifier]) -> String {
    if specifiers.is_empty() {
        return "{}".to_string();
    }
    let parts: Vec<String> = specifiers
        .iter()
        .map(|s| match s {
            ImportSpecifier::Named(name) => name.clone(),
            ImportSpecifier::Renamed { from, to } => format!("{from} as {to}"),
        })
        .collect();
    format!("{{ {} }}", parts.join(", "))
}

fn expr_doc(expr: &Expr) -> Doc {
    match expr {
        Expr::String(text) => Doc::text(format!("\"{text}\"")),
        Expr::Int(text) | Expr::Double(text) => Doc::text(text.clone()),
        Expr::Bool(value) => Doc::text(if *value { "true" } else { "false" }),
        Expr::Ident(name) => Doc::text(name.clone()),
        Expr::Infer(name) => Doc::text(format!("infer {name}")),
        Expr::Application(name, args) => {
            if args.is_empty() {
                return Doc::text(name.clone());
            }
            let parts: Vec<Doc> = args.iter().map(expr_doc).collect();
            Doc::concat(vec![
                Doc::text(format!("{name}<")),
                Doc::join(parts, Doc::text(", ")),
                Doc::text(">"),
            ])
        }
        Expr::Tuple(elements) => {
            let parts: Vec<Doc> = elements.iter().map(expr_doc).collect();
            Doc::concat(vec![
                Doc::text("["),
                Doc::join(parts, Doc::text(", ")),
                Doc::text("]"),
            ])
        }
        Expr::ObjectLiteral(props) => object_doc(props),
        Expr::Union(_, _) => chain_doc(expr),
        Expr::Intersection(_, _) => chain_doc(expr),
        Expr::Extends {
            lhs,
            negate,
            op,
            rhs,
            if_body,
            else_body,
        } => extends_doc(lhs, *negate, *op, rhs, if_body, else_body),
        Expr::Case { .. } => expr_doc(&simplify::simplify(expr)),
    }
}

fn object_doc(props: &[ObjectProperty]) -> Doc {
    if props.is_empty() {
        return Doc::text("{}");
    }
    let mut inner = Vec::new();
    for (i, prop) in props.iter().enumerate() {
        if i > 0 {
            inner.push(Doc::text(","));
        }
        inner.push(Doc::line());
        inner.push(property_doc(prop));
    }
    Doc::group(Doc::concat(vec![
        Doc::text("{"),
        Doc::nest(Doc::concat(inner)),
        Doc::line(),
        Doc::text("}"),
    ]))
}

fn property_doc(prop: &ObjectProperty) -> Doc {
    let mut text = String::new();
    match prop.readonly {
        Modifier::Unset => {}
        Modifier::Add => text.push_str("readonly "),
        Modifier::Remove => text.push_str("-readonly "),
    }
    text.push_str(&prop.key);
    match prop.optional {
        Modifier::Unset => {}
        Modifier::Add => text.push('?'),
        Modifier::Remove => text.push_str("-?"),
    }
    text.push_str(": ");
    Doc::concat(vec![Doc::text(text), expr_doc(&prop.value)])
}

/// A left-associative `|` or `&` chain as one group: flat with spaced
/// operators, or one operand per line with the operator leading each
/// continuation line. The leftmost operand is parenthesized when it is
/// the other chain operator.
fn chain_doc(expr: &Expr) -> Doc {
    let (sep, parts) = match expr {
        Expr::Union(_, _) => {
            let mut parts = Vec::new();
            flatten_union(expr, &mut parts);
            ("| ", parts)
        }
        Expr::Intersection(_, _) => {
            let mut parts = Vec::new();
            flatten_intersection(expr, &mut parts);
            ("& ", parts)
        }
        _ => unreachable!("chain_doc is only called on unions and intersections"),
    };
    let other_op = |part: &Expr| match expr {
        Expr::Union(_, _) => matches!(part, Expr::Intersection(_, _)),
        _ => matches!(part, Expr::Union(_, _)),
    };
    let mut docs = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            docs.push(Doc::line());
            docs.push(Doc::text(sep));
        }
        if i == 0 && other_op(part) {
            docs.push(Doc::concat(vec![
                Doc::text("("),
                expr_doc(part),
                Doc::text(")"),
            ]));
        } else {
            docs.push(expr_doc(part));
        }
    }
    Doc::group(Doc::concat(docs))
}

fn flatten_union<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::Union(lhs, rhs) => {
            flatten_union(lhs, out);
            out.push(rhs);
        }
        _ => out.push(expr),
    }
}

fn flatten_intersection<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::Intersection(lhs, rhs) => {
            flatten_intersection(lhs, out);
            out.push(rhs);
        }
        _ => out.push(expr),
    }
}

fn extends_doc(
    lhs: &Expr,
    negate: bool,
    op: CompareOp,
    rhs: &Expr,
    if_body: &Expr,
    else_body: &Expr,
) -> Doc {
    let mut lhs = lhs.clone();
    let mut rhs = rhs.clone();
    let mut then_branch = if_body.clone();
    let mut else_branch = else_body.clone();
    if negate {
        std::mem::swap(&mut then_branch, &mut else_branch);
    }
    match op {
        CompareOp::ExtendsLeft => {}
        CompareOp::ExtendsRight => std::mem::swap(&mut lhs, &mut rhs),
        CompareOp::Equals => {
            lhs = Expr::Tuple(vec![lhs]);
            rhs = Expr::Tuple(vec![rhs]);
        }
        CompareOp::NotEquals => {
            lhs = Expr::Tuple(vec![lhs]);
            rhs = Expr::Tuple(vec![rhs]);
            std::mem::swap(&mut then_branch, &mut else_branch);
        }
    }
    Doc::concat(vec![
        expr_doc(&lhs),
        Doc::text(" extends "),
        expr_doc(&rhs),
        Doc::text(" ? "),
        expr_doc(&then_branch),
        Doc::text(" : "),
        expr_doc(&else_branch),
    ])
}
