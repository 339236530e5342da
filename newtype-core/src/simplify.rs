//! Desugaring of `case` expressions.
//!
//! A case over N arms becomes a right-nested chain of extends
//! conditionals: arm k tests the scrutinee against its pattern and
//! falls through to arm k+1, with `never` after the last arm unless
//! a wildcard `_` arm supplies the default. The
//! scrutinee is simplified once and cloned into each test, so nested
//! cases inside it are eliminated exactly once.

use crate::ast::{CaseArm, CompareOp, Expr, ObjectProperty, Program, Statement};

pub fn simplify_program(program: &Program) -> Program {
    Program {
        statements: program.statements.iter().map(simplify_statement).collect(),
    }
}

pub fn simplify_statement(statement: &Statement) -> Statement {
    match statement {
        Statement::Import { .. } | Statement::Export => statement.clone(),
        Statement::TypeDef { name, params, body } => Statement::TypeDef {
            name: name.clone(),
            params: params.clone(),
            body: simplify(body),
        },
        Statement::InterfaceDef {
            name,
            params,
            extends,
            props,
        } => Statement::InterfaceDef {
            name: name.clone(),
            params: params.clone(),
            extends: extends.iter().map(simplify).collect(),
            props: props.iter().map(simplify_property).collect(),
        },
    }
}

/// Rewrite an expression bottom-up, eliminating every `Case` node.
pub fn simplify(expr: &Expr) -> Expr {
    match expr {
        Expr::String(_)
        | Expr::Int(_)
        | Expr::Double(_)
        | Expr::Bool(_)
        | Expr::Ident(_)
        | Expr::Infer(_) => expr.clone(),
        Expr::ObjectLiteral(props) => {
            Expr::ObjectLiteral(props.iter().map(simplify_property).collect())
        }
        Expr::Application(name, args) => {
            Expr::Application(name.clone(), args.iter().map(simplify).collect())
        }
        Expr::Tuple(elements) => Expr::Tuple(elements.iter().map(simplify).collect()),
        Expr::Union(lhs, rhs) => {
            Expr::Union(Box::new(simplify(lhs)), Box::new(simplify(rhs)))
        }
        Expr::Intersection(lhs, rhs) => {
            Expr::Intersection(Box::new(simplify(lhs)), Box::new(simplify(rhs)))
        }
        Expr::Extends {
            lhs,
            negate,
            op,
            rhs,
            if_body,
            else_body,
        } => Expr::Extends {
            lhs: Box::new(simplify(lhs)),
            negate: *negate,
            op: *op,
            rhs: Box::new(simplify(rhs)),
            if_body: Box::new(simplify(if_body)),
            else_body: Box::new(simplify(else_body)),
        },
        Expr::Case { scrutinee, arms } => desugar_case(&simplify(scrutinee), arms),
    }
}

fn simplify_property(prop: &ObjectProperty) -> ObjectProperty {
    ObjectProperty {
        readonly: prop.readonly,
        optional: prop.optional,
        key: prop.key.clone(),
        value: simplify(&prop.value),
    }
}

/// Fold the arms from the last one backwards so the chain nests in
/// the else-branches. A wildcard `_` arm is the default: its body is
/// the final else-branch instead of `never` and it contributes no
/// test of its own. Only the first wildcard is the default.
fn desugar_case(scrutinee: &Expr, arms: &[CaseArm]) -> Expr {
    let mut arms: Vec<&CaseArm> = arms.iter().collect();
    let fallback = match arms.iter().position(|arm| is_wildcard(&arm.pattern)) {
        Some(idx) => simplify(&arms.remove(idx).body),
        None => Expr::never(),
    };
    arms.into_iter().rev().fold(fallback, |rest, arm| {
        arm_to_conditional(scrutinee, arm, rest)
    })
}

fn is_wildcard(pattern: &Expr) -> bool {
    matches!(pattern, Expr::Ident(name) if name == "_")
}

fn arm_to_conditional(scrutinee: &Expr, arm: &CaseArm, rest: Expr) -> Expr {
    Expr::Extends {
        lhs: Box::new(scrutinee.clone()),
        negate: false,
        op: CompareOp::ExtendsLeft,
        rhs: Box::new(simplify(&arm.pattern)),
        if_body: Box::new(simplify(&arm.body)),
        else_body: Box::new(rest),
    }
}
