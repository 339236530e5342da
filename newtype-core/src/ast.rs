//! Abstract syntax tree for Newtype programs.
//!
//! Pure data: nodes are built once by the parser, rewritten (never
//! mutated in place) by the desugaring pass, and consumed by the
//! renderer. Equality exists for tests only.

/// An ordered sequence of statements. Empty programs are valid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Import {
        clause: ImportClause,
        /// Module source, the string literal after `from`.
        source: String,
    },
    /// Marker only; renders to nothing.
    Export,
    TypeDef {
        name: String,
        params: Vec<String>,
        body: Expr,
    },
    InterfaceDef {
        name: String,
        params: Vec<String>,
        extends: Vec<Expr>,
        props: Vec<ObjectProperty>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportClause {
    Default(String),
    Namespace(String),
    Named(Vec<ImportSpecifier>),
    DefaultAndNamespace(String, String),
    DefaultAndNamed(String, Vec<ImportSpecifier>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    Named(String),
    Renamed { from: String, to: String },
}

/// The comparison of an extends-conditional.
///
/// `ExtendsRight`, `Equals` and `NotEquals` are kept distinct rather
/// than rewritten at parse time; the renderer is the single place
/// that interprets them in terms of `ExtendsLeft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    ExtendsLeft,
    ExtendsRight,
    Equals,
    NotEquals,
}

/// Tri-state property modifier: no annotation, `readonly`/`?`, or the
/// explicit negative `-readonly`/`-?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modifier {
    #[default]
    Unset,
    Add,
    Remove,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub readonly: Modifier,
    pub optional: Modifier,
    pub key: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseArm {
    pub pattern: Expr,
    pub body: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    String(String),
    Int(String),
    Double(String),
    Bool(bool),
    ObjectLiteral(Vec<ObjectProperty>),
    /// Application of a named generic to argument expressions. Zero
    /// arguments renders as the bare name.
    Application(String, Vec<Expr>),
    Ident(String),
    /// A binding introduced inside a conditional, `?name` in surface
    /// syntax, `infer name` in the rendering.
    Infer(String),
    Tuple(Vec<Expr>),
    Extends {
        lhs: Box<Expr>,
        /// Swaps the branches at render time; kept unevaluated so the
        /// parsed comparison direction stays inspectable.
        negate: bool,
        op: CompareOp,
        rhs: Box<Expr>,
        if_body: Box<Expr>,
        else_body: Box<Expr>,
    },
    Union(Box<Expr>, Box<Expr>),
    Intersection(Box<Expr>, Box<Expr>),
    /// Surface-only multi-arm dispatch; always eliminated by
    /// desugaring before rendering.
    Case {
        scrutinee: Box<Expr>,
        arms: Vec<CaseArm>,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Ident(name.into())
    }

    /// The implicit else-branch of conditionals without an `else`
    /// clause and of the final case arm.
    pub fn never() -> Expr {
        Expr::Ident("never".to_string())
    }
}
