//! Parser for Newtype surface syntax.
//!
//! Recursive descent over the token stream with an operator-precedence
//! layer for the infix type operators (`&` binds tighter than `|`,
//! both left-associative). Layout is enforced with anchors: every
//! statement records the position of its first token, and a token on a
//! later line belongs to the statement only if its column is strictly
//! greater than the anchor column. Where the grammar requires a token
//! and the next one is dedented, parsing fails with an indentation
//! error naming the offending and required columns. Case arms push
//! their own anchor so an arm body ends where the next arm begins.
//!
//! The first error aborts the parse; there is no recovery and no
//! partial AST.

use crate::ast::*;
use crate::diagnostic::Diagnostic;
use crate::error::CoreError;
use crate::lexer::{self, Token, TokenKind, describe};
use crate::span::Pos;

/// Parse a whole program: zero or more statements until end of input.
pub fn parse(source: &str) -> Result<Program, CoreError> {
    let lex = lexer::lex(source);
    if !lex.diagnostics.is_empty() {
        return Err(CoreError::Parse(lex.diagnostics));
    }
    let mut parser = Parser::new(lex.tokens);
    match parser.parse_program() {
        Some(program) if parser.diagnostics.is_empty() => Ok(program),
        _ => Err(CoreError::Parse(parser.diagnostics)),
    }
}

/// Parse a single interface definition.
///
/// The top-level statement grammar does not produce interfaces; this
/// is their dedicated entry point.
pub fn parse_interface(source: &str) -> Result<Statement, CoreError> {
    let lex = lexer::lex(source);
    if !lex.diagnostics.is_empty() {
        return Err(CoreError::Parse(lex.diagnostics));
    }
    let mut parser = Parser::new(lex.tokens);
    let statement = parser.parse_interface_def();
    match statement {
        Some(statement) if parser.diagnostics.is_empty() && parser.at_eof() => Ok(statement),
        Some(_) if parser.diagnostics.is_empty() => {
            let diag = parser.unexpected("end of input");
            Err(CoreError::from_diagnostic(diag))
        }
        _ => Err(CoreError::Parse(parser.diagnostics)),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
    /// Layout anchors, innermost last. Tokens below the innermost
    /// anchor's line must sit strictly right of its column.
    anchors: Vec<Pos>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Parser {
        Parser {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
            anchors: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn parse_program(&mut self) -> Option<Program> {
        let mut statements = Vec::new();
        while !self.at_eof() {
            statements.push(self.parse_statement()?);
        }
        Some(Program { statements })
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.peek_kind() {
            Some(TokenKind::KwImport) => self.parse_import(),
            Some(TokenKind::Ident(name)) if name == "export" => {
                self.advance();
                Some(Statement::Export)
            }
            Some(TokenKind::Ident(name)) if name == "type" => self.parse_type_def(),
            _ => {
                let diag = self.unexpected("a statement");
                self.diagnostics.push(diag);
                None
            }
        }
    }

    fn parse_type_def(&mut self) -> Option<Statement> {
        let anchor = self.next()?.span.start; // `type`
        self.with_anchor(anchor, |p| {
            let name = p.expect_ident()?;
            let mut params = Vec::new();
            while p.visible() && matches!(p.peek_kind(), Some(TokenKind::Ident(_))) {
                params.push(p.expect_ident()?);
            }
            p.expect(&TokenKind::Equal)?;
            let body = p.parse_expr()?;
            Some(Statement::TypeDef { name, params, body })
        })
    }

    fn parse_import(&mut self) -> Option<Statement> {
        let anchor = self.next()?.span.start; // `import`
        self.with_anchor(anchor, |p| {
            let clause = p.parse_import_clause()?;
            p.expect(&TokenKind::KwFrom)?;
            let source = p.expect_string()?;
            Some(Statement::Import { clause, source })
        })
    }

    fn parse_import_clause(&mut self) -> Option<ImportClause> {
        self.guard()?;
        match self.peek_kind() {
            Some(TokenKind::Star) => {
                self.advance();
                self.expect(&TokenKind::KwAs)?;
                Some(ImportClause::Namespace(self.expect_ident()?))
            }
            Some(TokenKind::LBrace) => Some(ImportClause::Named(self.parse_import_specifiers()?)),
            Some(TokenKind::Ident(_)) => {
                let default = self.expect_ident()?;
                if !self.consume_if(&TokenKind::Comma) {
                    return Some(ImportClause::Default(default));
                }
                self.guard()?;
                match self.peek_kind() {
                    Some(TokenKind::Star) => {
                        self.advance();
                        self.expect(&TokenKind::KwAs)?;
                        let namespace = self.expect_ident()?;
                        Some(ImportClause::DefaultAndNamespace(default, namespace))
                    }
                    Some(TokenKind::LBrace) => {
                        let specifiers = self.parse_import_specifiers()?;
                        Some(ImportClause::DefaultAndNamed(default, specifiers))
                    }
                    _ => {
                        let diag = self.unexpected("`*` or `{` after the default binding");
                        self.diagnostics.push(diag);
                        None
                    }
                }
            }
            _ => {
                let diag = self.unexpected("an import clause");
                self.diagnostics.push(diag);
                None
            }
        }
    }

    fn parse_import_specifiers(&mut self) -> Option<Vec<ImportSpecifier>> {
        self.expect(&TokenKind::LBrace)?;
        let mut specifiers = Vec::new();
        if self.consume_if(&TokenKind::RBrace) {
            return Some(specifiers);
        }
        loop {
            let from = self.expect_ident()?;
            let specifier = if self.consume_if(&TokenKind::KwAs) {
                let to = self.expect_ident()?;
                ImportSpecifier::Renamed { from, to }
            } else {
                ImportSpecifier::Named(from)
            };
            specifiers.push(specifier);
            if self.consume_if(&TokenKind::Comma) {
                if self.check(&TokenKind::RBrace) {
                    break;
                }
                continue;
            }
            break;
        }
        self.expect(&TokenKind::RBrace)?;
        Some(specifiers)
    }

    fn parse_interface_def(&mut self) -> Option<Statement> {
        self.guard()?;
        if !self.check_word("interface") {
            let diag = self.unexpected("`interface`");
            self.diagnostics.push(diag);
            return None;
        }
        let anchor = self.next()?.span.start;
        self.with_anchor(anchor, |p| {
            let name = p.expect_ident()?;
            let mut params = Vec::new();
            while p.visible()
                && matches!(p.peek_kind(), Some(TokenKind::Ident(n))
                    if n != "extends" && n != "where")
            {
                params.push(p.expect_ident()?);
            }
            let mut extends = Vec::new();
            if p.check_word("extends") {
                p.advance();
                loop {
                    extends.push(p.parse_expr()?);
                    if !p.consume_if(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            p.expect_word("where")?;
            let mut props = Vec::new();
            while p.visible() && p.prop_start() {
                props.push(p.parse_anchored_property()?);
            }
            Some(Statement::InterfaceDef {
                name,
                params,
                extends,
                props,
            })
        })
    }

    fn prop_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(TokenKind::Ident(_)) | Some(TokenKind::KwReadonly)
        )
    }

    /// An interface property on its own layout anchor, so a multiline
    /// value ends where the next property begins.
    fn parse_anchored_property(&mut self) -> Option<ObjectProperty> {
        let anchor = self.peek()?.span.start;
        self.with_anchor(anchor, |p| p.parse_property())
    }

    fn parse_property(&mut self) -> Option<ObjectProperty> {
        let readonly = if self.consume_if(&TokenKind::KwReadonly) {
            Modifier::Add
        } else {
            Modifier::Unset
        };
        let key = self.expect_ident()?;
        let optional = if self.consume_if(&TokenKind::Question) {
            Modifier::Add
        } else {
            Modifier::Unset
        };
        self.expect(&TokenKind::Colon)?;
        let value = self.parse_expr()?;
        Some(ObjectProperty {
            readonly,
            optional,
            key,
            value,
        })
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_union()
    }

    fn parse_union(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_intersection()?;
        while self.visible() && self.check(&TokenKind::Pipe) {
            self.advance();
            let rhs = self.parse_intersection()?;
            lhs = Expr::Union(Box::new(lhs), Box::new(rhs));
        }
        Some(lhs)
    }

    fn parse_intersection(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_term()?;
        while self.visible() && self.check(&TokenKind::Ampersand) {
            self.advance();
            let rhs = self.parse_term()?;
            lhs = Expr::Intersection(Box::new(lhs), Box::new(rhs));
        }
        Some(lhs)
    }

    /// A term: a type application, a conditional, or any primary
    /// expression. Application arguments are parsed at elevated
    /// precedence so `A B C` is three-part application while
    /// `A (B C)` nests.
    fn parse_term(&mut self) -> Option<Expr> {
        self.guard()?;
        match self.peek_kind() {
            Some(TokenKind::Ident(name)) if name == "case" => self.parse_case(),
            Some(TokenKind::Ident(_)) => {
                let name = self.expect_ident()?;
                let mut args = Vec::new();
                while self.arg_start() {
                    args.push(self.parse_arg()?);
                }
                if args.is_empty() {
                    Some(Expr::Ident(name))
                } else {
                    Some(Expr::Application(name, args))
                }
            }
            Some(TokenKind::KwIf) => self.parse_conditional(),
            _ => self.parse_arg(),
        }
    }

    /// An application argument: like a term, but a bare identifier
    /// does not consume further arguments.
    fn parse_arg(&mut self) -> Option<Expr> {
        self.guard()?;
        match self.peek_kind() {
            Some(TokenKind::Ident(_)) => Some(Expr::Ident(self.expect_ident()?)),
            Some(TokenKind::IntLiteral(text)) => {
                self.advance();
                Some(Expr::Int(text))
            }
            Some(TokenKind::DoubleLiteral(text)) => {
                self.advance();
                Some(Expr::Double(text))
            }
            Some(TokenKind::StringLiteral(text)) => {
                self.advance();
                Some(Expr::String(text))
            }
            Some(TokenKind::BoolLiteral(value)) => {
                self.advance();
                Some(Expr::Bool(value))
            }
            Some(TokenKind::Question) => {
                self.advance();
                Some(Expr::Infer(self.expect_ident()?))
            }
            Some(TokenKind::LParen) => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Some(expr)
            }
            Some(TokenKind::LBracket) => self.parse_tuple(),
            Some(TokenKind::LBrace) => self.parse_object_literal(),
            _ => {
                let diag = self.unexpected("an expression");
                self.diagnostics.push(diag);
                None
            }
        }
    }

    /// Does the next token start an application argument? `of` never
    /// does; it closes a case scrutinee instead.
    fn arg_start(&self) -> bool {
        if !self.visible() {
            return false;
        }
        match self.peek_kind() {
            Some(TokenKind::Ident(name)) => name != "of",
            Some(
                TokenKind::IntLiteral(_)
                | TokenKind::DoubleLiteral(_)
                | TokenKind::StringLiteral(_)
                | TokenKind::BoolLiteral(_)
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::Question,
            ) => true,
            _ => false,
        }
    }

    fn parse_conditional(&mut self) -> Option<Expr> {
        self.advance(); // `if`
        let negate = if self.check_word("not") {
            self.advance();
            true
        } else {
            false
        };
        let lhs = self.parse_expr()?;
        let op = self.parse_compare_op()?;
        let rhs = self.parse_expr()?;
        self.expect(&TokenKind::KwThen)?;
        let if_body = self.parse_expr()?;
        let else_body = if self.visible() && self.consume_if(&TokenKind::KwElse) {
            self.parse_expr()?
        } else {
            Expr::never()
        };
        Some(Expr::Extends {
            lhs: Box::new(lhs),
            negate,
            op,
            rhs: Box::new(rhs),
            if_body: Box::new(if_body),
            else_body: Box::new(else_body),
        })
    }

    fn parse_compare_op(&mut self) -> Option<CompareOp> {
        self.guard()?;
        let op = match self.peek_kind() {
            Some(TokenKind::ExtendsLeft) => CompareOp::ExtendsLeft,
            Some(TokenKind::ExtendsRight) => CompareOp::ExtendsRight,
            Some(TokenKind::EqEq) => CompareOp::Equals,
            Some(TokenKind::NotEq) => CompareOp::NotEquals,
            _ => {
                let diag = self.unexpected("a comparison operator (`<:`, `:>`, `==` or `!=`)");
                self.diagnostics.push(diag);
                return None;
            }
        };
        self.advance();
        Some(op)
    }

    fn parse_case(&mut self) -> Option<Expr> {
        self.advance(); // `case`
        let scrutinee = self.parse_arg()?;
        self.expect_word("of")?;
        let mut arms = Vec::new();
        while self.visible() && (self.arg_start() || self.check(&TokenKind::KwIf)) {
            arms.push(self.parse_case_arm()?);
        }
        if arms.is_empty() {
            let diag = self.unexpected("at least one case arm");
            self.diagnostics.push(diag);
            return None;
        }
        Some(Expr::Case {
            scrutinee: Box::new(scrutinee),
            arms,
        })
    }

    fn parse_case_arm(&mut self) -> Option<CaseArm> {
        let anchor = self.peek()?.span.start;
        self.with_anchor(anchor, |p| {
            let pattern = p.parse_expr()?;
            p.expect(&TokenKind::Arrow)?;
            let body = p.parse_expr()?;
            Some(CaseArm { pattern, body })
        })
    }

    fn parse_tuple(&mut self) -> Option<Expr> {
        self.expect(&TokenKind::LBracket)?;
        let mut elements = Vec::new();
        if self.consume_if(&TokenKind::RBracket) {
            return Some(Expr::Tuple(elements));
        }
        loop {
            elements.push(self.parse_expr()?);
            if self.consume_if(&TokenKind::Comma) {
                if self.check(&TokenKind::RBracket) {
                    break;
                }
                continue;
            }
            break;
        }
        self.expect(&TokenKind::RBracket)?;
        Some(Expr::Tuple(elements))
    }

    fn parse_object_literal(&mut self) -> Option<Expr> {
        self.expect(&TokenKind::LBrace)?;
        let mut props = Vec::new();
        if self.consume_if(&TokenKind::RBrace) {
            return Some(Expr::ObjectLiteral(props));
        }
        loop {
            props.push(self.parse_property()?);
            if self.consume_if(&TokenKind::Comma) {
                if self.check(&TokenKind::RBrace) {
                    break;
                }
                continue;
            }
            break;
        }
        self.expect(&TokenKind::RBrace)?;
        Some(Expr::ObjectLiteral(props))
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    fn with_anchor<T>(
        &mut self,
        anchor: Pos,
        f: impl FnOnce(&mut Parser) -> Option<T>,
    ) -> Option<T> {
        self.anchors.push(anchor);
        let result = f(self);
        self.anchors.pop();
        result
    }

    /// Is the next token part of the current layout region? A token on
    /// a line below the innermost anchor must be indented strictly
    /// deeper than the anchor column.
    fn visible(&self) -> bool {
        let Some(token) = self.peek() else {
            return false;
        };
        if matches!(token.kind, TokenKind::Eof) {
            return false;
        }
        match self.anchors.last() {
            None => true,
            Some(anchor) => {
                let start = token.span.start;
                start.line == anchor.line || start.column > anchor.column
            }
        }
    }

    /// In positions where the grammar requires a token, a dedented
    /// token is an indentation error rather than a region boundary.
    fn guard(&mut self) -> Option<()> {
        let Some(token) = self.peek() else {
            return Some(());
        };
        if matches!(token.kind, TokenKind::Eof) {
            return Some(());
        }
        if let Some(anchor) = self.anchors.last() {
            let start = token.span.start;
            if start.line > anchor.line && start.column <= anchor.column {
                self.diagnostics.push(Diagnostic::error(
                    format!(
                        "incorrect indentation (got {}, should be greater than {})",
                        start.column, anchor.column
                    ),
                    token.span,
                ));
                return None;
            }
        }
        Some(())
    }

    // ------------------------------------------------------------------
    // Token helpers
    // ------------------------------------------------------------------

    fn expect(&mut self, kind: &TokenKind) -> Option<Token> {
        self.guard()?;
        if self.check(kind) {
            self.next()
        } else {
            let diag = self.unexpected(&describe(kind));
            self.diagnostics.push(diag);
            None
        }
    }

    fn expect_ident(&mut self) -> Option<String> {
        self.guard()?;
        match self.peek_kind() {
            Some(TokenKind::Ident(name)) => {
                self.advance();
                Some(name)
            }
            Some(kind) if kind.is_keyword() => {
                let span = self.peek().map(|t| t.span);
                self.diagnostics.push(Diagnostic::error(
                    format!(
                        "{} is reserved and cannot be used as an identifier",
                        describe(&kind)
                    ),
                    span.unwrap_or_else(|| crate::span::Span::empty(Pos::start())),
                ));
                None
            }
            _ => {
                let diag = self.unexpected("an identifier");
                self.diagnostics.push(diag);
                None
            }
        }
    }

    fn expect_string(&mut self) -> Option<String> {
        self.guard()?;
        match self.peek_kind() {
            Some(TokenKind::StringLiteral(text)) => {
                self.advance();
                Some(text)
            }
            _ => {
                let diag = self.unexpected("a string literal");
                self.diagnostics.push(diag);
                None
            }
        }
    }

    fn expect_word(&mut self, word: &str) -> Option<()> {
        self.guard()?;
        if self.check_word(word) {
            self.advance();
            Some(())
        } else {
            let diag = self.unexpected(&format!("`{word}`"));
            self.diagnostics.push(diag);
            None
        }
    }

    fn check_word(&self, word: &str) -> bool {
        matches!(self.peek_kind(), Some(TokenKind::Ident(n)) if n == word)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind().as_ref() == Some(kind)
    }

    fn consume_if(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind.clone())
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        Some(token)
    }

    /// `next` with the token discarded, for positions where the kind
    /// has already been inspected.
    fn advance(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    fn at_eof(&self) -> bool {
        self.peek_kind().is_none_or(|k| matches!(k, TokenKind::Eof))
    }

    fn unexpected(&self, expected: &str) -> Diagnostic {
        match self.peek() {
            Some(token) => Diagnostic::error(
                format!("expected {expected}, found {}", describe(&token.kind)),
                token.span,
            ),
            None => Diagnostic::error(
                format!("expected {expected}, found end of input"),
                crate::span::Span::empty(Pos::start()),
            ),
        }
    }
}
