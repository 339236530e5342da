//! Lexer for Newtype source text.
//!
//! Produces a flat token stream with a line and column attached to
//! every token; the parser evaluates layout from those columns. Line
//! comments (`//`) and block comments (`{- -}`, non-nesting) are
//! skipped. Reserved words are lexed as keyword tokens and are never
//! visible to the parser as identifiers.

use crate::diagnostic::Diagnostic;
use crate::span::{Pos, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Eof,

    // identifiers and literals
    Ident(String),
    IntLiteral(String),
    DoubleLiteral(String),
    StringLiteral(String),
    BoolLiteral(bool),

    // punctuation
    LParen,   // (
    RParen,   // )
    LBrace,   // {
    RBrace,   // }
    LBracket, // [
    RBracket, // ]
    Comma,    // ,
    Colon,    // :
    Equal,    // =
    Pipe,     // |
    Ampersand,// &
    Question, // ?
    Star,     // *

    // compound operators
    Arrow,        // ->
    ExtendsLeft,  // <:
    ExtendsRight, // :>
    EqEq,         // ==
    NotEq,        // !=

    // reserved words
    KwFrom,
    KwIf,
    KwElse,
    KwThen,
    KwWhile,
    KwFor,
    KwGoto,
    KwRequire,
    KwImport,
    KwAs,
    KwDo,
    KwYield,
    KwAwait,
    KwAsync,
    KwReadonly,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            KwFrom
                | KwIf
                | KwElse
                | KwThen
                | KwWhile
                | KwFor
                | KwGoto
                | KwRequire
                | KwImport
                | KwAs
                | KwDo
                | KwYield
                | KwAwait
                | KwAsync
                | KwReadonly
        )
    }
}

/// A short human-readable rendering of a token kind, used in parse
/// error messages.
pub fn describe(kind: &TokenKind) -> String {
    use TokenKind::*;
    match kind {
        Eof => "end of input".to_string(),
        Ident(name) => format!("identifier `{name}`"),
        IntLiteral(text) | DoubleLiteral(text) => format!("number `{text}`"),
        StringLiteral(_) => "string literal".to_string(),
        BoolLiteral(value) => format!("`{value}`"),
        LParen => "`(`".to_string(),
        RParen => "`)`".to_string(),
        LBrace => "`{`".to_string(),
        RBrace => "`}`".to_string(),
        LBracket => "`[`".to_string(),
        RBracket => "`]`".to_string(),
        Comma => "`,`".to_string(),
        Colon => "`:`".to_string(),
        Equal => "`=`".to_string(),
        Pipe => "`|`".to_string(),
        Ampersand => "`&`".to_string(),
        Question => "`?`".to_string(),
        Star => "`*`".to_string(),
        Arrow => "`->`".to_string(),
        ExtendsLeft => "`<:`".to_string(),
        ExtendsRight => "`:>`".to_string(),
        EqEq => "`==`".to_string(),
        NotEq => "`!=`".to_string(),
        KwFrom => "keyword `from`".to_string(),
        KwIf => "keyword `if`".to_string(),
        KwElse => "keyword `else`".to_string(),
        KwThen => "keyword `then`".to_string(),
        KwWhile => "keyword `while`".to_string(),
        KwFor => "keyword `for`".to_string(),
        KwGoto => "keyword `goto`".to_string(),
        KwRequire => "keyword `require`".to_string(),
        KwImport => "keyword `import`".to_string(),
        KwAs => "keyword `as`".to_string(),
        KwDo => "keyword `do`".to_string(),
        KwYield => "keyword `yield`".to_string(),
        KwAwait => "keyword `await`".to_string(),
        KwAsync => "keyword `async`".to_string(),
        KwReadonly => "keyword `readonly`".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Result of lexing a source string. The parser refuses to run when
/// `diagnostics` is non-empty.
#[derive(Debug)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn lex(source: &str) -> LexResult {
    let mut lexer = Lexer {
        src: source,
        bytes: source.as_bytes(),
        index: 0,
        line: 1,
        column: 1,
        tokens: Vec::new(),
        diagnostics: Vec::new(),
    };
    lexer.run();
    LexResult {
        tokens: lexer.tokens,
        diagnostics: lexer.diagnostics,
    }
}

struct Lexer<'src> {
    src: &'src str,
    bytes: &'src [u8],
    index: usize,
    line: u32,
    column: u32,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    fn run(&mut self) {
        while let Some(c) = self.peek() {
            let start = self.pos();
            match c {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.bump();
                }
                b'/' if self.peek_next() == Some(b'/') => {
                    while let Some(c) = self.peek() {
                        if c == b'\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                b'{' if self.peek_next() == Some(b'-') => self.skip_block_comment(start),
                b'(' => self.simple(TokenKind::LParen, start),
                b')' => self.simple(TokenKind::RParen, start),
                b'{' => self.simple(TokenKind::LBrace, start),
                b'}' => self.simple(TokenKind::RBrace, start),
                b'[' => self.simple(TokenKind::LBracket, start),
                b']' => self.simple(TokenKind::RBracket, start),
                b',' => self.simple(TokenKind::Comma, start),
                b'|' => self.simple(TokenKind::Pipe, start),
                b'&' => self.simple(TokenKind::Ampersand, start),
                b'?' => self.simple(TokenKind::Question, start),
                b'*' => self.simple(TokenKind::Star, start),
                b':' => {
                    self.bump();
                    if self.peek() == Some(b'>') {
                        self.bump();
                        self.push(TokenKind::ExtendsRight, start);
                    } else {
                        self.push(TokenKind::Colon, start);
                    }
                }
                b'<' => {
                    self.bump();
                    if self.peek() == Some(b':') {
                        self.bump();
                        self.push(TokenKind::ExtendsLeft, start);
                    } else {
                        self.unexpected(start);
                    }
                }
                b'=' => {
                    self.bump();
                    if self.peek() == Some(b'=') {
                        self.bump();
                        self.push(TokenKind::EqEq, start);
                    } else {
                        self.push(TokenKind::Equal, start);
                    }
                }
                b'!' => {
                    self.bump();
                    if self.peek() == Some(b'=') {
                        self.bump();
                        self.push(TokenKind::NotEq, start);
                    } else {
                        self.unexpected(start);
                    }
                }
                b'-' => {
                    self.bump();
                    if self.peek() == Some(b'>') {
                        self.bump();
                        self.push(TokenKind::Arrow, start);
                    } else {
                        self.unexpected(start);
                    }
                }
                b'"' => self.lex_string(start),
                b'0'..=b'9' => self.lex_number(start),
                _ if is_ident_start(c) => self.lex_ident(start),
                _ => {
                    self.bump();
                    self.unexpected(start);
                }
            }
        }

        let end = self.pos();
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::empty(end),
        });
    }

    fn skip_block_comment(&mut self, start: Pos) {
        self.bump(); // {
        self.bump(); // -
        loop {
            match self.peek() {
                Some(b'-') if self.peek_next() == Some(b'}') => {
                    self.bump();
                    self.bump();
                    return;
                }
                Some(_) => {
                    self.bump();
                }
                None => {
                    self.diagnostics.push(Diagnostic::error(
                        "unterminated block comment",
                        Span::new(start, self.pos()),
                    ));
                    return;
                }
            }
        }
    }

    fn lex_string(&mut self, start: Pos) {
        self.bump(); // opening quote
        let content_start = self.index;
        loop {
            match self.peek() {
                Some(b'"') => {
                    let content = self.src[content_start..self.index].to_string();
                    self.bump(); // closing quote
                    self.push(TokenKind::StringLiteral(content), start);
                    return;
                }
                Some(b'\\') => {
                    // keep escapes verbatim; rendering re-quotes the
                    // raw content
                    self.bump();
                    if self.peek().is_some() {
                        self.bump();
                    }
                }
                Some(_) => {
                    self.bump();
                }
                None => {
                    self.diagnostics.push(Diagnostic::error(
                        "unterminated string literal",
                        Span::new(start, self.pos()),
                    ));
                    return;
                }
            }
        }
    }

    fn lex_number(&mut self, start: Pos) {
        let text_start = self.index;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.bump();
        }
        let mut is_double = false;
        if self.peek() == Some(b'.') && matches!(self.peek_next(), Some(b'0'..=b'9')) {
            is_double = true;
            self.bump(); // .
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.bump();
            }
        }
        let text = self.src[text_start..self.index].to_string();
        let kind = if is_double {
            TokenKind::DoubleLiteral(text)
        } else {
            TokenKind::IntLiteral(text)
        };
        self.push(kind, start);
    }

    fn lex_ident(&mut self, start: Pos) {
        let text_start = self.index;
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.bump();
            } else {
                break;
            }
        }
        // The identifier is maximal, so a reserved word followed by an
        // identifier character (e.g. `ifx`) never matches here.
        let text = &self.src[text_start..self.index];
        let kind = match keyword(text) {
            Some(kind) => kind,
            None => match text {
                "true" => TokenKind::BoolLiteral(true),
                "false" => TokenKind::BoolLiteral(false),
                _ => TokenKind::Ident(text.to_string()),
            },
        };
        self.push(kind, start);
    }

    fn simple(&mut self, kind: TokenKind, start: Pos) {
        self.bump();
        self.push(kind, start);
    }

    fn push(&mut self, kind: TokenKind, start: Pos) {
        self.tokens.push(Token {
            kind,
            span: Span::new(start, self.pos()),
        });
    }

    fn unexpected(&mut self, start: Pos) {
        let c = self.src[..self.index]
            .chars()
            .next_back()
            .unwrap_or('\u{fffd}');
        self.diagnostics.push(Diagnostic::error(
            format!("unexpected character `{c}`"),
            Span::new(start, self.pos()),
        ));
    }

    fn pos(&self) -> Pos {
        Pos::new(self.line, self.column)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.index).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.index + 1).copied()
    }

    /// Consume one character. Whole characters, not bytes: columns
    /// count characters, and the index never lands inside a multibyte
    /// sequence.
    fn bump(&mut self) {
        if let Some(c) = self.src[self.index..].chars().next() {
            self.index += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

fn keyword(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "from" => TokenKind::KwFrom,
        "if" => TokenKind::KwIf,
        "else" => TokenKind::KwElse,
        "then" => TokenKind::KwThen,
        "while" => TokenKind::KwWhile,
        "for" => TokenKind::KwFor,
        "goto" => TokenKind::KwGoto,
        "require" => TokenKind::KwRequire,
        "import" => TokenKind::KwImport,
        "as" => TokenKind::KwAs,
        "do" => TokenKind::KwDo,
        "yield" => TokenKind::KwYield,
        "await" => TokenKind::KwAwait,
        "async" => TokenKind::KwAsync,
        "readonly" => TokenKind::KwReadonly,
        _ => return None,
    };
    Some(kind)
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$'
}

fn is_ident_continue(c: u8) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let result = lex(source);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        result.tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_punctuation_and_operators() {
        assert_eq!(
            kinds("( ) <: :> == != -> | & ? ="),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::ExtendsLeft,
                TokenKind::ExtendsRight,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Arrow,
                TokenKind::Pipe,
                TokenKind::Ampersand,
                TokenKind::Question,
                TokenKind::Equal,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keyword_needs_a_word_boundary() {
        assert_eq!(
            kinds("ifx if"),
            vec![
                TokenKind::Ident("ifx".to_string()),
                TokenKind::KwIf,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn dollar_and_underscore_identifiers() {
        assert_eq!(
            kinds("$a _b a$1"),
            vec![
                TokenKind::Ident("$a".to_string()),
                TokenKind::Ident("_b".to_string()),
                TokenKind::Ident("a$1".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn skips_line_and_block_comments() {
        assert_eq!(
            kinds("a // rest of line\n{- block\n spanning lines -} b"),
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::Ident("b".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tracks_line_and_column() {
        let result = lex("a\n  b");
        let b = &result.tokens[1];
        assert_eq!(b.span.start.line, 2);
        assert_eq!(b.span.start.column, 3);
    }

    #[test]
    fn number_literals() {
        assert_eq!(
            kinds("1 2.5"),
            vec![
                TokenKind::IntLiteral("1".to_string()),
                TokenKind::DoubleLiteral("2.5".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_is_a_diagnostic() {
        let result = lex("\"abc");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].message, "unterminated string literal");
    }

    #[test]
    fn non_ascii_character_is_a_diagnostic_not_a_fault() {
        let result = lex("é");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].message, "unexpected character `é`");
        assert_eq!(result.tokens, vec![Token {
            kind: TokenKind::Eof,
            span: Span::empty(Pos::new(1, 2)),
        }]);
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let result = lex("\"héllo\" x");
        let x = &result.tokens[1];
        assert_eq!(x.kind, TokenKind::Ident("x".to_string()));
        assert_eq!(x.span.start.column, 9);
    }
}
