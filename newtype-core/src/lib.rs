//! Core of the Newtype language toolchain.
//!
//! Newtype is a small indentation-sensitive language for describing
//! types; programs compile to canonical conditional-type syntax. The
//! pipeline is a chain of pure functions with no state carried across
//! invocations:
//!
//! ```text
//! source text -> lexer -> parser -> AST -> simplify -> printer -> text
//! ```
//!
//! [`compile`] runs the whole chain. The stages are public so tools
//! can stop at any point, e.g. parse without rendering.

pub mod ast;
pub mod compiler;
pub mod diagnostic;
pub mod doc;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod simplify;
pub mod span;

pub use compiler::compile;
pub use error::CoreError;
