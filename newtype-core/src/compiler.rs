//! End-to-end pipeline: source text in, canonical rendering out.

use crate::error::CoreError;
use crate::{parser, printer, simplify};

/// Compile one program. The output ends with a newline unless the
/// program is empty, in which case it is the empty string.
pub fn compile(source: &str) -> Result<String, CoreError> {
    let program = parser::parse(source)?;
    let program = simplify::simplify_program(&program);
    Ok(printer::render_program(&program))
}
