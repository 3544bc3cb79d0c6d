//! Iblang front end
//!
//! Lexer, parser and AST for the Iblang language, with structured
//! diagnostics for malformed input.

pub mod diagnostics;
pub mod frontend;
pub mod utils;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use frontend::ast;
pub use frontend::lexer::Lexer;
pub use frontend::parser::Parser;
pub use utils::{Error, LineIndex, Span};

/// Lex and parse one source buffer. Always returns a tree; problems are
/// reported through the diagnostics.
pub fn parse_source(source: &str, file_id: usize) -> (ast::Module, Diagnostics) {
    let mut parser = Parser::new(Lexer::new(source, file_id));
    let module = parser.parse_module();
    let diagnostics = Diagnostics::from_errors(&parser.errors());
    log::debug!(
        "file {}: {} item(s), {} diagnostic(s)",
        file_id,
        module.items.len(),
        diagnostics.len()
    );
    (module, diagnostics)
}
