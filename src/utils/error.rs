//! Error handling for Iblang

use crate::utils::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Front-end error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ==================== Lexer Errors ====================

    #[error("unexpected character `{ch}`")]
    UnexpectedChar { ch: char, span: Span },

    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("unknown escape sequence `\\{ch}`")]
    InvalidEscape { ch: char, span: Span },

    #[error("unterminated character literal")]
    UnterminatedChar { span: Span },

    #[error("character literal must contain exactly one character")]
    InvalidCharLiteral { span: Span },

    #[error("malformed numeric literal `{text}`")]
    MalformedNumber { text: String, span: Span },

    #[error("unterminated block comment")]
    UnterminatedComment { span: Span },

    // ==================== Parser Errors ====================

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("expected expression, found {found}")]
    ExpectedExpr { found: String, span: Span },

    #[error("expected type, found {found}")]
    ExpectedType { found: String, span: Span },

    #[error("expected pattern, found {found}")]
    ExpectedPattern { found: String, span: Span },

    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize, span: Span },
}

impl Error {
    /// Span of the offending source text
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedChar { span, .. } => *span,
            Self::UnterminatedString { span } => *span,
            Self::InvalidEscape { span, .. } => *span,
            Self::UnterminatedChar { span } => *span,
            Self::InvalidCharLiteral { span } => *span,
            Self::MalformedNumber { span, .. } => *span,
            Self::UnterminatedComment { span } => *span,
            Self::UnexpectedToken { span, .. } => *span,
            Self::ExpectedExpr { span, .. } => *span,
            Self::ExpectedType { span, .. } => *span,
            Self::ExpectedPattern { span, .. } => *span,
            Self::NestingTooDeep { span, .. } => *span,
        }
    }

    /// Stable diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnexpectedChar { .. } => "E0001",
            Self::UnterminatedString { .. } => "E0002",
            Self::InvalidEscape { .. } => "E0003",
            Self::UnterminatedChar { .. } => "E0007",
            Self::InvalidCharLiteral { .. } => "E0004",
            Self::MalformedNumber { .. } => "E0005",
            Self::UnterminatedComment { .. } => "E0006",
            Self::UnexpectedToken { .. } => "E0100",
            Self::ExpectedExpr { .. } => "E0101",
            Self::ExpectedType { .. } => "E0102",
            Self::ExpectedPattern { .. } => "E0103",
            Self::NestingTooDeep { .. } => "E0104",
        }
    }

    /// Whether the error was produced while tokenizing
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedChar { .. }
                | Self::UnterminatedString { .. }
                | Self::InvalidEscape { .. }
                | Self::UnterminatedChar { .. }
                | Self::InvalidCharLiteral { .. }
                | Self::MalformedNumber { .. }
                | Self::UnterminatedComment { .. }
        )
    }
}
