//! Token definitions for Iblang

use crate::utils::Span;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text of the token
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self { kind, text: text.into(), span }
    }

    pub fn eof(span: Span) -> Self {
        Self { kind: TokenKind::Eof, text: String::new(), span }
    }

    /// Human-readable description used in "found ..." messages
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Ident(name) => format!("identifier `{}`", name),
            TokenKind::Number => format!("number `{}`", self.text),
            TokenKind::StringLit(_) => "string literal".to_string(),
            TokenKind::CharLit(_) => "character literal".to_string(),
            TokenKind::Error => format!("invalid token `{}`", self.text),
            TokenKind::Eof => "end of input".to_string(),
            kind if kind.is_keyword() => format!("keyword `{}`", self.text),
            _ => format!("`{}`", self.text),
        }
    }
}

/// Token kinds
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ============ Keywords ============
    /// fn
    Fn,
    /// struct
    Struct,
    /// union
    Union,
    /// enum
    Enum,
    /// extern
    Extern,
    /// const
    Const,
    /// let
    Let,
    /// import
    Import,
    /// pub
    Pub,
    /// if
    If,
    /// else
    Else,
    /// loop
    Loop,
    /// while
    While,
    /// for
    For,
    /// match
    Match,
    /// break
    Break,
    /// continue
    Continue,
    /// return
    Return,
    /// true
    True,
    /// false
    False,
    /// null
    Null,
    /// as (cast)
    As,
    /// sizeof
    Sizeof,
    /// void
    Void,

    // ============ Primitive type names ============
    /// int
    Int,
    /// str
    Str,
    /// char
    Char,
    /// bool
    Bool,
    /// float
    Float,

    // ============ Identifiers and Literals ============
    /// Identifier (variable name, function name, etc.)
    Ident(String),
    /// Numeric literal; the digits live in `Token::text`
    Number,
    /// String literal with escapes resolved
    StringLit(String),
    /// Character literal with escapes resolved
    CharLit(char),

    // ============ Operators ============
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// ==
    EqEq,
    /// !=
    Ne,
    /// <
    Lt,
    /// <=
    Le,
    /// >
    Gt,
    /// >=
    Ge,
    /// &&
    AndAnd,
    /// ||
    OrOr,
    /// !
    Not,
    /// &
    And,
    /// |
    Pipe,
    /// +=
    PlusEq,
    /// -=
    MinusEq,
    /// *=
    StarEq,
    /// /=
    SlashEq,
    /// %=
    PercentEq,
    /// =>
    FatArrow,
    /// .
    Dot,
    /// ...
    DotDotDot,
    /// ::
    ColonColon,

    // ============ Delimiters ============
    /// (
    LParen,
    /// )
    RParen,
    /// {
    LBrace,
    /// }
    RBrace,
    /// [
    LBracket,
    /// ]
    RBracket,
    /// ,
    Comma,
    /// :
    Colon,
    /// ;
    Semicolon,

    // ============ Special ============
    /// Malformed input; the lexer has already reported it
    Error,
    /// End of file
    Eof,
}

impl TokenKind {
    /// Check if this token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Fn
                | TokenKind::Struct
                | TokenKind::Union
                | TokenKind::Enum
                | TokenKind::Extern
                | TokenKind::Const
                | TokenKind::Let
                | TokenKind::Import
                | TokenKind::Pub
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Loop
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Match
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Return
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::As
                | TokenKind::Sizeof
                | TokenKind::Void
                | TokenKind::Int
                | TokenKind::Str
                | TokenKind::Char
                | TokenKind::Bool
                | TokenKind::Float
        )
    }

    /// Try to convert an identifier to a keyword
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "fn" => Some(TokenKind::Fn),
            "struct" => Some(TokenKind::Struct),
            "union" => Some(TokenKind::Union),
            "enum" => Some(TokenKind::Enum),
            "extern" => Some(TokenKind::Extern),
            "const" => Some(TokenKind::Const),
            "let" => Some(TokenKind::Let),
            "import" => Some(TokenKind::Import),
            "pub" => Some(TokenKind::Pub),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "loop" => Some(TokenKind::Loop),
            "while" => Some(TokenKind::While),
            "for" => Some(TokenKind::For),
            "match" => Some(TokenKind::Match),
            "break" => Some(TokenKind::Break),
            "continue" => Some(TokenKind::Continue),
            "return" => Some(TokenKind::Return),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "null" => Some(TokenKind::Null),
            "as" => Some(TokenKind::As),
            "sizeof" => Some(TokenKind::Sizeof),
            "void" => Some(TokenKind::Void),
            "int" => Some(TokenKind::Int),
            "str" => Some(TokenKind::Str),
            "char" => Some(TokenKind::Char),
            "bool" => Some(TokenKind::Bool),
            "float" => Some(TokenKind::Float),
            _ => None,
        }
    }

    /// Keywords that can only begin a top-level item
    pub fn is_item_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Fn
                | TokenKind::Struct
                | TokenKind::Union
                | TokenKind::Enum
                | TokenKind::Extern
                | TokenKind::Import
                | TokenKind::Pub
        )
    }

    /// Keywords that begin a statement
    pub fn is_stmt_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Const
                | TokenKind::If
                | TokenKind::Loop
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Match
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Return
        )
    }

    /// Keywords at which module-level recovery resumes
    pub fn is_top_level_keyword(&self) -> bool {
        self.is_item_keyword() || matches!(self, TokenKind::Const | TokenKind::Let)
    }

    /// Get the precedence of a binary operator (for precedence climbing)
    /// Returns None if not a binary operator.
    ///
    /// Postfix `.`, `::` and `[` are handled before this table is
    /// consulted and bind tighter than everything here.
    pub fn binary_precedence(&self) -> Option<u8> {
        match self {
            // Assignment (lowest)
            TokenKind::Eq
            | TokenKind::PlusEq
            | TokenKind::MinusEq
            | TokenKind::StarEq
            | TokenKind::SlashEq
            | TokenKind::PercentEq => Some(1),

            // Logical OR
            TokenKind::OrOr => Some(2),

            // Logical AND
            TokenKind::AndAnd => Some(3),

            // Equality
            TokenKind::EqEq | TokenKind::Ne => Some(4),

            // Comparison
            TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge => Some(5),

            // Additive
            TokenKind::Plus | TokenKind::Minus => Some(6),

            // Multiplicative
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(7),

            // Cast (as) - binds tighter than multiplication
            TokenKind::As => Some(8),

            _ => None,
        }
    }

    /// Source spelling of fixed tokens, used in "expected ..." messages
    pub fn symbol(&self) -> &'static str {
        match self {
            TokenKind::Fn => "fn",
            TokenKind::Struct => "struct",
            TokenKind::Union => "union",
            TokenKind::Enum => "enum",
            TokenKind::Extern => "extern",
            TokenKind::Const => "const",
            TokenKind::Let => "let",
            TokenKind::Import => "import",
            TokenKind::Pub => "pub",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Loop => "loop",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Match => "match",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::As => "as",
            TokenKind::Sizeof => "sizeof",
            TokenKind::Void => "void",
            TokenKind::Int => "int",
            TokenKind::Str => "str",
            TokenKind::Char => "char",
            TokenKind::Bool => "bool",
            TokenKind::Float => "float",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Number => "number",
            TokenKind::StringLit(_) => "string literal",
            TokenKind::CharLit(_) => "character literal",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::Ne => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Not => "!",
            TokenKind::And => "&",
            TokenKind::Pipe => "|",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::FatArrow => "=>",
            TokenKind::Dot => ".",
            TokenKind::DotDotDot => "...",
            TokenKind::ColonColon => "::",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of input",
        }
    }
}
