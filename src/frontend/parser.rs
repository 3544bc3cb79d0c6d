//! Parser for Iblang
//!
//! Recursive descent over declarations and statements, precedence climbing
//! for expressions (see `expr`). Syntax errors never abort the parse: they
//! are recorded and the parser resynchronizes at the next statement or
//! declaration boundary.

mod expr;
#[cfg(test)]
mod tests;

use crate::frontend::ast::*;
use crate::frontend::lexer::Lexer;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Result, Span};

/// Deepest nesting of blocks, expressions and types the parser follows
const MAX_NESTING: usize = 64;

/// The parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Set while parsing a condition or match subject, where `ident {`
    /// starts the controlled block instead of a struct literal
    no_struct_literal: bool,
    /// Recursive constructs currently open
    depth: usize,
    /// Errors reported by the lexer
    lex_errors: Vec<Error>,
    /// Syntax errors reported so far
    errors: Vec<Error>,
}

impl Parser {
    /// Create a new parser from a lexer
    pub fn new(mut lexer: Lexer<'_>) -> Self {
        let tokens = lexer.tokenize();
        let lex_errors = lexer.take_errors();
        let mut parser = Self::from_tokens(tokens);
        parser.lex_errors = lex_errors;
        parser
    }

    /// Create a parser from pre-tokenized input
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |t| t.kind != TokenKind::Eof) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            let file_id = tokens.last().map(|t| t.span.file_id).unwrap_or(0);
            tokens.push(Token::eof(Span::new(end, end, file_id)));
        }
        Self {
            tokens,
            pos: 0,
            no_struct_literal: false,
            depth: 0,
            lex_errors: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Lexical and syntax errors, ordered by source position
    pub fn errors(&self) -> Vec<Error> {
        let mut all: Vec<Error> = self.lex_errors.iter().chain(&self.errors).cloned().collect();
        all.sort_by_key(|e| e.span().start);
        all
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> &Token {
        // `from_tokens` guarantees a trailing Eof and `advance` never
        // moves past it
        &self.tokens[self.pos]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("`{}`", expected.symbol())))
        }
    }

    fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Syntax error at the current token
    fn unexpected(&self, expected: &str) -> Error {
        Error::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current().describe(),
            span: self.current().span,
        }
    }

    /// Span from `start` through the last consumed token
    fn span_from(&self, start: Span) -> Span {
        start.merge(&self.tokens[self.pos.saturating_sub(1)].span)
    }

    /// Run `f` with struct literals allowed or forbidden, restoring the
    /// previous setting afterwards
    fn with_struct_literals<T>(
        &mut self,
        allowed: bool,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let saved = self.no_struct_literal;
        self.no_struct_literal = !allowed;
        let result = f(self);
        self.no_struct_literal = saved;
        result
    }

    /// Run `f` one nesting level deeper, failing once `MAX_NESTING` is
    /// reached so deep input cannot exhaust the stack
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            return Err(Error::NestingTooDeep {
                limit: MAX_NESTING,
                span: self.current().span,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ==================== Error Recovery ====================

    fn report(&mut self, error: Error) {
        let span = error.span();
        // the lexer already reported the bad token
        if self.current().kind == TokenKind::Error && self.current().span == span {
            return;
        }
        if self.errors.last().map_or(false, |e| e.span().start == span.start) {
            return;
        }
        log::trace!("syntax error at {}..{}: {}", span.start, span.end, error);
        self.errors.push(error);
    }

    /// Skip to the next top-level keyword, consuming at least one token
    /// when the failed item consumed none
    fn synchronize_item(&mut self, item_start: usize) {
        if self.pos == item_start {
            self.advance();
        }
        let from = self.pos;
        while !self.is_at_end() && !self.current_kind().is_top_level_keyword() {
            self.advance();
        }
        log::trace!("skipped {} token(s) to resynchronize item", self.pos - from);
    }

    /// Skip past the end of the statement that started at `stmt_start`:
    /// the next `;` or the `}` closing a brace opened inside it. Stops
    /// before the `}` of the enclosing block and before keywords that
    /// start a new statement or item. The `;` separators of a `for` header
    /// do not end the statement; its body does.
    fn synchronize_stmt(&mut self, stmt_start: usize) {
        let in_for_header = self.tokens[stmt_start].kind == TokenKind::For;
        let mut depth = self.tokens[stmt_start..self.pos]
            .iter()
            .fold(0usize, |depth, t| match t.kind {
                TokenKind::LBrace => depth + 1,
                TokenKind::RBrace => depth.saturating_sub(1),
                _ => depth,
            });
        let mut first = self.pos == stmt_start;
        let from = self.pos;

        loop {
            match self.current_kind().clone() {
                TokenKind::Eof => break,
                TokenKind::Semicolon if depth == 0 && !in_for_header => {
                    self.advance();
                    break;
                }
                TokenKind::RBrace if depth == 0 => break,
                TokenKind::RBrace => {
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::LBrace => {
                    depth += 1;
                    self.advance();
                }
                kind if depth == 0
                    && !first
                    && (kind.is_item_keyword() || kind.is_stmt_keyword()) =>
                {
                    break
                }
                _ => {
                    self.advance();
                }
            }
            first = false;
        }
        log::trace!("skipped {} token(s) to resynchronize statement", self.pos - from);
    }

    // ==================== Parsing Methods ====================

    /// Parse a complete module, recording errors instead of stopping
    pub fn parse_module(&mut self) -> Module {
        let mut items = Vec::new();

        while !self.is_at_end() {
            let item_start = self.pos;
            match self.parse_item() {
                Ok(item) => items.push(item),
                Err(err) => {
                    self.report(err);
                    self.synchronize_item(item_start);
                }
            }
        }

        let eof = self.current().span;
        log::debug!(
            "parsed {} item(s) with {} syntax error(s)",
            items.len(),
            self.errors.len()
        );
        Module {
            items,
            span: Span::new(0, eof.end, eof.file_id),
        }
    }

    /// Parse a top-level item
    fn parse_item(&mut self) -> Result<ModuleItem> {
        if self.check(&TokenKind::Import) {
            let import = self.parse_import()?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(ModuleItem::Import(Import {
                span: self.span_from(import.span),
                ..import
            }));
        }
        Ok(ModuleItem::Decl(self.parse_declaration()?))
    }

    /// `import "path"` without the terminator
    fn parse_import(&mut self) -> Result<Import> {
        let start = self.expect(TokenKind::Import)?.span;
        let token = self.current().clone();
        match token.kind {
            TokenKind::StringLit(path) => {
                self.advance();
                Ok(Import {
                    path,
                    span: start.merge(&token.span),
                })
            }
            _ => Err(self.unexpected("module path string")),
        }
    }

    fn parse_declaration(&mut self) -> Result<Declaration> {
        let start = self.current().span;
        let is_pub = self.consume(&TokenKind::Pub);

        let kind = match self.current_kind() {
            TokenKind::Fn => DeclKind::Fn(self.parse_fn_def()?),
            TokenKind::Struct => DeclKind::Struct(self.parse_struct(TokenKind::Struct)?),
            TokenKind::Union => DeclKind::Union(self.parse_struct(TokenKind::Union)?),
            TokenKind::Enum => DeclKind::Enum(self.parse_enum()?),
            TokenKind::Extern => self.parse_extern()?,
            TokenKind::Const => DeclKind::Const(self.parse_global_const()?),
            TokenKind::Let => DeclKind::Var(self.parse_binding(TokenKind::Let)?),
            _ => {
                return Err(self.unexpected(
                    "declaration (`fn`, `struct`, `union`, `enum`, `extern`, `const`, `let`)",
                ))
            }
        };

        Ok(Declaration {
            is_pub,
            kind,
            span: self.span_from(start),
        })
    }

    /// Parse a function definition
    fn parse_fn_def(&mut self) -> Result<FnDef> {
        let start = self.expect(TokenKind::Fn)?.span;
        let name = self.parse_ident()?;
        let proto = self.parse_prototype(name)?;
        let body = self.parse_block()?;

        Ok(FnDef {
            proto,
            span: start.merge(&body.span),
            body,
        })
    }

    /// Parameter list and return annotation following an already parsed name
    fn parse_prototype(&mut self, name: Ident) -> Result<Prototype> {
        self.expect(TokenKind::LParen)?;
        let (params, variadic) = self.parse_params()?;
        self.expect(TokenKind::RParen)?;
        let ret_type = self.parse_return_type()?;

        Ok(Prototype {
            span: self.span_from(name.span),
            name,
            params,
            variadic,
            ret_type,
        })
    }

    fn parse_params(&mut self) -> Result<(Vec<Param>, bool)> {
        let mut params = Vec::new();
        let mut variadic = false;

        while !self.check(&TokenKind::RParen) && !self.is_at_end() {
            if self.consume(&TokenKind::DotDotDot) {
                variadic = true;
                break;
            }
            params.push(self.parse_param()?);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }

        Ok((params, variadic))
    }

    fn parse_param(&mut self) -> Result<Param> {
        let name = self.parse_ident()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_typeident()?;

        Ok(Param {
            span: name.span.merge(&ty.span),
            name,
            ty,
        })
    }

    /// `: type` or `: void`; absent means void
    fn parse_return_type(&mut self) -> Result<Option<TypeIdent>> {
        if !self.consume(&TokenKind::Colon) {
            return Ok(None);
        }
        if self.consume(&TokenKind::Void) {
            return Ok(None);
        }
        Ok(Some(self.parse_typeident()?))
    }

    fn parse_ident(&mut self) -> Result<Ident> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Ident {
                    name,
                    span: token.span,
                })
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn parse_typeident(&mut self) -> Result<TypeIdent> {
        self.nested(Self::parse_type)
    }

    /// Parse a type: `*`* base `[expr]`*
    fn parse_type(&mut self) -> Result<TypeIdent> {
        let start = self.current().span;

        let mut pointer_depth = 0;
        while self.consume(&TokenKind::Star) {
            pointer_depth += 1;
        }

        let base = match self.current_kind().clone() {
            TokenKind::Ident(name) if name == "any" && pointer_depth > 0 => {
                self.advance();
                pointer_depth -= 1;
                TypeBase::AnyPointer
            }
            TokenKind::Int => self.primitive(PrimitiveType::Int),
            TokenKind::Str => self.primitive(PrimitiveType::Str),
            TokenKind::Char => self.primitive(PrimitiveType::Char),
            TokenKind::Bool => self.primitive(PrimitiveType::Bool),
            TokenKind::Float => self.primitive(PrimitiveType::Float),
            TokenKind::Fn => TypeBase::Function(self.parse_fn_type()?),
            TokenKind::Ident(_) => TypeBase::Named(self.parse_ident()?),
            _ => {
                return Err(Error::ExpectedType {
                    found: self.current().describe(),
                    span: self.current().span,
                })
            }
        };

        let mut array_dims = Vec::new();
        while self.consume(&TokenKind::LBracket) {
            array_dims.push(self.with_struct_literals(true, |p| p.parse_expr())?);
            self.expect(TokenKind::RBracket)?;
        }

        Ok(TypeIdent {
            pointer_depth,
            base,
            array_dims,
            span: self.span_from(start),
        })
    }

    fn primitive(&mut self, ty: PrimitiveType) -> TypeBase {
        self.advance();
        TypeBase::Primitive(ty)
    }

    /// `fn(T, ...): R`
    fn parse_fn_type(&mut self) -> Result<FnType> {
        self.expect(TokenKind::Fn)?;
        self.expect(TokenKind::LParen)?;

        let mut params = Vec::new();
        let mut variadic = false;
        while !self.check(&TokenKind::RParen) && !self.is_at_end() {
            if self.consume(&TokenKind::DotDotDot) {
                variadic = true;
                break;
            }
            params.push(self.parse_typeident()?);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;

        let ret_type = self.parse_return_type()?.map(Box::new);
        Ok(FnType {
            params,
            variadic,
            ret_type,
        })
    }

    // ==================== Struct, Union, Enum, Extern, Const ====================

    fn parse_struct(&mut self, keyword: TokenKind) -> Result<StructDef> {
        let start = self.expect(keyword)?.span;

        let name = self.parse_ident()?;
        self.expect(TokenKind::LBrace)?;

        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            let field_name = self.parse_ident()?;
            self.expect(TokenKind::Colon)?;
            let ty = self.parse_typeident()?;

            fields.push(Field {
                span: field_name.span.merge(&ty.span),
                name: field_name,
                ty,
            });

            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RBrace)?;

        Ok(StructDef {
            name,
            fields,
            span: self.span_from(start),
        })
    }

    fn parse_enum(&mut self) -> Result<EnumDef> {
        let start = self.expect(TokenKind::Enum)?.span;

        let name = self.parse_ident()?;
        self.expect(TokenKind::LBrace)?;

        let mut variants = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            let var_name = self.parse_ident()?;
            let value = if self.consume(&TokenKind::Eq) {
                Some(self.parse_expr()?)
            } else {
                None
            };

            variants.push(Variant {
                span: self.span_from(var_name.span),
                name: var_name,
                value,
            });

            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RBrace)?;

        Ok(EnumDef {
            name,
            variants,
            span: self.span_from(start),
        })
    }

    /// `extern [fn] name(params)[: ret]` or `extern name: type`
    fn parse_extern(&mut self) -> Result<DeclKind> {
        let start = self.expect(TokenKind::Extern)?.span;
        let is_fn = self.consume(&TokenKind::Fn);
        let name = self.parse_ident()?;

        let kind = if is_fn || self.check(&TokenKind::LParen) {
            DeclKind::ExternFn(self.parse_prototype(name)?)
        } else if self.consume(&TokenKind::Colon) {
            let ty = self.parse_typeident()?;
            DeclKind::ExternGlobal(ExternGlobal {
                name,
                ty,
                span: self.span_from(start),
            })
        } else {
            return Err(self.unexpected("`(` or `:`"));
        };

        self.consume(&TokenKind::Semicolon);
        Ok(kind)
    }

    /// `const name [: type] = expr;` or `const name = import "path";`
    fn parse_global_const(&mut self) -> Result<GlobalConst> {
        let start = self.expect(TokenKind::Const)?.span;
        let name = self.parse_ident()?;

        let ty = if self.consume(&TokenKind::Colon) {
            Some(self.parse_typeident()?)
        } else {
            None
        };

        self.expect(TokenKind::Eq)?;
        let value = if ty.is_none() && self.check(&TokenKind::Import) {
            ConstValue::Import(self.parse_import()?)
        } else {
            ConstValue::Expr {
                ty,
                value: self.parse_expr()?,
            }
        };
        self.expect(TokenKind::Semicolon)?;

        Ok(GlobalConst {
            name,
            value,
            span: self.span_from(start),
        })
    }

    /// `let`/`const` binding: keyword name [: type] = expr ;
    fn parse_binding(&mut self, keyword: TokenKind) -> Result<VarDecl> {
        let start = self.expect(keyword)?.span;
        let name = self.parse_ident()?;

        let ty = if self.consume(&TokenKind::Colon) {
            Some(self.parse_typeident()?)
        } else {
            None
        };

        self.expect(TokenKind::Eq)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(VarDecl {
            name,
            ty,
            value,
            span: self.span_from(start),
        })
    }

    // ==================== Blocks & Statements ====================

    fn parse_block(&mut self) -> Result<Block> {
        self.nested(|p| {
            let start = p.expect(TokenKind::LBrace)?.span;
            p.with_struct_literals(true, |p| p.parse_block_body(start))
        })
    }

    /// Statements up to and including the closing `}`
    fn parse_block_body(&mut self, start: Span) -> Result<Block> {
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace)
            && !self.is_at_end()
            && !self.current_kind().is_item_keyword()
        {
            let stmt_start = self.pos;
            match self.parse_stmt() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    self.report(err);
                    self.synchronize_stmt(stmt_start);
                }
            }
        }

        self.expect(TokenKind::RBrace)?;

        Ok(Block {
            stmts,
            span: self.span_from(start),
        })
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        match self.current_kind() {
            TokenKind::Let => Ok(Stmt::Let(self.parse_binding(TokenKind::Let)?)),
            TokenKind::Const => Ok(Stmt::Const(self.parse_binding(TokenKind::Const)?)),
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::Return => {
                let (value, span) = self.parse_return()?;
                Ok(Stmt::Return { value, span })
            }
            TokenKind::If => Ok(Stmt::If(self.parse_if()?)),
            TokenKind::Loop => {
                let start = self.advance().span;
                let body = self.parse_block()?;
                Ok(Stmt::Loop {
                    span: start.merge(&body.span),
                    body,
                })
            }
            TokenKind::While => {
                let start = self.advance().span;
                let cond = self.parse_condition()?;
                let body = self.parse_block()?;
                Ok(Stmt::While {
                    cond,
                    span: start.merge(&body.span),
                    body,
                })
            }
            TokenKind::For => Ok(Stmt::For(self.parse_for()?)),
            TokenKind::Match => Ok(Stmt::Match(self.parse_match()?)),
            TokenKind::Break => Ok(Stmt::Break {
                span: self.parse_jump(TokenKind::Break)?,
            }),
            TokenKind::Continue => Ok(Stmt::Continue {
                span: self.parse_jump(TokenKind::Continue)?,
            }),
            _ => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Expr {
                    span: self.span_from(expr.span()),
                    expr,
                })
            }
        }
    }

    /// Expression in a position followed by a controlled block
    fn parse_condition(&mut self) -> Result<Expr> {
        self.with_struct_literals(false, |p| p.parse_expr())
    }

    fn parse_return(&mut self) -> Result<(Option<Expr>, Span)> {
        let start = self.expect(TokenKind::Return)?.span;

        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon)?;

        Ok((value, self.span_from(start)))
    }

    /// `break;` / `continue;`
    fn parse_jump(&mut self, keyword: TokenKind) -> Result<Span> {
        let start = self.expect(keyword)?.span;
        self.expect(TokenKind::Semicolon)?;
        Ok(self.span_from(start))
    }

    fn parse_if(&mut self) -> Result<IfStmt> {
        let start = self.expect(TokenKind::If)?.span;

        let cond = self.parse_condition()?;
        let then_block = self.parse_block()?;

        let else_branch = if self.consume(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                Some(ElseBranch::If(Box::new(self.nested(Self::parse_if)?)))
            } else {
                Some(ElseBranch::Block(self.parse_block()?))
            }
        } else {
            None
        };

        Ok(IfStmt {
            cond,
            then_block,
            else_branch,
            span: self.span_from(start),
        })
    }

    /// `for init; cond; step { ... }`
    fn parse_for(&mut self) -> Result<ForStmt> {
        let start = self.expect(TokenKind::For)?.span;

        let init = if self.check(&TokenKind::Let) {
            ForInit::Let(self.parse_binding(TokenKind::Let)?)
        } else {
            let expr = self.parse_expr()?;
            self.expect(TokenKind::Semicolon)?;
            ForInit::Expr(expr)
        };

        let cond = self.parse_condition()?;
        self.expect(TokenKind::Semicolon)?;
        let step = self.parse_condition()?;
        let body = self.parse_block()?;

        Ok(ForStmt {
            init,
            cond,
            step,
            span: start.merge(&body.span),
            body,
        })
    }

    fn parse_match(&mut self) -> Result<MatchStmt> {
        let start = self.expect(TokenKind::Match)?.span;

        let subject = self.parse_condition()?;
        self.expect(TokenKind::LBrace)?;

        let mut arms = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            arms.push(self.parse_match_arm()?);
        }

        self.expect(TokenKind::RBrace)?;

        Ok(MatchStmt {
            subject,
            arms,
            span: self.span_from(start),
        })
    }

    fn parse_match_arm(&mut self) -> Result<MatchArm> {
        let start = self.current().span;

        let mut patterns = vec![self.parse_pattern()?];
        while self.consume(&TokenKind::Pipe) {
            patterns.push(self.parse_pattern()?);
        }

        self.expect(TokenKind::FatArrow)?;

        let body = match self.current_kind() {
            TokenKind::LBrace => ArmBody::Block(self.parse_block()?),
            TokenKind::Return => {
                let (value, span) = self.parse_return()?;
                ArmBody::Return { value, span }
            }
            TokenKind::Match => ArmBody::Match(Box::new(self.nested(Self::parse_match)?)),
            TokenKind::Break => ArmBody::Break {
                span: self.parse_jump(TokenKind::Break)?,
            },
            TokenKind::Continue => ArmBody::Continue {
                span: self.parse_jump(TokenKind::Continue)?,
            },
            _ => {
                let expr = self.with_struct_literals(true, |p| p.parse_expr())?;
                self.expect(TokenKind::Comma)?;
                ArmBody::Expr(expr)
            }
        };

        Ok(MatchArm {
            patterns,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_pattern(&mut self) -> Result<Pattern> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(Pattern::Number {
                    text: token.text,
                    span: token.span,
                })
            }
            TokenKind::CharLit(value) => {
                self.advance();
                Ok(Pattern::Char {
                    value,
                    span: token.span,
                })
            }
            TokenKind::Ident(name) if name == "_" => {
                self.advance();
                Ok(Pattern::Wildcard { span: token.span })
            }
            TokenKind::Ident(_) => {
                let mut segments = vec![self.parse_ident()?];
                while self.consume(&TokenKind::Dot) || self.consume(&TokenKind::ColonColon) {
                    segments.push(self.parse_ident()?);
                }
                Ok(Pattern::Path {
                    span: self.span_from(token.span),
                    segments,
                })
            }
            _ => Err(Error::ExpectedPattern {
                found: token.describe(),
                span: token.span,
            }),
        }
    }
}
