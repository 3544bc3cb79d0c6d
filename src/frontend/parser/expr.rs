//! Expression parsing (precedence climbing)
//!
//! Binding strength, tightest first: postfix `::` `.` `[]`, unary prefix,
//! `as`, multiplicative, additive, relational, equality, `&&`, `||`,
//! assignment. Assignment is right-associative, the rest left.

use super::Parser;
use crate::frontend::ast::*;
use crate::frontend::token::TokenKind;
use crate::utils::{Error, Result};

impl Parser {
    pub(super) fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_expr_bp(0)
    }

    /// Parse expression with binding power
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr> {
        self.nested(|p| p.parse_binary(min_bp))
    }

    fn parse_binary(&mut self, min_bp: u8) -> Result<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let kind = self.current_kind().clone();
            let Some(bp) = kind.binary_precedence() else {
                break;
            };

            if bp < min_bp {
                break;
            }

            self.advance();

            if kind == TokenKind::As {
                let ty = self.parse_typeident()?;
                let span = left.span().merge(&ty.span);
                left = Expr::Cast {
                    expr: Box::new(left),
                    ty,
                    span,
                };
                continue;
            }

            let Some(op) = token_to_binop(&kind) else {
                break;
            };

            // Right-associative for assignment
            let next_bp = if op.is_assignment() { bp } else { bp + 1 };

            let right = self.parse_expr_bp(next_bp)?;
            let span = left.span().merge(&right.span());

            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.current_kind() {
            TokenKind::Star => UnOp::Deref,
            TokenKind::And => UnOp::AddrOf,
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Not => UnOp::Not,
            TokenKind::Plus => UnOp::Plus,
            _ => {
                let primary = self.parse_primary()?;
                return self.parse_postfix(primary);
            }
        };

        let start = self.advance().span;
        let operand = self.nested(Self::parse_unary)?;
        Ok(Expr::Unary {
            op,
            span: start.merge(&operand.span()),
            operand: Box::new(operand),
        })
    }

    fn parse_postfix(&mut self, mut expr: Expr) -> Result<Expr> {
        loop {
            let op = if self.consume(&TokenKind::Dot) {
                BinOp::Member
            } else if self.consume(&TokenKind::ColonColon) {
                BinOp::Path
            } else if self.consume(&TokenKind::LBracket) {
                let index = self.with_struct_literals(true, |p| p.parse_expr())?;
                let end = self.expect(TokenKind::RBracket)?;
                expr = Expr::Binary {
                    op: BinOp::Index,
                    span: expr.span().merge(&end.span),
                    left: Box::new(expr),
                    right: Box::new(index),
                };
                continue;
            } else {
                break;
            };

            let member = self.parse_member()?;
            expr = Expr::Binary {
                op,
                span: expr.span().merge(&member.span()),
                left: Box::new(expr),
                right: Box::new(member),
            };
        }
        Ok(expr)
    }

    /// Right-hand side of `.` or `::`: a name or a call
    fn parse_member(&mut self) -> Result<Expr> {
        let name = self.parse_ident()?;
        if self.check(&TokenKind::LParen) {
            self.parse_call(name)
        } else {
            Ok(Expr::Ident(name))
        }
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let token = self.current().clone();

        let expr = match token.kind {
            // Literals
            TokenKind::Number => {
                self.advance();
                Expr::Literal(Literal::Number {
                    text: token.text,
                    span: token.span,
                })
            }
            TokenKind::StringLit(value) => {
                self.advance();
                Expr::Literal(Literal::String {
                    value,
                    span: token.span,
                })
            }
            TokenKind::CharLit(value) => {
                self.advance();
                Expr::Literal(Literal::Char {
                    value,
                    span: token.span,
                })
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                Expr::Literal(Literal::Bool {
                    value: token.kind == TokenKind::True,
                    span: token.span,
                })
            }
            TokenKind::Null => {
                self.advance();
                Expr::Literal(Literal::Null { span: token.span })
            }

            // sizeof(Type)
            TokenKind::Sizeof => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let ty = self.parse_typeident()?;
                let end = self.expect(TokenKind::RParen)?;
                Expr::SizeOf {
                    ty,
                    span: token.span.merge(&end.span),
                }
            }

            // Parenthesized
            TokenKind::LParen => {
                self.advance();
                let inner = self.with_struct_literals(true, |p| p.parse_expr())?;
                let end = self.expect(TokenKind::RParen)?;
                Expr::Group {
                    inner: Box::new(inner),
                    span: token.span.merge(&end.span),
                }
            }

            // Array literal
            TokenKind::LBracket => {
                self.advance();
                let elements = self.parse_expr_list(TokenKind::RBracket)?;
                let end = self.expect(TokenKind::RBracket)?;
                Expr::ArrayInit {
                    elements,
                    span: token.span.merge(&end.span),
                }
            }

            // Call, struct literal or plain identifier
            TokenKind::Ident(_) => {
                let name = self.parse_ident()?;
                if self.check(&TokenKind::LParen) {
                    self.parse_call(name)?
                } else if self.check(&TokenKind::LBrace) && !self.no_struct_literal {
                    self.parse_struct_init(name)?
                } else {
                    Expr::Ident(name)
                }
            }

            _ => {
                return Err(Error::ExpectedExpr {
                    found: token.describe(),
                    span: token.span,
                })
            }
        };

        Ok(expr)
    }

    fn parse_call(&mut self, callee: Ident) -> Result<Expr> {
        self.expect(TokenKind::LParen)?;
        let args = self.parse_expr_list(TokenKind::RParen)?;
        let end = self.expect(TokenKind::RParen)?;

        Ok(Expr::Call {
            span: callee.span.merge(&end.span),
            callee,
            args,
        })
    }

    /// `Name { field: value, ... }` after the name
    fn parse_struct_init(&mut self, name: Ident) -> Result<Expr> {
        self.expect(TokenKind::LBrace)?;

        let fields = self.with_struct_literals(true, |p| {
            let mut fields = Vec::new();
            while !p.check(&TokenKind::RBrace) && !p.is_at_end() {
                let field_name = p.parse_ident()?;
                p.expect(TokenKind::Colon)?;
                let value = p.parse_expr()?;
                fields.push(FieldInit {
                    span: field_name.span.merge(&value.span()),
                    name: field_name,
                    value,
                });

                if !p.consume(&TokenKind::Comma) {
                    break;
                }
            }
            Ok(fields)
        })?;

        let end = self.expect(TokenKind::RBrace)?;
        Ok(Expr::StructInit {
            span: name.span.merge(&end.span),
            name,
            fields,
        })
    }

    /// Comma-separated expressions with an optional trailing comma, up to
    /// (not including) `close`
    fn parse_expr_list(&mut self, close: TokenKind) -> Result<Vec<Expr>> {
        self.with_struct_literals(true, |p| {
            let mut items = Vec::new();
            while !p.check(&close) && !p.is_at_end() {
                items.push(p.parse_expr()?);
                if !p.consume(&TokenKind::Comma) {
                    break;
                }
            }
            Ok(items)
        })
    }
}

fn token_to_binop(kind: &TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Plus => Some(BinOp::Add),
        TokenKind::Minus => Some(BinOp::Sub),
        TokenKind::Star => Some(BinOp::Mul),
        TokenKind::Slash => Some(BinOp::Div),
        TokenKind::Percent => Some(BinOp::Mod),
        TokenKind::EqEq => Some(BinOp::Eq),
        TokenKind::Ne => Some(BinOp::Ne),
        TokenKind::Lt => Some(BinOp::Lt),
        TokenKind::Le => Some(BinOp::Le),
        TokenKind::Gt => Some(BinOp::Gt),
        TokenKind::Ge => Some(BinOp::Ge),
        TokenKind::AndAnd => Some(BinOp::And),
        TokenKind::OrOr => Some(BinOp::Or),
        TokenKind::Eq => Some(BinOp::Assign),
        TokenKind::PlusEq => Some(BinOp::AddAssign),
        TokenKind::MinusEq => Some(BinOp::SubAssign),
        TokenKind::StarEq => Some(BinOp::MulAssign),
        TokenKind::SlashEq => Some(BinOp::DivAssign),
        TokenKind::PercentEq => Some(BinOp::ModAssign),
        _ => None,
    }
}
