//! Expression parsing
//!
//! Binary expressions use precedence climbing: `parse_binary(min_prec)`
//! parses one unary operand, then keeps consuming operators whose table
//! strength exceeds `min_prec`, recursing with the operator's own strength
//! as the new floor.  Left-associativity falls out of the loop.
//!
//! The primary/postfix chain accepts any sequence of `.name`, `[expr]`,
//! `(args)` and `{field: expr, ...}`.  The composite-literal form is only
//! taken when the chain head is a bare identifier inside an expression
//! nesting context (`xnest >= 0`) or an array literal; this is what keeps
//! `if cond { ... }` unambiguous.

use crate::parser::ast::{AstField, ExprId, ExprKind};
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl Parser<'_> {
    /// Expr = BinaryExpr
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary(0)
    }

    /// BinaryExpr = UnaryExpr | BinaryExpr binary_op BinaryExpr
    fn parse_binary(&mut self, min_prec: u8) -> Result<ExprId, ParseError> {
        let loc = self.loc();
        let mut lhs = self.parse_unary()?;
        while self.tok.kind.precedence() > min_prec {
            let op = self.tok.kind;
            let prec = op.precedence();
            self.next()?;
            let kind = if op == TokenKind::As {
                // The cast operator takes a type, not an expression.
                let ty = self.parse_type()?;
                ExprKind::Cast { expr: lhs, ty }
            } else {
                let rhs = self.parse_binary(prec)?;
                ExprKind::Binary { op, lhs, rhs }
            };
            lhs = self.alloc_expr(loc.clone(), kind);
        }
        Ok(lhs)
    }

    /// UnaryExpr = PrimaryExpr | unary_op UnaryExpr
    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        let loc = self.loc();
        match self.tok.kind {
            TokenKind::Mul | TokenKind::Add | TokenKind::Sub | TokenKind::Not | TokenKind::And => {
                let op = self.tok.kind;
                self.next()?;
                let expr = self.parse_unary()?;
                Ok(self.alloc_expr(loc, ExprKind::Unary { op, expr }))
            }
            _ => self.parse_primary(),
        }
    }

    /// PrimaryExpr = Operand
    ///             | PrimaryExpr '.' ident
    ///             | PrimaryExpr '[' Expr ']'
    ///             | PrimaryExpr '(' ExprList ')'
    ///             | PrimaryExpr '{' FieldList '}'
    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let loc = self.loc();
        let mut x = self.parse_operand()?;
        loop {
            match self.tok.kind {
                TokenKind::Dot => {
                    self.next()?;
                    let name = self.parse_ident()?;
                    x = self.alloc_expr(loc.clone(), ExprKind::Member { expr: x, name });
                }
                TokenKind::LBrack => {
                    self.next()?;
                    self.xnest += 1;
                    let index = self.parse_expr()?;
                    self.xnest -= 1;
                    self.expect(TokenKind::RBrack)?;
                    x = self.alloc_expr(loc.clone(), ExprKind::Index { expr: x, index });
                }
                TokenKind::LParen => {
                    self.next()?;
                    self.xnest += 1;
                    let mut args = Vec::new();
                    if !self.accept(TokenKind::RParen)? {
                        self.parse_expr_list(&mut args, TokenKind::RParen)?;
                        self.expect(TokenKind::RParen)?;
                    }
                    self.xnest -= 1;
                    x = self.alloc_expr(
                        loc.clone(),
                        ExprKind::Call {
                            callee: x,
                            args: args.into(),
                        },
                    );
                }
                TokenKind::LBrace => {
                    let composite = match self.arena.exprs[x].kind {
                        ExprKind::Ident(_) => self.xnest >= 0,
                        ExprKind::Array { .. } | ExprKind::ArrayList { .. } => true,
                        _ => false,
                    };
                    if !composite {
                        break;
                    }
                    self.next()?;
                    self.xnest += 1;
                    let mut fields = Vec::new();
                    while self.tok.kind != TokenKind::RBrace {
                        let name = self.parse_ident()?;
                        self.expect(TokenKind::Colon)?;
                        let value = self.parse_expr()?;
                        fields.push(AstField { name, value });
                        if self.tok.kind == TokenKind::RBrace {
                            break;
                        }
                        self.expect(TokenKind::Comma)?;
                    }
                    self.xnest -= 1;
                    self.expect(TokenKind::RBrace)?;
                    x = self.alloc_expr(
                        loc.clone(),
                        ExprKind::Init {
                            base: x,
                            fields: fields.into(),
                        },
                    );
                }
                _ => break,
            }
        }
        Ok(x)
    }

    /// Operand = ident | int | float | string | char
    ///         | '(' ')' | '(' Expr ')' | '(' Expr ',' ExprList ')'
    ///         | '[' Expr ';' int ']'
    ///         | '[' ExprList ']'
    fn parse_operand(&mut self) -> Result<ExprId, ParseError> {
        let loc = self.loc();
        match self.tok.kind {
            TokenKind::Ident => {
                let name = self.parse_ident()?;
                Ok(self.alloc_expr(loc, ExprKind::Ident(name)))
            }
            TokenKind::Int => {
                let value = self.parse_int()?;
                Ok(self.alloc_expr(loc, ExprKind::LitInt(value)))
            }
            TokenKind::Float => {
                let value = self.parse_float()?;
                Ok(self.alloc_expr(loc, ExprKind::LitFloat(value)))
            }
            TokenKind::Str => {
                let value = self.parse_string()?;
                Ok(self.alloc_expr(loc, ExprKind::LitStr(value)))
            }
            TokenKind::Char => {
                let value = self.parse_char()?;
                Ok(self.alloc_expr(loc, ExprKind::LitChar(value)))
            }
            TokenKind::LParen => {
                self.next()?;
                if self.accept(TokenKind::RParen)? {
                    return Ok(self.alloc_expr(
                        loc,
                        ExprKind::Tuple {
                            elems: Box::default(),
                        },
                    ));
                }
                self.xnest += 1;
                let x = self.parse_expr()?;
                let result = if self.accept(TokenKind::Comma)? {
                    let mut elems = vec![x];
                    if self.tok.kind != TokenKind::RParen {
                        self.parse_expr_list(&mut elems, TokenKind::RParen)?;
                    }
                    self.alloc_expr(
                        loc,
                        ExprKind::Tuple {
                            elems: elems.into(),
                        },
                    )
                } else {
                    x
                };
                self.xnest -= 1;
                self.expect(TokenKind::RParen)?;
                Ok(result)
            }
            TokenKind::LBrack => {
                self.next()?;
                self.xnest += 1;
                let x = self.parse_expr()?;
                let result = if self.accept(TokenKind::Semi)? {
                    if self.tok.kind != TokenKind::Int {
                        return Err(
                            self.error(format!("unexpected {}, expecting array size", self.tok))
                        );
                    }
                    let size = self.parse_int()?;
                    self.alloc_expr(loc, ExprKind::Array { elem: x, size })
                } else {
                    let mut elems = vec![x];
                    if self.accept(TokenKind::Comma)? && self.tok.kind != TokenKind::RBrack {
                        self.parse_expr_list(&mut elems, TokenKind::RBrack)?;
                    }
                    self.alloc_expr(
                        loc,
                        ExprKind::ArrayList {
                            elems: elems.into(),
                        },
                    )
                };
                self.xnest -= 1;
                self.expect(TokenKind::RBrack)?;
                Ok(result)
            }
            _ => Err(self.error(format!("unexpected {}, expecting expression", self.tok))),
        }
    }

    /// ExprList = Expr | Expr ',' ExprList, with an optional trailing comma
    /// before `close`.
    pub(crate) fn parse_expr_list(
        &mut self,
        exprs: &mut Vec<ExprId>,
        close: TokenKind,
    ) -> Result<(), ParseError> {
        exprs.push(self.parse_expr()?);
        while self.accept(TokenKind::Comma)? {
            if self.tok.kind == close {
                break;
            }
            exprs.push(self.parse_expr()?);
        }
        Ok(())
    }
}
