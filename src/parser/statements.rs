//! Statement parsing
//!
//! Statements end at an explicit or synthesized terminator.  A lone
//! terminator is an empty statement and produces no node.  `if` and `for`
//! parse their condition with the expression nesting level pushed below
//! zero, so a composite literal cannot swallow the statement's block.

use crate::parser::ast::{ExprId, StmtId, StmtKind};
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl Parser<'_> {
    /// StmtList = { Stmt ';' }, up to `}` or end of input.
    pub(crate) fn parse_stmt_list(&mut self) -> Result<Box<[StmtId]>, ParseError> {
        let mut stmts = Vec::new();
        while self.tok.kind != TokenKind::Eof && self.tok.kind != TokenKind::RBrace {
            if let Some(stmt) = self.parse_stmt()? {
                stmts.push(stmt);
            }
            if !self.accept(TokenKind::Semi)? && self.tok.kind != TokenKind::RBrace {
                return Err(self.error(format!("unexpected {} at end of statement", self.tok)));
            }
        }
        Ok(stmts.into())
    }

    /// Stmt = DeclLet | DeclConst | If | For | 'return' Expr? | Block
    ///      | Expr assign_op Expr | Expr | empty
    fn parse_stmt(&mut self) -> Result<Option<StmtId>, ParseError> {
        let loc = self.loc();
        let kind = match self.tok.kind {
            TokenKind::Let => {
                self.next()?;
                StmtKind::Decl(self.parse_decl_let(false)?)
            }
            TokenKind::Const => {
                self.next()?;
                StmtKind::Decl(self.parse_decl_const()?)
            }
            TokenKind::If => {
                self.next()?;
                let cond = self.parse_header_expr()?;
                self.expect(TokenKind::LBrace)?;
                let body = self.parse_stmt_list()?;
                self.expect(TokenKind::RBrace)?;
                let els = if self.accept(TokenKind::Else)? {
                    let else_loc = self.loc();
                    self.expect(TokenKind::LBrace)?;
                    let stmts = self.parse_stmt_list()?;
                    self.expect(TokenKind::RBrace)?;
                    Some(self.alloc_stmt(else_loc, StmtKind::Block(stmts)))
                } else {
                    None
                };
                StmtKind::If { cond, body, els }
            }
            TokenKind::For => {
                self.next()?;
                let cond = self.parse_header_expr()?;
                self.expect(TokenKind::LBrace)?;
                let body = self.parse_stmt_list()?;
                self.expect(TokenKind::RBrace)?;
                StmtKind::For { cond, body }
            }
            TokenKind::Return => {
                self.next()?;
                let expr = if self.tok.kind != TokenKind::Semi {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                StmtKind::Return(expr)
            }
            TokenKind::LBrace => {
                self.next()?;
                let body = self.parse_stmt_list()?;
                self.expect(TokenKind::RBrace)?;
                StmtKind::Block(body)
            }
            TokenKind::Semi => return Ok(None),
            _ => {
                let lhs = self.parse_expr()?;
                if self.tok.kind.is_assign_op() {
                    let op = self.tok.kind;
                    self.next()?;
                    let rhs = self.parse_expr()?;
                    StmtKind::Assign { op, lhs, rhs }
                } else {
                    StmtKind::Expr(lhs)
                }
            }
        };
        Ok(Some(self.alloc_stmt(loc, kind)))
    }

    /// Condition of an `if`/`for` header, parsed outside any expression
    /// nesting context so `{` always starts the block.
    fn parse_header_expr(&mut self) -> Result<ExprId, ParseError> {
        let saved = std::mem::replace(&mut self.xnest, -1);
        let result = self.parse_expr();
        self.xnest = saved;
        result
    }
}
