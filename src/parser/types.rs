//! Type-expression parsing
//!
//! Type = ident | '*' Type | '[' Type ']' | '[' Type ';' int ']'
//!      | '(' ')' | '(' Type ')' | '(' Type ',' TypeList ')'
//!
//! `(T)` is plain grouping; the singleton tuple is written `(T,)`.

use crate::parser::ast::{TypeExprId, TypeExprKind};
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl Parser<'_> {
    pub(crate) fn parse_type(&mut self) -> Result<TypeExprId, ParseError> {
        let loc = self.loc();
        match self.tok.kind {
            TokenKind::Ident => {
                let name = self.parse_ident()?;
                Ok(self.alloc_type(loc, TypeExprKind::Name(name)))
            }
            TokenKind::Mul => {
                self.next()?;
                let inner = self.parse_type()?;
                Ok(self.alloc_type(loc, TypeExprKind::Ptr(inner)))
            }
            TokenKind::LParen => self.parse_type_tuple(),
            TokenKind::LBrack => {
                self.next()?;
                let elem = self.parse_type()?;
                if self.accept(TokenKind::Semi)? {
                    let size = self.parse_int()?;
                    self.expect(TokenKind::RBrack)?;
                    Ok(self.alloc_type(loc, TypeExprKind::Array { elem, size }))
                } else {
                    self.expect(TokenKind::RBrack)?;
                    Ok(self.alloc_type(loc, TypeExprKind::Slice(elem)))
                }
            }
            _ => Err(self.error(format!("unexpected {}, expecting type", self.tok))),
        }
    }

    /// TypeTuple = '(' ')' | '(' Type ')' | '(' Type ',' TypeList? ')'
    pub(crate) fn parse_type_tuple(&mut self) -> Result<TypeExprId, ParseError> {
        let loc = self.loc();
        self.expect(TokenKind::LParen)?;
        if self.accept(TokenKind::RParen)? {
            return Ok(self.alloc_type(loc, TypeExprKind::Tuple(Box::default())));
        }
        let ty = self.parse_type()?;
        if self.accept(TokenKind::Comma)? {
            let mut types = vec![ty];
            if self.tok.kind != TokenKind::RParen {
                self.parse_type_list(&mut types)?;
            }
            self.expect(TokenKind::RParen)?;
            return Ok(self.alloc_type(loc, TypeExprKind::Tuple(types.into())));
        }
        self.expect(TokenKind::RParen)?;
        Ok(ty)
    }

    /// TypeList = Type { ',' Type }, with an optional trailing comma before
    /// the closing parenthesis.
    fn parse_type_list(&mut self, types: &mut Vec<TypeExprId>) -> Result<(), ParseError> {
        types.push(self.parse_type()?);
        while self.accept(TokenKind::Comma)? {
            if self.tok.kind == TokenKind::RParen {
                break;
            }
            types.push(self.parse_type()?);
        }
        Ok(())
    }
}
