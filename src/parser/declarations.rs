//! Declaration parsing
//!
//! Top-level declarations: `let`, `const`, `fn`, `struct`, `enum` and
//! `type`, with `let`/`fn` optionally `extern`-qualified.  An extern `let`
//! requires an explicit type and takes no initializer; an extern `fn` has a
//! signature and no body.

use crate::parser::ast::{AstParam, DeclId, DeclKind};
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl Parser<'_> {
    /// Decl = 'extern'? (DeclFn | DeclLet) | DeclConst | DeclEnum
    ///      | DeclStruct | DeclType
    pub(crate) fn parse_decl(&mut self) -> Result<DeclId, ParseError> {
        match self.tok.kind {
            TokenKind::Extern => {
                self.next()?;
                if self.accept(TokenKind::Fn)? {
                    self.parse_decl_fn(true)
                } else if self.accept(TokenKind::Let)? {
                    self.parse_decl_let(true)
                } else {
                    Err(self.error(format!(
                        "unexpected {}, expecting fn or let after extern",
                        self.tok
                    )))
                }
            }
            TokenKind::Fn => {
                self.next()?;
                self.parse_decl_fn(false)
            }
            TokenKind::Let => {
                self.next()?;
                self.parse_decl_let(false)
            }
            TokenKind::Const => {
                self.next()?;
                self.parse_decl_const()
            }
            TokenKind::Enum => {
                self.next()?;
                self.parse_decl_enum()
            }
            TokenKind::Struct => {
                self.next()?;
                self.parse_decl_struct()
            }
            TokenKind::Type => {
                self.next()?;
                self.parse_decl_type()
            }
            _ => Err(self.error(format!(
                "non-declaration statement outside function body ({})",
                self.tok
            ))),
        }
    }

    /// DeclFn = 'fn' ident '(' ParamList ')' ('->' Type)? '{' StmtList '}'
    ///        | 'extern' 'fn' ident '(' ParamList ')' ('->' Type)?
    pub(crate) fn parse_decl_fn(&mut self, is_extern: bool) -> Result<DeclId, ParseError> {
        let loc = self.loc();
        let name = self.parse_ident()?;

        self.expect(TokenKind::LParen)?;
        let params = if self.tok.kind != TokenKind::RParen {
            self.parse_param_list(TokenKind::RParen)?
        } else {
            Vec::new()
        };
        self.expect(TokenKind::RParen)?;

        let ret = if self.accept(TokenKind::Arrow)? {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = if is_extern {
            None
        } else {
            self.expect(TokenKind::LBrace)?;
            let stmts = self.parse_stmt_list()?;
            self.expect(TokenKind::RBrace)?;
            Some(stmts)
        };

        Ok(self.alloc_decl(
            loc,
            name,
            DeclKind::Fn {
                params: params.into(),
                ret,
                body,
                is_extern,
            },
        ))
    }

    /// DeclLet = 'let' ident '=' Expr | 'extern' 'let' ident ':' Type
    pub(crate) fn parse_decl_let(&mut self, is_extern: bool) -> Result<DeclId, ParseError> {
        let loc = self.loc();
        let name = self.parse_ident()?;
        if is_extern {
            self.expect(TokenKind::Colon)?;
            let ty = self.parse_type()?;
            Ok(self.alloc_decl(
                loc,
                name,
                DeclKind::Let {
                    ty: Some(ty),
                    init: None,
                    is_extern: true,
                },
            ))
        } else {
            self.expect(TokenKind::Assign)?;
            let init = self.parse_expr()?;
            Ok(self.alloc_decl(
                loc,
                name,
                DeclKind::Let {
                    ty: None,
                    init: Some(init),
                    is_extern: false,
                },
            ))
        }
    }

    /// DeclConst = 'const' ident '=' Expr
    pub(crate) fn parse_decl_const(&mut self) -> Result<DeclId, ParseError> {
        let loc = self.loc();
        let name = self.parse_ident()?;
        self.expect(TokenKind::Assign)?;
        let init = self.parse_expr()?;
        Ok(self.alloc_decl(loc, name, DeclKind::Const { init }))
    }

    /// DeclStruct = 'struct' ident '{' ParamList '}'
    fn parse_decl_struct(&mut self) -> Result<DeclId, ParseError> {
        let loc = self.loc();
        let name = self.parse_ident()?;
        self.expect(TokenKind::LBrace)?;
        let fields = if self.tok.kind != TokenKind::RBrace {
            self.parse_param_list(TokenKind::RBrace)?
        } else {
            Vec::new()
        };
        self.expect(TokenKind::RBrace)?;
        Ok(self.alloc_decl(
            loc,
            name,
            DeclKind::Struct {
                fields: fields.into(),
            },
        ))
    }

    /// DeclEnum = 'enum' ident '{' { ident TypeTuple? ',' } '}'
    fn parse_decl_enum(&mut self) -> Result<DeclId, ParseError> {
        let loc = self.loc();
        let name = self.parse_ident()?;
        self.expect(TokenKind::LBrace)?;
        let mut variants = Vec::new();
        while self.tok.kind != TokenKind::RBrace {
            let vname = self.parse_ident()?;
            let ty = match self.tok.kind {
                TokenKind::LParen => Some(self.parse_type_tuple()?),
                TokenKind::LBrace => {
                    return Err(self.error("enum struct variants are not supported"));
                }
                _ => None,
            };
            variants.push(AstParam { name: vname, ty });
            if self.tok.kind == TokenKind::RBrace {
                break;
            }
            self.expect(TokenKind::Comma)?;
        }
        self.expect(TokenKind::RBrace)?;
        Ok(self.alloc_decl(
            loc,
            name,
            DeclKind::Enum {
                variants: variants.into(),
            },
        ))
    }

    /// DeclType = 'type' ident '=' Type
    fn parse_decl_type(&mut self) -> Result<DeclId, ParseError> {
        let loc = self.loc();
        let name = self.parse_ident()?;
        self.expect(TokenKind::Assign)?;
        let ty = self.parse_type()?;
        Ok(self.alloc_decl(loc, name, DeclKind::TypeAlias { ty }))
    }

    /// ParamList = ident ':' Type { ',' ident ':' Type }, with an optional
    /// trailing comma before `close`.  Shared by function parameters and
    /// struct fields.
    fn parse_param_list(&mut self, close: TokenKind) -> Result<Vec<AstParam>, ParseError> {
        let mut params = Vec::new();
        loop {
            let name = self.parse_ident()?;
            self.expect(TokenKind::Colon)?;
            let ty = self.parse_type()?;
            params.push(AstParam { name, ty: Some(ty) });
            if self.tok.kind == close {
                break;
            }
            self.expect(TokenKind::Comma)?;
            if self.tok.kind == close {
                break;
            }
        }
        Ok(params)
    }
}
