//! Main parser coordinator
//!
//! Provides the [`Parser`] struct and core parsing infrastructure: the
//! one-token lookahead over the streaming lexer, the expect/accept helpers,
//! literal decoding, and the `parse_file` entry point.
//!
//! The grammar productions are split across sibling modules using
//! `impl Parser` blocks:
//! - `declarations`: top-level `let`/`const`/`fn`/`struct`/`enum`/`type`
//! - `statements`: statement lists, `if`, `for`, `return`, assignment
//! - `expressions`: precedence climbing and the primary/postfix chain
//! - `types`: type expressions
//!
//! Parsing is recursive descent with exactly one token of lookahead and no
//! backtracking; the first unexpected token is a fatal [`ParseError`].

use std::rc::Rc;

use thiserror::Error;

use crate::intern::{Interner, Name};
use crate::parser::ast::{
    AstArena, AstDecl, AstExpr, AstFile, AstStmt, AstType, DeclId, DeclKind, ExprId, ExprKind,
    FileLoc, StmtId, StmtKind, TypeExprId, TypeExprKind,
};
use crate::parser::lexer::{LexError, Lexer};
use crate::parser::token::{Token, TokenKind};

/// Syntax error.  Always fatal: the caller reports it once and stops.
#[derive(Debug, Clone, Error)]
#[error("{loc}: parse error: {message}")]
pub struct ParseError {
    pub message: String,
    pub loc: FileLoc,
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            loc: err.loc,
        }
    }
}

/// Recursive descent parser with one token of lookahead.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    pub(crate) tok: Token<'src>,
    /// Expression nesting level; composite literals after a bare identifier
    /// are only accepted while it is non-negative.  Control-flow headers
    /// parse their condition at level -1.
    pub(crate) xnest: i32,
    pub(crate) interner: &'src mut Interner,
    pub(crate) arena: AstArena,
    file: Rc<str>,
}

impl<'src> Parser<'src> {
    pub fn new(
        file: &str,
        src: &'src str,
        interner: &'src mut Interner,
    ) -> Result<Self, ParseError> {
        let file: Rc<str> = Rc::from(file);
        let mut lexer = Lexer::new(file.clone(), src);
        let tok = lexer.next_token()?;
        Ok(Self {
            lexer,
            tok,
            xnest: 0,
            interner,
            arena: AstArena::default(),
            file,
        })
    }

    /// Parse a whole file: top-level declarations separated by terminators.
    pub fn parse_file(mut self) -> Result<AstFile, ParseError> {
        let mut decls = Vec::new();
        while self.tok.kind != TokenKind::Eof {
            // Stray terminators between declarations are skipped.
            if self.accept(TokenKind::Semi)? {
                continue;
            }
            decls.push(self.parse_decl()?);
            if self.tok.kind == TokenKind::Eof {
                break;
            }
            self.expect(TokenKind::Semi)?;
        }
        Ok(AstFile {
            name: self.file,
            decls: decls.into(),
            arena: self.arena,
        })
    }

    // ===== Cursor helpers =====

    pub(crate) fn next(&mut self) -> Result<(), ParseError> {
        self.tok = self.lexer.next_token()?;
        Ok(())
    }

    /// Location of the current token.
    pub(crate) fn loc(&self) -> FileLoc {
        FileLoc {
            file: self.file.clone(),
            line: self.tok.line,
            col: self.tok.col,
        }
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            loc: self.loc(),
        }
    }

    /// Consume a token of the given kind or fail.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.tok.kind != kind {
            return Err(self.error(format!(
                "unexpected {}, expecting {}",
                self.tok,
                kind.symbol()
            )));
        }
        self.next()
    }

    /// Consume a token of the given kind if present.
    pub(crate) fn accept(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.tok.kind == kind {
            self.next()?;
            return Ok(true);
        }
        Ok(false)
    }

    // ===== Terminal parsers =====

    pub(crate) fn parse_ident(&mut self) -> Result<Name, ParseError> {
        if self.tok.kind != TokenKind::Ident {
            return Err(self.error(format!("unexpected {}, expecting identifier", self.tok)));
        }
        let name = self.interner.intern(self.tok.lit);
        self.next()?;
        Ok(name)
    }

    /// Integer literal; the base is taken from the spelling (`0x` hex,
    /// leading `0` octal, decimal otherwise).
    pub(crate) fn parse_int(&mut self) -> Result<u64, ParseError> {
        if self.tok.kind != TokenKind::Int {
            return Err(self.error(format!("unexpected {}, expecting int", self.tok)));
        }
        let lit = self.tok.lit;
        let value = if let Some(hex) = lit.strip_prefix("0x").or_else(|| lit.strip_prefix("0X")) {
            u64::from_str_radix(hex, 16)
        } else if lit.len() > 1 && lit.starts_with('0') {
            u64::from_str_radix(&lit[1..], 8)
        } else {
            lit.parse()
        };
        let value = match value {
            Ok(v) => v,
            Err(_) => return Err(self.error(format!("integer literal {lit} out of range"))),
        };
        self.next()?;
        Ok(value)
    }

    pub(crate) fn parse_float(&mut self) -> Result<f64, ParseError> {
        if self.tok.kind != TokenKind::Float {
            return Err(self.error(format!("unexpected {}, expecting float", self.tok)));
        }
        let value = match self.tok.lit.parse() {
            Ok(v) => v,
            Err(_) => {
                return Err(self.error(format!("float literal {} out of range", self.tok.lit)))
            }
        };
        self.next()?;
        Ok(value)
    }

    /// String literal with the surrounding quotes stripped; escapes are kept
    /// raw (they were validated by the lexer).
    pub(crate) fn parse_string(&mut self) -> Result<Box<str>, ParseError> {
        if self.tok.kind != TokenKind::Str {
            return Err(self.error(format!("unexpected {}, expecting string", self.tok)));
        }
        let lit = self.tok.lit;
        let value: Box<str> = lit[1..lit.len() - 1].into();
        self.next()?;
        Ok(value)
    }

    /// Character literal decoded to its single character.
    pub(crate) fn parse_char(&mut self) -> Result<char, ParseError> {
        if self.tok.kind != TokenKind::Char {
            return Err(self.error(format!("unexpected {}, expecting char literal", self.tok)));
        }
        let lit = self.tok.lit;
        let inner = &lit[1..lit.len() - 1];
        let value = match decode_char(inner) {
            Some(c) => c,
            None => return Err(self.error(format!("invalid character literal {lit}"))),
        };
        self.next()?;
        Ok(value)
    }

    // ===== Arena helpers =====

    pub(crate) fn alloc_expr(&mut self, loc: FileLoc, kind: ExprKind) -> ExprId {
        self.arena.exprs.alloc(AstExpr { loc, kind })
    }

    pub(crate) fn alloc_stmt(&mut self, loc: FileLoc, kind: StmtKind) -> StmtId {
        self.arena.stmts.alloc(AstStmt { loc, kind })
    }

    pub(crate) fn alloc_decl(&mut self, loc: FileLoc, name: Name, kind: DeclKind) -> DeclId {
        self.arena.decls.alloc(AstDecl { loc, name, kind })
    }

    pub(crate) fn alloc_type(&mut self, loc: FileLoc, kind: TypeExprKind) -> TypeExprId {
        self.arena.types.alloc(AstType { loc, kind })
    }
}

/// Decode the inside of a character literal (quotes already stripped).
///
/// The lexer has validated the shape, so a `None` here means a literal the
/// lexer should have rejected.
fn decode_char(inner: &str) -> Option<char> {
    let mut chars = inner.chars();
    let first = chars.next()?;
    if first != '\\' {
        return if chars.next().is_none() {
            Some(first)
        } else {
            None
        };
    }
    let esc = chars.next()?;
    let rest = chars.as_str();
    let code = match esc {
        'a' => 0x07,
        'b' => 0x08,
        'f' => 0x0C,
        'n' => 0x0A,
        'r' => 0x0D,
        't' => 0x09,
        'v' => 0x0B,
        '\\' => 0x5C,
        '0'..='7' => u32::from_str_radix(&format!("{esc}{rest}"), 8).ok()?,
        'x' | 'u' | 'U' => u32::from_str_radix(rest, 16).ok()?,
        _ => return None,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::AstParam;

    pub(crate) fn parse(src: &str) -> Result<AstFile, ParseError> {
        let mut interner = Interner::new();
        Parser::new("test.sb", src, &mut interner)?.parse_file()
    }

    fn parse_ok(src: &str) -> AstFile {
        match parse(src) {
            Ok(file) => file,
            Err(err) => panic!("parse failed: {err}"),
        }
    }

    #[test]
    fn test_parse_simple_function() {
        let file = parse_ok("fn main() -> i32 {\n    return 0\n}\n");
        assert_eq!(file.decls.len(), 1);
        let decl = &file.arena.decls[file.decls[0]];
        match &decl.kind {
            DeclKind::Fn {
                params,
                ret,
                body,
                is_extern,
            } => {
                assert!(params.is_empty());
                assert!(ret.is_some());
                assert!(!is_extern);
                let body = body.as_ref().expect("function body");
                assert_eq!(body.len(), 1);
                assert!(matches!(
                    file.arena.stmts[body[0]].kind,
                    StmtKind::Return(Some(_))
                ));
            }
            other => panic!("expected fn decl, got {other:?}"),
        }
    }

    #[test]
    fn test_precedence_multiplication_binds_tighter() {
        let file = parse_ok("const k = 1 + 2 * 3\n");
        let decl = &file.arena.decls[file.decls[0]];
        let init = match decl.kind {
            DeclKind::Const { init } => init,
            _ => panic!("expected const"),
        };
        match &file.arena.exprs[init].kind {
            ExprKind::Binary { op, lhs, rhs } => {
                assert_eq!(*op, TokenKind::Add);
                assert!(matches!(
                    file.arena.exprs[*lhs].kind,
                    ExprKind::LitInt(1)
                ));
                match &file.arena.exprs[*rhs].kind {
                    ExprKind::Binary { op, lhs, rhs } => {
                        assert_eq!(*op, TokenKind::Mul);
                        assert!(matches!(file.arena.exprs[*lhs].kind, ExprKind::LitInt(2)));
                        assert!(matches!(file.arena.exprs[*rhs].kind, ExprKind::LitInt(3)));
                    }
                    other => panic!("expected binary rhs, got {other:?}"),
                }
            }
            other => panic!("expected binary expr, got {other:?}"),
        }
    }

    #[test]
    fn test_left_associativity() {
        let file = parse_ok("const k = 1 - 2 - 3\n");
        let decl = &file.arena.decls[file.decls[0]];
        let init = match decl.kind {
            DeclKind::Const { init } => init,
            _ => panic!("expected const"),
        };
        // (1 - 2) - 3
        match &file.arena.exprs[init].kind {
            ExprKind::Binary { op, lhs, rhs } => {
                assert_eq!(*op, TokenKind::Sub);
                assert!(matches!(file.arena.exprs[*rhs].kind, ExprKind::LitInt(3)));
                assert!(matches!(
                    file.arena.exprs[*lhs].kind,
                    ExprKind::Binary {
                        op: TokenKind::Sub,
                        ..
                    }
                ));
            }
            other => panic!("expected binary expr, got {other:?}"),
        }
    }

    #[test]
    fn test_cast_parses_a_type() {
        let file = parse_ok("const k = x as u32 + 1\n");
        let decl = &file.arena.decls[file.decls[0]];
        let init = match decl.kind {
            DeclKind::Const { init } => init,
            _ => panic!("expected const"),
        };
        // `+` binds tighter than `as`: (x as u32) + 1.
        match &file.arena.exprs[init].kind {
            ExprKind::Binary { op, lhs, .. } => {
                assert_eq!(*op, TokenKind::Add);
                assert!(matches!(file.arena.exprs[*lhs].kind, ExprKind::Cast { .. }));
            }
            other => panic!("expected binary expr, got {other:?}"),
        }
    }

    #[test]
    fn test_if_condition_is_not_a_composite_literal() {
        let file = parse_ok("fn f() {\n    if done {\n        return\n    }\n}\n");
        let decl = &file.arena.decls[file.decls[0]];
        let body = match &decl.kind {
            DeclKind::Fn { body: Some(b), .. } => b,
            other => panic!("expected fn with body, got {other:?}"),
        };
        match &file.arena.stmts[body[0]].kind {
            StmtKind::If { cond, body, els } => {
                assert!(matches!(file.arena.exprs[*cond].kind, ExprKind::Ident(_)));
                assert_eq!(body.len(), 1);
                assert!(els.is_none());
            }
            other => panic!("expected if stmt, got {other:?}"),
        }
    }

    #[test]
    fn test_composite_literal_in_initializer() {
        let file = parse_ok("fn f() {\n    let p = Point{x: 1, y: 2,}\n}\n");
        let decl = &file.arena.decls[file.decls[0]];
        let body = match &decl.kind {
            DeclKind::Fn { body: Some(b), .. } => b,
            other => panic!("expected fn with body, got {other:?}"),
        };
        let inner = match file.arena.stmts[body[0]].kind {
            StmtKind::Decl(d) => d,
            ref other => panic!("expected decl stmt, got {other:?}"),
        };
        let init = match file.arena.decls[inner].kind {
            DeclKind::Let {
                init: Some(init), ..
            } => init,
            ref other => panic!("expected let, got {other:?}"),
        };
        match &file.arena.exprs[init].kind {
            ExprKind::Init { fields, .. } => assert_eq!(fields.len(), 2),
            other => panic!("expected composite literal, got {other:?}"),
        }
    }

    #[test]
    fn test_composite_literal_in_parenthesized_condition() {
        // Inside parentheses the nesting level is positive again.
        parse_ok("fn f() {\n    if (Point{x: 1}).x == 1 { }\n}\n");
    }

    #[test]
    fn test_struct_and_trailing_commas() {
        let file = parse_ok("struct Point {\n    x: i32,\n    y: i32,\n}\n");
        let decl = &file.arena.decls[file.decls[0]];
        match &decl.kind {
            DeclKind::Struct { fields } => {
                assert_eq!(fields.len(), 2);
                assert!(matches!(fields[0], AstParam { ty: Some(_), .. }));
            }
            other => panic!("expected struct, got {other:?}"),
        }
        // No trailing comma is fine too.
        parse_ok("struct Point { x: i32, y: i32 }\n");
    }

    #[test]
    fn test_enum_variants() {
        let file = parse_ok("enum Shape {\n    Dot,\n    Square(u32),\n    Rect(u32, u32),\n}\n");
        let decl = &file.arena.decls[file.decls[0]];
        match &decl.kind {
            DeclKind::Enum { variants } => {
                assert_eq!(variants.len(), 3);
                assert!(variants[0].ty.is_none());
                assert!(variants[1].ty.is_some());
            }
            other => panic!("expected enum, got {other:?}"),
        }
    }

    #[test]
    fn test_extern_declarations() {
        let file = parse_ok("extern fn write(fd: i32, len: usize) -> isize\nextern let errno: i32\n");
        assert_eq!(file.decls.len(), 2);
        match &file.arena.decls[file.decls[0]].kind {
            DeclKind::Fn {
                body, is_extern, ..
            } => {
                assert!(*is_extern);
                assert!(body.is_none());
            }
            other => panic!("expected extern fn, got {other:?}"),
        }
        match &file.arena.decls[file.decls[1]].kind {
            DeclKind::Let {
                ty,
                init,
                is_extern,
            } => {
                assert!(*is_extern);
                assert!(ty.is_some());
                assert!(init.is_none());
            }
            other => panic!("expected extern let, got {other:?}"),
        }
    }

    #[test]
    fn test_type_alias_and_tuple_types() {
        let file = parse_ok("type Pair = (u32, bool)\ntype One = (u32,)\ntype Unit = ()\ntype Same = (u32)\n");
        let kinds: Vec<_> = file
            .decls
            .iter()
            .map(|&d| match file.arena.decls[d].kind {
                DeclKind::TypeAlias { ty } => &file.arena.types[ty].kind,
                ref other => panic!("expected type alias, got {other:?}"),
            })
            .collect();
        assert!(matches!(kinds[0], TypeExprKind::Tuple(elems) if elems.len() == 2));
        assert!(matches!(kinds[1], TypeExprKind::Tuple(elems) if elems.len() == 1));
        assert!(matches!(kinds[2], TypeExprKind::Tuple(elems) if elems.is_empty()));
        // A parenthesized type is just the type.
        assert!(matches!(kinds[3], TypeExprKind::Name(_)));
    }

    #[test]
    fn test_pointer_array_slice_types() {
        let file = parse_ok("type A = *u8\ntype B = [u8; 4]\ntype C = [u8]\n");
        let kinds: Vec<_> = file
            .decls
            .iter()
            .map(|&d| match file.arena.decls[d].kind {
                DeclKind::TypeAlias { ty } => &file.arena.types[ty].kind,
                ref other => panic!("expected type alias, got {other:?}"),
            })
            .collect();
        assert!(matches!(kinds[0], TypeExprKind::Ptr(_)));
        assert!(matches!(kinds[1], TypeExprKind::Array { size: 4, .. }));
        assert!(matches!(kinds[2], TypeExprKind::Slice(_)));
    }

    #[test]
    fn test_assignment_statements() {
        let file = parse_ok("fn f() {\n    x = 1\n    x += 2\n    x <<= 3\n}\n");
        let decl = &file.arena.decls[file.decls[0]];
        let body = match &decl.kind {
            DeclKind::Fn { body: Some(b), .. } => b,
            other => panic!("expected fn with body, got {other:?}"),
        };
        let ops: Vec<_> = body
            .iter()
            .map(|&s| match file.arena.stmts[s].kind {
                StmtKind::Assign { op, .. } => op,
                ref other => panic!("expected assignment, got {other:?}"),
            })
            .collect();
        assert_eq!(
            ops,
            vec![TokenKind::Assign, TokenKind::AddAssign, TokenKind::ShlAssign]
        );
    }

    #[test]
    fn test_postfix_chain() {
        let file = parse_ok("const k = table[i].field(1, 2)\n");
        let decl = &file.arena.decls[file.decls[0]];
        let init = match decl.kind {
            DeclKind::Const { init } => init,
            _ => panic!("expected const"),
        };
        match &file.arena.exprs[init].kind {
            ExprKind::Call { callee, args } => {
                assert_eq!(args.len(), 2);
                assert!(matches!(
                    file.arena.exprs[*callee].kind,
                    ExprKind::Member { .. }
                ));
            }
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_array_literals() {
        let file = parse_ok("const a = [1, 2, 3]\nconst b = [0; 16]\n");
        let kinds: Vec<_> = file
            .decls
            .iter()
            .map(|&d| match file.arena.decls[d].kind {
                DeclKind::Const { init } => &file.arena.exprs[init].kind,
                ref other => panic!("expected const, got {other:?}"),
            })
            .collect();
        assert!(matches!(kinds[0], ExprKind::ArrayList { elems } if elems.len() == 3));
        assert!(matches!(kinds[1], ExprKind::Array { size: 16, .. }));
    }

    #[test]
    fn test_char_and_string_decoding() {
        let file = parse_ok("const nl = '\\n'\nconst hex = '\\x41'\nconst s = \"ab\\tcd\"\n");
        let kinds: Vec<_> = file
            .decls
            .iter()
            .map(|&d| match file.arena.decls[d].kind {
                DeclKind::Const { init } => &file.arena.exprs[init].kind,
                ref other => panic!("expected const, got {other:?}"),
            })
            .collect();
        assert!(matches!(kinds[0], ExprKind::LitChar('\n')));
        assert!(matches!(kinds[1], ExprKind::LitChar('A')));
        // Strings keep their raw escapes.
        assert!(matches!(kinds[2], ExprKind::LitStr(s) if &**s == "ab\\tcd"));
    }

    #[test]
    fn test_syntax_error_has_location() {
        let err = parse("fn f( {\n").unwrap_err();
        assert!(err.to_string().starts_with("test.sb:1:7: parse error:"), "{err}");
        let err = parse("let x 1\n").unwrap_err();
        assert!(err.to_string().contains("parse error"), "{err}");
    }

    #[test]
    fn test_non_declaration_at_top_level() {
        let err = parse("1 + 2\n").unwrap_err();
        assert!(
            err.message.contains("non-declaration statement"),
            "{err}"
        );
    }
}
