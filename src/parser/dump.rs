//! Textual AST dumper
//!
//! Thin recursive formatter producing one node per line with `|-`/`` `- ``
//! indent rails.  Types render inline (`*u8`, `[u8; 4]`, `(u32, bool)`),
//! everything else becomes a labelled tree node.  Used by the driver to
//! show what the front end built.

use crate::intern::{Interner, Name};
use crate::parser::ast::{
    AstArena, AstFile, DeclId, DeclKind, ExprId, ExprKind, StmtId, StmtKind, TypeExprId,
    TypeExprKind,
};

/// Render every top-level declaration of `file` as an indented tree.
pub fn dump_file(file: &AstFile, interner: &Interner) -> String {
    let mut dumper = Dumper {
        arena: &file.arena,
        interner,
        out: String::new(),
        rails: Vec::new(),
    };
    for &decl in file.decls.iter() {
        dumper.decl(decl);
        dumper.out.push('\n');
    }
    dumper.out
}

struct Dumper<'a> {
    arena: &'a AstArena,
    interner: &'a Interner,
    out: String,
    /// One entry per nesting level; `true` while more siblings follow.
    rails: Vec<bool>,
}

impl Dumper<'_> {
    fn newline(&mut self) {
        self.out.push('\n');
        let depth = self.rails.len();
        for (i, &rail) in self.rails.iter().enumerate() {
            let here = i + 1 == depth;
            self.out.push_str(match (rail, here) {
                (true, true) => "|-",
                (true, false) => "| ",
                (false, true) => "`-",
                (false, false) => "  ",
            });
        }
        self.out.push_str("- ");
    }

    fn nest(&mut self, not_last: bool) {
        self.rails.push(not_last);
    }

    /// Mark the current level's next child as the last one.
    fn last(&mut self) {
        if let Some(rail) = self.rails.last_mut() {
            *rail = false;
        }
    }

    fn unnest(&mut self) {
        self.rails.pop();
    }

    fn name(&self, name: Name) -> &str {
        self.interner.resolve(name)
    }

    fn type_string(&self, ty: Option<TypeExprId>) -> String {
        let Some(ty) = ty else {
            return "nil".into();
        };
        match &self.arena.types[ty].kind {
            TypeExprKind::Name(name) => self.name(*name).to_string(),
            TypeExprKind::Ptr(inner) => format!("*{}", self.type_string(Some(*inner))),
            TypeExprKind::Array { elem, size } => {
                format!("[{}; {}]", self.type_string(Some(*elem)), size)
            }
            TypeExprKind::Slice(elem) => format!("[{}]", self.type_string(Some(*elem))),
            TypeExprKind::Tuple(elems) => {
                let inner: Vec<_> = elems
                    .iter()
                    .map(|&t| self.type_string(Some(t)))
                    .collect();
                format!("({})", inner.join(", "))
            }
        }
    }

    fn decl(&mut self, id: DeclId) {
        self.newline();
        let decl = &self.arena.decls[id];
        let name = self.name(decl.name).to_string();
        match &decl.kind {
            DeclKind::Let {
                ty,
                init,
                is_extern,
            } => {
                if *is_extern {
                    let ty = self.type_string(*ty);
                    self.out.push_str(&format!("DECL_LET \"{name}\" extern '{ty}'"));
                } else {
                    self.out.push_str(&format!("DECL_LET \"{name}\""));
                    if let Some(init) = *init {
                        self.nest(false);
                        self.expr(init);
                        self.unnest();
                    }
                }
            }
            DeclKind::Const { init } => {
                self.out.push_str(&format!("DECL_CONST \"{name}\""));
                let init = *init;
                self.nest(false);
                self.expr(init);
                self.unnest();
            }
            DeclKind::Fn {
                params,
                ret,
                body,
                is_extern,
            } => {
                self.out.push_str(&format!(
                    "DECL_FN \"{name}\"{}",
                    if *is_extern { " extern" } else { "" }
                ));
                let ret = self.type_string(*ret);
                let params: Vec<(String, String)> = params
                    .iter()
                    .map(|p| (self.name(p.name).to_string(), self.type_string(p.ty)))
                    .collect();
                self.nest(true);
                self.newline();
                self.out.push_str(&format!("RET '{ret}'"));
                let count = params.len();
                for (i, (pname, pty)) in params.into_iter().enumerate() {
                    if body.is_none() && i + 1 == count {
                        self.last();
                    }
                    self.newline();
                    self.out.push_str(&format!("ARG \"{pname}\" '{pty}'"));
                }
                if let DeclKind::Fn {
                    body: Some(stmts), ..
                } = &self.arena.decls[id].kind
                {
                    let stmts: Vec<StmtId> = stmts.to_vec();
                    self.last();
                    self.stmt_list(&stmts);
                }
                self.unnest();
            }
            DeclKind::Struct { fields } | DeclKind::Enum { variants: fields } => {
                let label = match decl.kind {
                    DeclKind::Struct { .. } => "DECL_STRUCT",
                    _ => "DECL_ENUM",
                };
                self.out.push_str(&format!("{label} \"{name}\""));
                let fields: Vec<(String, String)> = fields
                    .iter()
                    .map(|f| (self.name(f.name).to_string(), self.type_string(f.ty)))
                    .collect();
                self.nest(false);
                for (fname, fty) in fields {
                    self.newline();
                    self.out.push_str(&format!("FIELD \"{fname}\" '{fty}'"));
                }
                self.unnest();
            }
            DeclKind::TypeAlias { ty } => {
                let ty = self.type_string(Some(*ty));
                self.out.push_str(&format!("DECL_TYPE \"{name}\" '{ty}'"));
            }
        }
    }

    fn stmt_list(&mut self, stmts: &[StmtId]) {
        self.newline();
        self.out.push_str("BLOCK");
        self.nest(stmts.len() > 1);
        for (i, &stmt) in stmts.iter().enumerate() {
            if i + 1 == stmts.len() {
                self.last();
            }
            self.stmt(stmt);
        }
        self.unnest();
    }

    fn stmt(&mut self, id: StmtId) {
        match &self.arena.stmts[id].kind {
            StmtKind::Decl(decl) => {
                let decl = *decl;
                self.decl(decl);
            }
            StmtKind::Expr(expr) => {
                let expr = *expr;
                self.expr(expr);
            }
            StmtKind::Assign { op, lhs, rhs } => {
                let (op, lhs, rhs) = (*op, *lhs, *rhs);
                self.newline();
                self.out.push_str(&format!("STMT_ASSIGN '{}'", op.symbol()));
                self.nest(true);
                self.expr(lhs);
                self.last();
                self.expr(rhs);
                self.unnest();
            }
            StmtKind::If { cond, body, els } => {
                let cond = *cond;
                let body: Vec<StmtId> = body.to_vec();
                let els = *els;
                self.newline();
                self.out.push_str("STMT_IF");
                self.nest(true);
                self.expr(cond);
                if let Some(els) = els {
                    self.stmt_list(&body);
                    self.last();
                    self.stmt(els);
                } else {
                    self.last();
                    self.stmt_list(&body);
                }
                self.unnest();
            }
            StmtKind::For { cond, body } => {
                let cond = *cond;
                let body: Vec<StmtId> = body.to_vec();
                self.newline();
                self.out.push_str("STMT_FOR");
                self.nest(true);
                self.expr(cond);
                self.last();
                self.stmt_list(&body);
                self.unnest();
            }
            StmtKind::Return(expr) => {
                let expr = *expr;
                self.newline();
                self.out.push_str("STMT_RETURN");
                if let Some(expr) = expr {
                    self.nest(false);
                    self.expr(expr);
                    self.unnest();
                }
            }
            StmtKind::Block(stmts) => {
                let stmts: Vec<StmtId> = stmts.to_vec();
                self.stmt_list(&stmts);
            }
        }
    }

    fn expr(&mut self, id: ExprId) {
        self.newline();
        match &self.arena.exprs[id].kind {
            ExprKind::LitInt(value) => {
                self.out.push_str(&format!("EXPR_LIT_INT {value}"));
            }
            ExprKind::LitFloat(value) => {
                self.out.push_str(&format!("EXPR_LIT_FLOAT {value}"));
            }
            ExprKind::LitStr(value) => {
                self.out.push_str(&format!("EXPR_LIT_STRING \"{value}\""));
            }
            ExprKind::LitChar(value) => {
                self.out.push_str(&format!("EXPR_LIT_CHAR {value:?}"));
            }
            ExprKind::Ident(name) => {
                let name = self.name(*name).to_string();
                self.out.push_str(&format!("EXPR_IDENT \"{name}\""));
            }
            ExprKind::Unary { op, expr } => {
                let (op, expr) = (*op, *expr);
                self.out.push_str(&format!("EXPR_UNARY '{}'", op.symbol()));
                self.nest(false);
                self.expr(expr);
                self.unnest();
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let (op, lhs, rhs) = (*op, *lhs, *rhs);
                self.out.push_str(&format!("EXPR_BINARY '{}'", op.symbol()));
                self.nest(true);
                self.expr(lhs);
                self.last();
                self.expr(rhs);
                self.unnest();
            }
            ExprKind::Cast { expr, ty } => {
                let (expr, ty) = (*expr, *ty);
                let ty = self.type_string(Some(ty));
                self.out.push_str(&format!("EXPR_CAST '{ty}'"));
                self.nest(false);
                self.expr(expr);
                self.unnest();
            }
            ExprKind::Member { expr, name } => {
                let (expr, name) = (*expr, *name);
                let name = self.name(name).to_string();
                self.out.push_str(&format!("EXPR_MEMBER \"{name}\""));
                self.nest(false);
                self.expr(expr);
                self.unnest();
            }
            ExprKind::Index { expr, index } => {
                let (expr, index) = (*expr, *index);
                self.out.push_str("EXPR_INDEX");
                self.nest(true);
                self.expr(expr);
                self.last();
                self.expr(index);
                self.unnest();
            }
            ExprKind::Call { callee, args } => {
                let callee = *callee;
                let args: Vec<ExprId> = args.to_vec();
                self.out.push_str("EXPR_CALL");
                self.nest(true);
                self.expr(callee);
                for (i, &arg) in args.iter().enumerate() {
                    if i + 1 == args.len() {
                        self.last();
                    }
                    self.expr(arg);
                }
                self.unnest();
            }
            ExprKind::Tuple { elems } => {
                let elems: Vec<ExprId> = elems.to_vec();
                self.out.push_str("EXPR_TUPLE");
                self.nest(elems.len() > 1);
                for (i, &elem) in elems.iter().enumerate() {
                    if i + 1 == elems.len() {
                        self.last();
                    }
                    self.expr(elem);
                }
                self.unnest();
            }
            ExprKind::Array { elem, size } => {
                let (elem, size) = (*elem, *size);
                self.out.push_str(&format!("EXPR_ARRAY {size}"));
                self.nest(false);
                self.expr(elem);
                self.unnest();
            }
            ExprKind::ArrayList { elems } => {
                let elems: Vec<ExprId> = elems.to_vec();
                self.out.push_str("EXPR_ARRAY_LIST");
                self.nest(elems.len() > 1);
                for (i, &elem) in elems.iter().enumerate() {
                    if i + 1 == elems.len() {
                        self.last();
                    }
                    self.expr(elem);
                }
                self.unnest();
            }
            ExprKind::Init { base, fields } => {
                let base = *base;
                let fields: Vec<(Name, ExprId)> =
                    fields.iter().map(|f| (f.name, f.value)).collect();
                self.out.push_str("EXPR_INIT");
                self.nest(!fields.is_empty());
                self.expr(base);
                for (i, (fname, value)) in fields.iter().enumerate() {
                    if i + 1 == fields.len() {
                        self.last();
                    }
                    let fname = self.name(*fname).to_string();
                    self.newline();
                    self.out.push_str(&format!("FIELD \"{fname}\""));
                    self.nest(false);
                    self.expr(*value);
                    self.unnest();
                }
                self.unnest();
            }
        }
    }
}
