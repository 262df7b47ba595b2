//! Package: the merged top-level namespace and the resolution engine
//!
//! A [`Package`] owns one flat name → [`Symbol`] mapping fed by
//! [`Package::add_file`], the resolved-type table, and the resolution-order
//! log.  Primitive type symbols are pre-registered, already resolved,
//! before any user code is added.
//!
//! Resolution is a two-operation state machine over each symbol:
//! [`Package::declare`] establishes declaration order and catches cycles
//! reached through declaration-time dependencies (a struct field's named
//! type), while [`Package::resolve`] performs kind-specific typing work on
//! demand.  The package-wide sweep ([`Package::resolve_all`]) only
//! declares; full resolution is triggered lazily while resolving a symbol
//! that references another.

use std::mem;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::intern::{Interner, Name};
use crate::parser::ast::{
    AstArena, AstDecl, AstFile, DeclKind, FileLoc, TypeExprId, TypeExprKind,
};
use crate::resolver::symbol::{
    DeclRef, OrderEntry, OrderStage, Symbol, SymbolId, SymbolKind, SymbolState,
};
use crate::resolver::types::{TypeId, TypeKind, TypeTable};

/// Resolution error.  Always fatal: the caller reports it once and stops.
///
/// The duplicate-name case renders as two lines, matching the classic
/// shape: a warning at the new site, then the fatal error pointing at the
/// previous definition.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("{loc}: resolve warning: symbol '{name}' already declared in this package.\n{prev}: resolve error: previous definition was here.")]
    Duplicate {
        name: String,
        loc: FileLoc,
        prev: FileLoc,
    },
    #[error("{loc}: resolve error: redefinition of builtin symbol '{name}'")]
    BuiltinRedefined { name: String, loc: FileLoc },
    #[error("{loc}: resolve error: cyclic dependency for symbol '{name}'")]
    Cycle { name: String, loc: FileLoc },
    #[error("{loc}: resolve error: unresolved name '{name}'")]
    Unresolved { name: String, loc: FileLoc },
    #[error("{loc}: resolve error: incomplete type '{name}'")]
    IncompleteType { name: String, loc: FileLoc },
    #[error("{loc}: resolve error: unsupported type expression")]
    UnsupportedType { loc: FileLoc },
}

/// The merged top-level symbol namespace of one compilation unit.
#[derive(Debug)]
pub struct Package {
    pub name: Name,
    files: Vec<AstFile>,
    symbols: FxHashMap<Name, SymbolId>,
    syms: Vec<Symbol>,
    /// User symbols in declaration order; drives the deterministic sweep.
    decl_order: Vec<SymbolId>,
    order: Vec<OrderEntry>,
    types: TypeTable,
    void_ty: TypeId,
}

impl Package {
    /// Create a package with the primitive type symbols pre-registered and
    /// already resolved.
    pub fn new(interner: &mut Interner) -> Self {
        let ptr = mem::size_of::<usize>();
        let mut types = TypeTable::new();
        let void_ty = types.alloc(TypeKind::Void, 0, 0);

        let mut package = Package {
            name: interner.intern("main"),
            files: Vec::new(),
            symbols: FxHashMap::default(),
            syms: Vec::new(),
            decl_order: Vec::new(),
            order: Vec::new(),
            types,
            void_ty,
        };

        package.register_primitive(interner, "void", void_ty);
        let bool_ty = package.types.alloc(TypeKind::Bool, 0, 0);
        package.register_primitive(interner, "bool", bool_ty);
        for (name, size) in [("u8", 1), ("u16", 2), ("u32", 4), ("u64", 8), ("usize", ptr)] {
            let ty = package.types.alloc(TypeKind::Unsigned, size, size);
            package.register_primitive(interner, name, ty);
        }
        for (name, size) in [("i8", 1), ("i16", 2), ("i32", 4), ("i64", 8), ("isize", ptr)] {
            let ty = package.types.alloc(TypeKind::Signed, size, size);
            package.register_primitive(interner, name, ty);
        }
        package
    }

    fn register_primitive(&mut self, interner: &mut Interner, name: &str, ty: TypeId) {
        let name = interner.intern(name);
        let id = SymbolId(self.syms.len() as u32);
        let mut sym = Symbol::new(SymbolKind::Type, name, None);
        sym.state = SymbolState::Resolved;
        sym.ty = Some(ty);
        self.syms.push(sym);
        self.symbols.insert(name, id);
        self.types.set_symbol(ty, id);
    }

    // ===== Accessors =====

    pub fn lookup(&self, name: Name) -> Option<SymbolId> {
        self.symbols.get(&name).copied()
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.syms[id.0 as usize]
    }

    fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.syms[id.0 as usize]
    }

    /// User symbols in declaration order.
    pub fn top_level(&self) -> &[SymbolId] {
        &self.decl_order
    }

    /// The append-only resolution-order log.
    pub fn order(&self) -> &[OrderEntry] {
        &self.order
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    pub fn files(&self) -> &[AstFile] {
        &self.files
    }

    fn decl(&self, decl_ref: DeclRef) -> &AstDecl {
        &self.files[decl_ref.file].arena.decls[decl_ref.decl]
    }

    fn decl_loc(&self, id: SymbolId) -> FileLoc {
        match self.symbol(id).decl {
            Some(decl_ref) => self.decl(decl_ref).loc.clone(),
            None => unreachable!("primitive symbol has no declaration site"),
        }
    }

    // ===== Declaration intake =====

    /// Declare every top-level declaration of `file` into the package
    /// namespace.  The file's AST is kept alive inside the package.
    pub fn add_file(&mut self, file: AstFile, interner: &Interner) -> Result<(), ResolveError> {
        let file_idx = self.files.len();
        let decls: Vec<_> = file.decls.to_vec();
        self.files.push(file);
        for decl in decls {
            self.add_decl(
                DeclRef {
                    file: file_idx,
                    decl,
                },
                interner,
            )?;
        }
        Ok(())
    }

    fn add_decl(
        &mut self,
        decl_ref: DeclRef,
        interner: &Interner,
    ) -> Result<SymbolId, ResolveError> {
        let decl = self.decl(decl_ref);
        let kind = match decl.kind {
            DeclKind::Let { .. } => SymbolKind::Let,
            DeclKind::Const { .. } => SymbolKind::Const,
            DeclKind::Fn { .. } => SymbolKind::Fn,
            DeclKind::Struct { .. } | DeclKind::Enum { .. } | DeclKind::TypeAlias { .. } => {
                SymbolKind::Type
            }
        };
        let name = decl.name;
        let loc = decl.loc.clone();

        if let Some(prev) = self.lookup(name) {
            let name = interner.resolve(name).to_string();
            return Err(match self.symbol(prev).decl {
                Some(prev_ref) => ResolveError::Duplicate {
                    name,
                    loc,
                    prev: self.decl(prev_ref).loc.clone(),
                },
                None => ResolveError::BuiltinRedefined { name, loc },
            });
        }

        let id = SymbolId(self.syms.len() as u32);
        self.syms.push(Symbol::new(kind, name, Some(decl_ref)));
        self.symbols.insert(name, id);
        self.decl_order.push(id);
        Ok(id)
    }

    // ===== The state machine =====

    /// Move a symbol to at least `Declared`.
    ///
    /// Re-entering a symbol that is still `Declaring` means its declaration
    /// depends on itself and is a fatal cycle.
    pub fn declare(&mut self, id: SymbolId, interner: &Interner) -> Result<(), ResolveError> {
        match self.symbol(id).state {
            SymbolState::Declared | SymbolState::Resolving | SymbolState::Resolved => {
                return Ok(())
            }
            SymbolState::Declaring => return Err(self.cycle_error(id, interner)),
            SymbolState::Initial => {}
        }
        self.symbol_mut(id).state = SymbolState::Declaring;

        // Kind-specific declaration work.  Only type symbols have any
        // today: their declaration-time dependencies (field and alias
        // types) are declared eagerly, which is what surfaces cycles.
        if self.symbol(id).kind == SymbolKind::Type {
            self.declare_type_deps(id, interner)?;
        }

        self.symbol_mut(id).state = SymbolState::Declared;
        let name = self.symbol(id).name;
        self.order.push(OrderEntry {
            name,
            stage: OrderStage::Declared,
        });
        Ok(())
    }

    /// Fully resolve a symbol, declaring it first.  Resolving an already
    /// resolved symbol is a no-op; re-entering one that is `Resolving` is a
    /// fatal cycle.
    pub fn resolve(&mut self, id: SymbolId, interner: &Interner) -> Result<(), ResolveError> {
        self.declare(id, interner)?;
        match self.symbol(id).state {
            SymbolState::Declared => {}
            SymbolState::Resolving => return Err(self.cycle_error(id, interner)),
            _ => return Ok(()),
        }
        self.symbol_mut(id).state = SymbolState::Resolving;

        match self.symbol(id).kind {
            SymbolKind::Let => self.resolve_let(id, interner)?,
            // Constant expressions are not typed at this stage.
            SymbolKind::Const => {}
            SymbolKind::Fn => self.resolve_fn(id, interner)?,
            SymbolKind::Type => self.resolve_type_symbol(id, interner)?,
        }

        self.symbol_mut(id).state = SymbolState::Resolved;
        let name = self.symbol(id).name;
        self.order.push(OrderEntry {
            name,
            stage: OrderStage::Resolved,
        });
        Ok(())
    }

    /// Package-wide sweep: declare every top-level symbol in insertion
    /// order.  Declaration order and acyclicity are established eagerly;
    /// full type resolution stays demand-driven.
    pub fn resolve_all(&mut self, interner: &Interner) -> Result<(), ResolveError> {
        let order = self.decl_order.clone();
        for id in order {
            self.declare(id, interner)?;
        }
        Ok(())
    }

    fn cycle_error(&self, id: SymbolId, interner: &Interner) -> ResolveError {
        ResolveError::Cycle {
            name: interner.resolve(self.symbol(id).name).to_string(),
            loc: self.decl_loc(id),
        }
    }

    // ===== Kind-specific work =====

    /// Declare the symbols named by a type symbol's field/alias types.
    fn declare_type_deps(&mut self, id: SymbolId, interner: &Interner) -> Result<(), ResolveError> {
        let Some(decl_ref) = self.symbol(id).decl else {
            return Ok(());
        };

        let mut deps = Vec::new();
        {
            let file = &self.files[decl_ref.file];
            let decl = &file.arena.decls[decl_ref.decl];
            match &decl.kind {
                DeclKind::Struct { fields } | DeclKind::Enum { variants: fields } => {
                    for field in fields.iter() {
                        if let Some(ty) = field.ty {
                            collect_type_names(&file.arena, ty, &mut deps);
                        }
                    }
                }
                DeclKind::TypeAlias { ty } => collect_type_names(&file.arena, *ty, &mut deps),
                _ => {}
            }
        }

        for (name, loc) in deps {
            match self.lookup(name) {
                Some(dep) => self.declare(dep, interner)?,
                None => {
                    return Err(ResolveError::Unresolved {
                        name: interner.resolve(name).to_string(),
                        loc,
                    })
                }
            }
        }
        Ok(())
    }

    /// An extern `let`'s explicit type annotation is resolved into a type;
    /// initializer typing belongs to a later stage.
    fn resolve_let(&mut self, id: SymbolId, interner: &Interner) -> Result<(), ResolveError> {
        let Some(decl_ref) = self.symbol(id).decl else {
            unreachable!("let symbol has no declaration");
        };
        let annotation = match &self.decl(decl_ref).kind {
            DeclKind::Let { ty, .. } => *ty,
            _ => unreachable!("let symbol does not point at a let declaration"),
        };
        if let Some(ty) = annotation {
            let resolved = self.resolve_type_expr(decl_ref.file, ty, interner)?;
            self.symbol_mut(id).ty = Some(resolved);
        }
        Ok(())
    }

    /// A function's signature resolves to the canonical interned function
    /// type for (return identity, ordered argument identities).
    fn resolve_fn(&mut self, id: SymbolId, interner: &Interner) -> Result<(), ResolveError> {
        let Some(decl_ref) = self.symbol(id).decl else {
            unreachable!("fn symbol has no declaration");
        };
        let (param_tys, ret_ty) = match &self.decl(decl_ref).kind {
            DeclKind::Fn { params, ret, .. } => {
                let param_tys: Vec<TypeExprId> = params
                    .iter()
                    .map(|p| match p.ty {
                        Some(ty) => ty,
                        None => unreachable!("function parameter without a type"),
                    })
                    .collect();
                (param_tys, *ret)
            }
            _ => unreachable!("fn symbol does not point at a fn declaration"),
        };

        let mut args = Vec::with_capacity(param_tys.len());
        for ty in param_tys {
            args.push(self.resolve_type_expr(decl_ref.file, ty, interner)?);
        }
        let ret = match ret_ty {
            Some(ty) => self.resolve_type_expr(decl_ref.file, ty, interner)?,
            None => self.void_ty,
        };

        let fn_ty = self.types.intern_fn(args.into(), ret);
        self.symbol_mut(id).ty = Some(fn_ty);
        Ok(())
    }

    /// A type alias resolves to its underlying type.  Struct and enum
    /// declarations are skeletons: they resolve without producing a type.
    fn resolve_type_symbol(
        &mut self,
        id: SymbolId,
        interner: &Interner,
    ) -> Result<(), ResolveError> {
        let Some(decl_ref) = self.symbol(id).decl else {
            // Primitives never re-enter resolution.
            return Ok(());
        };
        let alias = match &self.decl(decl_ref).kind {
            DeclKind::TypeAlias { ty } => Some(*ty),
            DeclKind::Struct { .. } | DeclKind::Enum { .. } => None,
            _ => unreachable!("type symbol does not point at a type declaration"),
        };
        if let Some(ty) = alias {
            let resolved = self.resolve_type_expr(decl_ref.file, ty, interner)?;
            self.symbol_mut(id).ty = Some(resolved);
        }
        Ok(())
    }

    /// Resolve a type expression into a type identity, resolving the
    /// referenced symbol on demand.
    ///
    /// Only named types have a representation in the type model; pointer,
    /// array, slice and tuple forms are reported as unsupported here (the
    /// declaration sweep still walks them for cycle detection).
    fn resolve_type_expr(
        &mut self,
        file: usize,
        ty: TypeExprId,
        interner: &Interner,
    ) -> Result<TypeId, ResolveError> {
        let node = &self.files[file].arena.types[ty];
        let loc = node.loc.clone();
        let name = match node.kind {
            TypeExprKind::Name(name) => name,
            _ => return Err(ResolveError::UnsupportedType { loc }),
        };

        let Some(id) = self.lookup(name) else {
            return Err(ResolveError::Unresolved {
                name: interner.resolve(name).to_string(),
                loc,
            });
        };
        self.resolve(id, interner)?;
        match self.symbol(id).ty {
            Some(resolved) => Ok(resolved),
            None => Err(ResolveError::IncompleteType {
                name: interner.resolve(name).to_string(),
                loc,
            }),
        }
    }

    // ===== Rendering =====

    /// Render a resolved type, e.g. `u32` or `fn(u32, u32) -> bool`.
    pub fn type_display(&self, id: TypeId, interner: &Interner) -> String {
        let ty = self.types.get(id);
        match &ty.kind {
            TypeKind::Fn { args, ret } => {
                let args: Vec<_> = args
                    .iter()
                    .map(|&arg| self.type_display(arg, interner))
                    .collect();
                format!("fn({}) -> {}", args.join(", "), self.type_display(*ret, interner))
            }
            _ => match ty.symbol {
                Some(sym) => interner.resolve(self.symbol(sym).name).to_string(),
                None => "<unknown symbol>".to_string(),
            },
        }
    }

    /// Render the resolution-order log, one line per entry.
    pub fn dump_order(&self, interner: &Interner) -> String {
        let mut out = String::new();
        for entry in &self.order {
            let stage = match entry.stage {
                OrderStage::Declared => "declared",
                OrderStage::Resolved => "resolved",
            };
            out.push_str(stage);
            out.push(' ');
            out.push_str(interner.resolve(entry.name));
            out.push('\n');
        }
        out
    }
}

/// Collect every type name referenced by a type expression, depth first.
fn collect_type_names(arena: &AstArena, ty: TypeExprId, out: &mut Vec<(Name, FileLoc)>) {
    match &arena.types[ty].kind {
        TypeExprKind::Name(name) => out.push((*name, arena.types[ty].loc.clone())),
        TypeExprKind::Ptr(inner) | TypeExprKind::Slice(inner) => {
            collect_type_names(arena, *inner, out)
        }
        TypeExprKind::Array { elem, .. } => collect_type_names(arena, *elem, out),
        TypeExprKind::Tuple(elems) => {
            for &elem in elems.iter() {
                collect_type_names(arena, elem, out);
            }
        }
    }
}
