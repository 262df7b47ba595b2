//! Resolved types
//!
//! The type model is deliberately small: void, bool, the signed/unsigned
//! integer families and function types.  Types live in an arena owned by
//! the [`TypeTable`] and are referred to by [`TypeId`]; function types are
//! structurally interned, so two signatures with identical return and
//! argument identities share one `TypeId` and identity comparison
//! substitutes for structural comparison.

use std::mem;

use la_arena::{Arena, Idx};
use rustc_hash::FxHashMap;

use crate::resolver::symbol::SymbolId;

/// Identity of a resolved type.
pub type TypeId = Idx<Type>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Void,
    Bool,
    Signed,
    Unsigned,
    Fn {
        args: Box<[TypeId]>,
        ret: TypeId,
    },
}

/// One resolved type.
///
/// `symbol` points back at the symbol that named the type, when there is
/// one; it is filled in when primitives are registered and left empty for
/// anonymous function types.
#[derive(Debug)]
pub struct Type {
    pub kind: TypeKind,
    pub size: usize,
    pub align: usize,
    pub symbol: Option<SymbolId>,
}

/// Structural interning key for a function type: the return identity plus
/// the ordered argument identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FnKey {
    ret: TypeId,
    args: Box<[TypeId]>,
}

/// Arena of resolved types plus the function-type interning map.
#[derive(Debug, Default)]
pub struct TypeTable {
    types: Arena<Type>,
    fn_types: FxHashMap<FnKey, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, kind: TypeKind, size: usize, align: usize) -> TypeId {
        self.types.alloc(Type {
            kind,
            size,
            align,
            symbol: None,
        })
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id]
    }

    pub fn set_symbol(&mut self, id: TypeId, symbol: SymbolId) {
        self.types[id].symbol = Some(symbol);
    }

    /// Look up or create the canonical function type for the given
    /// signature.  Structurally identical signatures share one identity.
    pub fn intern_fn(&mut self, args: Box<[TypeId]>, ret: TypeId) -> TypeId {
        let key = FnKey {
            ret,
            args: args.clone(),
        };
        if let Some(&id) = self.fn_types.get(&key) {
            return id;
        }
        // A function value is address-sized.
        let size = mem::size_of::<usize>();
        let id = self.alloc(TypeKind::Fn { args, ret }, size, size);
        self.fn_types.insert(key, id);
        id
    }
}
