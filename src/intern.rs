//! String interning
//!
//! Identifiers and other names are deduplicated into a single pool so that
//! the rest of the compiler can compare and hash them as small integer
//! handles instead of byte content.  Equal byte content always yields the
//! same [`Name`], so handle equality substitutes for string equality.

use rustc_hash::FxHashMap;

/// Handle to an interned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// Deduplicating string pool.
///
/// The pool only grows; interned strings live until the interner is dropped.
#[derive(Debug, Default)]
pub struct Interner {
    map: FxHashMap<Box<str>, Name>,
    vec: Vec<Box<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning the handle shared by every equal string.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&name) = self.map.get(s) {
            return name;
        }
        let boxed: Box<str> = s.into();
        let name = Name(self.vec.len() as u32);
        self.map.insert(boxed.clone(), name);
        self.vec.push(boxed);
        name
    }

    /// Original text of an interned name.
    pub fn resolve(&self, name: Name) -> &str {
        &self.vec[name.0 as usize]
    }
}
