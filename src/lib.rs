//! # Sable compiler front end
//!
//! Turns raw Sable source text into a resolved, partially type-checked AST.
//!
//! ## Pipeline
//!
//! ```text
//! bytes → Lexer → Tokens → Parser → AST → Package::add_file → Resolver
//! ```
//!
//! 1. [`parser`] — tokenizes the source (with automatic statement
//!    terminators) and builds an arena-owned AST.
//! 2. [`resolver`] — merges per-file declarations into one package
//!    namespace, detects duplicate names and cyclic dependencies, and
//!    resolves symbols to types on demand.
//! 3. [`intern`] — the string pool shared by both.
//!
//! There is no code generator yet; the `sablec` driver writes the AST dump
//! and the resolution-order log instead.
//!
//! All errors are fatal: each stage reports the first diagnostic as a
//! `<file>:<line>:<col>: <stage> error: <message>` line and the driver
//! exits non-zero.

pub mod intern;
pub mod parser;
pub mod resolver;
