//! Sable source parser
//!
//! Transforms Sable source text into an arena-owned AST:
//! - [`token`]: token kinds and the operator precedence table
//! - [`lexer`]: tokenization (source text → tokens), including automatic
//!   statement-terminator insertion
//! - [`parse`]: recursive descent parsing (tokens → AST)
//! - [`ast`]: AST node definitions and the per-file arena
//! - [`dump`]: textual AST tree dumper
//!
//! # Parser implementation
//!
//! Hand-written recursive descent with precedence climbing for binary
//! operators and one token of lookahead.  No parser generator, no
//! backtracking, no error recovery: the first unexpected token is fatal.

pub mod ast;
pub mod dump;
pub mod lexer;
pub mod parse;
pub mod token;

mod declarations;
mod expressions;
mod statements;
mod types;
