//! Symbol resolution
//!
//! Merges the top-level declarations of all parsed files into one
//! [`package::Package`] namespace and drives declare/resolve over every
//! symbol:
//! - [`symbol`]: symbol records and the five-state resolution machine's
//!   vocabulary
//! - [`types`]: the resolved-type model with structural function-type
//!   interning
//! - [`package`]: the namespace, duplicate/cycle detection and the
//!   resolution-order log

pub mod package;
pub mod symbol;
pub mod types;
