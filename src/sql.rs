//! The statement layer: a parser for the two supported statements and
//! the types the executor consumes.

pub mod parser;
pub mod statement;

pub use parser::prepare;
pub use statement::{PrepareError, Statement};
