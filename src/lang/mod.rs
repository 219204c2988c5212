/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of BASIC source lines.
Each numbered source line lexes into a vector of tokens which parses into
the flat statement list the machine executes.

*/

#[macro_use]
mod error;
mod ident;
mod lex;
mod line;
mod parse;

pub mod ast;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use error::ErrorKind;
pub use ident::Ident;
pub use lex::lex;
pub use line::Line;
pub use parse::parse;

pub type LineNumber = Option<u16>;
pub type Column = std::ops::Range<usize>;

pub trait MaxValue<T> {
    fn max_value() -> T;
}

impl MaxValue<u16> for LineNumber {
    fn max_value() -> u16 {
        65529
    }
}
