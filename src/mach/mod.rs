/*!
## Rust Machine Module

This Rust module walks the parsed program and executes it.
The listing collects source lines, the program indexes their statements,
and the runtime owns every piece of mutable state for one run.

*/

mod config;
mod function;
mod listing;
mod operation;
mod program;
mod runtime;
mod stack;
mod val;
mod var;

pub use config::Config;
pub use config::InputPolicy;
pub use function::Builtin;
pub use function::Function;
pub use listing::Listing;
pub use operation::Operation;
pub use program::Program;
pub use runtime::Event;
pub use runtime::Runtime;
pub use runtime::Termination;
pub use stack::Stack;
pub use val::Val;
pub use var::Var;

/// A statement position: index of the line in the program
/// and offset of the statement within that line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Address {
    pub line: usize,
    pub offset: usize,
}

impl Address {
    pub fn next(self) -> Address {
        Address {
            line: self.line,
            offset: self.offset + 1,
        }
    }
}

/// Maximum length in characters of a single source line.
pub const MAX_LINE_LEN: usize = 1024;
