//! # BASIC
//!
//! Runs a line-numbered BASIC program from a file.
//!

mod term;

fn main() {
    std::process::exit(term::main());
}
