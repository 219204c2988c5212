use super::{Address, Listing};
use crate::lang::ast::{Datum, Statement};
use crate::lang::Error;
use log::debug;

/// ## Parsed program
///
/// Statements grouped by line with an ascending index of line numbers.
/// DATA items are gathered up front so READ never walks the statements.

#[derive(Debug, Default)]
pub struct Program {
    numbers: Vec<u16>,
    lines: Vec<Vec<Statement>>,
    data: Vec<Datum>,
    data_lines: Vec<(u16, usize)>,
}

impl Program {
    /// Parses every line of the listing. The first line that fails
    /// aborts the load.
    pub fn new(listing: &Listing) -> Result<Program, Error> {
        let mut program = Program::default();
        for line in listing.lines() {
            let number = match line.number() {
                Some(number) => number,
                None => continue,
            };
            let statements = line.ast()?;
            for statement in &statements {
                if let Statement::Data(_, items) = statement {
                    program.data_lines.push((number, program.data.len()));
                    program.data.extend(items.iter().cloned());
                }
            }
            program.numbers.push(number);
            program.lines.push(statements);
        }
        debug!(
            "loaded {} lines, {} data items",
            program.numbers.len(),
            program.data.len()
        );
        Ok(program)
    }

    pub fn load(source: &str) -> Result<Program, Error> {
        Program::new(&Listing::load(source)?)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_numbers(&self) -> &[u16] {
        &self.numbers
    }

    /// The statement at an address. An offset past the end of its line
    /// moves on to the first statement of the following line.
    pub fn statement(&self, addr: Address) -> Option<(Address, &Statement)> {
        let mut addr = addr;
        loop {
            let line = self.lines.get(addr.line)?;
            if let Some(statement) = line.get(addr.offset) {
                return Some((addr, statement));
            }
            addr = Address {
                line: addr.line + 1,
                offset: 0,
            };
        }
    }

    /// Address of the first statement on a line number.
    pub fn find_line(&self, number: u16) -> Option<Address> {
        self.numbers
            .binary_search(&number)
            .ok()
            .map(|line| Address { line, offset: 0 })
    }

    pub fn line_number(&self, addr: Address) -> Option<u16> {
        self.numbers.get(addr.line).copied()
    }

    pub fn data(&self) -> &[Datum] {
        &self.data
    }

    /// Index of the first DATA item on or after a line number.
    pub fn data_position(&self, number: u16) -> usize {
        match self.data_lines.iter().find(|(line, _)| *line >= number) {
            Some((_, position)) => *position,
            None => self.data.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_find_line() {
        let program = Program::load("10 A=1:B=2\n20 END\n").unwrap();
        assert_eq!(program.line_numbers(), &[10, 20]);
        assert_eq!(program.find_line(20), Some(Address { line: 1, offset: 0 }));
        assert_eq!(program.find_line(15), None);
    }

    #[test]
    fn test_statement_fall_through() {
        let program = Program::load("10 A=1:B=2\n20 END\n").unwrap();
        let (addr, _) = program.statement(Address { line: 0, offset: 2 }).unwrap();
        assert_eq!(addr, Address { line: 1, offset: 0 });
        assert_eq!(program.line_number(addr), Some(20));
        assert!(program.statement(Address { line: 1, offset: 1 }).is_none());
    }

    #[test]
    fn test_data() {
        let program = Program::load("10 DATA 1,\"A\"\n20 PRINT\n30 DATA 3\n").unwrap();
        assert_eq!(program.data().len(), 3);
        assert_eq!(program.data_position(0), 0);
        assert_eq!(program.data_position(20), 2);
        assert_eq!(program.data_position(40), 3);
    }

    #[test]
    fn test_syntax_error_aborts() {
        let e = Program::load("10 PRINT 1\n20 LET = 5\n").unwrap_err();
        assert_eq!(e.code(), ErrorCode::SyntaxError);
        assert_eq!(e.line_number(), Some(20));
    }
}
