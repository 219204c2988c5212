use super::{ast::Statement, lex, parse, token::Token, Column, Error, LineNumber};

/// ## A lexed source line
///
/// Keeps the tokens of one physical line so it can be listed back
/// and parsed once the whole program has been loaded.

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    number: LineNumber,
    tokens: Vec<Token>,
}

impl Line {
    pub fn new(source_line: &str) -> Line {
        let (number, tokens) = lex(source_line.trim_end_matches(|c| c == '\r' || c == '\n'));
        Line { number, tokens }
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// True when nothing but the line number was entered.
    pub fn is_empty(&self) -> bool {
        self.tokens.iter().all(|t| *t == Token::Eol)
    }

    pub fn ast(&self) -> Result<Vec<Statement>, Error> {
        let mut col: Column = 0..0;
        for token in &self.tokens {
            col.start = col.end;
            col.end += token.to_string().chars().count();
            if let Token::Unknown(s) = token {
                return Err(error!(IllegalCharacter, self.number, ..&col; s));
            }
        }
        parse(self.number, &self.tokens)
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s: String = self.tokens.iter().map(|s| s.to_string()).collect();
        match self.number {
            Some(number) => write!(f, "{} {}", number, s),
            None => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::token::{Ident, Word};
    use crate::lang::ErrorCode;

    #[test]
    fn test_crlf() {
        let l = Line::new("10 end\r\n");
        assert_eq!(l.number(), Some(10));
        assert_eq!(l.tokens(), [Token::Word(Word::End), Token::Eol]);
    }

    #[test]
    fn test_case_normalized() {
        let l = Line::new("20 let name$=x");
        assert_eq!(l.to_string(), "20 LET NAME$=X");
        assert!(l
            .tokens()
            .contains(&Token::Ident(Ident::String("NAME$".into()))));
    }

    #[test]
    fn test_illegal_character() {
        let l = Line::new("30 PRINT @");
        let e = l.ast().unwrap_err();
        assert_eq!(e.code(), ErrorCode::IllegalCharacter);
        assert_eq!(e.line_number(), Some(30));
        assert_eq!(e.column(), 6..7);
    }

    #[test]
    fn test_empty() {
        assert!(Line::new("40").is_empty());
        assert!(!Line::new("40 END").is_empty());
    }
}
