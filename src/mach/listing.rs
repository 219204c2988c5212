use super::MAX_LINE_LEN;
use crate::error;
use crate::lang::{token::Token, Error, Line, LineNumber};
use std::collections::{btree_map::Values, BTreeMap};
use std::convert::TryFrom;

/// ## Program source
///
/// Numbered lines in ascending order. Entering a line number that
/// already exists replaces the earlier line.

#[derive(Debug, Clone, Default)]
pub struct Listing {
    source: BTreeMap<u16, Line>,
}

impl Listing {
    pub fn new() -> Listing {
        Listing::default()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// A line holding only its number deletes that line.
    pub fn insert(&mut self, line: Line) -> Option<Line> {
        let number = line.number()?;
        if line.is_empty() {
            self.source.remove(&number)
        } else {
            self.source.insert(number, line)
        }
    }

    pub fn line(&self, number: u16) -> Option<&Line> {
        self.source.get(&number)
    }

    pub fn lines(&self) -> Values<'_, u16, Line> {
        self.source.values()
    }

    /// Reads a whole source text. Blank lines are skipped; every other
    /// line must begin with a line number.
    pub fn load(source: &str) -> Result<Listing, Error> {
        let mut listing = Listing::new();
        for (index, text) in source.lines().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            listing.load_str(text).map_err(|e| match e.line_number() {
                Some(_) => e,
                None if e.detail().is_empty() => e.message(&format!("SOURCE LINE {}", index + 1)),
                None => e,
            })?;
        }
        Ok(listing)
    }

    /// Enters one line of source text.
    pub fn load_str(&mut self, text: &str) -> Result<(), Error> {
        if text.chars().count() > MAX_LINE_LEN {
            return Err(error!(SyntaxError; "LINE BUFFER OVERFLOW"));
        }
        let line = Line::new(text);
        if line.number().is_none() {
            let first = line
                .tokens()
                .iter()
                .find(|t| !matches!(t, Token::Whitespace(_)));
            if let Some(token @ Token::Literal(_)) = first {
                LineNumber::try_from(token)?;
            }
            return Err(error!(DirectStatementInFile));
        }
        self.insert(line);
        Ok(())
    }
}
