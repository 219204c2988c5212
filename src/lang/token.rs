pub use super::ident::Ident;
use super::{Error, LineNumber, MaxValue};
use std::collections::HashMap;
use std::convert::TryFrom;

thread_local!(
    static STRING_TO_TOKEN: HashMap<std::string::String, Token> = Word::ALL
        .iter()
        .cloned()
        .map(Token::Word)
        .chain(Operator::ALL.iter().cloned().map(Token::Operator))
        .chain(Token::PUNCTUATION.iter().cloned())
        .map(|t| (t.to_string(), t))
        .collect();
);

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Whitespace(usize),
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    Ident(Ident),
    Remark(String),
    Datum(String),
    LParen,
    RParen,
    Comma,
    Colon,
    Semicolon,
    Eol,
}

impl Token {
    const PUNCTUATION: [Token; 5] = [
        Token::LParen,
        Token::RParen,
        Token::Comma,
        Token::Colon,
        Token::Semicolon,
    ];

    pub fn from_string(s: &str) -> Option<Token> {
        STRING_TO_TOKEN.with(|stt| stt.get(s).cloned())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) | Remark(s) | Datum(s) => write!(f, "{}", s),
            Whitespace(u) => write!(f, "{s:>w$}", s = "", w = u),
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Colon => write!(f, ":"),
            Semicolon => write!(f, ";"),
            Eol => Ok(()),
        }
    }
}

impl TryFrom<&Token> for LineNumber {
    type Error = Error;
    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        let msg = "INVALID LINE NUMBER";
        if let Token::Literal(Literal::Number(s)) = token {
            if s.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(line) = s.parse::<u16>() {
                    if line <= LineNumber::max_value() {
                        return Ok(Some(line));
                    }
                }
                return Err(error!(Overflow; msg));
            }
        }
        Err(error!(SyntaxError; msg))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Number(String),
    String(String),
}

impl Literal {
    /// Numeric value of a number literal as lexed.
    pub fn value(&self) -> Option<f64> {
        match self {
            Literal::Number(s) => s.parse().ok(),
            Literal::String(_) => None,
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Literal::Number(s) => write!(f, "{}", s),
            Literal::String(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Word {
    Clear,
    Data,
    Def,
    Dim,
    Else,
    End,
    Fn,
    For,
    Gosub1,
    Gosub2,
    Goto1,
    Goto2,
    If,
    Input,
    Let,
    Next,
    On,
    Print1,
    Print2,
    Read,
    Rem1,
    Rem2,
    Restore,
    Return,
    Step,
    Stop,
    Then,
    To,
}

impl Word {
    const ALL: [Word; 28] = [
        Word::Clear,
        Word::Data,
        Word::Def,
        Word::Dim,
        Word::Else,
        Word::End,
        Word::Fn,
        Word::For,
        Word::Gosub1,
        Word::Gosub2,
        Word::Goto1,
        Word::Goto2,
        Word::If,
        Word::Input,
        Word::Let,
        Word::Next,
        Word::On,
        Word::Print1,
        Word::Print2,
        Word::Read,
        Word::Rem1,
        Word::Rem2,
        Word::Restore,
        Word::Return,
        Word::Step,
        Word::Stop,
        Word::Then,
        Word::To,
    ];
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            Clear => write!(f, "CLEAR"),
            Data => write!(f, "DATA"),
            Def => write!(f, "DEF"),
            Dim => write!(f, "DIM"),
            Else => write!(f, "ELSE"),
            End => write!(f, "END"),
            Fn => write!(f, "FN"),
            For => write!(f, "FOR"),
            Gosub1 => write!(f, "GOSUB"),
            Gosub2 => write!(f, "GO SUB"),
            Goto1 => write!(f, "GOTO"),
            Goto2 => write!(f, "GO TO"),
            If => write!(f, "IF"),
            Input => write!(f, "INPUT"),
            Let => write!(f, "LET"),
            Next => write!(f, "NEXT"),
            On => write!(f, "ON"),
            Print1 => write!(f, "PRINT"),
            Print2 => write!(f, "?"),
            Read => write!(f, "READ"),
            Rem1 => write!(f, "REM"),
            Rem2 => write!(f, "'"),
            Restore => write!(f, "RESTORE"),
            Return => write!(f, "RETURN"),
            Step => write!(f, "STEP"),
            Stop => write!(f, "STOP"),
            Then => write!(f, "THEN"),
            To => write!(f, "TO"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    And,
    Or,
}

impl Operator {
    const ALL: [Operator; 14] = [
        Operator::Caret,
        Operator::Multiply,
        Operator::Divide,
        Operator::Plus,
        Operator::Minus,
        Operator::Equal,
        Operator::NotEqual,
        Operator::Less,
        Operator::LessEqual,
        Operator::Greater,
        Operator::GreaterEqual,
        Operator::Not,
        Operator::And,
        Operator::Or,
    ];
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            Not => write!(f, "NOT"),
            And => write!(f, "AND"),
            Or => write!(f, "OR"),
        }
    }
}
