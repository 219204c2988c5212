use super::{token::*, LineNumber, MaxValue};

pub fn lex(s: &str) -> (LineNumber, Vec<Token>) {
    BasicLexer::lex(s)
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;

    fn whitespace(&mut self) -> Option<Token> {
        let mut len = 0;
        while let Some(pk) = self.chars().peek() {
            if !is_basic_whitespace(*pk) {
                break;
            }
            self.chars().next();
            len += 1;
        }
        Some(Token::Whitespace(len))
    }

    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        let mut decimal = false;
        while let Some(&pk) = self.chars().peek() {
            if is_basic_digit(pk) || (!decimal && pk == '.') {
                decimal |= pk == '.';
                s.push(pk);
                self.chars().next();
                continue;
            }
            if pk == 'E' || pk == 'e' {
                let mut ahead = self.chars().clone();
                ahead.next();
                let exponent = match ahead.next() {
                    Some(c) if is_basic_digit(c) => true,
                    Some('+') | Some('-') => matches!(ahead.next(), Some(c) if is_basic_digit(c)),
                    _ => false,
                };
                if exponent {
                    self.chars().next();
                    s.push('E');
                    if let Some(&sign) = self.chars().peek() {
                        if sign == '+' || sign == '-' {
                            s.push(sign);
                            self.chars().next();
                        }
                    }
                    while let Some(&digit) = self.chars().peek() {
                        if !is_basic_digit(digit) {
                            break;
                        }
                        s.push(digit);
                        self.chars().next();
                    }
                }
            }
            break;
        }
        Some(Token::Literal(Literal::Number(s)))
    }

    fn string(&mut self) -> Option<Token> {
        let mut s = String::new();
        self.chars().next();
        while let Some(ch) = self.chars().next() {
            if ch == '"' {
                if let Some('"') = self.chars().peek() {
                    self.chars().next();
                    s.push('"');
                    continue;
                }
                break;
            }
            s.push(ch);
        }
        Some(Token::Literal(Literal::String(s)))
    }

    fn alphabetic(&mut self) -> Option<Token> {
        let mut s = String::new();
        let mut digit = false;
        loop {
            let ch = match self.chars().next() {
                Some(ch) => ch.to_ascii_uppercase(),
                None => {
                    debug_assert!(false, "Failed to tokenize alphabetic.");
                    return None;
                }
            };
            s.push(ch);
            if is_basic_digit(ch) {
                digit = true;
            }
            if let Some(token) = Token::from_string(&s) {
                return Some(token);
            }
            if ch == '$' {
                return Some(Token::Ident(Ident::String(s.into())));
            }
            if let Some(pk) = self.chars().peek() {
                if is_basic_alphabetic(*pk) {
                    if digit {
                        break;
                    }
                    continue;
                }
                if is_basic_digit(*pk) || *pk == '$' {
                    continue;
                }
            }
            break;
        }
        Some(Token::Ident(Ident::Plain(s.into())))
    }

    fn minutia(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(ch) = self.chars().next() {
            s.push(ch);
            if let Some(t) = Token::from_string(&s) {
                return Some(t);
            }
            match self.chars().peek() {
                Some(pk)
                    if !is_basic_alphabetic(*pk)
                        && !is_basic_digit(*pk)
                        && !is_basic_whitespace(*pk)
                        && *pk != '"' =>
                {
                    continue
                }
                _ => break,
            }
        }
        Some(Token::Unknown(s))
    }

    fn datum(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(&pk) = self.chars().peek() {
            if pk == ',' || pk == ':' {
                break;
            }
            s.push(pk);
            self.chars().next();
        }
        Some(Token::Datum(s))
    }
}

#[derive(Debug, PartialEq)]
enum Mode {
    Normal,
    Remark,
    Data,
    Done,
}

struct BasicLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    mode: Mode,
}

impl<'a> Tokenizers<'a> for BasicLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
}

impl<'a> Iterator for BasicLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mode == Mode::Done {
            return None;
        }
        let pk = match self.chars.peek() {
            Some(pk) => *pk,
            None => {
                self.mode = Mode::Done;
                return Some(Token::Eol);
            }
        };
        if self.mode == Mode::Remark {
            return Some(Token::Remark(self.chars.by_ref().collect::<String>()));
        }
        if is_basic_whitespace(pk) {
            return self.whitespace();
        }
        if pk == '"' {
            return self.string();
        }
        if self.mode == Mode::Data {
            return match pk {
                ',' => {
                    self.chars.next();
                    Some(Token::Comma)
                }
                ':' => {
                    self.chars.next();
                    self.mode = Mode::Normal;
                    Some(Token::Colon)
                }
                _ => self.datum(),
            };
        }
        if is_basic_digit(pk) || pk == '.' {
            return self.number();
        }
        let token = if is_basic_alphabetic(pk) {
            self.alphabetic()
        } else {
            self.minutia()
        };
        match token {
            Some(Token::Word(Word::Rem1)) | Some(Token::Word(Word::Rem2)) => {
                self.mode = Mode::Remark
            }
            Some(Token::Word(Word::Data)) => self.mode = Mode::Data,
            _ => {}
        }
        token
    }
}

impl<'a> BasicLexer<'a> {
    fn lex(s: &str) -> (LineNumber, Vec<Token>) {
        let mut line_number = None;
        let mut s = s;
        let mut ln: usize = 0;
        let mut seen_digit = false;
        for ch in s.chars() {
            if seen_digit && !is_basic_digit(ch) {
                break;
            }
            if is_basic_digit(ch) {
                seen_digit = true;
            } else if !is_basic_whitespace(ch) {
                break;
            }
            ln += ch.len_utf8();
        }
        if let Ok(n) = s[0..ln].trim_start().parse::<u16>() {
            if n <= LineNumber::max_value() {
                line_number = Some(n);
                if let Some(' ') = s[ln..].chars().next() {
                    ln += 1;
                }
                s = &s[ln..];
            }
        }
        let mut tokens = BasicLexer {
            chars: s.chars().peekable(),
            mode: Mode::Normal,
        }
        .collect();
        BasicLexer::trim_end(&mut tokens);
        BasicLexer::collapse_go(&mut tokens);
        BasicLexer::collapse_lt_gt_equal(&mut tokens);
        (line_number, tokens)
    }

    fn collapse_lt_gt_equal(tokens: &mut Vec<Token>) {
        let mut locs: Vec<(usize, Token)> = vec![];
        let mut tokens_iter = tokens.windows(2).enumerate();
        while let Some((index, tt)) = tokens_iter.next() {
            let op = match (&tt[0], &tt[1]) {
                (Token::Operator(lhs), Token::Operator(rhs)) => match (lhs, rhs) {
                    (Operator::Less, Operator::Equal) | (Operator::Equal, Operator::Less) => {
                        Operator::LessEqual
                    }
                    (Operator::Greater, Operator::Equal) | (Operator::Equal, Operator::Greater) => {
                        Operator::GreaterEqual
                    }
                    (Operator::Less, Operator::Greater) | (Operator::Greater, Operator::Less) => {
                        Operator::NotEqual
                    }
                    _ => continue,
                },
                _ => continue,
            };
            locs.push((index, Token::Operator(op)));
            tokens_iter.next();
        }
        while let Some((index, token)) = locs.pop() {
            tokens.splice(index..index + 2, Some(token));
        }
    }

    fn collapse_go(tokens: &mut Vec<Token>) {
        let mut locs: Vec<(usize, Token)> = vec![];
        for (index, ttt) in tokens.windows(3).enumerate() {
            if let Token::Ident(Ident::Plain(go)) = &ttt[0] {
                if &**go == "GO" {
                    if let Token::Whitespace(_) = ttt[1] {
                        if let Token::Word(Word::To) = ttt[2] {
                            locs.push((index, Token::Word(Word::Goto2)));
                        }
                        if let Token::Ident(Ident::Plain(sub)) = &ttt[2] {
                            if &**sub == "SUB" {
                                locs.push((index, Token::Word(Word::Gosub2)));
                            }
                        }
                    }
                }
            }
        }
        while let Some((index, token)) = locs.pop() {
            tokens.splice(index..index + 3, Some(token));
        }
    }

    fn trim_end(tokens: &mut Vec<Token>) {
        let eol = tokens.pop();
        if let Some(Token::Whitespace(_)) = tokens.last() {
            tokens.pop();
        }
        match tokens.last_mut() {
            Some(Token::Remark(s)) | Some(Token::Datum(s)) => {
                let len = s.trim_end().len();
                s.truncate(len);
            }
            _ => {}
        }
        if let Some(eol) = eol {
            tokens.push(eol);
        }
    }
}
