use basic::lang::{lex, token::*, Line};

fn token(s: &str) -> Option<Token> {
    let s = format!("?{}", s);
    let (_, mut tokens) = lex(&s);
    let mut t = tokens.drain(1..2);
    t.next()
}

fn number(s: &str) -> Token {
    Token::Literal(Literal::Number(s.to_string()))
}

#[test]
fn test_eq_gt() {
    let (ln, v) = lex("10 1=<>=<>2");
    assert_eq!(ln, Some(10));
    let mut x = v.iter();
    assert_eq!(x.next(), Some(&number("1")));
    assert_eq!(x.next(), Some(&Token::Operator(Operator::LessEqual)));
    assert_eq!(x.next(), Some(&Token::Operator(Operator::GreaterEqual)));
    assert_eq!(x.next(), Some(&Token::Operator(Operator::NotEqual)));
    assert_eq!(x.next(), Some(&number("2")));
    assert_eq!(x.next(), Some(&Token::Eol));
    assert_eq!(x.next(), None);
}

#[test]
fn test_go_to() {
    let (ln, v) = lex("10 go to");
    assert_eq!(ln, Some(10));
    assert_eq!(v, vec![Token::Word(Word::Goto2), Token::Eol]);
    assert_eq!(token("GOTO"), Some(Token::Word(Word::Goto1)));
}

#[test]
fn test_go_sub() {
    assert_eq!(token("GO SUB"), Some(Token::Word(Word::Gosub2)));
    assert_eq!(token("GOSUB"), Some(Token::Word(Word::Gosub1)));
}

#[test]
fn test_print_abbreviation() {
    let (ln, v) = lex("10 ?");
    assert_eq!(ln, Some(10));
    assert_eq!(v, vec![Token::Word(Word::Print2), Token::Eol]);
}

#[test]
fn test_crunched() {
    let (_, v) = lex("10 FORI=1TO10");
    assert_eq!(
        v,
        vec![
            Token::Word(Word::For),
            Token::Ident(Ident::Plain("I".into())),
            Token::Operator(Operator::Equal),
            number("1"),
            Token::Word(Word::To),
            number("10"),
            Token::Eol,
        ]
    );
}

#[test]
fn test_case_insensitive() {
    let (_, v) = lex("10 print a$");
    assert_eq!(
        v,
        vec![
            Token::Word(Word::Print1),
            Token::Whitespace(1),
            Token::Ident(Ident::String("A$".into())),
            Token::Eol,
        ]
    );
}

#[test]
fn test_doubled_quote() {
    let (_, v) = lex(r#"PRINT "A""B""#);
    assert_eq!(v[2], Token::Literal(Literal::String("A\"B".to_string())));
}

#[test]
fn test_unterminated_string() {
    let (_, v) = lex(r#"PRINT "AB"#);
    assert_eq!(v[2], Token::Literal(Literal::String("AB".to_string())));
}

#[test]
fn test_remark() {
    let (_, v) = lex("10 REM  hello  ");
    assert_eq!(
        v,
        vec![
            Token::Word(Word::Rem1),
            Token::Remark("  hello".to_string()),
            Token::Eol
        ]
    );
    assert_eq!(token("'"), Some(Token::Word(Word::Rem2)));
}

#[test]
fn test_unknown_character() {
    let (_, v) = lex("10 A=@");
    assert_eq!(v[2], Token::Unknown("@".to_string()));
}

#[test]
fn test_numbers() {
    assert_eq!(token("1.5E+3"), Some(number("1.5E+3")));
    assert_eq!(token(".5"), Some(number(".5")));
    assert_eq!(Literal::Number("1.5E+3".to_string()).value(), Some(1500.0));
}

#[test]
fn test_line_number_range() {
    assert_eq!(lex("65529 END").0, Some(65529));
    assert_eq!(lex("65530 END").0, None);
    assert_eq!(lex("END").0, None);
}

#[test]
fn test_line_listing() {
    assert_eq!(Line::new("10 for i=1 to 9").to_string(), "10 FOR I=1 TO 9");
    assert_eq!(Line::new("20 go to 10").to_string(), "20 GO TO 10");
}
