use super::{ast::*, token::*, Column, Error, LineNumber};
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

pub fn parse(line_number: LineNumber, tokens: &[Token]) -> Result<Vec<Statement>> {
    match Parser::parse(tokens) {
        Err(e) => Err(e.in_line_number(line_number)),
        Ok(r) => Ok(r),
    }
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
    col: Column,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> Result<Vec<Statement>> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            peeked: None,
            col: 0..0,
        };
        let mut r: Vec<Statement> = vec![];
        if let Err(e) = parse.statements(&mut r) {
            return Err(e.in_column(&parse.col));
        }
        match parse.next() {
            None | Some(Token::Eol) => Ok(r),
            Some(_) => Err(error!(SyntaxError, ..&parse.col; "ELSE WITHOUT IF")),
        }
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    fn next(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        loop {
            self.col.start = self.col.end;
            let t = self.token_stream.next()?;
            self.col.end += t.to_string().chars().count();
            match t {
                Token::Whitespace(_) => continue,
                _ => return Some(t),
            }
        }
    }

    fn peek(&mut self) -> Option<&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.next();
        }
        self.peeked
    }

    fn at_end_of_statement(&mut self) -> bool {
        matches!(
            self.peek(),
            None | Some(Token::Eol) | Some(Token::Colon) | Some(Token::Word(Word::Else))
        )
    }

    /// Statements up to the end of the line or an `ELSE`, which is left unread.
    fn statements(&mut self, r: &mut Vec<Statement>) -> Result<()> {
        loop {
            match self.peek() {
                None | Some(Token::Eol) | Some(Token::Word(Word::Else)) => return Ok(()),
                Some(Token::Colon) => {
                    self.next();
                    continue;
                }
                _ => {}
            }
            self.statement(r)?;
            if !self.at_end_of_statement() {
                self.next();
                return Err(error!(SyntaxError; "UNEXPECTED TOKEN"));
            }
        }
    }

    fn statement(&mut self, r: &mut Vec<Statement>) -> Result<()> {
        match self.peek() {
            Some(Token::Ident(_)) => Statement::for_word(self, &Word::Let, r),
            Some(Token::Word(word)) => {
                self.next();
                Statement::for_word(self, word, r)
            }
            _ => {
                self.next();
                Err(error!(SyntaxError; "EXPECTED STATEMENT"))
            }
        }
    }

    /// The body of a THEN or ELSE: an optional line number to jump to
    /// followed by statements.
    fn branch(&mut self, r: &mut Vec<Statement>) -> Result<()> {
        if let Some(Token::Literal(Literal::Number(_))) = self.peek() {
            let column = self.column();
            r.push(Statement::Goto(column, self.line_number()?));
        }
        self.statements(r)
    }

    fn expression(&mut self) -> Result<Expression> {
        fn parse(this: &mut Parser, precedence: usize) -> Result<Expression> {
            let mut lhs = match this.next() {
                Some(Token::LParen) => {
                    let expr = parse(this, 0)?;
                    this.expect(Token::RParen)?;
                    expr
                }
                Some(Token::Ident(i)) => {
                    let column = this.column();
                    match this.peek() {
                        Some(Token::LParen) => {
                            Expression::Call(column, i.clone(), this.expression_list()?)
                        }
                        _ => Expression::Var(column, i.clone()),
                    }
                }
                Some(Token::Word(Word::Fn)) => {
                    let column = this.column();
                    let ident = this.function_name()?;
                    let args = match this.peek() {
                        Some(Token::LParen) => this.expression_list()?,
                        _ => vec![],
                    };
                    Expression::UserFn(column, ident, args)
                }
                Some(Token::Literal(l)) => Expression::for_literal(this.column(), l)?,
                Some(Token::Operator(Operator::Minus)) => {
                    let column = this.column();
                    let expr = parse(this, Expression::UNARY)?;
                    Expression::Negation(column, Box::new(expr))
                }
                Some(Token::Operator(Operator::Plus)) => parse(this, Expression::UNARY)?,
                Some(Token::Operator(Operator::Not)) => {
                    let column = this.column();
                    let expr = parse(this, Expression::UNARY)?;
                    Expression::Not(column, Box::new(expr))
                }
                _ => return Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
            };
            while let Some(Token::Operator(op)) = this.peek() {
                let op_precedence = Expression::op_precedence(op);
                if op_precedence <= precedence {
                    break;
                }
                this.next();
                let column = this.column();
                let rhs = parse(this, op_precedence)?;
                lhs = Expression::for_binary_op(column, op, lhs, rhs);
            }
            Ok(lhs)
        }
        parse(self, 0)
    }

    fn expression_list(&mut self) -> Result<Vec<Expression>> {
        self.expect(Token::LParen)?;
        let mut v: Vec<Expression> = vec![];
        loop {
            v.push(self.expression()?);
            match self.next() {
                Some(Token::RParen) => return Ok(v),
                Some(Token::Comma) => continue,
                _ => return Err(error!(SyntaxError; "EXPECTED END OR SEPARATOR")),
            }
        }
    }

    fn printer_list(&mut self) -> Result<Vec<PrintItem>> {
        let mut v: Vec<PrintItem> = vec![];
        loop {
            if self.at_end_of_statement() {
                return Ok(v);
            }
            match self.peek() {
                Some(Token::Semicolon) => {
                    self.next();
                    v.push(PrintItem::Semicolon(self.column()));
                }
                Some(Token::Comma) => {
                    self.next();
                    v.push(PrintItem::Comma(self.column()));
                }
                _ => v.push(PrintItem::Expression(self.expression()?)),
            }
        }
    }

    fn variable(&mut self) -> Result<Variable> {
        let (column, ident) = self.target()?;
        match self.peek() {
            Some(Token::LParen) => Ok(Variable::Array(column, ident, self.expression_list()?)),
            _ => Ok(Variable::Unary(column, ident)),
        }
    }

    fn variable_list(&mut self) -> Result<Vec<Variable>> {
        let mut v: Vec<Variable> = vec![self.variable()?];
        while let Some(Token::Comma) = self.peek() {
            self.next();
            v.push(self.variable()?);
        }
        Ok(v)
    }

    fn ident(&mut self) -> Result<(Column, Ident)> {
        let ident = match self.next() {
            Some(Token::Ident(i)) => i.clone(),
            _ => return Err(error!(SyntaxError; "EXPECTED IDENTIFIER")),
        };
        Ok((self.column(), ident))
    }

    /// An identifier that will be written to.
    fn target(&mut self) -> Result<(Column, Ident)> {
        let (column, ident) = self.ident()?;
        if ident.is_reserved() {
            return Err(error!(SyntaxError; "RESERVED FOR BUILT-IN"));
        }
        Ok((column, ident))
    }

    /// `FN` was read; the name is `FN` joined with an optional identifier.
    fn function_name(&mut self) -> Result<Ident> {
        match self.peek() {
            Some(Token::Ident(i)) => {
                self.next();
                Ok(Ident::new(&format!("FN{}", i)))
            }
            _ => Ok(Ident::new("FN")),
        }
    }

    fn line_number(&mut self) -> Result<u16> {
        let token = match self.next() {
            Some(t) => t,
            None => return Err(error!(SyntaxError; "EXPECTED LINE NUMBER")),
        };
        match LineNumber::try_from(token)? {
            Some(number) => Ok(number),
            None => Err(error!(SyntaxError; "EXPECTED LINE NUMBER")),
        }
    }

    fn line_number_list(&mut self) -> Result<Vec<u16>> {
        let mut v: Vec<u16> = vec![self.line_number()?];
        while let Some(Token::Comma) = self.peek() {
            self.next();
            v.push(self.line_number()?);
        }
        Ok(v)
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        let message = match token {
            Unknown(_) | Whitespace(_) | Remark(_) | Datum(_) | Eol => {
                "UNEXPECTED TOKEN".to_string()
            }
            Literal(_) => "EXPECTED LITERAL".to_string(),
            Word(w) => format!("EXPECTED {}", w),
            Operator(op) => format!("EXPECTED {}", op),
            Ident(_) => "EXPECTED IDENTIFIER".to_string(),
            LParen => "EXPECTED LEFT PARENTHESIS".to_string(),
            RParen => "EXPECTED RIGHT PARENTHESIS".to_string(),
            Comma => "EXPECTED COMMA".to_string(),
            Colon => "EXPECTED COLON".to_string(),
            Semicolon => "EXPECTED SEMICOLON".to_string(),
        };
        Err(error!(SyntaxError; &message))
    }
}

impl Expression {
    const UNARY: usize = 60;

    fn for_binary_op(col: Column, op: &Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Caret => Expression::Power(col, lhs, rhs),
            Multiply => Expression::Multiply(col, lhs, rhs),
            Divide => Expression::Divide(col, lhs, rhs),
            Plus => Expression::Add(col, lhs, rhs),
            Minus => Expression::Subtract(col, lhs, rhs),
            Equal => Expression::Equal(col, lhs, rhs),
            NotEqual => Expression::NotEqual(col, lhs, rhs),
            Less => Expression::Less(col, lhs, rhs),
            LessEqual => Expression::LessEqual(col, lhs, rhs),
            Greater => Expression::Greater(col, lhs, rhs),
            GreaterEqual => Expression::GreaterEqual(col, lhs, rhs),
            And => Expression::And(col, lhs, rhs),
            Or => Expression::Or(col, lhs, rhs),
            Not => {
                debug_assert!(false, "NOT is not a binary operator.");
                Expression::Not(col, rhs)
            }
        }
    }

    fn op_precedence(op: &Operator) -> usize {
        use Operator::*;
        match op {
            Or => 10,
            And => 20,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 30,
            Plus | Minus => 40,
            Multiply | Divide => 50,
            Caret => 70,
            Not => 0,
        }
    }

    fn for_literal(col: Column, lit: &Literal) -> Result<Expression> {
        match lit {
            Literal::Number(s) => match lit.value() {
                Some(n) => Ok(Expression::Number(col, n)),
                None => Err(error!(SyntaxError; &format!("INVALID NUMBER {}", s))),
            },
            Literal::String(s) => Ok(Expression::String(col, s.as_str().into())),
        }
    }
}

impl Statement {
    fn for_word(parse: &mut Parser, word: &Word, r: &mut Vec<Statement>) -> Result<()> {
        let column = parse.column();
        use Word::*;
        let statement = match word {
            Clear => Statement::Clear(column),
            Data => Self::r#data(parse, column)?,
            Def => Self::r#def(parse, column)?,
            Dim => Self::r#dim(parse, column)?,
            End => Statement::End(column),
            For => Self::r#for(parse, column)?,
            Gosub1 | Gosub2 => Statement::Gosub(column, parse.line_number()?),
            Goto1 | Goto2 => Statement::Goto(column, parse.line_number()?),
            If => return Self::r#if(parse, column, r),
            Input => Self::r#input(parse, column)?,
            Let => Self::r#let(parse, column)?,
            Next => return Self::r#next(parse, column, r),
            On => Self::r#on(parse, column)?,
            Print1 | Print2 => Statement::Print(column, parse.printer_list()?),
            Read => Statement::Read(column, parse.variable_list()?),
            Rem1 | Rem2 => {
                if let Some(Token::Remark(_)) = parse.peek() {
                    parse.next();
                }
                Statement::Rem(column)
            }
            Restore => Self::r#restore(parse, column)?,
            Return => Statement::Return(column),
            Stop => Statement::Stop(column),
            Else | Fn | Step | Then | To => return Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        };
        r.push(statement);
        Ok(())
    }

    fn r#data(parse: &mut Parser, column: Column) -> Result<Statement> {
        let mut v: Vec<Datum> = vec![];
        loop {
            let datum = match parse.peek() {
                Some(Token::Literal(Literal::String(s))) => {
                    parse.next();
                    Datum::Quoted(s.as_str().into())
                }
                Some(Token::Datum(s)) => {
                    parse.next();
                    Datum::Unquoted(s.trim().into())
                }
                _ => Datum::Unquoted("".into()),
            };
            v.push(datum);
            match parse.peek() {
                Some(Token::Comma) => {
                    parse.next();
                }
                _ => return Ok(Statement::Data(column, v)),
            }
        }
    }

    fn r#def(parse: &mut Parser, column: Column) -> Result<Statement> {
        parse.expect(Token::Word(Word::Fn))?;
        let name = parse.function_name()?;
        let mut params: Vec<Ident> = vec![];
        if let Some(Token::LParen) = parse.peek() {
            parse.next();
            loop {
                params.push(parse.ident()?.1);
                match parse.next() {
                    Some(Token::RParen) => break,
                    Some(Token::Comma) => continue,
                    _ => return Err(error!(SyntaxError; "EXPECTED END OR SEPARATOR")),
                }
            }
        }
        parse.expect(Token::Operator(Operator::Equal))?;
        Ok(Statement::Def(column, name, params, parse.expression()?))
    }

    fn r#dim(parse: &mut Parser, column: Column) -> Result<Statement> {
        let vars = parse.variable_list()?;
        if vars.iter().any(|v| matches!(v, Variable::Unary(..))) {
            return Err(error!(SyntaxError; "EXPECTED DIMENSIONS"));
        }
        Ok(Statement::Dim(column, vars))
    }

    fn r#for(parse: &mut Parser, column: Column) -> Result<Statement> {
        let (_, ident) = parse.target()?;
        if ident.is_string() {
            return Err(error!(SyntaxError; "EXPECTED NUMERIC VARIABLE"));
        }
        parse.expect(Token::Operator(Operator::Equal))?;
        let from = parse.expression()?;
        parse.expect(Token::Word(Word::To))?;
        let to = parse.expression()?;
        let step = match parse.peek() {
            Some(Token::Word(Word::Step)) => {
                parse.next();
                Some(parse.expression()?)
            }
            _ => None,
        };
        Ok(Statement::For(column, ident, from, to, step))
    }

    fn r#if(parse: &mut Parser, column: Column, r: &mut Vec<Statement>) -> Result<()> {
        let predicate = parse.expression()?;
        let if_index = r.len();
        r.push(Statement::If(column, predicate, 0));
        match parse.next() {
            Some(Token::Word(Word::Then)) => parse.branch(r)?,
            Some(Token::Word(Word::Goto1)) | Some(Token::Word(Word::Goto2)) => {
                let column = parse.column();
                r.push(Statement::Goto(column, parse.line_number()?));
                parse.statements(r)?;
            }
            _ => return Err(error!(SyntaxError; "EXPECTED THEN")),
        }
        if let Some(Token::Word(Word::Else)) = parse.peek() {
            parse.next();
            let else_index = r.len();
            r.push(Statement::Else(parse.column(), 0));
            Self::set_target(r, if_index, else_index + 1);
            parse.branch(r)?;
            let end = r.len();
            Self::set_target(r, else_index, end);
        } else {
            let end = r.len();
            Self::set_target(r, if_index, end);
        }
        Ok(())
    }

    fn set_target(r: &mut [Statement], index: usize, target: usize) {
        match r.get_mut(index) {
            Some(Statement::If(_, _, t)) | Some(Statement::Else(_, t)) => *t = target,
            _ => debug_assert!(false, "No branch at {}.", index),
        }
    }

    fn r#input(parse: &mut Parser, column: Column) -> Result<Statement> {
        let mut prompt: Rc<str> = "? ".into();
        if let Some(Token::Literal(Literal::String(s))) = parse.peek() {
            parse.next();
            prompt = match parse.next() {
                Some(Token::Semicolon) => format!("{}? ", s).into(),
                Some(Token::Comma) => s.as_str().into(),
                _ => return Err(error!(SyntaxError; "EXPECTED SEMICOLON")),
            };
        }
        Ok(Statement::Input(column, prompt, parse.variable_list()?))
    }

    fn r#let(parse: &mut Parser, column: Column) -> Result<Statement> {
        let var = parse.variable()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let expr = parse.expression()?;
        Ok(Statement::Let(column, var, expr))
    }

    fn r#next(parse: &mut Parser, column: Column, r: &mut Vec<Statement>) -> Result<()> {
        if let Some(Token::Ident(_)) = parse.peek() {
            loop {
                let (column, ident) = parse.ident()?;
                r.push(Statement::Next(column, Some(ident)));
                match parse.peek() {
                    Some(Token::Comma) => {
                        parse.next();
                    }
                    _ => return Ok(()),
                }
            }
        }
        r.push(Statement::Next(column, None));
        Ok(())
    }

    fn r#on(parse: &mut Parser, column: Column) -> Result<Statement> {
        let expr = parse.expression()?;
        match parse.next() {
            Some(Token::Word(Word::Goto1)) | Some(Token::Word(Word::Goto2)) => {
                Ok(Statement::OnGoto(column, expr, parse.line_number_list()?))
            }
            Some(Token::Word(Word::Gosub1)) | Some(Token::Word(Word::Gosub2)) => {
                Ok(Statement::OnGosub(column, expr, parse.line_number_list()?))
            }
            _ => Err(error!(SyntaxError; "EXPECTED GOTO OR GOSUB")),
        }
    }

    fn r#restore(parse: &mut Parser, column: Column) -> Result<Statement> {
        match parse.peek() {
            Some(Token::Literal(_)) => Ok(Statement::Restore(column, Some(parse.line_number()?))),
            _ => Ok(Statement::Restore(column, None)),
        }
    }
}
