/*!
## Abstract syntax tree

A line parses into a flat vector of statements. `IF` and `ELSE` carry
the statement offset, within the same line, where execution continues
when their branch is not taken.

*/

use super::Column;
pub use super::ident::Ident;
use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Clear(Column),
    Data(Column, Vec<Datum>),
    Def(Column, Ident, Vec<Ident>, Expression),
    Dim(Column, Vec<Variable>),
    Else(Column, usize),
    End(Column),
    For(Column, Ident, Expression, Expression, Option<Expression>),
    Gosub(Column, u16),
    Goto(Column, u16),
    If(Column, Expression, usize),
    Input(Column, Rc<str>, Vec<Variable>),
    Let(Column, Variable, Expression),
    Next(Column, Option<Ident>),
    OnGoto(Column, Expression, Vec<u16>),
    OnGosub(Column, Expression, Vec<u16>),
    Print(Column, Vec<PrintItem>),
    Read(Column, Vec<Variable>),
    Rem(Column),
    Restore(Column, Option<u16>),
    Return(Column),
    Stop(Column),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Variable {
    Unary(Column, Ident),
    Array(Column, Ident, Vec<Expression>),
}

impl Variable {
    pub fn ident(&self) -> &Ident {
        match self {
            Variable::Unary(_, ident) | Variable::Array(_, ident, _) => ident,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum PrintItem {
    Expression(Expression),
    Comma(Column),
    Semicolon(Column),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Datum {
    Quoted(Rc<str>),
    Unquoted(Rc<str>),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(Column, f64),
    String(Column, Rc<str>),
    Var(Column, Ident),
    Call(Column, Ident, Vec<Expression>),
    UserFn(Column, Ident, Vec<Expression>),
    Negation(Column, Box<Expression>),
    Not(Column, Box<Expression>),
    Power(Column, Box<Expression>, Box<Expression>),
    Multiply(Column, Box<Expression>, Box<Expression>),
    Divide(Column, Box<Expression>, Box<Expression>),
    Add(Column, Box<Expression>, Box<Expression>),
    Subtract(Column, Box<Expression>, Box<Expression>),
    Equal(Column, Box<Expression>, Box<Expression>),
    NotEqual(Column, Box<Expression>, Box<Expression>),
    Less(Column, Box<Expression>, Box<Expression>),
    LessEqual(Column, Box<Expression>, Box<Expression>),
    Greater(Column, Box<Expression>, Box<Expression>),
    GreaterEqual(Column, Box<Expression>, Box<Expression>),
    And(Column, Box<Expression>, Box<Expression>),
    Or(Column, Box<Expression>, Box<Expression>),
}
