use std::rc::Rc;

// Used in both Token and Ast

const BUILT_IN: &[&str] = &[
    "ABS", "ASC", "ATN", "CHR$", "COS", "DATE$", "EXP", "INT", "LEFT$", "LEN", "LOG", "MID$",
    "RIGHT$", "RND", "SGN", "SIN", "SPC", "SQR", "STR$", "TAB", "TAN", "TIME$", "VAL",
];

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Ident {
    Plain(Rc<str>),
    String(Rc<str>),
}

impl Ident {
    pub fn new(name: &str) -> Ident {
        if name.ends_with('$') {
            Ident::String(name.into())
        } else {
            Ident::Plain(name.into())
        }
    }

    pub fn name(&self) -> &Rc<str> {
        match self {
            Ident::Plain(s) | Ident::String(s) => s,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Ident::String(_))
    }

    /// Built-in function names can't be assigned, dimensioned or looped over.
    pub fn is_reserved(&self) -> bool {
        BUILT_IN.contains(&&**self.name())
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
