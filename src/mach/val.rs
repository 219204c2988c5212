use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;
use std::rc::Rc;

/// ## A BASIC value
///
/// Numbers are double precision. Names ending in `$` hold strings,
/// every other name holds a number.

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Number(f64),
    String(Rc<str>),
}

impl Val {
    /// The value an unassigned variable of this name reads as.
    pub fn default_for(name: &str) -> Val {
        if name.ends_with('$') {
            Val::String("".into())
        } else {
            Val::Number(0.0)
        }
    }

    /// Numbers are true when non-zero, strings when non-empty.
    pub fn is_true(&self) -> bool {
        match self {
            Val::Number(n) => *n != 0.0,
            Val::String(s) => !s.is_empty(),
        }
    }

    /// Fails unless the value matches the type a name's sigil demands.
    pub fn check_type(&self, name: &str) -> Result<(), Error> {
        match (self, name.ends_with('$')) {
            (Val::Number(_), false) | (Val::String(_), true) => Ok(()),
            _ => Err(error!(TypeMismatch; name)),
        }
    }
}

impl From<bool> for Val {
    fn from(b: bool) -> Self {
        Val::Number(if b { -1.0 } else { 0.0 })
    }
}

impl TryFrom<Val> for f64 {
    type Error = Error;
    fn try_from(val: Val) -> Result<Self, Self::Error> {
        match val {
            Val::Number(n) => Ok(n),
            Val::String(_) => Err(error!(TypeMismatch)),
        }
    }
}

impl TryFrom<Val> for Rc<str> {
    type Error = Error;
    fn try_from(val: Val) -> Result<Self, Self::Error> {
        match val {
            Val::String(s) => Ok(s),
            Val::Number(_) => Err(error!(TypeMismatch)),
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Number(n) => write!(f, "{}", format_number(*n)),
            Val::String(s) => write!(f, "{}", s),
        }
    }
}

/// Values print rounded to 15 significant digits. Anything that needs
/// more integer digits than that, or is very small, prints in exponent
/// form. Whole numbers print without a decimal point.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if !n.is_finite() {
        return n.to_string().to_ascii_uppercase();
    }
    let n = format!("{:.14e}", n).parse::<f64>().unwrap_or(n);
    let magnitude = n.abs();
    if magnitude >= 1e15 || magnitude < 1e-5 {
        format!("{:E}", n)
    } else if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.0 / 3.0), "0.333333333333333");
        assert_eq!(format_number(1e20), "1E20");
        assert_eq!(format_number(0.000001), "1E-6");
    }

    #[test]
    fn test_format_large_numbers() {
        assert_eq!(format_number(999_999_999_999_999.0), "999999999999999");
        assert_eq!(format_number(1e15), "1E15");
        assert_eq!(format_number(2f64.sqrt() * 1e15), "1.4142135623731E15");
        assert_eq!(format_number(-123_456_789_012_345_680.0), "-1.23456789012346E17");
    }

    #[test]
    fn test_truth() {
        assert!(Val::Number(-1.0).is_true());
        assert!(!Val::Number(0.0).is_true());
        assert!(Val::String("X".into()).is_true());
        assert!(!Val::String("".into()).is_true());
        assert_eq!(Val::from(true), Val::Number(-1.0));
    }

    #[test]
    fn test_check_type() {
        assert!(Val::Number(1.0).check_type("A").is_ok());
        assert!(Val::Number(1.0).check_type("A$").is_err());
        assert!(Val::String("".into()).check_type("A$").is_ok());
        assert!(Val::String("".into()).check_type("A").is_err());
    }
}
