use super::Val;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Operators
///
/// Every operator checks the tags of its operands before computing.
/// Relational operators yield -1 for true and 0 for false.

pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        match val {
            Val::Number(n) => Ok(Val::Number(-n)),
            Val::String(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn not(val: Val) -> Result<Val> {
        match val {
            Val::Number(n) => Ok(Val::Number(!Self::integer(n)? as f64)),
            Val::String(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::numbers(lhs, rhs)?;
        Ok(Val::Number(l.powf(r)))
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::numbers(lhs, rhs)?;
        Ok(Val::Number(l * r))
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::numbers(lhs, rhs)?;
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Ok(Val::Number(l / r))
    }

    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok(Val::Number(l + r)),
            (Val::String(l), Val::String(r)) => {
                let mut s = String::with_capacity(l.len() + r.len());
                s.push_str(&l);
                s.push_str(&r);
                Ok(Val::String(s.into()))
            }
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::numbers(lhs, rhs)?;
        Ok(Val::Number(l - r))
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Self::relation(lhs, rhs, |l, r| l == r, |l, r| l == r)
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Self::relation(lhs, rhs, |l, r| l != r, |l, r| l != r)
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        Self::relation(lhs, rhs, |l, r| l < r, |l, r| l < r)
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Self::relation(lhs, rhs, |l, r| l <= r, |l, r| l <= r)
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        Self::relation(lhs, rhs, |l, r| l > r, |l, r| l > r)
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Self::relation(lhs, rhs, |l, r| l >= r, |l, r| l >= r)
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::numbers(lhs, rhs)?;
        Ok(Val::Number((Self::integer(l)? & Self::integer(r)?) as f64))
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Self::numbers(lhs, rhs)?;
        Ok(Val::Number((Self::integer(l)? | Self::integer(r)?) as f64))
    }

    fn numbers(lhs: Val, rhs: Val) -> Result<(f64, f64)> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok((l, r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    /// Logical operators work bitwise on the truncated integer.
    fn integer(n: f64) -> Result<i64> {
        let n = n.trunc();
        if n.is_finite() && n.abs() < 9.2e18 {
            Ok(n as i64)
        } else {
            Err(error!(Overflow))
        }
    }

    fn relation(
        lhs: Val,
        rhs: Val,
        numbers: fn(f64, f64) -> bool,
        strings: fn(&str, &str) -> bool,
    ) -> Result<Val> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok(Val::from(numbers(l, r))),
            (Val::String(l), Val::String(r)) => Ok(Val::from(strings(&l, &r))),
            _ => Err(error!(TypeMismatch)),
        }
    }
}
