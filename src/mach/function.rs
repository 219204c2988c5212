use super::val::format_number;
use super::Val;
use crate::error;
use crate::lang::Error;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::convert::TryFrom;
use std::ops::RangeInclusive;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Abs,
    Asc,
    Atn,
    Chr,
    Cos,
    Date,
    Exp,
    Int,
    Left,
    Len,
    Log,
    Mid,
    Right,
    Rnd,
    Sgn,
    Sin,
    Spc,
    Sqr,
    Str,
    Tab,
    Tan,
    Time,
    Val,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Builtin> {
        use Builtin::*;
        Some(match name {
            "ABS" => Abs,
            "ASC" => Asc,
            "ATN" => Atn,
            "CHR$" => Chr,
            "COS" => Cos,
            "DATE$" => Date,
            "EXP" => Exp,
            "INT" => Int,
            "LEFT$" => Left,
            "LEN" => Len,
            "LOG" => Log,
            "MID$" => Mid,
            "RIGHT$" => Right,
            "RND" => Rnd,
            "SGN" => Sgn,
            "SIN" => Sin,
            "SPC" => Spc,
            "SQR" => Sqr,
            "STR$" => Str,
            "TAB" => Tab,
            "TAN" => Tan,
            "TIME$" => Time,
            "VAL" => Val,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        use Builtin::*;
        match self {
            Abs => "ABS",
            Asc => "ASC",
            Atn => "ATN",
            Chr => "CHR$",
            Cos => "COS",
            Date => "DATE$",
            Exp => "EXP",
            Int => "INT",
            Left => "LEFT$",
            Len => "LEN",
            Log => "LOG",
            Mid => "MID$",
            Right => "RIGHT$",
            Rnd => "RND",
            Sgn => "SGN",
            Sin => "SIN",
            Spc => "SPC",
            Sqr => "SQR",
            Str => "STR$",
            Tab => "TAB",
            Tan => "TAN",
            Time => "TIME$",
            Val => "VAL",
        }
    }

    pub fn arity(self) -> RangeInclusive<usize> {
        use Builtin::*;
        match self {
            Date | Time => 0..=0,
            Rnd => 0..=1,
            Left | Right => 2..=2,
            Mid => 2..=3,
            _ => 1..=1,
        }
    }
}

/// ## Built-in functions
///
/// Holds the random number state so RND sequences are reproducible
/// when a seed is configured.

pub struct Function {
    rng: StdRng,
    last_rnd: f64,
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Function {{ last_rnd: {} }}", self.last_rnd)
    }
}

impl Function {
    pub fn new(seed: Option<u64>) -> Function {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Function { rng, last_rnd: 0.0 }
    }

    pub fn call(&mut self, builtin: Builtin, args: Vec<Val>) -> Result<Val> {
        if !builtin.arity().contains(&args.len()) {
            return Err(error!(IllegalFunctionCall;
                &format!("WRONG NUMBER OF ARGUMENTS TO {}", builtin.name())));
        }
        let args = Args { builtin, args };
        let val = match builtin {
            Builtin::Abs => Val::Number(args.number(0)?.abs()),
            Builtin::Asc => match args.string(0)?.chars().next() {
                Some(ch) => Val::Number(ch as u32 as f64),
                None => return Err(args.illegal()),
            },
            Builtin::Atn => Val::Number(args.number(0)?.atan()),
            Builtin::Chr => {
                let code = args.number(0)?;
                match std::char::from_u32(code as u32) {
                    Some(ch) if code >= 0.0 => Val::String(ch.to_string().into()),
                    _ => return Err(args.illegal()),
                }
            }
            Builtin::Cos => Val::Number(args.number(0)?.cos()),
            Builtin::Date => Val::String(chrono::Local::now().format("%m-%d-%Y").to_string().into()),
            Builtin::Exp => Val::Number(args.number(0)?.exp()),
            Builtin::Int => Val::Number(args.number(0)?.floor()),
            Builtin::Left => {
                let s = args.string(0)?;
                let len = args.count(1)?;
                Val::String(s.chars().take(len).collect::<String>().into())
            }
            Builtin::Len => Val::Number(args.string(0)?.chars().count() as f64),
            Builtin::Log => {
                let n = args.number(0)?;
                if n <= 0.0 {
                    return Err(args.illegal());
                }
                Val::Number(n.ln())
            }
            Builtin::Mid => {
                let s = args.string(0)?;
                let start = args.count(1)?;
                if start < 1 {
                    return Err(args.illegal());
                }
                let len = if args.args.len() > 2 {
                    args.count(2)?
                } else {
                    usize::max_value()
                };
                Val::String(s.chars().skip(start - 1).take(len).collect::<String>().into())
            }
            Builtin::Right => {
                let s = args.string(0)?;
                let len = args.count(1)?;
                let skip = s.chars().count().saturating_sub(len);
                Val::String(s.chars().skip(skip).collect::<String>().into())
            }
            Builtin::Rnd => Val::Number(self.rnd(if args.args.is_empty() {
                1.0
            } else {
                args.number(0)?
            })),
            Builtin::Sgn => Val::Number(match args.number(0)? {
                n if n > 0.0 => 1.0,
                n if n < 0.0 => -1.0,
                _ => 0.0,
            }),
            Builtin::Sin => Val::Number(args.number(0)?.sin()),
            Builtin::Spc => {
                let len = args.count(0)?;
                if len > 255 {
                    return Err(args.illegal());
                }
                Val::String(" ".repeat(len).into())
            }
            Builtin::Sqr => {
                let n = args.number(0)?;
                if n < 0.0 {
                    return Err(args.illegal());
                }
                Val::Number(n.sqrt())
            }
            Builtin::Str => {
                let n = args.number(0)?;
                let s = format_number(n);
                if n >= 0.0 {
                    Val::String(format!(" {}", s).into())
                } else {
                    Val::String(s.into())
                }
            }
            Builtin::Tab => {
                return Err(error!(IllegalFunctionCall; "TAB IS ONLY VALID IN PRINT"));
            }
            Builtin::Tan => Val::Number(args.number(0)?.tan()),
            Builtin::Time => Val::String(chrono::Local::now().format("%H:%M:%S").to_string().into()),
            Builtin::Val => Val::Number(parse_leading_number(&args.string(0)?)),
        };
        Ok(val)
    }

    /// Negative arguments reseed, zero repeats the last value,
    /// anything else draws the next value in `[0, 1)`.
    fn rnd(&mut self, n: f64) -> f64 {
        if n < 0.0 {
            self.rng = StdRng::seed_from_u64(n.to_bits());
        } else if n == 0.0 {
            return self.last_rnd;
        }
        self.last_rnd = self.rng.gen::<f64>();
        self.last_rnd
    }
}

struct Args {
    builtin: Builtin,
    args: Vec<Val>,
}

impl Args {
    fn number(&self, index: usize) -> Result<f64> {
        match self.args.get(index) {
            Some(val) => f64::try_from(val.clone()).map_err(|_| self.mismatch(index)),
            None => Err(self.illegal()),
        }
    }

    fn string(&self, index: usize) -> Result<Rc<str>> {
        match self.args.get(index) {
            Some(val) => Rc::<str>::try_from(val.clone()).map_err(|_| self.mismatch(index)),
            None => Err(self.illegal()),
        }
    }

    /// A non-negative whole count such as a length or position.
    fn count(&self, index: usize) -> Result<usize> {
        let n = self.number(index)?.trunc();
        if n < 0.0 || !n.is_finite() {
            return Err(self.illegal());
        }
        Ok(n.min(usize::max_value() as f64) as usize)
    }

    fn mismatch(&self, index: usize) -> Error {
        error!(TypeMismatch; &format!("{} ARGUMENT {}", self.builtin.name(), index + 1))
    }

    fn illegal(&self) -> Error {
        error!(IllegalFunctionCall; self.builtin.name())
    }
}

/// The longest numeric prefix of a string, ignoring leading blanks.
fn parse_leading_number(s: &str) -> f64 {
    let s = s.trim_start();
    let mut best = 0.0;
    for (i, _) in s.char_indices().chain(std::iter::once((s.len(), ' '))) {
        if let Ok(n) = s[..i].parse::<f64>() {
            if s[..i].chars().all(|c| c.is_ascii_digit() || "+-.eE".contains(c)) {
                best = n;
            }
        }
    }
    best
}
