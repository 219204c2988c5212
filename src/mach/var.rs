use super::Val;
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

const MAX_ARRAY_LEN: usize = 1 << 24;

#[derive(Debug)]
struct Array {
    bounds: Vec<usize>,
    vals: Vec<Val>,
}

/// ## Variable memory
///
/// Scalars spring into existence on first use. Arrays must be declared
/// with DIM; each dimension indexes from zero up to its bound.

#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<Rc<str>, Val>,
    arrays: HashMap<Rc<str>, Array>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.arrays.clear();
    }

    pub fn fetch(&self, var_name: &Rc<str>) -> Val {
        match self.vars.get(var_name) {
            Some(val) => val.clone(),
            None => Val::default_for(var_name),
        }
    }

    pub fn store(&mut self, var_name: &Rc<str>, value: Val) -> Result<()> {
        value.check_type(var_name)?;
        self.vars.insert(var_name.clone(), value);
        Ok(())
    }

    pub fn dimension_array(&mut self, var_name: &Rc<str>, dims: Vec<Val>) -> Result<()> {
        if self.arrays.contains_key(var_name) {
            return Err(error!(RedimensionedArray; var_name));
        }
        let mut bounds: Vec<usize> = vec![];
        let mut len: usize = 1;
        for dim in dims {
            let n = f64::try_from(dim)?;
            if n.fract() != 0.0 || n < 1.0 || n > MAX_ARRAY_LEN as f64 {
                return Err(error!(IllegalFunctionCall;
                    &format!("INVALID DIMENSION {}({})", var_name, Val::Number(n))));
            }
            let bound = n as usize;
            len = match len.checked_mul(bound + 1) {
                Some(len) if len <= MAX_ARRAY_LEN => len,
                _ => return Err(error!(OutOfMemory; var_name)),
            };
            bounds.push(bound);
        }
        let vals = vec![Val::default_for(var_name); len];
        self.arrays.insert(var_name.clone(), Array { bounds, vals });
        Ok(())
    }

    pub fn fetch_array(&self, var_name: &Rc<str>, indices: Vec<Val>) -> Result<Val> {
        let array = self.array(var_name)?;
        let offset = Self::offset(var_name, &array.bounds, indices)?;
        Ok(array.vals[offset].clone())
    }

    pub fn store_array(&mut self, var_name: &Rc<str>, indices: Vec<Val>, value: Val) -> Result<()> {
        value.check_type(var_name)?;
        let array = match self.arrays.get_mut(var_name) {
            Some(array) => array,
            None => return Err(error!(UndimensionedArray; var_name)),
        };
        let offset = Self::offset(var_name, &array.bounds, indices)?;
        array.vals[offset] = value;
        Ok(())
    }

    fn array(&self, var_name: &Rc<str>) -> Result<&Array> {
        match self.arrays.get(var_name) {
            Some(array) => Ok(array),
            None => Err(error!(UndimensionedArray; var_name)),
        }
    }

    /// Row-major position of an element, bounds checked per dimension.
    fn offset(var_name: &str, bounds: &[usize], indices: Vec<Val>) -> Result<usize> {
        if indices.len() != bounds.len() {
            return Err(error!(SubscriptOutOfRange;
                &format!("{} HAS {} DIMENSION(S)", var_name, bounds.len())));
        }
        let mut offset = 0;
        for (index, bound) in indices.into_iter().zip(bounds) {
            let index = f64::try_from(index)?.trunc();
            if index < 0.0 || index > *bound as f64 {
                return Err(error!(SubscriptOutOfRange; &format!(
                    "{}({}) EXCEEDS BOUND {}",
                    var_name,
                    Val::Number(index),
                    bound
                )));
            }
            offset = offset * (bound + 1) + index as usize;
        }
        Ok(offset)
    }
}
